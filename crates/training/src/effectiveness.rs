//! Effectiveness scoring of reported training outcomes.
//!
//! Each completed (or abandoned) training interaction produces one immutable
//! [`TransferOutcomeRecord`]. The caller persists the records; the
//! accumulated history is the only input to the recommender.

use serde::{Deserialize, Serialize};
use tutelage_core::{AgentId, Score};
use uuid::Uuid;

use crate::transfer::{KnowledgeTransferMessage, TransferType};

/// Weights for the effectiveness components. They sum to 1.0.
const PROFICIENCY_WEIGHT: f64 = 0.35;
const APPLICATION_WEIGHT: f64 = 0.30;
const RETENTION_WEIGHT: f64 = 0.20;
const SATISFACTION_WEIGHT: f64 = 0.15;

/// Upper bound of the satisfaction scale.
const SATISFACTION_SCALE: f64 = 5.0;

/// Identity of the transfer an outcome is reported for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRef {
    pub transfer_id: Uuid,
    pub transfer_type: TransferType,
    pub mentor_id: AgentId,
    pub mentee_id: AgentId,
}

impl From<&KnowledgeTransferMessage> for TransferRef {
    fn from(message: &KnowledgeTransferMessage) -> Self {
        Self {
            transfer_id: message.id,
            transfer_type: message.transfer_type,
            mentor_id: message.from.clone(),
            mentee_id: message.to.clone(),
        }
    }
}

/// Measured results of a training interaction.
///
/// Rates are expected in [0, 1]; `satisfaction_score` on a 0-5 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeMetrics {
    pub completed: bool,
    /// Minutes spent on the interaction.
    #[serde(default)]
    pub time_spent: u32,
    #[serde(default)]
    pub skills_gained: Vec<String>,
    #[serde(default)]
    pub proficiency_increase: f64,
    #[serde(default)]
    pub application_rate: f64,
    #[serde(default)]
    pub retention_rate: f64,
    #[serde(default)]
    pub satisfaction_score: f64,
}

/// Free-text feedback from both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeFeedback {
    #[serde(default)]
    pub mentee_comments: String,
    #[serde(default)]
    pub mentor_comments: String,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Outcome reported by the caller once training has run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingOutcome {
    pub metrics: OutcomeMetrics,
    #[serde(default)]
    pub feedback: OutcomeFeedback,
}

/// Scored, immutable record of one training interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcomeRecord {
    pub transfer_id: Uuid,
    pub transfer_type: TransferType,
    pub mentor_id: AgentId,
    pub mentee_id: AgentId,
    pub metrics: OutcomeMetrics,
    pub feedback: OutcomeFeedback,
    pub effectiveness: Score,
}

/// Effectiveness of an outcome in [0, 1].
///
/// Incomplete training scores exactly zero regardless of the other metrics.
pub fn compute_effectiveness(metrics: &OutcomeMetrics) -> Score {
    if !metrics.completed {
        return Score::zero();
    }
    Score::new(
        PROFICIENCY_WEIGHT * finite(metrics.proficiency_increase)
            + APPLICATION_WEIGHT * finite(metrics.application_rate)
            + RETENTION_WEIGHT * finite(metrics.retention_rate)
            + SATISFACTION_WEIGHT * (finite(metrics.satisfaction_score) / SATISFACTION_SCALE),
    )
}

/// Score `outcome` and wrap it into a record for `transfer`.
pub fn track_effectiveness(transfer: &TransferRef, outcome: TrainingOutcome) -> TransferOutcomeRecord {
    let effectiveness = compute_effectiveness(&outcome.metrics);
    tracing::debug!(
        transfer = %transfer.transfer_id,
        transfer_type = %transfer.transfer_type,
        completed = outcome.metrics.completed,
        effectiveness = %effectiveness,
        "training outcome scored"
    );
    TransferOutcomeRecord {
        transfer_id: transfer.transfer_id,
        transfer_type: transfer.transfer_type,
        mentor_id: transfer.mentor_id.clone(),
        mentee_id: transfer.mentee_id.clone(),
        metrics: outcome.metrics,
        feedback: outcome.feedback,
        effectiveness,
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
