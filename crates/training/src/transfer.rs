//! Knowledge-transfer mechanisms and the message delivered between agents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tutelage_core::AgentId;
use uuid::Uuid;

/// Pedagogical mechanism of a single training session.
///
/// Declaration order is the canonical order used when reporting per-type
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferType {
    Observation,
    CoExecution,
    IndependentPractice,
    PatternSharing,
    ErrorAnalysis,
    Feedback,
    Reflection,
    Teaching,
    Assessment,
}

impl TransferType {
    /// Every transfer type, in canonical order.
    pub const ALL: [TransferType; 9] = [
        Self::Observation,
        Self::CoExecution,
        Self::IndependentPractice,
        Self::PatternSharing,
        Self::ErrorAnalysis,
        Self::Feedback,
        Self::Reflection,
        Self::Teaching,
        Self::Assessment,
    ];

    /// Short label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Observation => "observation",
            Self::CoExecution => "co-execution",
            Self::IndependentPractice => "independent-practice",
            Self::PatternSharing => "pattern-sharing",
            Self::ErrorAnalysis => "error-analysis",
            Self::Feedback => "feedback",
            Self::Reflection => "reflection",
            Self::Teaching => "teaching",
            Self::Assessment => "assessment",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown transfer type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transfer type '{0}'")]
pub struct ParseTransferTypeError(String);

impl FromStr for TransferType {
    type Err = ParseTransferTypeError;

    /// Accepts the kebab-case label, case-insensitively, with `_` or `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|t| t.label() == normalized)
            .ok_or_else(|| ParseTransferTypeError(s.to_string()))
    }
}

/// Message type tag; only knowledge transfers are produced here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    KnowledgeTransfer,
}

/// Delivery state, advanced by the messaging collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    #[default]
    Pending,
    Delivered,
    Failed,
}

/// Knowledge handed to the messaging collaborator for delivery.
///
/// `content` is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeTransferMessage {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub from: AgentId,
    pub to: AgentId,
    pub transfer_type: TransferType,
    pub content: serde_json::Value,
    pub timestamp_ms: i64,
    pub status: TransferStatus,
}

impl KnowledgeTransferMessage {
    /// New pending message stamped with the current UTC time.
    pub fn new(
        from: AgentId,
        to: AgentId,
        transfer_type: TransferType,
        content: serde_json::Value,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        let timestamp_ms = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
        Self {
            id: Uuid::new_v4(),
            kind: MessageKind::KnowledgeTransfer,
            from,
            to,
            transfer_type,
            content,
            timestamp_ms,
            status: TransferStatus::Pending,
        }
    }
}
