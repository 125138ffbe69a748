//! Transfer-type recommendations from historical effectiveness.
//!
//! The policy exploits the best-performing mechanisms and flags rarely used
//! ones as exploration candidates. It never forces exploration; the caller
//! decides what to do with the `underutilized` list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tutelage_core::{AgentId, AgentProfile, Score};
use tutelage_state::RecommenderSettings;

use crate::effectiveness::TransferOutcomeRecord;
use crate::explainer::recommendation_text;
use crate::transfer::TransferType;

/// Number of entries in `top_performing`.
const TOP_PERFORMING: usize = 3;

/// Aggregate effectiveness of one transfer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTypeStats {
    pub transfer_type: TransferType,
    pub sessions: usize,
    pub mean_effectiveness: Score,
}

/// Recommendation for a mentee's next training sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecommendation {
    pub mentee_id: AgentId,
    /// Up to three types with the highest mean effectiveness, best first.
    pub top_performing: Vec<TransferTypeStats>,
    /// Types with too few records to judge, in canonical order.
    pub underutilized: Vec<TransferType>,
    pub recommendation_text: String,
    /// Every attempted type, best first.
    pub stats: Vec<TransferTypeStats>,
}

/// Recommender configured from [`RecommenderSettings`].
#[derive(Debug, Clone, Default)]
pub struct TransferRecommender {
    settings: RecommenderSettings,
}

impl TransferRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &RecommenderSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// Recommend transfer types for `mentee` from `history`.
    ///
    /// `history` is in chronological order; with a history window set only
    /// the most recent records count.
    pub fn recommend(
        &self,
        mentee: &AgentProfile,
        history: &[TransferOutcomeRecord],
    ) -> TransferRecommendation {
        let window = match self.settings.history_window {
            Some(n) if n < history.len() => &history[history.len() - n..],
            _ => history,
        };

        let stats = type_stats(window);
        let top_performing: Vec<TransferTypeStats> =
            stats.iter().take(TOP_PERFORMING).cloned().collect();

        let underutilized: Vec<TransferType> = TransferType::ALL
            .into_iter()
            .filter(|t| {
                let sessions = stats
                    .iter()
                    .find(|s| s.transfer_type == *t)
                    .map_or(0, |s| s.sessions);
                sessions < self.settings.underutilized_threshold
            })
            .collect();

        let recommendation_text = recommendation_text(top_performing.first());

        tracing::debug!(
            mentee = %mentee.agent_id,
            records = window.len(),
            attempted = stats.len(),
            underutilized = underutilized.len(),
            "transfer types recommended"
        );

        TransferRecommendation {
            mentee_id: mentee.agent_id.clone(),
            top_performing,
            underutilized,
            recommendation_text,
            stats,
        }
    }
}

/// Recommend with default settings.
pub fn recommend_transfer_types(
    mentee: &AgentProfile,
    history: &[TransferOutcomeRecord],
) -> TransferRecommendation {
    TransferRecommender::new().recommend(mentee, history)
}

/// Per-type statistics sorted by mean effectiveness, best first.
///
/// Ties keep canonical type order. Incomplete records count as zero whatever
/// effectiveness they were stored with.
fn type_stats(history: &[TransferOutcomeRecord]) -> Vec<TransferTypeStats> {
    let mut grouped: BTreeMap<TransferType, (usize, f64)> = BTreeMap::new();
    for record in history {
        let effectiveness = if record.metrics.completed {
            record.effectiveness.value()
        } else {
            0.0
        };
        let entry = grouped.entry(record.transfer_type).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += effectiveness;
    }

    let mut stats: Vec<TransferTypeStats> = grouped
        .into_iter()
        .map(|(transfer_type, (sessions, total))| TransferTypeStats {
            transfer_type,
            sessions,
            mean_effectiveness: Score::new(total / sessions as f64),
        })
        .collect();
    stats.sort_by(|a, b| {
        b.mean_effectiveness
            .value()
            .total_cmp(&a.mean_effectiveness.value())
    });
    stats
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::effectiveness::{OutcomeFeedback, OutcomeMetrics};
    use proptest::prelude::*;
    use tutelage_test_utils::AgentBuilder;
    use uuid::Uuid;

    fn arb_record() -> impl Strategy<Value = TransferOutcomeRecord> {
        (0usize..TransferType::ALL.len(), 0.0f64..=1.0).prop_map(|(idx, eff)| {
            TransferOutcomeRecord {
                transfer_id: Uuid::nil(),
                transfer_type: TransferType::ALL[idx],
                mentor_id: AgentId::from("m"),
                mentee_id: AgentId::from("e"),
                metrics: OutcomeMetrics::default(),
                feedback: OutcomeFeedback::default(),
                effectiveness: Score::new(eff),
            }
        })
    }

    proptest! {
        /// Property: top performers are sorted, capped at three and account for every record.
        #[test]
        fn top_performing_sorted_and_capped(history in prop::collection::vec(arb_record(), 0..40)) {
            let mentee = AgentBuilder::new("e", 1).build();
            let rec = recommend_transfer_types(&mentee, &history);

            prop_assert!(rec.top_performing.len() <= 3);
            for pair in rec.top_performing.windows(2) {
                prop_assert!(pair[0].mean_effectiveness.value() >= pair[1].mean_effectiveness.value());
            }
            let total: usize = rec.stats.iter().map(|s| s.sessions).sum();
            prop_assert_eq!(total, history.len());
        }
    }
}
