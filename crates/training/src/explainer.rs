//! Human-readable recommendation text.

use crate::recommend::TransferTypeStats;
use crate::transfer::TransferType;

/// Sentence naming the best transfer type, or the baseline advice when there
/// is no history yet.
pub fn recommendation_text(top: Option<&TransferTypeStats>) -> String {
    match top {
        Some(stats) => format!(
            "Prioritize {} sessions ({}% average effectiveness)",
            stats.transfer_type.label(),
            stats.mean_effectiveness.percent()
        ),
        None => format!(
            "Try {} sessions to establish baseline",
            TransferType::Observation.label()
        ),
    }
}
