//! Training program and feedback loop for mentor/mentee pairs.
//!
//! This crate provides:
//! - The nine knowledge-transfer mechanisms and the message handed to the messaging layer
//! - A fixed three-stage accelerated training plan between adjacent levels
//! - Effectiveness scoring of reported training outcomes
//! - Transfer-type recommendations driven by historical effectiveness

pub mod curriculum;
pub mod effectiveness;
mod explainer;
pub mod recommend;
pub mod transfer;

pub use curriculum::{build_curriculum, StageKind, TrainingPlan, TrainingSession, TrainingStage};
pub use effectiveness::{
    compute_effectiveness, track_effectiveness, OutcomeFeedback, OutcomeMetrics, TrainingOutcome,
    TransferOutcomeRecord, TransferRef,
};
pub use explainer::recommendation_text;
pub use recommend::{
    recommend_transfer_types, TransferRecommendation, TransferRecommender, TransferTypeStats,
};
pub use transfer::{
    KnowledgeTransferMessage, MessageKind, ParseTransferTypeError, TransferStatus, TransferType,
};
