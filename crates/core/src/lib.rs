//! Shared data model for mentor/mentee matching and training.
//!
//! This crate provides:
//! - Agent profiles, mentor statistics and the curriculum catalogue
//! - A bounded [`Score`] newtype used by every scoring component
//! - Snapshot loading that validates caller-supplied rosters at the boundary

mod error;
pub mod profile;
pub mod snapshot;
mod types;

pub use error::SnapshotError;
pub use profile::{
    AgentId, AgentProfile, AgentStatus, CurriculumCatalogue, MentorStats, MAX_MENTEES,
    MIN_LEVEL_GAP, STRONG_SKILL_THRESHOLD,
};
pub use snapshot::Roster;
pub use types::Score;
