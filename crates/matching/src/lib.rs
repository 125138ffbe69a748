//! Mentor matching for the tutelage training program.
//!
//! This crate provides:
//! - Pure score functions (skill gap, availability, specialization, track record)
//! - A weighted pairing scorer and a hard-constraint candidate filter
//! - A matcher returning the best mentor or a ranked, explained candidate list
//! - A deterministic pairing validator and mentor-pool workload statistics
//! - A commit seam performing a validated compare-and-assign against the store
//!
//! Every function here reads a point-in-time snapshot. Decisions are advisory
//! until [`commit_pairing`] has re-validated them against fresh state.

pub mod commit;
pub mod filter;
pub mod matcher;
pub mod score;
mod scorer;
pub mod validator;
pub mod workload;

pub use commit::{commit_pairing, CommitError, MemPairingStore, PairingStore};
pub use filter::{eligible_mentors, is_eligible};
pub use matcher::{find_best_mentor, find_top_candidates, CandidateMatch, Matcher, PairingDecision};
pub use score::{availability_score, historical_success_rate, skill_gap_score, specialization_match};
pub use scorer::{pairing_score, PairingBreakdown, PairingScore, PairingScorer, Scorer};
pub use validator::{validate_pairing, PairingIssue, ValidationReport};
pub use workload::{mentor_workload, WorkloadDistribution, WorkloadStats, MENTOR_ELIGIBLE_LEVEL};
