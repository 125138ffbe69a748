//! Committing a pairing decision against the persistence collaborator.
//!
//! Matching runs on snapshots, so two requests can both see a mentor at 2/3
//! capacity and both pick it. The store owns the mentee slot count; this
//! module re-validates against a fresh read and then asks the store for an
//! atomic compare-and-assign keyed on the mentee count it just read.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tutelage_core::{AgentId, AgentProfile, MAX_MENTEES};

use crate::matcher::PairingDecision;
use crate::validator::{validate_pairing, PairingIssue};

/// Errors that can occur while committing a pairing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommitError {
    /// One of the agents does not exist in the store.
    #[error("agent not found: {0}")]
    UnknownAgent(AgentId),

    /// The fresh state fails validation.
    #[error("pairing rejected: {}", render_issues(.0))]
    Rejected(Vec<PairingIssue>),

    /// The mentor's mentee count moved between the read and the write.
    #[error("mentor {mentor} changed concurrently: expected {expected} mentees, found {found}")]
    Conflict {
        mentor: AgentId,
        expected: usize,
        found: usize,
    },

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(String),
}

fn render_issues(issues: &[PairingIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Storage seam owning agent profiles and mentee slots.
pub trait PairingStore: Send + Sync {
    /// Fresh read of one profile.
    fn profile(&self, agent_id: &AgentId) -> Result<Option<AgentProfile>, CommitError>;

    /// Atomically add `mentee_id` to `mentor_id` if the mentor still has
    /// exactly `expected_mentees` mentees. Returns the updated mentor.
    fn compare_and_assign(
        &self,
        mentor_id: &AgentId,
        mentee_id: &AgentId,
        expected_mentees: usize,
    ) -> Result<AgentProfile, CommitError>;
}

/// Re-validate `decision` against fresh state and commit it.
///
/// On success returns the mentor as stored after the assignment. A pairing
/// that is already stored is returned as is, so retries succeed. A
/// [`CommitError::Conflict`] means another pairing won the slot; the caller
/// should re-run matching on a new snapshot.
pub fn commit_pairing<S: PairingStore + ?Sized>(
    store: &S,
    decision: &PairingDecision,
) -> Result<AgentProfile, CommitError> {
    let mentor = store
        .profile(&decision.mentor_id)?
        .ok_or_else(|| CommitError::UnknownAgent(decision.mentor_id.clone()))?;
    let mentee = store
        .profile(&decision.mentee_id)?
        .ok_or_else(|| CommitError::UnknownAgent(decision.mentee_id.clone()))?;

    if mentor.mentees.contains(&mentee.agent_id) {
        tracing::debug!(
            mentor = %mentor.agent_id,
            mentee = %mentee.agent_id,
            "pairing already committed"
        );
        return Ok(mentor);
    }

    let report = validate_pairing(&mentor, &mentee);
    if !report.is_valid {
        tracing::warn!(
            mentor = %mentor.agent_id,
            mentee = %mentee.agent_id,
            issues = report.issues.len(),
            "pairing rejected at commit"
        );
        return Err(CommitError::Rejected(report.issues));
    }

    match store.compare_and_assign(&mentor.agent_id, &mentee.agent_id, mentor.mentee_count()) {
        Ok(updated) => {
            tracing::info!(
                mentor = %updated.agent_id,
                mentee = %mentee.agent_id,
                mentees = updated.mentee_count(),
                "pairing committed"
            );
            Ok(updated)
        }
        Err(err) => {
            tracing::warn!(
                mentor = %mentor.agent_id,
                mentee = %mentee.agent_id,
                error = %err,
                "pairing commit failed"
            );
            Err(err)
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemPairingStore {
    inner: Arc<Mutex<HashMap<AgentId, AgentProfile>>>,
}

impl MemPairingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a roster snapshot.
    pub fn from_profiles(profiles: impl IntoIterator<Item = AgentProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|p| (p.agent_id.clone(), p))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    pub fn insert(&self, profile: AgentProfile) {
        self.inner.lock().insert(profile.agent_id.clone(), profile);
    }

    /// All profiles, ordered by agent id.
    pub fn snapshot(&self) -> Vec<AgentProfile> {
        let mut profiles: Vec<AgentProfile> = self.inner.lock().values().cloned().collect();
        profiles.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        profiles
    }
}

impl PairingStore for MemPairingStore {
    fn profile(&self, agent_id: &AgentId) -> Result<Option<AgentProfile>, CommitError> {
        Ok(self.inner.lock().get(agent_id).cloned())
    }

    fn compare_and_assign(
        &self,
        mentor_id: &AgentId,
        mentee_id: &AgentId,
        expected_mentees: usize,
    ) -> Result<AgentProfile, CommitError> {
        let mut guard = self.inner.lock();

        let mentee_mentor = guard
            .get(mentee_id)
            .ok_or_else(|| CommitError::UnknownAgent(mentee_id.clone()))?
            .mentor_id
            .clone();
        if let Some(current) = mentee_mentor {
            if current != *mentor_id {
                return Err(CommitError::Rejected(vec![PairingIssue::AlreadyMentored {
                    current_mentor: current,
                }]));
            }
        }

        let mentor = guard
            .get_mut(mentor_id)
            .ok_or_else(|| CommitError::UnknownAgent(mentor_id.clone()))?;
        if mentor.mentees.contains(mentee_id) {
            return Ok(mentor.clone());
        }
        let found = mentor.mentee_count();
        if found != expected_mentees {
            return Err(CommitError::Conflict {
                mentor: mentor_id.clone(),
                expected: expected_mentees,
                found,
            });
        }
        if found >= MAX_MENTEES {
            return Err(CommitError::Rejected(vec![PairingIssue::MentorAtCapacity {
                mentees: found,
            }]));
        }
        mentor.mentees.push(mentee_id.clone());
        mentor.mentor_stats.record_enrollment();
        let updated = mentor.clone();

        if let Some(mentee) = guard.get_mut(mentee_id) {
            mentee.mentor_id = Some(mentor_id.clone());
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutelage_test_utils::AgentBuilder;

    fn decision(mentor: &str, mentee: &str) -> PairingDecision {
        PairingDecision {
            mentor_id: AgentId::from(mentor),
            mentee_id: AgentId::from(mentee),
        }
    }

    #[test]
    fn commits_valid_pairing() {
        let store = MemPairingStore::from_profiles([
            AgentBuilder::new("m", 5).mentees(1).build(),
            AgentBuilder::new("e", 3).build(),
        ]);
        let mentor = commit_pairing(&store, &decision("m", "e")).unwrap();
        assert_eq!(mentor.mentee_count(), 2);
        assert_eq!(mentor.mentor_stats.total_mentees, 1);

        let mentee = store.profile(&AgentId::from("e")).unwrap().unwrap();
        assert_eq!(mentee.mentor_id, Some(AgentId::from("m")));
    }

    #[test]
    fn commit_is_idempotent_for_existing_pair() {
        let store = MemPairingStore::from_profiles([
            AgentBuilder::new("m", 5).build(),
            AgentBuilder::new("e", 3).build(),
        ]);
        commit_pairing(&store, &decision("m", "e")).unwrap();
        let again = commit_pairing(&store, &decision("m", "e")).unwrap();
        assert_eq!(again.mentee_count(), 1);
    }

    #[test]
    fn retry_succeeds_when_pairing_filled_last_slot() {
        let store = MemPairingStore::from_profiles([
            AgentBuilder::new("m", 5).mentees(2).build(),
            AgentBuilder::new("e", 3).build(),
        ]);
        let first = commit_pairing(&store, &decision("m", "e")).unwrap();
        assert_eq!(first.mentee_count(), MAX_MENTEES);

        let retry = commit_pairing(&store, &decision("m", "e")).unwrap();
        assert_eq!(retry.mentee_count(), MAX_MENTEES);
        assert_eq!(retry.mentor_stats.total_mentees, 1);
    }

    #[test]
    fn rejects_invalid_fresh_state() {
        let store = MemPairingStore::from_profiles([
            AgentBuilder::new("m", 5).mentees(3).build(),
            AgentBuilder::new("e", 4).build(),
        ]);
        let err = commit_pairing(&store, &decision("m", "e")).unwrap_err();
        match err {
            CommitError::Rejected(issues) => assert_eq!(issues.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_agent_is_reported() {
        let store = MemPairingStore::from_profiles([AgentBuilder::new("m", 5).build()]);
        let err = commit_pairing(&store, &decision("m", "ghost")).unwrap_err();
        assert!(matches!(err, CommitError::UnknownAgent(id) if id.as_str() == "ghost"));
    }

    #[test]
    fn stale_count_is_a_conflict() {
        let store = MemPairingStore::from_profiles([
            AgentBuilder::new("m", 5).mentees(2).build(),
            AgentBuilder::new("e", 3).build(),
        ]);
        let err = store
            .compare_and_assign(&AgentId::from("m"), &AgentId::from("e"), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            CommitError::Conflict {
                expected: 1,
                found: 2,
                ..
            }
        ));
        assert!(err.to_string().contains("changed concurrently"));
    }

    #[test]
    fn mentee_claimed_by_other_mentor_is_rejected() {
        let store = MemPairingStore::from_profiles([
            AgentBuilder::new("m", 5).build(),
            AgentBuilder::new("e", 3).mentor("other").build(),
        ]);
        let err = store
            .compare_and_assign(&AgentId::from("m"), &AgentId::from("e"), 0)
            .unwrap_err();
        assert!(err.to_string().contains("already mentored by other"));
    }

    #[test]
    fn snapshot_is_sorted() {
        let store = MemPairingStore::new();
        store.insert(AgentBuilder::new("b", 1).build());
        store.insert(AgentBuilder::new("a", 1).build());
        let ids: Vec<String> = store
            .snapshot()
            .into_iter()
            .map(|p| p.agent_id.0)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
