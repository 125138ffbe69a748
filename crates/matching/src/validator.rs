//! Final deterministic gate before a pairing is committed.
//!
//! Unlike the scorer, the validator does not rank anything. It runs every
//! check independently and reports all violations at once.

use serde::Serialize;
use std::fmt;
use tutelage_core::{AgentId, AgentProfile, AgentStatus, MAX_MENTEES, MIN_LEVEL_GAP};

use crate::filter::level_gap;

/// A single reason a pairing may not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairingIssue {
    /// Mentor is fewer than two levels above the mentee.
    InsufficientLevelGap { mentor_level: u32, mentee_level: u32 },
    /// Mentor already carries the maximum number of mentees.
    MentorAtCapacity { mentees: usize },
    /// Mentor is inactive or suspended.
    MentorUnavailable { status: AgentStatus },
    /// Mentor and mentee are the same agent.
    SelfPairing,
    /// Mentee is already assigned to a different mentor.
    AlreadyMentored { current_mentor: AgentId },
}

impl fmt::Display for PairingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientLevelGap {
                mentor_level,
                mentee_level,
            } => write!(
                f,
                "mentor level {mentor_level} must be at least {MIN_LEVEL_GAP} above mentee level {mentee_level}"
            ),
            Self::MentorAtCapacity { mentees } => {
                write!(f, "mentor already has {mentees} of {MAX_MENTEES} mentees")
            }
            Self::MentorUnavailable { status } => write!(f, "mentor is {status}"),
            Self::SelfPairing => write!(f, "an agent cannot mentor itself"),
            Self::AlreadyMentored { current_mentor } => {
                write!(f, "mentee is already mentored by {current_mentor}")
            }
        }
    }
}

/// Outcome of [`validate_pairing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<PairingIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<PairingIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Issues rendered as human-readable lines.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Check every pairing invariant for `mentor` and `mentee`.
pub fn validate_pairing(mentor: &AgentProfile, mentee: &AgentProfile) -> ValidationReport {
    let mut issues = Vec::new();

    if level_gap(mentor, mentee) < i64::from(MIN_LEVEL_GAP) {
        issues.push(PairingIssue::InsufficientLevelGap {
            mentor_level: mentor.current_level,
            mentee_level: mentee.current_level,
        });
    }

    if mentor.mentee_count() >= MAX_MENTEES {
        issues.push(PairingIssue::MentorAtCapacity {
            mentees: mentor.mentee_count(),
        });
    }

    if !mentor.status.can_mentor() {
        issues.push(PairingIssue::MentorUnavailable {
            status: mentor.status,
        });
    }

    if mentor.agent_id == mentee.agent_id {
        issues.push(PairingIssue::SelfPairing);
    }

    if let Some(current) = &mentee.mentor_id {
        if *current != mentor.agent_id {
            issues.push(PairingIssue::AlreadyMentored {
                current_mentor: current.clone(),
            });
        }
    }

    ValidationReport::from_issues(issues)
}
