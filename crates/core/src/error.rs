use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::profile::AgentId;

/// Errors raised when a caller-supplied snapshot violates the data model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    /// The roster was not supplied at all.
    #[error("no agent roster supplied")]
    MissingRoster,

    /// The curriculum catalogue was not supplied at all.
    #[error("no curriculum catalogue supplied")]
    MissingCurriculum,

    /// The snapshot could not be parsed.
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot file could not be read.
    #[error("failed to read snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two profiles share the same agent id.
    #[error("duplicate agent id in roster: {0}")]
    DuplicateAgent(AgentId),

    /// A skill proficiency lies outside [0, 1].
    #[error("agent {agent} has proficiency {value} for '{skill}', expected a value in [0, 1]")]
    ProficiencyOutOfRange {
        agent: AgentId,
        skill: String,
        value: f64,
    },

    /// A mentor lists more mentees than the capacity allows.
    #[error("agent {agent} lists {count} mentees, the maximum is {max}")]
    MenteeOverflow {
        agent: AgentId,
        count: usize,
        max: usize,
    },

    /// An agent is recorded as its own mentor or mentee.
    #[error("agent {0} is recorded as mentoring itself")]
    SelfMentorship(AgentId),

    /// Mentor statistics are internally inconsistent.
    #[error("agent {agent} has inconsistent mentor stats: {reason}")]
    InvalidStats { agent: AgentId, reason: String },
}
