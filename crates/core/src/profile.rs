//! Agent profiles and the curriculum catalogue.
//!
//! Profiles are owned by the persistence collaborator. This crate only reads
//! snapshots of them and derives scores and decisions from those snapshots.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Maximum number of mentees a single mentor may carry.
pub const MAX_MENTEES: usize = 3;

/// Minimum level difference between mentor and mentee.
pub const MIN_LEVEL_GAP: u32 = 2;

/// Proficiency above which a skill counts as one of the agent's strong skills.
pub const STRONG_SKILL_THRESHOLD: f64 = 0.7;

/// Unique identifier of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AgentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle status of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Active,
    Idle,
    Inactive,
    Suspended,
}

impl AgentStatus {
    /// Whether an agent in this status may take on a mentee.
    pub fn can_mentor(&self) -> bool {
        matches!(self, Self::Active | Self::Idle)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cumulative mentoring record of an agent.
///
/// `total_mentees` and `graduated_mentees` only ever grow;
/// `average_training_time_days` is a running mean over graduations and is
/// `None` until one is recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorStats {
    #[serde(default)]
    pub total_mentees: u32,
    #[serde(default)]
    pub graduated_mentees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_training_time_days: Option<f64>,
}

impl MentorStats {
    /// Record that a new mentee was taken on.
    pub fn record_enrollment(&mut self) {
        self.total_mentees = self.total_mentees.saturating_add(1);
    }

    /// Record a graduation that took `days` of training.
    pub fn record_graduation(&mut self, days: f64) {
        let previous = f64::from(self.graduated_mentees);
        self.graduated_mentees = self.graduated_mentees.saturating_add(1);
        let days = if days.is_finite() { days.max(0.0) } else { 0.0 };
        let mean = self.average_training_time_days.unwrap_or(0.0);
        self.average_training_time_days =
            Some((mean * previous + days) / f64::from(self.graduated_mentees));
    }
}

/// Snapshot of one agent as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub agent_id: AgentId,
    pub current_level: u32,
    #[serde(default)]
    pub skill_proficiency: BTreeMap<String, f64>,
    #[serde(default)]
    pub mentees: Vec<AgentId>,
    /// Absent in older records; filled with [`MentorStats::default`] on load.
    #[serde(default)]
    pub mentor_stats: MentorStats,
    #[serde(default)]
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<AgentId>,
}

impl AgentProfile {
    /// Create an active agent with no skills, mentees or history.
    pub fn new(agent_id: impl Into<AgentId>, current_level: u32) -> Self {
        Self {
            agent_id: agent_id.into(),
            current_level,
            skill_proficiency: BTreeMap::new(),
            mentees: Vec::new(),
            mentor_stats: MentorStats::default(),
            status: AgentStatus::Active,
            mentor_id: None,
        }
    }

    pub fn mentee_count(&self) -> usize {
        self.mentees.len()
    }

    /// Whether another mentee fits under [`MAX_MENTEES`].
    pub fn has_capacity(&self) -> bool {
        self.mentees.len() < MAX_MENTEES
    }

    /// Skills whose proficiency is strictly above `threshold`.
    pub fn strong_skills(&self, threshold: f64) -> BTreeSet<String> {
        self.skill_proficiency
            .iter()
            .filter(|(_, p)| **p > threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Skills expected at each proficiency level.
///
/// Serialized as a plain object keyed by level: `{"4": ["x", "z"]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurriculumCatalogue {
    levels: BTreeMap<u32, Vec<String>>,
}

impl CurriculumCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the skill list for a level.
    pub fn with_level<I, S>(mut self, level: u32, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels
            .insert(level, skills.into_iter().map(Into::into).collect());
        self
    }

    /// Skills expected at `level`, deduplicated. Empty for unknown levels.
    pub fn skills_for(&self, level: u32) -> BTreeSet<String> {
        self.levels
            .get(&level)
            .map(|skills| skills.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
