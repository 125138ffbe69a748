//! Validated roster snapshots.
//!
//! Rosters arrive from the persistence collaborator as JSON. They are checked
//! once here so the scoring code can rely on the data-model invariants
//! instead of re-checking them on every call.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::SnapshotError;
use crate::profile::{AgentProfile, CurriculumCatalogue, MAX_MENTEES};

/// A point-in-time list of agent profiles that passed validation.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    agents: Vec<AgentProfile>,
}

impl Roster {
    /// Validate a list of profiles, preserving their order.
    pub fn new(agents: Vec<AgentProfile>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(agents.len());
        for agent in &agents {
            if !seen.insert(&agent.agent_id) {
                return Err(SnapshotError::DuplicateAgent(agent.agent_id.clone()));
            }
            validate_profile(agent)?;
        }
        tracing::debug!(agents = agents.len(), "roster snapshot validated");
        Ok(Self { agents })
    }

    /// Parse and validate a JSON array of profiles.
    ///
    /// A literal `null` is rejected as [`SnapshotError::MissingRoster`].
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let parsed: Option<Vec<AgentProfile>> =
            serde_json::from_str(raw).map_err(|source| SnapshotError::Parse {
                what: "agent roster",
                source,
            })?;
        Self::new(parsed.ok_or(SnapshotError::MissingRoster)?)
    }

    /// Read, parse and validate a roster file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn agents(&self) -> &[AgentProfile] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Look up a profile by id.
    pub fn get(&self, agent_id: &str) -> Option<&AgentProfile> {
        self.agents.iter().find(|a| a.agent_id.as_str() == agent_id)
    }

    pub fn into_inner(self) -> Vec<AgentProfile> {
        self.agents
    }
}

impl AsRef<[AgentProfile]> for Roster {
    fn as_ref(&self) -> &[AgentProfile] {
        &self.agents
    }
}

impl CurriculumCatalogue {
    /// Parse a `{"<level>": [skill, ...]}` object.
    ///
    /// A literal `null` is rejected as [`SnapshotError::MissingCurriculum`].
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let parsed: Option<CurriculumCatalogue> =
            serde_json::from_str(raw).map_err(|source| SnapshotError::Parse {
                what: "curriculum catalogue",
                source,
            })?;
        parsed.ok_or(SnapshotError::MissingCurriculum)
    }

    /// Read and parse a catalogue file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

fn validate_profile(agent: &AgentProfile) -> Result<(), SnapshotError> {
    for (skill, &value) in &agent.skill_proficiency {
        if !(0.0..=1.0).contains(&value) {
            return Err(SnapshotError::ProficiencyOutOfRange {
                agent: agent.agent_id.clone(),
                skill: skill.clone(),
                value,
            });
        }
    }

    if agent.mentees.len() > MAX_MENTEES {
        return Err(SnapshotError::MenteeOverflow {
            agent: agent.agent_id.clone(),
            count: agent.mentees.len(),
            max: MAX_MENTEES,
        });
    }

    if agent.mentees.contains(&agent.agent_id) || agent.mentor_id.as_ref() == Some(&agent.agent_id)
    {
        return Err(SnapshotError::SelfMentorship(agent.agent_id.clone()));
    }

    let stats = &agent.mentor_stats;
    if stats.graduated_mentees > stats.total_mentees {
        return Err(SnapshotError::InvalidStats {
            agent: agent.agent_id.clone(),
            reason: format!(
                "{} graduated out of {} total",
                stats.graduated_mentees, stats.total_mentees
            ),
        });
    }
    if let Some(days) = stats.average_training_time_days {
        if !days.is_finite() || days < 0.0 {
            return Err(SnapshotError::InvalidStats {
                agent: agent.agent_id.clone(),
                reason: format!("average training time {days} is not a non-negative number"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn accepts_valid_roster_in_order() {
        let roster = Roster::from_json(
            r#"[
                {"agentId": "m1", "currentLevel": 5, "skillProficiency": {"x": 0.9}},
                {"agentId": "e1", "currentLevel": 2, "mentorId": "m1"}
            ]"#,
        )
        .unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.agents()[0].agent_id.as_str(), "m1");
        assert!(roster.get("e1").is_some());
        assert!(roster.get("nobody").is_none());
    }

    #[test]
    fn empty_roster_is_valid() {
        let roster = Roster::from_json("[]").unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn null_roster_fails_fast() {
        let err = Roster::from_json("null").unwrap_err();
        assert!(matches!(err, SnapshotError::MissingRoster));
    }

    #[test]
    fn malformed_roster_reports_parse_error() {
        let err = Roster::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse { .. }));
        assert!(err.to_string().contains("agent roster"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let agents = vec![AgentProfile::new("a", 1), AgentProfile::new("a", 2)];
        let err = Roster::new(agents).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateAgent(id) if id.as_str() == "a"));
    }

    #[test]
    fn rejects_out_of_range_proficiency() {
        let mut agent = AgentProfile::new("a", 1);
        agent.skill_proficiency.insert("x".into(), 1.2);
        let err = Roster::new(vec![agent]).unwrap_err();
        assert!(matches!(err, SnapshotError::ProficiencyOutOfRange { .. }));
    }

    #[test]
    fn rejects_mentee_overflow() {
        let mut agent = AgentProfile::new("m", 6);
        agent.mentees = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let err = Roster::new(vec![agent]).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MenteeOverflow { count: 4, max: 3, .. }
        ));
    }

    #[test]
    fn rejects_self_mentorship() {
        let mut agent = AgentProfile::new("m", 6);
        agent.mentor_id = Some("m".into());
        let err = Roster::new(vec![agent]).unwrap_err();
        assert!(matches!(err, SnapshotError::SelfMentorship(_)));
    }

    #[test]
    fn rejects_inconsistent_stats() {
        let mut agent = AgentProfile::new("m", 6);
        agent.mentor_stats.total_mentees = 1;
        agent.mentor_stats.graduated_mentees = 2;
        let err = Roster::new(vec![agent]).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidStats { .. }));
    }

    #[test]
    fn null_curriculum_fails_fast() {
        let err = CurriculumCatalogue::from_json("null").unwrap_err();
        assert!(matches!(err, SnapshotError::MissingCurriculum));
    }

    #[test]
    fn loads_roster_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"agentId": "solo", "currentLevel": 3}}]"#).unwrap();
        let roster = Roster::load(file.path()).unwrap();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = Roster::load(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
