//! Accelerated three-stage training plan between adjacent levels.
//!
//! The plan is a fixed template. Only the agent identities and the levels are
//! substituted into it; session content is not derived from the curriculum
//! catalogue, and the builder only ever targets `current_level + 1`.

use serde::{Deserialize, Serialize};
use tutelage_core::{AgentId, AgentProfile};

use crate::transfer::{KnowledgeTransferMessage, TransferType};

/// The three stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Foundation,
    Capability,
    Mastery,
}

impl StageKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Foundation => "Foundation",
            Self::Capability => "Capability",
            Self::Mastery => "Mastery",
        }
    }
}

/// One timed session within a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub time_slot: String,
    pub transfer_type: TransferType,
    pub description: String,
    pub expected_learning: Vec<String>,
    pub duration_minutes: u32,
}

/// A stage: a goal, its sessions and the milestones that gate advancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStage {
    pub kind: StageKind,
    pub name: String,
    pub goal: String,
    pub sessions: Vec<TrainingSession>,
    pub milestones: Vec<String>,
}

impl TrainingStage {
    pub fn duration_minutes(&self) -> u32 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }
}

/// Immutable plan for one mentee advancing one level under one mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlan {
    pub mentor_id: AgentId,
    pub mentee_id: AgentId,
    pub from_level: u32,
    pub to_level: u32,
    pub stages: Vec<TrainingStage>,
}

impl TrainingPlan {
    /// Every session across all stages, in order.
    pub fn sessions(&self) -> impl Iterator<Item = &TrainingSession> {
        self.stages.iter().flat_map(|stage| stage.sessions.iter())
    }

    pub fn total_duration_minutes(&self) -> u32 {
        self.stages.iter().map(TrainingStage::duration_minutes).sum()
    }

    /// One pending mentor → mentee message per session, carrying the session
    /// as its content.
    pub fn session_messages(&self) -> Vec<KnowledgeTransferMessage> {
        self.stages
            .iter()
            .flat_map(|stage| {
                stage.sessions.iter().map(move |session| {
                    KnowledgeTransferMessage::new(
                        self.mentor_id.clone(),
                        self.mentee_id.clone(),
                        session.transfer_type,
                        serde_json::json!({
                            "stage": stage.name,
                            "fromLevel": self.from_level,
                            "toLevel": self.to_level,
                            "session": session,
                        }),
                    )
                })
            })
            .collect()
    }
}

struct SessionTemplate {
    time_slot: &'static str,
    transfer_type: TransferType,
    description: &'static str,
    expected_learning: &'static [&'static str],
    duration_minutes: u32,
}

impl SessionTemplate {
    fn render(&self, mentor: &AgentId) -> TrainingSession {
        TrainingSession {
            time_slot: self.time_slot.to_string(),
            transfer_type: self.transfer_type,
            description: self.description.replace("{mentor}", mentor.as_str()),
            expected_learning: self
                .expected_learning
                .iter()
                .map(|s| s.to_string())
                .collect(),
            duration_minutes: self.duration_minutes,
        }
    }
}

const FOUNDATION_SESSIONS: &[SessionTemplate] = &[
    SessionTemplate {
        time_slot: "09:00-10:30",
        transfer_type: TransferType::Observation,
        description: "Observe {mentor} working through representative tasks end to end",
        expected_learning: &["task decomposition", "tool selection", "working rhythm"],
        duration_minutes: 90,
    },
    SessionTemplate {
        time_slot: "10:45-11:45",
        transfer_type: TransferType::PatternSharing,
        description: "{mentor} walks through the recurring patterns behind the observed tasks",
        expected_learning: &["common solution patterns", "when each pattern applies"],
        duration_minutes: 60,
    },
    SessionTemplate {
        time_slot: "13:00-15:00",
        transfer_type: TransferType::CoExecution,
        description: "Execute tasks jointly with {mentor}, alternating who drives",
        expected_learning: &["hands-on execution", "real-time correction"],
        duration_minutes: 120,
    },
    SessionTemplate {
        time_slot: "15:15-15:45",
        transfer_type: TransferType::Feedback,
        description: "Review the day's co-executed work with {mentor}",
        expected_learning: &["strengths to keep", "gaps to close tomorrow"],
        duration_minutes: 30,
    },
];

const CAPABILITY_SESSIONS: &[SessionTemplate] = &[
    SessionTemplate {
        time_slot: "09:00-11:00",
        transfer_type: TransferType::IndependentPractice,
        description: "Work through graded tasks alone while {mentor} is on call",
        expected_learning: &["self-directed execution", "judgement under uncertainty"],
        duration_minutes: 120,
    },
    SessionTemplate {
        time_slot: "11:15-12:15",
        transfer_type: TransferType::ErrorAnalysis,
        description: "Dissect the morning's failures with {mentor} down to root causes",
        expected_learning: &["failure modes", "root-cause analysis", "prevention habits"],
        duration_minutes: 60,
    },
    SessionTemplate {
        time_slot: "13:30-15:00",
        transfer_type: TransferType::IndependentPractice,
        description: "Repeat the failed task types without assistance",
        expected_learning: &["applying corrections", "consistency"],
        duration_minutes: 90,
    },
    SessionTemplate {
        time_slot: "15:15-15:45",
        transfer_type: TransferType::Feedback,
        description: "{mentor} scores the day's independent work",
        expected_learning: &["calibrated self-assessment"],
        duration_minutes: 30,
    },
    SessionTemplate {
        time_slot: "16:00-16:30",
        transfer_type: TransferType::Reflection,
        description: "Write down what changed in approach since the first day",
        expected_learning: &["consolidated mental model"],
        duration_minutes: 30,
    },
];

const MASTERY_SESSIONS: &[SessionTemplate] = &[
    SessionTemplate {
        time_slot: "09:00-11:00",
        transfer_type: TransferType::IndependentPractice,
        description: "Handle the most complex task class of the target level alone",
        expected_learning: &["complex task handling", "edge-case awareness"],
        duration_minutes: 120,
    },
    SessionTemplate {
        time_slot: "11:15-12:15",
        transfer_type: TransferType::Teaching,
        description: "Teach the core patterns back to {mentor} as if to a new mentee",
        expected_learning: &["articulated understanding", "gap discovery through teaching"],
        duration_minutes: 60,
    },
    SessionTemplate {
        time_slot: "13:30-15:00",
        transfer_type: TransferType::Assessment,
        description: "Formal assessment at the target level, graded by {mentor}",
        expected_learning: &["verified target-level proficiency"],
        duration_minutes: 90,
    },
    SessionTemplate {
        time_slot: "15:15-15:45",
        transfer_type: TransferType::Reflection,
        description: "Review the whole program and set goals for the next level",
        expected_learning: &["growth plan", "retained lessons"],
        duration_minutes: 30,
    },
];

/// Build the accelerated plan taking `mentee` from its current level to the
/// next one under `mentor`.
pub fn build_curriculum(mentee: &AgentProfile, mentor: &AgentProfile) -> TrainingPlan {
    let from_level = mentee.current_level;
    let to_level = from_level.saturating_add(1);
    let mentor_id = &mentor.agent_id;

    let render = |templates: &[SessionTemplate]| -> Vec<TrainingSession> {
        templates.iter().map(|t| t.render(mentor_id)).collect()
    };

    let stages = vec![
        TrainingStage {
            kind: StageKind::Foundation,
            name: StageKind::Foundation.label().to_string(),
            goal: format!("Understand how level-{to_level} work is done by watching and pairing"),
            sessions: render(FOUNDATION_SESSIONS),
            milestones: vec![
                "Observe at least 5 complete tasks".to_string(),
                "Co-execute at least 3 tasks".to_string(),
                "Document at least 5 recurring patterns".to_string(),
            ],
        },
        TrainingStage {
            kind: StageKind::Capability,
            name: StageKind::Capability.label().to_string(),
            goal: format!("Perform level-{to_level} tasks independently with a shrinking error rate"),
            sessions: render(CAPABILITY_SESSIONS),
            milestones: vec![
                "Complete at least 10 tasks independently".to_string(),
                "Reach a 70% task success rate".to_string(),
                "Analyse at least 3 errors to root cause".to_string(),
            ],
        },
        TrainingStage {
            kind: StageKind::Mastery,
            name: StageKind::Mastery.label().to_string(),
            goal: format!("Demonstrate level-{to_level} proficiency and pass it on"),
            sessions: render(MASTERY_SESSIONS),
            milestones: vec![
                "Reach a 90% task success rate".to_string(),
                "Teach at least 2 patterns back to the mentor".to_string(),
                format!("Pass the level-{to_level} assessment"),
                "Participate in at least 3 knowledge-sharing sessions".to_string(),
            ],
        },
    ];

    tracing::info!(
        mentor = %mentor.agent_id,
        mentee = %mentee.agent_id,
        from_level,
        to_level,
        "training plan generated"
    );

    TrainingPlan {
        mentor_id: mentor.agent_id.clone(),
        mentee_id: mentee.agent_id.clone(),
        from_level,
        to_level,
        stages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tutelage_test_utils::AgentBuilder;

    fn plan() -> TrainingPlan {
        let mentor = AgentBuilder::new("sage", 5).build();
        let mentee = AgentBuilder::new("novice", 3).build();
        build_curriculum(&mentee, &mentor)
    }

    #[test]
    fn plan_has_three_ordered_stages() {
        let plan = plan();
        let kinds: Vec<StageKind> = plan.stages.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StageKind::Foundation, StageKind::Capability, StageKind::Mastery]
        );
        assert_eq!(plan.stages[0].name, "Foundation");
    }

    #[test]
    fn plan_targets_next_level() {
        let plan = plan();
        assert_eq!(plan.from_level, 3);
        assert_eq!(plan.to_level, 4);
        assert_eq!(plan.mentor_id.as_str(), "sage");
        assert_eq!(plan.mentee_id.as_str(), "novice");
        assert!(plan.stages[2]
            .milestones
            .iter()
            .any(|m| m == "Pass the level-4 assessment"));
    }

    #[test]
    fn every_stage_has_sessions_and_milestones() {
        for stage in plan().stages {
            assert!(!stage.sessions.is_empty(), "{} has no sessions", stage.name);
            assert!(!stage.milestones.is_empty(), "{} has no milestones", stage.name);
            assert!(!stage.goal.is_empty());
            for session in &stage.sessions {
                assert!(session.duration_minutes > 0);
                assert!(!session.expected_learning.is_empty());
            }
        }
    }

    #[test]
    fn plan_covers_every_transfer_type() {
        let used: HashSet<TransferType> = plan().sessions().map(|s| s.transfer_type).collect();
        for t in TransferType::ALL {
            assert!(used.contains(&t), "{t} is never scheduled");
        }
    }

    #[test]
    fn mentor_name_is_substituted() {
        let plan = plan();
        let first = &plan.stages[0].sessions[0];
        assert_eq!(first.transfer_type, TransferType::Observation);
        assert!(first.description.contains("sage"));
        assert!(plan.sessions().all(|s| !s.description.contains("{mentor}")));
    }

    #[test]
    fn durations_add_up() {
        let plan = plan();
        let by_stage: u32 = plan.stages.iter().map(|s| s.duration_minutes()).sum();
        assert_eq!(plan.total_duration_minutes(), by_stage);
        assert_eq!(plan.stages[0].duration_minutes(), 300);
    }

    #[test]
    fn one_message_per_session() {
        let plan = plan();
        let messages = plan.session_messages();
        assert_eq!(messages.len(), plan.sessions().count());
        assert!(messages
            .iter()
            .all(|m| m.from.as_str() == "sage" && m.to.as_str() == "novice"));
        assert_eq!(messages[0].content["stage"], "Foundation");
        assert_eq!(messages[0].content["session"]["transferType"], "observation");
    }

    #[test]
    fn plan_is_deterministic_apart_from_messages() {
        assert_eq!(plan(), plan());
    }
}
