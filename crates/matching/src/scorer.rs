//! Weighted pairing scores.

use serde::{Deserialize, Serialize};
use tutelage_core::{AgentId, AgentProfile, CurriculumCatalogue, Score, STRONG_SKILL_THRESHOLD};
use tutelage_state::MatchingSettings;

use crate::score::{
    default_availability, historical_success_rate, skill_gap_score, specialization_match,
};

/// Weights for the pairing components. They sum to 1.0.
const SKILL_GAP_WEIGHT: f64 = 0.4;
const AVAILABILITY_WEIGHT: f64 = 0.3;
const SPECIALIZATION_WEIGHT: f64 = 0.2;
const HISTORICAL_SUCCESS_WEIGHT: f64 = 0.1;

/// Component scores behind a pairing score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingBreakdown {
    pub skill_gap: Score,
    pub availability: Score,
    pub specialization: Score,
    pub historical_success: Score,
}

impl PairingBreakdown {
    /// Weighted combination of the components, clamped to [0, 1].
    pub fn total(&self) -> Score {
        Score::new(
            SKILL_GAP_WEIGHT * self.skill_gap.value()
                + AVAILABILITY_WEIGHT * self.availability.value()
                + SPECIALIZATION_WEIGHT * self.specialization.value()
                + HISTORICAL_SUCCESS_WEIGHT * self.historical_success.value(),
        )
    }
}

/// Compatibility of one mentor with a mentee. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingScore {
    pub mentor_id: AgentId,
    pub score: Score,
    pub breakdown: PairingBreakdown,
}

/// Trait for scoring a mentor against a mentee.
pub trait Scorer {
    fn score(&self, mentor: &AgentProfile, mentee: &AgentProfile) -> PairingScore;
}

/// Default scorer combining the four component scores.
#[derive(Debug, Clone)]
pub struct PairingScorer<'a> {
    curriculum: &'a CurriculumCatalogue,
    strong_skill_threshold: f64,
}

impl<'a> PairingScorer<'a> {
    pub fn new(curriculum: &'a CurriculumCatalogue) -> Self {
        Self {
            curriculum,
            strong_skill_threshold: STRONG_SKILL_THRESHOLD,
        }
    }

    /// Take the strong-skill threshold from loaded settings.
    pub fn with_settings(mut self, settings: &MatchingSettings) -> Self {
        self.strong_skill_threshold = settings.strong_skill_threshold;
        self
    }

    /// Compute the component scores without combining them.
    pub fn breakdown(&self, mentor: &AgentProfile, mentee: &AgentProfile) -> PairingBreakdown {
        let strong = mentor.strong_skills(self.strong_skill_threshold);
        let target = self
            .curriculum
            .skills_for(mentee.current_level.saturating_add(1));

        PairingBreakdown {
            skill_gap: Score::new(skill_gap_score(mentor.current_level, mentee.current_level)),
            availability: Score::new(default_availability(mentor.mentee_count())),
            specialization: Score::new(specialization_match(&strong, &target)),
            historical_success: Score::new(historical_success_rate(&mentor.mentor_stats)),
        }
    }
}

impl Scorer for PairingScorer<'_> {
    fn score(&self, mentor: &AgentProfile, mentee: &AgentProfile) -> PairingScore {
        let breakdown = self.breakdown(mentor, mentee);
        PairingScore {
            mentor_id: mentor.agent_id.clone(),
            score: breakdown.total(),
            breakdown,
        }
    }
}

/// Combined compatibility of `mentor` with `mentee` in [0, 1].
pub fn pairing_score(
    mentor: &AgentProfile,
    mentee: &AgentProfile,
    curriculum: &CurriculumCatalogue,
) -> f64 {
    PairingScorer::new(curriculum)
        .score(mentor, mentee)
        .score
        .value()
}
