//! Filter, score and rank mentors for a mentee.
//!
//! Decisions are made against a snapshot. Two concurrent requests may pick
//! the same mentor; the caller resolves that at commit time with
//! [`crate::commit_pairing`].

use serde::{Deserialize, Serialize};
use tutelage_core::{AgentId, AgentProfile, CurriculumCatalogue, Score};
use tutelage_state::MatchingSettings;

use crate::filter::eligible_mentors;
use crate::scorer::{PairingBreakdown, PairingScorer, Scorer};

/// The pairing the caller should persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingDecision {
    pub mentor_id: AgentId,
    pub mentee_id: AgentId,
}

/// A ranked, explained candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch<'a> {
    pub mentor: &'a AgentProfile,
    pub score: Score,
    pub breakdown: PairingBreakdown,
}

/// Matcher over a pluggable [`Scorer`].
#[derive(Debug, Clone)]
pub struct Matcher<S> {
    scorer: S,
    top_candidates: usize,
}

impl<'c> Matcher<PairingScorer<'c>> {
    /// Matcher using the default weighted scorer.
    pub fn new(curriculum: &'c CurriculumCatalogue) -> Self {
        Self::with_scorer(PairingScorer::new(curriculum))
    }

    /// Matcher using loaded settings for the scorer and list length.
    pub fn from_settings(curriculum: &'c CurriculumCatalogue, settings: &MatchingSettings) -> Self {
        Self {
            scorer: PairingScorer::new(curriculum).with_settings(settings),
            top_candidates: settings.top_candidates.max(1),
        }
    }
}

impl<S: Scorer> Matcher<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            top_candidates: MatchingSettings::default().top_candidates,
        }
    }

    /// Highest-scoring eligible mentor, or `None` when nobody qualifies.
    ///
    /// Ties go to the mentor seen first in `roster`.
    pub fn best_mentor<'a>(
        &self,
        mentee: &'a AgentProfile,
        roster: &'a [AgentProfile],
    ) -> Option<&'a AgentProfile> {
        let mut best: Option<(&AgentProfile, Score)> = None;
        for mentor in eligible_mentors(mentee, roster) {
            let scored = self.scorer.score(mentor, mentee);
            tracing::debug!(
                mentee = %mentee.agent_id,
                mentor = %mentor.agent_id,
                score = %scored.score,
                "scored mentor candidate"
            );
            match best {
                Some((_, top)) if scored.score <= top => {}
                _ => best = Some((mentor, scored.score)),
            }
        }
        if best.is_none() {
            tracing::debug!(mentee = %mentee.agent_id, "no eligible mentor in roster");
        }
        best.map(|(mentor, _)| mentor)
    }

    /// Top `n` eligible mentors, best first, with their score breakdowns.
    ///
    /// Equal scores keep roster order.
    pub fn top_candidates<'a>(
        &self,
        mentee: &'a AgentProfile,
        roster: &'a [AgentProfile],
        n: usize,
    ) -> Vec<CandidateMatch<'a>> {
        let mut ranked: Vec<CandidateMatch<'a>> = eligible_mentors(mentee, roster)
            .map(|mentor| {
                let scored = self.scorer.score(mentor, mentee);
                CandidateMatch {
                    mentor,
                    score: scored.score,
                    breakdown: scored.breakdown,
                }
            })
            .collect();

        // Stable sort keeps roster order among ties.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// Ranked list using the configured default length.
    pub fn ranked<'a>(
        &self,
        mentee: &'a AgentProfile,
        roster: &'a [AgentProfile],
    ) -> Vec<CandidateMatch<'a>> {
        self.top_candidates(mentee, roster, self.top_candidates)
    }

    /// Pairing decision for `mentee`, if any mentor qualifies.
    pub fn decide(&self, mentee: &AgentProfile, roster: &[AgentProfile]) -> Option<PairingDecision> {
        self.best_mentor(mentee, roster).map(|mentor| PairingDecision {
            mentor_id: mentor.agent_id.clone(),
            mentee_id: mentee.agent_id.clone(),
        })
    }
}

/// Highest-scoring eligible mentor for `mentee` using the default scorer.
pub fn find_best_mentor<'a>(
    mentee: &'a AgentProfile,
    roster: &'a [AgentProfile],
    curriculum: &CurriculumCatalogue,
) -> Option<&'a AgentProfile> {
    Matcher::new(curriculum).best_mentor(mentee, roster)
}

/// Top `n` eligible mentors for `mentee` using the default scorer.
pub fn find_top_candidates<'a>(
    mentee: &'a AgentProfile,
    roster: &'a [AgentProfile],
    curriculum: &CurriculumCatalogue,
    n: usize,
) -> Vec<CandidateMatch<'a>> {
    Matcher::new(curriculum).top_candidates(mentee, roster, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::PairingScore;
    use tutelage_test_utils::{catalogue, exemplary_mentor, AgentBuilder};

    fn roster() -> Vec<AgentProfile> {
        vec![
            // gap 1: ineligible
            AgentBuilder::new("too-close", 4).build(),
            // full: ineligible
            AgentBuilder::new("full", 5).mentees(3).stats(10, 10, 1.0).build(),
            // gap 5, busy
            AgentBuilder::new("distant", 8).mentees(2).build(),
            exemplary_mentor(),
            // gap 3, free, cold start
            AgentBuilder::new("fresh", 6).build(),
        ]
    }

    #[test]
    fn picks_highest_scoring_eligible_mentor() {
        let mentee = AgentBuilder::new("e", 3).build();
        let curriculum = catalogue(&[(4, &["x", "z"])]);
        let roster = roster();
        let best = find_best_mentor(&mentee, &roster, &curriculum).unwrap();
        assert_eq!(best.agent_id.as_str(), "mentor-exemplary");
    }

    #[test]
    fn returns_none_without_eligible_mentor() {
        let mentee = AgentBuilder::new("e", 3).build();
        let curriculum = catalogue(&[]);
        let roster = vec![
            AgentBuilder::new("peer", 3).build(),
            AgentBuilder::new("full", 7).mentees(3).build(),
        ];
        assert!(find_best_mentor(&mentee, &roster, &curriculum).is_none());
        assert!(find_best_mentor(&mentee, &[], &curriculum).is_none());
        assert!(find_top_candidates(&mentee, &roster, &curriculum, 3).is_empty());
    }

    #[test]
    fn ties_go_to_first_seen() {
        let mentee = AgentBuilder::new("e", 0).build();
        let curriculum = catalogue(&[]);
        let roster = vec![
            AgentBuilder::new("first", 2).build(),
            AgentBuilder::new("second", 2).build(),
        ];
        let best = find_best_mentor(&mentee, &roster, &curriculum).unwrap();
        assert_eq!(best.agent_id.as_str(), "first");

        let ranked = find_top_candidates(&mentee, &roster, &curriculum, 2);
        assert_eq!(ranked[0].mentor.agent_id.as_str(), "first");
        assert_eq!(ranked[1].mentor.agent_id.as_str(), "second");
    }

    #[test]
    fn top_candidates_sorted_and_truncated() {
        let mentee = AgentBuilder::new("e", 3).build();
        let curriculum = catalogue(&[(4, &["x", "z"])]);
        let roster = roster();
        let ranked = find_top_candidates(&mentee, &roster, &curriculum, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].mentor.agent_id.as_str(), "mentor-exemplary");
        assert!(ranked[0].score >= ranked[1].score);
        assert_eq!(ranked[0].score, ranked[0].breakdown.total());

        let all = find_top_candidates(&mentee, &roster, &curriculum, 10);
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn decide_returns_ids() {
        let mentee = AgentBuilder::new("e", 3).build();
        let curriculum = catalogue(&[(4, &["x"])]);
        let roster = roster();
        let decision = Matcher::new(&curriculum).decide(&mentee, &roster).unwrap();
        assert_eq!(decision.mentor_id.as_str(), "mentor-exemplary");
        assert_eq!(decision.mentee_id.as_str(), "e");
    }

    #[test]
    fn ranked_uses_configured_length() {
        let mentee = AgentBuilder::new("e", 3).build();
        let curriculum = catalogue(&[]);
        let roster = roster();
        let settings = MatchingSettings {
            top_candidates: 1,
            ..MatchingSettings::default()
        };
        let ranked = Matcher::from_settings(&curriculum, &settings).ranked(&mentee, &roster);
        assert_eq!(ranked.len(), 1);
    }

    struct LevelScorer;

    impl Scorer for LevelScorer {
        fn score(&self, mentor: &AgentProfile, _mentee: &AgentProfile) -> PairingScore {
            PairingScore {
                mentor_id: mentor.agent_id.clone(),
                score: Score::new(f64::from(mentor.current_level) / 10.0),
                breakdown: PairingBreakdown::default(),
            }
        }
    }

    #[test]
    fn custom_scorer_still_respects_filter() {
        let mentee = AgentBuilder::new("e", 3).build();
        let roster = roster();
        let best = Matcher::with_scorer(LevelScorer)
            .best_mentor(&mentee, &roster)
            .unwrap();
        // "full" is level 5 and "distant" level 8; only eligible ones count
        assert_eq!(best.agent_id.as_str(), "distant");
    }
}
