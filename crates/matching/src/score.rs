//! Component scores for a (mentor, mentee) pair.
//!
//! Every function returns a value in [0.0, 1.0] and guards its own
//! denominators, so no NaN or infinity can reach the combined score.

use std::collections::BTreeSet;

use tutelage_core::{MentorStats, Score, MAX_MENTEES, MIN_LEVEL_GAP};

/// Score for mentors with no history to judge by.
const COLD_START_SUCCESS: f64 = 0.5;
/// Score when either skill set is empty.
const NEUTRAL_SPECIALIZATION: f64 = 0.5;
/// Bonus for mentors whose mentees graduate quickly.
const FAST_TRAINING_BONUS: f64 = 0.1;
const FAST_TRAINING_DAYS: f64 = 4.0;

/// Suitability of the level gap between mentor and mentee.
///
/// Deliberately a step function: a gap of exactly two is ideal, wider gaps
/// degrade in bands, and anything under [`MIN_LEVEL_GAP`] is ineligible.
///
/// | gap  | score |
/// |------|-------|
/// | < 2  | 0.0   |
/// | 2    | 1.0   |
/// | 3    | 0.9   |
/// | 4    | 0.7   |
/// | ≥ 5  | 0.5   |
pub fn skill_gap_score(mentor_level: u32, mentee_level: u32) -> f64 {
    let gap = i64::from(mentor_level) - i64::from(mentee_level);
    match gap {
        g if g < i64::from(MIN_LEVEL_GAP) => 0.0,
        2 => 1.0,
        3 => 0.9,
        4 => 0.7,
        _ => 0.5,
    }
}

/// Fraction of mentee slots still free.
pub fn availability_score(current_mentees: usize, max_mentees: usize) -> f64 {
    if max_mentees == 0 || current_mentees >= max_mentees {
        return 0.0;
    }
    (max_mentees - current_mentees) as f64 / max_mentees as f64
}

/// Availability against the standard capacity of [`MAX_MENTEES`].
pub(crate) fn default_availability(current_mentees: usize) -> f64 {
    availability_score(current_mentees, MAX_MENTEES)
}

/// Jaccard similarity between a mentor's strong skills and the skills
/// required at the mentee's next level.
///
/// Returns 0.5 when either set is empty: missing data is treated as neutral
/// rather than as a mismatch.
pub fn specialization_match<T: Ord>(mentor_strong: &BTreeSet<T>, target: &BTreeSet<T>) -> f64 {
    if mentor_strong.is_empty() || target.is_empty() {
        return NEUTRAL_SPECIALIZATION;
    }
    let intersection = mentor_strong.intersection(target).count();
    let union = mentor_strong.union(target).count();
    intersection as f64 / union as f64
}

/// Share of past mentees who graduated, with a bonus for fast training.
///
/// The bonus needs a recorded average training time.
///
/// New mentors (no mentees yet) get 0.5 so they are not starved of matches.
pub fn historical_success_rate(stats: &MentorStats) -> f64 {
    if stats.total_mentees == 0 {
        return COLD_START_SUCCESS;
    }
    let mut rate = f64::from(stats.graduated_mentees) / f64::from(stats.total_mentees);
    if stats
        .average_training_time_days
        .is_some_and(|days| days <= FAST_TRAINING_DAYS)
    {
        rate += FAST_TRAINING_BONUS;
    }
    Score::new(rate).value()
}
