//! Hard eligibility constraints applied before scoring.

use tutelage_core::{AgentProfile, MIN_LEVEL_GAP};

/// Whether `mentor` may be considered for `mentee` at all.
///
/// The mentor must be at least [`MIN_LEVEL_GAP`] levels above the mentee,
/// have a free mentee slot, and be a different agent.
pub fn is_eligible(mentor: &AgentProfile, mentee: &AgentProfile) -> bool {
    level_gap(mentor, mentee) >= i64::from(MIN_LEVEL_GAP)
        && mentor.has_capacity()
        && mentor.agent_id != mentee.agent_id
}

/// Signed level difference between mentor and mentee.
pub(crate) fn level_gap(mentor: &AgentProfile, mentee: &AgentProfile) -> i64 {
    i64::from(mentor.current_level) - i64::from(mentee.current_level)
}

/// Eligible mentors for `mentee`, in roster order.
pub fn eligible_mentors<'a>(
    mentee: &'a AgentProfile,
    roster: &'a [AgentProfile],
) -> impl Iterator<Item = &'a AgentProfile> + 'a {
    roster.iter().filter(move |mentor| is_eligible(mentor, mentee))
}
