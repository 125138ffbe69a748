//! Mentor-pool workload statistics for capacity planning.

use serde::{Deserialize, Serialize};
use tutelage_core::{AgentProfile, MAX_MENTEES};

/// Agents at or above this level count as potential mentors.
pub const MENTOR_ELIGIBLE_LEVEL: u32 = 3;

/// How many mentors carry 0, 1, 2 and 3 mentees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadDistribution {
    pub idle: usize,
    pub light: usize,
    pub moderate: usize,
    pub full: usize,
}

/// Pool-wide mentoring load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadStats {
    pub total_mentors: usize,
    pub total_mentees: usize,
    pub average_mentees: f64,
    pub max_mentees: usize,
    pub min_mentees: usize,
    pub utilization_rate: f64,
    pub distribution: WorkloadDistribution,
}

impl WorkloadStats {
    /// Free mentee slots across the pool.
    pub fn available_slots(&self) -> usize {
        (self.total_mentors * MAX_MENTEES).saturating_sub(self.total_mentees)
    }
}

/// Aggregate mentee counts over every mentor-eligible agent in `roster`.
///
/// An empty pool yields all-zero statistics.
pub fn mentor_workload(roster: &[AgentProfile]) -> WorkloadStats {
    let counts: Vec<usize> = roster
        .iter()
        .filter(|agent| agent.current_level >= MENTOR_ELIGIBLE_LEVEL)
        .map(AgentProfile::mentee_count)
        .collect();

    if counts.is_empty() {
        return WorkloadStats::default();
    }

    let mut distribution = WorkloadDistribution::default();
    for &count in &counts {
        match count {
            0 => distribution.idle += 1,
            1 => distribution.light += 1,
            2 => distribution.moderate += 1,
            _ => distribution.full += 1,
        }
    }

    let total_mentors = counts.len();
    let total_mentees: usize = counts.iter().sum();

    WorkloadStats {
        total_mentors,
        total_mentees,
        average_mentees: total_mentees as f64 / total_mentors as f64,
        max_mentees: counts.iter().copied().max().unwrap_or(0),
        min_mentees: counts.iter().copied().min().unwrap_or(0),
        utilization_rate: total_mentees as f64 / (total_mentors * MAX_MENTEES) as f64,
        distribution,
    }
}
