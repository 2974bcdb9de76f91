//! Composite readiness score.
//!
//! Three independently capped penalties are subtracted from 100: surge score
//! (at most 40), bed occupancy above 70% (at most 30) and high-risk
//! departments (at most 20).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::Breakpoints;
use crate::metrics::normalize::non_negative;
use crate::metrics::TodayMetrics;

pub const MAX_SURGE_PENALTY: f64 = 40.0;
pub const MAX_BED_PENALTY: f64 = 30.0;
pub const MAX_DEPT_PENALTY: f64 = 20.0;
/// Occupancy at or below this level does not penalize.
pub const BED_COMFORT_PCT: f64 = 70.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Low,
    Medium,
    High,
}

impl Display for ReadinessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

pub const READINESS_BREAKPOINTS: Breakpoints<ReadinessLevel> = Breakpoints::new(
    ReadinessLevel::Low,
    &[(45.0, ReadinessLevel::Medium), (75.0, ReadinessLevel::High)],
);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadinessScore {
    pub score: u8,
    pub level: ReadinessLevel,
}

pub fn compose_readiness(today: &TodayMetrics, high_risk_dept_count: usize) -> ReadinessScore {
    let surge_penalty = (non_negative(today.surge_score) * 0.4).min(MAX_SURGE_PENALTY);
    let bed_penalty = non_negative(today.bed_occupancy_pct - BED_COMFORT_PCT).min(MAX_BED_PENALTY);
    let dept_penalty = (high_risk_dept_count.saturating_mul(5) as f64).min(MAX_DEPT_PENALTY);

    let raw = 100.0 - surge_penalty - bed_penalty - dept_penalty;
    let score = raw.round().clamp(0.0, 100.0) as u8;
    let level = READINESS_BREAKPOINTS.classify(f64::from(score));
    debug!(
        surge_penalty,
        bed_penalty, dept_penalty, score, "composed readiness score"
    );
    ReadinessScore { score, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today(surge_score: f64, bed_occupancy_pct: f64) -> TodayMetrics {
        TodayMetrics {
            surge_score,
            bed_occupancy_pct,
            aqi: 0,
        }
    }

    #[test]
    fn calm_day_scores_full_marks() {
        let readiness = compose_readiness(&today(0.0, 50.0), 0);
        assert_eq!(readiness.score, 100);
        assert_eq!(readiness.level, ReadinessLevel::High);
    }

    #[test]
    fn extreme_inputs_bottom_out_at_combined_caps() {
        let readiness = compose_readiness(&today(1_000.0, 100.0), 100);
        assert_eq!(readiness.score, 10);
        assert_eq!(readiness.level, ReadinessLevel::Low);

        let readiness = compose_readiness(&today(f64::MAX, f64::MAX), usize::MAX);
        assert_eq!(readiness.score, 10);
    }

    #[test]
    fn occupancy_at_comfort_level_is_free() {
        let at_69 = compose_readiness(&today(10.0, 69.0), 1);
        let at_70 = compose_readiness(&today(10.0, 70.0), 1);
        let at_71 = compose_readiness(&today(10.0, 71.0), 1);
        assert_eq!(at_69, at_70);
        assert_eq!(at_71.score, at_70.score - 1);
    }

    #[test]
    fn penalties_are_capped_independently() {
        // surge 40 + beds 30 + depts 20
        let readiness = compose_readiness(&today(500.0, 100.0), 9);
        assert_eq!(readiness.score, 10);
        // 100 - 12 - 15 - 10 = 63
        let readiness = compose_readiness(&today(30.0, 85.0), 2);
        assert_eq!(readiness.score, 63);
        assert_eq!(readiness.level, ReadinessLevel::Medium);
    }

    #[test]
    fn below_baseline_surge_is_not_a_bonus() {
        let readiness = compose_readiness(&today(-50.0, 60.0), 0);
        assert_eq!(readiness.score, 100);
    }

    #[test]
    fn level_breakpoints() {
        // 100 - 22 = 78; 100 - 26 = 74; 100 - 55 = 45; 100 - 56 = 44
        assert_eq!(compose_readiness(&today(55.0, 0.0), 0).level, ReadinessLevel::High);
        assert_eq!(compose_readiness(&today(65.0, 0.0), 0).level, ReadinessLevel::Medium);
        assert_eq!(compose_readiness(&today(100.0, 85.0), 0).score, 45);
        assert_eq!(compose_readiness(&today(100.0, 85.0), 0).level, ReadinessLevel::Medium);
        assert_eq!(compose_readiness(&today(100.0, 86.0), 0).level, ReadinessLevel::Low);
    }
}
