pub mod insights;
pub mod peak;

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::Breakpoints;
use crate::metrics::normalize::non_negative;
use crate::metrics::TodayMetrics;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Negative values mean below-baseline admissions.
    pub surge_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<u32>,
}

/// The maximum-surge day of a forecast horizon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeakOutlook {
    pub date: NaiveDate,
    pub surge_pct: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SurgeRiskLevel {
    Low,
    Medium,
    High,
}

impl Display for SurgeRiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

pub const SURGE_RISK_BREAKPOINTS: Breakpoints<SurgeRiskLevel> = Breakpoints::new(
    SurgeRiskLevel::Low,
    &[(25.0, SurgeRiskLevel::Medium), (50.0, SurgeRiskLevel::High)],
);

/// Headline surge indicator for today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SurgeRiskIndicator {
    pub level: SurgeRiskLevel,
    /// Surge score floored at zero, one decimal place.
    pub score: f64,
}

pub fn surge_risk(today: &TodayMetrics) -> SurgeRiskIndicator {
    let score = (non_negative(today.surge_score) * 10.0).round() / 10.0;
    SurgeRiskIndicator {
        level: SURGE_RISK_BREAKPOINTS.classify(today.surge_score),
        score,
    }
}

pub fn risk_level(day: &ForecastDay) -> SurgeRiskLevel {
    SURGE_RISK_BREAKPOINTS.classify(day.surge_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_floors_negative_surge() {
        let indicator = surge_risk(&TodayMetrics {
            surge_score: -8.0,
            bed_occupancy_pct: 60.0,
            aqi: 40,
        });
        assert_eq!(indicator.level, SurgeRiskLevel::Low);
        assert_eq!(indicator.score, 0.0);
    }

    #[test]
    fn indicator_rounds_to_one_decimal() {
        let indicator = surge_risk(&TodayMetrics {
            surge_score: 52.345,
            bed_occupancy_pct: 90.0,
            aqi: 40,
        });
        assert_eq!(indicator.level, SurgeRiskLevel::High);
        assert!((indicator.score - 52.3).abs() < 1e-9);
    }

    #[test]
    fn day_risk_uses_surge_breakpoints() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date");
        let day = |surge_pct| ForecastDay {
            date,
            surge_pct,
            aqi: None,
        };
        assert_eq!(risk_level(&day(24.9)), SurgeRiskLevel::Low);
        assert_eq!(risk_level(&day(25.0)), SurgeRiskLevel::Medium);
        assert_eq!(risk_level(&day(50.0)), SurgeRiskLevel::High);
    }
}
