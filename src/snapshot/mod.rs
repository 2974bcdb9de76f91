pub mod source;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::departments::DepartmentRisk;
use crate::forecast::ForecastDay;
use crate::metrics::{MetricOverrides, TodayMetrics};
use crate::recommendations::{EventKind, RiskCategory, SurgeEvent};

pub use source::{SnapshotError, SnapshotSource};

/// One refresh worth of engine input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub today: TodayMetrics,
    #[serde(default)]
    pub departments: Vec<DepartmentRisk>,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
    /// Upcoming events that recommendations are planned for.
    #[serde(default)]
    pub events: Vec<SurgeEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_admissions: Option<f64>,
}

const SAMPLE_SURGE: [(f64, u32); 7] = [
    (12.0, 160),
    (18.5, 185),
    (27.0, 210),
    (41.5, 260),
    (63.0, 340),
    (63.0, 330),
    (35.0, 240),
];

impl DashboardSnapshot {
    /// Demo snapshot with a seven-day horizon starting at `start`.
    pub fn sample(start: NaiveDate) -> Self {
        let forecast = SAMPLE_SURGE
            .iter()
            .enumerate()
            .map(|(offset, (surge_pct, aqi))| ForecastDay {
                date: start + Duration::days(offset as i64),
                surge_pct: *surge_pct,
                aqi: Some(*aqi),
            })
            .collect();
        Self {
            today: TodayMetrics::sample(),
            departments: vec![
                DepartmentRisk {
                    department: "Respiratory & Pulmonology".to_string(),
                    risk_score: 0.62,
                },
                DepartmentRisk {
                    department: "ICU / HDU".to_string(),
                    risk_score: 0.37,
                },
                DepartmentRisk {
                    department: "Trauma & Emergency".to_string(),
                    risk_score: 0.28,
                },
            ],
            forecast,
            events: vec![
                SurgeEvent {
                    name: "Diwali".to_string(),
                    date: start + Duration::days(4),
                    kind: EventKind::Festival,
                    historical_avg_surge_pct: 65.0,
                    risk_categories: vec![
                        RiskCategory::Respiratory,
                        RiskCategory::Burns,
                        RiskCategory::Trauma,
                    ],
                },
                SurgeEvent {
                    name: "Winter Smog Wave".to_string(),
                    date: start + Duration::days(10),
                    kind: EventKind::Pollution,
                    historical_avg_surge_pct: 45.0,
                    risk_categories: vec![RiskCategory::Respiratory, RiskCategory::Cardiac],
                },
            ],
            baseline_admissions: Some(100.0),
        }
    }

    pub fn with_overrides(mut self, overrides: &MetricOverrides) -> Self {
        self.today.apply_overrides(overrides);
        self
    }
}
