//! Preparedness plans for an upcoming surge event.
//!
//! The event's peak day (within one day either side of the event date) sets
//! the baseline and projected admissions. Staffing, supply and bed
//! allocations scale from those two counts; advisories follow the event's
//! risk categories.

pub mod advisory;
pub mod plan;

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forecast::peak::find_peak;
use crate::forecast::ForecastDay;
use crate::snapshot::DashboardSnapshot;

pub use advisory::{build_advisories, Advisory, AdvisoryPlan};
pub use plan::{Allocation, BedPlan, ResourceRule, StaffingPlan, SuppliesPlan, SupplyItem};

/// Baseline admissions assumed when the snapshot does not carry one.
pub const DEFAULT_BASELINE_ADMISSIONS: f64 = 100.0;
/// AQI assumed for a peak day without an air-quality forecast.
pub const DEFAULT_PEAK_AQI: u32 = 150;
/// Baseline used when no forecast day falls inside the event window.
pub const HISTORICAL_BASELINE_ADMISSIONS: f64 = 120.0;
pub const HISTORICAL_AQI: u32 = 160;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Festival,
    Pollution,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Respiratory,
    Burns,
    Trauma,
    Cardiac,
    #[serde(other)]
    Other,
}

/// A dated event expected to drive admissions above baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurgeEvent {
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Used as the surge estimate when the forecast does not cover the event.
    pub historical_avg_surge_pct: f64,
    #[serde(default)]
    pub risk_categories: Vec<RiskCategory>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PeakBasis {
    Forecast,
    Historical,
}

impl Display for PeakBasis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Forecast => "forecast",
            Self::Historical => "historical",
        };
        f.write_str(label)
    }
}

/// Admissions at the event's peak day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeakLoad {
    pub basis: PeakBasis,
    /// `None` when the peak comes from the event's history.
    pub date: Option<NaiveDate>,
    pub surge_pct: f64,
    pub baseline_admissions: f64,
    pub total_admissions: f64,
    pub aqi: u32,
}

impl PeakLoad {
    /// Extra admissions above baseline; negative below it.
    pub fn surplus(&self) -> f64 {
        self.total_admissions - self.baseline_admissions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationPlan {
    pub event: SurgeEvent,
    pub peak: PeakLoad,
    pub staffing: StaffingPlan,
    pub supplies: SuppliesPlan,
    pub beds: BedPlan,
    pub advisories: AdvisoryPlan,
}

/// The next event on or after `today`, else the most recent past one.
pub fn active_event(events: &[SurgeEvent], today: NaiveDate) -> Option<&SurgeEvent> {
    let upcoming = events
        .iter()
        .filter(|event| event.date >= today)
        .min_by_key(|event| event.date);
    upcoming.or_else(|| events.iter().max_by_key(|event| event.date))
}

/// Peak admissions for `event` from the forecast days within one day of it.
///
/// Without covering forecast days the event's historical surge is applied to
/// [`HISTORICAL_BASELINE_ADMISSIONS`].
pub fn peak_load(
    event: &SurgeEvent,
    forecast: &[ForecastDay],
    baseline_admissions: Option<f64>,
) -> PeakLoad {
    let window = forecast
        .iter()
        .filter(|day| (day.date - event.date).num_days().abs() <= 1)
        .copied()
        .collect::<Vec<_>>();

    match find_peak(&window) {
        Some(peak) => {
            let baseline = baseline_admissions.unwrap_or(DEFAULT_BASELINE_ADMISSIONS);
            let aqi = window
                .iter()
                .find(|day| day.date == peak.date)
                .and_then(|day| day.aqi)
                .unwrap_or(DEFAULT_PEAK_AQI);
            PeakLoad {
                basis: PeakBasis::Forecast,
                date: Some(peak.date),
                surge_pct: peak.surge_pct,
                baseline_admissions: baseline,
                total_admissions: projected_total(baseline, peak.surge_pct),
                aqi,
            }
        }
        None => PeakLoad {
            basis: PeakBasis::Historical,
            date: None,
            surge_pct: event.historical_avg_surge_pct,
            baseline_admissions: HISTORICAL_BASELINE_ADMISSIONS,
            total_admissions: projected_total(
                HISTORICAL_BASELINE_ADMISSIONS,
                event.historical_avg_surge_pct,
            ),
            aqi: HISTORICAL_AQI,
        },
    }
}

fn projected_total(baseline: f64, surge_pct: f64) -> f64 {
    baseline * (1.0 + surge_pct / 100.0)
}

pub fn build_plan(event: &SurgeEvent, peak: PeakLoad) -> RecommendationPlan {
    RecommendationPlan {
        staffing: plan::staffing_plan(event, &peak),
        supplies: plan::supplies_plan(&peak),
        beds: plan::bed_plan(&peak),
        advisories: build_advisories(event, peak.aqi),
        event: event.clone(),
        peak,
    }
}

/// Plan for the snapshot's active event, or `None` when it lists no events.
pub fn recommend(snapshot: &DashboardSnapshot, as_of: NaiveDate) -> Option<RecommendationPlan> {
    let event = active_event(&snapshot.events, as_of)?;
    let peak = peak_load(event, &snapshot.forecast, snapshot.baseline_admissions);
    debug!(
        event = %event.name,
        basis = %peak.basis,
        surge_pct = peak.surge_pct,
        total = peak.total_admissions,
        "building recommendations"
    );
    Some(build_plan(event, peak))
}
