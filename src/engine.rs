//! Single pure entry point from a dashboard snapshot to every derived view.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alert::{generate_alerts, Alert};
use crate::departments::load::{count_high_risk, estimate_loads};
use crate::departments::DepartmentLoad;
use crate::forecast::insights::{summarize_window, ForecastInsights};
use crate::forecast::peak::find_peak;
use crate::forecast::{surge_risk, PeakOutlook, SurgeRiskIndicator};
use crate::metrics::normalize::normalize_metrics;
use crate::metrics::TodayMetrics;
use crate::readiness::{compose_readiness, ReadinessScore};
use crate::snapshot::DashboardSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub department_loads: Vec<DepartmentLoad>,
    /// `None` when the snapshot carries no forecast horizon.
    pub peak_outlook: Option<PeakOutlook>,
    pub readiness: ReadinessScore,
    pub alerts: Vec<Alert>,
    pub surge_risk: SurgeRiskIndicator,
    pub insights: ForecastInsights,
}

/// Today's metrics are normalized first, so every caller sees the same view
/// for the same snapshot.
pub fn evaluate(snapshot: &DashboardSnapshot) -> DashboardView {
    let today = normalized_today(snapshot);
    let department_loads = estimate_loads(&snapshot.departments);
    let high_risk = count_high_risk(&department_loads);
    let peak_outlook = find_peak(&snapshot.forecast);
    let readiness = compose_readiness(&today, high_risk);
    let alerts = generate_alerts(&today, &department_loads);

    debug!(
        high_risk,
        score = readiness.score,
        alerts = alerts.len(),
        has_peak = peak_outlook.is_some(),
        "evaluated snapshot"
    );

    DashboardView {
        department_loads,
        peak_outlook,
        readiness,
        alerts,
        surge_risk: surge_risk(&today),
        insights: summarize_window(&snapshot.forecast),
    }
}

/// Alerts only, with the same normalization as [`evaluate`].
pub fn evaluate_alerts(snapshot: &DashboardSnapshot) -> Vec<Alert> {
    let today = normalized_today(snapshot);
    generate_alerts(&today, &estimate_loads(&snapshot.departments))
}

fn normalized_today(snapshot: &DashboardSnapshot) -> TodayMetrics {
    let mut today = snapshot.today;
    normalize_metrics(&mut today);
    today
}
