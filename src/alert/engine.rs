use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alert::rules::{
    AlertId, AlertSignal, Severity, TieredRule, AQI_RULE, BEDS_RULE, RESPIRATORY_MARKER,
    SURGE_RULE,
};
use crate::departments::{DepartmentLoad, LoadStatus};
use crate::metrics::TodayMetrics;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
}

/// Evaluates the alert rules in fixed order.
///
/// Each signal contributes at most one alert, so ids never repeat. An empty
/// result is replaced by a single `all-good` info alert.
pub fn generate_alerts(today: &TodayMetrics, loads: &[DepartmentLoad]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for signal in AlertSignal::ORDERED {
        let alert = match signal {
            AlertSignal::SurgeScore => surge_alert(today),
            AlertSignal::Aqi => aqi_alert(today),
            AlertSignal::BedOccupancy => beds_alert(today),
            AlertSignal::RespiratoryDepartment => respiratory_alert(loads),
        };
        alerts.extend(alert);
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            id: AlertId::AllGood,
            message: "All indicators within normal range. No immediate action required."
                .to_string(),
            severity: Severity::Info,
        });
    }

    debug!(count = alerts.len(), "generated alerts");
    alerts
}

fn tiered_alert(
    rule: &TieredRule,
    value: f64,
    message: impl FnOnce(Severity) -> String,
) -> Option<Alert> {
    let (id, severity) = rule.tier(value)?;
    Some(Alert {
        id,
        message: message(severity),
        severity,
    })
}

fn surge_alert(today: &TodayMetrics) -> Option<Alert> {
    let surge = today.surge_score;
    tiered_alert(&SURGE_RULE, surge, |severity| match severity {
        Severity::Critical => format!(
            "Critical surge risk: admissions projected {surge:.1}% above baseline. Activate surge staffing and open overflow beds."
        ),
        _ => format!(
            "Elevated surge risk: admissions projected {surge:.1}% above baseline. Review staffing rosters for the next shift."
        ),
    })
}

fn aqi_alert(today: &TodayMetrics) -> Option<Alert> {
    let aqi = today.aqi;
    tiered_alert(&AQI_RULE, f64::from(aqi), |severity| match severity {
        Severity::Critical => format!(
            "Hazardous air quality (AQI {aqi}). Expect a sharp rise in respiratory and cardiac presentations."
        ),
        _ => format!("Poor air quality (AQI {aqi}). Prepare respiratory units for increased load."),
    })
}

fn beds_alert(today: &TodayMetrics) -> Option<Alert> {
    let beds = today.bed_occupancy_pct;
    tiered_alert(&BEDS_RULE, beds, |severity| match severity {
        Severity::Critical => format!(
            "Bed occupancy at {beds:.0}%. Critical-ward capacity nearly exhausted; trigger the escalation plan."
        ),
        _ => format!(
            "Bed occupancy at {beds:.0}%. Expedite safe discharges and prepare step-down capacity."
        ),
    })
}

/// Checks only the first respiratory department, whatever its status.
fn respiratory_alert(loads: &[DepartmentLoad]) -> Option<Alert> {
    let load = loads.iter().find(|load| is_respiratory(&load.department))?;
    if !load.status.is_elevated() {
        return None;
    }
    let severity = if load.status == LoadStatus::Critical {
        Severity::Critical
    } else {
        Severity::Warning
    };
    Some(Alert {
        id: AlertId::RespDept,
        message: format!(
            "{} projected at {}% load ({}). Reinforce respiratory staffing and oxygen supply.",
            load.department, load.load_pct, load.status
        ),
        severity,
    })
}

fn is_respiratory(department: &str) -> bool {
    department.to_lowercase().contains(RESPIRATORY_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today(surge_score: f64, aqi: u32, bed_occupancy_pct: f64) -> TodayMetrics {
        TodayMetrics {
            surge_score,
            bed_occupancy_pct,
            aqi,
        }
    }

    fn load(department: &str, load_pct: u8, status: LoadStatus) -> DepartmentLoad {
        DepartmentLoad {
            department: department.to_string(),
            load_pct,
            status,
        }
    }

    fn ids(alerts: &[Alert]) -> Vec<AlertId> {
        alerts.iter().map(|a| a.id).collect()
    }

    #[test]
    fn quiet_day_falls_back_to_all_good() {
        let alerts = generate_alerts(
            &today(0.0, 0, 0.0),
            &[load("Respiratory & Pulmonology", 55, LoadStatus::Low)],
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, AlertId::AllGood);
        assert_eq!(alerts[0].severity, Severity::Info);
    }

    #[test]
    fn co_occurring_signals_keep_rule_order() {
        let alerts = generate_alerts(&today(35.0, 310, 95.0), &[]);
        assert_eq!(
            ids(&alerts),
            vec![AlertId::SurgeHigh, AlertId::AqiCritical, AlertId::BedsCritical]
        );
        assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
    }

    #[test]
    fn warning_tiers_fire_below_critical() {
        let alerts = generate_alerts(&today(15.0, 200, 80.0), &[]);
        assert_eq!(
            ids(&alerts),
            vec![AlertId::SurgeMedium, AlertId::AqiBad, AlertId::BedsHigh]
        );
        assert!(alerts.iter().all(|a| a.severity == Severity::Warning));
    }

    #[test]
    fn output_is_not_sorted_by_severity() {
        let alerts = generate_alerts(&today(16.0, 350, 10.0), &[]);
        assert_eq!(ids(&alerts), vec![AlertId::SurgeMedium, AlertId::AqiCritical]);
    }

    #[test]
    fn respiratory_match_is_case_insensitive_substring() {
        let high = generate_alerts(
            &today(0.0, 0, 0.0),
            &[
                load("Trauma & Emergency", 95, LoadStatus::Critical),
                load("Respiratory / ICU", 80, LoadStatus::High),
            ],
        );
        assert_eq!(ids(&high), vec![AlertId::RespDept]);
        assert_eq!(high[0].severity, Severity::Warning);

        let critical = generate_alerts(
            &today(0.0, 0, 0.0),
            &[load("Respiratory / ICU", 92, LoadStatus::Critical)],
        );
        assert_eq!(ids(&critical), vec![AlertId::RespDept]);
        assert_eq!(critical[0].severity, Severity::Critical);
    }

    #[test]
    fn only_first_respiratory_department_is_checked() {
        let alerts = generate_alerts(
            &today(0.0, 0, 0.0),
            &[
                load("Paediatric RESPIRATORY", 58, LoadStatus::Low),
                load("Respiratory & Pulmonology", 91, LoadStatus::Critical),
            ],
        );
        assert_eq!(ids(&alerts), vec![AlertId::AllGood]);
    }

    #[test]
    fn messages_render_triggering_values() {
        let alerts = generate_alerts(
            &today(31.26, 305, 92.4),
            &[load("Respiratory & Pulmonology", 76, LoadStatus::High)],
        );
        assert_eq!(
            alerts[0].message,
            "Critical surge risk: admissions projected 31.3% above baseline. Activate surge staffing and open overflow beds."
        );
        assert_eq!(
            alerts[1].message,
            "Hazardous air quality (AQI 305). Expect a sharp rise in respiratory and cardiac presentations."
        );
        assert_eq!(
            alerts[2].message,
            "Bed occupancy at 92%. Critical-ward capacity nearly exhausted; trigger the escalation plan."
        );
        assert_eq!(
            alerts[3].message,
            "Respiratory & Pulmonology projected at 76% load (high). Reinforce respiratory staffing and oxygen supply."
        );
    }
}
