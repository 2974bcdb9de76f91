use tracing::debug;

use crate::departments::{DepartmentLoad, DepartmentRisk, LoadStatus, LOAD_STATUS_BREAKPOINTS};
use crate::metrics::normalize::normalize_ratio;

/// Every department carries at least this much baseline load.
pub const BASELINE_LOAD_PCT: f64 = 50.0;

/// Projects each department's load onto the 50-100% band, preserving order.
pub fn estimate_loads(risks: &[DepartmentRisk]) -> Vec<DepartmentLoad> {
    let loads = risks.iter().map(estimate_load).collect::<Vec<_>>();
    debug!(departments = loads.len(), "estimated department loads");
    loads
}

pub fn estimate_load(risk: &DepartmentRisk) -> DepartmentLoad {
    let load = BASELINE_LOAD_PCT + normalize_ratio(risk.risk_score) * (100.0 - BASELINE_LOAD_PCT);
    let load_pct = load.round() as u8;
    DepartmentLoad {
        department: risk.department.clone(),
        load_pct,
        status: LOAD_STATUS_BREAKPOINTS.classify(f64::from(load_pct)),
    }
}

/// Departments at `high` or `critical` load.
pub fn count_high_risk(loads: &[DepartmentLoad]) -> usize {
    loads
        .iter()
        .filter(|load| load.status >= LoadStatus::High)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(name: &str, score: f64) -> DepartmentRisk {
        DepartmentRisk {
            department: name.to_string(),
            risk_score: score,
        }
    }

    #[test]
    fn maps_risk_onto_half_band() {
        assert_eq!(estimate_load(&risk("a", 0.0)).load_pct, 50);
        assert_eq!(estimate_load(&risk("a", 1.0)).load_pct, 100);
        assert_eq!(estimate_load(&risk("a", 0.5)).load_pct, 75);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 50 + 0.01 * 50 = 50.5
        assert_eq!(estimate_load(&risk("a", 0.01)).load_pct, 51);
        assert_eq!(estimate_load(&risk("a", 0.03)).load_pct, 52);
    }

    #[test]
    fn clamps_malformed_scores() {
        assert_eq!(estimate_load(&risk("a", -0.4)).load_pct, 50);
        assert_eq!(estimate_load(&risk("a", 7.0)).load_pct, 100);
        let nan = estimate_load(&risk("a", f64::NAN));
        assert_eq!(nan.load_pct, 50);
        assert_eq!(nan.status, LoadStatus::Low);
    }

    #[test]
    fn status_follows_load_breakpoints() {
        assert_eq!(estimate_load(&risk("a", 0.18)).status, LoadStatus::Low); // 59
        assert_eq!(estimate_load(&risk("a", 0.2)).status, LoadStatus::Medium); // 60
        assert_eq!(estimate_load(&risk("a", 0.5)).status, LoadStatus::High); // 75
        assert_eq!(estimate_load(&risk("a", 0.8)).status, LoadStatus::Critical); // 90
    }

    #[test]
    fn preserves_input_order_and_counts_high_risk() {
        let loads = estimate_loads(&[risk("ICU", 0.9), risk("Trauma", 0.1), risk("Resp", 0.5)]);
        let names = loads.iter().map(|l| l.department.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["ICU", "Trauma", "Resp"]);
        assert_eq!(count_high_risk(&loads), 2);
    }
}
