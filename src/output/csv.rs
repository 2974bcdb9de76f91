use anyhow::Result;

use crate::alert::Alert;
use crate::departments::DepartmentLoad;
use crate::output::table::plan_allocations;
use crate::recommendations::RecommendationPlan;

pub fn alerts_to_csv(alerts: &[Alert]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["id", "severity", "message"])?;
    for alert in alerts {
        writer.write_record([
            alert.id.to_string(),
            alert.severity.to_string(),
            alert.message.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn loads_to_csv(loads: &[DepartmentLoad]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["department", "load_pct", "status"])?;
    for load in loads {
        writer.write_record([
            load.department.clone(),
            load.load_pct.to_string(),
            load.status.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn plan_to_csv(plan: &RecommendationPlan) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["resource", "current", "extra", "required"])?;
    for (name, allocation) in plan_allocations(plan) {
        writer.write_record([
            name,
            allocation.current.to_string(),
            allocation.extra.to_string(),
            allocation.required.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertId, Severity};
    use crate::departments::LoadStatus;

    #[test]
    fn alerts_csv_quotes_messages() {
        let csv = alerts_to_csv(&[Alert {
            id: AlertId::BedsHigh,
            message: "Bed occupancy at 84%. Expedite safe discharges, then re-check.".to_string(),
            severity: Severity::Warning,
        }])
        .expect("csv");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,severity,message"));
        assert_eq!(
            lines.next(),
            Some("beds-high,warning,\"Bed occupancy at 84%. Expedite safe discharges, then re-check.\"")
        );
    }

    #[test]
    fn loads_csv_has_one_row_per_department() {
        let csv = loads_to_csv(&[DepartmentLoad {
            department: "ICU / HDU".to_string(),
            load_pct: 69,
            status: LoadStatus::Medium,
        }])
        .expect("csv");
        assert_eq!(csv, "department,load_pct,status\nICU / HDU,69,medium\n");
    }

    #[test]
    fn plan_csv_lists_every_allocation() {
        let start = chrono::NaiveDate::from_ymd_opt(2025, 10, 18).expect("valid date");
        let snapshot = crate::snapshot::DashboardSnapshot::sample(start);
        let plan = crate::recommendations::recommend(&snapshot, start).expect("plan");
        let csv = plan_to_csv(&plan).expect("csv");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("resource,current,extra,required"));
        assert_eq!(lines.next(), Some("Nurses,4,3,7"));
        assert!(csv.contains("N95 masks,100,76,176"));
        assert_eq!(csv.lines().count(), 11);
    }
}
