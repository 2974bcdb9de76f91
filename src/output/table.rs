use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::alert::{Alert, Severity};
use crate::departments::{DepartmentLoad, LoadStatus};
use crate::engine::DashboardView;
use crate::forecast::insights::ForecastInsights;
use crate::readiness::ReadinessLevel;
use crate::recommendations::{Allocation, RecommendationPlan};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&render_summary_table(view));
    out.push('\n');
    out.push_str(&render_department_table(&view.department_loads));
    out.push('\n');
    out.push_str(&render_alert_table(&view.alerts));
    out
}

pub fn render_summary_table(view: &DashboardView) -> String {
    let mut table = new_table();
    table.set_header(vec!["Indicator", "Value"]);

    let readiness_color = match view.readiness.level {
        ReadinessLevel::High => Color::Green,
        ReadinessLevel::Medium => Color::Yellow,
        ReadinessLevel::Low => Color::Red,
    };
    table.add_row(Row::from(vec![
        Cell::new("Readiness"),
        Cell::new(format!(
            "{} ({})",
            view.readiness.score, view.readiness.level
        ))
        .fg(readiness_color),
    ]));
    table.add_row(vec![
        "Surge risk".to_string(),
        format!("{:.1}% ({})", view.surge_risk.score, view.surge_risk.level),
    ]);
    table.add_row(vec![
        "Peak outlook".to_string(),
        view.peak_outlook
            .map(|p| format!("{} at {:+.1}%", p.date, p.surge_pct))
            .unwrap_or_else(|| "no horizon data".to_string()),
    ]);
    table.to_string()
}

pub fn render_department_table(loads: &[DepartmentLoad]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Department", "Projected Load", "Status"]);
    for load in loads {
        let color = match load.status {
            LoadStatus::Low => Color::Green,
            LoadStatus::Medium => Color::Yellow,
            LoadStatus::High => Color::DarkYellow,
            LoadStatus::Critical => Color::Red,
        };
        table.add_row(Row::from(vec![
            Cell::new(&load.department),
            Cell::new(format!("{}%", load.load_pct)),
            Cell::new(load.status.as_str().to_uppercase()).fg(color),
        ]));
    }
    table.to_string()
}

pub fn render_alert_table(alerts: &[Alert]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Severity", "Alert", "Message"]);
    for alert in alerts {
        let color = match alert.severity {
            Severity::Info => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        };
        table.add_row(Row::from(vec![
            Cell::new(alert.severity.to_string().to_uppercase()).fg(color),
            Cell::new(alert.id.as_str()),
            Cell::new(&alert.message),
        ]));
    }
    table.to_string()
}

pub fn render_insights_table(insights: &ForecastInsights) -> String {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Days".to_string(), insights.days.to_string()]);
    table.add_row(vec![
        "Avg surge".to_string(),
        format!("{:.1}%", insights.avg_surge_pct),
    ]);
    table.add_row(vec![
        "Peak".to_string(),
        insights
            .peak
            .map(|p| format!("{} at {:.1}%", p.date, p.surge_pct))
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Avg AQI".to_string(),
        insights
            .avg_aqi
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(|| "-".to_string()),
    ]);

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&insights.narrative);
    out
}

pub fn render_recommendations_table(plan: &RecommendationPlan) -> String {
    let mut header = new_table();
    header.set_header(vec!["Event", "Value"]);
    header.add_row(vec![
        "Name".to_string(),
        format!("{} ({})", plan.event.name, plan.event.date),
    ]);
    header.add_row(vec![
        "Peak".to_string(),
        format!(
            "{:+.1}% on {} ({} basis)",
            plan.peak.surge_pct,
            plan.peak
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            plan.peak.basis
        ),
    ]);
    header.add_row(vec![
        "Admissions".to_string(),
        format!(
            "{:.0} baseline -> {:.0} projected",
            plan.peak.baseline_admissions, plan.peak.total_admissions
        ),
    ]);

    let mut table = new_table();
    table.set_header(vec!["Resource", "Current", "Extra", "Required"]);
    for (name, allocation) in plan_allocations(plan) {
        table.add_row(Row::from(vec![
            Cell::new(name),
            Cell::new(allocation.current),
            Cell::new(allocation.extra).fg(if allocation.extra > 0 {
                Color::Yellow
            } else {
                Color::Green
            }),
            Cell::new(allocation.required),
        ]));
    }

    let mut advisories = new_table();
    advisories.set_header(vec!["Audience", "Advisory"]);
    for advisory in &plan.advisories.messages {
        advisories.add_row(vec![advisory.audience.clone(), advisory.message.clone()]);
    }

    let mut out = header.to_string();
    out.push('\n');
    out.push_str(&plan.staffing.summary);
    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&advisories.to_string());
    out
}

/// Every allocation in the plan, staffing first, then supplies and beds.
pub fn plan_allocations(plan: &RecommendationPlan) -> Vec<(String, Allocation)> {
    let mut rows = vec![
        ("Nurses".to_string(), plan.staffing.nurses),
        ("Doctors".to_string(), plan.staffing.doctors),
        ("Support staff".to_string(), plan.staffing.support),
    ];
    rows.extend(
        plan.supplies
            .items
            .iter()
            .map(|item| (item.name.clone(), item.quantity)),
    );
    rows.extend([
        ("ICU beds".to_string(), plan.beds.icu),
        ("HDU beds".to_string(), plan.beds.hdu),
        ("Step-down beds".to_string(), plan.beds.step_down),
    ]);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertId;

    #[test]
    fn alert_table_lists_ids_in_order() {
        let rendered = render_alert_table(&[
            Alert {
                id: AlertId::SurgeMedium,
                message: "surge".to_string(),
                severity: Severity::Warning,
            },
            Alert {
                id: AlertId::AqiCritical,
                message: "aqi".to_string(),
                severity: Severity::Critical,
            },
        ]);
        let surge = rendered.find("surge-medium").expect("surge row");
        let aqi = rendered.find("aqi-critical").expect("aqi row");
        assert!(surge < aqi);
    }

    #[test]
    fn recommendation_rows_cover_staff_supplies_and_beds() {
        let snapshot = crate::snapshot::DashboardSnapshot::sample(
            chrono::NaiveDate::from_ymd_opt(2025, 10, 18).expect("valid date"),
        );
        let plan = crate::recommendations::recommend(&snapshot, snapshot.forecast[0].date)
            .expect("plan");
        let rows = plan_allocations(&plan);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].0, "Nurses");
        assert_eq!(rows[9].0, "Step-down beds");

        let rendered = render_recommendations_table(&plan);
        assert!(rendered.contains("Diwali"));
        assert!(rendered.contains("Portable ventilators"));
    }
}
