use serde::{Deserialize, Serialize};

use crate::forecast::peak::find_peak;
use crate::forecast::{ForecastDay, PeakOutlook};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastInsights {
    pub days: usize,
    pub avg_surge_pct: f64,
    pub peak: Option<PeakOutlook>,
    /// Mean over days that carry an AQI reading.
    pub avg_aqi: Option<f64>,
    pub narrative: String,
}

pub fn summarize_window(days: &[ForecastDay]) -> ForecastInsights {
    let avg_surge_pct = if days.is_empty() {
        0.0
    } else {
        days.iter().map(|d| d.surge_pct).sum::<f64>() / days.len() as f64
    };

    let readings = days.iter().filter_map(|d| d.aqi).collect::<Vec<_>>();
    let avg_aqi = if readings.is_empty() {
        None
    } else {
        Some(readings.iter().map(|v| f64::from(*v)).sum::<f64>() / readings.len() as f64)
    };

    let peak = find_peak(days);
    let mut narrative = surge_sentence(peak.as_ref());
    if let Some(avg) = avg_aqi {
        narrative.push(' ');
        narrative.push_str(&aqi_sentence(avg));
    }

    ForecastInsights {
        days: days.len(),
        avg_surge_pct,
        peak,
        avg_aqi,
        narrative,
    }
}

fn surge_sentence(peak: Option<&PeakOutlook>) -> String {
    let Some(peak) = peak else {
        return "No forecast horizon data is available for this window.".to_string();
    };
    if peak.surge_pct >= 50.0 {
        format!(
            "At least one very high surge day is expected (~{:.1}% above baseline on {}); plan aggressive staffing and bed conversion.",
            peak.surge_pct, peak.date
        )
    } else if peak.surge_pct >= 25.0 {
        format!(
            "Moderate surges are expected, peaking near {:.1}% above baseline on {}.",
            peak.surge_pct, peak.date
        )
    } else {
        "Surge intensity stays close to baseline across the window.".to_string()
    }
}

fn aqi_sentence(avg_aqi: f64) -> String {
    if avg_aqi >= 300.0 {
        format!(
            "Average AQI of ~{avg_aqi:.0} is in the very poor range and will weigh heavily on respiratory and ICU capacity."
        )
    } else if avg_aqi >= 200.0 {
        format!(
            "Average AQI of ~{avg_aqi:.0} indicates poor air quality; respiratory units are the likely bottleneck."
        )
    } else {
        format!("Average AQI of ~{avg_aqi:.0} keeps pollution-driven respiratory surges limited.")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32, surge_pct: f64, aqi: Option<u32>) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 10, d).expect("valid date"),
            surge_pct,
            aqi,
        }
    }

    #[test]
    fn empty_window_reports_missing_data() {
        let insights = summarize_window(&[]);
        assert_eq!(insights.days, 0);
        assert_eq!(insights.peak, None);
        assert_eq!(insights.avg_aqi, None);
        assert!(insights.narrative.starts_with("No forecast horizon data"));
    }

    #[test]
    fn averages_and_peak_are_reported() {
        let insights = summarize_window(&[
            day(19, 10.0, Some(180)),
            day(20, 62.0, Some(340)),
            day(21, 20.0, None),
        ]);
        assert_eq!(insights.days, 3);
        assert!((insights.avg_surge_pct - 30.666_666).abs() < 1e-3);
        assert_eq!(insights.avg_aqi, Some(260.0));
        let peak = insights.peak.expect("peak");
        assert_eq!(peak.date, NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date"));
        assert!(insights.narrative.contains("very high surge day"));
        assert!(insights.narrative.contains("2025-10-20"));
        assert!(insights.narrative.contains("poor air quality"));
    }

    #[test]
    fn calm_window_without_aqi_has_single_sentence() {
        let insights = summarize_window(&[day(1, 4.0, None), day(2, -1.0, None)]);
        assert_eq!(
            insights.narrative,
            "Surge intensity stays close to baseline across the window."
        );
    }
}
