pub mod normalize;

use serde::{Deserialize, Serialize};

use crate::metrics::normalize::{non_negative, normalize_percent};

/// Operational metrics for the current day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TodayMetrics {
    /// Percent by which predicted admissions exceed baseline. May exceed 100
    /// or be negative.
    pub surge_score: f64,
    pub bed_occupancy_pct: f64,
    pub aqi: u32,
}

impl TodayMetrics {
    /// Derives today's metrics from predicted and baseline admissions.
    ///
    /// Bed occupancy is projected from a 70% operating floor, rising by half a
    /// point per surge point up to 25 points, and reported as a whole percent.
    pub fn from_admissions(predicted: f64, baseline: f64, aqi: u32) -> Self {
        let surge_score = (predicted - baseline) / baseline.max(1.0) * 100.0;
        let surge_score = if surge_score.is_nan() { 0.0 } else { surge_score };
        let bed_occupancy = 70.0 + (surge_score / 2.0).min(25.0);
        Self {
            surge_score,
            bed_occupancy_pct: normalize_percent(non_negative(bed_occupancy)).round(),
            aqi,
        }
    }

    pub fn sample() -> Self {
        Self::from_admissions(140.0, 100.0, 150)
    }

    pub fn apply_overrides(&mut self, overrides: &MetricOverrides) {
        if let Some(surge_score) = overrides.surge_score {
            self.surge_score = surge_score;
        }
        if let Some(bed_occupancy_pct) = overrides.bed_occupancy_pct {
            self.bed_occupancy_pct = bed_occupancy_pct;
        }
        if let Some(aqi) = overrides.aqi {
            self.aqi = aqi;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricOverrides {
    pub surge_score: Option<f64>,
    pub bed_occupancy_pct: Option<f64>,
    pub aqi: Option<u32>,
}

impl MetricOverrides {
    pub fn is_empty(&self) -> bool {
        self.surge_score.is_none() && self.bed_occupancy_pct.is_none() && self.aqi.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admissions_drive_surge_and_occupancy() {
        let metrics = TodayMetrics::from_admissions(140.0, 100.0, 150);
        assert!((metrics.surge_score - 40.0).abs() < 1e-9);
        assert!((metrics.bed_occupancy_pct - 90.0).abs() < 1e-9);
        assert_eq!(metrics.aqi, 150);
    }

    #[test]
    fn occupancy_projection_is_capped() {
        let metrics = TodayMetrics::from_admissions(300.0, 100.0, 0);
        assert!((metrics.surge_score - 200.0).abs() < 1e-9);
        assert_eq!(metrics.bed_occupancy_pct, 95.0);
    }

    #[test]
    fn projected_occupancy_is_a_whole_percent() {
        // surge 41 -> 90.5 -> 91
        let metrics = TodayMetrics::from_admissions(141.0, 100.0, 0);
        assert_eq!(metrics.bed_occupancy_pct, 91.0);
        // surge 13 -> 76.5 -> 77
        let metrics = TodayMetrics::from_admissions(113.0, 100.0, 0);
        assert_eq!(metrics.bed_occupancy_pct, 77.0);
    }

    #[test]
    fn zero_baseline_uses_unit_denominator() {
        let metrics = TodayMetrics::from_admissions(5.0, 0.0, 0);
        assert!((metrics.surge_score - 500.0).abs() < 1e-9);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut metrics = TodayMetrics::sample();
        metrics.apply_overrides(&MetricOverrides {
            aqi: Some(320),
            ..MetricOverrides::default()
        });
        assert_eq!(metrics.aqi, 320);
        assert!((metrics.surge_score - 40.0).abs() < 1e-9);
    }
}
