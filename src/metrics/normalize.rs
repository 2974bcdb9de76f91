use crate::metrics::TodayMetrics;

/// Clamps to `[0, 100]`; NaN becomes 0.
pub fn normalize_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Clamps to `[0, 1]`; NaN becomes 0.
pub fn normalize_ratio(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Floors at 0 without an upper bound; NaN becomes 0.
pub fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

pub fn normalize_metrics(metrics: &mut TodayMetrics) {
    if metrics.surge_score.is_nan() {
        metrics.surge_score = 0.0;
    }
    metrics.bed_occupancy_pct = normalize_percent(metrics.bed_occupancy_pct);
}
