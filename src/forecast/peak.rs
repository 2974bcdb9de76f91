use crate::forecast::{ForecastDay, PeakOutlook};

/// Finds the maximum-surge day; ties keep the earliest day.
///
/// Returns `None` for an empty horizon, which means "no data" and must not be
/// read as a zero surge.
pub fn find_peak(days: &[ForecastDay]) -> Option<PeakOutlook> {
    let mut peak: Option<&ForecastDay> = None;
    for day in days {
        let replaces = match peak {
            None => true,
            // A NaN leader yields to the first comparable day.
            Some(best) => {
                day.surge_pct > best.surge_pct
                    || (best.surge_pct.is_nan() && !day.surge_pct.is_nan())
            }
        };
        if replaces {
            peak = Some(day);
        }
    }
    peak.map(|day| PeakOutlook {
        date: day.date,
        surge_pct: day.surge_pct,
    })
}
