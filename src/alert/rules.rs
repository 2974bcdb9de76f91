use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Signals checked by the alert engine, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertSignal {
    SurgeScore,
    Aqi,
    BedOccupancy,
    RespiratoryDepartment,
}

impl AlertSignal {
    pub const ORDERED: [AlertSignal; 4] = [
        AlertSignal::SurgeScore,
        AlertSignal::Aqi,
        AlertSignal::BedOccupancy,
        AlertSignal::RespiratoryDepartment,
    ];
}

/// Stable rule-derived alert keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlertId {
    SurgeHigh,
    SurgeMedium,
    AqiCritical,
    AqiBad,
    BedsCritical,
    BedsHigh,
    RespDept,
    AllGood,
}

impl AlertId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SurgeHigh => "surge-high",
            Self::SurgeMedium => "surge-medium",
            Self::AqiCritical => "aqi-critical",
            Self::AqiBad => "aqi-bad",
            Self::BedsCritical => "beds-critical",
            Self::BedsHigh => "beds-high",
            Self::RespDept => "resp-dept",
            Self::AllGood => "all-good",
        }
    }
}

impl Display for AlertId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Two-tier threshold rule on a single numeric signal.
#[derive(Debug, Clone, Copy)]
pub struct TieredRule {
    pub signal: AlertSignal,
    pub critical_at: f64,
    pub critical_id: AlertId,
    pub warning_at: f64,
    pub warning_id: AlertId,
}

impl TieredRule {
    /// Only the highest matching tier fires.
    pub fn tier(&self, value: f64) -> Option<(AlertId, Severity)> {
        if value >= self.critical_at {
            Some((self.critical_id, Severity::Critical))
        } else if value >= self.warning_at {
            Some((self.warning_id, Severity::Warning))
        } else {
            None
        }
    }
}

pub const SURGE_RULE: TieredRule = TieredRule {
    signal: AlertSignal::SurgeScore,
    critical_at: 30.0,
    critical_id: AlertId::SurgeHigh,
    warning_at: 15.0,
    warning_id: AlertId::SurgeMedium,
};

pub const AQI_RULE: TieredRule = TieredRule {
    signal: AlertSignal::Aqi,
    critical_at: 300.0,
    critical_id: AlertId::AqiCritical,
    warning_at: 200.0,
    warning_id: AlertId::AqiBad,
};

pub const BEDS_RULE: TieredRule = TieredRule {
    signal: AlertSignal::BedOccupancy,
    critical_at: 90.0,
    critical_id: AlertId::BedsCritical,
    warning_at: 80.0,
    warning_id: AlertId::BedsHigh,
};

/// Case-insensitive substring that marks a respiratory department.
pub const RESPIRATORY_MARKER: &str = "respiratory";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_exclusive() {
        assert_eq!(SURGE_RULE.tier(14.99), None);
        assert_eq!(
            SURGE_RULE.tier(15.0),
            Some((AlertId::SurgeMedium, Severity::Warning))
        );
        assert_eq!(
            SURGE_RULE.tier(30.0),
            Some((AlertId::SurgeHigh, Severity::Critical))
        );
        assert_eq!(AQI_RULE.tier(f64::NAN), None);
    }

    #[test]
    fn ids_serialize_as_kebab_case() {
        let json = serde_json::to_string(&AlertId::BedsCritical).expect("serialize");
        assert_eq!(json, "\"beds-critical\"");
        assert_eq!(AlertId::RespDept.to_string(), "resp-dept");
    }
}
