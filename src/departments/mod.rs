pub mod load;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::classify::Breakpoints;

/// Upstream risk score for one department, nominally in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentRisk {
    pub department: String,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentLoad {
    pub department: String,
    pub load_pct: u8,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Low,
    Medium,
    High,
    Critical,
}

impl LoadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn is_elevated(self) -> bool {
        self != Self::Low
    }
}

impl Display for LoadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const LOAD_STATUS_BREAKPOINTS: Breakpoints<LoadStatus> = Breakpoints::new(
    LoadStatus::Low,
    &[
        (60.0, LoadStatus::Medium),
        (75.0, LoadStatus::High),
        (90.0, LoadStatus::Critical),
    ],
);
