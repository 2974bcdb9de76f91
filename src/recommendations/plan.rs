use serde::{Deserialize, Serialize};

use crate::recommendations::{PeakLoad, SurgeEvent};

/// Units already in place, units to add and their sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    pub current: u32,
    pub extra: u32,
    pub required: u32,
}

impl Allocation {
    pub fn new(current: u32, extra: u32) -> Self {
        Self {
            current,
            extra,
            required: current.saturating_add(extra),
        }
    }
}

/// `admissions * share / per`, rounded, then raised to `floor`.
#[derive(Debug, Clone, Copy)]
pub struct Ratio {
    pub share: f64,
    pub per: f64,
    pub floor: i64,
}

impl Ratio {
    const fn new(share: f64, per: f64) -> Self {
        Self {
            share,
            per,
            floor: 0,
        }
    }

    const fn at_least(self, floor: i64) -> Self {
        Self { floor, ..self }
    }

    pub fn units(&self, admissions: f64) -> u32 {
        let raw = (admissions * self.share / self.per).round() as i64;
        raw.max(self.floor).clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Current units scale with baseline admissions, extra units with the surplus.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRule {
    pub current: Ratio,
    pub extra: Ratio,
}

impl ResourceRule {
    pub fn allocate(&self, peak: &PeakLoad) -> Allocation {
        Allocation::new(
            self.current.units(peak.baseline_admissions),
            self.extra.units(peak.surplus()),
        )
    }
}

pub const NURSES: ResourceRule = ResourceRule {
    current: Ratio::new(0.35, 10.0),
    extra: Ratio::new(0.4, 10.0),
};

/// At least two extra doctors are rostered for any event.
pub const DOCTORS: ResourceRule = ResourceRule {
    current: Ratio::new(0.12, 15.0),
    extra: Ratio::new(0.18, 18.0).at_least(2),
};

pub const SUPPORT_STAFF: ResourceRule = ResourceRule {
    current: Ratio::new(0.25, 15.0),
    extra: Ratio::new(0.3, 15.0),
};

pub const OXYGEN_CYLINDERS: ResourceRule = ResourceRule {
    current: Ratio::new(0.5, 5.0),
    extra: Ratio::new(0.7, 5.0),
};

pub const PORTABLE_VENTILATORS: ResourceRule = ResourceRule {
    current: Ratio::new(0.08, 2.0).at_least(4),
    extra: Ratio::new(0.12, 2.0).at_least(1),
};

pub const BURN_DRESSING_KITS: ResourceRule = ResourceRule {
    current: Ratio::new(0.15, 3.0),
    extra: Ratio::new(0.25, 3.0),
};

pub const N95_MASKS: ResourceRule = ResourceRule {
    current: Ratio::new(1.0, 1.0),
    extra: Ratio::new(1.2, 1.0),
};

pub const ICU_BEDS: ResourceRule = ResourceRule {
    current: Ratio::new(0.18, 1.0),
    extra: Ratio::new(0.22, 1.0),
};

pub const HDU_BEDS: ResourceRule = ResourceRule {
    current: Ratio::new(0.22, 1.0),
    extra: Ratio::new(0.26, 1.0),
};

pub const STEP_DOWN_BEDS: ResourceRule = ResourceRule {
    current: Ratio::new(0.3, 1.0),
    extra: Ratio::new(0.32, 1.0),
};

const SUPPLY_RULES: [(&str, ResourceRule); 4] = [
    ("Oxygen cylinders", OXYGEN_CYLINDERS),
    ("Portable ventilators", PORTABLE_VENTILATORS),
    ("Burn dressing kits", BURN_DRESSING_KITS),
    ("N95 masks", N95_MASKS),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffingPlan {
    pub summary: String,
    pub nurses: Allocation,
    pub doctors: Allocation,
    pub support: Allocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyItem {
    pub name: String,
    #[serde(flatten)]
    pub quantity: Allocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuppliesPlan {
    pub summary: String,
    pub items: Vec<SupplyItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BedPlan {
    pub summary: String,
    pub icu: Allocation,
    pub hdu: Allocation,
    pub step_down: Allocation,
}

pub fn staffing_plan(event: &SurgeEvent, peak: &PeakLoad) -> StaffingPlan {
    StaffingPlan {
        summary: format!(
            "Plan for {}: raise frontline coverage from {:.0} baseline patients to about {:.0} at peak ({:+.1}% uplift).",
            event.name, peak.baseline_admissions, peak.total_admissions, peak.surge_pct
        ),
        nurses: NURSES.allocate(peak),
        doctors: DOCTORS.allocate(peak),
        support: SUPPORT_STAFF.allocate(peak),
    }
}

pub fn supplies_plan(peak: &PeakLoad) -> SuppliesPlan {
    SuppliesPlan {
        summary: format!(
            "Stock oxygen, ventilators and trauma kits for a {:+.1}% surge before the event starts.",
            peak.surge_pct
        ),
        items: SUPPLY_RULES
            .iter()
            .map(|(name, rule)| SupplyItem {
                name: (*name).to_string(),
                quantity: rule.allocate(peak),
            })
            .collect(),
    }
}

pub fn bed_plan(peak: &PeakLoad) -> BedPlan {
    BedPlan {
        summary: "Convert elective-capable wards into ICU, HDU and step-down capacity so critical cases are not boarded in the emergency department.".to_string(),
        icu: ICU_BEDS.allocate(peak),
        hdu: HDU_BEDS.allocate(peak),
        step_down: STEP_DOWN_BEDS.allocate(peak),
    }
}
