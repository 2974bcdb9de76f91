use serde::{Deserialize, Serialize};

use crate::recommendations::{EventKind, RiskCategory, SurgeEvent};

/// Public-health message for one audience. Composed only; never sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Advisory {
    pub audience: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryPlan {
    pub summary: String,
    pub target_groups: Vec<String>,
    pub messages: Vec<Advisory>,
}

pub fn build_advisories(event: &SurgeEvent, aqi: u32) -> AdvisoryPlan {
    let messages = advisory_messages(event, aqi);
    AdvisoryPlan {
        summary: format!(
            "Advisories tailored to {} to cut avoidable admissions.",
            event.name
        ),
        target_groups: messages.iter().map(|m| m.audience.clone()).collect(),
        messages,
    }
}

/// One message per matching risk, in a fixed order, with a general fallback.
fn advisory_messages(event: &SurgeEvent, aqi: u32) -> Vec<Advisory> {
    let name = &event.name;
    let has = |risk: RiskCategory| event.risk_categories.contains(&risk);
    let mut messages = Vec::new();

    if has(RiskCategory::Respiratory) {
        messages.push(advisory(
            "Asthma, COPD and chronic respiratory patients",
            format!(
                "Air quality is expected to worsen during {name} (AQI around {aqi}). Stay indoors in the evening peak, keep rescue inhalers at hand, wear an N95 mask outdoors and avoid strenuous exercise."
            ),
        ));
    }
    if has(RiskCategory::Burns) {
        messages.push(advisory(
            "Families using firecrackers and open flames",
            format!(
                "Burn injuries rise sharply around {name}. Use long-handled lighters, keep water or sand nearby and never leave children alone with fireworks."
            ),
        ));
    }
    if has(RiskCategory::Trauma) {
        messages.push(advisory(
            "General public and emergency responders",
            format!(
                "Road accidents and falls can double emergency visits during {name}. Do not drink and drive, wear helmets and seatbelts, and follow traffic rules."
            ),
        ));
    }
    if event.kind == EventKind::Pollution {
        messages.push(advisory(
            "Cardiac and elderly patients",
            "Prolonged poor air quality raises the risk of cardiac events. Take medication on schedule, watch for symptoms and seek care early for chest pain or breathlessness.".to_string(),
        ));
    }

    if messages.is_empty() {
        messages.push(advisory(
            "High-risk patients",
            format!(
                "The hospital expects a rise in demand during {name}. Keep medication stocked, avoid crowds where possible and call the helpline early if symptoms worsen."
            ),
        ));
    }
    messages
}

fn advisory(audience: &str, message: String) -> Advisory {
    Advisory {
        audience: audience.to_string(),
        message,
    }
}
