pub mod engine;
pub mod rules;

pub use engine::{generate_alerts, Alert};
pub use rules::{AlertId, AlertSignal, Severity};
