//! Surge risk and readiness scoring for hospital operations dashboards.
//!
//! [`engine::evaluate`] turns one [`snapshot::DashboardSnapshot`] into every
//! derived view: department loads, peak outlook, readiness score and alerts.
//! [`recommendations::recommend`] plans staffing, supplies, beds and
//! advisories for the snapshot's next surge event.

pub mod alert;
pub mod classify;
pub mod config;
pub mod departments;
pub mod engine;
pub mod forecast;
pub mod metrics;
pub mod output;
pub mod readiness;
pub mod recommendations;
pub mod refresh;
pub mod server;
pub mod snapshot;
