//! Last-write-wins holder for the most recently evaluated dashboard view.
//!
//! Periodic refreshes and on-demand refreshes may race; whichever evaluation
//! publishes last is the one served.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::engine::{evaluate, DashboardView};
use crate::snapshot::{DashboardSnapshot, SnapshotError, SnapshotSource};

#[derive(Debug, Clone, Serialize)]
pub struct PublishedView {
    pub generation: u64,
    pub refreshed_at: DateTime<Utc>,
    pub view: DashboardView,
}

#[derive(Debug, Clone, Default)]
pub struct LatestView {
    inner: Arc<RwLock<Option<PublishedView>>>,
}

impl LatestView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current view, bumping the generation.
    pub async fn publish(&self, view: DashboardView) -> PublishedView {
        let mut guard = self.inner.write().await;
        let generation = guard.as_ref().map(|p| p.generation + 1).unwrap_or(1);
        let published = PublishedView {
            generation,
            refreshed_at: Utc::now(),
            view,
        };
        *guard = Some(published.clone());
        published
    }

    pub async fn current(&self) -> Option<PublishedView> {
        self.inner.read().await.clone()
    }
}

/// Loads, evaluates and publishes one snapshot.
pub async fn refresh_from_source(
    source: &SnapshotSource,
    latest: &LatestView,
) -> Result<PublishedView, SnapshotError> {
    let snapshot = source.load()?;
    Ok(refresh_with(&snapshot, latest).await)
}

pub async fn refresh_with(snapshot: &DashboardSnapshot, latest: &LatestView) -> PublishedView {
    let published = latest.publish(evaluate(snapshot)).await;
    info!(
        generation = published.generation,
        score = published.view.readiness.score,
        alerts = published.view.alerts.len(),
        "published dashboard view"
    );
    published
}
