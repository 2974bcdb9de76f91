use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::snapshot::DashboardSnapshot;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed reading snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing snapshot {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON snapshot file written by the forecasting collaborator.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file on every call so each refresh sees fresh data.
    pub fn load(&self) -> Result<DashboardSnapshot, SnapshotError> {
        let data = fs::read_to_string(&self.path).map_err(|source| SnapshotError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: DashboardSnapshot =
            serde_json::from_str(&data).map_err(|source| SnapshotError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %self.path.display(),
            departments = snapshot.departments.len(),
            forecast_days = snapshot.forecast.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn write_sample(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()> {
        use anyhow::Context;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating snapshot directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed writing snapshot: {}", self.path.display()))
    }
}
