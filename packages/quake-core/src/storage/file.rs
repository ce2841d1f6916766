//! JSON-file marker store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::MarkerStore;
use crate::error::StoreError;
use crate::types::EarthquakeEvent;

/// Durable marker store backed by a single JSON file.
///
/// Writes go to a sibling temp file first and are renamed over the target,
/// so a crash mid-write can never leave a torn marker behind.
pub struct FileMarkerStore {
    path: PathBuf,
}

impl FileMarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl MarkerStore for FileMarkerStore {
    async fn load(&self) -> Result<Option<EarthquakeEvent>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let event = serde_json::from_slice(&bytes)?;
        Ok(Some(event))
    }

    async fn save(&self, event: &EarthquakeEvent) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(event)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), "marker persisted");
        Ok(())
    }
}
