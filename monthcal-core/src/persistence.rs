//! Loading and saving event snapshots.
//!
//! A gateway knows nothing about event identity: it stores and returns
//! whole ordered snapshots. `save` always overwrites, so retrying it is safe.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CalError, CalResult};
use crate::event::Event;

pub trait PersistenceGateway: Send + Sync {
    /// The last saved snapshot, or an empty list if nothing was saved yet.
    fn load(&self) -> impl Future<Output = CalResult<Vec<Event>>> + Send;

    /// Overwrite the stored snapshot.
    fn save(&self, events: &[Event]) -> impl Future<Output = CalResult<()>> + Send;
}

/// Snapshot stored as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileGateway { path: path.into() }
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

impl PersistenceGateway for JsonFileGateway {
    async fn load(&self) -> CalResult<Vec<Event>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved events yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CalError::Persistence(format!(
                    "Could not read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let events: Vec<Event> = serde_json::from_str(&content).map_err(|e| {
            CalError::Persistence(format!("Could not parse {}: {}", self.path.display(), e))
        })?;

        for event in &events {
            event.validate().map_err(|e| {
                CalError::Persistence(format!("Invalid event '{}' in snapshot: {}", event.id, e))
            })?;
        }

        tracing::debug!(path = %self.path.display(), count = events.len(), "loaded events");
        Ok(events)
    }

    async fn save(&self, events: &[Event]) -> CalResult<()> {
        let content = serde_json::to_string_pretty(events)
            .map_err(|e| CalError::Persistence(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CalError::Persistence(format!("Could not create {}: {}", parent.display(), e))
            })?;
        }

        // Write then rename so a crash never leaves a half-written snapshot
        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| CalError::Persistence(format!("Could not write {}: {}", temp.display(), e)))?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            CalError::Persistence(format!("Could not replace {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), count = events.len(), "saved events");
        Ok(())
    }
}

/// Snapshot kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    snapshot: Mutex<Vec<Event>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        MemoryGateway {
            snapshot: Mutex::new(events),
        }
    }

    pub fn events(&self) -> CalResult<Vec<Event>> {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| CalError::Persistence("Snapshot lock poisoned".into()))
    }
}

impl PersistenceGateway for MemoryGateway {
    async fn load(&self) -> CalResult<Vec<Event>> {
        self.events()
    }

    async fn save(&self, events: &[Event]) -> CalResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| CalError::Persistence("Snapshot lock poisoned".into()))?;
        *guard = events.to_vec();
        Ok(())
    }
}
