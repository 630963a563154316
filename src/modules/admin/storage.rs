use async_trait::async_trait;
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::error::AdminError;
use super::record::AdminRecord;

/// Where the admin collection lives.
///
/// The store always loads and saves the whole collection, so a backend only
/// has to persist one ordered list.
#[async_trait]
pub trait AdminStorage: Send + Sync {
    /// Read the full collection. A backend that has never been written to
    /// returns an empty list, not an error.
    async fn load(&self) -> Result<Vec<AdminRecord>, AdminError>;

    /// Replace the full collection
    async fn save(&self, admins: &[AdminRecord]) -> Result<(), AdminError>;

    /// Human-readable location, used in log lines
    fn describe(&self) -> String;
}

/// A pretty-printed JSON array on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AdminStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<AdminRecord>, AdminError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Admins file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(AdminError::Io(e)),
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    async fn save(&self, admins: &[AdminRecord]) -> Result<(), AdminError> {
        let data = serde_json::to_string_pretty(admins)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, data.as_bytes())).await?
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write to a temporary file beside the target, then rename it into place so
/// readers never observe a half-written collection
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), AdminError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

/// Keeps the collection in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    admins: Mutex<Vec<AdminRecord>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admins(admins: Vec<AdminRecord>) -> Self {
        Self {
            admins: Mutex::new(admins),
        }
    }

    /// Copy of the current collection
    pub fn snapshot(&self) -> Vec<AdminRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AdminRecord>> {
        self.admins.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AdminStorage for InMemoryStorage {
    async fn load(&self) -> Result<Vec<AdminRecord>, AdminError> {
        Ok(self.snapshot())
    }

    async fn save(&self, admins: &[AdminRecord]) -> Result<(), AdminError> {
        *self.lock() = admins.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
