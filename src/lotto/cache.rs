//! History cache backends.
//!
//! The cache artifact is a pretty-printed JSON array of draws. Reads are
//! forgiving: any read, parse, or validation failure is treated as a cache
//! miss so the store falls through to a remote rebuild.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::types::DrawHistory;

/// Persistence seam for the draw history.
pub trait HistoryCache: Send + Sync {
    /// Return the cached history if present and valid.
    fn read(&self) -> Option<DrawHistory>;

    /// Replace the cached history wholesale.
    fn write(&self, history: &DrawHistory) -> Result<()>;
}

impl<T: HistoryCache> HistoryCache for &T {
    fn read(&self) -> Option<DrawHistory> {
        (**self).read()
    }

    fn write(&self, history: &DrawHistory) -> Result<()> {
        (**self).write(history)
    }
}

/// File-backed cache holding the JSON artifact.
pub struct FileHistoryCache {
    path: PathBuf,
}

impl FileHistoryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HistoryCache for FileHistoryCache {
    fn read(&self) -> Option<DrawHistory> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let history: DrawHistory = serde_json::from_str(&content).ok()?;
        if !history.is_valid() {
            tracing::warn!(path = %self.path.display(), "cache artifact failed validation");
            return None;
        }
        Some(history)
    }

    fn write(&self, history: &DrawHistory) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(history)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-memory cache for tests and embedded use.
#[derive(Default)]
pub struct MemoryHistoryCache {
    inner: Mutex<Option<DrawHistory>>,
}

#[allow(dead_code)]
impl MemoryHistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: DrawHistory) -> Self {
        Self {
            inner: Mutex::new(Some(history)),
        }
    }
}

impl HistoryCache for MemoryHistoryCache {
    fn read(&self) -> Option<DrawHistory> {
        self.inner.lock().ok()?.clone()
    }

    fn write(&self, history: &DrawHistory) -> Result<()> {
        *self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("cache mutex poisoned"))? = Some(history.clone());
        Ok(())
    }
}
