//! Registry caching backends.
//!
//! A cache holds at most one registry under its name. It is read-through:
//! the holder builds on a miss and writes the result back. Invalidation is a
//! full delete; there is no partial update.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use super::ClassRegistry;
use crate::{Error, Result};

/// Storage for a built registry.
pub trait RegistryCache: Send + Sync {
    /// The cache key this backend stores the registry under.
    fn name(&self) -> &str;

    /// Get the cached registry, `None` on a miss.
    fn get(&self) -> Result<Option<ClassRegistry>>;

    /// Store a registry, replacing any previous one.
    fn set(&self, registry: &ClassRegistry) -> Result<()>;

    /// Drop the cached registry.
    fn delete(&self) -> Result<()>;
}

/// In-process cache.
///
/// Clones share the same slot, so a clone kept elsewhere can observe or
/// flush what the holder stored.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    name: String,
    slot: Arc<RwLock<Option<ClassRegistry>>>,
}

impl MemoryCache {
    /// Create an empty memory cache.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Check whether a registry is currently stored.
    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl RegistryCache for MemoryCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Result<Option<ClassRegistry>> {
        Ok(self.slot.read().clone())
    }

    fn set(&self, registry: &ClassRegistry) -> Result<()> {
        *self.slot.write() = Some(registry.clone());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        self.slot.write().take();
        Ok(())
    }
}

/// Cache persisted as a JSON file named after the cache.
#[derive(Debug, Clone)]
pub struct FileCache {
    name: String,
    path: PathBuf,
}

impl FileCache {
    /// Create a file cache storing `<dir>/<name>.json`.
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = dir.as_ref().join(format!("{}.json", name));
        Self { name, path }
    }

    /// Path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write through a temporary file in the same directory, then rename.
    fn write_atomic(&self, contents: &[u8]) -> Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        let temp_path = parent.join(format!(".{}.json.tmp.{}", self.name, std::process::id()));
        fs::write(&temp_path, contents).map_err(|e| Error::io(&temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            fs::remove_file(&temp_path).ok();
            return Err(Error::io(&self.path, e));
        }
        Ok(())
    }
}

impl RegistryCache for FileCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Result<Option<ClassRegistry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| Error::cache_decode(&self.name, e))
    }

    fn set(&self, registry: &ClassRegistry) -> Result<()> {
        let contents = serde_json::to_vec(registry).map_err(Error::CacheEncode)?;
        self.write_atomic(&contents)
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }
}

/// A cache that never stores anything. Every lookup rebuilds.
#[derive(Debug, Clone, Default)]
pub struct NoCache {
    name: String,
}

impl NoCache {
    /// Create a no-op cache.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RegistryCache for NoCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self) -> Result<Option<ClassRegistry>> {
        Ok(None)
    }

    fn set(&self, _registry: &ClassRegistry) -> Result<()> {
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        Ok(())
    }
}
