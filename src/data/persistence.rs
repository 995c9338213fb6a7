use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An entity stored wholesale under one key of the local store.
pub trait Persistable: Sized + Default + Serialize + DeserializeOwned {
    fn key() -> &'static str;

    fn is_json() -> bool {
        true
    }

    fn filename() -> String {
        if Self::is_json() {
            format!("{}.json", Self::key())
        } else {
            format!("{}.yaml", Self::key())
        }
    }
}

/// File-backed key-value store: one file per key inside `dir`.
///
/// Every write replaces the whole file. There is no locking; the last writer wins.
#[derive(Clone, Debug)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of<T: Persistable>(&self) -> PathBuf {
        self.dir.join(T::filename())
    }

    fn scalar_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Returns true when the directory does not exist or contains no files.
    pub fn needs_init(&self) -> bool {
        if !self.dir.exists() {
            return true;
        }
        self.dir
            .read_dir()
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
    }

    /// Loads `T`, returning its default when the key has never been written.
    /// A malformed file is an error.
    pub fn try_load<T: Persistable>(&self) -> Result<T> {
        let path = self.path_of::<T>();
        if !path.exists() {
            debug!(key = T::key(), "key not present, using default");
            return Ok(T::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if T::is_json() {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display()))
        } else {
            serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display()))
        }
    }

    /// Loads `T`, degrading to its default when the file is unreadable or malformed.
    pub fn load<T: Persistable>(&self) -> T {
        match self.try_load::<T>() {
            Ok(value) => value,
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(key = T::key(), error = %reason, "discarding unreadable stored value");
                T::default()
            }
        }
    }

    pub fn save<T: Persistable>(&self, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create dir {}", self.dir.display()))?;
        let path = self.path_of::<T>();
        let contents = if T::is_json() {
            serde_json::to_string_pretty(value).context("failed to serialize JSON")?
        } else {
            serde_norway::to_string(value).context("failed to serialize YAML")?
        };
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(key = T::key(), "saved");
        Ok(())
    }

    /// Deletes the file behind `T`'s key. Missing keys are not an error.
    pub fn remove<T: Persistable>(&self) -> Result<()> {
        remove_if_exists(&self.path_of::<T>())
    }

    /// Reads a JSON-encoded scalar string key such as `token`.
    pub fn load_scalar(&self, key: &str) -> Option<String> {
        let path = self.scalar_path(key);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<String>(&contents) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) => {
                warn!(key, error = %err, "discarding unreadable stored value");
                None
            }
        }
    }

    pub fn save_scalar(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create dir {}", self.dir.display()))?;
        let path = self.scalar_path(key);
        let contents = serde_json::to_string(value).context("failed to serialize JSON")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn remove_scalar(&self, key: &str) -> Result<()> {
        remove_if_exists(&self.scalar_path(key))
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
    }
}
