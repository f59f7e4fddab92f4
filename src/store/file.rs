// ABOUTME: YAML state file that persists a MemoryStore between CLI invocations.
// ABOUTME: A lock file plus a generation counter detect concurrent writers on save.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use super::error::{IoSnafu, ParseSnafu, StoreError};
use super::memory::{MemoryStore, Snapshot};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    generation: u64,
    #[serde(flatten)]
    snapshot: Snapshot,
}

/// Handle to a state file loaded at a known generation.
#[derive(Debug)]
pub struct StateFile {
    path: PathBuf,
    generation: u64,
}

impl StateFile {
    /// Load the state file into a fresh store.
    ///
    /// A missing file yields an empty store at generation 0.
    pub fn load(path: &Path) -> Result<(Self, MemoryStore), StoreError> {
        let document = read_document(path)?;
        tracing::debug!(
            "Loaded state file {} at generation {}",
            path.display(),
            document.generation
        );

        let state = StateFile {
            path: path.to_path_buf(),
            generation: document.generation,
        };
        Ok((state, MemoryStore::from_snapshot(document.snapshot)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Write the store back, failing if another process saved in between.
    ///
    /// The generation check and the replace happen while holding an
    /// exclusive lock file beside the state file.
    pub fn save(&mut self, store: &MemoryStore) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).context(IoSnafu { path: &parent })?;

        let _lock = SaveLock::acquire(&self.path)?;

        let on_disk = read_document(&self.path)?.generation;
        if on_disk != self.generation {
            return Err(StoreError::StaleState {
                path: self.path.clone(),
            });
        }

        let document = StateDocument {
            generation: self.generation + 1,
            snapshot: store.snapshot(),
        };
        let yaml = serde_yaml::to_string(&document).context(ParseSnafu {
            path: self.path.clone(),
        })?;

        // Write beside the target and rename so readers never see a partial file.
        let mut tmp =
            tempfile::NamedTempFile::new_in(&parent).context(IoSnafu { path: &parent })?;
        tmp.write_all(yaml.as_bytes())
            .context(IoSnafu { path: tmp.path() })?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;

        self.generation = document.generation;
        tracing::debug!(
            "Saved state file {} at generation {}",
            self.path.display(),
            self.generation
        );
        Ok(())
    }
}

/// Exclusive lock held for the duration of a save. Removed on drop.
#[derive(Debug)]
struct SaveLock {
    path: PathBuf,
}

impl SaveLock {
    fn acquire(state: &Path) -> Result<Self, StoreError> {
        let path = lock_path(state);

        // create_new fails if the file exists, so only one process gets here.
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::Locked {
                    path: state.to_path_buf(),
                    lock: path,
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let lock = SaveLock { path };

        let holder = gethostname::gethostname();
        writeln!(file, "{} {}", holder.to_string_lossy(), std::process::id())
            .context(IoSnafu { path: &lock.path })?;

        tracing::debug!("Acquired {}", lock.path.display());
        Ok(lock)
    }
}

impl Drop for SaveLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

fn lock_path(state: &Path) -> PathBuf {
    let mut name = OsString::from(state.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

fn read_document(path: &Path) -> Result<StateDocument, StoreError> {
    if !path.exists() {
        return Ok(StateDocument::default());
    }
    let content = std::fs::read_to_string(path).context(IoSnafu { path })?;
    if content.trim().is_empty() {
        return Ok(StateDocument::default());
    }
    serde_yaml::from_str(&content).context(ParseSnafu { path })
}
