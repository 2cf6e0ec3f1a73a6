use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

pub const OVERRIDE_KEY_PREFIX: &str = "ShouldAutoget:";
pub const CONFIRMATION_SHOWN_KEY: &str = "Metadata:InfoboxWasShown";
pub const DISABLED_VALUE: &str = "No";
pub const CONFIRMATION_SHOWN_VALUE: &str = "Yes";

pub fn override_key(blueprint: &str) -> String {
    format!("{OVERRIDE_KEY_PREFIX}{blueprint}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideDecision {
    Disabled,
    NoOverride,
}

impl OverrideDecision {
    /// Anything other than a case-insensitive "No" means no override.
    pub fn from_stored(value: &str) -> Self {
        if value.eq_ignore_ascii_case(DISABLED_VALUE) {
            Self::Disabled
        } else {
            Self::NoOverride
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushMode {
    Immediate,
    Deferred,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write override store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode override store {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
enum StoreReadState {
    Missing,
    Unreadable(String),
    Present(BTreeMap<String, String>),
}

/// Flat key/value bag holding per-blueprint overrides and metadata flags.
#[derive(Debug, Default)]
pub struct OverrideStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl OverrideStore {
    /// Loads every entry from `path`. A missing or corrupt file starts the
    /// store empty; later flushes recreate it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_store_file(&path) {
            StoreReadState::Present(entries) => {
                info!(
                    path = %path.display(),
                    entry_count = entries.len(),
                    "override_store_loaded"
                );
                entries
            }
            StoreReadState::Missing => {
                debug!(path = %path.display(), "override_store_missing_starting_empty");
                BTreeMap::new()
            }
            StoreReadState::Unreadable(reason) => {
                warn!(
                    path = %path.display(),
                    reason = %reason,
                    "override_store_unreadable_starting_empty"
                );
                BTreeMap::new()
            }
        };
        Self {
            path: Some(path),
            entries,
            dirty: false,
        }
    }

    /// Store with no backing file; flushes only clear the dirty flag.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str, default: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        mode: FlushMode,
    ) -> Result<(), StoreError> {
        self.entries.insert(key.into(), value.into());
        self.dirty = true;
        match mode {
            FlushMode::Immediate => self.flush(),
            FlushMode::Deferred => Ok(()),
        }
    }

    /// Removes `key` from memory only. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn flush(&mut self) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            self.dirty = false;
            return Ok(());
        };
        let text =
            serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        persist_atomic(path, &text).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            entry_count = self.entries.len(),
            "override_store_flushed"
        );
        self.dirty = false;
        Ok(())
    }

    pub fn override_for(&self, blueprint: &str) -> OverrideDecision {
        self.entries
            .get(&override_key(blueprint))
            .map_or(OverrideDecision::NoOverride, |value| {
                OverrideDecision::from_stored(value)
            })
    }

    pub fn confirmation_shown(&self) -> bool {
        self.entries
            .get(CONFIRMATION_SHOWN_KEY)
            .is_some_and(|value| value.eq_ignore_ascii_case(CONFIRMATION_SHOWN_VALUE))
    }

    /// Blueprints currently disabled, in key order.
    pub fn disabled_blueprints(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, value)| {
            let blueprint = key.strip_prefix(OVERRIDE_KEY_PREFIX)?;
            (OverrideDecision::from_stored(value) == OverrideDecision::Disabled)
                .then_some(blueprint)
        })
    }
}

fn read_store_file(path: &Path) -> StoreReadState {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return StoreReadState::Missing,
        Err(error) => return StoreReadState::Unreadable(error.to_string()),
    };
    match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(entries) => StoreReadState::Present(entries),
        Err(error) => StoreReadState::Unreadable(error.to_string()),
    }
}

fn persist_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path_for(path);
    fs::write(&staging, text)?;

    match fs::remove_file(path) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            let _ = fs::remove_file(&staging);
            return Err(error);
        }
    }
    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    Ok(())
}

fn staging_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("autoget_overrides");
    path.with_file_name(format!("{file_name}.tmp"))
}
