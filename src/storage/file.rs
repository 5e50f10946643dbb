// SPDX-License-Identifier: MPL-2.0
//! File-backed storage using CBOR format.
//!
//! All slots live in a single `local_storage.cbor` file inside the
//! application data directory. The file is read once when the storage is
//! opened and rewritten in full on every `set_item`. Writes go to a sibling
//! `.tmp` file that is then renamed over the target, so an interrupted write
//! leaves the previous contents intact.
//!
//! # Path Resolution
//!
//! 1. Explicit base directory passed to [`FileStorage::open_in`]
//! 2. `METRICS_VIEW_DATA_DIR` environment variable
//! 3. Platform-specific data directory

use super::Storage;
use crate::error::{Error, Result};
use crate::paths;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Storage file name within the app data directory.
pub const STORAGE_FILE: &str = "local_storage.cbor";

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    slots: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the storage file in the resolved data directory.
    ///
    /// Returns `None` when no data directory can be determined, which callers
    /// treat as "storage unavailable". The optional second value is a
    /// warning key describing why existing contents were discarded.
    pub fn open_in(base_dir: Option<PathBuf>) -> Option<(Self, Option<String>)> {
        let mut path = paths::get_app_data_dir_with_override(base_dir)?;
        path.push(STORAGE_FILE);
        Some(Self::open(path))
    }

    /// Opens (or lazily creates) a storage file at an explicit path.
    ///
    /// A missing file opens empty without warning. An unreadable or corrupt
    /// file opens empty with a warning; it is replaced on the next write.
    pub fn open(path: PathBuf) -> (Self, Option<String>) {
        let (slots, warning) = match read_slots(&path) {
            Ok(slots) => (slots, None),
            Err(warning) => {
                log::warn!(
                    "Discarding unreadable storage file {}: {}",
                    path.display(),
                    warning
                );
                (BTreeMap::new(), Some(warning))
            }
        };

        (
            Self {
                path,
                slots: RefCell::new(slots),
            },
            warning,
        )
    }

    fn flush(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        let mut encoded = Vec::new();
        ciborium::into_writer(slots, &mut encoded)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = temp_path_for(&self.path);
        fs::write(&temp_path, &encoded)?;

        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_slots(path: &Path) -> std::result::Result<BTreeMap<String, String>, String> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let file = fs::File::open(path).map_err(|_| "notification-storage-read-error".to_string())?;
    ciborium::from_reader(BufReader::new(file))
        .map_err(|_| "notification-storage-parse-error".to_string())
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut next = self.slots.borrow().clone();
        next.insert(key.to_string(), value.to_string());

        // Only commit in memory once the file reflects the write.
        self.flush(&next)
            .map_err(|err| Error::Storage(format!("{} ({})", err, self.path.display())))?;
        *self.slots.borrow_mut() = next;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.slots.borrow().keys().cloned().collect()
    }
}
