//! Whole-document JSON storage.
//!
//! Each service keeps a single JSON document on disk. The document is read
//! once when the store is opened and rewritten in full after every mutation:
//!
//! ```text
//! <DATA_DIR>/
//!   quotemaster/
//!     quotes.json
//!   myplanner/
//!     data.json
//! ```
//!
//! When the file does not exist yet, the bundled default document is written
//! in its place. There is no locking: two processes writing the same file
//! race and the last writer wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Bundled default quote document.
pub const QUOTES_DEFAULT_JSON: &str = include_str!("../defaults/quotes-default.json");

/// Bundled default planner document.
pub const PLANNER_DEFAULT_JSON: &str = include_str!("../defaults/planner-default.json");

/// File-backed store for one JSON document of type `T`.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    default_json: &'static str,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the store at `path` and loads its document.
    ///
    /// If the file doesn't exist, the default document is parsed and
    /// written to `path` before being returned.
    pub fn open(
        path: impl Into<PathBuf>,
        default_json: &'static str,
    ) -> Result<(Self, T), StoreError> {
        let store = Self {
            path: path.into(),
            default_json,
            _doc: PhantomData,
        };

        let doc = match store.load()? {
            Some(doc) => {
                tracing::debug!("Loaded document {}", store.path.display());
                doc
            }
            None => {
                tracing::info!(
                    "No document at {}, initialising from default",
                    store.path.display()
                );
                let doc = store.default_document()?;
                store.save(&doc)?;
                doc
            }
        };

        Ok((store, doc))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a fresh copy of the bundled default document.
    pub fn default_document(&self) -> Result<T, StoreError> {
        serde_json::from_str(self.default_json).map_err(StoreError::Default)
    }

    /// Reads the document from disk.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    fn load(&self) -> Result<Option<T>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let doc = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Parse(self.path.clone(), e))?;
                Ok(Some(doc))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(self.path.clone(), e)),
        }
    }

    /// Writes the whole document to disk.
    ///
    /// The document is written to a temp file next to the target and then
    /// renamed over it, so a failed write leaves the previous file intact.
    pub fn save(&self, doc: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
        }

        let bytes =
            serde_json::to_vec(doc).map_err(|e| StoreError::Encode(self.path.clone(), e))?;

        let temp_path = self.path.with_extension("json.tmp");

        {
            let mut file =
                File::create(&temp_path).map_err(|e| StoreError::Io(temp_path.clone(), e))?;

            file.write_all(&bytes)
                .map_err(|e| StoreError::Io(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StoreError::Io(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Io(self.path.clone(), e))?;

        tracing::debug!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
