//! Saved-filter storage with XDG path support.
//!
//! Named filters are stored as a pretty-printed JSON array at
//! `~/.local/share/gamedex/filters.json` (platform equivalents elsewhere).

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Utc;
use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::filter::FilterError;
use crate::named::NamedFilter;

/// Default store filename.
const FILTERS_FILENAME: &str = "filters.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "gamedex";

/// Errors that can occur during filter storage operations.
#[derive(Debug, Error)]
pub enum FilterStoreError {
    /// Failed to determine XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read filter file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write filter file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Attempted to persist a filter without an id.
    #[error("cannot save an anonymous filter")]
    AnonymousFilter,

    /// Attempted to persist a filter the decoder would reject.
    #[error("cannot save filter '{id}': {source}")]
    InvalidFilter {
        /// The id of the rejected filter.
        id: String,
        /// Why the filter is invalid.
        #[source]
        source: FilterError,
    },
}

/// Result type for filter store operations.
pub type Result<T> = std::result::Result<T, FilterStoreError>;

/// Persistent storage for saved filters.
///
/// # Example
///
/// ```no_run
/// use gamedex_filter::filter::Filter;
/// use gamedex_filter::{FilterStore, NamedFilter};
///
/// let store = FilterStore::new()?;
/// store.upsert(NamedFilter::new("undated", Filter::NullReleaseDate))?;
///
/// let saved = store.get("undated")?;
/// assert!(saved.is_some());
/// # Ok::<(), gamedex_filter::FilterStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilterStore {
    /// Path to the filters file.
    path: PathBuf,
}

impl FilterStore {
    /// Creates a new `FilterStore` with the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `FilterStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `FilterStore` with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG data path for the filters file.
    ///
    /// On Unix: `~/.local/share/gamedex/filters.json`
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(FilterStoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(FILTERS_FILENAME))
    }

    /// Returns the path to the filters file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads all saved filters. A missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// - Returns `FilterStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `FilterStoreError::Json` if the file is invalid, including
    ///   filters that fail to decode.
    pub fn load(&self) -> Result<Vec<NamedFilter>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "filter file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(FilterStoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let filters: Vec<NamedFilter> = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = filters.len(), "loaded filters");
        Ok(filters)
    }

    /// Saves all filters atomically, replacing the file.
    ///
    /// # Errors
    ///
    /// - Returns `FilterStoreError::AnonymousFilter` if any filter has an empty id.
    /// - Returns `FilterStoreError::InvalidFilter` if any filter holds an empty
    ///   `And`/`Or`.
    /// - Returns `FilterStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `FilterStoreError::WriteError` if the file cannot be written.
    pub fn save(&self, filters: &[NamedFilter]) -> Result<()> {
        for named in filters {
            check_savable(named)?;
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FilterStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(filters)?;

        // Write to a sibling temp file, then rename over the target
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| FilterStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(FilterStoreError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }

        debug!(path = %self.path.display(), count = filters.len(), "saved filters");
        Ok(())
    }

    /// Returns the saved filter with the given id.
    pub fn get(&self, id: &str) -> Result<Option<NamedFilter>> {
        Ok(self.load()?.into_iter().find(|f| f.id == id))
    }

    /// Inserts a filter, or replaces the one with the same id.
    ///
    /// When replacing, the stored `created_at` is kept and `updated_at` is set
    /// to now. Returns the stored value.
    pub fn upsert(&self, named: NamedFilter) -> Result<NamedFilter> {
        check_savable(&named)?;

        let mut filters = self.load()?;
        let stored = match filters.iter_mut().find(|f| f.id == named.id) {
            Some(existing) => {
                let replaced = NamedFilter {
                    created_at: existing.created_at,
                    updated_at: Utc::now().max(existing.updated_at),
                    ..named
                };
                *existing = replaced.clone();
                replaced
            }
            None => {
                filters.push(named.clone());
                named
            }
        };

        self.save(&filters)?;
        Ok(stored)
    }

    /// Removes the filter with the given id. Returns true if one was removed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut filters = self.load()?;
        let before = filters.len();
        filters.retain(|f| f.id != id);
        if filters.len() == before {
            return Ok(false);
        }
        self.save(&filters)?;
        Ok(true)
    }
}

fn check_savable(named: &NamedFilter) -> Result<()> {
    if named.is_anonymous() {
        return Err(FilterStoreError::AnonymousFilter);
    }
    named
        .filter
        .validate()
        .map_err(|source| FilterStoreError::InvalidFilter {
            id: named.id.clone(),
            source,
        })
}
