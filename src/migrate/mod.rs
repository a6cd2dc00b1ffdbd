//! Migration deduplication.
//!
//! A migration is a directory `<stableTimestamp>_create_<tableName>` under the migrations root. Its existence
//! on disk is the only record that it was generated; nothing else is persisted between runs.
//!
//! Existence is decided by substring: any directory whose name contains `_create_<tableName>` counts, whatever
//! its timestamp. This keeps a hand-renamed or older migration from being duplicated, but a table whose name is
//! a suffix-extension of another (`order` vs `order_item`) is matched by the shorter one. See the
//! `substring_match` tests.

pub mod sync;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use sync::{DieselCli, SchemaSync, SyncOutcome};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("cannot list migrations in '{path}': {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Migration directories of one output tree.
#[derive(Debug, Clone)]
pub struct MigrationRegistry {
    root: PathBuf,
}

impl MigrationRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name of an entity's migration.
    pub fn record_name(timestamp: &str, table: &str) -> String {
        format!("{timestamp}_create_{table}")
    }

    /// Full path of an entity's migration directory.
    pub fn record_path(&self, timestamp: &str, table: &str) -> PathBuf {
        self.root.join(Self::record_name(timestamp, table))
    }

    /// `false` when any existing migration directory already creates `table`.
    ///
    /// A missing migrations root means nothing was generated yet.
    pub fn should_create(&self, table: &str) -> Result<bool, MigrationError> {
        let needle = format!("_create_{table}");
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(true),
            Err(source) => {
                return Err(MigrationError::List {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        for entry in entries {
            let entry = entry.map_err(|source| MigrationError::List {
                path: self.root.clone(),
                source,
            })?;
            let is_dir = entry.file_type().is_ok_and(|ty| ty.is_dir());
            if is_dir && entry.file_name().to_string_lossy().contains(&needle) {
                tracing::info!(
                    table,
                    existing = %entry.file_name().to_string_lossy(),
                    "migration already exists, skipping"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
