//! Errors raised while reading model resources.
//!
//! These never escape [`ModelStore::load`](crate::model::ModelStore::load):
//! every table is loaded on its own and a failure degrades that table to
//! empty. The type exists so each scoped load can report exactly what went
//! wrong before it is logged and swallowed.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model resource not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed model data in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Missing resources are expected on minimal installs; everything else
    /// points at broken data.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}
