use std::io;
use std::path::{Path, PathBuf};

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The collection argument was empty.
    #[error("missing collection - no place to save or read records")]
    MissingCollection,

    /// The record id / resource argument was empty.
    #[error("missing resource - unable to address a record without a name")]
    MissingResource,

    /// A collection or record name that would address a path outside its
    /// parent directory (absolute, `..`, or `.` segments).
    #[error("invalid name {name:?} - names must stay inside the database root")]
    InvalidName { name: String },

    /// The collection directory does not exist.
    #[error("unable to find collection: {}", .path.display())]
    CollectionNotFound { path: PathBuf },

    /// Neither the exact path nor the path with the record extension exists.
    #[error("unable to find resource: {}", .path.display())]
    RecordNotFound { path: PathBuf },

    /// A value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A value encoded to something other than a top-level object.
    #[error("value is not a mapping of named fields (encoded as {found})")]
    NotAMapping { found: &'static str },

    /// Stored content is malformed or does not fit the requested shape.
    #[error("error decoding {}: {reason}", .path.display())]
    Deserialization { path: PathBuf, reason: String },

    /// Filesystem failure.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Caller misuse: an empty or out-of-bounds collection or resource name.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCollection | Self::MissingResource | Self::InvalidName { .. }
        )
    }

    /// The addressed collection or record is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CollectionNotFound { .. } | Self::RecordNotFound { .. }
        )
    }

    /// Encoding or decoding failed.
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_) | Self::NotAMapping { .. } | Self::Deserialization { .. }
        )
    }

    /// The filesystem reported an error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
