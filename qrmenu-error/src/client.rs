use crate::{asset::AssetError, storage::StorageError};
use thiserror::Error;

/// Errors produced while saving or deleting a client record.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required form field is blank or the slug is malformed. No store call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An asset upload failed and the save was aborted before the row write.
    #[error("upload of `{path}` failed: {source}")]
    Upload {
        path: String,
        #[source]
        source: AssetError,
    },

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("schema serialization failed: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("client `{0}` not found")]
    NotFound(String),
}
