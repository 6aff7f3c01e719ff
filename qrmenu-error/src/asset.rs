use thiserror::Error;

/// Failures raised by an asset (blob) store backend.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Path is empty, absolute or escapes the bucket.
    #[error("invalid asset path: `{0}`")]
    InvalidPath(String),

    /// Another upload claimed the same timestamped path first.
    #[error("asset `{0}` already exists, retry the upload")]
    AlreadyExists(String),

    #[error("asset io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("asset http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote object store answered with a non-success status.
    #[error("object store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}
