use thiserror::Error;

/// Error type for application context initialization
#[derive(Error, Debug)]
pub enum InitContextError {
    /// A required component was requested before it was initialized
    #[error("component not initialized: {0}")]
    NotInitialized(String),
    /// Returned when a primitive error occurs
    #[error("primitive error: {0}")]
    Primitive(String),
}
