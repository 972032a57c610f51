use thiserror::Error;

/// Errors from the external object storage gateway.
///
/// These surface as upstream failures: uploads are propagated to the caller
/// after compensation, while deletes are best-effort and only ever logged.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed for '{url}': {reason}")]
    Delete { url: String, reason: String },

    #[error("Object storage unavailable: {0}")]
    Unavailable(String),
}
