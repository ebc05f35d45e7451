//! Error types for session operations.

use thiserror::Error;

/// Errors that can occur during session operations.
///
/// Everything here is scoped to the operation that raised it; the session
/// stays usable for the next action. Locally recoverable conditions such as
/// an out-of-range index are logged and skipped instead of raised.
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O error during a directory scan or record/vocabulary access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An operation that persists annotations was invoked before a save
    /// directory was selected
    #[error("no save directory selected")]
    SaveDirectoryNotSet,

    /// An operation that needs an active image was invoked with nothing
    /// selected
    #[error("no image selected")]
    NoImageSelected,
}
