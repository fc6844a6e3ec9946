use thiserror::Error;

/// Failure talking to the meeting-data backend. Always transient from the
/// operator's point of view: the action can simply be retried.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend rejected the credentials")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;
