use thiserror::Error;

/// Errors from the roster, form and file surfaces (the engine itself never fails)
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid signup: {0}")]
    InvalidSignup(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
