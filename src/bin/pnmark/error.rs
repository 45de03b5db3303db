use pnmark::app::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
/// Internal enum.
pub enum CliError {
    #[error("{0}")]
    /// Internal variant.
    Message(String),

    #[error("input not found: {0}")]
    /// Internal variant.
    InputNotFound(String),

    #[error("invalid glob pattern: {0}")]
    /// Internal variant.
    InvalidGlob(String),

    #[error("glob error: {0}")]
    /// Internal variant.
    Glob(String),

    #[error("no mark header for {0}; pass --length")]
    /// Internal variant.
    LengthRequired(String),

    #[error("{0} file(s) failed verification")]
    /// Internal variant.
    TamperDetected(usize),

    #[error(transparent)]
    /// Internal variant.
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// Internal variant.
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    /// Internal variant.
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    /// Internal variant.
    Pnmark(#[from] pnmark::Error),

    #[error(transparent)]
    /// Internal variant.
    App(#[from] AppError),
}

/// Internal type alias.
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Internal helper method.
    pub fn user_message(&self) -> String {
        match self {
            Self::App(AppError::KeyNotFound(dir)) => format!(
                "key not found in {}; run `pnmark keygen` or pass --key-dir",
                dir.display()
            ),
            Self::App(AppError::KeyExists(dir)) => format!(
                "key pair already exists in {}; use --force to replace it",
                dir.display()
            ),
            Self::App(AppError::Pnmark(err)) | Self::Pnmark(err) => library_message(err),
            Self::TamperDetected(count) => format!(
                "{count} file(s) failed verification: possible tampering detected"
            ),
            other => other.to_string(),
        }
    }
}

/// Internal helper function.
fn library_message(err: &pnmark::Error) -> String {
    match err {
        pnmark::Error::SignatureMismatch => {
            "signature mismatch: possible tampering detected".to_string()
        }
        pnmark::Error::InsufficientCapacity { needed, available } => format!(
            "audio too short: {needed} symbols need at least {needed} samples, got {available}"
        ),
        pnmark::Error::CarrierLengthMismatch { expected, actual } => format!(
            "carrier was modified or re-encoded: expected {expected} samples, got {actual}"
        ),
        other => other.to_string(),
    }
}
