use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Message(String),

    #[error("key not found in {}", .0.display())]
    KeyNotFound(PathBuf),

    #[error("key pair already exists in {}", .0.display())]
    KeyExists(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Pnmark(#[from] crate::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
