//! 错误类型定义

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("PN sequence length must be greater than zero")]
    DivisionDomain,

    #[error("carrier too small: {needed} symbols need at least {needed} samples, got {available}")]
    InsufficientCapacity { needed: usize, available: usize },

    #[error("PN sequence length must be a multiple of 8, got {0}")]
    CodecLength(usize),

    #[error("signature verification failed: possible tampering")]
    SignatureMismatch,

    #[error("invalid symbol {value} at index {index} (expected +1 or -1)")]
    SymbolCorruption { index: usize, value: i32 },

    #[error("carrier sample count changed: header expects {expected}, got {actual}")]
    CarrierLengthMismatch { expected: u64, actual: u64 },

    #[error("invalid mark header: {0}")]
    HeaderMismatch(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("ffmpeg not found; install it or set `ffmpeg` in the config file")]
    ConverterNotFound,

    #[error("ffmpeg failed: {0}")]
    ConverterExec(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
