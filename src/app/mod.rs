pub mod error;
pub mod keystore;
pub mod settings;
pub mod sidecar;

pub use error::{AppError, Result};
pub use keystore::KeyStore;
pub use settings::{default_output_path, Settings};
pub use sidecar::{read_header, remove_header, sidecar_path, write_header};
