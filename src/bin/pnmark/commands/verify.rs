use crate::error::{CliError, Result};
use crate::output::Output;
use crate::util::{expand_inputs, extract_from, read_message};
use crate::Context;
use clap::Args;
use pnmark::app::AppError;
use pnmark::binder::{public_key_from_pem, verify_extracted};
use rsa::RsaPublicKey;
use std::path::{Path, PathBuf};

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Message the signature was made over.
    #[arg(long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// Read the message from a file.
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,

    /// Public key PEM (default: key directory).
    #[arg(long, value_name = "PATH")]
    pub public_key: Option<PathBuf>,

    /// Number of embedded symbols (default: read from the `.pnmk` header).
    #[arg(long)]
    pub length: Option<usize>,

    /// Marked audio files (supports glob).
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let message = read_message(args.message.as_ref(), args.message_file.as_ref())?;
    let public_key = load_public_key(ctx, args.public_key.as_deref())?;

    let mut failed = 0usize;
    for input in &inputs {
        match verify_one(ctx, input, args.length, &message, &public_key) {
            Ok(()) => ctx.out.info_user(format!(
                "[OK] {}: authentic, signature verified",
                input.display()
            )),
            Err(err) => {
                failed = failed.saturating_add(1);
                if matches!(err, CliError::Pnmark(pnmark::Error::SignatureMismatch)) {
                    Output::error_user(format!(
                        "{}: watermark mismatch, possible tampering detected",
                        input.display()
                    ));
                } else {
                    Output::error_user(format!("{}: {}", input.display(), err.user_message()));
                }
            }
        }
    }

    if failed > 0 {
        Err(CliError::TamperDetected(failed))
    } else {
        Ok(())
    }
}

/// Internal helper function.
fn verify_one(
    ctx: &Context,
    input: &Path,
    length: Option<usize>,
    message: &[u8],
    public_key: &RsaPublicKey,
) -> Result<()> {
    let extraction = extract_from(ctx, input, length)?;
    verify_extracted(&extraction.symbols, message, public_key)?;
    Ok(())
}

/// Internal helper function.
pub fn load_public_key(ctx: &Context, path: Option<&Path>) -> Result<RsaPublicKey> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::App(AppError::KeyNotFound(path.to_path_buf())));
            }
            let pem = std::fs::read_to_string(path)?;
            Ok(public_key_from_pem(&pem)?)
        }
        None => Ok(ctx.key_store().load_public()?),
    }
}
