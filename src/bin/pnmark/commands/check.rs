use crate::commands::seal::default_signature_path;
use crate::commands::verify::load_public_key;
use crate::error::{CliError, Result};
use crate::output::Output;
use crate::util::{ensure_file, load_buffer};
use crate::Context;
use clap::Args;
use pnmark::binder::verify_audio;
use std::path::PathBuf;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Signature file (default: `<INPUT>.sig`).
    #[arg(long, value_name = "PATH")]
    pub signature: Option<PathBuf>,

    /// Public key PEM (default: key directory).
    #[arg(long, value_name = "PATH")]
    pub public_key: Option<PathBuf>,

    /// Audio file to check.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let buffer = load_buffer(&args.input)?;
    let public_key = load_public_key(ctx, args.public_key.as_deref())?;

    let signature_path = args
        .signature
        .clone()
        .unwrap_or_else(|| default_signature_path(&args.input));
    ensure_file(&signature_path)?;
    let signature = hex::decode(std::fs::read_to_string(&signature_path)?.trim())?;

    match verify_audio(&buffer, &signature, &public_key) {
        Ok(()) => {
            ctx.out.info_user(format!(
                "[OK] {}: audio is authentic, no tampering detected",
                args.input.display()
            ));
            Ok(())
        }
        Err(pnmark::Error::SignatureMismatch) => {
            Output::error_user(format!(
                "{}: audio hash mismatch, possible tampering detected",
                args.input.display()
            ));
            Err(CliError::TamperDetected(1))
        }
        Err(err) => Err(err.into()),
    }
}
