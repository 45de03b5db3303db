use crate::error::Result;
use crate::util::load_buffer;
use crate::Context;
use clap::Args;
use pnmark::binder::sign_audio;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Signature output path (default: `<INPUT>.sig`).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Audio file to seal.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let buffer = load_buffer(&args.input)?;
    let key = ctx.key_store().load_private()?;
    let signature = sign_audio(&buffer, &key)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_signature_path(&args.input));
    std::fs::write(&output, hex::encode(&signature))?;
    ctx.out.info_user(format!(
        "[OK] {} sealed -> {}",
        args.input.display(),
        output.display()
    ));
    Ok(())
}

/// Internal helper function.
pub fn default_signature_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".sig");
    PathBuf::from(name)
}
