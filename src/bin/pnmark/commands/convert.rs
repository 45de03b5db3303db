use crate::error::Result;
use crate::util::ensure_file;
use crate::Context;
use clap::Args;
use pnmark::media::{convert_with_ffmpeg, ConvertOptions};
use std::path::PathBuf;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Output channel count.
    #[arg(long, default_value_t = 1)]
    pub channels: u16,

    /// Output sample rate (Hz).
    #[arg(long, default_value_t = 8000)]
    pub sample_rate: u32,

    /// Source audio (any format ffmpeg can read).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output WAV path.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    ensure_file(&args.input)?;
    let options = ConvertOptions {
        channels: args.channels,
        sample_rate: args.sample_rate,
        binary: ctx.settings.ffmpeg.clone(),
    };
    convert_with_ffmpeg(&args.input, &args.output, &options)?;
    ctx.out.info_user(format!(
        "[OK] {} -> {} ({} ch, {} Hz, 16-bit PCM)",
        args.input.display(),
        args.output.display(),
        args.channels,
        args.sample_rate
    ));
    Ok(())
}
