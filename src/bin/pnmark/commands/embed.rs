use crate::error::{CliError, Result};
use crate::util::{expand_inputs, load_buffer, read_message};
use crate::output::Output;
use crate::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pnmark::app::{default_output_path, remove_header, write_header};
use pnmark::binder::mark;
use pnmark::Receipt;
use rsa::RsaPrivateKey;
use std::path::{Path, PathBuf};

/// Internal constant.
const EMBED_PROGRESS_TEMPLATE: &str = "{prefix} [{bar:40}] {pos}/{len}";

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Message to sign.
    #[arg(long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// Read the message to sign from a file.
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,

    /// Output file path (single input only).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not write the `.pnmk` header next to the output.
    #[arg(long)]
    pub no_header: bool,

    /// Input files (supports glob).
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

#[derive(Default)]
/// Internal struct.
struct EmbedStats {
    /// Internal field.
    success: usize,
    /// Internal field.
    failed: usize,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    if args.output.is_some() && inputs.len() != 1 {
        return Err(CliError::Message(
            "--output can only be used with a single input".to_string(),
        ));
    }
    let message = read_message(args.message.as_ref(), args.message_file.as_ref())?;
    let key = ctx.key_store().load_private()?;
    let write_sidecar = ctx.settings.write_header && !args.no_header;

    let progress = build_progress(ctx, inputs.len())?;
    let mut stats = EmbedStats::default();

    for input in &inputs {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => default_output_path(input, &ctx.settings.output_suffix)?,
        };
        match embed_one(input, &output, &message, &key, write_sidecar) {
            Ok(receipt) => {
                stats.success = stats.success.saturating_add(1);
                report(
                    ctx,
                    progress.as_ref(),
                    format!(
                        "[OK] {} -> {} | symbols {} stride {}",
                        input.display(),
                        output.display(),
                        receipt.header.symbol_count,
                        receipt.header.stride
                    ),
                );
                if !write_sidecar {
                    ctx.out.warn_user(format!(
                        "{}: no header written; keep --length {} for extraction",
                        output.display(),
                        receipt.header.symbol_count
                    ));
                }
            }
            Err(err) => {
                stats.failed = stats.failed.saturating_add(1);
                report_error(
                    progress.as_ref(),
                    format!("[ERR] {}: {}", input.display(), err.user_message()),
                );
            }
        }
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    ctx.out.info_user(format!(
        "done: {} succeeded, {} failed",
        stats.success, stats.failed
    ));

    if stats.failed > 0 {
        Err(CliError::Message(format!(
            "{} file(s) failed to embed",
            stats.failed
        )))
    } else {
        Ok(())
    }
}

/// Internal helper function.
fn embed_one(
    input: &Path,
    output: &Path,
    message: &[u8],
    key: &RsaPrivateKey,
    write_sidecar: bool,
) -> Result<Receipt> {
    let mut buffer = load_buffer(input)?;
    let receipt = mark(&mut buffer, message, key)?;
    buffer.to_wav(output)?;
    if write_sidecar {
        write_header(output, &receipt.header)?;
    } else {
        remove_header(output)?;
    }
    Ok(receipt)
}

/// Internal helper function.
fn build_progress(ctx: &Context, len: usize) -> Result<Option<ProgressBar>> {
    if ctx.out.quiet() || len < 2 {
        return Ok(None);
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template(EMBED_PROGRESS_TEMPLATE)
            .map_err(|e| CliError::Message(e.to_string()))?
            .progress_chars("=>-"),
    );
    bar.set_prefix("embed");
    Ok(Some(bar))
}

/// Internal helper function.
fn report(ctx: &Context, progress: Option<&ProgressBar>, line: String) {
    match progress {
        Some(bar) => bar.println(line),
        None => ctx.out.info_user(line),
    }
}

/// Internal helper function.
fn report_error(progress: Option<&ProgressBar>, line: String) {
    match progress {
        Some(bar) => bar.println(line),
        None => Output::error_user(line),
    }
}
