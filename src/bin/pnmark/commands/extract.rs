use crate::error::Result;
use crate::output::Output;
use crate::util::extract_from;
use crate::Context;
use clap::Args;
use pnmark::codec::pn_to_signature;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Number of embedded symbols (default: read from the `.pnmk` header).
    #[arg(long)]
    pub length: Option<usize>,

    /// Print a JSON report.
    #[arg(long)]
    pub json: bool,

    /// Marked audio file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Serialize)]
/// Internal struct.
struct ExtractReport {
    /// Internal field.
    file: String,
    /// Internal field.
    symbols: usize,
    /// Internal field.
    stride: Option<u32>,
    /// Internal field.
    header: bool,
    /// Internal field.
    signature_hex: String,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let extraction = extract_from(ctx, &args.input, args.length)?;
    let signature = pn_to_signature(&extraction.symbols)?;
    let signature_hex = hex::encode(&signature);

    if args.json {
        let report = ExtractReport {
            file: args.input.display().to_string(),
            symbols: extraction.symbols.len(),
            stride: extraction.header.map(|h| h.stride),
            header: extraction.header.is_some(),
            signature_hex,
        };
        Output::result(serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    ctx.out.info_user(format!(
        "{}: {} symbols -> {} byte signature",
        args.input.display(),
        extraction.symbols.len(),
        signature.len()
    ));
    Output::result(signature_hex);
    Ok(())
}
