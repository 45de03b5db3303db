use crate::error::Result;
use crate::Context;
use clap::Args;
use pnmark::app::settings::validate_key_bits;

#[derive(Args)]
/// Internal struct.
pub struct CmdArgs {
    /// Key size in bits (default from config, 2048).
    #[arg(long)]
    pub bits: Option<usize>,

    /// Replace an existing key pair.
    #[arg(long)]
    pub force: bool,
}

/// Internal helper function.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let bits = args.bits.unwrap_or(ctx.settings.key_bits);
    validate_key_bits(bits)?;

    let store = ctx.key_store();
    ctx.out.info_diag(format!("generating {bits}-bit RSA key"));
    store.generate(bits, args.force)?;

    ctx.out.info_user(format!(
        "[OK] key pair written to {}",
        store.dir().display()
    ));
    ctx.out
        .info_user(format!("fingerprint: {}", store.fingerprint()?));
    ctx.out.info_user(format!(
        "signature length: {} bytes ({} symbols)",
        bits / 8,
        bits
    ));
    Ok(())
}
