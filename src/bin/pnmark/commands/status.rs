use crate::error::Result;
use crate::Context;
use pnmark::media::ffmpeg_available;
use rsa::traits::PublicKeyParts;

/// Internal helper function.
pub fn run(ctx: &Context) -> Result<()> {
    ctx.out
        .info_user(format!("pnmark {}", env!("CARGO_PKG_VERSION")));
    ctx.out
        .info_user(format!("config: {}", ctx.config_path.display()));
    ctx.out
        .info_user(format!("key dir: {}", ctx.key_dir.display()));

    let store = ctx.key_store();
    if store.exists() {
        let public_key = store.load_public()?;
        ctx.out.info_user(format!(
            "key: configured ({} bit, fingerprint {})",
            public_key.size() * 8,
            store.fingerprint()?
        ));
    } else {
        ctx.out.warn_user("key: not configured (run `pnmark keygen`)");
    }

    ctx.out.info_user(format!(
        "header sidecar: {}",
        if ctx.settings.write_header { "on" } else { "off" }
    ));
    if ffmpeg_available(ctx.settings.ffmpeg.as_deref()) {
        ctx.out.info_user("ffmpeg: available");
    } else {
        ctx.out.warn_diag("ffmpeg: not found");
        ctx.out.info_user("ffmpeg: not found (convert unavailable)");
    }
    Ok(())
}
