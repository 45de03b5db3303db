//! `PNMark` CLI.

#[cfg(feature = "cli")]
fn main() {
    if let Err(err) = run() {
        output::Output::error_user(err.user_message());
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pnmark CLI not enabled. Build with: cargo build --features cli --bin pnmark");
    std::process::exit(1);
}

#[cfg(feature = "cli")]
/// Internal module.
mod commands;
#[cfg(feature = "cli")]
/// Internal module.
mod error;
#[cfg(feature = "cli")]
/// Internal module.
mod output;
#[cfg(feature = "cli")]
/// Internal module.
mod util;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use error::{CliError, Result};
#[cfg(feature = "cli")]
use output::Output;
#[cfg(feature = "cli")]
use pnmark::app::{settings, KeyStore, Settings};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pnmark")]
#[command(about = "PCM audio provenance marker CLI", version)]
#[command(arg_required_else_help = true)]
/// Internal struct.
struct Cli {
    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (only errors).
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: ~/.pnmark/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Key directory (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    key_dir: Option<PathBuf>,

    #[command(subcommand)]
    /// Internal field.
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
/// Internal enum.
enum Commands {
    /// Generate an RSA key pair.
    Keygen(commands::keygen::CmdArgs),

    /// Sign a message and embed the signature into audio files.
    Embed(commands::embed::CmdArgs),

    /// Extract the embedded signature.
    Extract(commands::extract::CmdArgs),

    /// Extract and verify the embedded signature against a message.
    Verify(commands::verify::CmdArgs),

    /// Print the audio hash (SHA-256 over the low 16 bits of each sample).
    Hash(commands::hash::CmdArgs),

    /// Sign the audio hash of an input.
    Seal(commands::seal::CmdArgs),

    /// Verify an audio hash signature.
    Check(commands::check::CmdArgs),

    /// Convert audio to embeddable PCM WAV with ffmpeg.
    Convert(commands::convert::CmdArgs),

    /// Show configuration and key status.
    Status,
}

#[cfg(feature = "cli")]
/// Internal struct.
struct Context {
    /// Internal field.
    out: Output,
    /// Internal field.
    settings: Settings,
    /// Internal field.
    config_path: PathBuf,
    /// Internal field.
    key_dir: PathBuf,
}

#[cfg(feature = "cli")]
impl Context {
    /// Internal helper method.
    fn key_store(&self) -> KeyStore {
        KeyStore::new(&self.key_dir)
    }
}

#[cfg(feature = "cli")]
/// Internal helper function.
fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet && cli.verbose {
        return Err(CliError::Message(
            "--quiet and --verbose cannot be used together".to_string(),
        ));
    }
    let out = Output::new(cli.quiet, cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => settings::config_path()?,
    };
    let settings = Settings::load_from(&config_path)?;
    let key_dir = match cli.key_dir {
        Some(dir) => dir,
        None => settings.key_dir()?,
    };
    out.info_diag(format!("config: {}", config_path.display()));
    out.info_diag(format!("key dir: {}", key_dir.display()));

    let ctx = Context {
        out,
        settings,
        config_path,
        key_dir,
    };

    match cli.command {
        Commands::Keygen(args) => commands::keygen::run(&ctx, &args),
        Commands::Embed(args) => commands::embed::run(&ctx, &args),
        Commands::Extract(args) => commands::extract::run(&ctx, &args),
        Commands::Verify(args) => commands::verify::run(&ctx, &args),
        Commands::Hash(args) => commands::hash::run(&ctx, &args),
        Commands::Seal(args) => commands::seal::run(&ctx, &args),
        Commands::Check(args) => commands::check::run(&ctx, &args),
        Commands::Convert(args) => commands::convert::run(&ctx, &args),
        Commands::Status => commands::status::run(&ctx),
    }
}
