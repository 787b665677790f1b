//! `coax-keytool`: check keyboard layouts and glyph encodings from a shell.
//!
//! # Usage
//!
//! ```text
//! coax-keytool [--config FILE] <COMMAND>
//!
//! Commands:
//!   decode  [--keymap FILE]    Decode scan codes read from stdin, one per line
//!   encode  [--errors POLICY] TEXT
//!                              Print the glyph bytes for TEXT as hex
//!   keymap  FILE               Validate a keymap file and summarize it
//! ```
//!
//! Output goes to stdout; logs go to stderr.  The log level comes from
//! `RUST_LOG` when set, else from `[tool] log_level` in the config file.
//!
//! # Example
//!
//! ```text
//! $ printf '0x70\n0x45\n0xf0\n' | coax-keytool decode --keymap keymaps/demo.toml
//! 0x0070  LeftShift  modifier  LEFT_SHIFT
//! 0x0045  UpperH     'H'       LEFT_SHIFT
//! 0x00f0  -          modifier  -
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coax_core::{ErrorPolicy, KeyboardDecoder, Keymap};
use coax_keytool::application::{decode_stream, encode_text, inspect_keymap};
use coax_keytool::infrastructure::config::{load_config, ToolConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "coax-keytool",
    about = "Decode keyboard scan codes and encode display glyphs for coax terminals",
    version
)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true, env = "COAX_KEYTOOL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode scan codes read from stdin, one per line.
    Decode {
        /// Keymap file; defaults to `[keyboard] keymap` from the config.
        #[arg(long)]
        keymap: Option<PathBuf>,
    },
    /// Print the glyph bytes for TEXT as hex.
    Encode {
        /// strict, replace or ignore; defaults to `[encoding] errors`.
        #[arg(long)]
        errors: Option<ErrorPolicy>,
        text: String,
    },
    /// Validate a keymap file and summarize it.
    Keymap { file: PathBuf },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    // Logs go to stderr so stdout stays machine readable.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.tool.log_level)),
        )
        .init();

    match cli.command {
        Command::Decode { keymap } => run_decode(keymap, &config),
        Command::Encode { errors, text } => run_encode(&text, errors, &config),
        Command::Keymap { file } => run_keymap(file),
    }
}

fn run_decode(keymap_path: Option<PathBuf>, config: &ToolConfig) -> anyhow::Result<()> {
    let keymap = keymap_path
        .or_else(|| config.keyboard.keymap.clone())
        .map(|path| {
            Keymap::load(&path).with_context(|| format!("failed to load keymap {}", path.display()))
        })
        .transpose()?;

    let mut decoder = KeyboardDecoder::try_new(keymap.as_ref())
        .context("pass --keymap or set [keyboard] keymap in the config file")?;
    info!("decoding with keymap '{}'", decoder.keymap().name());

    let summary =
        decode_stream::decode_stream(&mut decoder, io::stdin().lock(), io::stdout().lock())?;
    info!(
        "{} scan codes, {} modifier events, {} unmapped",
        summary.scan_codes, summary.modifier_events, summary.unmapped
    );
    Ok(())
}

fn run_encode(text: &str, errors: Option<ErrorPolicy>, config: &ToolConfig) -> anyhow::Result<()> {
    let policy = errors.unwrap_or(config.encoding.errors);
    let glyphs = encode_text::encode_text(text, policy, io::stdout().lock())
        .with_context(|| format!("cannot encode text under the {policy} policy"))?;
    info!("encoded {} glyphs", glyphs.len());
    Ok(())
}

fn run_keymap(file: PathBuf) -> anyhow::Result<()> {
    let keymap =
        Keymap::load(&file).with_context(|| format!("invalid keymap {}", file.display()))?;

    let report = inspect_keymap::inspect_keymap(&keymap);
    inspect_keymap::write_report(&report, io::stdout().lock())?;
    if !report.is_clean() {
        warn!("{} found {} problem(s)", file.display(), report.warnings.len());
    }
    Ok(())
}
