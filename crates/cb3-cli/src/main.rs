//! cb3: committing ChaCha20/BLAKE3 AEAD from the command line
//!
//! Commands:
//!   keygen          - print a fresh key for a variant
//!   nonce           - print a fresh nonce for a variant
//!   encrypt         - plaintext in (file/stdin), encoded payload out
//!   decrypt         - encoded payload in, plaintext out (file/stdout)
//!   config show     - display the effective configuration
//!
//! Keys, nonces and payloads are text in the configured encoding (hex or
//! base64). Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use cb3_core::config::LogFormat;
use cb3_core::{Cb3Config, Encoding};
use cb3_crypto::variant::Suite;
use cb3_crypto::{SivKeySchedule, Variant};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cb3",
    version,
    about = "Committing ChaCha20/BLAKE3 authenticated encryption",
    long_about = "cb3: encrypt and decrypt with ChaCha20-BLAKE3, XChaCha20-BLAKE3 and XChaCha20-BLAKE3-SIV"
)]
struct Cli {
    /// Path to config.toml (default: ~/.config/cb3/config.toml)
    #[arg(long, short = 'c', env = "CB3_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter directive (overrides logging.level; RUST_LOG wins over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: text or json (overrides logging.format)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Text encoding for keys, nonces and payloads (overrides encoding.format)
    #[arg(long, short = 'e', global = true)]
    encoding: Option<Encoding>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a random key
    Keygen {
        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Generate a random nonce (not used by xchacha20-blake3-siv)
    Nonce {
        #[command(flatten)]
        cipher: CipherArgs,
    },

    /// Encrypt a message into `ciphertext || tag`
    ///
    /// For the nonce-based variants a random nonce is generated when
    /// --nonce is omitted and printed to stderr.
    Encrypt {
        #[command(flatten)]
        cipher: CipherArgs,
        #[command(flatten)]
        seal: SealArgs,
    },

    /// Verify and decrypt a payload
    Decrypt {
        #[command(flatten)]
        cipher: CipherArgs,
        #[command(flatten)]
        seal: SealArgs,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Args, Debug, Default)]
struct CipherArgs {
    /// chacha20-blake3, xchacha20-blake3 or xchacha20-blake3-siv (overrides cipher.variant)
    #[arg(long, short = 'v')]
    variant: Option<Variant>,

    /// SIV key schedule: derived or split (overrides cipher.siv_key_schedule)
    #[arg(long)]
    siv_key_schedule: Option<SivKeySchedule>,
}

#[derive(Args, Debug, Default)]
struct SealArgs {
    /// Encoded key
    #[arg(long, short = 'k', env = "CB3_KEY", hide_env_values = true, conflicts_with = "key_file")]
    key: Option<String>,

    /// File holding the encoded key
    #[arg(long)]
    key_file: Option<PathBuf>,

    /// Encoded nonce (omit for xchacha20-blake3-siv)
    #[arg(long, short = 'n')]
    nonce: Option<String>,

    /// Associated data, authenticated but not encrypted
    #[arg(long, short = 'a')]
    ad: Option<String>,

    /// Input file (default: stdin)
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

// ── Entry point ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(Cb3Config::default_path);
    let mut config = load_config(config_path.as_deref())?;
    apply_overrides(&mut config, &cli);

    cb3_core::logging::init(&config.logging)?;
    tracing::debug!(
        variant = %config.cipher.variant,
        encoding = %config.encoding.format,
        "cb3 starting"
    );

    match cli.command {
        Commands::Keygen { cipher } => {
            let suite = resolve_suite(&config, &cipher);
            println!("{}", cmd_keygen(suite.variant, config.encoding.format).as_str());
            Ok(())
        }
        Commands::Nonce { cipher } => {
            let suite = resolve_suite(&config, &cipher);
            println!("{}", cmd_nonce(suite.variant, config.encoding.format)?);
            Ok(())
        }
        Commands::Encrypt { cipher, seal } => {
            cmd_encrypt(resolve_suite(&config, &cipher), config.encoding.format, seal)
        }
        Commands::Decrypt { cipher, seal } => {
            cmd_decrypt(resolve_suite(&config, &cipher), config.encoding.format, seal)
        }
        Commands::Config { action: ConfigAction::Show } => {
            print!("{}", cmd_config_show(&config, config_path.as_deref())?);
            Ok(())
        }
    }
}

// ── Config helpers ─────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<Cb3Config> {
    match path {
        Some(path) => Cb3Config::load(path)
            .with_context(|| format!("loading config: {}", path.display())),
        None => Ok(Cb3Config::default()),
    }
}

fn apply_overrides(config: &mut Cb3Config, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(encoding) = cli.encoding {
        config.encoding.format = encoding;
    }
}

fn resolve_suite(config: &Cb3Config, args: &CipherArgs) -> Suite {
    let mut suite = config.suite();
    if let Some(variant) = args.variant {
        suite.variant = variant;
    }
    if let Some(schedule) = args.siv_key_schedule {
        suite.siv_key_schedule = schedule;
    }
    suite
}

// ── `cb3 keygen` / `cb3 nonce` ─────────────────────────────────────────────────

fn cmd_keygen(variant: Variant, encoding: Encoding) -> Zeroizing<String> {
    let text = match variant {
        Variant::XChaCha20Blake3Siv => encoding.encode(cb3_crypto::generate_siv_key().as_bytes()),
        Variant::ChaCha20Blake3 | Variant::XChaCha20Blake3 => {
            encoding.encode(cb3_crypto::generate_key().as_bytes())
        }
    };
    Zeroizing::new(text)
}

fn cmd_nonce(variant: Variant, encoding: Encoding) -> Result<String> {
    if variant.is_deterministic() {
        anyhow::bail!("{variant} synthesizes its nonce; there is nothing to generate");
    }
    Ok(encoding.encode(&cb3_crypto::generate_nonce(variant)))
}

// ── `cb3 encrypt` / `cb3 decrypt` ──────────────────────────────────────────────

/// Take the key text out of `args` and decode it. Afterwards only the
/// secret wrapper has held the text.
fn resolve_key(args: &mut SealArgs, encoding: Encoding) -> Result<Zeroizing<Vec<u8>>> {
    let text = match (args.key.take(), &args.key_file) {
        (Some(key), _) => SecretString::from(key),
        (None, Some(path)) => SecretString::from(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading key file: {}", path.display()))?,
        ),
        (None, None) => anyhow::bail!("no key given\nUse --key, --key-file, or set CB3_KEY."),
    };
    let key = encoding
        .decode(text.expose_secret())
        .context("decoding key")?;
    Ok(Zeroizing::new(key))
}

/// Decode `--nonce`, or generate one for nonce-based variants when absent.
/// The flag is set when the nonce was generated here.
fn resolve_nonce(
    variant: Variant,
    nonce: Option<&str>,
    encoding: Encoding,
) -> Result<(Option<Vec<u8>>, bool)> {
    match nonce {
        Some(text) => Ok((Some(encoding.decode(text).context("decoding nonce")?), false)),
        None if variant.is_deterministic() => Ok((None, false)),
        None => Ok((Some(cb3_crypto::generate_nonce(variant)), true)),
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    match path {
        Some(path) => {
            data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut data)
                .context("reading stdin")?;
        }
    }
    Ok(data)
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data).context("writing stdout")?;
            stdout.flush().context("flushing stdout")
        }
    }
}

/// Encrypt `message` and return the encoded payload plus any generated nonce.
fn seal(
    suite: Suite,
    encoding: Encoding,
    key: &[u8],
    args: &SealArgs,
    message: &[u8],
) -> Result<(String, Option<String>)> {
    let (nonce, generated) = resolve_nonce(suite.variant, args.nonce.as_deref(), encoding)?;
    let payload = suite
        .encrypt(
            message,
            nonce.as_deref(),
            key,
            args.ad.as_deref().map(str::as_bytes),
        )
        .with_context(|| format!("{} encryption", suite.variant))?;

    let generated = match (generated, nonce) {
        (true, Some(nonce)) => Some(encoding.encode(&nonce)),
        _ => None,
    };
    Ok((encoding.encode(&payload), generated))
}

/// Decode and decrypt an encoded payload.
fn open(
    suite: Suite,
    encoding: Encoding,
    key: &[u8],
    args: &SealArgs,
    text: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let nonce = args
        .nonce
        .as_deref()
        .map(|n| encoding.decode(n))
        .transpose()
        .context("decoding nonce")?;
    let text = std::str::from_utf8(text).context("payload is not valid text")?;
    let payload = encoding.decode(text).context("decoding payload")?;

    let plaintext = suite
        .decrypt(
            &payload,
            nonce.as_deref(),
            key,
            args.ad.as_deref().map(str::as_bytes),
        )
        .with_context(|| format!("{} decryption", suite.variant))?;
    Ok(Zeroizing::new(plaintext))
}

fn cmd_encrypt(suite: Suite, encoding: Encoding, mut args: SealArgs) -> Result<()> {
    let key = resolve_key(&mut args, encoding)?;
    let message = read_input(args.input.as_deref())?;
    let (payload, generated_nonce) = seal(suite, encoding, &key, &args, &message)?;
    if let Some(nonce) = generated_nonce {
        eprintln!("nonce: {nonce}");
    }
    write_output(args.output.as_deref(), format!("{payload}\n").as_bytes())?;
    tracing::info!(variant = %suite.variant, message_len = message.len(), "encrypted");
    Ok(())
}

fn cmd_decrypt(suite: Suite, encoding: Encoding, mut args: SealArgs) -> Result<()> {
    let key = resolve_key(&mut args, encoding)?;
    let text = read_input(args.input.as_deref())?;
    let plaintext = open(suite, encoding, &key, &args, &text)?;
    write_output(args.output.as_deref(), &plaintext)?;
    tracing::info!(variant = %suite.variant, message_len = plaintext.len(), "decrypted");
    Ok(())
}

// ── `cb3 config show` ──────────────────────────────────────────────────────────

fn cmd_config_show(config: &Cb3Config, config_path: Option<&Path>) -> Result<String> {
    let header = match config_path {
        Some(path) if path.exists() => format!("# Configuration from: {}\n", path.display()),
        Some(path) => format!("# Configuration: defaults (no file at {})\n", path.display()),
        None => "# Configuration: defaults (HOME not set)\n".to_string(),
    };
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    Ok(format!("{header}\n{rendered}"))
}
