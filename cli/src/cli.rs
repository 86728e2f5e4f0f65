//! # CLI Interface
//!
//! Command-line structure for `vaultkeep`, via `clap` derive. Subcommands:
//! `split`, `combine`, `check create`, `check verify`, `seal`, `open`, and
//! `version`.

use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

/// vaultkeep: recovery shares and password-sealed envelopes.
///
/// Splits secrets into Shamir shares for trusted parties, puts them back
/// together, and seals data behind a password. Never writes a password or
/// plaintext anywhere you didn't ask it to.
#[derive(Parser, Debug)]
#[command(
    name = "vaultkeep",
    about = "Recovery shares and password-sealed envelopes",
    version,
    propagate_version = true
)]
pub struct VaultkeepCli {
    /// Log output format: `pretty` or `json`. Logs always go to stderr.
    #[arg(long, global = true, env = "VAULTKEEP_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a secret into base64 shares, one per line.
    Split(SplitArgs),
    /// Recover a secret from base64 shares.
    Combine(CombineArgs),
    /// Create or verify a password-check record.
    #[command(subcommand)]
    Check(CheckCommands),
    /// Encrypt data under a password into a self-contained envelope file.
    Seal(SealArgs),
    /// Decrypt an envelope file produced by `seal`.
    Open(OpenArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Derive a key from the password and write a check record (JSON).
    Create(CheckCreateArgs),
    /// Test a password against a check record. Exits non-zero on mismatch.
    Verify(CheckVerifyArgs),
}

/// Password input. Prefer the environment variable over the flag; shell
/// history is forever.
#[derive(Args, Clone)]
pub struct PasswordArgs {
    #[arg(long, env = "VAULTKEEP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl fmt::Debug for PasswordArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordArgs { password: [REDACTED] }")
    }
}

/// Key-derivation overrides. Without any of these the compiled-in defaults
/// apply.
#[derive(Args, Debug, Clone, Default)]
pub struct KdfArgs {
    /// JSON file holding a full parameter set (`{"iterations": .., "hash": ..}`).
    #[arg(long, env = "VAULTKEEP_KDF_PARAMS")]
    pub params: Option<PathBuf>,

    /// PBKDF2 iteration count.
    #[arg(long, env = "VAULTKEEP_KDF_ITERATIONS")]
    pub iterations: Option<u32>,

    /// PBKDF2 hash: sha256 or sha512.
    #[arg(long, env = "VAULTKEEP_KDF_HASH")]
    pub hash: Option<String>,
}

/// Arguments for `split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Total number of shares to produce (2..=255).
    #[arg(long, short = 'n')]
    pub shares: usize,

    /// Shares required to recover (2..=shares).
    #[arg(long, short = 't')]
    pub threshold: usize,

    /// Secret to split. Read from stdin when omitted.
    #[arg(long)]
    pub secret: Option<String>,

    /// Treat the secret as hex rather than raw text/bytes.
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `combine`.
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Base64 shares. Read from stdin (one per line) when none are given.
    pub shares: Vec<String>,

    /// Number of shares to interpolate. Defaults to all supplied.
    #[arg(long, short = 't')]
    pub threshold: Option<usize>,

    /// Print the recovered secret as hex.
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `check create`.
#[derive(Args, Debug)]
pub struct CheckCreateArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    #[command(flatten)]
    pub kdf: KdfArgs,

    /// Existing vault salt (base64). A fresh one is generated when omitted.
    #[arg(long)]
    pub salt: Option<String>,

    /// Where to write the check file. Stdout when omitted.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for `check verify`.
#[derive(Args, Debug)]
pub struct CheckVerifyArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Check file written by `check create`.
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

/// Arguments for `seal`.
#[derive(Args, Debug)]
pub struct SealArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    #[command(flatten)]
    pub kdf: KdfArgs,

    /// File to encrypt. Stdin when omitted.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Where to write the envelope file. Stdout when omitted.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for `open`.
#[derive(Args, Debug)]
pub struct OpenArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Envelope file written by `seal`.
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Where to write the plaintext. Stdout when omitted.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}
