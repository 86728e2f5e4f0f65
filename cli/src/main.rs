// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vaultkeep
//!
//! Entry point for the `vaultkeep` binary. Parses CLI arguments, initializes
//! logging, and hands off to the subcommand handlers.
//!
//! - `split`        : split a secret into base64 shares
//! - `combine`      : recover a secret from shares
//! - `check create` : write a password-check record
//! - `check verify` : test a password against a record
//! - `seal`/`open`  : password-sealed envelope files
//! - `version`      : print build version information

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use vaultkeep_core::{config, HashAlgorithm};

use cli::{CheckCommands, Commands, VaultkeepCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = VaultkeepCli::parse();
    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Split(args) => commands::split_secret(&args, stdin, &mut stdout)?,
        Commands::Combine(args) => commands::combine_shares(&args, stdin, &mut stdout)?,
        Commands::Check(CheckCommands::Create(args)) => {
            commands::create_check_file(args, &mut stdout).await?
        }
        Commands::Check(CheckCommands::Verify(args)) => {
            if !commands::verify_check_file(args).await? {
                eprintln!("password does not match");
                return Ok(ExitCode::FAILURE);
            }
            println!("ok");
        }
        Commands::Seal(args) => commands::seal(args, stdin, &mut stdout).await?,
        Commands::Open(args) => commands::open(args, &mut stdout).await?,
        Commands::Version => print_version(),
    }

    Ok(ExitCode::SUCCESS)
}

/// Prints version information to stdout.
fn print_version() {
    println!("vaultkeep {}", env!("CARGO_PKG_VERSION"));
    println!("params    v{}", config::PARAMS_VERSION);
    println!(
        "cipher    {} / PBKDF2-HMAC-{}",
        config::SYMMETRIC_ALGORITHM,
        HashAlgorithm::default().name()
    );
}
