//! phrasevault - Seal a wallet recovery phrase under a password
//!
//! Usage:
//!   phrasevault seal   - Read a phrase on stdin, emit a sealed envelope on stdout
//!   phrasevault open   - Read an envelope on stdin, emit the phrase on stdout

use clap::{Parser, Subcommand};
use phrasevault::{
    envelope::Envelope,
    password::PasswordSource,
    vault::{self, SealParams, DEFAULT_ITERATIONS},
    Error, Result,
};
use std::io::{self, Read, Write};
use std::num::NonZeroU32;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "phrasevault")]
#[command(author = "phrasevault Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Password-sealed envelopes for wallet recovery phrases")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal a phrase read from stdin into an envelope on stdout
    Seal {
        /// PBKDF2 iteration count
        #[arg(long, env = "PHRASEVAULT_ITERATIONS")]
        iterations: Option<NonZeroU32>,

        /// KDF salt as hex (16 fresh random bytes if omitted)
        #[arg(long, value_name = "HEX")]
        salt: Option<String>,

        /// Generate a high-entropy password instead of prompting
        #[arg(long, conflicts_with = "password_file")]
        generate_password: bool,

        /// Read the encryption password from a file
        #[arg(long)]
        password_file: Option<PathBuf>,
    },

    /// Open an envelope read from stdin, emitting the phrase on stdout
    Open {
        /// Read the encryption password from a file
        #[arg(long)]
        password_file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging. Stdout carries the envelope/plaintext, so diagnostics
    // go to stderr.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    if let Err(e) = run_command(cli.command) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Seal {
            iterations,
            salt,
            generate_password,
            password_file,
        } => cmd_seal(iterations, salt, generate_password, password_file),

        Commands::Open { password_file } => cmd_open(password_file),
    }
}

fn cmd_seal(
    iterations: Option<NonZeroU32>,
    salt_hex: Option<String>,
    generate_password: bool,
    password_file: Option<PathBuf>,
) -> Result<()> {
    let salt = salt_hex
        .map(|s| hex::decode(&s).map_err(|_| Error::Usage("salt must be hex".to_string())))
        .transpose()?;

    let params = SealParams {
        iterations: iterations.unwrap_or(DEFAULT_ITERATIONS),
        salt,
    };

    let source = if generate_password {
        PasswordSource::Generated
    } else if let Some(path) = password_file {
        PasswordSource::File(path)
    } else {
        PasswordSource::Interactive
    };

    let password = source.obtain()?;

    if password.is_generated() {
        // The password never enters the envelope; this is its only copy
        eprintln!("Generated password: {}", password.text());
    }

    let mut plaintext = Vec::new();
    io::stdin().read_to_end(&mut plaintext)?;

    info!(
        "Sealing {} bytes ({} PBKDF2 iterations)",
        plaintext.len(),
        params.iterations
    );

    let envelope = vault::seal(&plaintext, password.text(), &params)?;
    println!("{}", envelope.encode());

    Ok(())
}

fn cmd_open(password_file: Option<PathBuf>) -> Result<()> {
    // Decode first: a malformed envelope fails before any password entry
    // or key derivation.
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let envelope = Envelope::decode(&input)?;

    let source = match password_file {
        Some(path) => PasswordSource::File(path),
        None => PasswordSource::Interactive,
    };
    let password = source.obtain()?;

    info!("Opening envelope ({} PBKDF2 iterations)", envelope.iterations);

    let plaintext = vault::open(&envelope, password.text())?;

    let mut stdout = io::stdout();
    stdout.write_all(&plaintext)?;
    stdout.flush()?;

    Ok(())
}
