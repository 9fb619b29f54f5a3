use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, subscriber::set_global_default};
use tracing_subscriber::filter::EnvFilter;

mod check;
mod decode;

/// Offline tools for delegated relay proofs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Logging level (off, error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    /// Decode commitment bytes returned by the verification service
    DecodeCommitment(decode::DecodeArgs),
    /// Decode a delegated proof and the commitment it carries
    DecodeProof(decode::DecodeArgs),
    /// Load and validate a prover config file
    CheckConfig(check::CheckConfigArgs),
}

impl Commands {
    fn run(self) -> Result<(), anyhow::Error> {
        match self {
            Commands::DecodeCommitment(args) => decode::run_commitment(args),
            Commands::DecodeProof(args) => decode::run_proof(args),
            Commands::CheckConfig(args) => check::run(args),
        }
    }
}

fn init_tracing(log_level: &str) -> Result<(), anyhow::Error> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    set_global_default(subscriber)?;
    Ok(())
}

fn main() -> ExitCode {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if let Err(err) = init_tracing(&cli.log_level) {
        eprintln!("Failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match cli.command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
