//! `check-config` subcommand

use std::path::PathBuf;

use clap::Args;
use delegate_prover::ProverConfig;
use tracing::info;

#[derive(Clone, Debug, Args)]
pub struct CheckConfigArgs {
    /// Path to the prover config file
    #[arg(long, env = "DELEGATE_PROVER_CONFIG")]
    config_path: PathBuf,
}

/// Run the `check-config` subcommand: load, validate and print the effective config
pub fn run(args: CheckConfigArgs) -> Result<(), anyhow::Error> {
    let config = ProverConfig::load(&args.config_path)?;
    info!(
        "Config is valid: mirror client {} at {}, keys expire after {}s",
        config.mirror_client_id, config.service_address, config.key_expiration_secs
    );
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
