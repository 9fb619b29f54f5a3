//! `decode-commitment` and `decode-proof` subcommands

use anyhow::Context;
use clap::Args;
use delegate_commitments::{Commitment, CommitmentProof};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Clone, Debug, Args)]
pub struct DecodeArgs {
    /// Hex encoded bytes, with or without 0x prefix
    #[arg(long)]
    hex: String,
}

fn parse_hex(input: &str) -> Result<Vec<u8>, anyhow::Error> {
    let s = input.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).context("Input is not valid hex")
}

pub fn decode_commitment(bytes: &[u8]) -> Result<Value, anyhow::Error> {
    let commitment = Commitment::from_bytes(bytes)?;
    debug!("Decoded {} commitment", commitment.type_name());
    Ok(serde_json::to_value(&commitment)?)
}

pub fn decode_proof(bytes: &[u8]) -> Result<Value, anyhow::Error> {
    let proof = CommitmentProof::from_bytes(bytes)?;
    let commitment = decode_commitment(&proof.commitment).context("Embedded commitment")?;
    Ok(json!({
        "commitment": commitment,
        "signer": format!("0x{}", hex::encode(&proof.signer)),
        "signature": format!("0x{}", hex::encode(&proof.signature)),
    }))
}

/// Run the `decode-commitment` subcommand
pub fn run_commitment(args: DecodeArgs) -> Result<(), anyhow::Error> {
    let decoded = decode_commitment(&parse_hex(&args.hex)?)?;
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

/// Run the `decode-proof` subcommand
pub fn run_proof(args: DecodeArgs) -> Result<(), anyhow::Error> {
    let decoded = decode_proof(&parse_hex(&args.hex)?)?;
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}
