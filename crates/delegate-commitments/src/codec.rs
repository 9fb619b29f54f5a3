//! Binary encoding of commitments.
//!
//! Commitments use bincode 1.x with fixed-width big-endian integers, `u64` length
//! prefixes for byte strings, a one-byte tag for options and a `u32` tag for enum
//! variants. Decoding is strict: trailing bytes and inputs above [`MAX_ENCODED_SIZE`]
//! are rejected. Delegated proofs wrap commitments in RLP, see [`crate::proof`].

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Current version of the commitment schema
pub const COMMITMENT_SCHEMA_VERSION: u16 = 1;

/// Upper bound on any encoded commitment or proof
pub const MAX_ENCODED_SIZE: u64 = 1 << 20;

/// Error types for commitment and proof decoding
#[derive(Error, Debug)]
pub enum CommitmentError {
    /// Input is empty
    #[error("Empty commitment bytes")]
    Empty,
    /// Input exceeds the size limit
    #[error("Encoded size {0} exceeds the limit of {MAX_ENCODED_SIZE} bytes")]
    TooLarge(usize),
    /// Bytes do not match the expected schema
    #[error("Malformed encoding: {0}")]
    Malformed(#[from] bincode::Error),
    /// Schema version is not supported
    #[error("Unsupported commitment schema version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u16, actual: u16 },
    /// Delegated proof is not a well-formed RLP list of three byte strings
    #[error("Malformed proof encoding: {0}")]
    Rlp(alloy_rlp::Error),
    /// Input continues past the encoded value
    #[error("{0} trailing bytes after the encoded value")]
    TrailingBytes(usize),
    /// Well-formed commitment of another kind
    #[error("Unexpected commitment type: expected {expected}, got {actual}")]
    UnexpectedType {
        expected: &'static str,
        actual: &'static str,
    },
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_big_endian()
        .reject_trailing_bytes()
}

/// Encode a value with the canonical options
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    // Serializing plain structs into a Vec has no failure path without a size limit
    options()
        .serialize(value)
        .expect("Canonical encoding of an in-memory value cannot fail")
}

/// Decode a value with the canonical options, consuming the input exactly
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CommitmentError> {
    if bytes.is_empty() {
        return Err(CommitmentError::Empty);
    }
    if bytes.len() as u64 > MAX_ENCODED_SIZE {
        return Err(CommitmentError::TooLarge(bytes.len()));
    }
    options()
        .with_limit(MAX_ENCODED_SIZE)
        .deserialize(bytes)
        .map_err(Into::into)
}
