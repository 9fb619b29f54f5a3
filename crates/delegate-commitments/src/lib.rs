//! Commitment codec for the verification-delegation layer.
//!
//! The remote verification service answers every call with opaque commitment bytes.
//! This crate decodes them into typed commitments, rejecting anything that does not
//! match the versioned schema exactly, and serializes (commitment, signer, signature)
//! into the proof layout consumed by the destination chain's verifier.

pub mod codec;
pub mod commitment;
pub mod proof;
pub mod types;

pub use codec::{decode, encode, CommitmentError, COMMITMENT_SCHEMA_VERSION, MAX_ENCODED_SIZE};
pub use commitment::{
    parse_state_commitment, parse_update_client_commitment, Commitment, StateCommitment,
    UpdateClientCommitment,
};
pub use proof::{serialize_proof, CommitmentProof};
pub use types::{Height, StateId};
