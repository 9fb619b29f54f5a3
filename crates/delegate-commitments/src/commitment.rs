//! Commitments signed by the remote verification service.

use serde::{Deserialize, Serialize};

use crate::codec::{self, CommitmentError, COMMITMENT_SCHEMA_VERSION};
use crate::types::{Height, StateId};

/// Commitment produced after a header has been applied to the mirror client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateClientCommitment {
    /// State of the mirror client before the update, absent for the first update
    pub prev_state_id: Option<StateId>,
    /// State of the mirror client after the update
    pub new_state_id: StateId,
    /// Encoded new client state, present only when the service was asked to include it
    pub new_state: Option<Vec<u8>>,
    /// Height before the update
    pub prev_height: Option<Height>,
    /// Height after the update
    pub new_height: Height,
    /// Timestamp of the applied header in nanoseconds since the UNIX epoch
    pub timestamp: u128,
    /// Light-client specific parameters the destination chain must validate
    pub validation_params: Vec<u8>,
}

/// Commitment produced after a state (membership or non-membership) proof was verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCommitment {
    /// Store key prefix the path lives under
    pub prefix: Vec<u8>,
    /// Commitment path of the verified object
    pub path: String,
    /// Hash of the verified value, `None` for non-membership
    pub value: Option<[u8; 32]>,
    /// Height at which the proof was verified
    pub height: Height,
    /// Mirror client state the proof was verified against
    pub state_id: StateId,
}

/// Any commitment the service can emit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Commitment {
    UpdateClient(UpdateClientCommitment),
    State(StateCommitment),
}

/// Versioned envelope, the actual byte layout of a commitment
#[derive(Serialize, Deserialize)]
struct VersionedCommitment {
    version: u16,
    commitment: Commitment,
}

impl Commitment {
    pub fn type_name(&self) -> &'static str {
        match self {
            Commitment::UpdateClient(_) => "update_client",
            Commitment::State(_) => "state",
        }
    }

    /// Encode into the versioned commitment layout
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(&VersionedCommitment {
            version: COMMITMENT_SCHEMA_VERSION,
            commitment: self.clone(),
        })
    }

    /// Decode from the versioned commitment layout
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CommitmentError> {
        let VersionedCommitment {
            version,
            commitment,
        } = codec::decode(bytes)?;
        if version != COMMITMENT_SCHEMA_VERSION {
            return Err(CommitmentError::UnsupportedVersion {
                expected: COMMITMENT_SCHEMA_VERSION,
                actual: version,
            });
        }
        Ok(commitment)
    }
}

impl UpdateClientCommitment {
    pub fn to_bytes(&self) -> Vec<u8> {
        Commitment::UpdateClient(self.clone()).to_bytes()
    }
}

impl StateCommitment {
    pub fn to_bytes(&self) -> Vec<u8> {
        Commitment::State(self.clone()).to_bytes()
    }
}

/// Parse the commitment returned by an update-client call
pub fn parse_update_client_commitment(
    bytes: &[u8],
) -> Result<UpdateClientCommitment, CommitmentError> {
    match Commitment::from_bytes(bytes)? {
        Commitment::UpdateClient(c) => Ok(c),
        other => Err(CommitmentError::UnexpectedType {
            expected: "update_client",
            actual: other.type_name(),
        }),
    }
}

/// Parse the commitment returned by a state verification call
pub fn parse_state_commitment(bytes: &[u8]) -> Result<StateCommitment, CommitmentError> {
    match Commitment::from_bytes(bytes)? {
        Commitment::State(c) => Ok(c),
        other => Err(CommitmentError::UnexpectedType {
            expected: "state",
            actual: other.type_name(),
        }),
    }
}
