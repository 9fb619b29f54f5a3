//! Objects submitted to the destination chain's commitment-verifying light client.
//!
//! Client state, consensus state and update header are protobuf messages packed
//! into `google.protobuf.Any`.

use delegate_commitments::{parse_update_client_commitment, CommitmentError, UpdateClientCommitment};
use delegate_service_client::{pack_any, Any};
use ibc_proto::ibc::core::client::v1::Height as PbHeight;
use prost::Message;

pub const CLIENT_STATE_TYPE_URL: &str = "/delegate.lightclient.v1.ClientState";
pub const CONSENSUS_STATE_TYPE_URL: &str = "/delegate.lightclient.v1.ConsensusState";
pub const UPDATE_CLIENT_HEADER_TYPE_URL: &str = "/delegate.lightclient.v1.UpdateClientHeader";

/// Client state of the destination light client.
///
/// Starts without any enclave key; keys are registered by later updates.
#[derive(Clone, PartialEq, Message)]
pub struct ClientState {
    #[prost(message, optional, tag = "1")]
    pub latest_height: Option<PbHeight>,
    /// Enclave measurement a key must be attested for
    #[prost(bytes = "vec", tag = "2")]
    pub mrenclave: Vec<u8>,
    /// Lifetime of a registered key in seconds
    #[prost(uint64, tag = "3")]
    pub key_expiration: u64,
    /// Registered enclave key addresses
    #[prost(bytes = "vec", repeated, tag = "4")]
    pub keys: Vec<Vec<u8>>,
    /// Attestation time of each registered key
    #[prost(uint64, repeated, tag = "5")]
    pub attestation_times: Vec<u64>,
    #[prost(string, repeated, tag = "6")]
    pub allowed_quote_statuses: Vec<String>,
    #[prost(string, repeated, tag = "7")]
    pub allowed_advisory_ids: Vec<String>,
}

/// Consensus state of the destination light client, empty at creation
#[derive(Clone, PartialEq, Message)]
pub struct ConsensusState {
    #[prost(bytes = "vec", tag = "1")]
    pub state_id: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
}

/// Header carrying a signed update-client commitment to the destination chain
#[derive(Clone, PartialEq, Message)]
pub struct UpdateClientHeader {
    #[prost(bytes = "vec", tag = "1")]
    pub commitment: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signer: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub signature: Vec<u8>,
}

/// Packed client and consensus state of a newly created destination client
#[derive(Debug, Clone, PartialEq)]
pub struct PackedClient {
    pub client_state: Any,
    pub consensus_state: Any,
}

/// Create-client message for the destination chain
#[derive(Debug, Clone, PartialEq)]
pub struct MsgCreateClient {
    pub client_state: Any,
    pub consensus_state: Any,
    pub signer: String,
}

impl ClientState {
    pub fn to_any(&self) -> Any {
        pack_any(CLIENT_STATE_TYPE_URL, self.encode_to_vec())
    }
}

impl ConsensusState {
    pub fn to_any(&self) -> Any {
        pack_any(CONSENSUS_STATE_TYPE_URL, self.encode_to_vec())
    }
}

impl UpdateClientHeader {
    pub fn to_any(&self) -> Any {
        pack_any(UPDATE_CLIENT_HEADER_TYPE_URL, self.encode_to_vec())
    }

    pub fn commitment(&self) -> Result<UpdateClientCommitment, CommitmentError> {
        parse_update_client_commitment(&self.commitment)
    }
}
