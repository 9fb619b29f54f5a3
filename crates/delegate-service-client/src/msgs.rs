//! Request and response messages of the verification service JSON-RPC API.
//!
//! Byte fields travel as base64 strings.

use delegate_commitments::types::base64_bytes;
use delegate_commitments::Height;
pub use ibc_proto::google::protobuf::Any;
use serde::{Deserialize, Serialize};

use crate::objects::{ChannelEnd, ConnectionEnd};

/// Create a mirror of the origin light client inside the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateClientRequest {
    #[serde(with = "any_json")]
    pub client_state: Any,
    #[serde(with = "any_json")]
    pub consensus_state: Any,
    pub signer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClientResponse {
    /// Identifier the service assigned to the new mirror client
    pub client_id: String,
}

/// Apply one origin header to the mirror client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    pub client_id: String,
    #[serde(with = "any_json")]
    pub header: Any,
}

/// Signed commitment returned by update and verification calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentResponse {
    #[serde(with = "base64_bytes")]
    pub commitment: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub signer: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
}

pub type UpdateClientResponse = CommitmentResponse;
pub type VerifyResponse = CommitmentResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyClientStateRequest {
    pub client_id: String,
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
    pub counterparty_client_id: String,
    #[serde(with = "any_json")]
    pub expected_client_state: Any,
    pub proof_height: Height,
    #[serde(with = "base64_bytes")]
    pub proof: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyConsensusStateRequest {
    pub client_id: String,
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
    pub counterparty_client_id: String,
    pub consensus_height: Height,
    #[serde(with = "any_json")]
    pub expected_consensus_state: Any,
    pub proof_height: Height,
    #[serde(with = "base64_bytes")]
    pub proof: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConnectionRequest {
    pub client_id: String,
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
    pub connection_id: String,
    pub expected_connection: ConnectionEnd,
    pub proof_height: Height,
    #[serde(with = "base64_bytes")]
    pub proof: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyChannelRequest {
    pub client_id: String,
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
    pub port_id: String,
    pub channel_id: String,
    pub expected_channel: ChannelEnd,
    pub proof_height: Height,
    #[serde(with = "base64_bytes")]
    pub proof: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPacketCommitmentRequest {
    pub client_id: String,
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
    pub port_id: String,
    pub channel_id: String,
    pub sequence: u64,
    #[serde(with = "base64_bytes")]
    pub commitment: Vec<u8>,
    pub proof_height: Height,
    #[serde(with = "base64_bytes")]
    pub proof: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPacketAcknowledgementRequest {
    pub client_id: String,
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
    pub port_id: String,
    pub channel_id: String,
    pub sequence: u64,
    #[serde(with = "base64_bytes")]
    pub acknowledgement: Vec<u8>,
    pub proof_height: Height,
    #[serde(with = "base64_bytes")]
    pub proof: Vec<u8>,
}

/// One delegated verification request of any object kind
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyRequest {
    ClientState(VerifyClientStateRequest),
    ConsensusState(VerifyConsensusStateRequest),
    Connection(VerifyConnectionRequest),
    Channel(VerifyChannelRequest),
    PacketCommitment(VerifyPacketCommitmentRequest),
    PacketAcknowledgement(VerifyPacketAcknowledgementRequest),
}

impl VerifyRequest {
    /// JSON-RPC method serving this request
    pub fn method(&self) -> &'static str {
        match self {
            VerifyRequest::ClientState(_) => methods::VERIFY_CLIENT_STATE,
            VerifyRequest::ConsensusState(_) => methods::VERIFY_CONSENSUS_STATE,
            VerifyRequest::Connection(_) => methods::VERIFY_CONNECTION,
            VerifyRequest::Channel(_) => methods::VERIFY_CHANNEL,
            VerifyRequest::PacketCommitment(_) => methods::VERIFY_PACKET_COMMITMENT,
            VerifyRequest::PacketAcknowledgement(_) => methods::VERIFY_PACKET_ACKNOWLEDGEMENT,
        }
    }

    pub fn client_id(&self) -> &str {
        match self {
            VerifyRequest::ClientState(r) => &r.client_id,
            VerifyRequest::ConsensusState(r) => &r.client_id,
            VerifyRequest::Connection(r) => &r.client_id,
            VerifyRequest::Channel(r) => &r.client_id,
            VerifyRequest::PacketCommitment(r) => &r.client_id,
            VerifyRequest::PacketAcknowledgement(r) => &r.client_id,
        }
    }
}

/// Build an `Any` envelope from a type URL and an encoded message
pub fn pack_any(type_url: impl Into<String>, value: Vec<u8>) -> Any {
    Any {
        type_url: type_url.into(),
        value,
    }
}

/// Serde adapter carrying an `Any` as `{type_url, value}` with a base64 value
pub mod any_json {
    use super::{base64_bytes, Any};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct AnyJson {
        type_url: String,
        #[serde(with = "base64_bytes")]
        value: Vec<u8>,
    }

    pub fn serialize<S>(any: &Any, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        AnyJson {
            type_url: any.type_url.clone(),
            value: any.value.clone(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Any, D::Error>
    where
        D: Deserializer<'de>,
    {
        let AnyJson { type_url, value } = AnyJson::deserialize(deserializer)?;
        Ok(Any { type_url, value })
    }
}

/// JSON-RPC method names
pub mod methods {
    pub const CREATE_CLIENT: &str = "delegate_createClient";
    pub const UPDATE_CLIENT: &str = "delegate_updateClient";
    pub const VERIFY_CLIENT_STATE: &str = "delegate_verifyClientState";
    pub const VERIFY_CONSENSUS_STATE: &str = "delegate_verifyConsensusState";
    pub const VERIFY_CONNECTION: &str = "delegate_verifyConnection";
    pub const VERIFY_CHANNEL: &str = "delegate_verifyChannel";
    pub const VERIFY_PACKET_COMMITMENT: &str = "delegate_verifyPacketCommitment";
    pub const VERIFY_PACKET_ACKNOWLEDGEMENT: &str = "delegate_verifyPacketAcknowledgement";
}
