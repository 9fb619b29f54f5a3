//! Per-kind descriptors of verifiable objects.
//!
//! Each descriptor holds the path identifiers relevant to its kind and knows how to
//! shape the expected value into the matching verification request.

use delegate_commitments::Height;
use delegate_service_client::{
    Any, ChannelEnd, ConnectionEnd, VerifyChannelRequest, VerifyClientStateRequest,
    VerifyConnectionRequest, VerifyConsensusStateRequest, VerifyPacketAcknowledgementRequest,
    VerifyPacketCommitmentRequest, VerifyRequest,
};

/// Store key prefix under which the destination-side objects are committed
pub const STORE_PREFIX: &[u8] = b"ibc";

/// Fields shared by every verification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBase {
    pub client_id: String,
    pub prefix: Vec<u8>,
    pub proof_height: Height,
    pub proof: Vec<u8>,
}

/// A kind of object whose proof can be delegated
pub trait ObjectKind: Send + Sync {
    type Value: Clone + Send + Sync;

    /// Short label used in logs
    const NAME: &'static str;

    fn request(&self, base: RequestBase, expected: &Self::Value) -> VerifyRequest;
}

/// Client state of the counterparty's client tracking the origin chain
#[derive(Debug, Clone)]
pub struct ClientStateKind {
    pub counterparty_client_id: String,
}

impl ObjectKind for ClientStateKind {
    type Value = Any;
    const NAME: &'static str = "client_state";

    fn request(&self, base: RequestBase, expected: &Any) -> VerifyRequest {
        VerifyRequest::ClientState(VerifyClientStateRequest {
            client_id: base.client_id,
            prefix: base.prefix,
            counterparty_client_id: self.counterparty_client_id.clone(),
            expected_client_state: expected.clone(),
            proof_height: base.proof_height,
            proof: base.proof,
        })
    }
}

/// Consensus state of the counterparty's client at a given height
#[derive(Debug, Clone)]
pub struct ConsensusStateKind {
    pub counterparty_client_id: String,
    pub consensus_height: Height,
}

impl ObjectKind for ConsensusStateKind {
    type Value = Any;
    const NAME: &'static str = "consensus_state";

    fn request(&self, base: RequestBase, expected: &Any) -> VerifyRequest {
        VerifyRequest::ConsensusState(VerifyConsensusStateRequest {
            client_id: base.client_id,
            prefix: base.prefix,
            counterparty_client_id: self.counterparty_client_id.clone(),
            consensus_height: self.consensus_height,
            expected_consensus_state: expected.clone(),
            proof_height: base.proof_height,
            proof: base.proof,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ConnectionKind {
    pub connection_id: String,
}

impl ObjectKind for ConnectionKind {
    type Value = ConnectionEnd;
    const NAME: &'static str = "connection";

    fn request(&self, base: RequestBase, expected: &ConnectionEnd) -> VerifyRequest {
        VerifyRequest::Connection(VerifyConnectionRequest {
            client_id: base.client_id,
            prefix: base.prefix,
            connection_id: self.connection_id.clone(),
            expected_connection: expected.clone(),
            proof_height: base.proof_height,
            proof: base.proof,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChannelKind {
    pub port_id: String,
    pub channel_id: String,
}

impl ObjectKind for ChannelKind {
    type Value = ChannelEnd;
    const NAME: &'static str = "channel";

    fn request(&self, base: RequestBase, expected: &ChannelEnd) -> VerifyRequest {
        VerifyRequest::Channel(VerifyChannelRequest {
            client_id: base.client_id,
            prefix: base.prefix,
            port_id: self.port_id.clone(),
            channel_id: self.channel_id.clone(),
            expected_channel: expected.clone(),
            proof_height: base.proof_height,
            proof: base.proof,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PacketCommitmentKind {
    pub port_id: String,
    pub channel_id: String,
    pub sequence: u64,
}

impl ObjectKind for PacketCommitmentKind {
    type Value = Vec<u8>;
    const NAME: &'static str = "packet_commitment";

    fn request(&self, base: RequestBase, expected: &Vec<u8>) -> VerifyRequest {
        VerifyRequest::PacketCommitment(VerifyPacketCommitmentRequest {
            client_id: base.client_id,
            prefix: base.prefix,
            port_id: self.port_id.clone(),
            channel_id: self.channel_id.clone(),
            sequence: self.sequence,
            commitment: expected.clone(),
            proof_height: base.proof_height,
            proof: base.proof,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PacketAcknowledgementKind {
    pub port_id: String,
    pub channel_id: String,
    pub sequence: u64,
}

impl ObjectKind for PacketAcknowledgementKind {
    type Value = Vec<u8>;
    const NAME: &'static str = "packet_acknowledgement";

    fn request(&self, base: RequestBase, expected: &Vec<u8>) -> VerifyRequest {
        VerifyRequest::PacketAcknowledgement(VerifyPacketAcknowledgementRequest {
            client_id: base.client_id,
            prefix: base.prefix,
            port_id: self.port_id.clone(),
            channel_id: self.channel_id.clone(),
            sequence: self.sequence,
            acknowledgement: expected.clone(),
            proof_height: base.proof_height,
            proof: base.proof,
        })
    }
}
