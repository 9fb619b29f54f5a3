//! Destination-side objects whose expected values are sent for verification.

use delegate_commitments::types::base64_bytes;
use serde::{Deserialize, Serialize};

/// Connection handshake state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Uninitialized,
    Init,
    TryOpen,
    Open,
}

/// Version negotiated during the connection handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub identifier: String,
    pub features: Vec<String>,
}

/// Counterparty end of a connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCounterparty {
    pub client_id: String,
    /// Empty until the counterparty has opened its end
    pub connection_id: Option<String>,
    /// Store key prefix on the counterparty chain
    #[serde(with = "base64_bytes")]
    pub prefix: Vec<u8>,
}

/// Connection end as stored on the origin chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEnd {
    pub client_id: String,
    pub versions: Vec<Version>,
    pub state: ConnectionState,
    pub counterparty: ConnectionCounterparty,
    pub delay_period: u64,
}

/// Channel handshake state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    #[default]
    Uninitialized,
    Init,
    TryOpen,
    Open,
    Closed,
}

/// Packet delivery ordering of a channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    #[default]
    Unordered,
    Ordered,
}

/// Counterparty end of a channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCounterparty {
    pub port_id: String,
    pub channel_id: Option<String>,
}

/// Channel end as stored on the origin chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEnd {
    pub state: ChannelState,
    pub ordering: Order,
    pub counterparty: ChannelCounterparty,
    pub connection_hops: Vec<String>,
    pub version: String,
}
