//! Capabilities consumed from the origin chain's native prover.

use std::fmt;

use async_trait::async_trait;
use delegate_commitments::Height;
use delegate_service_client::{Any, ChannelEnd, ConnectionEnd};

/// Origin-chain header that can be applied to the mirror client
pub trait Header: fmt::Debug + Send + Sync {
    /// Height the header attests
    fn height(&self) -> Height;
    /// Pack into the generic envelope accepted by the verification service
    fn pack(&self) -> anyhow::Result<Any>;
}

/// Context of a proof query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    /// Height of the origin chain at which objects are queried
    pub height: Height,
}

impl QueryContext {
    pub fn new(height: Height) -> Self {
        Self { height }
    }
}

/// An object together with its proof, as produced by the origin prover or by delegation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse<V> {
    pub value: V,
    /// Proof bytes, empty when the object does not exist at `proof_height`
    pub proof: Vec<u8>,
    pub proof_height: Height,
}

impl<V> QueryResponse<V> {
    pub fn new(value: V, proof: Vec<u8>, proof_height: Height) -> Self {
        Self {
            value,
            proof,
            proof_height,
        }
    }

    /// Whether the proof attests absence rather than presence of the object
    pub fn is_non_existence(&self) -> bool {
        self.proof.is_empty()
    }
}

/// Read access to the light client that tracks the origin chain on the counterparty
#[async_trait]
pub trait CounterpartyQuerier: Send + Sync {
    /// Latest height of the counterparty chain
    async fn latest_height(&self) -> anyhow::Result<Height>;
    /// Client state tracking the origin chain, at the given counterparty height
    async fn query_client_state(&self, height: Height) -> anyhow::Result<Any>;
}

/// Origin-chain prover: header retrieval plus one proof query per object kind
#[async_trait]
pub trait OriginProver: Send + Sync {
    fn chain_id(&self) -> String;

    /// Initial (client state, consensus state) of a light client trusting `header`
    async fn create_initial_state(&self, header: &dyn Header) -> anyhow::Result<(Any, Any)>;

    /// Latest header the origin light client can verify
    async fn get_latest_finalized_header(&self) -> anyhow::Result<Box<dyn Header>>;

    /// Headers bringing the counterparty's client up to `latest`, oldest first.
    /// An empty result means no update is needed.
    async fn setup_headers_for_update(
        &self,
        counterparty: &dyn CounterpartyQuerier,
        latest: &dyn Header,
    ) -> anyhow::Result<Vec<Box<dyn Header>>>;

    async fn query_client_state_with_proof(
        &self,
        ctx: &QueryContext,
    ) -> anyhow::Result<QueryResponse<Any>>;

    async fn query_client_consensus_state_with_proof(
        &self,
        ctx: &QueryContext,
        consensus_height: Height,
    ) -> anyhow::Result<QueryResponse<Any>>;

    async fn query_connection_with_proof(
        &self,
        ctx: &QueryContext,
    ) -> anyhow::Result<QueryResponse<ConnectionEnd>>;

    async fn query_channel_with_proof(
        &self,
        ctx: &QueryContext,
    ) -> anyhow::Result<QueryResponse<ChannelEnd>>;

    async fn query_packet_commitment_with_proof(
        &self,
        ctx: &QueryContext,
        sequence: u64,
    ) -> anyhow::Result<QueryResponse<Vec<u8>>>;

    async fn query_packet_acknowledgement_with_proof(
        &self,
        ctx: &QueryContext,
        sequence: u64,
    ) -> anyhow::Result<QueryResponse<Vec<u8>>>;
}
