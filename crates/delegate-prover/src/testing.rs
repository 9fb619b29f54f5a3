//! Fakes shared by the prover tests.

use std::sync::Arc;

use async_trait::async_trait;
use delegate_commitments::{Height, StateCommitment, StateId, UpdateClientCommitment};
use delegate_service_client::{pack_any, Any, ChannelEnd, ConnectionEnd};

use crate::config::{PathEnd, ProverConfig};
use crate::origin::{CounterpartyQuerier, Header, OriginProver, QueryContext, QueryResponse};
use crate::prover::{DelegatingProver, InitOptions};
use crate::remote::{MockVerificationService, ServiceConnection};

pub fn test_config() -> ProverConfig {
    ProverConfig {
        service_address: "http://127.0.0.1:50051".to_string(),
        mirror_client_id: "07-tendermint-0".to_string(),
        mrenclave: hex::encode([0x11; 32]),
        allowed_quote_statuses: vec!["GROUP_OUT_OF_DATE".to_string()],
        allowed_advisory_ids: vec![],
        key_expiration_secs: crate::config::DEFAULT_KEY_EXPIRATION_SECS,
        rpc_timeout_secs: crate::config::DEFAULT_RPC_TIMEOUT_SECS,
        create_client_signer: String::new(),
    }
}

/// Session bound to a test path, talking to the given mock service
pub fn connected_prover(
    service: MockVerificationService,
    origin: FakeOrigin,
) -> DelegatingProver<FakeOrigin> {
    let connection = Arc::new(ServiceConnection::from_service(Arc::new(service)));
    let mut prover = DelegatingProver::new(test_config(), origin)
        .unwrap()
        .with_connection(connection);
    prover
        .init(InitOptions {
            rpc_timeout: None,
            debug: true,
        })
        .unwrap();
    prover
        .set_relay_info(PathEnd {
            client_id: "07-tendermint-3".to_string(),
            connection_id: "connection-2".to_string(),
            port_id: "transfer".to_string(),
            channel_id: "channel-7".to_string(),
        })
        .unwrap();
    prover
}

pub fn state_commitment(height: Height) -> Vec<u8> {
    StateCommitment {
        prefix: b"ibc".to_vec(),
        path: "channelEnds/ports/transfer/channels/channel-7".to_string(),
        value: Some([0x22; 32]),
        height,
        state_id: StateId([0x01; 32]),
    }
    .to_bytes()
}

/// Update commitment whose validation params carry `marker`
pub fn update_commitment(prev: Option<Height>, new: Height, marker: u8) -> Vec<u8> {
    UpdateClientCommitment {
        prev_state_id: prev.map(|_| StateId([0x01; 32])),
        new_state_id: StateId([0x02; 32]),
        new_state: None,
        prev_height: prev,
        new_height: new,
        timestamp: 1_700_000_000_000_000_000,
        validation_params: vec![marker],
    }
    .to_bytes()
}

/// Header packing its height as big-endian bytes
#[derive(Debug, Clone)]
pub struct TestHeader {
    pub height: Height,
}

impl Header for TestHeader {
    fn height(&self) -> Height {
        self.height
    }

    fn pack(&self) -> anyhow::Result<Any> {
        Ok(pack_any(
            "/origin.Header",
            self.height.revision_height.to_be_bytes().to_vec(),
        ))
    }
}

pub fn header_batch(heights: &[u64]) -> Vec<Box<dyn Header>> {
    heights
        .iter()
        .map(|h| {
            Box::new(TestHeader {
                height: Height::new(0, *h),
            }) as Box<dyn Header>
        })
        .collect()
}

pub struct StaticCounterparty;

#[async_trait]
impl CounterpartyQuerier for StaticCounterparty {
    async fn latest_height(&self) -> anyhow::Result<Height> {
        Ok(Height::new(0, 100))
    }

    async fn query_client_state(&self, _height: Height) -> anyhow::Result<Any> {
        Ok(pack_any("/origin.ClientState", vec![1]))
    }
}

/// Origin prover answering every query with canned responses
#[derive(Debug, Clone)]
pub struct FakeOrigin {
    pub client_state: QueryResponse<Any>,
    pub consensus_state: QueryResponse<Any>,
    pub connection: QueryResponse<ConnectionEnd>,
    pub channel: QueryResponse<ChannelEnd>,
    pub packet_commitment: QueryResponse<Vec<u8>>,
    pub packet_acknowledgement: QueryResponse<Vec<u8>>,
    /// Heights of the headers returned by `setup_headers_for_update`
    pub update_heights: Vec<u64>,
}

impl FakeOrigin {
    pub fn with_proofs(proof_height: Height, proof: Vec<u8>) -> Self {
        let respond = |value| QueryResponse::new(value, proof.clone(), proof_height);
        Self {
            client_state: respond(pack_any("/origin.ClientState", vec![1])),
            consensus_state: respond(pack_any("/origin.ConsensusState", vec![2])),
            connection: QueryResponse::new(ConnectionEnd::default(), proof.clone(), proof_height),
            channel: QueryResponse::new(ChannelEnd::default(), proof.clone(), proof_height),
            packet_commitment: QueryResponse::new(vec![0xcc], proof.clone(), proof_height),
            packet_acknowledgement: QueryResponse::new(vec![0xac], proof.clone(), proof_height),
            update_heights: vec![],
        }
    }

    pub fn without_proofs(proof_height: Height) -> Self {
        Self::with_proofs(proof_height, vec![])
    }
}

impl Default for FakeOrigin {
    fn default() -> Self {
        Self::without_proofs(Height::zero())
    }
}

#[async_trait]
impl OriginProver for FakeOrigin {
    fn chain_id(&self) -> String {
        "origin-1".to_string()
    }

    async fn create_initial_state(&self, _header: &dyn Header) -> anyhow::Result<(Any, Any)> {
        Ok((
            pack_any("/origin.ClientState", vec![1]),
            pack_any("/origin.ConsensusState", vec![2]),
        ))
    }

    async fn get_latest_finalized_header(&self) -> anyhow::Result<Box<dyn Header>> {
        let height = self.update_heights.iter().copied().max().unwrap_or(10);
        Ok(Box::new(TestHeader {
            height: Height::new(0, height),
        }))
    }

    async fn setup_headers_for_update(
        &self,
        counterparty: &dyn CounterpartyQuerier,
        latest: &dyn Header,
    ) -> anyhow::Result<Vec<Box<dyn Header>>> {
        counterparty.latest_height().await?;
        let heights: Vec<u64> = self
            .update_heights
            .iter()
            .copied()
            .filter(|h| *h <= latest.height().revision_height)
            .collect();
        Ok(header_batch(&heights))
    }

    async fn query_client_state_with_proof(
        &self,
        _ctx: &QueryContext,
    ) -> anyhow::Result<QueryResponse<Any>> {
        Ok(self.client_state.clone())
    }

    async fn query_client_consensus_state_with_proof(
        &self,
        _ctx: &QueryContext,
        _consensus_height: Height,
    ) -> anyhow::Result<QueryResponse<Any>> {
        Ok(self.consensus_state.clone())
    }

    async fn query_connection_with_proof(
        &self,
        _ctx: &QueryContext,
    ) -> anyhow::Result<QueryResponse<ConnectionEnd>> {
        Ok(self.connection.clone())
    }

    async fn query_channel_with_proof(
        &self,
        _ctx: &QueryContext,
    ) -> anyhow::Result<QueryResponse<ChannelEnd>> {
        Ok(self.channel.clone())
    }

    async fn query_packet_commitment_with_proof(
        &self,
        _ctx: &QueryContext,
        _sequence: u64,
    ) -> anyhow::Result<QueryResponse<Vec<u8>>> {
        Ok(self.packet_commitment.clone())
    }

    async fn query_packet_acknowledgement_with_proof(
        &self,
        _ctx: &QueryContext,
        _sequence: u64,
    ) -> anyhow::Result<QueryResponse<Vec<u8>>> {
        Ok(self.packet_acknowledgement.clone())
    }
}
