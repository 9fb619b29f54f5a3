//! Per-path delegating prover session.

use std::sync::Arc;
use std::time::Duration;

use delegate_commitments::Height;
use delegate_service_client::{Any, ChannelEnd, ConnectionEnd};
use tracing::info;

use crate::client_state::{MsgCreateClient, PackedClient, UpdateClientHeader};
use crate::config::{PathEnd, ProverConfig};
use crate::error::ProverError;
use crate::kinds::{
    ChannelKind, ClientStateKind, ConnectionKind, ConsensusStateKind, ObjectKind,
    PacketAcknowledgementKind, PacketCommitmentKind,
};
use crate::lifecycle::ClientLifecycle;
use crate::origin::{CounterpartyQuerier, Header, OriginProver, QueryContext, QueryResponse};
use crate::remote::{ServiceConnection, VerificationService};
use crate::verifier::DelegatedVerifier;

/// Options applied when a session is initialized
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Overrides the configured request timeout
    pub rpc_timeout: Option<Duration>,
    /// Log every attested commitment
    pub debug: bool,
}

/// Prover for one relayed path, wrapping the origin chain's prover.
///
/// Each proof the origin produces is replaced with a commitment signed by the
/// verification service. Sessions for different paths may share one
/// [`ServiceConnection`] but nothing else.
pub struct DelegatingProver<O> {
    config: ProverConfig,
    origin: O,
    connection: Option<Arc<ServiceConnection>>,
    path: Option<PathEnd>,
    debug: bool,
}

impl<O: OriginProver> DelegatingProver<O> {
    pub fn new(config: ProverConfig, origin: O) -> Result<Self, ProverError> {
        config.validate()?;
        Ok(Self {
            config,
            origin,
            connection: None,
            path: None,
            debug: false,
        })
    }

    /// Use a connection shared with other sessions instead of dialing a dedicated one
    pub fn with_connection(mut self, connection: Arc<ServiceConnection>) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Prepare the service connection. The service is not dialed until first use.
    pub fn init(&mut self, options: InitOptions) -> Result<(), ProverError> {
        self.debug = options.debug;
        if self.connection.is_none() {
            let timeout = options
                .rpc_timeout
                .unwrap_or_else(|| self.config.rpc_timeout());
            self.connection = Some(Arc::new(ServiceConnection::http(
                self.config.service_address.clone(),
                timeout,
            )));
        }
        info!(
            "Initialized delegating prover for {} (mirror client {}, service {})",
            self.origin.chain_id(),
            self.config.mirror_client_id,
            self.config.service_address
        );
        Ok(())
    }

    /// Bind the session to a path. A session relays exactly one path.
    pub fn set_relay_info(&mut self, path: PathEnd) -> Result<(), ProverError> {
        if self.path.is_some() {
            return Err(ProverError::RelayInfoAlreadySet);
        }
        info!(
            "Relaying over client {} connection {} port {} channel {}",
            path.client_id, path.connection_id, path.port_id, path.channel_id
        );
        self.path = Some(path);
        Ok(())
    }

    pub fn path(&self) -> Result<&PathEnd, ProverError> {
        self.path.as_ref().ok_or(ProverError::RelayInfoNotSet)
    }

    /// Establish the service connection ahead of relaying
    pub async fn setup_for_relay(&self) -> Result<(), ProverError> {
        self.service().await?;
        Ok(())
    }

    /// Release the service connection; it is dialed again on next use
    pub async fn close(&self) {
        if let Some(connection) = &self.connection {
            connection.close().await;
        }
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    pub fn chain_id(&self) -> String {
        self.origin.chain_id()
    }

    pub fn origin_prover(&self) -> &O {
        &self.origin
    }

    pub async fn get_latest_finalized_header(&self) -> Result<Box<dyn Header>, ProverError> {
        Ok(self.origin.get_latest_finalized_header().await?)
    }

    /// Create the mirror client from the origin's initial states
    pub async fn create_mirror_client(
        &self,
        client_state: Any,
        consensus_state: Any,
    ) -> Result<PackedClient, ProverError> {
        let service = self.service().await?;
        ClientLifecycle::new(service.as_ref(), &self.config)
            .create_mirror_client(client_state, consensus_state)
            .await
    }

    /// Build the destination create-client message for a client trusting `header`
    pub async fn create_msg_create_client(
        &self,
        header: &dyn Header,
        signer: String,
    ) -> Result<MsgCreateClient, ProverError> {
        let (client_state, consensus_state) = self.origin.create_initial_state(header).await?;
        let packed = self
            .create_mirror_client(client_state, consensus_state)
            .await?;
        Ok(MsgCreateClient {
            client_state: packed.client_state,
            consensus_state: packed.consensus_state,
            signer,
        })
    }

    /// Apply origin headers to the mirror client, in order
    pub async fn apply_headers(
        &self,
        headers: &[Box<dyn Header>],
    ) -> Result<Vec<UpdateClientHeader>, ProverError> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let service = self.service().await?;
        ClientLifecycle::new(service.as_ref(), &self.config)
            .apply_headers(headers)
            .await
    }

    /// Compute the origin headers the counterparty needs and apply them to the mirror client
    pub async fn setup_headers_for_update(
        &self,
        counterparty: &dyn CounterpartyQuerier,
        latest: &dyn Header,
    ) -> Result<Vec<UpdateClientHeader>, ProverError> {
        self.service().await?;
        let headers = self
            .origin
            .setup_headers_for_update(counterparty, latest)
            .await?;
        self.apply_headers(&headers).await
    }

    pub async fn query_client_state_with_proof(
        &self,
        ctx: &QueryContext,
    ) -> Result<QueryResponse<Any>, ProverError> {
        let kind = ClientStateKind {
            counterparty_client_id: self.path()?.client_id.clone(),
        };
        let origin = self.origin.query_client_state_with_proof(ctx).await?;
        self.delegate(&kind, origin).await
    }

    pub async fn query_client_consensus_state_with_proof(
        &self,
        ctx: &QueryContext,
        consensus_height: Height,
    ) -> Result<QueryResponse<Any>, ProverError> {
        let kind = ConsensusStateKind {
            counterparty_client_id: self.path()?.client_id.clone(),
            consensus_height,
        };
        let origin = self
            .origin
            .query_client_consensus_state_with_proof(ctx, consensus_height)
            .await?;
        self.delegate(&kind, origin).await
    }

    pub async fn query_connection_with_proof(
        &self,
        ctx: &QueryContext,
    ) -> Result<QueryResponse<ConnectionEnd>, ProverError> {
        let kind = ConnectionKind {
            connection_id: self.path()?.connection_id.clone(),
        };
        let origin = self.origin.query_connection_with_proof(ctx).await?;
        self.delegate(&kind, origin).await
    }

    pub async fn query_channel_with_proof(
        &self,
        ctx: &QueryContext,
    ) -> Result<QueryResponse<ChannelEnd>, ProverError> {
        let path = self.path()?;
        let kind = ChannelKind {
            port_id: path.port_id.clone(),
            channel_id: path.channel_id.clone(),
        };
        let origin = self.origin.query_channel_with_proof(ctx).await?;
        self.delegate(&kind, origin).await
    }

    pub async fn query_packet_commitment_with_proof(
        &self,
        ctx: &QueryContext,
        sequence: u64,
    ) -> Result<QueryResponse<Vec<u8>>, ProverError> {
        let path = self.path()?;
        let kind = PacketCommitmentKind {
            port_id: path.port_id.clone(),
            channel_id: path.channel_id.clone(),
            sequence,
        };
        let origin = self
            .origin
            .query_packet_commitment_with_proof(ctx, sequence)
            .await?;
        self.delegate(&kind, origin).await
    }

    pub async fn query_packet_acknowledgement_with_proof(
        &self,
        ctx: &QueryContext,
        sequence: u64,
    ) -> Result<QueryResponse<Vec<u8>>, ProverError> {
        let path = self.path()?;
        let kind = PacketAcknowledgementKind {
            port_id: path.port_id.clone(),
            channel_id: path.channel_id.clone(),
            sequence,
        };
        let origin = self
            .origin
            .query_packet_acknowledgement_with_proof(ctx, sequence)
            .await?;
        self.delegate(&kind, origin).await
    }

    fn connection(&self) -> Result<&ServiceConnection, ProverError> {
        self.connection
            .as_deref()
            .ok_or(ProverError::NotInitialized)
    }

    async fn service(&self) -> Result<Arc<dyn VerificationService>, ProverError> {
        Ok(self.connection()?.connect().await?)
    }

    async fn delegate<K: ObjectKind>(
        &self,
        kind: &K,
        origin: QueryResponse<K::Value>,
    ) -> Result<QueryResponse<K::Value>, ProverError> {
        DelegatedVerifier::new(
            self.connection.as_deref(),
            &self.config.mirror_client_id,
            self.debug,
        )
            .verify(kind, origin)
            .await
    }
}
