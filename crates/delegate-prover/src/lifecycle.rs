//! Creation of the mirror client and header application.

use delegate_commitments::parse_update_client_commitment;
use delegate_service_client::{Any, CreateClientRequest, UpdateClientRequest};
use ibc_proto::ibc::core::client::v1::Height as PbHeight;
use tracing::{debug, info, warn};

use crate::client_state::{ClientState, ConsensusState, PackedClient, UpdateClientHeader};
use crate::config::ProverConfig;
use crate::error::ProverError;
use crate::origin::Header;
use crate::remote::VerificationService;

/// Drives the mirror client held by the verification service
pub struct ClientLifecycle<'a> {
    service: &'a dyn VerificationService,
    config: &'a ProverConfig,
}

impl<'a> ClientLifecycle<'a> {
    pub fn new(service: &'a dyn VerificationService, config: &'a ProverConfig) -> Self {
        Self { service, config }
    }

    /// Create the mirror client and return the destination client to submit.
    ///
    /// Fails if the service assigns an identifier other than the configured one.
    pub async fn create_mirror_client(
        &self,
        client_state: Any,
        consensus_state: Any,
    ) -> Result<PackedClient, ProverError> {
        let response = self
            .service
            .create_client(CreateClientRequest {
                client_state,
                consensus_state,
                signer: self.config.create_client_signer.clone(),
            })
            .await?;

        if response.client_id != self.config.mirror_client_id {
            warn!(
                "Service created client {} but {} is configured",
                response.client_id, self.config.mirror_client_id
            );
            return Err(ProverError::ConfigurationMismatch {
                expected: self.config.mirror_client_id.clone(),
                actual: response.client_id,
            });
        }
        info!("Created mirror client {}", response.client_id);

        let client_state = ClientState {
            latest_height: Some(PbHeight::default()),
            mrenclave: self.config.mrenclave_bytes()?.to_vec(),
            key_expiration: self.config.key_expiration_secs,
            keys: Vec::new(),
            attestation_times: Vec::new(),
            allowed_quote_statuses: self.config.allowed_quote_statuses.clone(),
            allowed_advisory_ids: self.config.allowed_advisory_ids.clone(),
        };
        Ok(PackedClient {
            client_state: client_state.to_any(),
            consensus_state: ConsensusState::default().to_any(),
        })
    }

    /// Apply origin headers to the mirror client, oldest first.
    ///
    /// Stops at the first failing header; headers produced before it are discarded.
    pub async fn apply_headers(
        &self,
        headers: &[Box<dyn Header>],
    ) -> Result<Vec<UpdateClientHeader>, ProverError> {
        if headers.is_empty() {
            debug!("No headers to apply, skipping update");
            return Ok(Vec::new());
        }

        let total = headers.len();
        let mut updates = Vec::with_capacity(total);
        for (index, header) in headers.iter().enumerate() {
            let update = self
                .apply_header(header.as_ref())
                .await
                .map_err(|err| ProverError::HeaderApplication {
                    index,
                    total,
                    source: Box::new(err),
                })?;
            updates.push(update);
        }
        info!(
            "Applied {} header(s) to mirror client {}",
            total, self.config.mirror_client_id
        );
        Ok(updates)
    }

    async fn apply_header(&self, header: &dyn Header) -> Result<UpdateClientHeader, ProverError> {
        let packed = header.pack()?;
        let response = self
            .service
            .update_client(UpdateClientRequest {
                client_id: self.config.mirror_client_id.clone(),
                header: packed,
            })
            .await?;
        let commitment = parse_update_client_commitment(&response.commitment)?;
        debug!(
            "Header {} applied: height {} -> {}, state {}",
            header.height(),
            commitment
                .prev_height
                .map(|h| h.to_string())
                .unwrap_or_else(|| "none".to_string()),
            commitment.new_height,
            commitment.new_state_id
        );
        Ok(UpdateClientHeader {
            commitment: response.commitment,
            signer: response.signer,
            signature: response.signature,
        })
    }
}
