//! Delegated verification of a single origin proof.

use delegate_commitments::{parse_state_commitment, serialize_proof};
use tracing::{debug, info};

use crate::error::ProverError;
use crate::kinds::{ObjectKind, RequestBase, STORE_PREFIX};
use crate::origin::QueryResponse;
use crate::remote::ServiceConnection;

/// Replaces origin proofs with commitments attested by the verification service
pub struct DelegatedVerifier<'a> {
    connection: Option<&'a ServiceConnection>,
    client_id: &'a str,
    debug: bool,
}

impl<'a> DelegatedVerifier<'a> {
    /// Without a connection only non-existence proofs can be handled
    pub fn new(
        connection: Option<&'a ServiceConnection>,
        client_id: &'a str,
        debug: bool,
    ) -> Self {
        Self {
            connection,
            client_id,
            debug,
        }
    }

    /// Delegate the verification of `origin`.
    ///
    /// A response without proof bytes attests non-existence and is returned untouched
    /// without contacting the service, even when no connection was set up. Otherwise
    /// the returned proof is the serialized signed commitment, and its height is the
    /// one the service attested.
    pub async fn verify<K: ObjectKind>(
        &self,
        kind: &K,
        origin: QueryResponse<K::Value>,
    ) -> Result<QueryResponse<K::Value>, ProverError> {
        if origin.is_non_existence() {
            debug!(
                "Skipping delegation of {} at {}: non-existence proof",
                K::NAME,
                origin.proof_height
            );
            return Ok(origin);
        }

        let QueryResponse {
            value,
            proof,
            proof_height,
        } = origin;
        let request = kind.request(
            RequestBase {
                client_id: self.client_id.to_string(),
                prefix: STORE_PREFIX.to_vec(),
                proof_height,
                proof,
            },
            &value,
        );

        let connection = self.connection.ok_or(ProverError::NotInitialized)?;
        let service = connection.connect().await?;
        let response = service.verify(request).await?;
        let commitment = parse_state_commitment(&response.commitment)?;

        if self.debug {
            debug!(
                "Delegated {} commitment: path={} height={} state_id={} signer=0x{}",
                K::NAME,
                commitment.path,
                commitment.height,
                commitment.state_id,
                hex::encode(&response.signer)
            );
        }
        if commitment.height != proof_height {
            info!(
                "Service attested {} at {} instead of origin proof height {}",
                K::NAME,
                commitment.height,
                proof_height
            );
        }

        Ok(QueryResponse {
            value,
            proof: serialize_proof(&response.commitment, &response.signer, &response.signature),
            proof_height: commitment.height,
        })
    }
}
