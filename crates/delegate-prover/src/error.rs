use delegate_commitments::CommitmentError;
use delegate_service_client::ServiceClientError;
use thiserror::Error;

use crate::config::ConfigError;

/// Error types for delegated proving
#[derive(Error, Debug)]
pub enum ProverError {
    /// The service assigned a client identifier other than the configured one
    #[error("Mirror client id mismatch: configured '{expected}', but the service created '{actual}'")]
    ConfigurationMismatch { expected: String, actual: String },
    /// The request did not reach the service or no answer came back
    #[error("Verification service request failed: {0}")]
    Transport(#[source] ServiceClientError),
    /// The service refused to attest
    #[error("Verification service rejected the request: {0}")]
    VerificationRejected(#[source] ServiceClientError),
    /// Commitment bytes returned by the service do not decode
    #[error("Malformed commitment: {0}")]
    MalformedCommitment(#[from] CommitmentError),
    /// A header of an update batch failed, the whole batch is void
    #[error("Failed to apply header at index {index} of {total}: {source}")]
    HeaderApplication {
        index: usize,
        total: usize,
        #[source]
        source: Box<ProverError>,
    },
    /// Origin chain prover failure
    #[error("Origin prover error: {0}")]
    Origin(#[from] anyhow::Error),
    /// Path identifiers are required but were never set
    #[error("Relay info is not set")]
    RelayInfoNotSet,
    /// Path identifiers can only be set once per session
    #[error("Relay info is already set")]
    RelayInfoAlreadySet,
    /// The session has no service connection yet
    #[error("Prover is not initialized")]
    NotInitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ServiceClientError> for ProverError {
    fn from(err: ServiceClientError) -> Self {
        match err {
            ServiceClientError::Rejected { .. } => ProverError::VerificationRejected(err),
            _ => ProverError::Transport(err),
        }
    }
}

impl ProverError {
    /// Whether resubmitting the same call may succeed; only transport failures qualify
    pub fn is_retryable(&self) -> bool {
        match self {
            ProverError::Transport(err) => err.is_transport(),
            ProverError::HeaderApplication { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}
