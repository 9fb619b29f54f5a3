//! JSON-RPC client for the remote attested verification service.
//!
//! The client performs exactly one request per call: retry and backoff policy belong
//! to the caller, which can tell transport failures from attestation refusals via
//! [`ServiceClientError::is_transport`].

use std::time::Duration;

use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ArrayParams;
use jsonrpsee::http_client::HttpClient;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod msgs;
pub mod objects;

pub use jsonrpsee::core::client::Error as TransportError;
pub use msgs::*;
pub use objects::*;

/// Error types for verification service client operations
#[derive(Error, Debug)]
pub enum ServiceClientError {
    /// Service could not be reached or did not answer in time
    #[error("Transport error: {0}")]
    Transport(TransportError),
    /// Service answered with a JSON-RPC error object
    #[error("Service rejected {method}: code={code} message={message}")]
    Rejected {
        method: &'static str,
        code: i32,
        message: String,
    },
    /// Request parameters could not be encoded
    #[error("Failed to encode request parameters: {0}")]
    Params(#[from] serde_json::Error),
}

impl ServiceClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceClientError::Transport(_))
    }
}

/// Default HTTP request timeout
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Verification service JSON-RPC client
#[derive(Debug)]
pub struct ServiceClient {
    address: String,
    client: HttpClient,
}

impl ServiceClient {
    /// Create a new client for the service at `address`
    pub fn new(address: String, timeout: Duration) -> Result<Self, ServiceClientError> {
        let client = HttpClient::builder()
            .request_timeout(timeout)
            .build(&address)
            .map_err(ServiceClientError::Transport)?;
        Ok(Self { address, client })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn request<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &'static str,
        request: P,
    ) -> Result<T, ServiceClientError> {
        let mut params = ArrayParams::new();
        params.insert(request)?;
        debug!("Calling {} on {}", method, self.address);
        self.client
            .request(method, params)
            .await
            .map_err(|err| match err {
                TransportError::Call(obj) => ServiceClientError::Rejected {
                    method,
                    code: obj.code(),
                    message: obj.message().to_string(),
                },
                other => ServiceClientError::Transport(other),
            })
    }

    /// Create a mirror client and return the identifier assigned by the service
    pub async fn create_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<CreateClientResponse, ServiceClientError> {
        self.request(methods::CREATE_CLIENT, request).await
    }

    /// Apply a header to a mirror client
    pub async fn update_client(
        &self,
        request: UpdateClientRequest,
    ) -> Result<UpdateClientResponse, ServiceClientError> {
        self.request(methods::UPDATE_CLIENT, request).await
    }

    /// Submit a delegated verification request of any kind
    pub async fn verify(&self, request: VerifyRequest) -> Result<VerifyResponse, ServiceClientError> {
        let method = request.method();
        match request {
            VerifyRequest::ClientState(r) => self.request(method, r).await,
            VerifyRequest::ConsensusState(r) => self.request(method, r).await,
            VerifyRequest::Connection(r) => self.request(method, r).await,
            VerifyRequest::Channel(r) => self.request(method, r).await,
            VerifyRequest::PacketCommitment(r) => self.request(method, r).await,
            VerifyRequest::PacketAcknowledgement(r) => self.request(method, r).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delegate_commitments::Height;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    /// Answers a JSON-RPC request with the configured result or error, echoing its id
    struct JsonRpcResponder {
        outcome: Result<Value, Value>,
    }

    impl Respond for JsonRpcResponder {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            let mut response = json!({ "jsonrpc": "2.0", "id": body["id"].clone() });
            match &self.outcome {
                Ok(result) => response["result"] = result.clone(),
                Err(error) => response["error"] = error.clone(),
            }
            ResponseTemplate::new(200).set_body_json(response)
        }
    }

    async fn mock_method(server: &MockServer, name: &str, outcome: Result<Value, Value>) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": name })))
            .respond_with(JsonRpcResponder { outcome })
            .expect(1)
            .mount(server)
            .await;
    }

    fn client(server: &MockServer) -> ServiceClient {
        ServiceClient::new(server.uri(), HTTP_REQUEST_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn test_create_client() {
        let server = MockServer::start().await;
        mock_method(
            &server,
            methods::CREATE_CLIENT,
            Ok(json!({ "client_id": "07-tendermint-0" })),
        )
        .await;

        let res = client(&server)
            .create_client(CreateClientRequest {
                client_state: pack_any("/origin.ClientState", vec![1]),
                consensus_state: pack_any("/origin.ConsensusState", vec![2]),
                signer: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(res.client_id, "07-tendermint-0");
    }

    #[tokio::test]
    async fn test_verify_sends_base64_fields_and_decodes_commitment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": methods::VERIFY_CONNECTION,
                "params": [{ "client_id": "07-tendermint-0", "prefix": "aWJj", "proof": "AQID" }]
            })))
            .respond_with(JsonRpcResponder {
                outcome: Ok(json!({ "commitment": "qg==", "signer": "AQ==", "signature": "Ag==" })),
            })
            .expect(1)
            .mount(&server)
            .await;

        let res = client(&server)
            .verify(VerifyRequest::Connection(VerifyConnectionRequest {
                client_id: "07-tendermint-0".to_string(),
                prefix: b"ibc".to_vec(),
                connection_id: "connection-0".to_string(),
                expected_connection: ConnectionEnd::default(),
                proof_height: Height::new(0, 5),
                proof: vec![1, 2, 3],
            }))
            .await
            .unwrap();
        assert_eq!(res.commitment, vec![0xaa]);
        assert_eq!(res.signer, vec![0x01]);
        assert_eq!(res.signature, vec![0x02]);
    }

    #[tokio::test]
    async fn test_error_object_maps_to_rejection() {
        let server = MockServer::start().await;
        mock_method(
            &server,
            methods::UPDATE_CLIENT,
            Err(json!({ "code": -32000, "message": "header verification failed" })),
        )
        .await;

        let err = client(&server)
            .update_client(UpdateClientRequest {
                client_id: "07-tendermint-0".to_string(),
                header: pack_any("/origin.Header", vec![9]),
            })
            .await
            .unwrap_err();
        match err {
            ServiceClientError::Rejected {
                method,
                code,
                message,
            } => {
                assert_eq!(method, methods::UPDATE_CLIENT);
                assert_eq!(code, -32000);
                assert_eq!(message, "header verification failed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = ServiceClient::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();
        let err = client
            .create_client(CreateClientRequest {
                client_state: Any::default(),
                consensus_state: Any::default(),
                signer: String::new(),
            })
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
