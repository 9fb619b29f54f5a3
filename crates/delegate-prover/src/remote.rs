//! Remote verification service seam and the connection owned by a session.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use delegate_service_client::{
    CreateClientRequest, CreateClientResponse, ServiceClient, ServiceClientError,
    UpdateClientRequest, UpdateClientResponse, VerifyRequest, VerifyResponse,
};
#[cfg(test)]
use mockall::automock;
use tokio::sync::Mutex;
use tracing::info;

/// Endpoints of the remote verification service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VerificationService: Send + Sync {
    async fn create_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<CreateClientResponse, ServiceClientError>;

    async fn update_client(
        &self,
        request: UpdateClientRequest,
    ) -> Result<UpdateClientResponse, ServiceClientError>;

    /// Delegated verification; the request variant selects the endpoint
    async fn verify(&self, request: VerifyRequest) -> Result<VerifyResponse, ServiceClientError>;
}

#[async_trait]
impl VerificationService for ServiceClient {
    async fn create_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<CreateClientResponse, ServiceClientError> {
        ServiceClient::create_client(self, request).await
    }

    async fn update_client(
        &self,
        request: UpdateClientRequest,
    ) -> Result<UpdateClientResponse, ServiceClientError> {
        ServiceClient::update_client(self, request).await
    }

    async fn verify(&self, request: VerifyRequest) -> Result<VerifyResponse, ServiceClientError> {
        ServiceClient::verify(self, request).await
    }
}

/// Establishes a connection to the verification service
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn VerificationService>, ServiceClientError>;
}

/// Connects to the JSON-RPC endpoint of the service
#[derive(Debug, Clone)]
pub struct HttpConnector {
    pub address: String,
    pub timeout: Duration,
}

#[async_trait]
impl Connector for HttpConnector {
    async fn connect(&self) -> Result<Arc<dyn VerificationService>, ServiceClientError> {
        let client = ServiceClient::new(self.address.clone(), self.timeout)?;
        info!("Connected to verification service at {}", self.address);
        Ok(Arc::new(client))
    }
}

/// Hands out an already established service
struct EstablishedConnector(Arc<dyn VerificationService>);

#[async_trait]
impl Connector for EstablishedConnector {
    async fn connect(&self) -> Result<Arc<dyn VerificationService>, ServiceClientError> {
        Ok(self.0.clone())
    }
}

/// Lazily established connection to the verification service.
///
/// Can be shared by several sessions; concurrent first use dials only once.
pub struct ServiceConnection {
    connector: Box<dyn Connector>,
    service: Mutex<Option<Arc<dyn VerificationService>>>,
}

impl ServiceConnection {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            service: Mutex::new(None),
        }
    }

    /// Connection to a JSON-RPC service endpoint
    pub fn http(address: String, timeout: Duration) -> Self {
        Self::new(Box::new(HttpConnector { address, timeout }))
    }

    /// Connection wrapping an existing service handle
    pub fn from_service(service: Arc<dyn VerificationService>) -> Self {
        Self::new(Box::new(EstablishedConnector(service)))
    }

    /// Return the established service, dialing first if needed
    pub async fn connect(&self) -> Result<Arc<dyn VerificationService>, ServiceClientError> {
        let mut slot = self.service.lock().await;
        if let Some(service) = slot.as_ref() {
            return Ok(service.clone());
        }
        let service = self.connector.connect().await?;
        *slot = Some(service.clone());
        Ok(service)
    }

    /// Drop the current handle and dial again
    pub async fn reconnect(&self) -> Result<Arc<dyn VerificationService>, ServiceClientError> {
        let mut slot = self.service.lock().await;
        slot.take();
        let service = self.connector.connect().await?;
        *slot = Some(service.clone());
        Ok(service)
    }

    /// Release the handle; the next call to [`Self::connect`] dials again
    pub async fn close(&self) {
        self.service.lock().await.take();
    }

    pub async fn is_connected(&self) -> bool {
        self.service.lock().await.is_some()
    }
}
