//! Session configuration and path identifiers.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of an attested enclave key registered in the destination client: 7 days
pub const DEFAULT_KEY_EXPIRATION_SECS: u64 = 60 * 60 * 24 * 7;

/// Default timeout of a single request to the verification service
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Error types for configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Verification service address must not be empty")]
    EmptyServiceAddress,
    #[error("Mirror client id must not be empty")]
    EmptyClientId,
    #[error("Invalid MRENCLAVE '{0}': expected 32 bytes hex")]
    InvalidMrenclave(String),
    #[error("Key expiration must be non-zero")]
    ZeroKeyExpiration,
}

/// Configuration of a delegating prover session, immutable once the session is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverConfig {
    /// Verification service JSON-RPC endpoint
    pub service_address: String,
    /// Identifier the service is expected to assign to the mirror client
    pub mirror_client_id: String,
    /// Enclave measurement the destination client accepts (hex, optional 0x prefix)
    pub mrenclave: String,
    /// Attestation quote statuses accepted besides "OK"
    #[serde(default)]
    pub allowed_quote_statuses: Vec<String>,
    /// Security advisory ids tolerated in attestation reports
    #[serde(default)]
    pub allowed_advisory_ids: Vec<String>,
    /// Lifetime of registered enclave keys in seconds
    #[serde(default = "default_key_expiration_secs")]
    pub key_expiration_secs: u64,
    /// Timeout of a single service request in seconds
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
    /// Signer sent along with the create-client request; the service ignores it today
    #[serde(default)]
    pub create_client_signer: String,
}

fn default_key_expiration_secs() -> u64 {
    DEFAULT_KEY_EXPIRATION_SECS
}

fn default_rpc_timeout_secs() -> u64 {
    DEFAULT_RPC_TIMEOUT_SECS
}

impl ProverConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_address.trim().is_empty() {
            return Err(ConfigError::EmptyServiceAddress);
        }
        if self.mirror_client_id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        if self.key_expiration_secs == 0 {
            return Err(ConfigError::ZeroKeyExpiration);
        }
        self.mrenclave_bytes()?;
        Ok(())
    }

    /// Decoded enclave measurement
    pub fn mrenclave_bytes(&self) -> Result<[u8; 32], ConfigError> {
        let s = self.mrenclave.trim();
        let hex_str = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        hex::decode(hex_str)
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok())
            .ok_or_else(|| ConfigError::InvalidMrenclave(self.mrenclave.clone()))
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

/// Identifiers of the destination-chain objects relayed over one path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEnd {
    pub client_id: String,
    pub connection_id: String,
    pub port_id: String,
    pub channel_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MRENCLAVE: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn test_load_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "service_address": "http://localhost:50051",
                "mirror_client_id": "07-tendermint-0",
                "mrenclave": "{MRENCLAVE}",
                "allowed_quote_statuses": ["GROUP_OUT_OF_DATE"]
            }}"#
        )
        .unwrap();

        let config = ProverConfig::load(file.path()).unwrap();
        assert_eq!(config.key_expiration_secs, 604800);
        assert_eq!(config.rpc_timeout(), Duration::from_secs(10));
        assert_eq!(config.create_client_signer, "");
        assert!(config.allowed_advisory_ids.is_empty());
        assert_eq!(config.allowed_quote_statuses, vec!["GROUP_OUT_OF_DATE"]);
        assert_eq!(config.mrenclave_bytes().unwrap(), [1u8; 32]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ProverConfig {
            service_address: "http://localhost:50051".to_string(),
            mirror_client_id: "07-tendermint-0".to_string(),
            mrenclave: "abcd".to_string(),
            allowed_quote_statuses: vec![],
            allowed_advisory_ids: vec![],
            key_expiration_secs: DEFAULT_KEY_EXPIRATION_SECS,
            rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
            create_client_signer: String::new(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMrenclave(_))
        ));

        let config = ProverConfig {
            mrenclave: MRENCLAVE.to_string(),
            mirror_client_id: " ".to_string(),
            ..config
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyClientId)));

        let config = ProverConfig {
            mirror_client_id: "07-tendermint-0".to_string(),
            key_expiration_secs: 0,
            ..config
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroKeyExpiration)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProverConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
