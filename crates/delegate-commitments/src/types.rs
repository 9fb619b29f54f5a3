//! Primitive types shared by commitments, service messages and the prover.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Height of a chain, split into a revision (fork) number and the height within it
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Height {
    /// Revision number, bumped on chain upgrades that reset the height
    pub revision_number: u64,
    /// Block height within the revision
    pub revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    /// The zero height, used as the initial height of a freshly created client
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.revision_number == 0 && self.revision_height == 0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

/// Digest identifying a light client state inside the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub [u8; 32]);

impl StateId {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

/// Serde helpers encoding byte vectors as standard base64 strings in human-readable formats
pub mod base64_bytes {
    use base64::{engine::general_purpose, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
        } else {
            serializer.serialize_bytes(bytes)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let encoded = String::deserialize(deserializer)?;
            general_purpose::STANDARD
                .decode(encoded)
                .map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_ordering_and_display() {
        let a = Height::new(1, 100);
        let b = Height::new(1, 101);
        let c = Height::new(2, 1);
        assert!(a < b && b < c);
        assert_eq!(a.to_string(), "1-100");
        assert!(Height::zero().is_zero());
        assert!(!a.is_zero());
    }

    #[test]
    fn test_base64_bytes_in_json() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Blob {
            #[serde(with = "base64_bytes")]
            value: Vec<u8>,
        }
        let blob = Blob {
            value: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_value(&blob).unwrap();
        assert_eq!(json["value"], "3q2+7w==");
        let decoded: Blob = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, blob);
    }
}
