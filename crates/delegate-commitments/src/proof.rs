//! Delegated proof layout consumed by the destination chain's commitment verifier.
//!
//! A proof is the RLP list `[commitment, signer, signature]`, each item an RLP byte string.

use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, Header};

use crate::codec::{CommitmentError, MAX_ENCODED_SIZE};
use crate::commitment::{parse_state_commitment, StateCommitment};

/// A commitment together with the identity of its signer and the signature over it.
///
/// Field order is part of the wire layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentProof {
    /// Raw commitment bytes exactly as returned by the service
    pub commitment: Vec<u8>,
    /// Address of the enclave key that signed the commitment
    pub signer: Vec<u8>,
    /// Signature over `commitment`
    pub signature: Vec<u8>,
}

impl CommitmentProof {
    pub fn new(commitment: Vec<u8>, signer: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            commitment,
            signer,
            signature,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode(&mut out);
        out
    }

    /// Decode a proof, consuming the input exactly
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CommitmentError> {
        if bytes.is_empty() {
            return Err(CommitmentError::Empty);
        }
        if bytes.len() as u64 > MAX_ENCODED_SIZE {
            return Err(CommitmentError::TooLarge(bytes.len()));
        }
        let mut buf = bytes;
        let proof = Self::decode(&mut buf).map_err(CommitmentError::Rlp)?;
        if !buf.is_empty() {
            return Err(CommitmentError::TrailingBytes(buf.len()));
        }
        Ok(proof)
    }

    /// Decode the embedded commitment as a state commitment
    pub fn state_commitment(&self) -> Result<StateCommitment, CommitmentError> {
        parse_state_commitment(&self.commitment)
    }

    fn payload_length(&self) -> usize {
        self.commitment.as_slice().length()
            + self.signer.as_slice().length()
            + self.signature.as_slice().length()
    }
}

impl Encodable for CommitmentProof {
    fn encode(&self, out: &mut dyn BufMut) {
        Header {
            list: true,
            payload_length: self.payload_length(),
        }
        .encode(out);
        self.commitment.as_slice().encode(out);
        self.signer.as_slice().encode(out);
        self.signature.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length();
        payload_length + length_of_length(payload_length)
    }
}

impl Decodable for CommitmentProof {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        let commitment = Header::decode_bytes(&mut payload, false)?.to_vec();
        let signer = Header::decode_bytes(&mut payload, false)?.to_vec();
        let signature = Header::decode_bytes(&mut payload, false)?.to_vec();
        if !payload.is_empty() {
            return Err(alloy_rlp::Error::Custom("unexpected items in proof list"));
        }
        Ok(Self::new(commitment, signer, signature))
    }
}

/// Serialize (commitment, signer, signature) into delegated proof bytes
pub fn serialize_proof(commitment: &[u8], signer: &[u8], signature: &[u8]) -> Vec<u8> {
    CommitmentProof::new(commitment.to_vec(), signer.to_vec(), signature.to_vec()).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Height, StateId};

    #[test]
    fn test_serialize_proof_layout() {
        // 0xaa needs a string header, the empty signature encodes as 0x80
        let bytes = serialize_proof(&[0xaa], &[0x01, 0x02], &[]);
        assert_eq!(bytes, vec![0xc6, 0x81, 0xaa, 0x82, 0x01, 0x02, 0x80]);

        // Single bytes below 0x80 are their own encoding
        let bytes = serialize_proof(&[0x01], &[0x02], &[0x03]);
        assert_eq!(bytes, vec![0xc3, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_long_items_use_long_headers() {
        let signature = vec![0x66; 65];
        let bytes = serialize_proof(&[0x01; 100], &[0x55; 20], &signature);
        // 2 + 100, 1 + 20, 2 + 65
        assert_eq!(bytes[..3], [0xf8, 190, 0xb8]);
        let proof = CommitmentProof::from_bytes(&bytes).unwrap();
        assert_eq!(proof.signature, signature);
        assert_eq!(proof.length(), bytes.len());
    }

    #[test]
    fn test_parsed_commitment_reserializes_identically() {
        let commitment = StateCommitment {
            prefix: b"ibc".to_vec(),
            path: "channelEnds/ports/transfer/channels/channel-0".to_string(),
            value: Some([0x33; 32]),
            height: Height::new(1, 77),
            state_id: StateId([0x44; 32]),
        };
        let commitment_bytes = commitment.to_bytes();
        let signer = vec![0x55; 20];
        let signature = vec![0x66; 65];

        let parsed = parse_state_commitment(&commitment_bytes).unwrap();
        let via_parse = serialize_proof(&parsed.to_bytes(), &signer, &signature);
        let direct = CommitmentProof::new(commitment_bytes, signer, signature).to_bytes();
        assert_eq!(via_parse, direct);

        let decoded = CommitmentProof::from_bytes(&direct).unwrap();
        assert_eq!(decoded.state_commitment().unwrap(), commitment);
    }

    #[test]
    fn test_proof_rejects_malformed_input() {
        let mut bytes = serialize_proof(&[1], &[2], &[3]);
        bytes.push(0xff);
        assert!(matches!(
            CommitmentProof::from_bytes(&bytes),
            Err(CommitmentError::TrailingBytes(1))
        ));

        // Byte string instead of a list
        assert!(matches!(
            CommitmentProof::from_bytes(&[0x83, 1, 2, 3]),
            Err(CommitmentError::Rlp(_))
        ));
        // List with a fourth item
        assert!(matches!(
            CommitmentProof::from_bytes(&[0xc4, 1, 2, 3, 4]),
            Err(CommitmentError::Rlp(_))
        ));
        // Truncated list
        assert!(matches!(
            CommitmentProof::from_bytes(&[0xc3, 1, 2]),
            Err(CommitmentError::Rlp(_))
        ));
        assert!(matches!(
            CommitmentProof::from_bytes(&[]),
            Err(CommitmentError::Empty)
        ));
    }
}
