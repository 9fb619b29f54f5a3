//! Verification-delegation prover.
//!
//! Wraps an origin-chain prover and replaces every proof it produces with a commitment
//! signed by a remote attested verification service. The destination chain then only
//! has to check a signature instead of replaying the origin chain's proof verification.
//!
//! - [`lifecycle`] creates the service's mirror of the origin light client and keeps it
//!   updated, header by header.
//! - [`verifier`] delegates one proof of any object kind described in [`kinds`].
//! - [`prover::DelegatingProver`] is the per-path session tying both together.

pub mod client_state;
pub mod config;
pub mod error;
pub mod kinds;
pub mod lifecycle;
pub mod origin;
pub mod prover;
pub mod remote;
pub mod verifier;

#[cfg(test)]
mod testing;

pub use client_state::{ClientState, ConsensusState, MsgCreateClient, PackedClient, UpdateClientHeader};
pub use config::{ConfigError, PathEnd, ProverConfig};
pub use error::ProverError;
pub use origin::{CounterpartyQuerier, Header, OriginProver, QueryContext, QueryResponse};
pub use prover::{DelegatingProver, InitOptions};
pub use remote::{Connector, HttpConnector, ServiceConnection, VerificationService};
