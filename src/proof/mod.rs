//! # Proof module overview
//!
//! ```text
//! proof
//! ├── verifier : session state machine driving transcript and FRI checks
//! ├── api      : byte-oriented facade for integrators
//! ├── verdict  : terminal session outcome
//! └── errors   : protocol, proof and verifier error classes
//! ```
//!
//! A session consumes commitments in protocol order, derives its challenges
//! from the transcript and produces exactly one [`VerificationVerdict`].

pub mod api;
pub mod errors;
pub mod verdict;
pub mod verifier;

pub use api::StarkVerifier;
pub use errors::{MalformedReason, ProofError, ProtocolError, Rejection, VerifierError};
pub use verdict::VerificationVerdict;
pub use verifier::{SessionState, VerificationSession};
