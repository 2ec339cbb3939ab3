//! FRI low-degree test, verifier side.
//!
//! Provides the coset folding rule, the proof representation with its wire
//! format, and the per-query verifier that checks Merkle openings and folding
//! consistency across every committed round.

pub mod folding;
pub mod proof;
mod types;
mod verifier;

pub use folding::{fold_layer, fold_pair, LayerDomain};
pub use proof::{FriProof, FriQueryProof, FriRoundOpening};
pub use types::{
    FriError, FriRejection, FriSetupError, Malformation, OpeningSide, FRI_PROOF_VERSION,
};
pub use verifier::{verify_fri, FriVerifier};
