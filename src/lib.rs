//! Verification core for STARK proofs with FRI low-degree testing.
//!
//! A verifier binds a trace commitment and one constraint-polynomial (CP)
//! commitment per folding round, derives its challenges from a Fiat-Shamir
//! transcript and checks the prover's FRI openings at the derived query
//! points.
//!
//! ```text
//! field ─┬─ merkle ─┐
//!        ├─ transcript ─┼─ fri ── proof (session, facade)
//! hash ──┘          params ─┘
//! ```
//!
//! [`proof::StarkVerifier`] is the integration surface; the component
//! modules are public for callers that assemble sessions themselves.

#![forbid(unsafe_code)]

pub mod field;
pub mod fri;
pub mod hash;
pub mod merkle;
pub mod params;
pub mod proof;
pub mod ser;
pub mod transcript;
pub mod utils;

pub use field::{FieldElement, FieldElementOps, FieldError};
pub use fri::FriProof;
pub use merkle::{Digest, MerkleProof, MerkleRoot};
pub use params::{BuiltinProfile, VerifierParams, VerifierParamsBuilder};
pub use proof::{
    ProofError, ProtocolError, StarkVerifier, VerificationSession, VerificationVerdict,
    VerifierError,
};

/// Runs a complete session over raw commitments and an encoded proof.
///
/// Registration and derivation failures are folded into an `Error` verdict.
pub fn verify_proof(
    params: VerifierParams,
    trace_root: [u8; 32],
    cp_roots: &[[u8; 32]],
    public_inputs: &[u8],
    proof_bytes: &[u8],
) -> VerificationVerdict {
    let mut verifier = StarkVerifier::new(params);
    let prepared = verifier
        .set_trace_root(trace_root)
        .and_then(|()| verifier.set_cp_roots(cp_roots))
        .and_then(|()| verifier.derive_query_points(public_inputs).map(|_| ()));
    match prepared {
        Ok(()) => verifier.submit_fri_proof_bytes(proof_bytes),
        Err(err) => VerificationVerdict::Error(err),
    }
}
