//! Byte-oriented facade over [`VerificationSession`].
//!
//! Integrators hand over raw 32-byte roots and encoded proofs; the facade
//! wraps them into crate types and forwards to the session.

use crate::fri::FriProof;
use crate::merkle::{Digest, MerkleRoot};
use crate::params::{BuiltinProfile, VerifierParams, VerifierParamsBuilder};

use super::errors::VerifierError;
use super::verdict::VerificationVerdict;
use super::verifier::VerificationSession;

/// Entry point for one proof verification.
///
/// ```text
/// set_trace_root -> set_cp_roots -> derive_query_points -> submit_fri_proofs
/// ```
#[derive(Debug)]
pub struct StarkVerifier {
    session: VerificationSession,
}

impl StarkVerifier {
    /// Opens a verifier bound to `params`.
    pub fn new(params: VerifierParams) -> Self {
        Self {
            session: VerificationSession::new(params),
        }
    }

    /// Opens a verifier for a built-in profile.
    pub fn from_profile(profile: BuiltinProfile) -> Result<Self, VerifierError> {
        let params = VerifierParamsBuilder::from_profile(profile).build()?;
        Ok(Self::new(params))
    }

    /// Registers the trace commitment.
    pub fn set_trace_root(&mut self, root: [u8; 32]) -> Result<(), VerifierError> {
        self.session.register_trace_root(Digest::new(root))
    }

    /// Registers the CP commitments, one per folding round.
    pub fn set_cp_roots(&mut self, roots: &[[u8; 32]]) -> Result<(), VerifierError> {
        let roots: Vec<MerkleRoot> = roots.iter().copied().map(Digest::new).collect();
        self.session.register_cp_roots(&roots)
    }

    /// Derives the query points the prover must open.
    pub fn derive_query_points(&mut self, public_inputs: &[u8]) -> Result<Vec<usize>, VerifierError> {
        self.session
            .derive_query_points(public_inputs)
            .map(<[usize]>::to_vec)
    }

    /// Checks the FRI openings and returns the verdict.
    pub fn submit_fri_proofs(&mut self, proof: FriProof) -> VerificationVerdict {
        self.session.verify(&proof)
    }

    /// Decodes and checks an encoded [`FriProof`].
    pub fn submit_fri_proof_bytes(&mut self, bytes: &[u8]) -> VerificationVerdict {
        self.session.verify_bytes(bytes)
    }

    /// Derived query points, empty before derivation.
    pub fn selected_points(&self) -> &[usize] {
        self.session.query_points()
    }

    /// Query point `i`, if derived.
    pub fn selected_point(&self, i: usize) -> Option<usize> {
        self.session.query_points().get(i).copied()
    }

    /// Recorded verdict, if any.
    pub fn verdict(&self) -> Option<&VerificationVerdict> {
        self.session.verdict()
    }

    /// Underlying session.
    pub fn session(&self) -> &VerificationSession {
        &self.session
    }
}

impl Default for StarkVerifier {
    fn default() -> Self {
        Self::new(VerifierParams::default())
    }
}
