use core::fmt;

use thiserror::Error;

use crate::field::FieldError;
use crate::merkle::MerkleError;
use crate::params::HashKind;

/// Current version tag of the FRI proof wire format.
pub const FRI_PROOF_VERSION: u16 = 1;

/// Which of the two openings of a round failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningSide {
    /// Value at the query position `q`.
    Value,
    /// Value at the conjugate position `q + N_i / 2`.
    Conjugate,
}

impl fmt::Display for OpeningSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningSide::Value => write!(f, "value"),
            OpeningSide::Conjugate => write!(f, "conjugate"),
        }
    }
}

/// Structural defects of a FRI proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    /// Unknown proof version.
    #[error("unsupported proof version {got}")]
    Version { got: u16 },
    /// Number of query proofs differs from the derived query points.
    #[error("expected {expected} query proofs, got {got}")]
    QueryCount { expected: usize, got: usize },
    /// A query proof covers the wrong number of rounds.
    #[error("query {query}: expected {expected} round openings, got {got}")]
    RoundCount {
        query: usize,
        expected: usize,
        got: usize,
    },
    /// A query proof claims an index other than the derived one.
    #[error("query {query}: claims index {got}, transcript derived {expected}")]
    IndexMismatch {
        query: usize,
        expected: usize,
        got: u32,
    },
    /// An authentication path opens the wrong leaf.
    #[error("query {query}, round {round}: {side} path opens leaf {got}, expected {expected}")]
    PathIndex {
        query: usize,
        round: usize,
        side: OpeningSide,
        expected: usize,
        got: u32,
    },
    /// An authentication path has the wrong shape.
    #[error("query {query}, round {round}: {side} path rejected: {reason}")]
    Path {
        query: usize,
        round: usize,
        side: OpeningSide,
        reason: MerkleError,
    },
}

/// A [`super::FriVerifier`] bound to inputs its parameters do not describe.
///
/// These never originate from the prover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FriSetupError {
    /// Round roots or fold challenges disagree with the configured round count.
    #[error("expected {expected} rounds, got {roots} roots and {betas} fold challenges")]
    RoundInputs {
        expected: usize,
        roots: usize,
        betas: usize,
    },
    /// The Merkle hasher is not the backend the parameters select.
    #[error("merkle hasher {backend} does not match configured {configured}")]
    HashBackend {
        backend: HashKind,
        configured: HashKind,
    },
}

/// FRI verification failures mapped to the rejection classes of a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FriError {
    /// An opened value does not authenticate against its round root.
    #[error("query {query}, round {round}: {side} opening does not match the committed root")]
    InvalidInclusionProof {
        query: usize,
        round: usize,
        side: OpeningSide,
    },
    /// Folding round `round` does not produce round `round + 1`'s opened value.
    #[error("query {query}: folding of round {round} disagrees with the next round")]
    FoldingInconsistency { query: usize, round: usize },
    /// The last folded value differs from the claimed final constant.
    #[error("query {query}: final folded value differs from the claimed constant")]
    DegreeBoundViolation { query: usize },
    /// The proof does not have the shape the parameters require.
    #[error("malformed proof: {0}")]
    MalformedProof(#[from] Malformation),
    /// Field arithmetic failed while folding.
    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] FieldError),
    /// The verifier itself was wired incorrectly.
    #[error("fri setup: {0}")]
    Setup(#[from] FriSetupError),
}

impl FriError {
    /// Index of the query the failure belongs to, if any.
    pub fn query(&self) -> Option<usize> {
        match self {
            FriError::InvalidInclusionProof { query, .. }
            | FriError::FoldingInconsistency { query, .. }
            | FriError::DegreeBoundViolation { query } => Some(*query),
            FriError::MalformedProof(
                Malformation::RoundCount { query, .. }
                | Malformation::IndexMismatch { query, .. }
                | Malformation::PathIndex { query, .. }
                | Malformation::Path { query, .. },
            ) => Some(*query),
            _ => None,
        }
    }
}

/// Every failure collected while verifying one proof, in query order.
///
/// Under fail-fast verification this holds exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriRejection {
    failures: Vec<FriError>,
}

impl FriRejection {
    pub(crate) fn new(failures: Vec<FriError>) -> Self {
        debug_assert!(!failures.is_empty());
        Self { failures }
    }

    /// The first failure in query order.
    pub fn first(&self) -> &FriError {
        &self.failures[0]
    }

    /// All failures in query order.
    pub fn failures(&self) -> &[FriError] {
        &self.failures
    }
}

impl From<FriError> for FriRejection {
    fn from(error: FriError) -> Self {
        Self::new(vec![error])
    }
}

impl fmt::Display for FriRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        if self.failures.len() > 1 {
            write!(f, " (+{} more)", self.failures.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for FriRejection {}
