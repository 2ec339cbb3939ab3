//! Error classes emitted by a verification session.
//!
//! | Class | Raised by | Outcome |
//! |-------|-----------|---------|
//! | [`ProtocolError`] | Calls made out of order by the integrator | Aborts the session |
//! | [`ProofError`] | Checks failed by the submitted proof | `Reject(reason)` verdict |
//! | [`VerifierError`] | Protocol, transcript, arithmetic, parameter or setup failures | `Error(reason)` verdict |

use core::fmt;

use thiserror::Error;

use crate::field::FieldError;
use crate::fri::{FriError, FriRejection, FriSetupError, Malformation, OpeningSide};
use crate::params::ParamsError;
use crate::ser::SerError;
use crate::transcript::TranscriptError;

use super::verifier::SessionState;

/// Session calls issued in an order the protocol does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A root was registered twice, or CP roots before the trace root.
    #[error("out-of-order registration: {what}")]
    OutOfOrderRegistration { what: &'static str },
    /// The CP root set does not have one root per folding round.
    #[error("expected {expected} CP roots, got {got}")]
    WrongRoundCount { expected: usize, got: usize },
    /// Query points were requested before every commitment was registered.
    #[error("commitments incomplete: missing {missing}")]
    IncompleteCommitments { missing: &'static str },
    /// The operation is not valid in the current session state.
    #[error("{operation} not allowed in state {state:?}")]
    InvalidState {
        state: SessionState,
        operation: &'static str,
    },
}

/// Why a structurally unusable proof was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Decoded proof has the wrong shape.
    #[error(transparent)]
    Structure(#[from] Malformation),
    /// Proof bytes could not be decoded.
    #[error(transparent)]
    Encoding(#[from] SerError),
}

/// Checks a submitted proof can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// An opened value does not authenticate against its round root.
    #[error("invalid inclusion proof (query {query}, round {round}, {side} opening)")]
    InvalidInclusionProof {
        query: usize,
        round: usize,
        side: OpeningSide,
    },
    /// A fold does not match the next round's opened value.
    #[error("folding inconsistency (query {query}, round {round})")]
    FoldingInconsistency { query: usize, round: usize },
    /// The last fold does not equal the claimed final constant.
    #[error("degree bound violation (query {query})")]
    DegreeBoundViolation { query: usize },
    /// The proof cannot be checked at all.
    #[error("malformed proof: {0}")]
    MalformedProof(#[from] MalformedReason),
}

impl ProofError {
    /// Index of the failing query, if the failure is local to one.
    pub fn query(&self) -> Option<usize> {
        match self {
            ProofError::InvalidInclusionProof { query, .. }
            | ProofError::FoldingInconsistency { query, .. }
            | ProofError::DegreeBoundViolation { query } => Some(*query),
            ProofError::MalformedProof(MalformedReason::Structure(inner)) => {
                FriError::MalformedProof(inner.clone()).query()
            }
            ProofError::MalformedProof(MalformedReason::Encoding(_)) => None,
        }
    }
}

/// Non-empty list of proof failures, in query order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    errors: Vec<ProofError>,
}

impl Rejection {
    /// First failure in query order.
    pub fn first(&self) -> &ProofError {
        &self.errors[0]
    }

    /// Every recorded failure.
    pub fn errors(&self) -> &[ProofError] {
        &self.errors
    }
}

impl From<ProofError> for Rejection {
    fn from(error: ProofError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        if self.errors.len() > 1 {
            write!(f, " (+{} more)", self.errors.len() - 1)?;
        }
        Ok(())
    }
}

/// Failures that end a session without judging the proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierError {
    /// The integrator drove the session incorrectly.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// The transcript refused an operation.
    #[error("transcript failure: {0}")]
    Transcript(#[from] TranscriptError),
    /// Field arithmetic failed.
    #[error("arithmetic failure: {0}")]
    Arithmetic(#[from] FieldError),
    /// Parameters failed validation.
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),
    /// The FRI verifier was bound to inputs inconsistent with the parameters.
    #[error(transparent)]
    FriSetup(#[from] FriSetupError),
}

/// Splits a FRI rejection into proof failures, or the first arithmetic
/// failure if folding itself could not be computed.
pub(crate) fn classify(rejection: FriRejection) -> Result<Rejection, VerifierError> {
    let mut errors = Vec::with_capacity(rejection.failures().len());
    for failure in rejection.failures() {
        let error = match failure.clone() {
            FriError::InvalidInclusionProof { query, round, side } => {
                ProofError::InvalidInclusionProof { query, round, side }
            }
            FriError::FoldingInconsistency { query, round } => {
                ProofError::FoldingInconsistency { query, round }
            }
            FriError::DegreeBoundViolation { query } => ProofError::DegreeBoundViolation { query },
            FriError::MalformedProof(inner) => MalformedReason::from(inner).into(),
            FriError::Arithmetic(err) => return Err(err.into()),
            FriError::Setup(err) => return Err(err.into()),
        };
        errors.push(error);
    }
    Ok(Rejection { errors })
}
