use super::errors::{ProofError, Rejection, VerifierError};

/// Terminal outcome of a verification session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationVerdict {
    /// Every query passed.
    Accept,
    /// The proof failed at least one check.
    Reject(Rejection),
    /// The session could not judge the proof.
    Error(VerifierError),
}

impl VerificationVerdict {
    /// Whether the proof was accepted.
    pub fn is_accept(&self) -> bool {
        matches!(self, VerificationVerdict::Accept)
    }

    /// Whether the proof was rejected.
    pub fn is_reject(&self) -> bool {
        matches!(self, VerificationVerdict::Reject(_))
    }

    /// Whether the session ended with an error.
    pub fn is_error(&self) -> bool {
        matches!(self, VerificationVerdict::Error(_))
    }

    /// First proof failure of a rejection.
    pub fn first_rejection(&self) -> Option<&ProofError> {
        match self {
            VerificationVerdict::Reject(rejection) => Some(rejection.first()),
            _ => None,
        }
    }

    /// Every proof failure of a rejection, empty otherwise.
    pub fn rejections(&self) -> &[ProofError] {
        match self {
            VerificationVerdict::Reject(rejection) => rejection.errors(),
            _ => &[],
        }
    }

    /// Error that ended the session, if any.
    pub fn error(&self) -> Option<&VerifierError> {
        match self {
            VerificationVerdict::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Rejection> for VerificationVerdict {
    fn from(rejection: Rejection) -> Self {
        VerificationVerdict::Reject(rejection)
    }
}

impl From<VerifierError> for VerificationVerdict {
    fn from(err: VerifierError) -> Self {
        VerificationVerdict::Error(err)
    }
}
