use core::fmt;

use thiserror::Error;

/// Context markers used when reporting serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerKind {
    /// Top-level FRI proof framing.
    FriProof,
    /// Per-query section of a FRI proof.
    QueryProof,
    /// Per-round opening inside a query.
    RoundOpening,
    /// Merkle authentication path.
    MerklePath,
}

impl fmt::Display for SerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerKind::FriProof => write!(f, "fri proof"),
            SerKind::QueryProof => write!(f, "query proof"),
            SerKind::RoundOpening => write!(f, "round opening"),
            SerKind::MerklePath => write!(f, "merkle path"),
        }
    }
}

/// Canonical serialization error surfaced while encoding or decoding data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerError {
    /// Input ended before the expected number of bytes were read.
    #[error("{kind}: unexpected end of input while reading `{field}`")]
    UnexpectedEnd {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// A length prefix exceeded the configured bounds or remaining buffer.
    #[error("{kind}: invalid length for `{field}`")]
    InvalidLength {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Encountered an unexpected version or a non-canonical value.
    #[error("{kind}: invalid value for `{field}`")]
    InvalidValue {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Additional bytes remained after consuming the expected payload.
    #[error("{kind}: {remaining} trailing bytes after offset {consumed}")]
    TrailingBytes {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Position reached by the decoder.
        consumed: usize,
        /// Number of remaining bytes.
        remaining: usize,
    },
}

impl SerError {
    /// Creates an unexpected-end error helper.
    pub fn unexpected_end(kind: SerKind, field: &'static str) -> Self {
        SerError::UnexpectedEnd { kind, field }
    }

    /// Creates an invalid-length error helper.
    pub fn invalid_length(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidLength { kind, field }
    }

    /// Creates an invalid-value error helper.
    pub fn invalid_value(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidValue { kind, field }
    }

    /// Returns the serialization context associated with the error.
    pub fn kind(&self) -> SerKind {
        match *self {
            SerError::UnexpectedEnd { kind, .. }
            | SerError::InvalidLength { kind, .. }
            | SerError::InvalidValue { kind, .. }
            | SerError::TrailingBytes { kind, .. } => kind,
        }
    }
}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;
