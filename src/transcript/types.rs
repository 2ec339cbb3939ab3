use core::fmt;

use thiserror::Error;

use crate::field::FieldElement;

/// Canonical field element type squeezed by the transcript.
pub type Felt = FieldElement;

/// Transcript phases exposed for diagnostics and sequencing checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptPhase {
    /// Parameter digest absorbed; waiting for the trace root.
    Init,
    /// Trace root absorbed; waiting for public inputs.
    TraceCommit,
    /// Public inputs absorbed; waiting for the first CP root.
    Public,
    /// FRI round identified by its index.
    FriRound(u8),
    /// Query sampling phase.
    Queries,
}

impl fmt::Display for TranscriptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptPhase::Init => write!(f, "init"),
            TranscriptPhase::TraceCommit => write!(f, "trace-commit"),
            TranscriptPhase::Public => write!(f, "public"),
            TranscriptPhase::FriRound(round) => write!(f, "fri-round-{round}"),
            TranscriptPhase::Queries => write!(f, "queries"),
        }
    }
}

/// Canonical transcript labels, in protocol order.
///
/// | Label | Kind | Payload |
/// |-------|------|---------|
/// | `ParamsDigest` | absorb | `VerifierParams::params_hash()` |
/// | `TraceRoot` | absorb | 32-byte trace commitment |
/// | `PublicInputs` | absorb | caller supplied bytes |
/// | `CpRoot(i)` | absorb | 32-byte round `i` commitment |
/// | `FoldChallenge(i)` | squeeze | field element `beta_i` |
/// | `QueryCount` | absorb | `u32` LE query count |
/// | `QueryIndex` | squeeze | index below the layer-0 size, repeated |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptLabel {
    /// Canonical parameter digest absorbed during initialisation.
    ParamsDigest,
    /// Merkle root of the trace commitment.
    TraceRoot,
    /// Public input bytes of the statement.
    PublicInputs,
    /// Merkle root of FRI round `i`.
    CpRoot(u8),
    /// Folding challenge for FRI round `i`.
    FoldChallenge(u8),
    /// Number of query indices about to be sampled.
    QueryCount,
    /// Challenge stream used to derive query indices.
    QueryIndex,
}

impl TranscriptLabel {
    pub(crate) fn domain_tag(self) -> [u8; 16] {
        match self {
            TranscriptLabel::ParamsDigest => *b"SV_LABEL_PARAMS_",
            TranscriptLabel::TraceRoot => *b"SV_LABEL_TRROOT_",
            TranscriptLabel::PublicInputs => *b"SV_LABEL_PUBIN__",
            TranscriptLabel::CpRoot(idx) => {
                let mut tag = *b"SV_LABEL_CPROOT_";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::FoldChallenge(idx) => {
                let mut tag = *b"SV_LABEL_FOLDCH_";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::QueryCount => *b"SV_LABEL_QCOUNT_",
            TranscriptLabel::QueryIndex => *b"SV_LABEL_QINDEX_",
        }
    }
}

/// One framed record of the append-only transcript log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    /// Label the payload was absorbed or squeezed under.
    pub label: TranscriptLabel,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

/// Error type returned by the transcript API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// Label was used outside of the documented phase ordering.
    #[error("label {label:?} used outside canonical order (phase {phase})")]
    InvalidLabel {
        /// Offending label.
        label: TranscriptLabel,
        /// Phase the transcript was in.
        phase: TranscriptPhase,
    },
    /// Range exclusive argument was zero during `challenge_index`.
    #[error("challenge range must be non-zero")]
    RangeZero,
    /// Internal counter overflowed the supported range.
    #[error("internal counter overflow")]
    Overflow,
    /// More challenges were requested than the parameters allow.
    #[error("transcript challenge budget of {max} exhausted")]
    BoundsViolation {
        /// Configured `max_challenges`.
        max: u32,
    },
}
