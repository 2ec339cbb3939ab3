use core::fmt;

use serde::{Deserialize, Serialize};

/// Hash backend used for Merkle commitments.
///
/// | Variant | Digest Bits | Code |
/// |---------|-------------|------|
/// | `Blake2s` | 256 | `1` |
/// | `Blake3` | 256 | `2` |
///
/// The transcript always runs on Blake2s; this knob only selects the
/// commitment hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HashKind {
    /// Blake2s-256.
    #[default]
    Blake2s,
    /// BLAKE3 in 256-bit output mode.
    Blake3,
}

impl HashKind {
    pub(crate) const fn code(self) -> u8 {
        match self {
            HashKind::Blake2s => 1,
            HashKind::Blake3 => 2,
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKind::Blake2s => write!(f, "blake2s"),
            HashKind::Blake3 => write!(f, "blake3"),
        }
    }
}

/// How the FRI verifier aggregates failing queries.
///
/// | Variant | Verdict |
/// |---------|---------|
/// | `FailFast` | First failing query, in query order. |
/// | `CollectAll` | Every failing query, in query order. |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FailureMode {
    /// Stop at the first failure.
    #[default]
    FailFast,
    /// Evaluate every query and report all failures.
    CollectAll,
}

impl FailureMode {
    pub(crate) const fn code(self) -> u8 {
        match self {
            FailureMode::FailFast => 1,
            FailureMode::CollectAll => 2,
        }
    }
}

/// Parameters for the FRI low-degree test.
///
/// | Field | Type | Endianness |
/// |-------|------|------------|
/// | `num_rounds` | `u8` | - |
/// | `log_blowup` | `u8` | - |
/// | `num_queries` | `u16` | Little-endian |
/// | `failure_mode` | [`FailureMode`] | `u8` discriminant |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriParams {
    /// Number of committed folding rounds (one CP root per round).
    pub num_rounds: u8,
    /// `log2` of the blowup factor of the final layer.
    pub log_blowup: u8,
    /// Number of query indices sampled from the transcript.
    pub num_queries: u16,
    /// Aggregation policy for failing queries.
    pub failure_mode: FailureMode,
}

impl FriParams {
    /// `log2` of the size of the first FRI layer.
    pub const fn log_domain_size(&self) -> u32 {
        self.num_rounds as u32 + self.log_blowup as u32
    }

    /// Size of the first FRI layer.
    pub const fn domain_size(&self) -> usize {
        1usize << self.log_domain_size()
    }
}

/// Merkle commitment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleParams {
    /// Domain separation tag for commitments.
    pub domain_sep: u64,
}

/// Transcript configuration for Fiat-Shamir.
///
/// | Field | Type | Endianness |
/// |-------|------|------------|
/// | `protocol_tag` | `u64` | Little-endian |
/// | `max_challenges` | `u32` | Little-endian |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptParams {
    /// Non-zero domain separation tag.
    pub protocol_tag: u64,
    /// Upper bound on squeezed challenges per session.
    pub max_challenges: u32,
}
