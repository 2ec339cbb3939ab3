//! Fiat-Shamir transcript for a verification session.
//!
//! The transcript follows a fixed sequence of phases that bind parameters,
//! commitments and public inputs before any query index is derived.  Every
//! label is an enum variant to ensure compile-time domain separation.  The
//! canonical order is summarised below:
//!
//! | Phase | Label | Source | Purpose |
//! |-------|-------|--------|---------|
//! | Init | [`TranscriptLabel::ParamsDigest`] | [`VerifierParams::params_hash`](crate::params::VerifierParams::params_hash) | Binds parameter framing. |
//! | TraceCommit | [`TranscriptLabel::TraceRoot`] | Trace commitment root | Pins the execution trace commitment. |
//! | Public | [`TranscriptLabel::PublicInputs`] | Caller bytes | Binds the statement. |
//! | FRI | [`TranscriptLabel::CpRoot(i)`](TranscriptLabel::CpRoot) | Round `i` Merkle root | Commits each folding round in sequence. |
//! | FRI | [`TranscriptLabel::FoldChallenge(i)`](TranscriptLabel::FoldChallenge) | Transcript challenge | Folding randomness `beta_i`. |
//! | Queries | [`TranscriptLabel::QueryCount`] | `VerifierParams::fri().num_queries` | Documents query multiplicity. |
//! | Queries | [`TranscriptLabel::QueryIndex`] | Transcript challenges | Index stream for openings. |
//!
//! Determinism guarantee: identical [`VerifierParams`](crate::params::VerifierParams),
//! identical label ordering and payloads yield identical challenge sequences
//! and state digests.

mod core;
mod types;

pub use core::Transcript;
pub use types::{Felt, TranscriptError, TranscriptLabel, TranscriptPhase, TranscriptRecord};
