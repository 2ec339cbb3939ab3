//! Hashing primitives shared by the commitment layer and the transcript.
//!
//! * [`deterministic`] – Blake2s-256 helpers: a one-shot [`hash`], a streaming
//!   [`Hasher`] and the counter-mode [`Blake2sXof`] the transcript squeezes
//!   challenges from.
//!
//! Every digest is 32 bytes.  Callers are responsible for framing their
//! inputs (tags, length prefixes); the helpers here hash exactly the bytes
//! they are given.

pub mod deterministic;

pub use deterministic::{hash, Blake2sXof, Hash, Hasher, HexOutput};

/// Size in bytes of every digest produced by this crate.
pub const DIGEST_SIZE: usize = 32;
