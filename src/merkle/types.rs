use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::DIGEST_SIZE;

/// Fixed-width digest used for Merkle nodes and roots.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_SIZE]);

/// A Merkle root is the digest at the top of a committed layer.
pub type MerkleRoot = Digest;

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Consumes the digest and returns the bytes.
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Authentication path for a single leaf.
///
/// `siblings[0]` is the sibling of the leaf itself, the last entry is the
/// sibling of the root's child.  Bit `l` of `index` tells whether the node at
/// level `l` is a right child.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Position of the opened leaf within the padded layer.
    pub index: u32,
    /// Sibling digests ordered from leaf to root.
    pub siblings: Vec<Digest>,
}

impl MerkleProof {
    /// Number of levels covered by the path, i.e. `log2(padded width)`.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }
}

/// Errors emitted by the Merkle layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// Commitment requested over an empty leaf set.
    #[error("cannot commit to an empty leaf set")]
    EmptyCommitment,
    /// Opening requested for a leaf outside the committed layer.
    #[error("index {index} out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Number of (unpadded) leaves committed.
        leaf_count: usize,
    },
    /// Path length differs from the depth of the committed layer.
    #[error("malformed proof: expected depth {expected}, got {got} (index {index})")]
    MalformedProof {
        /// Depth implied by the committed layer.
        expected: usize,
        /// Depth carried by the proof.
        got: usize,
        /// Index carried by the proof.
        index: u32,
    },
    /// The claimed index does not fit in `2^depth` leaves.
    #[error("index {index} does not fit a path of depth {depth}")]
    IndexOutsideWidth {
        /// Index carried by the proof.
        index: u32,
        /// Number of siblings on the path.
        depth: usize,
    },
    /// The layer is wider than a `u32` index can address.
    #[error("layer of {leaf_count} leaves exceeds the addressable width")]
    LayerTooWide {
        /// Number of leaves supplied.
        leaf_count: usize,
    },
}

/// Returns `log2` of the padded width for `leaf_count` leaves.
pub fn padded_depth(leaf_count: usize) -> usize {
    leaf_count.max(1).next_power_of_two().trailing_zeros() as usize
}
