use crate::field::FieldElement;
use crate::params::HashKind;

use super::types::Digest;

/// Node tag prepended to leaf hashes.
pub const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Node tag prepended to internal node hashes.
pub const NODE_DOMAIN_TAG: u8 = 0x01;
/// Node tag used for the filler leaf that pads a layer to a power of two.
pub const PADDING_DOMAIN_TAG: u8 = 0x02;
/// Payload hashed under [`PADDING_DOMAIN_TAG`].
pub const PADDING_LABEL: &[u8] = b"STARK-VERIFIER/MERKLE-PAD";

/// Hash abstraction used by the Merkle commitment layer.
///
/// Implementors only supply [`MerkleHasher::hash_tagged`]; the framing of
/// leaves, nodes and padding is fixed by the provided methods so that every
/// backend commits to the same logical layout.
pub trait MerkleHasher: Send + Sync {
    /// Hashes `tag || domain_sep (u64 LE) || parts...`.
    fn hash_tagged(tag: u8, domain_sep: u64, parts: &[&[u8]]) -> Digest;

    /// Backend identifier matching the parameter registry.
    fn kind() -> HashKind;

    /// Digest of a committed field element.
    fn hash_leaf(domain_sep: u64, leaf: &FieldElement) -> Digest {
        Self::hash_tagged(LEAF_DOMAIN_TAG, domain_sep, &[&leaf.to_bytes()])
    }

    /// Digest of an internal node.
    fn hash_nodes(domain_sep: u64, left: &Digest, right: &Digest) -> Digest {
        Self::hash_tagged(
            NODE_DOMAIN_TAG,
            domain_sep,
            &[left.as_bytes(), right.as_bytes()],
        )
    }

    /// Filler digest standing in for absent leaves.
    fn padding_digest(domain_sep: u64) -> Digest {
        Self::hash_tagged(PADDING_DOMAIN_TAG, domain_sep, &[PADDING_LABEL])
    }
}
