//! Concrete [`MerkleHasher`] backends.

use crate::hash::Hasher;
use crate::params::HashKind;

use super::traits::MerkleHasher;
use super::types::Digest;

/// Blake2s-256 backend (default).
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2sMerkleHasher;

impl MerkleHasher for Blake2sMerkleHasher {
    fn hash_tagged(tag: u8, domain_sep: u64, parts: &[&[u8]]) -> Digest {
        let mut hasher = Hasher::new();
        hasher.update(&[tag]);
        hasher.update(&domain_sep.to_le_bytes());
        for part in parts {
            hasher.update(part);
        }
        Digest::new(hasher.finalize().into_bytes())
    }

    fn kind() -> HashKind {
        HashKind::Blake2s
    }
}

/// BLAKE3 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3MerkleHasher;

impl MerkleHasher for Blake3MerkleHasher {
    fn hash_tagged(tag: u8, domain_sep: u64, parts: &[&[u8]]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[tag]);
        hasher.update(&domain_sep.to_le_bytes());
        for part in parts {
            hasher.update(part);
        }
        Digest::new(*hasher.finalize().as_bytes())
    }

    fn kind() -> HashKind {
        HashKind::Blake3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElement;

    #[test]
    fn backends_disagree_on_same_input() {
        let leaf = FieldElement::from(5u64);
        assert_ne!(
            Blake2sMerkleHasher::hash_leaf(1, &leaf),
            Blake3MerkleHasher::hash_leaf(1, &leaf)
        );
    }

    #[test]
    fn tags_separate_leaf_and_padding() {
        let leaf = Blake2sMerkleHasher::hash_leaf(7, &FieldElement::ZERO);
        let pad = Blake2sMerkleHasher::padding_digest(7);
        assert_ne!(leaf, pad);
        assert_ne!(pad, Blake2sMerkleHasher::padding_digest(8));
    }
}
