use std::marker::PhantomData;

use crate::field::FieldElement;
use crate::params::VerifierParams;

use super::hashers::Blake2sMerkleHasher;
use super::traits::MerkleHasher;
use super::types::{padded_depth, Digest, MerkleError, MerkleProof, MerkleRoot};

/// Fully materialised binary Merkle tree over one layer of field elements.
///
/// `levels[0]` holds the (padded) leaf digests and the last level holds the
/// root.  The padded width is always a power of two.
#[derive(Debug, Clone)]
pub struct MerkleTree<H: MerkleHasher = Blake2sMerkleHasher> {
    domain_sep: u64,
    leaf_count: usize,
    levels: Vec<Vec<Digest>>,
    marker: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Hashes `leaves`, pads to the next power of two and builds every level.
    pub fn new(domain_sep: u64, leaves: &[FieldElement]) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyCommitment);
        }
        if u32::try_from(leaves.len()).is_err() {
            return Err(MerkleError::LayerTooWide {
                leaf_count: leaves.len(),
            });
        }

        let mut hashed = hash_leaves::<H>(domain_sep, leaves);
        let width = leaves.len().next_power_of_two();
        hashed.resize(width, H::padding_digest(domain_sep));

        let mut levels = Vec::with_capacity(padded_depth(width) + 1);
        levels.push(hashed);
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Digest> = current
                .chunks(2)
                .map(|pair| H::hash_nodes(domain_sep, &pair[0], &pair[1]))
                .collect();
            levels.push(next);
        }

        Ok(Self {
            domain_sep,
            leaf_count: leaves.len(),
            levels,
            marker: PhantomData,
        })
    }

    /// Returns the Merkle root digest.
    pub fn root(&self) -> MerkleRoot {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_else(|| H::padding_digest(self.domain_sep))
    }

    /// Number of leaves supplied before padding.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Path length of every opening, `log2(padded width)`.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Generates the authentication path for the leaf at `index`.
    pub fn prove(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        if index >= self.leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count,
            });
        }
        let mut position = index;
        let siblings = self.levels[..self.depth()]
            .iter()
            .map(|level| {
                let sibling = level[position ^ 1];
                position >>= 1;
                sibling
            })
            .collect();
        Ok(MerkleProof {
            index: index as u32,
            siblings,
        })
    }
}

fn hash_leaves<H: MerkleHasher>(domain_sep: u64, leaves: &[FieldElement]) -> Vec<Digest> {
    #[cfg(feature = "parallel")]
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(leaves.len());
        return leaves
            .par_iter()
            .with_min_len(chunk)
            .map(|leaf| H::hash_leaf(domain_sep, leaf))
            .collect();
    }
    leaves
        .iter()
        .map(|leaf| H::hash_leaf(domain_sep, leaf))
        .collect()
}

/// Commitment front-end bound to a hash backend and a domain separator.
///
/// This is the entry point used by the FRI verifier: `commit`/`prove` build
/// layers (tests, tooling), `verify` and `verify_at_depth` check openings.
#[derive(Debug, Clone, Copy)]
pub struct MerkleScheme<H: MerkleHasher = Blake2sMerkleHasher> {
    domain_sep: u64,
    marker: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleScheme<H> {
    /// Creates a scheme with an explicit domain separator.
    pub const fn new(domain_sep: u64) -> Self {
        Self {
            domain_sep,
            marker: PhantomData,
        }
    }

    /// Creates a scheme using the domain separator from `params`.
    pub fn from_params(params: &VerifierParams) -> Self {
        Self::new(params.merkle().domain_sep)
    }

    /// Domain separator mixed into every hash.
    pub const fn domain_sep(&self) -> u64 {
        self.domain_sep
    }

    /// Builds the full tree, retaining every level for later openings.
    pub fn build(&self, leaves: &[FieldElement]) -> Result<MerkleTree<H>, MerkleError> {
        MerkleTree::new(self.domain_sep, leaves)
    }

    /// Commits to `leaves` and returns the root.
    pub fn commit(&self, leaves: &[FieldElement]) -> Result<MerkleRoot, MerkleError> {
        Ok(self.build(leaves)?.root())
    }

    /// Returns the authentication path for `leaves[index]`.
    pub fn prove(&self, leaves: &[FieldElement], index: usize) -> Result<MerkleProof, MerkleError> {
        self.build(leaves)?.prove(index)
    }

    /// Recomputes the path from `leaf` and compares it with `root`.
    ///
    /// A digest mismatch is reported as `Ok(false)`; an index that does not
    /// fit the width implied by the path is `IndexOutsideWidth`.
    pub fn verify(
        &self,
        root: &MerkleRoot,
        leaf: &FieldElement,
        proof: &MerkleProof,
    ) -> Result<bool, MerkleError> {
        let depth = proof.depth();
        let overflow = u32::try_from(depth)
            .ok()
            .and_then(|shift| proof.index.checked_shr(shift))
            .unwrap_or(0);
        if overflow != 0 {
            return Err(MerkleError::IndexOutsideWidth {
                index: proof.index,
                depth,
            });
        }

        let mut node = H::hash_leaf(self.domain_sep, leaf);
        let mut position = proof.index;
        for sibling in &proof.siblings {
            node = if position & 1 == 0 {
                H::hash_nodes(self.domain_sep, &node, sibling)
            } else {
                H::hash_nodes(self.domain_sep, sibling, &node)
            };
            position >>= 1;
        }
        Ok(&node == root)
    }

    /// Like [`MerkleScheme::verify`] but also pins the path length to
    /// `expected_depth`.
    pub fn verify_at_depth(
        &self,
        root: &MerkleRoot,
        leaf: &FieldElement,
        proof: &MerkleProof,
        expected_depth: usize,
    ) -> Result<bool, MerkleError> {
        if proof.depth() != expected_depth {
            return Err(MerkleError::MalformedProof {
                expected: expected_depth,
                got: proof.depth(),
                index: proof.index,
            });
        }
        self.verify(root, leaf, proof)
    }
}
