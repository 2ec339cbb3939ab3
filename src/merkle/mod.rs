//! Binary Merkle commitments over layers of field elements.
//!
//! The module fixes the following protocol knobs:
//!
//! * **Arity:** binary.  A layer is padded to the next power of two with a
//!   filler digest hashed under its own node tag.
//! * **Leaf layout:** one field element per leaf, 8 bytes little-endian.
//! * **Domain separation:** every hash invocation receives the `domain_sep`
//!   parameter from [`VerifierParams`](crate::params::VerifierParams),
//!   preceded by a one byte node tag (`0x00` leaves, `0x01` internal nodes,
//!   `0x02` padding).
//! * **Hash family:** selected through
//!   [`HashKind`](crate::params::HashKind); [`MerkleHasher`] keeps the
//!   commitment layer family-neutral.

mod hashers;
pub mod traits;
mod tree;
mod types;

pub use hashers::{Blake2sMerkleHasher, Blake3MerkleHasher};
pub use traits::MerkleHasher;
pub use tree::{MerkleScheme, MerkleTree};
pub use types::{padded_depth, Digest, MerkleError, MerkleProof, MerkleRoot};
