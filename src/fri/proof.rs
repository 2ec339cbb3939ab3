//! FRI proof structures and their canonical wire format.
//!
//! ```text
//! FriProof    = version u16 | final_value felt | query_count u32 | FriQueryProof*
//! FriQueryProof = index u32 | round_count u32 | FriRoundOpening*
//! FriRoundOpening = value felt | conjugate_value felt | path | conjugate_path
//! path        = leaf index u32 | sibling_count u32 | 32-byte digest*
//! ```
//!
//! All integers are little-endian and field elements must be canonical.

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::merkle::MerkleProof;
use crate::ser::{ByteReader, ByteWriter, SerError, SerKind, SerResult};

use super::types::FRI_PROOF_VERSION;

const PATH_MIN_LEN: usize = 8;
const ROUND_MIN_LEN: usize = 16 + 2 * PATH_MIN_LEN;
const QUERY_MIN_LEN: usize = 8;
const DIGEST_LEN: usize = 32;

/// Openings of one committed round for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriRoundOpening {
    /// Evaluation at the query position `q`.
    pub value: FieldElement,
    /// Evaluation at the conjugate position `q + N_i / 2 mod N_i`.
    pub conjugate_value: FieldElement,
    /// Authentication path of `value`.
    pub path: MerkleProof,
    /// Authentication path of `conjugate_value`.
    pub conjugate_path: MerkleProof,
}

/// All round openings for a single query index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriQueryProof {
    /// Query position in the first layer.
    pub index: u32,
    /// Openings ordered from round `0` to round `k - 1`.
    pub rounds: Vec<FriRoundOpening>,
}

/// Prover submission checked against the registered CP roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriProof {
    /// Wire format version.
    pub version: u16,
    /// Claimed constant the last fold must produce.
    pub final_value: FieldElement,
    /// One entry per derived query point, in derivation order.
    pub queries: Vec<FriQueryProof>,
}

impl FriProof {
    /// Creates a proof tagged with the current wire format version.
    pub fn new(final_value: FieldElement, queries: Vec<FriQueryProof>) -> Self {
        Self {
            version: FRI_PROOF_VERSION,
            final_value,
            queries,
        }
    }

    /// Encodes the proof in its canonical byte layout.
    pub fn to_bytes(&self) -> SerResult<Vec<u8>> {
        let mut out = ByteWriter::new();
        out.u16(self.version);
        out.felt(self.final_value);
        out.vec(&self.queries, SerKind::FriProof, "queries", write_query)?;
        Ok(out.into_bytes())
    }

    /// Decodes a proof, rejecting unknown versions, non-canonical field
    /// elements, impossible lengths and trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> SerResult<Self> {
        let mut reader = ByteReader::new(bytes);
        let version = reader.u16(SerKind::FriProof, "version")?;
        if version != FRI_PROOF_VERSION {
            return Err(SerError::invalid_value(SerKind::FriProof, "version"));
        }
        let final_value = reader.felt(SerKind::FriProof, "final_value")?;
        let queries = reader.vec(SerKind::FriProof, "queries", QUERY_MIN_LEN, read_query)?;
        reader.finish(SerKind::FriProof)?;
        Ok(Self {
            version,
            final_value,
            queries,
        })
    }
}

fn write_query(out: &mut ByteWriter, query: &FriQueryProof) -> SerResult<()> {
    out.u32(query.index);
    out.vec(&query.rounds, SerKind::QueryProof, "rounds", |out, round| {
        out.felt(round.value);
        out.felt(round.conjugate_value);
        write_path(out, &round.path)?;
        write_path(out, &round.conjugate_path)
    })
}

fn read_query(reader: &mut ByteReader<'_>) -> SerResult<FriQueryProof> {
    let index = reader.u32(SerKind::QueryProof, "index")?;
    let rounds = reader.vec(SerKind::QueryProof, "rounds", ROUND_MIN_LEN, |reader| {
        Ok(FriRoundOpening {
            value: reader.felt(SerKind::RoundOpening, "value")?,
            conjugate_value: reader.felt(SerKind::RoundOpening, "conjugate_value")?,
            path: read_path(reader)?,
            conjugate_path: read_path(reader)?,
        })
    })?;
    Ok(FriQueryProof { index, rounds })
}

fn write_path(out: &mut ByteWriter, path: &MerkleProof) -> SerResult<()> {
    out.u32(path.index);
    out.vec(&path.siblings, SerKind::MerklePath, "siblings", |out, digest| {
        out.digest(digest);
        Ok(())
    })
}

fn read_path(reader: &mut ByteReader<'_>) -> SerResult<MerkleProof> {
    let index = reader.u32(SerKind::MerklePath, "index")?;
    let siblings = reader.vec(SerKind::MerklePath, "siblings", DIGEST_LEN, |reader| {
        reader.digest(SerKind::MerklePath, "sibling")
    })?;
    Ok(MerkleProof { index, siblings })
}
