use super::VerifierParams;

/// Canonical binary layout of [`VerifierParams`].
///
/// | Offset | Field | Encoding |
/// |--------|-------|----------|
/// | 0..2 | `params_version` | `u16` little-endian |
/// | 2..3 | `hash` | `u8` discriminant |
/// | 3..4 | `fri.num_rounds` | `u8` |
/// | 4..5 | `fri.log_blowup` | `u8` |
/// | 5..7 | `fri.num_queries` | `u16` little-endian |
/// | 7..8 | `fri.failure_mode` | `u8` discriminant |
/// | 8..16 | `merkle.domain_sep` | `u64` little-endian |
/// | 16..24 | `transcript.protocol_tag` | `u64` little-endian |
/// | 24..28 | `transcript.max_challenges` | `u32` little-endian |
///
/// The layout has no padding, so byte-for-byte equality implies identical
/// parameter sets.
pub const CANONICAL_PARAMS_LEN: usize = 28;

/// Serialises the parameter set into canonical bytes.
pub fn serialize_params(params: &VerifierParams) -> Vec<u8> {
    let mut out = Vec::with_capacity(CANONICAL_PARAMS_LEN);
    out.extend_from_slice(&params.params_version().to_le_bytes());
    out.push(params.hash().code());
    out.push(params.fri().num_rounds);
    out.push(params.fri().log_blowup);
    out.extend_from_slice(&params.fri().num_queries.to_le_bytes());
    out.push(params.fri().failure_mode.code());
    out.extend_from_slice(&params.merkle().domain_sep.to_le_bytes());
    out.extend_from_slice(&params.transcript().protocol_tag.to_le_bytes());
    out.extend_from_slice(&params.transcript().max_challenges.to_le_bytes());
    out
}
