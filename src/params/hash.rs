use crate::hash::deterministic::hash;

use super::ser::serialize_params;
use super::VerifierParams;

/// Domain prefix of the parameter digest.
pub const PARAMS_DIGEST_DOMAIN: &[u8] = b"STARK-VERIFIER-PARAMS-V1";

/// Computes the canonical parameter digest for a [`VerifierParams`] instance.
///
/// Blake2s over `PARAMS_DIGEST_DOMAIN || serialize_params(params)`; it is the
/// first record absorbed by every transcript.
pub fn params_hash(params: &VerifierParams) -> [u8; 32] {
    let payload = serialize_params(params);
    let mut prefixed = Vec::with_capacity(PARAMS_DIGEST_DOMAIN.len() + payload.len());
    prefixed.extend_from_slice(PARAMS_DIGEST_DOMAIN);
    prefixed.extend_from_slice(&payload);
    hash(&prefixed).into()
}
