use serde::{Deserialize, Serialize};

use super::hash::params_hash;
use super::types::{FriParams, HashKind, MerkleParams, TranscriptParams};
use super::validate::ParamsError;

/// Validated parameter set shared by every component of a verification
/// session.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `params_version` | `u16` | Version of the parameter schema. |
/// | `hash` | [`HashKind`] | Commitment hash backend. |
/// | `fri` | [`FriParams`] | Folding rounds, blowup, queries and failure policy. |
/// | `merkle` | [`MerkleParams`] | Merkle domain separation. |
/// | `transcript` | [`TranscriptParams`] | Fiat-Shamir framing and challenge budget. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierParams {
    pub(crate) params_version: u16,
    pub(crate) hash: HashKind,
    pub(crate) fri: FriParams,
    pub(crate) merkle: MerkleParams,
    pub(crate) transcript: TranscriptParams,
}

impl VerifierParams {
    /// Returns the parameter schema version.
    pub const fn params_version(&self) -> u16 {
        self.params_version
    }

    /// Returns the configured commitment hash.
    pub const fn hash(&self) -> HashKind {
        self.hash
    }

    /// Returns the FRI configuration.
    pub const fn fri(&self) -> &FriParams {
        &self.fri
    }

    /// Returns the Merkle configuration.
    pub const fn merkle(&self) -> &MerkleParams {
        &self.merkle
    }

    /// Returns the transcript configuration.
    pub const fn transcript(&self) -> &TranscriptParams {
        &self.transcript
    }

    /// Number of CP roots a session must register.
    pub const fn num_rounds(&self) -> usize {
        self.fri.num_rounds as usize
    }

    /// Number of query indices derived per session.
    pub const fn num_queries(&self) -> usize {
        self.fri.num_queries as usize
    }

    /// Computes the canonical parameter hash.
    ///
    /// The digest is computed over the canonical byte layout defined in
    /// [`crate::params::serialize_params`].
    pub fn params_hash(&self) -> [u8; 32] {
        params_hash(self)
    }

    /// Parses and validates a JSON parameter document.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json).map_err(|err| ParamsError::Json {
            message: err.to_string(),
        })?;
        super::validate::validate(&params)?;
        Ok(params)
    }

    /// Renders the parameter set as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ParamsError> {
        serde_json::to_string_pretty(self).map_err(|err| ParamsError::Json {
            message: err.to_string(),
        })
    }

    pub(crate) fn try_from_builder(
        builder: &super::builder::VerifierParamsBuilder,
    ) -> Result<Self, ParamsError> {
        let params = Self {
            params_version: builder.params_version,
            hash: builder.hash,
            fri: builder.fri,
            merkle: builder.merkle,
            transcript: builder.transcript,
        };
        super::validate::validate(&params)?;
        Ok(params)
    }
}

impl Default for VerifierParams {
    fn default() -> Self {
        let builder = super::builder::VerifierParamsBuilder::new();
        Self {
            params_version: builder.params_version,
            hash: builder.hash,
            fri: builder.fri,
            merkle: builder.merkle,
            transcript: builder.transcript,
        }
    }
}
