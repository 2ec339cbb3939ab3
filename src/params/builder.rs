use super::types::{FailureMode, FriParams, HashKind, MerkleParams, TranscriptParams};
use super::{ParamsError, VerifierParams};

/// Builder used to assemble [`VerifierParams`] with validation.
///
/// | Field | Default |
/// |-------|---------|
/// | `params_version` | `1` |
/// | `hash` | [`HashKind::Blake2s`] |
/// | `fri` | 11 rounds, `log_blowup = 3`, 32 queries, fail-fast |
/// | `merkle` | Domain sep `0x5354_4b56_5f4d_4b4c` |
/// | `transcript` | Protocol tag `0x5354_4b56_5f46_5331`, at most 1024 challenges |
#[derive(Debug, Clone)]
pub struct VerifierParamsBuilder {
    pub params_version: u16,
    pub hash: HashKind,
    pub fri: FriParams,
    pub merkle: MerkleParams,
    pub transcript: TranscriptParams,
}

impl VerifierParamsBuilder {
    /// Returns a builder initialised with safe defaults.
    pub fn new() -> Self {
        Self::from_profile(BuiltinProfile::PROFILE_SAMPLE_11)
    }

    /// Loads one of the built-in profiles.
    ///
    /// | Profile | Hash | Rounds | Blowup | Queries | Failure mode |
    /// |---------|------|--------|--------|---------|--------------|
    /// | `PROFILE_SAMPLE_11` | Blake2s | 11 | 8 | 32 | fail-fast |
    /// | `PROFILE_HISEC_11` | BLAKE3 | 11 | 16 | 64 | collect-all |
    pub fn from_profile(profile: BuiltinProfile) -> Self {
        match profile {
            BuiltinProfile::PROFILE_SAMPLE_11 => VerifierParamsBuilder {
                params_version: 1,
                hash: HashKind::Blake2s,
                fri: FriParams {
                    num_rounds: 11,
                    log_blowup: 3,
                    num_queries: 32,
                    failure_mode: FailureMode::FailFast,
                },
                merkle: MerkleParams {
                    domain_sep: 0x5354_4b56_5f4d_4b4c,
                },
                transcript: TranscriptParams {
                    protocol_tag: 0x5354_4b56_5f46_5331,
                    max_challenges: 1024,
                },
            },
            BuiltinProfile::PROFILE_HISEC_11 => VerifierParamsBuilder {
                params_version: 1,
                hash: HashKind::Blake3,
                fri: FriParams {
                    num_rounds: 11,
                    log_blowup: 4,
                    num_queries: 64,
                    failure_mode: FailureMode::CollectAll,
                },
                merkle: MerkleParams {
                    domain_sep: 0x5354_4b56_5f4d_4b4c,
                },
                transcript: TranscriptParams {
                    protocol_tag: 0x5354_4b56_5f48_5331,
                    max_challenges: 1024,
                },
            },
        }
    }

    /// Overrides the number of folding rounds.
    pub fn num_rounds(mut self, num_rounds: u8) -> Self {
        self.fri.num_rounds = num_rounds;
        self
    }

    /// Overrides the number of query indices.
    pub fn num_queries(mut self, num_queries: u16) -> Self {
        self.fri.num_queries = num_queries;
        self
    }

    /// Overrides `log2` of the blowup factor.
    pub fn log_blowup(mut self, log_blowup: u8) -> Self {
        self.fri.log_blowup = log_blowup;
        self
    }

    /// Overrides the failure aggregation policy.
    pub fn failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.fri.failure_mode = failure_mode;
        self
    }

    /// Overrides the commitment hash backend.
    pub fn hash(mut self, hash: HashKind) -> Self {
        self.hash = hash;
        self
    }

    /// Validates the builder fields and emits a [`VerifierParams`] instance.
    pub fn build(&self) -> Result<VerifierParams, ParamsError> {
        VerifierParams::try_from_builder(self)
    }
}

/// Supported built-in profiles.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinProfile {
    /// Eleven folding rounds, blowup 8, Blake2s commitments.
    PROFILE_SAMPLE_11,
    /// Eleven folding rounds, blowup 16, BLAKE3 commitments, 64 queries.
    PROFILE_HISEC_11,
}

impl Default for VerifierParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
