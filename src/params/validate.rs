use thiserror::Error;

use crate::field::FieldElement;

use super::types::{FriParams, TranscriptParams};
use super::VerifierParams;

/// Only schema version understood by this crate.
pub const SUPPORTED_PARAMS_VERSION: u16 = 1;

/// Error enumeration for parameter validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// Schema version is not supported.
    #[error("unsupported params version {got} (expected {expected})")]
    UnsupportedVersion { expected: u16, got: u16 },
    /// At least one folding round is required.
    #[error("fri.num_rounds must be at least 1")]
    ZeroRounds,
    /// At least one query is required.
    #[error("fri.num_queries must be at least 1")]
    ZeroQueries,
    /// The blowup factor must be at least 2.
    #[error("fri.log_blowup must be at least 1")]
    ZeroBlowup,
    /// The first FRI layer does not fit into the field's two-adic subgroup.
    #[error("evaluation domain 2^{log_domain_size} exceeds 2^{max}")]
    DomainTooLarge { log_domain_size: u32, max: u32 },
    /// Transcript protocol tag must be non-zero.
    #[error("transcript.protocol_tag must be non-zero")]
    InvalidProtocolTag,
    /// The challenge budget cannot cover one session.
    #[error("transcript.max_challenges {got} below the {required} a session squeezes")]
    ChallengeBudgetTooSmall { required: u32, got: u32 },
    /// JSON document could not be parsed or rendered.
    #[error("invalid params document: {message}")]
    Json { message: String },
}

/// Validates every parameter invariant.
pub fn validate(params: &VerifierParams) -> Result<(), ParamsError> {
    if params.params_version != SUPPORTED_PARAMS_VERSION {
        return Err(ParamsError::UnsupportedVersion {
            expected: SUPPORTED_PARAMS_VERSION,
            got: params.params_version,
        });
    }
    validate_fri(&params.fri)?;
    validate_transcript(&params.transcript, &params.fri)?;
    Ok(())
}

fn validate_fri(fri: &FriParams) -> Result<(), ParamsError> {
    if fri.num_rounds == 0 {
        return Err(ParamsError::ZeroRounds);
    }
    if fri.num_queries == 0 {
        return Err(ParamsError::ZeroQueries);
    }
    if fri.log_blowup == 0 {
        return Err(ParamsError::ZeroBlowup);
    }
    let max = FieldElement::MODULUS.two_adicity;
    if fri.log_domain_size() > max {
        return Err(ParamsError::DomainTooLarge {
            log_domain_size: fri.log_domain_size(),
            max,
        });
    }
    Ok(())
}

/// One fold challenge per round plus one index per query.
pub(crate) fn required_challenges(fri: &FriParams) -> u32 {
    fri.num_rounds as u32 + fri.num_queries as u32
}

fn validate_transcript(transcript: &TranscriptParams, fri: &FriParams) -> Result<(), ParamsError> {
    if transcript.protocol_tag == 0 {
        return Err(ParamsError::InvalidProtocolTag);
    }
    let required = required_challenges(fri);
    if transcript.max_challenges < required {
        return Err(ParamsError::ChallengeBudgetTooSmall {
            required,
            got: transcript.max_challenges,
        });
    }
    Ok(())
}
