#![forbid(unsafe_code)]

//! Parameter registry for the verifier.
//!
//! [`VerifierParams`] is the single source of truth for every knob a
//! verification session depends on.  It serialises into a deterministic byte
//! layout whose digest is the first record of every transcript, so two
//! sessions can only agree on challenges when they agree on parameters.
//!
//! | Group | Description |
//! |-------|-------------|
//! | Hash | Commitment hash backend. |
//! | FRI | Folding rounds, blowup, query count and failure policy. |
//! | Merkle & Transcript | Commitment domain separation and Fiat-Shamir framing. |
//!
//! Validation lives in the internal `validate` module, the canonical layout
//! in `ser`, and the digest is exposed via [`VerifierParams::params_hash`].
//! Consumers are expected to use [`VerifierParamsBuilder`] which starts from
//! a [`BuiltinProfile`].

mod builder;
mod hash;
mod ser;
mod types;
mod validate;
mod verifier_params;

pub use builder::{BuiltinProfile, VerifierParamsBuilder};
pub use hash::{params_hash, PARAMS_DIGEST_DOMAIN};
pub use ser::{serialize_params, CANONICAL_PARAMS_LEN};
pub use types::{FailureMode, FriParams, HashKind, MerkleParams, TranscriptParams};
pub use validate::{ParamsError, SUPPORTED_PARAMS_VERSION};
pub use verifier_params::VerifierParams;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_profile_layout() {
        let params = VerifierParamsBuilder::new().build().unwrap();
        assert_eq!(params.num_rounds(), 11);
        assert_eq!(params.fri().log_domain_size(), 14);
        assert_eq!(params.fri().domain_size(), 1 << 14);
        assert_eq!(serialize_params(&params).len(), CANONICAL_PARAMS_LEN);
        insta::assert_debug_snapshot!(params, @r###"
        VerifierParams {
            params_version: 1,
            hash: Blake2s,
            fri: FriParams {
                num_rounds: 11,
                log_blowup: 3,
                num_queries: 32,
                failure_mode: FailFast,
            },
            merkle: MerkleParams {
                domain_sep: 6004507037529885516,
            },
            transcript: TranscriptParams {
                protocol_tag: 6004507037529428785,
                max_challenges: 1024,
            },
        }
        "###);
    }

    #[test]
    fn default_matches_sample_profile() {
        let built = VerifierParamsBuilder::from_profile(BuiltinProfile::PROFILE_SAMPLE_11)
            .build()
            .unwrap();
        assert_eq!(built, VerifierParams::default());
    }

    #[test]
    fn profiles_hash_differently() {
        let sample = VerifierParamsBuilder::from_profile(BuiltinProfile::PROFILE_SAMPLE_11)
            .build()
            .unwrap();
        let hisec = VerifierParamsBuilder::from_profile(BuiltinProfile::PROFILE_HISEC_11)
            .build()
            .unwrap();
        assert_ne!(sample.params_hash(), hisec.params_hash());
        assert_eq!(sample.params_hash(), sample.clone().params_hash());
    }

    #[test]
    fn rejects_invalid_settings() {
        let base = VerifierParamsBuilder::new();
        assert_eq!(base.clone().num_rounds(0).build(), Err(ParamsError::ZeroRounds));
        assert_eq!(base.clone().num_queries(0).build(), Err(ParamsError::ZeroQueries));
        assert_eq!(base.clone().log_blowup(0).build(), Err(ParamsError::ZeroBlowup));
        assert_eq!(
            base.clone().num_rounds(30).build(),
            Err(ParamsError::DomainTooLarge {
                log_domain_size: 33,
                max: 32
            })
        );
        assert_eq!(
            base.clone().num_queries(2000).build(),
            Err(ParamsError::ChallengeBudgetTooSmall {
                required: 2011,
                got: 1024
            })
        );
        let mut zero_tag = base.clone();
        zero_tag.transcript.protocol_tag = 0;
        assert_eq!(zero_tag.build(), Err(ParamsError::InvalidProtocolTag));
        let mut version = base;
        version.params_version = 2;
        assert_eq!(
            version.build(),
            Err(ParamsError::UnsupportedVersion {
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn json_roundtrip_revalidates() {
        let params = VerifierParamsBuilder::from_profile(BuiltinProfile::PROFILE_HISEC_11)
            .build()
            .unwrap();
        let json = params.to_json_string().unwrap();
        assert_eq!(VerifierParams::from_json_str(&json).unwrap(), params);

        let broken = json.replace("\"num_queries\": 64", "\"num_queries\": 0");
        assert_eq!(
            VerifierParams::from_json_str(&broken),
            Err(ParamsError::ZeroQueries)
        );
        assert!(matches!(
            VerifierParams::from_json_str("{"),
            Err(ParamsError::Json { .. })
        ));
    }
}
