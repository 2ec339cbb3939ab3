use crate::hash::deterministic::{hash, Blake2sXof, Hasher};
use crate::merkle::Digest;
use crate::params::VerifierParams;

use super::types::{Felt, TranscriptError, TranscriptLabel, TranscriptPhase, TranscriptRecord};

#[derive(Debug, Clone)]
struct PhaseTracker {
    stage: Stage,
    fri_rounds: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    ExpectParams,
    ExpectTraceRoot,
    ExpectPublic,
    Fri { round: u8, expect: FriExpectation },
    QueryCount,
    Queries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FriExpectation {
    Root,
    Challenge,
}

impl PhaseTracker {
    fn new(fri_rounds: u8) -> Self {
        Self {
            stage: Stage::ExpectParams,
            fri_rounds,
        }
    }

    fn phase(&self) -> TranscriptPhase {
        match self.stage {
            Stage::ExpectParams | Stage::ExpectTraceRoot => TranscriptPhase::Init,
            Stage::ExpectPublic => TranscriptPhase::TraceCommit,
            Stage::Fri { round: 0, expect: FriExpectation::Root } => TranscriptPhase::Public,
            Stage::Fri { round, .. } => TranscriptPhase::FriRound(round),
            Stage::QueryCount | Stage::Queries => TranscriptPhase::Queries,
        }
    }

    fn after_round(&self, round: u8) -> Stage {
        if round + 1 < self.fri_rounds {
            Stage::Fri {
                round: round + 1,
                expect: FriExpectation::Root,
            }
        } else {
            Stage::QueryCount
        }
    }

    fn apply_absorb(&mut self, label: TranscriptLabel) -> Result<(), TranscriptError> {
        let next = match (self.stage, label) {
            (Stage::ExpectParams, TranscriptLabel::ParamsDigest) => Stage::ExpectTraceRoot,
            (Stage::ExpectTraceRoot, TranscriptLabel::TraceRoot) => Stage::ExpectPublic,
            (Stage::ExpectPublic, TranscriptLabel::PublicInputs) => Stage::Fri {
                round: 0,
                expect: FriExpectation::Root,
            },
            (
                Stage::Fri {
                    round,
                    expect: FriExpectation::Root,
                },
                TranscriptLabel::CpRoot(idx),
            ) if round == idx => Stage::Fri {
                round,
                expect: FriExpectation::Challenge,
            },
            (Stage::QueryCount, TranscriptLabel::QueryCount) => Stage::Queries,
            _ => return Err(self.reject(label)),
        };
        self.stage = next;
        Ok(())
    }

    fn apply_challenge(&mut self, label: TranscriptLabel) -> Result<(), TranscriptError> {
        let next = match (self.stage, label) {
            (
                Stage::Fri {
                    round,
                    expect: FriExpectation::Challenge,
                },
                TranscriptLabel::FoldChallenge(idx),
            ) if round == idx => self.after_round(round),
            (Stage::Queries, TranscriptLabel::QueryIndex) => Stage::Queries,
            _ => return Err(self.reject(label)),
        };
        self.stage = next;
        Ok(())
    }

    fn reject(&self, label: TranscriptLabel) -> TranscriptError {
        TranscriptError::InvalidLabel {
            label,
            phase: self.phase(),
        }
    }
}

/// Deterministic, domain-separated Fiat-Shamir transcript.
///
/// Every absorb mixes `state || label tag || len (u64 LE) || bytes` into the
/// running Blake2s state; every squeeze reads from a Blake2s XOF seeded with
/// `state || label tag || counter` and then mixes its output back in.  The
/// transcript owns an append-only log of every record for diagnostics.
#[derive(Debug)]
pub struct Transcript {
    state: [u8; 32],
    tracker: PhaseTracker,
    challenge_counter: u64,
    max_challenges: u32,
    log: Vec<TranscriptRecord>,
}

impl Transcript {
    /// Initialises a new transcript bound to the supplied parameter set.
    ///
    /// The parameter digest is absorbed as the first record.
    pub fn new(params: &VerifierParams) -> Self {
        let params_hash = params.params_hash();
        let protocol_tag = params.transcript().protocol_tag;

        let mut hasher = Hasher::new();
        hasher.update(b"STARK-VERIFIER-TRANSCRIPT-V1");
        hasher.update(&protocol_tag.to_le_bytes());
        let state = hasher.finalize().into_bytes();

        let mut transcript = Self {
            state,
            tracker: PhaseTracker::new(params.fri().num_rounds),
            challenge_counter: 0,
            max_challenges: params.transcript().max_challenges,
            log: Vec::new(),
        };
        transcript.record(TranscriptLabel::ParamsDigest, params_hash.to_vec());
        transcript.tracker.stage = Stage::ExpectTraceRoot;
        transcript
    }

    fn record(&mut self, label: TranscriptLabel, payload: Vec<u8>) {
        self.state = mix(self.state, label, &payload);
        self.log.push(TranscriptRecord { label, payload });
    }

    /// Absorbs canonical bytes under the supplied label.
    pub fn absorb_bytes(
        &mut self,
        label: TranscriptLabel,
        data: &[u8],
    ) -> Result<(), TranscriptError> {
        self.tracker.apply_absorb(label)?;
        self.record(label, data.to_vec());
        Ok(())
    }

    /// Absorbs a Merkle root.
    pub fn absorb_digest(
        &mut self,
        label: TranscriptLabel,
        digest: &Digest,
    ) -> Result<(), TranscriptError> {
        self.absorb_bytes(label, digest.as_bytes())
    }

    fn challenge_stream(&mut self, label: TranscriptLabel) -> Result<Blake2sXof, TranscriptError> {
        if self.challenge_counter >= u64::from(self.max_challenges) {
            return Err(TranscriptError::BoundsViolation {
                max: self.max_challenges,
            });
        }
        self.tracker.apply_challenge(label)?;
        self.challenge_counter = self
            .challenge_counter
            .checked_add(1)
            .ok_or(TranscriptError::Overflow)?;

        let mut seed = Vec::with_capacity(32 + 16 + 8);
        seed.extend_from_slice(&self.state);
        seed.extend_from_slice(&label.domain_tag());
        seed.extend_from_slice(&self.challenge_counter.to_le_bytes());
        Ok(Blake2sXof::new(&seed))
    }

    /// Draws a uniformly distributed field element.
    ///
    /// 64-bit words at or above the modulus are rejected and redrawn.
    pub fn challenge_field(&mut self, label: TranscriptLabel) -> Result<Felt, TranscriptError> {
        let mut stream = self.challenge_stream(label)?;
        let value = loop {
            let word = stream.next_u64();
            if let Ok(felt) = Felt::from_canonical_u64(word) {
                break felt;
            }
        };
        self.record(label, value.to_bytes().to_vec());
        Ok(value)
    }

    /// Draws an index uniformly distributed in `0..bound`.
    ///
    /// Words at or above the largest multiple of `bound` that fits in a `u64`
    /// are rejected and redrawn before reduction.
    pub fn challenge_index(
        &mut self,
        label: TranscriptLabel,
        bound: usize,
    ) -> Result<usize, TranscriptError> {
        if bound == 0 {
            return Err(TranscriptError::RangeZero);
        }
        let bound = bound as u64;
        let zone = (u64::MAX / bound) * bound;
        let mut stream = self.challenge_stream(label)?;
        let word = loop {
            let word = stream.next_u64();
            if word < zone {
                break word;
            }
        };
        let index = word % bound;
        self.record(label, index.to_le_bytes().to_vec());
        Ok(index as usize)
    }

    /// Returns the digest of the current transcript state.
    pub fn state_digest(&self) -> [u8; 32] {
        self.state
    }

    /// Returns the current transcript phase.
    pub fn phase(&self) -> TranscriptPhase {
        self.tracker.phase()
    }

    /// Number of challenges squeezed so far.
    pub fn challenge_count(&self) -> u64 {
        self.challenge_counter
    }

    /// Append-only log of absorbed and squeezed records.
    pub fn records(&self) -> &[TranscriptRecord] {
        &self.log
    }
}

fn mix(state: [u8; 32], label: TranscriptLabel, data: &[u8]) -> [u8; 32] {
    let mut payload = Vec::with_capacity(32 + 16 + 8 + data.len());
    payload.extend_from_slice(&state);
    payload.extend_from_slice(&label.domain_tag());
    payload.extend_from_slice(&(data.len() as u64).to_le_bytes());
    payload.extend_from_slice(data);
    hash(&payload).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::VerifierParamsBuilder;

    fn small_params() -> VerifierParams {
        VerifierParamsBuilder::new()
            .num_rounds(2)
            .num_queries(4)
            .build()
            .unwrap()
    }

    fn drive_to_queries(transcript: &mut Transcript) {
        let root = Digest::new([7u8; 32]);
        transcript
            .absorb_digest(TranscriptLabel::TraceRoot, &root)
            .unwrap();
        transcript
            .absorb_bytes(TranscriptLabel::PublicInputs, b"statement")
            .unwrap();
        for round in 0..2u8 {
            transcript
                .absorb_digest(TranscriptLabel::CpRoot(round), &root)
                .unwrap();
            transcript
                .challenge_field(TranscriptLabel::FoldChallenge(round))
                .unwrap();
        }
        transcript
            .absorb_bytes(TranscriptLabel::QueryCount, &4u32.to_le_bytes())
            .unwrap();
    }

    #[test]
    fn params_digest_is_first_record() {
        let params = small_params();
        let transcript = Transcript::new(&params);
        assert_eq!(transcript.phase(), TranscriptPhase::Init);
        assert_eq!(transcript.records().len(), 1);
        assert_eq!(
            transcript.records()[0].payload,
            params.params_hash().to_vec()
        );
    }

    #[test]
    fn phases_follow_protocol_order() {
        let mut transcript = Transcript::new(&small_params());
        drive_to_queries(&mut transcript);
        assert_eq!(transcript.phase(), TranscriptPhase::Queries);
        assert_eq!(transcript.challenge_count(), 2);
        for _ in 0..4 {
            let index = transcript
                .challenge_index(TranscriptLabel::QueryIndex, 1 << 5)
                .unwrap();
            assert!(index < 32);
        }
        // params, trace root, public inputs, 2 x (root, beta), count, 4 indices
        assert_eq!(transcript.records().len(), 1 + 1 + 1 + 4 + 1 + 4);
    }

    #[test]
    fn cp_root_before_trace_root_is_rejected() {
        let mut transcript = Transcript::new(&small_params());
        let err = transcript
            .absorb_digest(TranscriptLabel::CpRoot(0), &Digest::default())
            .unwrap_err();
        assert_eq!(
            err,
            TranscriptError::InvalidLabel {
                label: TranscriptLabel::CpRoot(0),
                phase: TranscriptPhase::Init
            }
        );
    }

    #[test]
    fn skipped_round_is_rejected() {
        let mut transcript = Transcript::new(&small_params());
        transcript
            .absorb_digest(TranscriptLabel::TraceRoot, &Digest::default())
            .unwrap();
        transcript
            .absorb_bytes(TranscriptLabel::PublicInputs, &[])
            .unwrap();
        assert!(matches!(
            transcript.absorb_digest(TranscriptLabel::CpRoot(1), &Digest::default()),
            Err(TranscriptError::InvalidLabel { .. })
        ));
        assert!(matches!(
            transcript.challenge_field(TranscriptLabel::FoldChallenge(0)),
            Err(TranscriptError::InvalidLabel { .. })
        ));
    }

    #[test]
    fn zero_bound_is_rejected() {
        let mut transcript = Transcript::new(&small_params());
        drive_to_queries(&mut transcript);
        assert_eq!(
            transcript.challenge_index(TranscriptLabel::QueryIndex, 0),
            Err(TranscriptError::RangeZero)
        );
    }

    #[test]
    fn challenge_budget_is_enforced() {
        let mut builder = VerifierParamsBuilder::new().num_rounds(2).num_queries(4);
        builder.transcript.max_challenges = 6;
        let mut transcript = Transcript::new(&builder.build().unwrap());
        drive_to_queries(&mut transcript);
        for _ in 0..4 {
            transcript
                .challenge_index(TranscriptLabel::QueryIndex, 16)
                .unwrap();
        }
        assert_eq!(
            transcript.challenge_index(TranscriptLabel::QueryIndex, 16),
            Err(TranscriptError::BoundsViolation { max: 6 })
        );
    }

    #[test]
    fn absorbed_bytes_change_the_state() {
        let params = small_params();
        let mut a = Transcript::new(&params);
        let mut b = Transcript::new(&params);
        a.absorb_digest(TranscriptLabel::TraceRoot, &Digest::new([1u8; 32]))
            .unwrap();
        b.absorb_digest(TranscriptLabel::TraceRoot, &Digest::new([2u8; 32]))
            .unwrap();
        assert_ne!(a.state_digest(), b.state_digest());
    }
}
