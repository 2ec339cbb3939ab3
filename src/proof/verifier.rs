//! Verification session state machine.
//!
//! ```text
//! Init --register_trace_root/register_cp_roots--> RootsRegistered
//!      --derive_query_points--> ChallengesDerived
//!      --verify--> RoundsChecked --> Accepted | Rejected
//! ```
//!
//! Protocol errors abort the session: the error is recorded as the verdict
//! and every later call reports `InvalidState`.

use tracing::{debug, info, info_span, warn};

use crate::field::FieldElement;
use crate::fri::{verify_fri, FriProof};
use crate::merkle::MerkleRoot;
use crate::params::VerifierParams;
use crate::transcript::{Transcript, TranscriptError, TranscriptLabel};

use super::errors::{classify, MalformedReason, ProofError, ProtocolError, VerifierError};
use super::verdict::VerificationVerdict;

/// Lifecycle position of a [`VerificationSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for commitments.
    Init,
    /// Trace root and every CP root are registered.
    RootsRegistered,
    /// Fold challenges and query points are fixed.
    ChallengesDerived,
    /// FRI queries were evaluated; the verdict is being recorded.
    RoundsChecked,
    /// The proof was accepted.
    Accepted,
    /// The proof was rejected or the session aborted.
    Rejected,
}

impl SessionState {
    /// Whether a verdict has been recorded.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Accepted | SessionState::Rejected)
    }
}

/// One verification of one proof against one parameter set.
///
/// The session exclusively owns its transcript and releases it once the
/// verdict is recorded. Verdicts are immutable: once produced, every later
/// submission returns the same verdict.
#[derive(Debug)]
pub struct VerificationSession {
    params: VerifierParams,
    state: SessionState,
    transcript: Option<Transcript>,
    trace_root: Option<MerkleRoot>,
    cp_roots: Option<Vec<MerkleRoot>>,
    fold_challenges: Vec<FieldElement>,
    query_points: Vec<usize>,
    verdict: Option<VerificationVerdict>,
}

impl VerificationSession {
    /// Opens a session; the parameter digest is absorbed immediately.
    pub fn new(params: VerifierParams) -> Self {
        let transcript = Transcript::new(&params);
        debug!(
            hash = %params.hash(),
            rounds = params.num_rounds(),
            queries = params.num_queries(),
            "verification session opened"
        );
        Self {
            params,
            state: SessionState::Init,
            transcript: Some(transcript),
            trace_root: None,
            cp_roots: None,
            fold_challenges: Vec::new(),
            query_points: Vec::new(),
            verdict: None,
        }
    }

    /// Registers the trace commitment and absorbs it.
    pub fn register_trace_root(&mut self, root: MerkleRoot) -> Result<(), VerifierError> {
        self.ensure_open("register_trace_root")?;
        if self.trace_root.is_some() {
            return self.abort(
                ProtocolError::OutOfOrderRegistration {
                    what: "trace root registered twice",
                }
                .into(),
            );
        }
        let absorbed = self
            .transcript_mut("register_trace_root")?
            .absorb_digest(TranscriptLabel::TraceRoot, &root);
        if let Err(err) = absorbed {
            return self.abort(err.into());
        }
        debug!(root = ?root, "trace root registered");
        self.trace_root = Some(root);
        Ok(())
    }

    /// Registers one CP root per folding round.
    ///
    /// The roots are absorbed during [`Self::derive_query_points`], after the
    /// public inputs, each immediately before its fold challenge.
    pub fn register_cp_roots(&mut self, roots: &[MerkleRoot]) -> Result<(), VerifierError> {
        self.ensure_open("register_cp_roots")?;
        if self.trace_root.is_none() {
            return self.abort(
                ProtocolError::OutOfOrderRegistration {
                    what: "CP roots registered before the trace root",
                }
                .into(),
            );
        }
        if self.cp_roots.is_some() {
            return self.abort(
                ProtocolError::OutOfOrderRegistration {
                    what: "CP roots registered twice",
                }
                .into(),
            );
        }
        let expected = self.params.num_rounds();
        if roots.len() != expected {
            return self.abort(
                ProtocolError::WrongRoundCount {
                    expected,
                    got: roots.len(),
                }
                .into(),
            );
        }
        debug!(rounds = roots.len(), "cp roots registered");
        self.cp_roots = Some(roots.to_vec());
        self.state = SessionState::RootsRegistered;
        Ok(())
    }

    /// Absorbs the public inputs and derives fold challenges and query
    /// points. Runs at most once per session.
    pub fn derive_query_points(&mut self, public_inputs: &[u8]) -> Result<&[usize], VerifierError> {
        self.ensure_open("derive_query_points")?;
        match self.state {
            SessionState::Init => {
                let missing = if self.trace_root.is_none() {
                    "trace root"
                } else {
                    "CP roots"
                };
                return self.abort(ProtocolError::IncompleteCommitments { missing }.into());
            }
            SessionState::RootsRegistered => {}
            state => {
                return self.abort(
                    ProtocolError::InvalidState {
                        state,
                        operation: "derive_query_points",
                    }
                    .into(),
                );
            }
        }

        let derived = match (self.transcript.as_mut(), self.cp_roots.as_deref()) {
            (Some(transcript), Some(cp_roots)) => {
                derive_challenges(transcript, &self.params, cp_roots, public_inputs)
            }
            _ => {
                return self.abort(
                    ProtocolError::IncompleteCommitments {
                        missing: "CP roots",
                    }
                    .into(),
                )
            }
        };
        match derived {
            Ok((betas, points)) => {
                debug!(points = ?points, "query points derived");
                self.fold_challenges = betas;
                self.query_points = points;
                self.state = SessionState::ChallengesDerived;
                Ok(self.query_points.as_slice())
            }
            Err(err) => self.abort(err.into()),
        }
    }

    /// Checks a decoded FRI proof and records the verdict.
    pub fn verify(&mut self, proof: &FriProof) -> VerificationVerdict {
        if let Err(verdict) = self.ready_for_proof() {
            return verdict;
        }
        let span = info_span!(
            "verify",
            hash = %self.params.hash(),
            queries = self.query_points.len()
        );
        let _guard = span.enter();

        let cp_roots = self.cp_roots.as_deref().unwrap_or(&[]);
        let result = verify_fri(
            &self.params,
            cp_roots,
            &self.fold_challenges,
            proof,
            &self.query_points,
        );
        self.state = SessionState::RoundsChecked;

        let verdict = match result.map_err(classify) {
            Ok(()) => {
                info!("proof accepted");
                VerificationVerdict::Accept
            }
            Err(Ok(rejection)) => {
                warn!(
                    failures = rejection.errors().len(),
                    first = %rejection.first(),
                    "proof rejected"
                );
                VerificationVerdict::Reject(rejection)
            }
            Err(Err(err)) => {
                warn!(error = %err, "verification aborted");
                VerificationVerdict::Error(err)
            }
        };
        self.finish(verdict)
    }

    /// Decodes `bytes` and checks the resulting proof. Undecodable bytes
    /// reject the proof as malformed.
    pub fn verify_bytes(&mut self, bytes: &[u8]) -> VerificationVerdict {
        if let Err(verdict) = self.ready_for_proof() {
            return verdict;
        }
        match FriProof::from_bytes(bytes) {
            Ok(proof) => self.verify(&proof),
            Err(err) => {
                warn!(error = %err, "proof bytes rejected");
                let error = ProofError::MalformedProof(MalformedReason::Encoding(err));
                self.finish(VerificationVerdict::Reject(error.into()))
            }
        }
    }

    /// Parameter set the session is bound to.
    pub fn params(&self) -> &VerifierParams {
        &self.params
    }

    /// Current lifecycle position.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Registered trace root.
    pub fn trace_root(&self) -> Option<&MerkleRoot> {
        self.trace_root.as_ref()
    }

    /// Registered CP roots, empty until registration.
    pub fn cp_roots(&self) -> &[MerkleRoot] {
        self.cp_roots.as_deref().unwrap_or(&[])
    }

    /// Fold challenges, one per round, empty until derivation.
    pub fn fold_challenges(&self) -> &[FieldElement] {
        &self.fold_challenges
    }

    /// Derived query points in derivation order, empty until derivation.
    pub fn query_points(&self) -> &[usize] {
        &self.query_points
    }

    /// Recorded verdict, if any.
    pub fn verdict(&self) -> Option<&VerificationVerdict> {
        self.verdict.as_ref()
    }

    /// Live transcript; released once a verdict is recorded.
    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), VerifierError> {
        if self.verdict.is_some() {
            return Err(ProtocolError::InvalidState {
                state: self.state,
                operation,
            }
            .into());
        }
        Ok(())
    }

    fn transcript_mut(&mut self, operation: &'static str) -> Result<&mut Transcript, VerifierError> {
        let state = self.state;
        self.transcript
            .as_mut()
            .ok_or_else(|| ProtocolError::InvalidState { state, operation }.into())
    }

    fn ready_for_proof(&mut self) -> Result<(), VerificationVerdict> {
        if let Some(verdict) = &self.verdict {
            return Err(verdict.clone());
        }
        let err = match self.state {
            SessionState::ChallengesDerived => return Ok(()),
            SessionState::Init => ProtocolError::IncompleteCommitments {
                missing: if self.trace_root.is_none() {
                    "trace root"
                } else {
                    "CP roots"
                },
            },
            state => ProtocolError::InvalidState {
                state,
                operation: "verify",
            },
        };
        warn!(error = %err, "proof submitted out of order");
        Err(self.finish(VerificationVerdict::Error(err.into())))
    }

    fn abort<T>(&mut self, err: VerifierError) -> Result<T, VerifierError> {
        warn!(error = %err, state = ?self.state, "verification session aborted");
        self.finish(VerificationVerdict::Error(err.clone()));
        Err(err)
    }

    fn finish(&mut self, verdict: VerificationVerdict) -> VerificationVerdict {
        self.state = if verdict.is_accept() {
            SessionState::Accepted
        } else {
            SessionState::Rejected
        };
        self.transcript = None;
        self.verdict = Some(verdict.clone());
        verdict
    }
}

fn derive_challenges(
    transcript: &mut Transcript,
    params: &VerifierParams,
    cp_roots: &[MerkleRoot],
    public_inputs: &[u8],
) -> Result<(Vec<FieldElement>, Vec<usize>), TranscriptError> {
    transcript.absorb_bytes(TranscriptLabel::PublicInputs, public_inputs)?;
    let mut betas = Vec::with_capacity(cp_roots.len());
    for (round, root) in cp_roots.iter().enumerate() {
        let round = round as u8;
        transcript.absorb_digest(TranscriptLabel::CpRoot(round), root)?;
        betas.push(transcript.challenge_field(TranscriptLabel::FoldChallenge(round))?);
    }

    let num_queries = params.num_queries();
    transcript.absorb_bytes(
        TranscriptLabel::QueryCount,
        &(num_queries as u32).to_le_bytes(),
    )?;
    let domain_size = params.fri().domain_size();
    let points = (0..num_queries)
        .map(|_| transcript.challenge_index(TranscriptLabel::QueryIndex, domain_size))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((betas, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::Digest;
    use crate::params::VerifierParamsBuilder;

    fn params() -> VerifierParams {
        VerifierParamsBuilder::new()
            .num_rounds(3)
            .num_queries(5)
            .log_blowup(2)
            .build()
            .unwrap()
    }

    fn roots(count: usize) -> Vec<MerkleRoot> {
        (0..count).map(|i| Digest::new([i as u8 + 1; 32])).collect()
    }

    fn registered() -> VerificationSession {
        let mut session = VerificationSession::new(params());
        session.register_trace_root(Digest::new([0xaa; 32])).unwrap();
        session.register_cp_roots(&roots(3)).unwrap();
        session
    }

    #[test]
    fn derivation_fixes_points_and_challenges() {
        let mut session = registered();
        assert_eq!(session.state(), SessionState::RootsRegistered);
        let points = session.derive_query_points(b"inputs").unwrap().to_vec();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|&p| p < 32));
        assert_eq!(session.fold_challenges().len(), 3);
        assert_eq!(session.state(), SessionState::ChallengesDerived);
        assert_eq!(session.query_points(), points.as_slice());
    }

    #[test]
    fn cp_roots_before_trace_root_abort() {
        let mut session = VerificationSession::new(params());
        let err = session.register_cp_roots(&roots(3)).unwrap_err();
        assert!(matches!(
            err,
            VerifierError::Protocol(ProtocolError::OutOfOrderRegistration { .. })
        ));
        assert_eq!(session.state(), SessionState::Rejected);
        assert!(session.transcript().is_none());
        assert!(matches!(
            session.register_trace_root(Digest::default()),
            Err(VerifierError::Protocol(ProtocolError::InvalidState { .. }))
        ));
        assert_eq!(session.verdict(), Some(&VerificationVerdict::Error(err)));
    }

    #[test]
    fn wrong_round_count_is_reported() {
        let mut session = VerificationSession::new(params());
        session.register_trace_root(Digest::default()).unwrap();
        assert_eq!(
            session.register_cp_roots(&roots(2)),
            Err(VerifierError::Protocol(ProtocolError::WrongRoundCount {
                expected: 3,
                got: 2
            }))
        );
    }

    #[test]
    fn derivation_requires_commitments() {
        let mut session = VerificationSession::new(params());
        session.register_trace_root(Digest::default()).unwrap();
        assert_eq!(
            session.derive_query_points(&[]),
            Err(VerifierError::Protocol(
                ProtocolError::IncompleteCommitments {
                    missing: "CP roots"
                }
            ))
        );
    }

    #[test]
    fn derivation_runs_once() {
        let mut session = registered();
        session.derive_query_points(&[]).unwrap();
        assert!(matches!(
            session.derive_query_points(&[]),
            Err(VerifierError::Protocol(ProtocolError::InvalidState {
                state: SessionState::ChallengesDerived,
                ..
            }))
        ));
    }

    #[test]
    fn proof_before_derivation_is_an_error() {
        let mut session = registered();
        let verdict = session.verify(&FriProof::new(FieldElement::ZERO, Vec::new()));
        assert!(verdict.is_error());
        assert_eq!(session.state(), SessionState::Rejected);
    }

    #[test]
    fn undecodable_bytes_reject_and_verdict_sticks() {
        let mut session = registered();
        session.derive_query_points(&[]).unwrap();
        let verdict = session.verify_bytes(&[1, 2, 3]);
        assert!(matches!(
            verdict.first_rejection(),
            Some(ProofError::MalformedProof(MalformedReason::Encoding(_)))
        ));
        assert_eq!(session.verify_bytes(&[]), verdict);
        assert_eq!(session.state(), SessionState::Rejected);
    }

    #[test]
    fn public_inputs_bind_the_challenges() {
        let mut a = registered();
        let mut b = registered();
        assert_eq!(
            a.derive_query_points(b"x").unwrap(),
            b.derive_query_points(b"x").unwrap()
        );
        assert_eq!(a.fold_challenges(), b.fold_challenges());
        let mut c = registered();
        c.derive_query_points(b"y").unwrap();
        assert_ne!(a.fold_challenges(), c.fold_challenges());
    }
}
