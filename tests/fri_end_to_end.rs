
use _fixtures::{
    bump_conjugate, bump_value, flip_sibling, high_degree_polynomial, low_degree_polynomial,
    small_params, HonestFri,
};
use stark_verifier::field::{FieldElement, FieldElementOps};
use stark_verifier::fri::{Malformation, OpeningSide};
use stark_verifier::params::{FailureMode, HashKind, VerifierParams};
use stark_verifier::proof::{MalformedReason, ProofError, VerificationVerdict};

fn honest(hash: HashKind, mode: FailureMode) -> HonestFri {
    let params = small_params(hash, mode);
    let polynomial = low_degree_polynomial(&params, 11);
    HonestFri::new(params, &polynomial)
}

fn rejection_queries(verdict: &VerificationVerdict) -> Vec<usize> {
    verdict
        .rejections()
        .iter()
        .filter_map(ProofError::query)
        .collect()
}

#[test]
fn honest_proofs_are_accepted() {
    stark_verifier::utils::logging::init_tracing(Some("stark_verifier=debug"))
        .expect("install subscriber");
    for (hash, mode) in [
        (HashKind::Blake2s, FailureMode::FailFast),
        (HashKind::Blake3, FailureMode::CollectAll),
    ] {
        let fixture = honest(hash, mode);
        let mut verifier = fixture.verifier();
        let verdict = verifier.submit_fri_proofs(fixture.proof.clone());
        assert_eq!(verdict, VerificationVerdict::Accept, "{hash} / {mode:?}");
    }
}

#[test]
fn honest_sample_profile_proof_is_accepted() {
    let params = VerifierParams::default();
    let polynomial = low_degree_polynomial(&params, 5);
    let fixture = HonestFri::new(params, &polynomial);
    assert_eq!(fixture.cp_roots.len(), 11);
    let bytes = fixture.proof.to_bytes().expect("encode");
    let mut verifier = fixture.verifier();
    assert!(verifier.submit_fri_proof_bytes(&bytes).is_accept());
}

#[test]
fn tampered_value_breaks_inclusion_in_every_round() {
    let fixture = honest(HashKind::Blake2s, FailureMode::FailFast);
    for round in 0..fixture.params.num_rounds() {
        let mut proof = fixture.proof.clone();
        bump_value(&mut proof, 2, round);
        let verdict = fixture.verifier().submit_fri_proofs(proof);
        assert_eq!(
            verdict.first_rejection(),
            Some(&ProofError::InvalidInclusionProof {
                query: 2,
                round,
                side: OpeningSide::Value,
            })
        );
    }
}

#[test]
fn tampered_conjugate_breaks_inclusion() {
    let fixture = honest(HashKind::Blake3, FailureMode::FailFast);
    let mut proof = fixture.proof.clone();
    bump_conjugate(&mut proof, 0, 1);
    let verdict = fixture.verifier().submit_fri_proofs(proof);
    assert_eq!(
        verdict.first_rejection(),
        Some(&ProofError::InvalidInclusionProof {
            query: 0,
            round: 1,
            side: OpeningSide::Conjugate,
        })
    );
}

#[test]
fn tampered_sibling_breaks_inclusion() {
    let fixture = honest(HashKind::Blake2s, FailureMode::FailFast);
    let mut proof = fixture.proof.clone();
    flip_sibling(&mut proof, 5, 3);
    let verdict = fixture.verifier().submit_fri_proofs(proof);
    assert!(matches!(
        verdict.first_rejection(),
        Some(ProofError::InvalidInclusionProof {
            query: 5,
            round: 3,
            ..
        })
    ));
}

#[test]
fn corrupted_committed_layer_is_inconsistent() {
    for corrupted in 1..4 {
        let params = small_params(HashKind::Blake2s, FailureMode::CollectAll);
        let polynomial = low_degree_polynomial(&params, 3);
        let fixture = HonestFri::with_layer_hook(params, &polynomial, |round, layer| {
            if round == corrupted {
                for value in layer.iter_mut() {
                    *value = value.add(&FieldElement::ONE);
                }
            }
        });
        let verdict = fixture.verifier().submit_fri_proofs(fixture.proof.clone());
        assert_eq!(verdict.rejections().len(), fixture.params.num_queries());
        for (query, error) in verdict.rejections().iter().enumerate() {
            assert_eq!(
                error,
                &ProofError::FoldingInconsistency {
                    query,
                    round: corrupted - 1,
                }
            );
        }
    }
}

#[test]
fn wrong_final_value_violates_degree_bound() {
    let fixture = honest(HashKind::Blake2s, FailureMode::CollectAll);
    let mut proof = fixture.proof.clone();
    proof.final_value = proof.final_value.add(&FieldElement::ONE);
    let verdict = fixture.verifier().submit_fri_proofs(proof);
    let expected: Vec<_> = (0..fixture.params.num_queries())
        .map(|query| ProofError::DegreeBoundViolation { query })
        .collect();
    assert_eq!(verdict.rejections(), expected.as_slice());
}

#[test]
fn too_high_degree_is_caught_by_the_final_check() {
    let params = small_params(HashKind::Blake2s, FailureMode::CollectAll);
    let final_size = 1usize << params.fri().log_blowup;
    // Each constant commits to different layers and so derives different
    // query points; take the first whose points leave the final base point.
    let (fixture, expected) = (3u64..35)
        .map(|constant| {
            let polynomial = high_degree_polynomial(&params, constant);
            let fixture = HonestFri::new(params.clone(), &polynomial);
            let expected: Vec<usize> = fixture
                .query_points
                .iter()
                .enumerate()
                .filter(|&(_, &point)| point % final_size != 0)
                .map(|(query, _)| query)
                .collect();
            (fixture, expected)
        })
        .find(|(_, expected)| !expected.is_empty())
        .expect("some statement samples a query away from the base point");

    let verdict = fixture.verifier().submit_fri_proofs(fixture.proof.clone());
    assert!(verdict.is_reject());
    assert!(verdict
        .rejections()
        .iter()
        .all(|error| matches!(error, ProofError::DegreeBoundViolation { .. })));
    assert_eq!(rejection_queries(&verdict), expected);
}

#[test]
fn failure_modes_aggregate_differently() {
    let fail_fast = honest(HashKind::Blake2s, FailureMode::FailFast);
    let collect_all = honest(HashKind::Blake2s, FailureMode::CollectAll);
    for (fixture, expected) in [(fail_fast, vec![1]), (collect_all, vec![1, 6])] {
        let mut proof = fixture.proof.clone();
        bump_value(&mut proof, 6, 0);
        bump_value(&mut proof, 1, 2);
        let verdict = fixture.verifier().submit_fri_proofs(proof);
        assert!(verdict.is_reject());
        assert_eq!(rejection_queries(&verdict), expected);
    }
}

#[test]
fn structural_defects_are_malformed() {
    let fixture = honest(HashKind::Blake2s, FailureMode::FailFast);

    let mut missing_query = fixture.proof.clone();
    missing_query.queries.pop();
    assert_eq!(
        fixture
            .verifier()
            .submit_fri_proofs(missing_query)
            .first_rejection(),
        Some(&ProofError::MalformedProof(MalformedReason::Structure(
            Malformation::QueryCount {
                expected: 8,
                got: 7
            }
        )))
    );

    let mut wrong_index = fixture.proof.clone();
    wrong_index.queries[4].index ^= 1;
    assert!(matches!(
        fixture.verifier().submit_fri_proofs(wrong_index).first_rejection(),
        Some(ProofError::MalformedProof(MalformedReason::Structure(
            Malformation::IndexMismatch { query: 4, .. }
        )))
    ));

    let mut missing_round = fixture.proof.clone();
    missing_round.queries[0].rounds.pop();
    assert!(matches!(
        fixture.verifier().submit_fri_proofs(missing_round).first_rejection(),
        Some(ProofError::MalformedProof(MalformedReason::Structure(
            Malformation::RoundCount { query: 0, .. }
        )))
    ));

    let mut short_path = fixture.proof.clone();
    short_path.queries[3].rounds[1].path.siblings.pop();
    assert!(matches!(
        fixture.verifier().submit_fri_proofs(short_path).first_rejection(),
        Some(ProofError::MalformedProof(MalformedReason::Structure(
            Malformation::Path {
                query: 3,
                round: 1,
                side: OpeningSide::Value,
                ..
            }
        )))
    ));
}
