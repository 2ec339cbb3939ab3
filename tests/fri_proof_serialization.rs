
use _fixtures::{low_degree_polynomial, small_params, HonestFri};
use stark_verifier::fri::FriProof;
use stark_verifier::params::{FailureMode, HashKind};
use stark_verifier::proof::{MalformedReason, ProofError};
use stark_verifier::ser::{SerError, SerKind};

fn fixture() -> HonestFri {
    let params = small_params(HashKind::Blake2s, FailureMode::FailFast);
    let polynomial = low_degree_polynomial(&params, 4);
    HonestFri::new(params, &polynomial)
}

#[test]
fn honest_proof_survives_encoding() {
    let fixture = fixture();
    let bytes = fixture.proof.to_bytes().expect("encode");
    assert_eq!(FriProof::from_bytes(&bytes).expect("decode"), fixture.proof);
    assert!(fixture.verifier().submit_fri_proof_bytes(&bytes).is_accept());
}

#[test]
fn truncated_bytes_are_rejected_as_malformed() {
    let fixture = fixture();
    let bytes = fixture.proof.to_bytes().expect("encode");
    let verdict = fixture
        .verifier()
        .submit_fri_proof_bytes(&bytes[..bytes.len() - 1]);
    // The last sibling list no longer fits its declared count.
    assert_eq!(
        verdict.first_rejection(),
        Some(&ProofError::MalformedProof(MalformedReason::Encoding(
            SerError::invalid_length(SerKind::MerklePath, "siblings")
        )))
    );
}

#[test]
fn trailing_bytes_are_rejected_as_malformed() {
    let fixture = fixture();
    let mut bytes = fixture.proof.to_bytes().expect("encode");
    bytes.extend_from_slice(&[0, 0]);
    let verdict = fixture.verifier().submit_fri_proof_bytes(&bytes);
    assert_eq!(
        verdict.first_rejection(),
        Some(&ProofError::MalformedProof(MalformedReason::Encoding(
            SerError::TrailingBytes {
                kind: SerKind::FriProof,
                consumed: bytes.len() - 2,
                remaining: 2,
            }
        )))
    );
}

#[test]
fn non_canonical_opening_is_rejected() {
    let fixture = fixture();
    let mut bytes = fixture.proof.to_bytes().expect("encode");
    // version (2) + final value (8) + query count (4) + index (4) + round count (4)
    let first_value = 2 + 8 + 4 + 4 + 4;
    bytes[first_value..first_value + 8].copy_from_slice(&u64::MAX.to_le_bytes());
    assert_eq!(
        FriProof::from_bytes(&bytes),
        Err(SerError::invalid_value(SerKind::RoundOpening, "value"))
    );
}

#[test]
fn serde_json_mirrors_the_structure() {
    let fixture = fixture();
    let json = serde_json::to_string(&fixture.proof).expect("json");
    let decoded: FriProof = serde_json::from_str(&json).expect("json decode");
    assert_eq!(decoded, fixture.proof);
}
