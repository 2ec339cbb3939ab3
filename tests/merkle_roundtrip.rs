use proptest::prelude::*;
use stark_verifier::field::{FieldElement, FieldElementOps};
use stark_verifier::merkle::{
    Blake2sMerkleHasher, Blake3MerkleHasher, Digest, MerkleError, MerkleHasher, MerkleScheme,
};
use stark_verifier::params::VerifierParams;

fn leaves(count: usize) -> Vec<FieldElement> {
    (0..count as u64)
        .map(|i| FieldElement::from(i * 1_000_003 + 17))
        .collect()
}

fn sample_scheme() -> MerkleScheme {
    MerkleScheme::from_params(&VerifierParams::default())
}

#[test]
fn eight_leaf_sample() {
    let scheme = sample_scheme();
    let values = leaves(8);
    let root = scheme.commit(&values).expect("commit");
    let proof = scheme.prove(&values, 3).expect("prove");
    assert_eq!(proof.index, 3);
    assert_eq!(proof.depth(), 3);
    assert!(scheme.verify(&root, &values[3], &proof).expect("well formed"));

    let bumped = values[3].add(&FieldElement::ONE);
    assert!(!scheme.verify(&root, &bumped, &proof).expect("well formed"));
}

#[test]
fn tampered_sibling_fails() {
    let scheme = sample_scheme();
    let values = leaves(8);
    let root = scheme.commit(&values).expect("commit");
    let mut proof = scheme.prove(&values, 5).expect("prove");
    let mut bytes = proof.siblings[1].into_bytes();
    bytes[31] ^= 0x80;
    proof.siblings[1] = Digest::new(bytes);
    assert_eq!(scheme.verify(&root, &values[5], &proof), Ok(false));
}

#[test]
fn structural_defects_are_errors() {
    let scheme = sample_scheme();
    let values = leaves(8);
    let root = scheme.commit(&values).expect("commit");
    let proof = scheme.prove(&values, 2).expect("prove");

    let mut short = proof.clone();
    short.siblings.pop();
    assert!(matches!(
        scheme.verify_at_depth(&root, &values[2], &short, 3),
        Err(MerkleError::MalformedProof { .. })
    ));

    let mut wide = proof;
    wide.index = 8;
    assert_eq!(
        scheme.verify(&root, &values[2], &wide),
        Err(MerkleError::IndexOutsideWidth { index: 8, depth: 3 })
    );
}

#[test]
fn empty_and_out_of_range() {
    let scheme = sample_scheme();
    assert_eq!(scheme.commit(&[]), Err(MerkleError::EmptyCommitment));
    assert_eq!(
        scheme.prove(&leaves(5), 5),
        Err(MerkleError::IndexOutOfRange {
            index: 5,
            leaf_count: 5
        })
    );
}

#[test]
fn backends_commit_differently() {
    let values = leaves(12);
    let blake2s = MerkleScheme::<Blake2sMerkleHasher>::new(7)
        .commit(&values)
        .expect("commit");
    let blake3 = MerkleScheme::<Blake3MerkleHasher>::new(7)
        .commit(&values)
        .expect("commit");
    assert_ne!(blake2s, blake3);
    assert_ne!(
        Blake2sMerkleHasher::padding_digest(7),
        Blake3MerkleHasher::padding_digest(7)
    );
}

proptest! {
    #[test]
    fn every_index_opens(count in 1usize..40, seed in any::<u64>()) {
        let values: Vec<FieldElement> = (0..count as u64)
            .map(|i| FieldElement::new(seed ^ i.wrapping_mul(0x9e37_79b9)))
            .collect();
        let scheme = MerkleScheme::<Blake3MerkleHasher>::new(seed);
        let tree = scheme.build(&values).expect("build");
        let root = tree.root();
        for (index, value) in values.iter().enumerate() {
            let proof = tree.prove(index).expect("prove");
            prop_assert!(scheme.verify(&root, value, &proof).expect("well formed"));
            prop_assert!(!scheme
                .verify(&root, &value.add(&FieldElement::ONE), &proof)
                .expect("well formed"));
        }
    }
}
