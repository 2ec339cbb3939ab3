use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stark_verifier::field::FieldElement;
use stark_verifier::merkle::{Blake2sMerkleHasher, Blake3MerkleHasher, MerkleHasher, MerkleScheme};

fn make_leaves(count: usize) -> Vec<FieldElement> {
    (0..count as u64).map(|i| FieldElement::from(i + 1)).collect()
}

fn bench_commit_with<H: MerkleHasher>(c: &mut Criterion, name: &str) {
    let scheme = MerkleScheme::<H>::new(0x5354_4b56_5f4d_4b4c);
    let mut group = c.benchmark_group(name);
    for size in [1024usize, 16_384, 65_536] {
        let leaves = make_leaves(size);
        group.throughput(Throughput::Bytes((size * FieldElement::BYTE_LENGTH) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter(|| scheme.commit(black_box(leaves)).expect("commit"));
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    bench_commit_with::<Blake2sMerkleHasher>(c, "commit_blake2s");
    bench_commit_with::<Blake3MerkleHasher>(c, "commit_blake3");
}

fn bench_verify(c: &mut Criterion) {
    let scheme = MerkleScheme::<Blake2sMerkleHasher>::new(0x5354_4b56_5f4d_4b4c);
    let leaves = make_leaves(16_384);
    let tree = scheme.build(&leaves).expect("build");
    let root = tree.root();
    let proof = tree.prove(4_321).expect("prove");
    c.bench_function("verify_blake2s_depth14", |b| {
        b.iter(|| {
            scheme
                .verify(black_box(&root), black_box(&leaves[4_321]), black_box(&proof))
                .expect("well formed")
        })
    });
}

criterion_group!(benches, bench_commit, bench_verify);
criterion_main!(benches);
