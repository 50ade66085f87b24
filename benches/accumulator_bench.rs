#[macro_use]
extern crate criterion;

use ark_bilinear_accumulator::{Accumulator, CommitmentKey, Trapdoor};
use ark_bls12_381::{Bls12_381, Fr};
use ark_ff::UniformRand;
use ark_std::ops::RangeInclusive;
use ark_std::test_rng;
use criterion::{black_box, BenchmarkId, Criterion};

const ELL_RANGE: RangeInclusive<usize> = 6..=10;

type Acc = Accumulator<Bls12_381>;

fn elements(n: usize) -> Vec<Fr> {
    let mut rng = test_rng();
    (0..n).map(|_| Fr::rand(&mut rng)).collect()
}

fn setup(ell: usize) -> (CommitmentKey<Bls12_381>, Trapdoor<Bls12_381>) {
    CommitmentKey::insecure_setup_from_seed(ell, b"bench").unwrap()
}

fn commit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Commit");
    for ell in ELL_RANGE {
        let (key, trapdoor) = setup(ell);
        let set = elements(1 << ell);
        group.bench_with_input(BenchmarkId::new("honest", ell), &ell, |b, _| {
            b.iter(|| Acc::commit(&key, black_box(&set)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("trapdoor", ell), &ell, |b, _| {
            b.iter(|| trapdoor.commit_fake_g1(&key, black_box(&set)).unwrap())
        });
    }
}

fn membership_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Membership");
    group.sample_size(10);
    for ell in ELL_RANGE {
        let (key, trapdoor) = setup(ell);
        let all = elements(1 << ell);
        let (set_x, set_i) = all.split_at(all.len() / 2);
        let (digest, _) = Acc::commit(&key, &all).unwrap();
        group.bench_with_input(BenchmarkId::new("prove", ell), &ell, |b, _| {
            b.iter(|| Acc::mem_prove(&key, black_box(set_x), black_box(set_i)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("prove with trapdoor", ell), &ell, |b, _| {
            b.iter(|| trapdoor.prove_mem_fake(&key, black_box(set_x), black_box(set_i)).unwrap())
        });
        let proofs = Acc::mem_prove(&key, set_x, set_i).unwrap();
        group.bench_with_input(BenchmarkId::new("aggregate", ell), &ell, |b, _| {
            b.iter(|| Acc::agg_mem_prove(&key, black_box(set_i), black_box(&proofs)).unwrap())
        });
        let (agg, _) = Acc::agg_mem_prove(&key, set_i, &proofs).unwrap();
        group.bench_with_input(BenchmarkId::new("verify aggregate", ell), &ell, |b, _| {
            b.iter(|| Acc::agg_mem_verify(&key, &digest, black_box(set_i), &agg))
        });
        let (poe, _) = Acc::agg_mem_prove_poe(&key, &digest, set_i, &proofs).unwrap();
        group.bench_with_input(BenchmarkId::new("verify aggregate with PoE", ell), &ell, |b, _| {
            b.iter(|| Acc::agg_mem_verify_poe(&key, &digest, black_box(set_i), &poe))
        });
    }
}

fn non_membership_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Non-membership");
    group.sample_size(10);
    for ell in ELL_RANGE {
        let (key, _) = setup(ell);
        let all = elements(1 << ell);
        let (set_x, set_i) = all.split_at(all.len() / 2);
        let (digest, _) = Acc::commit(&key, set_x).unwrap();
        group.bench_with_input(BenchmarkId::new("prove", ell), &ell, |b, _| {
            b.iter(|| Acc::non_mem_prove(&key, black_box(set_x), black_box(set_i)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("batch prove", ell), &ell, |b, _| {
            b.iter(|| Acc::batch_non_mem_prove(&key, black_box(set_x), black_box(set_i)).unwrap())
        });
        let pair = Acc::batch_non_mem_prove(&key, set_x, set_i).unwrap();
        group.bench_with_input(BenchmarkId::new("verify aggregate", ell), &ell, |b, _| {
            b.iter(|| Acc::agg_non_mem_verify(&key, &digest, black_box(set_i), &pair))
        });
    }
}

fn bench_bls_381(c: &mut Criterion) {
    commit_bench(c);
    membership_bench(c);
    non_membership_bench(c);
}

criterion_group!(benches, bench_bls_381);
criterion_main!(benches);
