use crate::setup::{CommitmentKey, Trapdoor};
use ark_bls12_381::Bls12_381;
use ark_ec::pairing::Pairing;
use ark_ff::UniformRand;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use ark_std::vec::Vec;

/// curve used for tests
pub type TestCurve = Bls12_381;
pub type TestCurveFr = <TestCurve as Pairing>::ScalarField;

/// Deterministic key shared by most tests.
pub fn test_key(ell: usize) -> (CommitmentKey<TestCurve>, Trapdoor<TestCurve>) {
    CommitmentKey::insecure_setup_from_seed(ell, b"xyz").unwrap()
}

/// `n` random scalars, distinct with overwhelming probability.
pub fn random_elements<R: RngCore>(n: usize, rng: &mut R) -> Vec<TestCurveFr> {
    (0..n).map(|_| TestCurveFr::rand(rng)).collect()
}

/// Every copy of `value` that still decodes after flipping one bit in every `stride`-th byte
/// of its compressed encoding, one byte per copy.
pub fn tampered_copies<T: CanonicalSerialize + CanonicalDeserialize>(
    value: &T,
    stride: usize,
) -> Vec<T> {
    let mut bytes = Vec::new();
    value.serialize_compressed(&mut bytes).unwrap();
    (0..bytes.len())
        .step_by(stride)
        .filter_map(|pos| {
            let mut copy = bytes.clone();
            copy[pos] ^= 1 << (pos % 8);
            T::deserialize_compressed(&copy[..]).ok()
        })
        .collect()
}
