//! Non-interactive proof of exponentiation.
//!
//! Proves `w = u^{v(s)}` for a public polynomial `v` with two group elements, so that the
//! verifier pays a constant number of pairings instead of lifting `v` into the exponent.
//!
//! The challenge `l = H(w, u, v)` splits `v(x) = (x - l) q(x) + r`. With `p = v - r` the proof
//! is `(g^{q(s)}, X^{p(s)})` where `X` is the generator of whichever group keeps the pairing
//! slots consistent: `h` when `u` lives in `G1`, `g` when `u` lives in `G2`.
use crate::error::SResult;
use crate::pairing::pairings_equal;
use crate::poly::{constant_term, divide, linear_factor};
use crate::rng::{Blake2b512Rng, FeedableRNG};
use crate::setup::CommitmentKey;
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_poly::univariate::DensePolynomial;
use ark_poly::{DenseUVPolynomial, Polynomial};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;

/// Proof for a base in `G1`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PoeProofG1<E: Pairing> {
    /// `g^{q(s)}`
    pub q1: E::G1Affine,
    /// `h^{p(s)}`
    pub q2: E::G2Affine,
}

/// Proof for a base in `G2`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PoeProofG2<E: Pairing> {
    /// `g^{q(s)}`
    pub q1: E::G1Affine,
    /// `g^{p(s)}`
    pub q2: E::G1Affine,
}

/// Proof of exponentiation
pub struct Poe<E: Pairing> {
    #[doc(hidden)]
    _marker: PhantomData<E>,
}

fn challenge<F: PrimeField, W: CanonicalSerialize, U: CanonicalSerialize>(
    w: &W,
    u: &U,
    v: &DensePolynomial<F>,
) -> SResult<F> {
    let mut rng = Blake2b512Rng::with_label(b"proof of exponentiation");
    rng.feed(w)?;
    rng.feed(u)?;
    rng.feed(&v.coeffs)?;
    Ok(rng.challenge())
}

/// `(q, p)` with `v = (x - l) q + r` and `p = v - r`.
fn split<F: PrimeField>(
    v: &DensePolynomial<F>,
    l: F,
) -> SResult<(DensePolynomial<F>, DensePolynomial<F>)> {
    let (q, remainder) = divide(v, &linear_factor(l))?;
    let r = constant_term(&remainder);
    let mut p = v.coeffs.clone();
    if let Some(c) = p.first_mut() {
        *c -= r;
    }
    Ok((q, DensePolynomial::from_coefficients_vec(p)))
}

impl<E: Pairing> Poe<E> {
    /// Prove `w = u^{v(s)}` for `u, w` in `G1`.
    pub fn prove_g1(
        key: &CommitmentKey<E>,
        w: &E::G1Affine,
        u: &E::G1Affine,
        v: &DensePolynomial<E::ScalarField>,
    ) -> SResult<PoeProofG1<E>> {
        let timer = start_timer!(|| format!("PoE in G1, degree {}", v.degree()));
        let l = challenge(w, u, v)?;
        let (q, p) = split(v, l)?;
        let proof = PoeProofG1 {
            q1: key.commit_poly_g1(&q)?.into_affine(),
            q2: key.commit_poly_g2(&p)?.into_affine(),
        };
        end_timer!(timer);
        Ok(proof)
    }

    /// Check `e(Q1, h^{s - l}) = e(g, Q2)` and `e(u, h^r Q2) = e(w, h)`.
    pub fn verify_g1(
        key: &CommitmentKey<E>,
        proof: &PoeProofG1<E>,
        w: &E::G1Affine,
        u: &E::G1Affine,
        v: &DensePolynomial<E::ScalarField>,
    ) -> bool {
        let l = match challenge(w, u, v) {
            Ok(l) => l,
            Err(_) => return false,
        };
        let r = v.evaluate(&l);
        let h = key.h.into_group();
        let q2 = proof.q2.into_group();
        pairings_equal::<E>(proof.q1.into_group(), key.vk_shift(l), key.g.into_group(), q2)
            && pairings_equal::<E>(u.into_group(), h * r + q2, w.into_group(), h)
    }

    /// Prove `w = u^{v(s)}` for `u, w` in `G2`.
    pub fn prove_g2(
        key: &CommitmentKey<E>,
        w: &E::G2Affine,
        u: &E::G2Affine,
        v: &DensePolynomial<E::ScalarField>,
    ) -> SResult<PoeProofG2<E>> {
        let timer = start_timer!(|| format!("PoE in G2, degree {}", v.degree()));
        let l = challenge(w, u, v)?;
        let (q, p) = split(v, l)?;
        let proof = PoeProofG2 {
            q1: key.commit_poly_g1(&q)?.into_affine(),
            q2: key.commit_poly_g1(&p)?.into_affine(),
        };
        end_timer!(timer);
        Ok(proof)
    }

    /// Check `e(Q1, h^{s - l}) = e(Q2, h)` and `e(g^r Q2, u) = e(g, w)`.
    pub fn verify_g2(
        key: &CommitmentKey<E>,
        proof: &PoeProofG2<E>,
        w: &E::G2Affine,
        u: &E::G2Affine,
        v: &DensePolynomial<E::ScalarField>,
    ) -> bool {
        let l = match challenge(w, u, v) {
            Ok(l) => l,
            Err(_) => return false,
        };
        let r = v.evaluate(&l);
        let g = key.g.into_group();
        let q2 = proof.q2.into_group();
        pairings_equal::<E>(proof.q1.into_group(), key.vk_shift(l), q2, key.h.into_group())
            && pairings_equal::<E>(g * r + q2, u.into_group(), g, w.into_group())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::vanishing_polynomial;
    use crate::test_utils::{random_elements, test_key, TestCurve, TestCurveFr};
    use ark_std::{test_rng, UniformRand};

    type G1 = <TestCurve as Pairing>::G1;
    type G2 = <TestCurve as Pairing>::G2;

    #[test]
    fn poe_in_both_groups() {
        let mut rng = test_rng();
        let (key, trapdoor) = test_key(5);
        let v = vanishing_polynomial(&random_elements(20, &mut rng));
        let v_s = v.evaluate(&trapdoor.s());

        let u1 = G1::rand(&mut rng).into_affine();
        let w1 = (u1 * v_s).into_affine();
        let proof = Poe::prove_g1(&key, &w1, &u1, &v).unwrap();
        assert!(Poe::verify_g1(&key, &proof, &w1, &u1, &v));
        let other = (u1 * (v_s + TestCurveFr::from(1u64))).into_affine();
        assert!(!Poe::verify_g1(&key, &proof, &other, &u1, &v));

        let u2 = G2::rand(&mut rng).into_affine();
        let w2 = (u2 * v_s).into_affine();
        let proof = Poe::prove_g2(&key, &w2, &u2, &v).unwrap();
        assert!(Poe::verify_g2(&key, &proof, &w2, &u2, &v));
        let mut bad = proof.clone();
        bad.q1 = (bad.q1 + key.g()).into_affine();
        assert!(!Poe::verify_g2(&key, &bad, &w2, &u2, &v));
    }

    #[test]
    fn poe_rejects_wrong_polynomial() {
        let mut rng = test_rng();
        let (key, trapdoor) = test_key(4);
        let v = vanishing_polynomial(&random_elements(6, &mut rng));
        let u = key.g();
        let w = (u * v.evaluate(&trapdoor.s())).into_affine();
        let proof = Poe::prove_g1(&key, &w, &u, &v).unwrap();
        let v2 = vanishing_polynomial(&random_elements(6, &mut rng));
        assert!(!Poe::verify_g1(&key, &proof, &w, &u, &v2));
    }
}
