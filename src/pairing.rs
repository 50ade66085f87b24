//! Batched group operations: multi-scalar multiplication and pairing checks.
//!
//! Every verifier in the crate reduces to a product of pairings compared either with the
//! identity of `GT` or with a fixed target such as `e(g, h)`. The product is always computed
//! with one multi Miller loop and a single final exponentiation.
use crate::error::{invalid_args, SResult};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_ff::Zero;

/// `sum scalars[i] * bases[i]`. The two slices must have the same length.
pub fn msm<G: CurveGroup>(bases: &[G::Affine], scalars: &[G::ScalarField]) -> SResult<G> {
    if bases.len() != scalars.len() {
        return Err(invalid_args("msm bases and scalars differ in length"));
    }
    Ok(<G as VariableBaseMSM>::msm_unchecked(bases, scalars))
}

/// `prod e(g1[i], g2[i])`, or `None` if the lengths differ or the final exponentiation fails.
pub fn product<E: Pairing>(g1: &[E::G1], g2: &[E::G2]) -> Option<PairingOutput<E>> {
    if g1.len() != g2.len() {
        return None;
    }
    let g1 = E::G1::normalize_batch(g1);
    let g2 = E::G2::normalize_batch(g2);
    E::final_exponentiation(E::multi_miller_loop(g1, g2))
}

/// True if `prod e(g1[i], g2[i])` is the identity of `GT`.
pub fn product_is_identity<E: Pairing>(g1: &[E::G1], g2: &[E::G2]) -> bool {
    product::<E>(g1, g2).map_or(false, |p| p.is_zero())
}

/// True if `prod e(g1[i], g2[i])` equals `target`.
pub fn product_equals<E: Pairing>(g1: &[E::G1], g2: &[E::G2], target: &PairingOutput<E>) -> bool {
    product::<E>(g1, g2).map_or(false, |p| &p == target)
}

/// True if `e(p1, q1) = e(p2, q2)`, checked as `e(p1, q1) * e(-p2, q2) = 1`.
pub fn pairings_equal<E: Pairing>(p1: E::G1, q1: E::G2, p2: E::G1, q2: E::G2) -> bool {
    product_is_identity::<E>(&[p1, -p2], &[q1, q2])
}
