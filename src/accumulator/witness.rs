//! Digests and per-element witnesses, computed honestly through polynomial arithmetic.
use crate::accumulator::{Accumulator, AggNonMemProof, NonMembershipWitness};
use crate::error::{invariant_violation, SResult};
use crate::pairing::{product_equals, product_is_identity};
use crate::poly::{constant_term, divide, linear_factor, normalized_bezout, vanishing_polynomial};
use crate::setup::CommitmentKey;
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Zero;
use ark_poly::univariate::DensePolynomial;
use ark_poly::Polynomial;
use ark_std::vec::Vec;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl<E: Pairing> Accumulator<E> {
    /// Commit to `elements`. Returns the digest `g^{v(s)}` and `v`.
    ///
    /// Fails with `CapacityExceeded` if there are more than `q` elements.
    pub fn commit(
        key: &CommitmentKey<E>,
        elements: &[E::ScalarField],
    ) -> SResult<(E::G1Affine, DensePolynomial<E::ScalarField>)> {
        ensure_capacity!(elements.len(), key.q);
        let timer = start_timer!(|| format!("commit to {} elements", elements.len()));
        let poly = vanishing_polynomial(elements);
        let digest = key.commit_poly_g1(&poly)?.into_affine();
        end_timer!(timer);
        Ok((digest, poly))
    }

    /// Commit to `elements` in `G2`: `h^{v(s)}`.
    pub fn commit_g2(key: &CommitmentKey<E>, elements: &[E::ScalarField]) -> SResult<E::G2Affine> {
        ensure_capacity!(elements.len(), key.q);
        let poly = vanishing_polynomial(elements);
        Ok(key.commit_poly_g2(&poly)?.into_affine())
    }

    /// Membership witnesses for every element of `set_i` against the digest of `set_x ∪ set_i`.
    ///
    /// An element outside `set_x ∪ set_i` leaves a nonzero remainder and the call fails with
    /// `InvariantViolation`.
    pub fn mem_prove(
        key: &CommitmentKey<E>,
        set_x: &[E::ScalarField],
        set_i: &[E::ScalarField],
    ) -> SResult<Vec<E::G1Affine>> {
        ensure_capacity!(set_x.len() + set_i.len(), key.q);
        let timer = start_timer!(|| format!("membership witnesses for {} elements", set_i.len()));
        let all: Vec<_> = set_x.iter().chain(set_i.iter()).copied().collect();
        let poly = vanishing_polynomial(&all);
        let witnesses = Self::witnesses_for(key, &poly, set_i)?;
        end_timer!(timer);
        Ok(witnesses)
    }

    /// Quotients `poly / (x - i)` lifted into `G1`. `poly` must vanish on every `i`.
    pub(crate) fn witnesses_for(
        key: &CommitmentKey<E>,
        poly: &DensePolynomial<E::ScalarField>,
        elements: &[E::ScalarField],
    ) -> SResult<Vec<E::G1Affine>> {
        let witnesses = cfg_iter!(elements)
            .map(|e| {
                let (quotient, remainder) = divide(poly, &linear_factor(*e))?;
                if !remainder.is_zero() {
                    return Err(invariant_violation("element is not in the committed set"));
                }
                key.commit_poly_g1(&quotient)
            })
            .collect::<SResult<Vec<E::G1>>>()?;
        Ok(E::G1::normalize_batch(&witnesses))
    }

    /// Check `e(digest, h) = e(proof, h^{s - element})`.
    pub fn mem_verify_single(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        element: E::ScalarField,
        proof: &E::G1Affine,
    ) -> bool {
        product_is_identity::<E>(
            &[digest.into_group(), proof.into_group()],
            &[key.h_neg.into_group(), key.vk_shift(element)],
        )
    }

    /// Non-membership witnesses for every element of `set_i` against the digest of `set_x`.
    ///
    /// `set_x` and `set_i` must be disjoint; an element of `set_i` that lies in `set_x` fails
    /// with `InvariantViolation`.
    pub fn non_mem_prove(
        key: &CommitmentKey<E>,
        set_x: &[E::ScalarField],
        set_i: &[E::ScalarField],
    ) -> SResult<Vec<NonMembershipWitness<E>>> {
        ensure_capacity!(set_x.len(), key.q);
        let timer = start_timer!(|| format!("non-membership witnesses for {} elements", set_i.len()));
        let poly = vanishing_polynomial(set_x);
        let witnesses = cfg_iter!(set_i)
            .map(|e| {
                let (alpha, beta) = normalized_bezout(&poly, &linear_factor(*e))?;
                assert_safe!(alpha.degree() == 0);
                Ok(NonMembershipWitness {
                    alpha: constant_term(&alpha),
                    beta: key.commit_poly_g1(&beta)?.into_affine(),
                })
            })
            .collect::<SResult<Vec<_>>>()?;
        end_timer!(timer);
        Ok(witnesses)
    }

    /// Check `e(digest^alpha, h) * e(beta, h^{s - element}) = e(g, h)`.
    pub fn non_mem_verify_single(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        element: E::ScalarField,
        witness: &NonMembershipWitness<E>,
    ) -> bool {
        product_equals::<E>(
            &[*digest * witness.alpha, witness.beta.into_group()],
            &[key.h.into_group(), key.vk_shift(element)],
            &key.e_gh,
        )
    }

    /// One Bezout pair proving `set_i` is disjoint from `set_x`, from the polynomial gcd of
    /// `v_X` and `v_I`. Checked with [`agg_non_mem_verify`](Self::agg_non_mem_verify).
    pub fn batch_non_mem_prove(
        key: &CommitmentKey<E>,
        set_x: &[E::ScalarField],
        set_i: &[E::ScalarField],
    ) -> SResult<AggNonMemProof<E>> {
        ensure_capacity!(set_x.len(), key.q);
        ensure_capacity!(set_i.len(), key.q);
        let timer = start_timer!(|| "batch non-membership witness");
        let v_x = vanishing_polynomial(set_x);
        let v_i = vanishing_polynomial(set_i);
        let (a, b) = normalized_bezout(&v_x, &v_i)?;
        let proof = AggNonMemProof {
            alpha_of_s: key.commit_poly_g2(&a)?.into_affine(),
            beta_of_s: key.commit_poly_g1(&b)?.into_affine(),
        };
        end_timer!(timer);
        Ok(proof)
    }
}
