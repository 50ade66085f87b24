//! Trapdoor fast path.
//!
//! A party holding `s` computes digests and witnesses with field arithmetic on `s` and a single
//! fixed-base exponentiation per output, skipping the multi-scalar multiplications. The outputs equal
//! the honest ones in [`witness`](crate::accumulator::witness).
use crate::accumulator::{AggNonMemProof, NonMembershipWitness};
use crate::error::{invariant_violation, SResult};
use crate::poly::{cofactor_products, normalized_bezout, vanishing_polynomial};
use crate::setup::keygen::fixed_base_powers;
use crate::setup::{CommitmentKey, Trapdoor};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{batch_inversion, Field, Zero};
use ark_poly::Polynomial;
use ark_std::vec::Vec;

impl<E: Pairing> Trapdoor<E> {
    /// `prod (s - e)`
    fn eval_at_s(&self, elements: &[E::ScalarField]) -> E::ScalarField {
        elements.iter().map(|e| self.s - e).product()
    }

    /// Same digest as [`Accumulator::commit`](crate::Accumulator::commit).
    pub fn commit_fake_g1(
        &self,
        key: &CommitmentKey<E>,
        elements: &[E::ScalarField],
    ) -> SResult<E::G1Affine> {
        ensure_capacity!(elements.len(), key.q);
        Ok((key.g * self.eval_at_s(elements)).into_affine())
    }

    /// Same digest as [`Accumulator::commit_g2`](crate::Accumulator::commit_g2).
    pub fn commit_fake_g2(
        &self,
        key: &CommitmentKey<E>,
        elements: &[E::ScalarField],
    ) -> SResult<E::G2Affine> {
        ensure_capacity!(elements.len(), key.q);
        Ok((key.h * self.eval_at_s(elements)).into_affine())
    }

    /// Same witnesses as [`Accumulator::mem_prove`](crate::Accumulator::mem_prove).
    pub fn prove_mem_fake(
        &self,
        key: &CommitmentKey<E>,
        set_x: &[E::ScalarField],
        set_i: &[E::ScalarField],
    ) -> SResult<Vec<E::G1Affine>> {
        ensure_capacity!(set_x.len() + set_i.len(), key.q);
        let timer = start_timer!(|| format!("trapdoor membership for {} elements", set_i.len()));
        let x_at_s = self.eval_at_s(set_x);
        let monomials: Vec<_> = set_i.iter().map(|e| self.s - e).collect();
        let exponents = cofactor_products(x_at_s, &monomials);
        let witnesses = fixed_base_powers(key.g.into_group(), &exponents);
        end_timer!(timer);
        Ok(witnesses)
    }

    /// Same witnesses as [`Accumulator::non_mem_prove`](crate::Accumulator::non_mem_prove):
    /// `alpha = 1 / v_X(i)` and `beta = g^{(1 - alpha v_X(s)) / (s - i)}`.
    pub fn prove_non_mem_fake(
        &self,
        key: &CommitmentKey<E>,
        set_x: &[E::ScalarField],
        set_i: &[E::ScalarField],
    ) -> SResult<Vec<NonMembershipWitness<E>>> {
        ensure_capacity!(set_x.len(), key.q);
        let timer = start_timer!(|| format!("trapdoor non-membership for {} elements", set_i.len()));
        let x_at_s = self.eval_at_s(set_x);
        let mut alphas: Vec<E::ScalarField> = set_i
            .iter()
            .map(|i| set_x.iter().map(|x| *i - x).product())
            .collect();
        if alphas.iter().any(|a: &E::ScalarField| a.is_zero()) {
            return Err(invariant_violation("the sets are not disjoint"));
        }
        batch_inversion(&mut alphas);

        let betas = alphas
            .iter()
            .zip(set_i.iter())
            .map(|(alpha, i)| {
                let denominator = (self.s - i)
                    .inverse()
                    .ok_or_else(|| invariant_violation("element equals the trapdoor"))?;
                Ok((E::ScalarField::from(1u64) - *alpha * x_at_s) * denominator)
            })
            .collect::<SResult<Vec<_>>>()?;
        let betas = fixed_base_powers(key.g.into_group(), &betas);
        end_timer!(timer);
        Ok(alphas
            .into_iter()
            .zip(betas)
            .map(|(alpha, beta)| NonMembershipWitness { alpha, beta })
            .collect())
    }

    /// Same pair as [`Accumulator::batch_non_mem_prove`](crate::Accumulator::batch_non_mem_prove).
    ///
    /// The Bezout coefficients still come from the polynomial gcd of `v_X` and `v_I`; only the
    /// two commitments are replaced by evaluations at `s`. Overlapping sets fail with
    /// `InvariantViolation`.
    pub fn prove_batch_non_mem_fake(
        &self,
        key: &CommitmentKey<E>,
        set_x: &[E::ScalarField],
        set_i: &[E::ScalarField],
    ) -> SResult<AggNonMemProof<E>> {
        ensure_capacity!(set_x.len(), key.q);
        ensure_capacity!(set_i.len(), key.q);
        let timer = start_timer!(|| "trapdoor batch non-membership");
        if set_i
            .iter()
            .any(|i| set_x.iter().map(|x| *i - x).product::<E::ScalarField>().is_zero())
        {
            return Err(invariant_violation("the sets are not disjoint"));
        }
        let (alpha, beta) =
            normalized_bezout(&vanishing_polynomial(set_x), &vanishing_polynomial(set_i))?;
        let proof = AggNonMemProof {
            alpha_of_s: (key.h * alpha.evaluate(&self.s)).into_affine(),
            beta_of_s: (key.g * beta.evaluate(&self.s)).into_affine(),
        };
        end_timer!(timer);
        Ok(proof)
    }
}
