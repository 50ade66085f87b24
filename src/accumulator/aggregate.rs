//! Aggregation of per-element witnesses.
//!
//! For a set `I` with vanishing polynomial `v_I`, partial fractions give
//! `1 / v_I(x) = sum_i c_i / (x - i)` with `c_i = 1 / v_I'(i)`. Weighting each membership
//! witness `g^{v(s) / (s - i)}` by `c_i` therefore yields `g^{v(s) / v_I(s)}`, one group element
//! for the whole set. The weights come from a single multi-point evaluation of `v_I'` on the
//! subproduct tree of `I`.
use crate::accumulator::poe::{Poe, PoeProofG1, PoeProofG2};
use crate::accumulator::{Accumulator, AggNonMemProof, NonMembershipWitness};
use crate::error::{invalid_args, invariant_violation, SResult};
use crate::pairing::{msm, product_equals, product_is_identity};
use crate::poly::{differentiate, scale, vanishing_polynomial, SubproductTree};
use crate::setup::CommitmentKey;
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{batch_inversion, Zero};
use ark_poly::univariate::DensePolynomial;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;

/// Aggregate membership proof together with a PoE for `digest = agg^{v_I(s)}`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AggMemPoeProof<E: Pairing> {
    /// `g^{v(s) / v_I(s)}`
    pub agg: E::G1Affine,
    /// proof of exponentiation
    pub poe: PoeProofG1<E>,
}

/// Aggregate non-membership proof together with `w = h^{v_I(s)}` and a PoE for it.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AggNonMemPoeProof<E: Pairing> {
    /// the Bezout pair
    pub agg: AggNonMemProof<E>,
    /// `h^{v_I(s)}`
    pub w: E::G2Affine,
    /// proof of exponentiation for `w`
    pub poe: PoeProofG2<E>,
}

/// Subproduct tree of `elements` and the weights `1 / v_I'(i)`.
fn partial_fraction_weights<F: ark_ff::FftField>(
    elements: &[F],
) -> SResult<(SubproductTree<F>, Vec<F>)> {
    if elements.is_empty() {
        return Err(invalid_args("nothing to aggregate"));
    }
    let tree = SubproductTree::new(elements)?;
    let derivative = differentiate(tree.root());
    let mut weights = tree.multi_evaluate(&derivative)?;
    if weights.iter().any(|w| w.is_zero()) {
        return Err(invariant_violation("repeated element in the aggregated set"));
    }
    batch_inversion(&mut weights);
    Ok((tree, weights))
}

impl<E: Pairing> Accumulator<E> {
    /// Fold the membership witnesses of `set_i` into one element.
    ///
    /// Returns the aggregate and `v_I`. Elements of `set_i` must be distinct.
    pub fn agg_mem_prove(
        key: &CommitmentKey<E>,
        set_i: &[E::ScalarField],
        proofs: &[E::G1Affine],
    ) -> SResult<(E::G1Affine, DensePolynomial<E::ScalarField>)> {
        if set_i.len() != proofs.len() {
            return Err(invalid_args("one witness per element is required"));
        }
        ensure_capacity!(set_i.len(), key.q);
        let timer = start_timer!(|| format!("aggregate {} membership witnesses", set_i.len()));
        let (tree, weights) = partial_fraction_weights(set_i)?;
        let agg: E::G1 = msm(proofs, &weights)?;
        end_timer!(timer);
        Ok((agg.into_affine(), tree.into_root()))
    }

    /// Check `e(digest, h) = e(agg, h^{v_I(s)})`.
    pub fn agg_mem_verify(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        set_i: &[E::ScalarField],
        agg: &E::G1Affine,
    ) -> bool {
        if set_i.len() > key.q {
            return false;
        }
        let v_i = vanishing_polynomial(set_i);
        match key.commit_poly_g2(&v_i) {
            Ok(v_i_s) => product_is_identity::<E>(
                &[digest.into_group(), agg.into_group()],
                &[key.h_neg.into_group(), v_i_s],
            ),
            Err(_) => false,
        }
    }

    /// Fold the non-membership witnesses of `set_i` into one Bezout pair for `v_X` and `v_I`.
    pub fn agg_non_mem_prove(
        key: &CommitmentKey<E>,
        set_i: &[E::ScalarField],
        witnesses: &[NonMembershipWitness<E>],
    ) -> SResult<AggNonMemProof<E>> {
        if set_i.len() != witnesses.len() {
            return Err(invalid_args("one witness per element is required"));
        }
        ensure_capacity!(set_i.len(), key.q);
        let timer = start_timer!(|| format!("aggregate {} non-membership witnesses", set_i.len()));
        let (tree, weights) = partial_fraction_weights(set_i)?;

        // A(x) = sum c_i alpha_i Y_i(x)
        let mut alpha_poly = DensePolynomial::zero();
        for ((y, c), w) in tree.cofactors().iter().zip(&weights).zip(witnesses) {
            alpha_poly += &scale(y, *c * w.alpha);
        }
        let betas: Vec<_> = witnesses.iter().map(|w| w.beta).collect();
        let beta_of_s: E::G1 = msm(&betas, &weights)?;
        let proof = AggNonMemProof {
            alpha_of_s: key.commit_poly_g2(&alpha_poly)?.into_affine(),
            beta_of_s: beta_of_s.into_affine(),
        };
        end_timer!(timer);
        Ok(proof)
    }

    /// Check `e(digest, alpha_of_s) * e(beta_of_s, h^{v_I(s)}) = e(g, h)`.
    pub fn agg_non_mem_verify(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        set_i: &[E::ScalarField],
        proof: &AggNonMemProof<E>,
    ) -> bool {
        if set_i.len() > key.q {
            return false;
        }
        let v_i = vanishing_polynomial(set_i);
        match key.commit_poly_g2(&v_i) {
            Ok(v_i_s) => Self::check_bezout_pair(key, digest, proof, v_i_s),
            Err(_) => false,
        }
    }

    fn check_bezout_pair(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        proof: &AggNonMemProof<E>,
        v_i_s: E::G2,
    ) -> bool {
        product_equals::<E>(
            &[digest.into_group(), proof.beta_of_s.into_group()],
            &[proof.alpha_of_s.into_group(), v_i_s],
            &key.e_gh,
        )
    }

    /// [`agg_mem_prove`](Self::agg_mem_prove) plus a PoE that `digest = agg^{v_I(s)}`.
    ///
    /// Also returns `v_I`.
    pub fn agg_mem_prove_poe(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        set_i: &[E::ScalarField],
        proofs: &[E::G1Affine],
    ) -> SResult<(AggMemPoeProof<E>, DensePolynomial<E::ScalarField>)> {
        let (agg, v_i) = Self::agg_mem_prove(key, set_i, proofs)?;
        let poe = Poe::prove_g1(key, digest, &agg, &v_i)?;
        Ok((AggMemPoeProof { agg, poe }, v_i))
    }

    /// Check an [`AggMemPoeProof`] with a constant number of pairings.
    pub fn agg_mem_verify_poe(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        set_i: &[E::ScalarField],
        proof: &AggMemPoeProof<E>,
    ) -> bool {
        if set_i.len() > key.q {
            return false;
        }
        let v_i = vanishing_polynomial(set_i);
        Poe::verify_g1(key, &proof.poe, digest, &proof.agg, &v_i)
    }

    /// [`agg_non_mem_prove`](Self::agg_non_mem_prove) plus `w = h^{v_I(s)}` and a PoE for `w`.
    pub fn agg_non_mem_prove_poe(
        key: &CommitmentKey<E>,
        set_i: &[E::ScalarField],
        witnesses: &[NonMembershipWitness<E>],
    ) -> SResult<(AggNonMemPoeProof<E>, DensePolynomial<E::ScalarField>)> {
        let agg = Self::agg_non_mem_prove(key, set_i, witnesses)?;
        let v_i = vanishing_polynomial(set_i);
        let w = key.commit_poly_g2(&v_i)?.into_affine();
        let poe = Poe::prove_g2(key, &w, &key.h, &v_i)?;
        Ok((AggNonMemPoeProof { agg, w, poe }, v_i))
    }

    /// Check an [`AggNonMemPoeProof`] with a constant number of pairings.
    pub fn agg_non_mem_verify_poe(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        set_i: &[E::ScalarField],
        proof: &AggNonMemPoeProof<E>,
    ) -> bool {
        if set_i.len() > key.q {
            return false;
        }
        let v_i = vanishing_polynomial(set_i);
        Poe::verify_g2(key, &proof.poe, &proof.w, &key.h, &v_i)
            && Self::check_bezout_pair(key, digest, &proof.agg, proof.w.into_group())
    }
}
