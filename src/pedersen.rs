//! Pedersen vector commitment over `G2`.
//!
//! `Com = hiding^r * prod basis[i]^{coeffs[i]}`. With `basis = vk` and `hiding = ped_vk[0]` this
//! is a hiding commitment to a polynomial, used as `C_I` for the vanishing polynomial of a
//! secret subset in the zero-knowledge protocols.
use crate::error::SResult;
use crate::pairing::msm;
use crate::poly::vanishing_polynomial;
use crate::setup::CommitmentKey;
use ark_ec::pairing::Pairing;
use ark_ec::CurveGroup;
use ark_ff::UniformRand;
use ark_poly::univariate::DensePolynomial;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;
use ark_std::rand::RngCore;

/// A commitment together with its opening randomness.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PedersenCommitment<E: Pairing> {
    /// the commitment
    pub com: E::G2Affine,
    /// blinding factor
    pub r: E::ScalarField,
}

/// Pedersen commitments in `G2`.
pub struct Pedersen<E: Pairing> {
    #[doc(hidden)]
    _marker: PhantomData<E>,
}

impl<E: Pairing> Pedersen<E> {
    /// `hiding^randomness * prod basis[i]^{coeffs[i]}`.
    ///
    /// Fails with `CapacityExceeded` if there are more than `q + 1` coefficients or more
    /// coefficients than basis elements.
    pub fn commit_g2(
        key: &CommitmentKey<E>,
        coeffs: &[E::ScalarField],
        basis: &[E::G2Affine],
        randomness: E::ScalarField,
        hiding: &E::G2Affine,
    ) -> SResult<E::G2> {
        ensure_capacity!(coeffs.len(), key.q + 1);
        ensure_capacity!(coeffs.len(), basis.len());
        let body: E::G2 = msm(&basis[..coeffs.len()], coeffs)?;
        Ok(body + *hiding * randomness)
    }

    /// Commit to `poly` on the `vk` basis with blinding `r`.
    pub fn commit_poly(
        key: &CommitmentKey<E>,
        poly: &DensePolynomial<E::ScalarField>,
        r: E::ScalarField,
    ) -> SResult<PedersenCommitment<E>> {
        let com = Self::commit_g2(key, &poly.coeffs, &key.vk, r, &key.ped_vk[0])?;
        Ok(PedersenCommitment {
            com: com.into_affine(),
            r,
        })
    }

    /// Hiding commitment `C_I` to the vanishing polynomial of `elements`, with fresh blinding.
    ///
    /// Returns the commitment and the polynomial.
    pub fn commit_set<R: RngCore>(
        key: &CommitmentKey<E>,
        elements: &[E::ScalarField],
        rng: &mut R,
    ) -> SResult<(PedersenCommitment<E>, DensePolynomial<E::ScalarField>)> {
        ensure_capacity!(elements.len(), key.q);
        let poly = vanishing_polynomial(elements);
        let commitment = Self::commit_poly(key, &poly, E::ScalarField::rand(rng))?;
        Ok((commitment, poly))
    }

    /// Check that `commitment` opens to `poly`.
    pub fn verify_opening(
        key: &CommitmentKey<E>,
        commitment: &PedersenCommitment<E>,
        poly: &DensePolynomial<E::ScalarField>,
    ) -> bool {
        Self::commit_poly(key, poly, commitment.r).map_or(false, |c| c.com == commitment.com)
    }
}
