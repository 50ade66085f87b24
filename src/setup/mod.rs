//! Commitment key (structured reference string) for the accumulator.
//!
//! The key holds the powers of a secret point `s` lifted into both source groups, the
//! knowledge-of-exponent twins raised to a second secret `alpha`, and a Pedersen twin built on
//! an independent generator. The secrets themselves live in [`Trapdoor`], which verifiers never
//! need.
use crate::error::SResult;
use crate::pairing::msm;
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::AffineRepr;
use ark_poly::univariate::DensePolynomial;
use ark_std::vec::Vec;

pub mod keygen;
#[cfg(feature = "std")]
pub mod store;
pub mod validate;

pub use keygen::seed_to_scalar;
#[cfg(feature = "std")]
pub use store::KeyStoreConfig;

/// Number of auxiliary generators in each source group.
pub const SPARE: usize = 10;

/// Largest supported `ell`. The key has `2^ell + 1` entries per sequence.
pub const MAX_ELL: usize = 32;

/// Public parameters. Immutable once built; every protocol borrows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentKey<E: Pairing> {
    pub(crate) ell: usize,
    pub(crate) q: usize,
    pub(crate) g: E::G1Affine,
    pub(crate) h: E::G2Affine,
    pub(crate) g_neg: E::G1Affine,
    pub(crate) h_neg: E::G2Affine,
    pub(crate) e_gh: PairingOutput<E>,
    pub(crate) e_gh_inv: PairingOutput<E>,
    pub(crate) g_alpha: E::G1Affine,
    pub(crate) ped_h: E::G2Affine,
    pub(crate) pk: Vec<E::G1Affine>,
    pub(crate) vk: Vec<E::G2Affine>,
    pub(crate) vk_alpha: Vec<E::G2Affine>,
    pub(crate) ped_vk: Vec<E::G2Affine>,
    pub(crate) ped_vk_alpha: Vec<E::G2Affine>,
    pub(crate) a: Vec<E::G1Affine>,
    pub(crate) b: Vec<E::G2Affine>,
}

/// The setup secrets. Whoever holds this can forge every proof in the crate.
#[derive(Clone, PartialEq, Eq)]
pub struct Trapdoor<E: Pairing> {
    pub(crate) s: E::ScalarField,
    pub(crate) alpha: E::ScalarField,
}

impl<E: Pairing> Trapdoor<E> {
    /// Wrap known secrets, e.g. after reading them back from a key store.
    pub fn new(s: E::ScalarField, alpha: E::ScalarField) -> Self {
        Self { s, alpha }
    }

    /// the secret evaluation point
    pub fn s(&self) -> E::ScalarField {
        self.s
    }

    /// the knowledge-of-exponent secret
    pub fn alpha(&self) -> E::ScalarField {
        self.alpha
    }
}

impl<E: Pairing> CommitmentKey<E> {
    /// `log2` of the degree bound
    pub fn ell(&self) -> usize {
        self.ell
    }

    /// Degree bound `q = 2^ell`: the largest set that can be committed.
    pub fn capacity(&self) -> usize {
        self.q
    }

    /// generator of `G1`
    pub fn g(&self) -> E::G1Affine {
        self.g
    }

    /// generator of `G2`
    pub fn h(&self) -> E::G2Affine {
        self.h
    }

    /// `-g`
    pub fn g_neg(&self) -> E::G1Affine {
        self.g_neg
    }

    /// `-h`
    pub fn h_neg(&self) -> E::G2Affine {
        self.h_neg
    }

    /// `e(g, h)`
    pub fn e_gh(&self) -> PairingOutput<E> {
        self.e_gh
    }

    /// `e(g, h)^{-1}`
    pub fn e_gh_inv(&self) -> PairingOutput<E> {
        self.e_gh_inv
    }

    /// `g^alpha`
    pub fn g_alpha(&self) -> E::G1Affine {
        self.g_alpha
    }

    /// Hiding generator of the Pedersen commitment.
    pub fn ped_h(&self) -> E::G2Affine {
        self.ped_h
    }

    /// `g^{s^i}` for `i = 0..=q`
    pub fn pk(&self) -> &[E::G1Affine] {
        &self.pk
    }

    /// `h^{s^i}` for `i = 0..=q`
    pub fn vk(&self) -> &[E::G2Affine] {
        &self.vk
    }

    /// `h^{alpha s^i}`
    pub fn vk_alpha(&self) -> &[E::G2Affine] {
        &self.vk_alpha
    }

    /// `ped_h^{s^i}`
    pub fn ped_vk(&self) -> &[E::G2Affine] {
        &self.ped_vk
    }

    /// `ped_h^{alpha s^i}`
    pub fn ped_vk_alpha(&self) -> &[E::G2Affine] {
        &self.ped_vk_alpha
    }

    /// Auxiliary `G1` generators with unknown discrete logs.
    pub fn a(&self) -> &[E::G1Affine] {
        &self.a
    }

    /// Auxiliary `G2` generators with unknown discrete logs.
    pub fn b(&self) -> &[E::G2Affine] {
        &self.b
    }
}

impl<E: Pairing> CommitmentKey<E> {
    /// `g^{p(s)}`, evaluated in the exponent through `pk`.
    pub fn commit_poly_g1(&self, poly: &DensePolynomial<E::ScalarField>) -> SResult<E::G1> {
        ensure_capacity!(poly.coeffs.len(), self.q + 1);
        msm(&self.pk[..poly.coeffs.len()], &poly.coeffs)
    }

    /// `h^{p(s)}`, evaluated in the exponent through `vk`.
    pub fn commit_poly_g2(&self, poly: &DensePolynomial<E::ScalarField>) -> SResult<E::G2> {
        ensure_capacity!(poly.coeffs.len(), self.q + 1);
        msm(&self.vk[..poly.coeffs.len()], &poly.coeffs)
    }

    /// `h^{s - x}`
    pub(crate) fn vk_shift(&self, x: E::ScalarField) -> E::G2 {
        self.vk[1].into_group() - self.h * x
    }
}
