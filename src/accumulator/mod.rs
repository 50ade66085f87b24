//! Bilinear accumulator over a commitment key.
//!
//! A set `S` is committed as `digest = g^{v(s)}` with `v(x) = prod_{e in S} (x - e)`.
//! - membership of `i`: `w = g^{v(s) / (s - i)}`, checked by `e(digest, h) = e(w, h^{s - i})`,
//! - non-membership of `i`: the Bezout pair `alpha * v(x) + (x - i) * beta(x) = 1` gives
//!   `(alpha, g^{beta(s)})`, checked by `e(digest^alpha, h) * e(g^{beta(s)}, h^{s - i}) = e(g, h)`.
//!
//! [`aggregate`] folds many witnesses into one, and [`poe`] lets a verifier check the
//! aggregate without lifting `v_I` into the exponent.
use ark_ec::pairing::Pairing;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;

pub mod aggregate;
pub mod poe;
pub mod trapdoor;
pub mod witness;


pub use aggregate::{AggMemPoeProof, AggNonMemPoeProof};
pub use poe::{Poe, PoeProofG1, PoeProofG2};

/// Accumulator operations. Every method borrows the commitment key.
pub struct Accumulator<E: Pairing> {
    #[doc(hidden)]
    _marker: PhantomData<E>,
}

/// Witness that an element is absent from a committed set.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct NonMembershipWitness<E: Pairing> {
    /// `1 / v(i)`
    pub alpha: E::ScalarField,
    /// `g^{beta(s)}` with `alpha * v(x) + (x - i) * beta(x) = 1`
    pub beta: E::G1Affine,
}

/// Bezout pair proving a whole set is disjoint from the committed one:
/// `e(digest, alpha_of_s) * e(beta_of_s, h^{v_I(s)}) = e(g, h)`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AggNonMemProof<E: Pairing> {
    /// `h^{a(s)}`
    pub alpha_of_s: E::G2Affine,
    /// `g^{b(s)}`
    pub beta_of_s: E::G1Affine,
}
