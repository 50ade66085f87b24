//! Degree check for a committed monic polynomial.
//!
//! `C_I` commits to `v(x) = x^D + f(x)`. The prover strips the leading term,
//! `C_f = C_I / h^{s^D}`, and recommits `c * f` shifted up by `Q - D + 1` positions, once on
//! `vk` and once on the knowledge-of-exponent twin `vk_alpha`. The shifted polynomial only fits
//! under the key's top power `s^Q` if `deg f < D`.
use crate::error::{invalid_args, SResult};
use crate::pairing::pairings_equal;
use crate::pedersen::{Pedersen, PedersenCommitment};
use crate::poly::vanishing_polynomial;
use crate::rng::FeedableRNG;
use crate::setup::CommitmentKey;
use crate::zk::{challenge_rng, Transcript, ZkProof};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{One, Zero};
use ark_poly::univariate::DensePolynomial;
use ark_poly::Polynomial;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;

/// Degree check proof.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ZkDegCheckProof<E: Pairing> {
    /// claimed degree `D`
    pub degree: u64,
    /// `C_I / h^{s^D}`
    pub c_f: E::G2Affine,
    /// `C_f^{c s^{Q-D+1}}`
    pub c: E::G2Affine,
    /// `C^alpha`
    pub c_alpha: E::G2Affine,
}

impl<E: Pairing> ZkProof for ZkDegCheckProof<E> {}

/// Degree check protocol
pub struct ZkDegCheck<E: Pairing> {
    #[doc(hidden)]
    _marker: PhantomData<E>,
}

fn challenge<E: Pairing>(
    transcript: &Transcript,
    degree: u64,
    c_f: &E::G2Affine,
) -> SResult<E::ScalarField> {
    let mut rng = challenge_rng(b"degree check", transcript);
    rng.feed_bytes(&degree.to_le_bytes());
    rng.feed(c_f)?;
    Ok(rng.challenge())
}

impl<E: Pairing> ZkDegCheck<E> {
    /// Prove that `c_i` commits to the monic polynomial `poly` of degree `D`, `1 <= D <= Q`.
    pub fn prove(
        key: &CommitmentKey<E>,
        c_i: &PedersenCommitment<E>,
        poly: &DensePolynomial<E::ScalarField>,
        transcript: &Transcript,
    ) -> SResult<ZkDegCheckProof<E>> {
        if poly.is_zero() || poly.degree() == 0 {
            return Err(invalid_args("degree check needs a non-constant polynomial"));
        }
        let d = poly.degree();
        ensure_capacity!(d, key.q);
        if !poly.coeffs[d].is_one() {
            return Err(invalid_args("degree check needs a monic polynomial"));
        }
        let timer = start_timer!(|| format!("degree check, D = {}", d));
        let c_f = (c_i.com.into_group() - key.vk[d]).into_affine();
        let c = challenge::<E>(transcript, d as u64, &c_f)?;

        let shift = key.q - d + 1;
        let mut shifted = vec![E::ScalarField::zero(); shift];
        shifted.extend(poly.coeffs[..d].iter().map(|x| *x * c));
        let rc = c_i.r * c;
        let commitment = Pedersen::commit_g2(key, &shifted, &key.vk, rc, &key.ped_vk[shift])?;
        let commitment_alpha =
            Pedersen::commit_g2(key, &shifted, &key.vk_alpha, rc, &key.ped_vk_alpha[shift])?;
        let affine = E::G2::normalize_batch(&[commitment, commitment_alpha]);
        end_timer!(timer);
        Ok(ZkDegCheckProof {
            degree: d as u64,
            c_f,
            c: affine[0],
            c_alpha: affine[1],
        })
    }

    /// Like [`prove`](Self::prove), for the vanishing polynomial of `elements`.
    pub fn prove_elements(
        key: &CommitmentKey<E>,
        c_i: &PedersenCommitment<E>,
        elements: &[E::ScalarField],
        transcript: &Transcript,
    ) -> SResult<ZkDegCheckProof<E>> {
        ensure_capacity!(elements.len(), key.q);
        let poly = vanishing_polynomial(elements);
        Self::prove(key, c_i, &poly, transcript)
    }

    /// Check `C_I = C_f h^{s^D}`, `e(g, C) = e(g^{c s^{Q-D+1}}, C_f)` and
    /// `e(g, C_alpha) = e(g^alpha, C)`. A claimed degree outside `1..=Q` is rejected.
    pub fn verify(
        key: &CommitmentKey<E>,
        proof: &ZkDegCheckProof<E>,
        c_i: &E::G2Affine,
        transcript: &Transcript,
    ) -> bool {
        let d = proof.degree;
        if d == 0 || d > key.q as u64 {
            return false;
        }
        let d = d as usize;
        let c = match challenge::<E>(transcript, proof.degree, &proof.c_f) {
            Ok(c) => c,
            Err(_) => return false,
        };
        let g = key.g.into_group();
        let c_f = proof.c_f.into_group();
        let com = proof.c.into_group();
        let shift = key.q - d + 1;
        c_i.into_group() == c_f + key.vk[d]
            && pairings_equal::<E>(g, com, key.pk[shift] * c, c_f)
            && pairings_equal::<E>(g, proof.c_alpha.into_group(), key.g_alpha.into_group(), com)
    }
}
