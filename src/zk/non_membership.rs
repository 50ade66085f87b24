//! Zero-knowledge non-membership of a committed subset.
//!
//! Public: the digest `D = g^{v_X(s)}` and `C_I = h^{v_I(s)} ped_h^R`. The prover knows `R` and
//! an aggregate Bezout pair `(A, B) = (h^{alpha(s)}, g^{beta(s)})` with
//! `alpha v_X + beta v_I = 1`, i.e.
//!
//! `e(D, A) e(B, C_I) e(B, ped_h)^{-R} = e(g, h)`.
//!
//! Both halves of the pair are blinded, `A_1 = A b_0^{tau_0}` with `A_0 = h^{tau_0} b_0^{tau_1}`,
//! and `B_1 = B a_0^{tau_2}` with `B_0 = g^{tau_2} a_0^{tau_3}`. With `delta_3 = R tau_2` and
//! `delta_4 = R tau_3` the statement is linear in the witnesses:
//! - `A_0 = h^{tau_0} b_0^{tau_1}`
//! - `B_0 = g^{tau_2} a_0^{tau_3}`
//! - `1 = B_0^R g^{-delta_3} a_0^{-delta_4}`
//! - `e(D, A_1) e(B_1, C_I) / e(g, h) =
//!    e(D, b_0)^{tau_0} e(a_0, C_I)^{tau_2} e(a_0, ped_h)^{-delta_3} e(B_1, ped_h)^R`
use crate::accumulator::AggNonMemProof;
use crate::error::{invariant_violation, SResult};
use crate::pairing::product;
use crate::pedersen::PedersenCommitment;
use crate::rng::FeedableRNG;
use crate::setup::CommitmentKey;
use crate::zk::{challenge_rng, Transcript, ZkProof};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::UniformRand;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;
use ark_std::rand::RngCore;

/// Proof that the set behind `C_I` is disjoint from the set behind a digest.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ZkNonMemProof<E: Pairing> {
    /// `h^{tau_0} b_0^{tau_1}`
    pub a_bar0: E::G2Affine,
    /// `h^{alpha(s)} b_0^{tau_0}`
    pub a_bar1: E::G2Affine,
    /// `g^{tau_2} a_0^{tau_3}`
    pub b_bar0: E::G1Affine,
    /// `g^{beta(s)} a_0^{tau_2}`
    pub b_bar1: E::G1Affine,
    /// commitment for `A_0`
    pub r_1: E::G2Affine,
    /// commitment for `B_0`
    pub r_2_0: E::G1Affine,
    /// commitment for the product relation
    pub r_2_1: E::G1Affine,
    /// commitment for the pairing relation
    pub r_3: PairingOutput<E>,
    /// response for `R`
    pub s_r: E::ScalarField,
    /// response for `tau_0`
    pub s_tau0: E::ScalarField,
    /// response for `tau_1`
    pub s_tau1: E::ScalarField,
    /// response for `tau_2`
    pub s_tau2: E::ScalarField,
    /// response for `tau_3`
    pub s_tau3: E::ScalarField,
    /// response for `delta_3`
    pub s_delta3: E::ScalarField,
    /// response for `delta_4`
    pub s_delta4: E::ScalarField,
}

impl<E: Pairing> ZkProof for ZkNonMemProof<E> {}

/// Zero-knowledge subset non-membership
pub struct ZkNonMem<E: Pairing> {
    #[doc(hidden)]
    _marker: PhantomData<E>,
}

fn challenge<E: Pairing>(
    transcript: &Transcript,
    proof: &ZkNonMemProof<E>,
) -> SResult<E::ScalarField> {
    let mut rng = challenge_rng(b"zk non-membership", transcript);
    rng.feed(&proof.a_bar0)?;
    rng.feed(&proof.a_bar1)?;
    rng.feed(&proof.b_bar0)?;
    rng.feed(&proof.b_bar1)?;
    rng.feed(&proof.r_1)?;
    rng.feed(&proof.r_2_0)?;
    rng.feed(&proof.r_2_1)?;
    rng.feed(&proof.r_3)?;
    Ok(rng.challenge())
}

impl<E: Pairing> ZkNonMem<E> {
    /// Prove that the set committed in `c_i` shares no element with the set behind `digest`,
    /// given their aggregate non-membership pair.
    pub fn prove<R: RngCore>(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        c_i: &PedersenCommitment<E>,
        pair: &AggNonMemProof<E>,
        transcript: &Transcript,
        rng: &mut R,
    ) -> SResult<ZkNonMemProof<E>> {
        let timer = start_timer!(|| "zk non-membership");
        let (g, h) = (key.g, key.h);
        let (a0, b0) = (key.a[0], key.b[0]);
        let ped = key.ped_vk[0].into_group();
        let big_r = c_i.r;

        let mut draw = || E::ScalarField::rand(&mut *rng);
        let (tau0, tau1, tau2, tau3) = (draw(), draw(), draw(), draw());
        let delta3 = big_r * tau2;
        let delta4 = big_r * tau3;

        let a_bar0 = h * tau0 + b0 * tau1;
        let a_bar1 = b0 * tau0 + pair.alpha_of_s;
        let b_bar0 = g * tau2 + a0 * tau3;
        let b_bar1 = a0 * tau2 + pair.beta_of_s;

        let (r_r, r_tau0, r_tau1, r_tau2, r_tau3) = (draw(), draw(), draw(), draw(), draw());
        let (r_delta3, r_delta4) = (draw(), draw());

        let r_1 = h * r_tau0 + b0 * r_tau1;
        let r_2_0 = g * r_tau2 + a0 * r_tau3;
        let r_2_1 = b_bar0 * r_r - g * r_delta3 - a0 * r_delta4;
        let r_3 = product::<E>(
            &[
                *digest * r_tau0,
                a0 * r_tau2,
                -(a0 * r_delta3),
                b_bar1 * r_r,
            ],
            &[b0.into_group(), c_i.com.into_group(), ped, ped],
        )
        .ok_or_else(|| invariant_violation("final exponentiation failed"))?;

        let g2 = E::G2::normalize_batch(&[a_bar0, a_bar1, r_1]);
        let g1 = E::G1::normalize_batch(&[b_bar0, b_bar1, r_2_0, r_2_1]);
        let mut proof = ZkNonMemProof {
            a_bar0: g2[0],
            a_bar1: g2[1],
            b_bar0: g1[0],
            b_bar1: g1[1],
            r_1: g2[2],
            r_2_0: g1[2],
            r_2_1: g1[3],
            r_3,
            s_r: r_r,
            s_tau0: r_tau0,
            s_tau1: r_tau1,
            s_tau2: r_tau2,
            s_tau3: r_tau3,
            s_delta3: r_delta3,
            s_delta4: r_delta4,
        };
        let c = challenge(transcript, &proof)?;
        proof.s_r += c * big_r;
        proof.s_tau0 += c * tau0;
        proof.s_tau1 += c * tau1;
        proof.s_tau2 += c * tau2;
        proof.s_tau3 += c * tau3;
        proof.s_delta3 += c * delta3;
        proof.s_delta4 += c * delta4;
        end_timer!(timer);
        Ok(proof)
    }

    /// Check `proof` against the digest of `X` and the commitment `c_i`.
    pub fn verify(
        key: &CommitmentKey<E>,
        proof: &ZkNonMemProof<E>,
        digest: &E::G1Affine,
        c_i: &E::G2Affine,
        transcript: &Transcript,
    ) -> bool {
        let c = match challenge(transcript, proof) {
            Ok(c) => c,
            Err(_) => return false,
        };
        let (g, h) = (key.g, key.h);
        let (a0, b0) = (key.a[0], key.b[0]);
        let ped = key.ped_vk[0].into_group();
        let c_i = c_i.into_group();

        let first = h * proof.s_tau0 + b0 * proof.s_tau1 - proof.a_bar0 * c;
        if proof.r_1.into_group() != first {
            return false;
        }
        let second = g * proof.s_tau2 + a0 * proof.s_tau3 - proof.b_bar0 * c;
        if proof.r_2_0.into_group() != second {
            return false;
        }
        let third = proof.b_bar0 * proof.s_r - g * proof.s_delta3 - a0 * proof.s_delta4;
        if proof.r_2_1.into_group() != third {
            return false;
        }
        product::<E>(
            &[
                *digest * proof.s_tau0,
                a0 * proof.s_tau2,
                -(a0 * proof.s_delta3),
                proof.b_bar1 * proof.s_r,
                -(*digest * c),
                -(proof.b_bar1 * c),
                g * c,
            ],
            &[
                b0.into_group(),
                c_i,
                ped,
                ped,
                proof.a_bar1.into_group(),
                c_i,
                h.into_group(),
            ],
        )
        .map_or(false, |p| p == proof.r_3)
    }
}
