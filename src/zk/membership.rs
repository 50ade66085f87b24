//! Zero-knowledge membership of a committed subset.
//!
//! Public: the digest `A = g^{v_X(s)}` of a set `X` and a Pedersen commitment
//! `C_I = h^{v_I(s)} ped_h^R` to a subset `I` of `X`. The prover knows `R` and the aggregate
//! witness `Pi_I = g^{v_X(s) / v_I(s)}`, which satisfy
//!
//! `e(Pi_I, C_I) = e(A, h) e(Pi_I, ped_h)^R`.
//!
//! `Pi_I` is blinded as `Pi_2 = Pi_I a_0^{tau_1}`, and `Pi_1 = g^{tau_1} a_0^{tau_2}` commits to
//! the blinding. With `delta_j = R tau_j` the statement becomes three relations that are linear
//! in the witnesses `(R, tau_1, tau_2, delta_1, delta_2)`:
//! - `Pi_1 = g^{tau_1} a_0^{tau_2}`
//! - `1 = Pi_1^R g^{-delta_1} a_0^{-delta_2}`
//! - `e(Pi_2, C_I) / e(A, h) = e(a_0, C_I)^{tau_1} e(a_0, ped_h)^{-delta_1} e(Pi_2, ped_h)^R`
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

/// Proof that the set behind `C_I` is contained in the set behind a digest.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ZkMemProof<E: Pairing> {
    /// `g^{tau_1} a_0^{tau_2}`
    pub pi_1: E::G1Affine,
    /// `Pi_I a_0^{tau_1}`
    pub pi_2: E::G1Affine,
    /// commitment for the first relation
    pub r_1: E::G1Affine,
    /// commitment for the second relation
    pub r_2: E::G1Affine,
    /// commitment for the pairing relation
    pub r_3: PairingOutput<E>,
    /// response for `R`
    pub s_r: E::ScalarField,
    /// response for `tau_1`
    pub s_tau1: E::ScalarField,
    /// response for `tau_2`
    pub s_tau2: E::ScalarField,
    /// response for `delta_1`
    pub s_delta1: E::ScalarField,
    /// response for `delta_2`
    pub s_delta2: E::ScalarField,
}

impl<E: Pairing> ZkProof for ZkMemProof<E> {}

/// Zero-knowledge subset membership
pub struct ZkMem<E: Pairing> {
    #[doc(hidden)]
    _marker: PhantomData<E>,
}

fn challenge<E: Pairing>(
    transcript: &Transcript,
    pi_1: &E::G1Affine,
    pi_2: &E::G1Affine,
    r_1: &E::G1Affine,
    r_2: &E::G1Affine,
    r_3: &PairingOutput<E>,
) -> SResult<E::ScalarField> {
    let mut rng = challenge_rng(b"zk membership", transcript);
    rng.feed(pi_1)?;
    rng.feed(pi_2)?;
    rng.feed(r_1)?;
    rng.feed(r_2)?;
    rng.feed(r_3)?;
    Ok(rng.challenge())
}

impl<E: Pairing> ZkMem<E> {
    /// Prove that the set committed in `c_i` is a subset of the set whose aggregate membership
    /// witness is `pi_i`.
    pub fn prove<R: RngCore>(
        key: &CommitmentKey<E>,
        c_i: &PedersenCommitment<E>,
        pi_i: &E::G1Affine,
        transcript: &Transcript,
        rng: &mut R,
    ) -> SResult<ZkMemProof<E>> {
        let timer = start_timer!(|| "zk membership");
        let g = key.g;
        let a0 = key.a[0];
        let ped = key.ped_vk[0].into_group();
        let big_r = c_i.r;

        let tau1 = E::ScalarField::rand(rng);
        let tau2 = E::ScalarField::rand(rng);
        let delta1 = big_r * tau1;
        let delta2 = big_r * tau2;

        let pi_1 = g * tau1 + a0 * tau2;
        let pi_2 = a0 * tau1 + *pi_i;

        let r_r = E::ScalarField::rand(rng);
        let r_tau1 = E::ScalarField::rand(rng);
        let r_tau2 = E::ScalarField::rand(rng);
        let r_delta1 = E::ScalarField::rand(rng);
        let r_delta2 = E::ScalarField::rand(rng);

        let r_1 = g * r_tau1 + a0 * r_tau2;
        let r_2 = pi_1 * r_r - g * r_delta1 - a0 * r_delta2;
        let r_3 = product::<E>(
            &[a0 * r_tau1, -(a0 * r_delta1), pi_2 * r_r],
            &[c_i.com.into_group(), ped, ped],
        )
        .ok_or_else(|| invariant_violation("final exponentiation failed"))?;

        let points = E::G1::normalize_batch(&[pi_1, pi_2, r_1, r_2]);
        let (pi_1, pi_2, r_1, r_2) = (points[0], points[1], points[2], points[3]);
        let c = challenge::<E>(transcript, &pi_1, &pi_2, &r_1, &r_2, &r_3)?;
        end_timer!(timer);
        Ok(ZkMemProof {
            pi_1,
            pi_2,
            r_1,
            r_2,
            r_3,
            s_r: c * big_r + r_r,
            s_tau1: c * tau1 + r_tau1,
            s_tau2: c * tau2 + r_tau2,
            s_delta1: c * delta1 + r_delta1,
            s_delta2: c * delta2 + r_delta2,
        })
    }

    /// Check `proof` against the commitment `c_i` and the digest of the superset.
    pub fn verify(
        key: &CommitmentKey<E>,
        proof: &ZkMemProof<E>,
        c_i: &E::G2Affine,
        digest: &E::G1Affine,
        transcript: &Transcript,
    ) -> bool {
        let c = match challenge::<E>(
            transcript,
            &proof.pi_1,
            &proof.pi_2,
            &proof.r_1,
            &proof.r_2,
            &proof.r_3,
        ) {
            Ok(c) => c,
            Err(_) => return false,
        };
        let g = key.g;
        let a0 = key.a[0];
        let ped = key.ped_vk[0].into_group();
        let c_i = c_i.into_group();

        let first = g * proof.s_tau1 + a0 * proof.s_tau2 - proof.pi_1 * c;
        if proof.r_1.into_group() != first {
            return false;
        }
        let second = proof.pi_1 * proof.s_r - g * proof.s_delta1 - a0 * proof.s_delta2;
        if proof.r_2.into_group() != second {
            return false;
        }
        product::<E>(
            &[
                a0 * proof.s_tau1,
                -(a0 * proof.s_delta1),
                proof.pi_2 * proof.s_r,
                -(proof.pi_2 * c),
                *digest * c,
            ],
            &[c_i, ped, ped, c_i, key.h.into_group()],
        )
        .map_or(false, |p| p == proof.r_3)
    }
}
