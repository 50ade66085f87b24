//! A subset argument bound to a degree check on the same `C_I`.
//!
//! The degree check runs on the transcript `hash_proof(transcript)` of the subset argument, so
//! neither half can be replayed next to a different partner.
use crate::accumulator::AggNonMemProof;
use crate::error::SResult;
use crate::pedersen::PedersenCommitment;
use crate::setup::CommitmentKey;
use crate::zk::{
    Transcript, ZkDegCheck, ZkDegCheckProof, ZkMem, ZkMemProof, ZkNonMem, ZkNonMemProof,
    ZkProof,
};
use ark_ec::pairing::Pairing;
use ark_poly::univariate::DensePolynomial;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;

/// [`ZkMemProof`] followed by a degree check.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct E2eMemProof<E: Pairing> {
    /// subset membership
    pub mem: ZkMemProof<E>,
    /// degree of the committed polynomial
    pub degree: ZkDegCheckProof<E>,
}

impl<E: Pairing> ZkProof for E2eMemProof<E> {}

impl<E: Pairing> E2eMemProof<E> {
    /// `c_i` must open to `poly`, and `pi_i` must be the aggregate membership witness of the
    /// committed subset.
    pub fn prove<R: RngCore>(
        key: &CommitmentKey<E>,
        c_i: &PedersenCommitment<E>,
        poly: &DensePolynomial<E::ScalarField>,
        pi_i: &E::G1Affine,
        transcript: &Transcript,
        rng: &mut R,
    ) -> SResult<Self> {
        let mem = ZkMem::prove(key, c_i, pi_i, transcript, rng)?;
        let next = mem.hash_proof(transcript)?;
        let degree = ZkDegCheck::prove(key, c_i, poly, &next)?;
        Ok(Self { mem, degree })
    }

    /// Verify both halves against `c_i` and the digest of the superset.
    pub fn verify(
        &self,
        key: &CommitmentKey<E>,
        c_i: &E::G2Affine,
        digest: &E::G1Affine,
        transcript: &Transcript,
    ) -> bool {
        if !ZkMem::verify(key, &self.mem, c_i, digest, transcript) {
            return false;
        }
        match self.mem.hash_proof(transcript) {
            Ok(next) => ZkDegCheck::verify(key, &self.degree, c_i, &next),
            Err(_) => false,
        }
    }
}

/// [`ZkNonMemProof`] followed by a degree check.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct E2eNonMemProof<E: Pairing> {
    /// subset non-membership
    pub non_mem: ZkNonMemProof<E>,
    /// degree of the committed polynomial
    pub degree: ZkDegCheckProof<E>,
}

impl<E: Pairing> ZkProof for E2eNonMemProof<E> {}

impl<E: Pairing> E2eNonMemProof<E> {
    /// `c_i` must open to `poly`, and `pair` must be the aggregate non-membership pair of the
    /// committed subset against the set behind `digest`.
    pub fn prove<R: RngCore>(
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        c_i: &PedersenCommitment<E>,
        poly: &DensePolynomial<E::ScalarField>,
        pair: &AggNonMemProof<E>,
        transcript: &Transcript,
        rng: &mut R,
    ) -> SResult<Self> {
        let non_mem = ZkNonMem::prove(key, digest, c_i, pair, transcript, rng)?;
        let next = non_mem.hash_proof(transcript)?;
        let degree = ZkDegCheck::prove(key, c_i, poly, &next)?;
        Ok(Self { non_mem, degree })
    }

    /// Verify both halves against the digest of `X` and `c_i`.
    pub fn verify(
        &self,
        key: &CommitmentKey<E>,
        digest: &E::G1Affine,
        c_i: &E::G2Affine,
        transcript: &Transcript,
    ) -> bool {
        if !ZkNonMem::verify(key, &self.non_mem, digest, c_i, transcript) {
            return false;
        }
        match self.non_mem.hash_proof(transcript) {
            Ok(next) => ZkDegCheck::verify(key, &self.degree, c_i, &next),
            Err(_) => false,
        }
    }
}
