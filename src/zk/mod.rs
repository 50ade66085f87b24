//! Zero-knowledge arguments about a hidden subset.
//!
//! The subset `I` is only known to the verifier through a Pedersen commitment `C_I` to its
//! vanishing polynomial. Three Fiat-Shamir sigma protocols are built on top of it:
//! - [`ZkDegCheck`]: the polynomial inside `C_I` is monic of the claimed degree,
//! - [`ZkMem`]: `I` is a subset of the set behind a public digest,
//! - [`ZkNonMem`]: `I` is disjoint from the set behind a public digest.
//!
//! Each prover samples blinding scalars, commits to them, derives the challenge from the
//! caller's transcript and the commitments, and answers with `s = c * witness + blinding`.
//! Proofs can be chained: [`ZkProof::hash_proof`] folds a proof into the transcript of the
//! next one, which is how [`E2eMemProof`] and [`E2eNonMemProof`] bind a degree check to the
//! membership argument it accompanies.
use crate::error::SResult;
use crate::rng::{Blake2b512Rng, FeedableRNG};
use ark_serialize::CanonicalSerialize;
use ark_std::vec::Vec;
use blake2::{Blake2s256, Digest};

pub mod degree_check;
pub mod e2e;
pub mod membership;
pub mod non_membership;

#[cfg(test)]
mod test;

pub use degree_check::{ZkDegCheck, ZkDegCheckProof};
pub use e2e::{E2eMemProof, E2eNonMemProof};
pub use membership::{ZkMem, ZkMemProof};
pub use non_membership::{ZkNonMem, ZkNonMemProof};

/// Outer transcript a proof is bound to.
pub type Transcript = [u8; 32];

/// Common behaviour of the sigma protocol proofs.
pub trait ZkProof: CanonicalSerialize {
    /// Digest of `transcript` and every commitment and response of the proof. Used as the
    /// transcript of a follow-up proof.
    fn hash_proof(&self, transcript: &Transcript) -> SResult<Transcript> {
        let mut bytes = Vec::new();
        self.serialize_compressed(&mut bytes)?;
        let mut hasher = Blake2s256::new();
        hasher.update(transcript);
        hasher.update(&bytes);
        Ok(hasher.finalize().into())
    }

    /// Size of the compressed encoding in bytes.
    fn byte_size(&self) -> usize {
        self.compressed_size()
    }
}

/// Challenge generator for `protocol`, already fed with the outer transcript.
pub(crate) fn challenge_rng(protocol: &[u8], transcript: &Transcript) -> Blake2b512Rng {
    let mut rng = Blake2b512Rng::with_label(protocol);
    rng.feed_bytes(transcript);
    rng
}
