//! Fiat-Shamir Random Generator
//!
//! Every non-interactive challenge in this crate (the PoE evaluation point and the sigma
//! protocol challenges) is drawn from a [`FeedableRNG`] that has absorbed the public
//! transcript, so that prover and verifier derive the same scalar from the same messages.
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::rand::RngCore;
use ark_std::vec::Vec;
use blake2::{Blake2b512, Digest};

/// Random Field Element Generator where randomness `feed` adds entropy for the output.
///
/// Same sequence of `feed` and `get` call should yield same result!
pub trait FeedableRNG: RngCore {
    /// Error type
    type Error: ark_std::error::Error + From<crate::Error>;
    /// Setup should not have any parameter.
    fn setup() -> Self;

    /// Provide randomness for the generator, given the message.
    fn feed<M: CanonicalSerialize>(&mut self, msg: &M) -> Result<(), Self::Error>;

    /// Provide raw bytes (e.g. an outer transcript) without a length prefix.
    fn feed_bytes(&mut self, bytes: &[u8]);

    /// Draw a challenge scalar from the current state.
    fn challenge<F: PrimeField>(&mut self) -> F {
        F::rand(self)
    }
}

/// 512-bits digest hash pseudorandom generator
pub struct Blake2b512Rng {
    /// current digest instance
    current_digest: Blake2b512,
}

impl Blake2b512Rng {
    /// Generator already fed with `label`, used to separate the different challenge domains.
    pub fn with_label(label: &[u8]) -> Self {
        let mut rng = Self::setup();
        rng.feed_bytes(label);
        rng
    }

    fn squeeze(&mut self, dest: &mut [u8]) {
        let mut output = self.current_digest.clone().finalize();
        let output_size = <Blake2b512 as Digest>::output_size();
        let mut digest_ptr = 0;
        for byte in dest.iter_mut() {
            *byte = output[digest_ptr];
            digest_ptr += 1;
            if digest_ptr == output_size {
                self.current_digest.update(output);
                output = self.current_digest.clone().finalize();
                digest_ptr = 0;
            }
        }
        self.current_digest.update(output);
    }
}

impl FeedableRNG for Blake2b512Rng {
    type Error = crate::Error;

    fn setup() -> Self {
        Self {
            current_digest: Blake2b512::new(),
        }
    }

    fn feed<M: CanonicalSerialize>(&mut self, msg: &M) -> Result<(), Self::Error> {
        let mut buf = Vec::new();
        msg.serialize_compressed(&mut buf)?;
        self.current_digest.update(&buf);
        Ok(())
    }

    fn feed_bytes(&mut self, bytes: &[u8]) {
        self.current_digest.update(bytes);
    }
}

impl RngCore for Blake2b512Rng {
    fn next_u32(&mut self) -> u32 {
        let mut temp = [0u8; 4];
        self.fill_bytes(&mut temp);
        u32::from_le_bytes(temp)
    }

    fn next_u64(&mut self) -> u64 {
        let mut temp = [0u8; 8];
        self.fill_bytes(&mut temp);
        u64::from_le_bytes(temp)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.squeeze(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), ark_std::rand::Error> {
        self.squeeze(dest);
        Ok(())
    }
}
