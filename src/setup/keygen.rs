//! Key generation
use crate::error::{invalid_args, SResult};
use crate::rng::{Blake2b512Rng, FeedableRNG};
use crate::setup::{CommitmentKey, Trapdoor, MAX_ELL, SPARE};
use ark_ec::pairing::Pairing;
use ark_ec::scalar_mul::fixed_base::FixedBase;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, PrimeField, UniformRand, Zero};
use ark_std::rand::RngCore;
use ark_std::vec::Vec;
use blake2::{Blake2b512, Digest};

/// Hash a seed to a scalar. A zero digest falls back to the scalar `12`.
pub fn seed_to_scalar<F: PrimeField>(seed: &[u8]) -> F {
    let digest = Blake2b512::digest(seed);
    let mut s = F::from_le_bytes_mod_order(&digest);
    let mut fallback = 12u64;
    while s.is_zero() {
        s = F::from(fallback);
        fallback += 1;
    }
    s
}

fn nonzero_scalar<F: PrimeField, R: RngCore>(rng: &mut R) -> F {
    loop {
        let x = F::rand(rng);
        if !x.is_zero() {
            return x;
        }
    }
}

/// `base^{scalars[i]}` for every `i`, via a fixed-base window table.
pub(crate) fn fixed_base_powers<G: CurveGroup>(base: G, scalars: &[G::ScalarField]) -> Vec<G::Affine> {
    let bits = G::ScalarField::MODULUS_BIT_SIZE as usize;
    let window = FixedBase::get_mul_window_size(scalars.len());
    let table = FixedBase::get_window_table(bits, window, base);
    let powers = FixedBase::msm::<G>(bits, window, &table, scalars);
    G::normalize_batch(&powers)
}

/// `1, x, x^2, ..., x^n`
pub(crate) fn scalar_powers<F: Field>(x: F, n: usize) -> Vec<F> {
    let mut powers = Vec::with_capacity(n + 1);
    let mut cur = F::one();
    for _ in 0..=n {
        powers.push(cur);
        cur *= x;
    }
    powers
}

impl<E: Pairing> CommitmentKey<E> {
    /// Generate random parameters
    /// * `ell`: the key supports sets of up to `2^ell` elements
    ///
    /// Returns the public key and the trapdoor used to build it. The trapdoor should be destroyed
    /// unless the caller wants the trapdoor fast path.
    pub fn keygen<R: RngCore>(ell: usize, rng: &mut R) -> SResult<(Self, Trapdoor<E>)> {
        let trapdoor = Trapdoor::new(nonzero_scalar(rng), nonzero_scalar(rng));
        let g = E::G1::rand(rng);
        let h = E::G2::rand(rng);
        let ped_h = E::G2::rand(rng);
        let a: Vec<_> = (0..SPARE).map(|_| E::G1::rand(rng)).collect();
        let b: Vec<_> = (0..SPARE).map(|_| E::G2::rand(rng)).collect();
        let key = Self::from_trapdoor(ell, &trapdoor, g, h, ped_h, &a, &b)?;
        Ok((key, trapdoor))
    }

    /// Deterministic setup from a public seed.
    ///
    /// **Insecure.** Anyone who knows the seed knows `s` and `alpha` and can forge every proof.
    /// Use it for tests, benchmarks and reproducible fixtures only; production keys come from
    /// [`keygen`](Self::keygen) run inside a ceremony that discards the trapdoor.
    ///
    /// `s = H(seed)`, `alpha = H(seed || "+ Alpha")`, `g` and `h` are the standard generators,
    /// and the Pedersen and auxiliary generators are drawn from a Blake2b stream keyed by the
    /// seed.
    pub fn insecure_setup_from_seed(ell: usize, seed: &[u8]) -> SResult<(Self, Trapdoor<E>)> {
        let mut alpha_seed = seed.to_vec();
        alpha_seed.extend_from_slice(b"+ Alpha");
        let trapdoor = Trapdoor::new(seed_to_scalar(seed), seed_to_scalar(&alpha_seed));

        let mut stream = Blake2b512Rng::with_label(b"insecure setup generators");
        stream.feed_bytes(seed);
        let ped_h = E::G2::rand(&mut stream);
        let a: Vec<_> = (0..SPARE).map(|_| E::G1::rand(&mut stream)).collect();
        let b: Vec<_> = (0..SPARE).map(|_| E::G2::rand(&mut stream)).collect();
        let g = E::G1Affine::generator().into_group();
        let h = E::G2Affine::generator().into_group();
        let key = Self::from_trapdoor(ell, &trapdoor, g, h, ped_h, &a, &b)?;
        Ok((key, trapdoor))
    }

    /// Expand the geometric sequences for a known trapdoor.
    pub fn from_trapdoor(
        ell: usize,
        trapdoor: &Trapdoor<E>,
        g: E::G1,
        h: E::G2,
        ped_h: E::G2,
        a: &[E::G1],
        b: &[E::G2],
    ) -> SResult<Self> {
        if ell > MAX_ELL {
            return Err(invalid_args("ell is too large"));
        }
        if a.len() != SPARE || b.len() != SPARE {
            return Err(invalid_args("wrong number of auxiliary generators"));
        }
        let q = 1usize << ell;
        let timer = start_timer!(|| format!("expand commitment key, q = {}", q));
        let s_powers = scalar_powers(trapdoor.s, q);
        let alpha_s_powers: Vec<_> = s_powers.iter().map(|x| *x * trapdoor.alpha).collect();

        let pk = fixed_base_powers(g, &s_powers);
        let vk = fixed_base_powers(h, &s_powers);
        let vk_alpha = fixed_base_powers(h, &alpha_s_powers);
        let ped_vk = fixed_base_powers(ped_h, &s_powers);
        let ped_vk_alpha = fixed_base_powers(ped_h, &alpha_s_powers);

        let e_gh = E::pairing(g, h);
        let key = Self {
            ell,
            q,
            g: g.into_affine(),
            h: h.into_affine(),
            g_neg: (-g).into_affine(),
            h_neg: (-h).into_affine(),
            e_gh,
            e_gh_inv: -e_gh,
            g_alpha: (g * trapdoor.alpha).into_affine(),
            ped_h: ped_h.into_affine(),
            pk,
            vk,
            vk_alpha,
            ped_vk,
            ped_vk_alpha,
            a: E::G1::normalize_batch(a),
            b: E::G2::normalize_batch(b),
        };
        end_timer!(timer);
        Ok(key)
    }
}
