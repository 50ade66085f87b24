//! Consistency checks for a commitment key.
//!
//! A key read from disk is only trusted after [`CommitmentKey::validate`] accepted it. Each
//! geometric relation `X[i] = X[i-1]^s` is checked for all `i` at once by folding the
//! sequence with random weights `r_i` and testing a single pairing equation such as
//! `e(sum r_i pk[i-1], vk[1]) = e(sum r_i pk[i], h)`.
use crate::error::{parameter_corruption, SResult};
use crate::pairing::{msm, pairings_equal};
use crate::setup::{CommitmentKey, Trapdoor, MAX_ELL, SPARE};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{UniformRand, Zero};
use ark_std::rand::RngCore;
use ark_std::vec::Vec;

fn check(condition: bool, relation: &str) -> SResult<()> {
    if condition {
        Ok(())
    } else {
        Err(parameter_corruption(relation))
    }
}

impl<E: Pairing> CommitmentKey<E> {
    /// Check the shape of the key and every algebraic relation between its elements.
    ///
    /// Returns `ParameterCorruption` naming the first relation that fails.
    pub fn validate<R: RngCore>(&self, rng: &mut R) -> SResult<()> {
        let timer = start_timer!(|| format!("validate commitment key, q = {}", self.q));
        self.validate_shape()?;

        let q = self.q;
        let weights: Vec<E::ScalarField> = (0..q).map(|_| E::ScalarField::rand(rng)).collect();
        let g = self.g.into_group();
        let h = self.h.into_group();
        let vk1 = self.vk[1].into_group();
        let pk1 = self.pk[1].into_group();
        let g_alpha = self.g_alpha.into_group();

        check(pairings_equal::<E>(pk1, h, g, vk1), "pk[1] and vk[1] disagree")?;

        let pk_low: E::G1 = msm(&self.pk[..q], &weights)?;
        let pk_high: E::G1 = msm(&self.pk[1..], &weights)?;
        check(pairings_equal::<E>(pk_low, vk1, pk_high, h), "pk[i] = pk[i-1]^s")?;

        let vk_low: E::G2 = msm(&self.vk[..q], &weights)?;
        let vk_high: E::G2 = msm(&self.vk[1..], &weights)?;
        check(pairings_equal::<E>(pk1, vk_low, g, vk_high), "vk[i] = vk[i-1]^s")?;

        let weights_full: Vec<E::ScalarField> =
            (0..=q).map(|_| E::ScalarField::rand(rng)).collect();
        let vk_all: E::G2 = msm(&self.vk, &weights_full)?;
        let vk_alpha_all: E::G2 = msm(&self.vk_alpha, &weights_full)?;
        check(
            pairings_equal::<E>(g_alpha, vk_all, g, vk_alpha_all),
            "vk_alpha[i] = vk[i]^alpha",
        )?;

        let ped_low: E::G2 = msm(&self.ped_vk[..q], &weights)?;
        let ped_high: E::G2 = msm(&self.ped_vk[1..], &weights)?;
        check(pairings_equal::<E>(pk1, ped_low, g, ped_high), "ped_vk[i] = ped_vk[i-1]^s")?;

        let ped_all: E::G2 = msm(&self.ped_vk, &weights_full)?;
        let ped_alpha_all: E::G2 = msm(&self.ped_vk_alpha, &weights_full)?;
        check(
            pairings_equal::<E>(g_alpha, ped_all, g, ped_alpha_all),
            "ped_vk_alpha[i] = ped_vk[i]^alpha",
        )?;

        check(self.e_gh == E::pairing(self.g, self.h), "e_gh = e(g, h)")?;
        check((self.e_gh + self.e_gh_inv).is_zero(), "e_gh_inv = e_gh^-1")?;
        end_timer!(timer);
        Ok(())
    }

    fn validate_shape(&self) -> SResult<()> {
        check(self.ell <= MAX_ELL, "ell out of range")?;
        check(self.q == 1usize << self.ell, "q = 2^ell")?;
        let n = self.q + 1;
        check(self.pk.len() == n, "pk length")?;
        check(self.vk.len() == n, "vk length")?;
        check(self.vk_alpha.len() == n, "vk_alpha length")?;
        check(self.ped_vk.len() == n, "ped_vk length")?;
        check(self.ped_vk_alpha.len() == n, "ped_vk_alpha length")?;
        check(self.a.len() == SPARE && self.b.len() == SPARE, "auxiliary generators")?;

        check(!self.g.is_zero() && !self.h.is_zero(), "generators")?;
        check(!self.ped_h.is_zero() && !self.g_alpha.is_zero(), "generators")?;
        check(self.pk[0] == self.g, "pk[0] = g")?;
        check(self.vk[0] == self.h, "vk[0] = h")?;
        check(self.ped_vk[0] == self.ped_h, "ped_vk[0] = ped_h")?;
        check(self.g_neg == (-self.g.into_group()).into_affine(), "g_neg = -g")?;
        check(self.h_neg == (-self.h.into_group()).into_affine(), "h_neg = -h")?;
        check(
            self.pk.iter().all(|p| !p.is_zero()) && self.vk.iter().all(|p| !p.is_zero()),
            "identity in pk or vk",
        )?;
        check(
            self.vk_alpha.iter().all(|p| !p.is_zero())
                && self.ped_vk.iter().all(|p| !p.is_zero())
                && self.ped_vk_alpha.iter().all(|p| !p.is_zero()),
            "identity in twin sequences",
        )?;
        check(
            self.a.iter().all(|p| !p.is_zero()) && self.b.iter().all(|p| !p.is_zero()),
            "identity in auxiliary generators",
        )
    }
}

impl<E: Pairing> Trapdoor<E> {
    /// Confirm this trapdoor is the one `key` was built from.
    pub fn check_against(&self, key: &CommitmentKey<E>) -> SResult<()> {
        check(key.pk.len() > 1, "pk length")?;
        check(key.pk[1] == (key.g * self.s).into_affine(), "pk[1] = g^s")?;
        check(key.g_alpha == (key.g * self.alpha).into_affine(), "g_alpha = g^alpha")
    }
}
