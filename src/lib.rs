//! Bilinear-pairing accumulator with aggregation, proofs of exponentiation and
//! zero-knowledge membership arguments.
//!
//! A set `S` of scalars is committed as `g^{v(s)}` where `v(x) = prod (x - e)` and `s` is the
//! secret point hidden in the [`CommitmentKey`](setup::CommitmentKey). On top of the digest the
//! crate provides
//! - per-element membership and non-membership witnesses ([`accumulator`]),
//! - O(1)-size aggregation of those witnesses and the proof of exponentiation that lets a
//!   verifier skip rebuilding `v_I` in the exponent ([`accumulator::aggregate`],
//!   [`accumulator::poe`]),
//! - a hiding Pedersen commitment over `G2` ([`pedersen`]),
//! - Fiat-Shamir sigma protocols proving degree, membership and non-membership facts about a
//!   hidden subset ([`zk`]).
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_import_braces, trivial_casts, bare_trait_objects)]
#![deny(unused_comparisons, unused_must_use, non_shorthand_field_patterns)]
#![warn(missing_docs)]

#[macro_use]
extern crate ark_std;

#[macro_use]
mod macros;

pub mod accumulator;
pub mod error;
pub mod pairing;
pub mod pedersen;
pub mod poly;
pub mod rng;
pub mod setup;
pub mod zk;

#[cfg(test)]
pub(crate) mod test_utils;

pub use accumulator::Accumulator;
pub use error::*;
pub use pedersen::{Pedersen, PedersenCommitment};
pub use setup::{CommitmentKey, Trapdoor};
