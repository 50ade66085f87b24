//! Univariate polynomial helpers on top of `ark-poly`.
//!
//! `ark-poly` provides dense polynomials, multiplication and long division. The accumulator
//! additionally needs vanishing polynomials, extended GCD, derivatives and multi-point
//! evaluation, which live here and in [`subproduct_tree`].

use crate::error::{invalid_args, invariant_violation, SResult};
use ark_ff::{FftField, Field, Zero};
use ark_poly::univariate::{DenseOrSparsePolynomial, DensePolynomial};
use ark_poly::{DenseUVPolynomial, Polynomial};
use ark_std::vec::Vec;
use ark_std::{end_timer, start_timer};

pub mod subproduct_tree;

pub use subproduct_tree::SubproductTree;

/// `x - root`
pub fn linear_factor<F: Field>(root: F) -> DensePolynomial<F> {
    DensePolynomial::from_coefficients_vec(vec![-root, F::one()])
}

/// The monic polynomial `prod (x - r_i)` that vanishes exactly on `roots`.
///
/// Built bottom-up through a subproduct tree. An empty root set gives the constant `1`.
pub fn vanishing_polynomial<F: FftField>(roots: &[F]) -> DensePolynomial<F> {
    let timer = start_timer!(|| format!("vanishing polynomial of {} roots", roots.len()));
    let poly = SubproductTree::new(roots).map_or_else(
        |_| DensePolynomial::from_coefficients_vec(vec![F::one()]),
        SubproductTree::into_root,
    );
    end_timer!(timer);
    poly
}

/// Long division. Returns `(quotient, remainder)`.
pub fn divide<F: FftField>(
    dividend: &DensePolynomial<F>,
    divisor: &DensePolynomial<F>,
) -> SResult<(DensePolynomial<F>, DensePolynomial<F>)> {
    if divisor.is_zero() {
        return Err(invariant_violation("division by the zero polynomial"));
    }
    DenseOrSparsePolynomial::from(dividend)
        .divide_with_q_and_r(&DenseOrSparsePolynomial::from(divisor))
        .ok_or_else(|| invalid_args("polynomial division failed"))
}

/// Extended Euclid. Returns `(g, s, t)` with `s * a + t * b = g`, where `g` is a (not
/// necessarily monic) greatest common divisor of `a` and `b`.
pub fn xgcd<F: FftField>(
    a: &DensePolynomial<F>,
    b: &DensePolynomial<F>,
) -> SResult<(DensePolynomial<F>, DensePolynomial<F>, DensePolynomial<F>)> {
    let one = DensePolynomial::from_coefficients_vec(vec![F::one()]);
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (one.clone(), DensePolynomial::zero());
    let (mut old_t, mut t) = (DensePolynomial::zero(), one);

    while !r.is_zero() {
        let (q, rem) = divide(&old_r, &r)?;
        old_r = ark_std::mem::replace(&mut r, rem);
        let next_s = &old_s - &(&q * &s);
        old_s = ark_std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &(&q * &t);
        old_t = ark_std::mem::replace(&mut t, next_t);
    }
    Ok((old_r, old_s, old_t))
}

/// Bezout coefficients `(s / g, t / g)` of `xgcd(a, b) = (g, s, t)`, so that
/// `s a + t b = 1`. Fails with `InvariantViolation` if `a` and `b` share a root.
pub fn normalized_bezout<F: FftField>(
    a: &DensePolynomial<F>,
    b: &DensePolynomial<F>,
) -> SResult<(DensePolynomial<F>, DensePolynomial<F>)> {
    let (gcd, s, t) = xgcd(a, b)?;
    if !is_nonzero_constant(&gcd) {
        return Err(invariant_violation("the sets are not disjoint"));
    }
    let inv = constant_term(&gcd)
        .inverse()
        .ok_or_else(|| invariant_violation("degenerate gcd"))?;
    Ok((scale(&s, inv), scale(&t, inv)))
}

/// Formal derivative.
pub fn differentiate<F: Field>(poly: &DensePolynomial<F>) -> DensePolynomial<F> {
    let coeffs = poly
        .coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| *c * F::from(i as u64))
        .collect();
    DensePolynomial::from_coefficients_vec(coeffs)
}

/// Multiply every coefficient by `c`.
pub fn scale<F: Field>(poly: &DensePolynomial<F>, c: F) -> DensePolynomial<F> {
    DensePolynomial::from_coefficients_vec(poly.coeffs.iter().map(|x| *x * c).collect())
}

/// The constant term of `poly`, treating the zero polynomial as `0`.
pub fn constant_term<F: Field>(poly: &DensePolynomial<F>) -> F {
    poly.coeffs.first().copied().unwrap_or_else(F::zero)
}

/// True if `poly` is a nonzero constant.
pub(crate) fn is_nonzero_constant<F: Field>(poly: &DensePolynomial<F>) -> bool {
    !poly.is_zero() && poly.degree() == 0
}

/// For every `i`, returns `product * prod_{j != i} values[j]`.
///
/// Splits the input in halves recursively, so no inversion is needed and a zero entry is
/// handled like any other value.
pub fn cofactor_products<F: Field>(product: F, values: &[F]) -> Vec<F> {
    let mut out = Vec::with_capacity(values.len());
    fill_cofactor_products(product, values, &mut out);
    out
}

fn fill_cofactor_products<F: Field>(product: F, values: &[F], out: &mut Vec<F>) {
    match values.len() {
        0 => {}
        1 => out.push(product),
        n => {
            let (left, right) = values.split_at(n / 2);
            let left_product: F = left.iter().product();
            let right_product: F = right.iter().product();
            fill_cofactor_products(product * right_product, left, out);
            fill_cofactor_products(product * left_product, right, out);
        }
    }
}
