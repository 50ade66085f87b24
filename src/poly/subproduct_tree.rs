//! Subproduct tree over a set of roots.
//!
//! The tree is stored as an arena of levels: `levels[0]` holds the leaves `x - r_i` in input
//! order and every following level holds the pairwise products of the level below. A node at
//! position `j` of level `l` has children `2j` and `2j + 1` of level `l - 1`; when a level
//! has odd length its last node is carried up unchanged.

use crate::error::{invalid_args, SResult};
use crate::poly::{constant_term, divide, linear_factor};
use ark_ff::FftField;
use ark_poly::univariate::DensePolynomial;
use ark_poly::DenseUVPolynomial;
use ark_std::vec::Vec;
use ark_std::{end_timer, start_timer};

/// Subproduct tree of `prod (x - r_i)`.
#[derive(Clone, Debug)]
pub struct SubproductTree<F: FftField> {
    levels: Vec<Vec<DensePolynomial<F>>>,
}

impl<F: FftField> SubproductTree<F> {
    /// Build the tree. Fails with `InvalidArgument` on an empty root set.
    pub fn new(roots: &[F]) -> SResult<Self> {
        if roots.is_empty() {
            return Err(invalid_args("subproduct tree needs at least one root"));
        }
        let timer = start_timer!(|| format!("subproduct tree of {} roots", roots.len()));
        let mut levels = Vec::new();
        let mut current: Vec<_> = roots.iter().map(|r| linear_factor(*r)).collect();
        while current.len() > 1 {
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => left * right,
                    [single] => single.clone(),
                    _ => unreachable!(),
                })
                .collect();
            levels.push(current);
            current = next;
        }
        levels.push(current);
        end_timer!(timer);
        Ok(Self { levels })
    }

    /// Number of leaves, i.e. roots.
    pub fn num_leaves(&self) -> usize {
        self.levels[0].len()
    }

    /// The vanishing polynomial of all roots.
    pub fn root(&self) -> &DensePolynomial<F> {
        &self.levels[self.levels.len() - 1][0]
    }

    /// Consume the tree, keeping only the vanishing polynomial.
    pub fn into_root(mut self) -> DensePolynomial<F> {
        let mut top = self.levels.pop().unwrap_or_default();
        top.pop().unwrap_or_else(|| DensePolynomial::from_coefficients_vec(vec![F::one()]))
    }

    fn children(&self, level: usize, position: usize) -> (usize, Option<usize>) {
        let left = 2 * position;
        let right = left + 1;
        if right < self.levels[level - 1].len() {
            (left, Some(right))
        } else {
            (left, None)
        }
    }

    /// Evaluate `poly` at every root by reducing it down the tree.
    ///
    /// Returns the evaluations in leaf order.
    pub fn multi_evaluate(&self, poly: &DensePolynomial<F>) -> SResult<Vec<F>> {
        let timer = start_timer!(|| format!("multi-evaluate at {} points", self.num_leaves()));
        let top = self.levels.len() - 1;
        let (_, root_remainder) = divide(poly, self.root())?;
        let mut remainders = vec![root_remainder];
        for level in (1..=top).rev() {
            let mut next = Vec::with_capacity(self.levels[level - 1].len());
            for (position, remainder) in remainders.iter().enumerate() {
                let (left, right) = self.children(level, position);
                next.push(divide(remainder, &self.levels[level - 1][left])?.1);
                if let Some(right) = right {
                    next.push(divide(remainder, &self.levels[level - 1][right])?.1);
                }
            }
            remainders = next;
        }
        end_timer!(timer);
        Ok(remainders.iter().map(constant_term).collect())
    }

    /// For every leaf `i`, the cofactor `Y_i(x) = v(x) / (x - r_i)` where `v` is the root.
    ///
    /// Computed top-down: the root gets `1`, and each child gets its parent's cofactor times
    /// its sibling.
    pub fn cofactors(&self) -> Vec<DensePolynomial<F>> {
        let timer = start_timer!(|| format!("cofactors of {} leaves", self.num_leaves()));
        let top = self.levels.len() - 1;
        let mut current = vec![DensePolynomial::from_coefficients_vec(vec![F::one()])];
        for level in (1..=top).rev() {
            let below = &self.levels[level - 1];
            let mut next = Vec::with_capacity(below.len());
            for (position, cofactor) in current.iter().enumerate() {
                match self.children(level, position) {
                    (left, Some(right)) => {
                        next.push(cofactor * &below[right]);
                        next.push(cofactor * &below[left]);
                    }
                    (_, None) => next.push(cofactor.clone()),
                }
            }
            current = next;
        }
        end_timer!(timer);
        current
    }
}
