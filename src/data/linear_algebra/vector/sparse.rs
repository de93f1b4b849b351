//! # Sparse vector
//!
//! Wrapping a `Vec<(usize, _)>`, fixed size.
use std::fmt;
use std::fmt::Display;
use std::iter::FromIterator;
use std::ops::Deref;
use std::slice::Iter;
use std::vec::IntoIter;

use itertools::{EitherOrBoth, Itertools};
use num_traits::Float;

use crate::data::linear_algebra::SparseTuple;

/// A sparse vector using a `Vec` with (index, value) combinations as back-end. Indices start at
/// `0`.
///
/// Values are sorted by index and none of them is zero.
#[derive(PartialEq, Clone, Debug)]
pub struct Sparse<F> {
    data: Vec<SparseTuple<F>>,
    len: usize,
}

impl<F: Float> Sparse<F> {
    /// Create a vector of length `len` from `data`.
    ///
    /// Requires that values equal to zero are already filtered.
    #[must_use]
    pub fn new(data: Vec<SparseTuple<F>>, len: usize) -> Self {
        debug_assert!(data.iter().all(|&(i, _)| i < len));
        debug_assert!(data.is_sorted_by_key(|&(i, _)| i));
        debug_assert!(data.iter().tuple_windows().all(|((i, _), (j, _))| i < j));
        debug_assert!(data.iter().all(|(_, v)| !v.is_zero()));
        debug_assert!(data.len() <= len);

        Self { data, len }
    }

    /// Get the value at an index.
    ///
    /// # Return value
    ///
    /// `None` if the value at that index is zero.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&F> {
        debug_assert!(index < self.len);

        self.data.binary_search_by_key(&index, |&(i, _)| i)
            .ok()
            .map(|data_index| &self.data[data_index].1)
    }

    /// Iterate over the nonzero (index, value) tuples.
    pub fn iter(&self) -> Iter<'_, SparseTuple<F>> {
        self.data.iter()
    }

    /// The length of this vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this vector has zero size.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nonzero values.
    #[must_use]
    pub fn nr_nonzeros(&self) -> usize {
        self.data.len()
    }

    /// Calculate the inner product between two sparse vectors.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> F {
        self.data.iter()
            .merge_join_by(other.data.iter(), |(i, _), (j, _)| i.cmp(j))
            .filter_map(|pair| match pair {
                EitherOrBoth::Both((_, left), (_, right)) => Some(*left * *right),
                EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => None,
            })
            .fold(F::zero(), |total, product| total + product)
    }

    /// Calculate the inner product with a dense vector, such as a primal solution.
    #[must_use]
    pub fn inner_product_with_dense(&self, other: &[F]) -> F {
        debug_assert!(self.data.last().map_or(true, |&(i, _)| i < other.len()));

        self.data.iter()
            .map(|&(i, value)| value * other[i])
            .fold(F::zero(), |total, product| total + product)
    }

    /// Sum of the squared values.
    #[must_use]
    pub fn squared_norm(&self) -> F {
        self.data.iter()
            .map(|&(_, value)| value * value)
            .fold(F::zero(), |total, square| total + square)
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> F {
        self.squared_norm().sqrt()
    }

    /// Largest absolute value.
    #[must_use]
    pub fn max_norm(&self) -> F {
        self.data.iter()
            .map(|&(_, value)| value.abs())
            .fold(F::zero(), F::max)
    }

    /// Sum of absolute values.
    #[must_use]
    pub fn sum_norm(&self) -> F {
        self.data.iter()
            .map(|&(_, value)| value.abs())
            .fold(F::zero(), |total, value| total + value)
    }
}

impl<F> IntoIterator for Sparse<F> {
    type Item = SparseTuple<F>;
    type IntoIter = IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<F> Deref for Sparse<F> {
    type Target = [SparseTuple<F>];

    fn deref(&self) -> &Self::Target {
        self.data.deref()
    }
}

/// Collect a dense sequence of values, dropping the zeros.
impl<F: Float> FromIterator<F> for Sparse<F> {
    fn from_iter<I: IntoIterator<Item=F>>(iter: I) -> Self {
        let mut data = Vec::new();
        let mut counter = 0;

        for item in iter {
            if !item.is_zero() {
                data.push((counter, item));
            }
            counter += 1;
        }

        Self::new(data, counter)
    }
}

impl<F: Display> Display for Sparse<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (data_index, (index, value)) in self.data.iter().enumerate() {
            write!(f, "({} {})", index, value)?;
            if data_index < self.data.len() - 1 {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
