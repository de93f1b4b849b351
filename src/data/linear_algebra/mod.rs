//! # Linear algebra primitives
//!
//! Linear algebra primitives used to represent the coefficients of rows.
pub mod vector;

/// A single nonzero value in a sparse representation: an index and a value.
pub type SparseTuple<F> = (usize, F);
