//! # Vector types
//!
//! Rows are sparse: cuts typically involve few of the variables of the problem. Dense vectors,
//! such as primal solutions, are plain slices.
pub use sparse::Sparse as SparseVector;

mod sparse;
