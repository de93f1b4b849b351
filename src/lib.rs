//! # Storage for cutting planes
//!
//! During a branch-and-bound search, separators find linear inequalities that cut off the solution
//! of the current LP relaxation. This crate collects those cuts over a separation round, selects
//! the best of them by efficacy and orthogonality, and adds them to the relaxation at the end of
//! the round. Cuts on a single variable become bound changes in the search tree instead.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
