//! # Data structures
//!
//! This module provides the data structures that describe rows, variable bounds and the
//! environment of the separation storage. Algorithms may introduce their specific data structures
//! in `algorithm::my_algorithm`.

pub mod linear_algebra;
pub mod linear_program;
pub mod number_types;
pub mod relaxation;
pub mod search_tree;
