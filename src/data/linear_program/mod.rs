//! # Representing rows and variables
//!
//! Rows are linear inequalities over the variables of a problem, the bounds of the variables are
//! kept per variable in a domain.
pub mod domain;
pub mod elements;
pub mod row;
