//! # Algorithms
pub mod separation;
