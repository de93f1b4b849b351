//! # Number types
//!
//! All computations are done in floating point. This module provides the tolerances that are used
//! to compare the results.
pub mod tolerance;
