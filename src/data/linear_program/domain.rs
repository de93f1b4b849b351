//! # Variable domains
//!
//! The bounds of the variables as they are currently enforced, for example at the focus node of
//! the search tree. These are not necessarily globally valid.
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use enum_map::{enum_map, EnumMap};

use crate::data::linear_program::elements::{BoundDirection, VariableType};
use crate::data::number_types::tolerance::Tolerances;

/// Type and bounds of a single variable.
///
/// A bound that is `None` is infinite: the variable is in `(-oo, upper]`, `[lower, oo)` or free.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    /// Whether the variable is integer or not.
    pub variable_type: VariableType,
    bounds: EnumMap<BoundDirection, Option<f64>>,
}

impl Domain {
    /// Create a new domain.
    ///
    /// # Arguments
    ///
    /// * `variable_type`: Integer variables have their derived bounds rounded.
    /// * `lower`: Lower bound, `None` if the variable is unbounded from below.
    /// * `upper`: Upper bound, `None` if the variable is unbounded from above.
    #[must_use]
    pub fn new(variable_type: VariableType, lower: Option<f64>, upper: Option<f64>) -> Self {
        debug_assert!(match (lower, upper) {
            (Some(lower), Some(upper)) => lower <= upper,
            _ => true,
        });

        Self {
            variable_type,
            bounds: enum_map! {
                BoundDirection::Lower => lower,
                BoundDirection::Upper => upper,
            },
        }
    }

    /// A continuous variable between two bounds.
    #[must_use]
    pub fn continuous(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self::new(VariableType::Continuous, lower, upper)
    }

    /// An integer variable between two bounds.
    #[must_use]
    pub fn integer(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self::new(VariableType::Integer, lower, upper)
    }

    /// The bound in a direction, `None` if infinite.
    #[must_use]
    pub fn bound(&self, direction: BoundDirection) -> Option<f64> {
        self.bounds[direction]
    }

    /// Lower bound, `None` if minus infinity.
    #[must_use]
    pub fn lower(&self) -> Option<f64> {
        self.bound(BoundDirection::Lower)
    }

    /// Upper bound, `None` if infinity.
    #[must_use]
    pub fn upper(&self) -> Option<f64> {
        self.bound(BoundDirection::Upper)
    }

    /// Overwrite a bound.
    ///
    /// No checks are done, this should be called only after comparing with `is_tightened_by`.
    pub fn set_bound(&mut self, direction: BoundDirection, value: f64) {
        self.bounds[direction] = Some(value);
    }

    /// Whether a new bound value would be strictly tighter than the current bound.
    ///
    /// An infinite current bound is tightened by any finite value.
    #[must_use]
    pub fn is_tightened_by(
        &self,
        direction: BoundDirection,
        value: f64,
        tolerances: &Tolerances,
    ) -> bool {
        match (direction, self.bound(direction)) {
            (_, None) => true,
            (BoundDirection::Lower, Some(existing)) => tolerances.is_gt(value, existing),
            (BoundDirection::Upper, Some(existing)) => tolerances.is_lt(value, existing),
        }
    }

    /// Round a derived bound value for integer variables.
    #[must_use]
    pub fn adjust_bound(
        &self,
        direction: BoundDirection,
        value: f64,
        tolerances: &Tolerances,
    ) -> f64 {
        match (self.variable_type, direction) {
            (VariableType::Continuous, _) => value,
            (VariableType::Integer, BoundDirection::Lower) => tolerances.feasible_ceil(value),
            (VariableType::Integer, BoundDirection::Upper) => tolerances.feasible_floor(value),
        }
    }
}

/// Domains of all variables, indexed by variable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Domains {
    domains: Vec<Domain>,
}

impl Domains {
    /// Bounds of all variables, indexed by variable.
    #[must_use]
    pub fn new(domains: Vec<Domain>) -> Self {
        Self { domains }
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterate over the variables in index order.
    pub fn iter(&self) -> Iter<'_, Domain> {
        self.domains.iter()
    }
}

impl FromIterator<Domain> for Domains {
    fn from_iter<I: IntoIterator<Item=Domain>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Domains {
    type Output = Domain;

    fn index(&self, variable: usize) -> &Self::Output {
        &self.domains[variable]
    }
}

impl IndexMut<usize> for Domains {
    fn index_mut(&mut self, variable: usize) -> &mut Self::Output {
        &mut self.domains[variable]
    }
}
