//! # Numerical tolerances
//!
//! Floating point comparisons that ignore differences below a relative epsilon. Scores, activity
//! bounds and variable bounds are compared through these predicates.

/// Tolerances used when comparing floating point values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerances {
    /// Values closer together than this (relative) distance are considered equal.
    pub epsilon: f64,
    /// Relative distance below which a (bound or side) violation is accepted as feasible.
    pub feasibility: f64,
    /// Values with an absolute value at least this large are considered infinite.
    pub infinity: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            feasibility: 1e-6,
            infinity: 1e20,
        }
    }
}

/// Difference between two values, relative to the largest of their magnitudes (and at least one).
fn relative_difference(left: f64, right: f64) -> f64 {
    let magnitude = left.abs().max(right.abs()).max(1_f64);

    (left - right) / magnitude
}

impl Tolerances {
    /// Whether the two values are equal up to `epsilon`.
    #[must_use]
    pub fn is_eq(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right).abs() <= self.epsilon
    }

    /// Whether `left` is smaller than `right` by more than `epsilon`.
    #[must_use]
    pub fn is_lt(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) < -self.epsilon
    }

    /// Whether `left` is not larger than `right` by more than `epsilon`.
    #[must_use]
    pub fn is_le(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) <= self.epsilon
    }

    /// Whether `left` is larger than `right` by more than `epsilon`.
    #[must_use]
    pub fn is_gt(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) > self.epsilon
    }

    /// Whether `left` is not smaller than `right` by more than `epsilon`.
    #[must_use]
    pub fn is_ge(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) >= -self.epsilon
    }

    /// Whether `left` is smaller than `right` by more than the feasibility tolerance.
    #[must_use]
    pub fn is_feasible_lt(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) < -self.feasibility
    }

    /// Whether `left` is not larger than `right` by more than the feasibility tolerance.
    #[must_use]
    pub fn is_feasible_le(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) <= self.feasibility
    }

    /// Whether `left` is larger than `right` by more than the feasibility tolerance.
    #[must_use]
    pub fn is_feasible_gt(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) > self.feasibility
    }

    /// Whether `left` is not smaller than `right` by more than the feasibility tolerance.
    #[must_use]
    pub fn is_feasible_ge(&self, left: f64, right: f64) -> bool {
        relative_difference(left, right) >= -self.feasibility
    }

    /// Whether the value is too close to zero to be distinguished from it.
    #[must_use]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.epsilon
    }

    /// Whether the value should be treated as (positive) infinity.
    #[must_use]
    pub fn is_infinity(&self, value: f64) -> bool {
        value >= self.infinity
    }

    /// Round down, unless the value is within the feasibility tolerance below an integer.
    #[must_use]
    pub fn feasible_floor(&self, value: f64) -> f64 {
        (value + self.feasibility).floor()
    }

    /// Round up, unless the value is within the feasibility tolerance above an integer.
    #[must_use]
    pub fn feasible_ceil(&self, value: f64) -> f64 {
        (value - self.feasibility).ceil()
    }
}
