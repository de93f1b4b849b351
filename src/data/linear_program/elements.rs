//! # Building blocks to describe bounds and variables.
use std::fmt;
use std::fmt::Display;
use std::ops::Not;

use enum_map::Enum;

/// Direction of a bound.
///
/// Both variable bounds and the sides of a row have a direction.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundDirection {
    /// In the case of a variable, `b <= x`.
    Lower,
    /// In the case of a variable, `x <= b`.
    Upper,
}

impl BoundDirection {
    /// The direction of the variable bound implied by a side of a row with a single coefficient.
    ///
    /// A lower side `lhs <= a x` bounds `x` from below when `a` is positive, and from above when it
    /// is negative.
    #[must_use]
    pub fn through_coefficient(self, coefficient: f64) -> Self {
        debug_assert_ne!(coefficient, 0_f64);

        if coefficient > 0_f64 {
            self
        } else {
            !self
        }
    }
}

impl Not for BoundDirection {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

impl Display for BoundDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundDirection::Lower => write!(f, "lower"),
            BoundDirection::Upper => write!(f, "upper"),
        }
    }
}

/// A variable is either continuous or integer.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VariableType {
    #[default]
    Continuous,
    Integer,
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::BoundDirection;

    #[test]
    fn through_coefficient() {
        assert_eq!(BoundDirection::Lower.through_coefficient(2_f64), BoundDirection::Lower);
        assert_eq!(BoundDirection::Lower.through_coefficient(-0.5), BoundDirection::Upper);
        assert_eq!(BoundDirection::Upper.through_coefficient(-3_f64), BoundDirection::Lower);
        assert_eq!(!BoundDirection::Upper, BoundDirection::Lower);
    }
}
