//! # Bound changes
//!
//! A row with a single coefficient is a bound on a variable. Instead of adding it to the LP as a
//! structural row, it is stored as a bound change and applied to the search tree on commit.
use std::fmt;
use std::fmt::Display;

use enum_map::{enum_map, EnumMap};

use crate::algorithm::separation::environment::{NodeId, Tree};
use crate::data::linear_program::domain::Domains;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::linear_program::row::Row;
use crate::data::number_types::tolerance::Tolerances;

/// A pending tightening of a variable bound.
///
/// Does not own the variable, it only refers to it by index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundChange {
    /// Index of the variable.
    pub variable: usize,
    /// New bound.
    pub value: f64,
    /// Which of the two bounds changes.
    pub direction: BoundDirection,
}

/// What happened when a bound change was applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoundChangeOutcome {
    /// The bound was tightened.
    Applied,
    /// The current bound is already at least as tight, for example because of an earlier bound
    /// change on the same variable.
    Dominated,
    /// The new bound crosses the opposite bound of the variable. The bound was not changed.
    Infeasible,
}

/// The only variable and coefficient of a row that reduces to a bound.
///
/// # Return value
///
/// `None` if the row has more or less than one nonzero coefficient, or when it is modifiable.
pub fn single_coefficient<R: Row>(row: &R) -> Option<(usize, f64)> {
    match &**row.coefficients() {
        &[(variable, coefficient)] if !row.is_modifiable() => Some((variable, coefficient)),
        _ => None,
    }
}

/// Derive the variable bounds implied by a row with a single coefficient.
///
/// Each finite side of `lhs <= a x + c <= rhs` implies a bound `(side - c) / a`. The direction of
/// the bound depends on the side and on the sign of `a`. Only bounds that are strictly tighter than
/// the current ones are returned.
///
/// # Arguments
///
/// * `row`: Row of which `variable` is the only variable.
/// * `(variable, coefficient)`: The only nonzero of the row.
/// * `domains`: Currently enforced variable bounds.
///
/// # Return value
///
/// At most one bound change for each side of the row.
pub fn derive_bound_changes<R: Row>(
    row: &R,
    (variable, coefficient): (usize, f64),
    domains: &Domains,
    tolerances: &Tolerances,
) -> impl Iterator<Item = BoundChange> {
    debug_assert_ne!(coefficient, 0_f64);

    let sides: EnumMap<BoundDirection, Option<f64>> = enum_map! {
        BoundDirection::Lower => row.lhs(),
        BoundDirection::Upper => row.rhs(),
    };
    let constant = row.constant();
    let domain = domains[variable].clone();
    let tolerances = *tolerances;

    sides.into_iter()
        .filter_map(move |(side_direction, side)| {
            let direction = side_direction.through_coefficient(coefficient);
            let value = domain.adjust_bound(direction, (side? - constant) / coefficient, &tolerances);

            domain.is_tightened_by(direction, value, &tolerances)
                .then_some(BoundChange { variable, value, direction })
        })
}

impl BoundChange {
    /// Apply this bound change to a node, after checking it against the bounds as they are now.
    ///
    /// The bounds may have changed since this bound change was created, so it is validated
    /// again. A new bound that crosses the opposite bound by no more than the feasibility tolerance
    /// is moved onto it. A larger crossing is passed on to the tree, which marks the node
    /// infeasible.
    ///
    /// # Arguments
    ///
    /// * `tree`: Search tree to change a bound in.
    /// * `node`: Node at which the bound should change.
    /// * `tolerances`: Used both for rounding and comparing.
    pub fn apply<T: Tree>(
        &self,
        tree: &mut T,
        node: NodeId,
        tolerances: &Tolerances,
    ) -> BoundChangeOutcome {
        let domain = &tree.domains()[self.variable];
        let mut value = domain.adjust_bound(self.direction, self.value, tolerances);
        if !domain.is_tightened_by(self.direction, value, tolerances) {
            return BoundChangeOutcome::Dominated;
        }

        if let Some(opposite) = domain.bound(!self.direction) {
            let (crosses, crosses_significantly) = match self.direction {
                BoundDirection::Lower => (value > opposite, tolerances.is_feasible_gt(value, opposite)),
                BoundDirection::Upper => (value < opposite, tolerances.is_feasible_lt(value, opposite)),
            };
            if crosses && !crosses_significantly {
                value = opposite;
            }
        }

        if tree.apply_bound_change(node, self.variable, value, self.direction) {
            BoundChangeOutcome::Infeasible
        } else {
            BoundChangeOutcome::Applied
        }
    }
}

impl Display for BoundChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self.direction {
            BoundDirection::Lower => ">=",
            BoundDirection::Upper => "<=",
        };

        write!(f, "x{} {} {}", self.variable, operator, self.value)
    }
}
