//! # Redundancy filter
//!
//! A row is redundant when every point within the current variable bounds satisfies it. Such a
//! row can never cut off anything and is not stored.
use crate::data::linear_program::domain::Domains;
use crate::data::linear_program::row::Row;
use crate::data::number_types::tolerance::Tolerances;

/// Whether the activity range of a row lies within its sides.
///
/// Modifiable rows are never redundant, their activity range is not known yet.
///
/// # Arguments
///
/// * `row`: Candidate cut.
/// * `domains`: Currently enforced bounds, not necessarily globally valid.
/// * `tolerances`: Activity bounds may exceed the sides by the feasibility tolerance.
pub fn is_redundant<R: Row>(row: &R, domains: &Domains, tolerances: &Tolerances) -> bool {
    if row.is_modifiable() {
        return false;
    }

    let constant = row.constant();
    let lower_side_redundant = match row.lhs() {
        None => true,
        Some(lhs) => row.min_activity(domains)
            .is_some_and(|minimum| tolerances.is_feasible_le(lhs - constant, minimum)),
    };

    lower_side_redundant && match row.rhs() {
        None => true,
        Some(rhs) => row.max_activity(domains)
            .is_some_and(|maximum| tolerances.is_feasible_le(maximum, rhs - constant)),
    }
}
