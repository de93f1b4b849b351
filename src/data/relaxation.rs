//! # LP relaxation
//!
//! Keeps track of the rows that were added to the relaxation and the depth at which they were
//! added, together with the solution of the last solve. Solving is done elsewhere.
use std::slice::Iter;

use crate::algorithm::separation::environment::Lp;
use crate::algorithm::separation::error::{SeparationError, SeparationResult};
use crate::data::linear_program::row::{CutRef, Row};

/// Rows of the relaxation and its current primal solution.
#[derive(Debug, Default)]
pub struct Relaxation {
    /// Indexed by variable.
    primal_solution: Vec<f64>,
    /// Rows with the depth of the node they were added at, by LP position.
    rows: Vec<(CutRef, usize)>,
}

impl Relaxation {
    /// Create a relaxation without rows.
    ///
    /// # Arguments
    ///
    /// * `primal_solution`: Value of each variable in the solution of the relaxation.
    #[must_use]
    pub fn new(primal_solution: Vec<f64>) -> Self {
        Self {
            primal_solution,
            rows: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn nr_variables(&self) -> usize {
        self.primal_solution.len()
    }

    /// Number of rows currently in the relaxation.
    pub fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    /// Replace the solution, after the relaxation was solved again.
    pub fn set_primal_solution(&mut self, primal_solution: Vec<f64>) {
        debug_assert_eq!(primal_solution.len(), self.primal_solution.len());

        self.primal_solution = primal_solution;
    }

    /// Rows in the order of their LP position, with the depth they were added at.
    pub fn rows(&self) -> Iter<'_, (CutRef, usize)> {
        self.rows.iter()
    }

    /// Remove the rows that are only valid in a subtree that the search left.
    ///
    /// # Arguments
    ///
    /// * `depth`: Rows added at a larger depth than this are removed.
    ///
    /// # Return value
    ///
    /// The number of rows removed.
    pub fn remove_rows_above_depth(&mut self, depth: usize) -> usize {
        let before = self.rows.len();
        self.rows.retain(|(row, row_depth)| {
            let keep = *row_depth <= depth;
            if !keep {
                row.set_lp_position(None);
            }
            keep
        });
        for (position, (row, _)) in self.rows.iter().enumerate() {
            row.set_lp_position(Some(position));
        }

        let removed = before - self.rows.len();
        if removed > 0 {
            log::debug!("Removed {} rows added below depth {}", removed, depth);
        }
        removed
    }
}

impl Lp<CutRef> for Relaxation {
    fn primal_solution(&self) -> &[f64] {
        &self.primal_solution
    }

    fn add_row(&mut self, row: CutRef, depth: usize) -> SeparationResult<()> {
        if row.is_in_lp() {
            return Err(SeparationError::Lp(format!("row {} is already in the LP", row.name())));
        }
        if row.coefficients().len() > self.nr_variables() {
            return Err(SeparationError::Lp(format!(
                "row {} has {} columns, the LP has {}",
                row.name(), row.coefficients().len(), self.nr_variables(),
            )));
        }

        self.rows.try_reserve(1)?;
        row.set_lp_position(Some(self.rows.len()));
        self.rows.push((row, depth));

        Ok(())
    }
}
