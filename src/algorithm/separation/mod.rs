//! # Separation storage
//!
//! Collects the cuts that separators find during a separation round, keeps the best of them and
//! adds those to the LP relaxation when the round is committed.
//!
//! Cuts on a single variable are not added as rows: they are turned into bound changes and
//! applied to the search tree instead. Cuts that can't cut off anything within the current bounds
//! are dropped right away. All other cuts are ranked by a score combining their efficacy and their
//! orthogonality to better cuts, see the `ranking` module.
//!
//! During the construction of the initial LP, all rows are stored without limit on their number.
use std::slice::Iter;

use crate::algorithm::separation::bound_change::{BoundChange, BoundChangeOutcome, derive_bound_changes, single_coefficient};
use crate::algorithm::separation::environment::{Lp, Tree};
use crate::algorithm::separation::error::SeparationResult;
use crate::algorithm::separation::ranking::{RankedCuts, Rejection};
use crate::algorithm::separation::redundancy::is_redundant;
use crate::algorithm::separation::score::{efficacy, RankedCut, Valuation};
use crate::algorithm::separation::settings::SeparationSettings;
use crate::algorithm::separation::statistics::Statistics;
use crate::data::linear_program::row::Row;

pub mod bound_change;
pub mod environment;
pub mod error;
pub mod ranking;
pub mod redundancy;
pub mod score;
pub mod settings;
pub mod statistics;


/// What happened to a submitted cut.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Admission {
    /// The cut is among the best cuts of this round, for now.
    Stored,
    /// The cut is a bound on a single variable. This many bound changes were stored.
    BoundChanges(usize),
    /// The cut is satisfied by all points within the current bounds.
    Redundant,
    /// The cut did not make it into the storage because of its score or its orthogonality.
    Rejected,
}

/// Storage for the cuts of a separation round.
///
/// Lives for the whole solve. Each round ends with either `apply_cuts` or `clear_cuts`, after
/// which the storage is empty again.
#[derive(Debug)]
pub struct SeparationStorage<R> {
    settings: SeparationSettings,
    /// Rows, best first.
    cuts: RankedCuts<R>,
    /// In the order they were derived.
    bound_changes: Vec<BoundChange>,
    /// Whether the initial LP is being constructed.
    initial_lp: bool,
    statistics: Statistics,
}

impl<R: Row> SeparationStorage<R> {
    /// Create an empty storage.
    #[must_use]
    pub fn new(settings: SeparationSettings) -> Self {
        Self {
            settings,
            cuts: RankedCuts::default(),
            bound_changes: Vec::new(),
            initial_lp: false,
            statistics: Statistics::default(),
        }
    }

    /// Submit a cut.
    ///
    /// # Arguments
    ///
    /// * `row`: The cut. It is captured if it gets stored, the caller keeps its own handle.
    /// * `scorefactor`: Multiplier of the score. A value the tolerances consider infinite forces
    /// the cut into the storage, also when it is redundant. The same holds for every cut
    /// submitted in the initial LP phase.
    /// * `at_root`: Whether the separation round is at the root node, determines the capacity and
    /// the minimal orthogonality.
    /// * `lp`: Provides the solution the efficacy is measured at.
    /// * `tree`: Provides the current bounds of the variables.
    ///
    /// # Return value
    ///
    /// What happened to the cut. Not storing a cut is a regular outcome.
    ///
    /// # Errors
    ///
    /// If the storage could not grow.
    ///
    /// # Panics
    ///
    /// If the row is already in the LP, or if both of its sides are infinite.
    pub fn add_cut<L: Lp<R>, T: Tree>(
        &mut self,
        row: &R,
        scorefactor: f64,
        at_root: bool,
        lp: &L,
        tree: &T,
    ) -> SeparationResult<Admission> {
        assert!(!row.is_in_lp(), "Cut {} is already in the LP", row.name());
        assert!(row.lhs().is_some() || row.rhs().is_some(), "Cut {} has no finite side", row.name());

        self.statistics.found();
        let tolerances = &self.settings.tolerances;
        let forced = self.initial_lp || tolerances.is_infinity(scorefactor);

        if !forced && is_redundant(row, tree.domains(), tolerances) {
            log::trace!("Cut {} is redundant", row.name());
            return Ok(Admission::Redundant);
        }

        if let Some(single) = single_coefficient(row) {
            let mut nr_bound_changes = 0;
            for bound_change in derive_bound_changes(row, single, tree.domains(), tolerances) {
                self.bound_changes.try_reserve(1)?;
                log::debug!("Cut {} stored as bound change {}", row.name(), bound_change);
                self.bound_changes.push(bound_change);
                nr_bound_changes += 1;
            }
            self.statistics.cuts_stored += nr_bound_changes;

            return Ok(if nr_bound_changes == 0 {
                log::trace!("Cut {} does not tighten the bounds of its variable", row.name());
                Admission::Redundant
            } else {
                Admission::BoundChanges(nr_bound_changes)
            });
        }

        let valuation = if forced {
            Valuation::Forced
        } else {
            Valuation::Scored {
                efficacy: efficacy(row, lp.primal_solution(), &self.settings),
                scorefactor,
            }
        };
        let capacity = if self.initial_lp {
            None
        } else {
            Some(self.settings.capacity(at_root))
        };
        let min_orthogonality = self.settings.min_orthogonality(at_root);

        match self.cuts.insert(row, valuation, capacity, min_orthogonality, &self.settings)? {
            Ok(position) => {
                self.statistics.cuts_stored += 1;
                log::debug!("Cut {} stored at rank {} of {}", row.name(), position, self.cuts.len());
                Ok(Admission::Stored)
            },
            Err(rejection) => {
                match rejection {
                    Rejection::NoCapacity => log::trace!("Cut {} rejected, no capacity", row.name()),
                    Rejection::ScoreTooLow => log::trace!("Cut {} rejected, score too low", row.name()),
                    Rejection::TooParallel => log::trace!("Cut {} rejected, too parallel", row.name()),
                }
                Ok(Admission::Rejected)
            },
        }
    }

    /// Add the stored cuts to the LP and apply the stored bound changes to the current node.
    ///
    /// Bound changes are applied in the order they were found, and are checked against the
    /// bounds as they are at that moment. The first one that would make the node infeasible stops
    /// the bound changes, the rows are added regardless. Afterwards, the storage is empty.
    ///
    /// # Return value
    ///
    /// Whether the current node was found to be infeasible.
    ///
    /// # Errors
    ///
    /// If the LP does not accept a row. The storage is emptied anyway.
    pub fn apply_cuts<L: Lp<R>, T: Tree>(&mut self, lp: &mut L, tree: &mut T) -> SeparationResult<bool> {
        let node = tree.current_node();
        let depth = tree.node_depth(node);

        let mut infeasible = false;
        for bound_change in &self.bound_changes {
            match bound_change.apply(tree, node, &self.settings.tolerances) {
                BoundChangeOutcome::Applied => {
                    log::debug!("Applied bound change {}", bound_change);
                    if !self.initial_lp {
                        self.statistics.bound_changes_applied += 1;
                        self.statistics.cuts_applied += 1;
                    }
                },
                BoundChangeOutcome::Dominated => log::trace!("Bound change {} is dominated", bound_change),
                BoundChangeOutcome::Infeasible => {
                    log::debug!("Bound change {} makes node {} infeasible", bound_change, node.0);
                    infeasible = true;
                    break;
                },
            }
        }

        let mut result = Ok(());
        for RankedCut { row, .. } in self.cuts.drain() {
            // The same row may have been submitted more than once.
            if row.is_in_lp() {
                continue;
            }

            let name = row.name().to_owned();
            if let Err(error) = lp.add_row(row, depth) {
                result = Err(error);
                break;
            }
            log::trace!("Added cut {} to the LP at depth {}", name, depth);
            if !self.initial_lp {
                self.statistics.cuts_applied += 1;
            }
        }

        self.end_round("applied");
        result.map(|()| infeasible)
    }

    /// Release all stored cuts and bound changes without applying them.
    pub fn clear_cuts(&mut self) {
        self.cuts.drain().for_each(drop);
        self.end_round("cleared");
    }

    fn end_round(&mut self, action: &str) {
        log::debug!(
            "Separation round {} {}: {} of {} cuts stored, {} cuts applied in total",
            self.statistics.rounds, action,
            self.statistics.cuts_stored, self.statistics.cuts_found_round,
            self.statistics.cuts_applied,
        );

        debug_assert!(self.cuts.is_empty());
        self.bound_changes.clear();
        self.statistics.end_round();
    }

    /// Enter the initial LP phase, in which every row is stored.
    ///
    /// # Panics
    ///
    /// If the phase was already entered or if the storage is not empty.
    pub fn start_initial_lp_phase(&mut self) {
        assert!(!self.initial_lp, "Initial LP phase already started");
        assert!(self.is_empty(), "Storage not empty at start of initial LP phase");

        self.initial_lp = true;
    }

    /// Leave the initial LP phase.
    ///
    /// # Panics
    ///
    /// If the phase was not entered or if the storage is not empty.
    pub fn end_initial_lp_phase(&mut self) {
        assert!(self.initial_lp, "Initial LP phase not started");
        assert!(self.is_empty(), "Storage not empty at end of initial LP phase");

        self.initial_lp = false;
    }
}

impl<R> SeparationStorage<R> {
    /// Number of stored rows and bound changes.
    pub fn nr_cuts(&self) -> usize {
        self.cuts.len() + self.bound_changes.len()
    }

    /// Whether no rows and no bound changes are stored.
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty() && self.bound_changes.is_empty()
    }

    /// Stored rows, best first.
    pub fn cuts(&self) -> Iter<'_, RankedCut<R>> {
        self.cuts.iter()
    }

    /// Stored bound changes, in the order they were found.
    pub fn bound_changes(&self) -> &[BoundChange] {
        &self.bound_changes
    }

    /// Whether the initial LP is being constructed.
    pub fn is_initial_lp(&self) -> bool {
        self.initial_lp
    }

    /// Counters over the whole solve and the current round.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Settings the storage was created with.
    pub fn settings(&self) -> &SeparationSettings {
        &self.settings
    }
}
