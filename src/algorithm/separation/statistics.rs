//! # Counters
use std::fmt;
use std::fmt::Display;

/// Counts of what happened to the cuts submitted to a storage.
///
/// The round counters are reset each time the storage is drained, the others accumulate over the
/// whole solve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Number of cuts submitted since the storage was created.
    pub cuts_found: usize,
    /// Number of cuts submitted in the current round.
    pub cuts_found_round: usize,
    /// Number of cuts and bound changes stored in the current round, including those that were
    /// evicted again.
    pub cuts_stored: usize,
    /// Number of rows added to the LP and bound changes that tightened a bound, outside the
    /// initial LP phase.
    pub cuts_applied: usize,
    /// The bound changes among `cuts_applied`.
    pub bound_changes_applied: usize,
    /// Number of times the storage was drained.
    pub rounds: usize,
}

impl Statistics {
    pub(crate) fn found(&mut self) {
        self.cuts_found += 1;
        self.cuts_found_round += 1;
    }

    pub(crate) fn end_round(&mut self) {
        self.cuts_found_round = 0;
        self.cuts_stored = 0;
        self.rounds += 1;
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Separation storage")?;
        writeln!(f, "  cuts found:            {:>10}", self.cuts_found)?;
        writeln!(f, "  cuts applied:          {:>10}", self.cuts_applied)?;
        writeln!(f, "  bound changes applied: {:>10}", self.bound_changes_applied)?;
        write!(f, "  rounds:                {:>10}", self.rounds)
    }
}
