//! # Ranked insertion
//!
//! Keeps the stored cuts sorted by score, best first. A new cut is compared with the better cuts
//! on its way to its position, which may lower its orthogonality and with that its score. Once
//! inserted, the cuts it displaced are compared with it in turn and sink further down if their
//! score drops.
//!
//! The displaced cuts only get their orthogonality compared with the new cut and with the cuts
//! they sink past. A cut whose orthogonality was limited by a cut that is now further down is not
//! given its old score back.
use std::collections::TryReserveError;
use std::slice::Iter;
use std::vec::Drain;

use crate::algorithm::separation::score::{RankedCut, Score, Valuation};
use crate::algorithm::separation::settings::SeparationSettings;
use crate::data::linear_program::row::Row;

/// Why a candidate cut was not stored.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The storage holds no cuts in this round.
    NoCapacity,
    /// The storage is full and the cut is not better than the worst cut.
    ScoreTooLow,
    /// The cut is too parallel to a better cut.
    TooParallel,
}

/// Cuts sorted by score, best first.
#[derive(Debug)]
pub struct RankedCuts<R> {
    cuts: Vec<RankedCut<R>>,
}

impl<R> Default for RankedCuts<R> {
    fn default() -> Self {
        Self { cuts: Vec::new() }
    }
}

impl<R: Row> RankedCuts<R> {
    /// Insert a cut at the position determined by its score.
    ///
    /// # Arguments
    ///
    /// * `row`: Candidate cut. Only stays captured if it is stored.
    /// * `valuation`: Whether the cut is forced, or its efficacy and score factor otherwise.
    /// * `capacity`: Maximum number of regular cuts, `None` if unbounded.
    /// * `min_orthogonality`: Cuts that are less orthogonal than this to a better cut are not kept.
    /// * `settings`: Orthogonality weight and tolerances.
    ///
    /// # Return value
    ///
    /// The position the cut was inserted at, or the reason it was rejected.
    ///
    /// # Errors
    ///
    /// If the storage could not grow.
    pub fn insert(
        &mut self,
        row: &R,
        valuation: Valuation,
        capacity: Option<usize>,
        min_orthogonality: f64,
        settings: &SeparationSettings,
    ) -> Result<Result<usize, Rejection>, TryReserveError> {
        if capacity == Some(0) {
            return Ok(Err(Rejection::NoCapacity));
        }

        let mut candidate = RankedCut::new(row.clone(), valuation, settings);
        let forced = candidate.score.is_forced();
        let worst = if forced { None } else { self.worst_score(capacity) };
        if worst.is_some_and(|worst| !candidate.score.is_better_than(worst, &settings.tolerances)) {
            return Ok(Err(Rejection::ScoreTooLow));
        }

        let mut position = self.cuts.len();
        for (index, better) in self.cuts.iter().enumerate() {
            if candidate.score.is_better_than(better.score, &settings.tolerances) {
                position = index;
                break;
            }
            if forced {
                continue;
            }

            let orthogonality = candidate.row.orthogonality(&better.row);
            if candidate.reduce_orthogonality(orthogonality, min_orthogonality, settings) {
                if candidate.score == Score::PendingEviction {
                    return Ok(Err(Rejection::TooParallel));
                }
                if worst.is_some_and(|worst| !candidate.score.is_better_than(worst, &settings.tolerances)) {
                    return Ok(Err(Rejection::ScoreTooLow));
                }
            }
        }

        self.cuts.try_reserve(1)?;
        self.cuts.insert(position, candidate);
        self.cascade(position, min_orthogonality, settings);

        if !forced {
            self.enforce_capacity(capacity);
        }
        self.evict_parallel();

        debug_assert!(self.is_sorted(settings));
        Ok(Ok(position))
    }

    /// Score below which a regular candidate is not worth a comparison.
    ///
    /// Only exists when the storage is full.
    fn worst_score(&self, capacity: Option<usize>) -> Option<Score> {
        let capacity = capacity?;

        if self.cuts.len() >= capacity {
            self.cuts.last().map(|cut| cut.score)
        } else {
            None
        }
    }

    /// Re-rank the cuts displaced by a newly inserted cut.
    ///
    /// From the last cut up to the one directly below the new cut, each displaced cut is compared
    /// with the new cut and then sinks past the cuts below it that now have a better score. It is
    /// compared with each of the cuts it sinks past.
    fn cascade(&mut self, inserted: usize, min_orthogonality: f64, settings: &SeparationSettings) {
        for displaced in (inserted + 1..self.cuts.len()).rev() {
            self.compare(displaced, inserted, min_orthogonality, settings);

            let mut current = displaced;
            while current + 1 < self.cuts.len()
                && self.cuts[current + 1].score.is_better_than(self.cuts[current].score, &settings.tolerances) {
                self.cuts.swap(current, current + 1);
                current += 1;
                self.compare(current, current - 1, min_orthogonality, settings);
            }
        }
    }

    /// Lower the orthogonality of a cut using a cut ranked above it.
    fn compare(&mut self, cut: usize, better: usize, min_orthogonality: f64, settings: &SeparationSettings) {
        debug_assert_ne!(cut, better);

        let orthogonality = self.cuts[cut].row.orthogonality(&self.cuts[better].row);
        if self.cuts[cut].reduce_orthogonality(orthogonality, min_orthogonality, settings)
            && self.cuts[cut].score == Score::PendingEviction {
            log::trace!(
                "Cut {} is too parallel to cut {} (orthogonality {:.4})",
                self.cuts[cut].row.name(), self.cuts[better].row.name(), orthogonality,
            );
        }
    }

    /// Release the worst cut if there are too many.
    ///
    /// Forced cuts are never released.
    fn enforce_capacity(&mut self, capacity: Option<usize>) {
        let Some(capacity) = capacity else { return };

        if self.cuts.len() > capacity
            && self.cuts.last().is_some_and(|cut| !cut.score.is_forced()) {
            if let Some(evicted) = self.cuts.pop() {
                log::trace!("Cut {} evicted, storage is at capacity {}", evicted.row.name(), capacity);
            }
        }
    }

    /// Release the cuts at the tail that were marked as too parallel.
    fn evict_parallel(&mut self) {
        while self.cuts.last().is_some_and(|cut| cut.score == Score::PendingEviction) {
            if let Some(evicted) = self.cuts.pop() {
                log::trace!(
                    "Cut {} evicted, orthogonality {:.4} too low",
                    evicted.row.name(), evicted.orthogonality,
                );
            }
        }
    }

    fn is_sorted(&self, settings: &SeparationSettings) -> bool {
        self.cuts.is_sorted_by(|better, worse| !worse.score.is_better_than(better.score, &settings.tolerances))
    }
}

impl<R> RankedCuts<R> {
    /// Number of stored cuts.
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    /// Whether no cuts are stored.
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Iterate over the cuts, best first.
    pub fn iter(&self) -> Iter<'_, RankedCut<R>> {
        self.cuts.iter()
    }

    /// Take all cuts out, best first.
    pub fn drain(&mut self) -> Drain<'_, RankedCut<R>> {
        self.cuts.drain(..)
    }
}
