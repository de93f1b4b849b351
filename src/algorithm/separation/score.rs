//! # Scoring
//!
//! The score of a cut combines how strongly the current LP solution violates it (its efficacy)
//! with how different its direction is from the better cuts (its orthogonality).
//!
//! Cuts that must enter the LP regardless of their quality and cuts that are about to be evicted
//! are tagged explicitly instead of using infinite scores.
use std::cmp::Ordering;

use crate::algorithm::separation::settings::SeparationSettings;
use crate::data::linear_program::row::Row;
use crate::data::number_types::tolerance::Tolerances;

/// Rank of a stored cut.
///
/// Ordered as `Forced > Finite(_) > PendingEviction`, finite scores by value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Score {
    /// The cut always enters: it was submitted during the initial LP phase or with an infinite
    /// score factor.
    Forced,
    /// Regular, finite score.
    Finite(f64),
    /// The cut was found too parallel to a better cut and will be removed.
    PendingEviction,
}

impl Score {
    /// Whether this score is strictly better than another one.
    ///
    /// Finite scores need to differ by more than the epsilon tolerance.
    #[must_use]
    pub fn is_better_than(self, other: Self, tolerances: &Tolerances) -> bool {
        match (self, other) {
            (Score::Finite(left), Score::Finite(right)) => tolerances.is_gt(left, right),
            _ => self.tag_order() > other.tag_order(),
        }
    }

    /// Whether the cut enters regardless of its quality.
    #[must_use]
    pub fn is_forced(self) -> bool {
        matches!(self, Score::Forced)
    }

    fn tag_order(self) -> u8 {
        match self {
            Score::PendingEviction => 0,
            Score::Finite(_) => 1,
            Score::Forced => 2,
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Score::Finite(left), Score::Finite(right)) => left.partial_cmp(right),
            _ => Some(self.tag_order().cmp(&other.tag_order())),
        }
    }
}

/// How a cut gets valued when it is submitted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Valuation {
    /// Enters unconditionally, its efficacy is not evaluated.
    Forced,
    /// Scored, `scorefactor * (efficacy + orthogonality_weight * orthogonality)`.
    Scored {
        /// Violation at the LP solution, normalized.
        efficacy: f64,
        /// Multiplier given by the separator.
        scorefactor: f64,
    },
}

/// A cut in the storage, together with the values that determine its rank.
#[derive(Clone, Debug)]
pub struct RankedCut<R> {
    /// The captured row.
    pub row: R,
    /// `None` when the cut was forced.
    pub efficacy: Option<f64>,
    /// Minimum orthogonality to the better cuts it was compared with, at most one.
    pub orthogonality: f64,
    /// Current rank, lowered as the cut is compared with better cuts.
    pub score: Score,
    /// Multiplier of the score, one for regular cuts.
    pub scorefactor: f64,
}

impl<R: Row> RankedCut<R> {
    /// Value a cut before comparing it with any other cut, with the maximal orthogonality.
    #[must_use]
    pub fn new(row: R, valuation: Valuation, settings: &SeparationSettings) -> Self {
        match valuation {
            Valuation::Forced => Self {
                row,
                efficacy: None,
                orthogonality: 1_f64,
                score: Score::Forced,
                scorefactor: 1_f64,
            },
            Valuation::Scored { efficacy, scorefactor } => Self {
                row,
                efficacy: Some(efficacy),
                orthogonality: 1_f64,
                score: Score::Finite(score(scorefactor, efficacy, 1_f64, settings)),
                scorefactor,
            },
        }
    }

    /// Lower the orthogonality of this cut after comparing it with a better cut.
    ///
    /// # Arguments
    ///
    /// * `orthogonality`: Orthogonality with respect to the better cut. Ignored if it is not lower
    /// than the current one.
    /// * `min_orthogonality`: Below this threshold, the cut gets marked for eviction.
    ///
    /// # Return value
    ///
    /// Whether the orthogonality was lowered.
    pub fn reduce_orthogonality(
        &mut self,
        orthogonality: f64,
        min_orthogonality: f64,
        settings: &SeparationSettings,
    ) -> bool {
        let efficacy = match (self.score, self.efficacy) {
            (Score::Finite(_), Some(efficacy)) => efficacy,
            _ => return false,
        };
        if orthogonality >= self.orthogonality {
            return false;
        }

        self.orthogonality = orthogonality;
        self.score = if settings.tolerances.is_lt(orthogonality, min_orthogonality) {
            Score::PendingEviction
        } else {
            Score::Finite(score(self.scorefactor, efficacy, orthogonality, settings))
        };

        true
    }
}

/// Combine efficacy and orthogonality into a score.
#[must_use]
pub fn score(scorefactor: f64, efficacy: f64, orthogonality: f64, settings: &SeparationSettings) -> f64 {
    scorefactor * (efficacy + settings.orthogonality_weight * orthogonality)
}

/// Violation of a row by a point, normalized by the norm of the row.
///
/// Zero if the point satisfies the row.
///
/// # Arguments
///
/// * `row`: Row to evaluate.
/// * `solution`: Point, usually the solution of the current LP relaxation.
/// * `settings`: Determines which norm is used.
#[must_use]
pub fn efficacy<R: Row>(row: &R, solution: &[f64], settings: &SeparationSettings) -> f64 {
    let activity = row.activity(solution);
    let violation = [
        row.lhs().map(|lhs| lhs - activity),
        row.rhs().map(|rhs| activity - rhs),
    ].into_iter()
        .flatten()
        .fold(0_f64, f64::max);
    let norm = row.norm_by(settings.efficacy_norm).max(settings.tolerances.epsilon);

    violation / norm
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::separation::score::{efficacy, RankedCut, Score, Valuation};
    use crate::algorithm::separation::settings::{EfficacyNorm, SeparationSettings};
    use crate::data::linear_algebra::vector::SparseVector;
    use crate::data::linear_program::row::Cut;
    use crate::data::number_types::tolerance::Tolerances;

    #[test]
    fn order() {
        let tolerances = Tolerances::default();

        assert!(Score::Forced.is_better_than(Score::Finite(1e30), &tolerances));
        assert!(!Score::Forced.is_better_than(Score::Forced, &tolerances));
        assert!(Score::Finite(-1_f64).is_better_than(Score::PendingEviction, &tolerances));
        assert!(!Score::PendingEviction.is_better_than(Score::PendingEviction, &tolerances));
        assert!(Score::Finite(2_f64).is_better_than(Score::Finite(1_f64), &tolerances));
        assert!(!Score::Finite(1_f64 + 1e-12).is_better_than(Score::Finite(1_f64), &tolerances));
        assert!(Score::Finite(1_f64) < Score::Forced);
        assert!(Score::PendingEviction < Score::Finite(-5_f64));
    }

    #[test]
    fn efficacy_by_norm() {
        let settings = SeparationSettings::default();
        // x_0 + x_1 <= 1 at (1, 1): violation 1, euclidean norm sqrt(2)
        let cut = Cut::new("e", SparseVector::new(vec![(0, 1_f64), (1, 1_f64)], 2), None, Some(1_f64)).into_ref();

        assert_relative_eq!(efficacy(&cut, &[1_f64, 1_f64], &settings), 1_f64 / 2_f64.sqrt());
        assert_relative_eq!(efficacy(&cut, &[0_f64, 0.5], &settings), 0_f64);

        let settings = SeparationSettings { efficacy_norm: EfficacyNorm::Sum, ..Default::default() };
        assert_relative_eq!(efficacy(&cut, &[1_f64, 1_f64], &settings), 0.5);
    }

    #[test]
    fn efficacy_lower_side() {
        let settings = SeparationSettings::default();
        let cut = Cut::new("l", SparseVector::new(vec![(0, 3_f64), (1, 4_f64)], 2), Some(10_f64), Some(20_f64))
            .into_ref();

        assert_relative_eq!(efficacy(&cut, &[0_f64, 0_f64], &settings), 2_f64);
        assert_relative_eq!(efficacy(&cut, &[4_f64, 4_f64], &settings), 1.6);
    }

    #[test]
    fn reduce_orthogonality() {
        let settings = SeparationSettings { orthogonality_weight: 0.5, ..Default::default() };
        let cut = Cut::new("r", SparseVector::new(vec![(0, 1_f64)], 1), None, Some(0_f64)).into_ref();

        let mut ranked = RankedCut::new(cut, Valuation::Scored { efficacy: 1_f64, scorefactor: 2_f64 }, &settings);
        assert_eq!(ranked.score, Score::Finite(3_f64));

        assert!(ranked.reduce_orthogonality(0.6, 0.5, &settings));
        assert_eq!(ranked.orthogonality, 0.6);
        assert!(matches!(ranked.score, Score::Finite(value) if (value - 2.6).abs() < 1e-12));

        assert!(!ranked.reduce_orthogonality(0.8, 0.5, &settings));
        assert_eq!(ranked.orthogonality, 0.6);

        assert!(ranked.reduce_orthogonality(0.1, 0.5, &settings));
        assert_eq!(ranked.score, Score::PendingEviction);
    }

    #[test]
    fn forced_keeps_orthogonality() {
        let settings = SeparationSettings::default();
        let cut = Cut::new("f", SparseVector::new(vec![(0, 1_f64)], 1), None, Some(0_f64)).into_ref();

        let mut ranked = RankedCut::new(cut, Valuation::Forced, &settings);
        assert!(!ranked.reduce_orthogonality(0_f64, 0.5, &settings));
        assert_eq!(ranked.orthogonality, 1_f64);
        assert!(ranked.score.is_forced());
        assert_eq!(ranked.efficacy, None);
    }
}
