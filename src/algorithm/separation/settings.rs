//! # Separation settings
//!
//! Passed by reference into every scoring, insertion and commit call.
use crate::data::number_types::tolerance::Tolerances;

/// Norm used to normalize the violation of a cut into its efficacy.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum EfficacyNorm {
    /// Square root of the sum of squared coefficients.
    #[default]
    Euclidean,
    /// Largest absolute coefficient.
    Maximum,
    /// Sum of absolute coefficients.
    Sum,
    /// Number of nonzero coefficients.
    Discrete,
}

/// Parameters of the cut selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SeparationSettings {
    /// Maximum number of cuts stored in a separation round at a node other than the root.
    pub max_cuts: usize,
    /// Maximum number of cuts stored in a separation round at the root node.
    pub max_cuts_root: usize,
    /// Minimal orthogonality of a cut to all better cuts, at a node other than the root.
    pub min_orthogonality: f64,
    /// Minimal orthogonality of a cut to all better cuts, at the root node.
    pub min_orthogonality_root: f64,
    /// Weight of the orthogonality relative to the efficacy in the score of a cut.
    pub orthogonality_weight: f64,
    /// Norm the violation is divided by.
    pub efficacy_norm: EfficacyNorm,
    /// Also holds the value from which on numbers are considered infinite.
    pub tolerances: Tolerances,
}

impl Default for SeparationSettings {
    fn default() -> Self {
        Self {
            max_cuts: 100,
            max_cuts_root: 2000,
            min_orthogonality: 0.5,
            min_orthogonality_root: 0.5,
            orthogonality_weight: 1_f64,
            efficacy_norm: EfficacyNorm::default(),
            tolerances: Tolerances::default(),
        }
    }
}

impl SeparationSettings {
    /// Per round capacity of the storage.
    #[must_use]
    pub fn capacity(&self, at_root: bool) -> usize {
        if at_root {
            self.max_cuts_root
        } else {
            self.max_cuts
        }
    }

    /// Minimal orthogonality at the root or below it.
    #[must_use]
    pub fn min_orthogonality(&self, at_root: bool) -> f64 {
        if at_root {
            self.min_orthogonality_root
        } else {
            self.min_orthogonality
        }
    }
}
