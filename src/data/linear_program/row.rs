//! # Rows
//!
//! A row is a sparse linear inequality `lhs <= a^T x + c <= rhs`. Cut generators create rows, the
//! separation storage decides which of them enter the LP relaxation.
//!
//! The storage never changes the coefficients of a row. It only holds on to rows (capturing them)
//! and lets go of them (releasing them). This is modelled with `Clone` and `Drop`: a row handle is
//! cheap to clone and all clones refer to the same row.
use std::cell::Cell;
use std::fmt;
use std::fmt::Display;
use std::rc::Rc;

use crate::algorithm::separation::settings::EfficacyNorm;
use crate::data::linear_algebra::vector::SparseVector;
use crate::data::linear_program::domain::Domains;
use crate::data::linear_program::elements::BoundDirection;

/// Everything the separation storage needs to know about a row.
///
/// Cloning a row captures it, dropping a clone releases it.
pub trait Row: Clone {
    /// Name, used for logging only.
    fn name(&self) -> &str;
    /// Left-hand side, `None` if it is minus infinity.
    fn lhs(&self) -> Option<f64>;
    /// Right-hand side, `None` if it is infinity.
    fn rhs(&self) -> Option<f64>;
    /// Constant term `c` of the row activity `a^T x + c`.
    fn constant(&self) -> f64;
    /// Coefficients `a` of the row activity.
    fn coefficients(&self) -> &SparseVector<f64>;
    /// Euclidean norm of the coefficient vector, cached.
    fn norm(&self) -> f64;
    /// Whether the coefficient set is not yet final, for example because columns may still be
    /// priced in.
    fn is_modifiable(&self) -> bool;
    /// Whether the row is currently part of the LP relaxation.
    fn is_in_lp(&self) -> bool;

    /// Number of nonzero coefficients.
    fn nr_nonzeros(&self) -> usize {
        self.coefficients().nr_nonzeros()
    }

    /// The value of `a^T x + c` at a point.
    fn activity(&self, solution: &[f64]) -> f64 {
        self.coefficients().inner_product_with_dense(solution) + self.constant()
    }

    /// Smallest value the linear part `a^T x` can attain within the domains.
    ///
    /// # Return value
    ///
    /// `None` if the linear part is unbounded from below.
    fn min_activity(&self, domains: &Domains) -> Option<f64> {
        activity_bound(self.coefficients(), domains, BoundDirection::Lower)
    }

    /// Largest value the linear part `a^T x` can attain within the domains.
    ///
    /// # Return value
    ///
    /// `None` if the linear part is unbounded from above.
    fn max_activity(&self, domains: &Domains) -> Option<f64> {
        activity_bound(self.coefficients(), domains, BoundDirection::Upper)
    }

    /// Norm of the coefficient vector used to normalize violations.
    fn norm_by(&self, norm: EfficacyNorm) -> f64 {
        match norm {
            EfficacyNorm::Euclidean => self.norm(),
            EfficacyNorm::Maximum => self.coefficients().max_norm(),
            EfficacyNorm::Sum => self.coefficients().sum_norm(),
            EfficacyNorm::Discrete => self.nr_nonzeros() as f64,
        }
    }

    /// Dissimilarity of the directions of two rows: `1 - |cos(angle)|`.
    ///
    /// Close to zero for (anti)parallel rows, one for orthogonal rows. Rows without coefficients
    /// are orthogonal to everything.
    fn orthogonality(&self, other: &Self) -> f64 {
        let norms = self.norm() * other.norm();
        if norms <= 0_f64 {
            return 1_f64;
        }

        let cosine = self.coefficients().inner_product(other.coefficients()) / norms;
        (1_f64 - cosine.abs()).max(0_f64)
    }
}

/// Bound on the linear part of a row using the bounds of its variables.
///
/// Interval arithmetic: a positive coefficient takes the bound of the variable in the same
/// direction, a negative coefficient the opposite one.
fn activity_bound(
    coefficients: &SparseVector<f64>,
    domains: &Domains,
    direction: BoundDirection,
) -> Option<f64> {
    coefficients.iter()
        .map(|&(variable, coefficient)| {
            domains[variable].bound(direction.through_coefficient(coefficient))
                .map(|bound| coefficient * bound)
        })
        .sum()
}

/// A row as produced by a cut generator.
#[derive(Debug)]
pub struct Cut {
    name: String,
    coefficients: SparseVector<f64>,
    constant: f64,
    lhs: Option<f64>,
    rhs: Option<f64>,
    norm: f64,
    modifiable: bool,

    /// Index in the LP relaxation, if it was added to it.
    lp_position: Cell<Option<usize>>,
}

/// Shared handle to a cut.
pub type CutRef = Rc<Cut>;

impl Cut {
    /// Create a new cut `lhs <= a^T x <= rhs`.
    ///
    /// # Arguments
    ///
    /// * `name`: Human readable name, used in logging.
    /// * `coefficients`: The vector `a`.
    /// * `lhs`: Left-hand side, `None` if minus infinity.
    /// * `rhs`: Right-hand side, `None` if infinity.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        coefficients: SparseVector<f64>,
        lhs: Option<f64>,
        rhs: Option<f64>,
    ) -> Self {
        let norm = coefficients.norm();

        Self {
            name: name.into(),
            coefficients,
            constant: 0_f64,
            lhs,
            rhs,
            norm,
            modifiable: false,
            lp_position: Cell::new(None),
        }
    }

    /// Set the constant term of the activity.
    #[must_use]
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Mark the coefficients as not yet final.
    #[must_use]
    pub fn modifiable(mut self) -> Self {
        self.modifiable = true;
        self
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> CutRef {
        Rc::new(self)
    }

    /// Index of this row in the LP relaxation.
    #[must_use]
    pub fn lp_position(&self) -> Option<usize> {
        self.lp_position.get()
    }

    pub(crate) fn set_lp_position(&self, position: Option<usize>) {
        self.lp_position.set(position);
    }
}

impl Row for CutRef {
    fn name(&self) -> &str {
        &self.name
    }

    fn lhs(&self) -> Option<f64> {
        self.lhs
    }

    fn rhs(&self) -> Option<f64> {
        self.rhs
    }

    fn constant(&self) -> f64 {
        self.constant
    }

    fn coefficients(&self) -> &SparseVector<f64> {
        &self.coefficients
    }

    fn norm(&self) -> f64 {
        self.norm
    }

    fn is_modifiable(&self) -> bool {
        self.modifiable
    }

    fn is_in_lp(&self) -> bool {
        self.lp_position.get().is_some()
    }
}

impl Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        if let Some(lhs) = self.lhs {
            write!(f, "{} <= ", lhs)?;
        }
        write!(f, "{}", self.coefficients)?;
        if self.constant != 0_f64 {
            write!(f, " + {}", self.constant)?;
        }
        if let Some(rhs) = self.rhs {
            write!(f, " <= {}", rhs)?;
        }

        Ok(())
    }
}
