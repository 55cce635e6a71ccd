//! Numerical tolerances for the gravity kernel.

use crate::error::{GravityError, GravityResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerances that resolve near-singular field points.
///
/// Both thresholds are absolute and substitute a limiting value rather
/// than failing:
///
/// - When `r1 + r2 - L` of an edge falls below `collinear_tolerance`, the
///   field point lies on the edge segment and the edge log term is taken
///   as zero.
/// - When the triple product of a face's displacement vectors falls below
///   `coplanar_tolerance`, the field point lies on the face's plane and the
///   numerator of the solid angle is forced to `-0.0`.
///
/// # Example
///
/// ```
/// use mesh_gravity::GravityParams;
///
/// let params = GravityParams::default();
/// assert!((params.collinear_tolerance - 1e-9).abs() < 1e-20);
///
/// let tight = GravityParams::default().collinear_tolerance(1e-12);
/// assert!(tight.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GravityParams {
    /// Threshold on `r1 + r2 - L` below which the edge log term is zero.
    pub collinear_tolerance: f64,

    /// Threshold on `|r1 · (r2 × r3)|` below which the face numerator is `-0.0`.
    pub coplanar_tolerance: f64,
}

impl Default for GravityParams {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityParams {
    /// Default tolerances (`1e-9` for both thresholds).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collinear_tolerance: 1e-9,
            coplanar_tolerance: 1e-9,
        }
    }

    /// Set the edge collinearity threshold.
    #[must_use]
    pub const fn collinear_tolerance(mut self, tolerance: f64) -> Self {
        self.collinear_tolerance = tolerance;
        self
    }

    /// Set the face coplanarity threshold.
    #[must_use]
    pub const fn coplanar_tolerance(mut self, tolerance: f64) -> Self {
        self.coplanar_tolerance = tolerance;
        self
    }

    /// Check that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`GravityError::InvalidParams`] naming the offending field.
    pub fn validate(&self) -> GravityResult<()> {
        for (name, value) in [
            ("collinear_tolerance", self.collinear_tolerance),
            ("coplanar_tolerance", self.coplanar_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GravityError::invalid_params(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
