//! The standard-space transform capability and its identity implementation.
//!
//! Convention: `to_standard` maps a physical point `x` to the standardized
//! point `u` in a space of independent standard-normal coordinates;
//! `to_physical` is its inverse on the domain of interest. `jacobian`
//! returns `∂u/∂x` evaluated at a *physical* point. The crate does not
//! verify bijectivity; evaluation failures surface as
//! [`TransformError`](crate::transform::errors::TransformError) values.
use crate::transform::errors::{TransformError, TransformResult};
use ndarray::{Array1, Array2};

/// Bidirectional mapping between the physical random vector space and a
/// standardized space of independent standard-normal variables.
///
/// Required:
/// - `dim()`: dimension of both spaces.
/// - `to_standard(x) -> u`: forward map. Must reject saturated or
///   non-finite inputs with a descriptive error rather than returning
///   infinities.
/// - `to_physical(u) -> x`: inverse map.
/// - `jacobian(x) -> ∂u/∂x`: forward-map Jacobian at a physical point,
///   used to chain analytic performance-function gradients into standard
///   space.
pub trait StandardSpaceTransform {
    fn dim(&self) -> usize;
    fn to_standard(&self, x: &Array1<f64>) -> TransformResult<Array1<f64>>;
    fn to_physical(&self, u: &Array1<f64>) -> TransformResult<Array1<f64>>;
    fn jacobian(&self, x: &Array1<f64>) -> TransformResult<Array2<f64>>;
}

/// Identity transform for inputs already expressed as independent standard
/// normals.
///
/// Models formulated directly in standard space (and most unit tests) use
/// this transform; `to_standard` and `to_physical` only validate shape and
/// finiteness, and the Jacobian is the identity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardNormalTransform {
    dim: usize,
}

impl StandardNormalTransform {
    /// Create an identity transform of the given dimension.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl StandardSpaceTransform for StandardNormalTransform {
    fn dim(&self) -> usize {
        self.dim
    }

    fn to_standard(&self, x: &Array1<f64>) -> TransformResult<Array1<f64>> {
        check_point(x, self.dim)?;
        Ok(x.clone())
    }

    fn to_physical(&self, u: &Array1<f64>) -> TransformResult<Array1<f64>> {
        check_point(u, self.dim)?;
        Ok(u.clone())
    }

    fn jacobian(&self, x: &Array1<f64>) -> TransformResult<Array2<f64>> {
        check_point(x, self.dim)?;
        Ok(Array2::eye(self.dim))
    }
}

/// Validate length and finiteness of a point before mapping it.
///
/// # Errors
/// - [`TransformError::DimensionMismatch`] on a length mismatch.
/// - [`TransformError::NonFiniteCoordinate`] with the first offending entry.
pub(crate) fn check_point(point: &Array1<f64>, dim: usize) -> TransformResult<()> {
    if point.len() != dim {
        return Err(TransformError::DimensionMismatch { expected: dim, found: point.len() });
    }
    for (index, &value) in point.iter().enumerate() {
        if !value.is_finite() {
            return Err(TransformError::NonFiniteCoordinate { index, value });
        }
    }
    Ok(())
}
