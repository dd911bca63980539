//! Validation helpers for the design-point search.
//!
//! This module centralizes common consistency checks used across the
//! search interface:
//!
//! - **Tolerance checks**: [`verify_tolerance`] ensures numeric tolerances
//!   are finite and strictly positive.
//! - **Gradient validation**: [`validate_gradient`] enforces correct
//!   dimension and finite entries.
//! - **Solution points**: [`validate_solution`] ensures a candidate optimum
//!   exists and contains only finite values.
//! - **Constraint values**: [`validate_constraint_value`] checks limit-state
//!   outputs for finiteness.
//! - **Hessians**: [`validate_hessian`] checks shape and finiteness of
//!   second-order information.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`SearchError`] variants, making higher-level code more uniform and
//! easier to debug.
use crate::optimization::{
    errors::{SearchError, SearchResult},
    nearest_point::types::{Gradient, Hessian, Point},
};

/// Validate a named tolerance value.
///
/// The value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`SearchError::InvalidTolerance`] carrying the tolerance name if
/// the value is non-finite or ≤ 0.0.
pub fn verify_tolerance(name: &'static str, value: f64) -> SearchResult<()> {
    if !value.is_finite() {
        return Err(SearchError::InvalidTolerance {
            name,
            value,
            reason: "Tolerance must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(SearchError::InvalidTolerance {
            name,
            value,
            reason: "Tolerance must be positive.",
        });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `gradient.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`SearchError::GradientDimMismatch`] if length does not match `dim`.
/// - [`SearchError::InvalidGradient`] with the index/value/reason of the
///   first offending element.
pub fn validate_gradient(gradient: &Gradient, dim: usize) -> SearchResult<()> {
    if gradient.len() != dim {
        return Err(SearchError::GradientDimMismatch { expected: dim, found: gradient.len() });
    }
    for (index, &value) in gradient.iter().enumerate() {
        if !value.is_finite() {
            return Err(SearchError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap a candidate solution point.
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Returns
/// The owned `Point` if valid.
///
/// # Errors
/// - [`SearchError::MissingSolution`] if no vector was provided.
/// - [`SearchError::InvalidSolution`] if any element is non-finite.
pub fn validate_solution(point: Option<Point>) -> SearchResult<Point> {
    match point {
        Some(p) => {
            for (index, &value) in p.iter().enumerate() {
                if !value.is_finite() {
                    return Err(SearchError::InvalidSolution {
                        index,
                        value,
                        reason: "Solution entries must be finite.",
                    });
                }
            }
            Ok(p)
        }
        None => Err(SearchError::MissingSolution),
    }
}

/// Validate that a scalar limit-state value is finite.
///
/// Negative values are fine as long as they are finite; the sign carries
/// the failure-domain information.
///
/// # Errors
/// Returns [`SearchError::NonFiniteConstraint`] if the value is `NaN` or
/// infinite.
pub fn validate_constraint_value(value: f64) -> SearchResult<()> {
    if !value.is_finite() {
        return Err(SearchError::NonFiniteConstraint { value });
    }
    Ok(())
}

/// Validate the shape and entries of a Hessian matrix.
///
/// # Checks
/// 1. Matrix dimensions must equal `dim × dim`.
/// 2. All entries must be finite (no NaN or ±∞).
///
/// # Errors
/// - [`SearchError::HessianDimMismatch`] if dimensions do not match `dim`.
/// - [`SearchError::InvalidHessian`] if any entry is non-finite, with
///   offending row/col indices and value.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> SearchResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(SearchError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(SearchError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}
