//! Input validation for the geometric design-point tests.
//!
//! Centralizes the level checks shared by the test entry points so the
//! test modules can assume validated inputs. All helpers return
//! [`GeoTestError`] values instead of panicking.
use crate::geometric_tests::errors::{GeoTestError, GeoTestResult};

/// Validate a probability level that must lie strictly inside (0, 1).
///
/// # Errors
/// Returns the supplied constructor with the offending value when the
/// level is non-finite or outside the open unit interval.
pub fn validate_open_unit_level(
    level: f64, as_error: fn(f64) -> GeoTestError,
) -> GeoTestResult<()> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(as_error(level));
    }
    Ok(())
}

/// Validate the accuracy (radius-enlargement) level.
///
/// Zero is allowed — the test then samples the β-sphere itself.
///
/// # Errors
/// Returns [`GeoTestError::InvalidAccuracyLevel`] when the level is
/// negative or non-finite.
pub fn validate_accuracy_level(level: f64) -> GeoTestResult<()> {
    if !level.is_finite() || level < 0.0 {
        return Err(GeoTestError::InvalidAccuracyLevel(level));
    }
    Ok(())
}
