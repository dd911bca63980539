//! nearest_point::finite_diff — finite-difference gradient and Hessian
//! helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient and Hessian approximations around a
//! standard-space point, together with validation and symmetry cleanup, so
//! that the rest of the search and the curvature layer can request
//! derivatives without depending directly on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - Compute forward-difference gradients with error capture and post-hoc
//!   validation via [`run_fd_gradient`].
//! - Construct central-difference constraint Hessians, falling back to
//!   forward differences when validation fails, via
//!   [`constraint_hessian`].
//! - Enforce symmetry of Hessian matrices in-place using
//!   [`symmetrize_hessian`] to prepare them for the eigendecomposition in
//!   the curvature layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the constraint during finite differencing is
//!   routed into the shared `closure_err` cell and treated as a hard
//!   failure for the derivative computation.
//! - Gradients and Hessians returned from this module satisfy
//!   [`validate_gradient`] / [`validate_hessian`] on the chosen
//!   finite-difference path.
//!
//! Conventions
//! -----------
//! - Central differences are preferred; forward differences are used only
//!   as a fallback when the central approximation fails validation.
//! - Errors are surfaced as [`SearchError`] via `SearchResult<T>`.
use crate::optimization::{
    errors::{SearchError, SearchResult},
    nearest_point::{
        traits::EqualityConstraint,
        types::{Gradient, Hessian, Point},
        validation::{validate_gradient, validate_hessian},
    },
};
use finitediff::FiniteDiff;
use ndarray::Array1;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// The FD closure can't return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`. This helper:
/// - clears `closure_err`,
/// - performs `forward_diff`,
/// - if an error was captured, returns it as `Err`,
/// - validates the resulting gradient,
/// - if validation succeeds, returns the gradient as `Ok(gradient)`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD
/// routine or by validation of the resulting gradient.
pub fn run_fd_gradient<G: Fn(&Point) -> f64>(
    u: &Point, func: &G, closure_err: &RefCell<Option<SearchError>>,
) -> SearchResult<Gradient> {
    closure_err.replace(None);
    let fd_gradient = u.forward_diff(func);
    let dim = u.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_gradient(&fd_gradient, dim)?;
    Ok(fd_gradient)
}

/// Finite-difference Hessian of the standardized constraint at `u`.
///
/// Differentiates `constraint.gradient` numerically, preferring a
/// central-difference scheme and falling back to forward differences when
/// validation fails. The resulting matrix is symmetrized in-place before
/// being returned. Errors raised by the constraint gradient inside the FD
/// closures are captured and surfaced instead of NaN propagation.
///
/// # Errors
/// - Any [`SearchError`] raised by `constraint.gradient` during the sweep.
/// - [`SearchError::HessianDimMismatch`] / [`SearchError::InvalidHessian`]
///   when both difference schemes fail validation.
pub fn constraint_hessian(
    constraint: &dyn EqualityConstraint, u: &Point,
) -> SearchResult<Hessian> {
    let dim = u.len();
    let closure_err: RefCell<Option<SearchError>> = RefCell::new(None);
    let grad_fn = |point: &Point| -> Gradient {
        match constraint.gradient(point) {
            Ok(g) => g,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                Array1::from_elem(dim, f64::NAN)
            }
        }
    };

    let mut central = u.central_hessian(&grad_fn);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    match validate_hessian(&central, dim) {
        Ok(()) => {
            symmetrize_hessian(&mut central);
            Ok(central)
        }
        Err(_) => {
            let mut forward = u.forward_hessian(&grad_fn);
            if let Some(err) = closure_err.take() {
                return Err(err);
            }
            validate_hessian(&forward, dim)?;
            symmetrize_hessian(&mut forward);
            Ok(forward)
        }
    }
}

// ---- Helper methods ----

/// Enforce symmetry of a Hessian matrix in-place.
///
/// Replaces each off-diagonal pair `(i, j)` / `(j, i)` with their average;
/// the diagonal is left untouched. Called only after a Hessian has passed
/// [`validate_hessian`], so it performs no finiteness or shape checks of
/// its own.
pub(crate) fn symmetrize_hessian(hessian: &mut Hessian) {
    for i in 0..hessian.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hessian[[i, j]] + hessian[[j, i]]);
            hessian[[i, j]] = avg;
            hessian[[j, i]] = avg;
        }
    }
}
