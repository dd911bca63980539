//! High-level entry point for the design-point search.
//!
//! This maps the caller's starting point into standard space, wraps the
//! event and transform in a `StandardConstraint`, delegates the constrained
//! minimization to the supplied [`NearestPointSolver`], and packages the
//! result as an immutable [`DesignPoint`] plus the explicit
//! [`EvaluationTrace`] of every constraint evaluation the search performed.
use crate::optimization::{
    errors::{SearchError, SearchResult},
    nearest_point::{
        adapter::StandardConstraint,
        traits::{EqualityConstraint, NearestPointSolver, PerformanceFunction, SolverOptions},
        types::Point,
    },
};
use crate::reliability::{
    design_point::{ConvergenceDiagnostics, DesignPoint, EvaluationTrace},
    event::Event,
};
use crate::transform::traits::StandardSpaceTransform;
use ndarray::Array1;

/// Locate the design point of `event` under `transform`.
///
/// # Behavior
/// - Validates the physical starting point via `event.function().check`.
/// - Maps the starting point into standard space.
/// - Builds the standardized constraint `h(u)` and runs
///   `solver.minimize(..)`.
/// - Treats any non-converged outcome as fatal: a
///   [`SearchError::ConvergenceFailure`] carrying the last iterate and its
///   residuals is returned, never a fallback point.
/// - Maps the optimum back to physical space, probes `h` at the origin to
///   fix the `origin_in_failure_domain` flag, and returns the design point
///   together with the drained evaluation trace.
///
/// # Parameters
/// - `event`: Failure event over the caller's performance function.
/// - `transform`: Standard-space transform for the input distribution.
/// - `solver`: Any [`NearestPointSolver`]; accepted unsized so trait
///   objects work (`&dyn NearestPointSolver`).
/// - `start_physical`: Starting point in physical coordinates, typically
///   the input distribution's mean. Must lie in the function's domain.
/// - `opts`: Solver options (tolerances, budgets, line search).
///
/// # Errors
/// - Propagates `check` failures and transform domain errors.
/// - [`SearchError::ConvergenceFailure`] when the solver's success flag is
///   not set.
/// - Propagates constraint evaluation failures from the origin probe.
pub fn find_design_point<F, T, S>(
    event: &Event<'_, F>, transform: &T, solver: &S, start_physical: &Point,
    opts: &SolverOptions,
) -> SearchResult<(DesignPoint, EvaluationTrace)>
where
    F: PerformanceFunction,
    T: StandardSpaceTransform,
    S: NearestPointSolver + ?Sized,
{
    event.function().check(start_physical)?;
    let u0 = transform.to_standard(start_physical)?;
    let constraint = StandardConstraint::new(event, transform);

    let outcome = solver.minimize(&constraint, &u0, opts)?;
    if !outcome.converged {
        return Err(SearchError::ConvergenceFailure {
            iterations: outcome.iterations,
            constraint_residual: outcome.constraint_residual,
            gradient_residual: outcome.gradient_residual,
            last_point: outcome.point,
        });
    }

    let physical = transform.to_physical(&outcome.point)?;
    let origin = Array1::zeros(constraint.dim());
    let origin_in_failure_domain = constraint.value(&origin)? < 0.0;

    let diagnostics = ConvergenceDiagnostics {
        iterations: outcome.iterations,
        constraint_residual: outcome.constraint_residual,
        gradient_residual: outcome.gradient_residual,
    };
    let trace = constraint.take_trace();
    let design_point =
        DesignPoint::new(outcome.point, physical, origin_in_failure_domain, diagnostics)?;
    Ok((design_point, trace))
}
