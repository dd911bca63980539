//! Execution helper that runs an `argmin` solver on one augmented-Lagrangian
//! subproblem and returns a crate-friendly [`InnerSolve`].
use crate::optimization::{
    errors::SearchResult,
    nearest_point::{
        adapter::AugmentedProblem,
        traits::SolverOptions,
        types::{EvalCounts, Gradient, Point},
        validation::validate_solution,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};

/// Result of one inner unconstrained solve.
///
/// - `point`: best iterate found (validated finite).
/// - `iterations`: inner iterations performed.
/// - `fn_evals`: Argmin's function-evaluation counters for this solve.
#[derive(Debug, Clone)]
pub struct InnerSolve {
    pub point: Point,
    pub iterations: usize,
    pub fn_evals: EvalCounts,
}

/// Run an `argmin` L-BFGS solve of one augmented-Lagrangian subproblem.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the merit problem via [`AugmentedProblem`],
/// - the chosen solver (L-BFGS with Hager–Zhang or More–Thuente),
/// - the initial point `u0`,
/// - optional observers (behind the `obs_slog` feature),
/// - the inner iteration cap,
///   then executes the solver and validates the best iterate.
///
/// # Arguments
/// - `u0`: Initial point. It is **consumed** and set on the optimizer state
///   via `state.param(u0)`.
/// - `opts`: Solver options (verbosity; tolerances were already wired into
///   the solver by the builders).
/// - `problem`: An [`AugmentedProblem`] borrowing the standardized
///   constraint with the current multiplier and penalty.
/// - `solver`: A fully constructed solver from
///   [`build_inner_hager_zhang`](crate::optimization::nearest_point::builders::build_inner_hager_zhang)
///   or
///   [`build_inner_more_thuente`](crate::optimization::nearest_point::builders::build_inner_more_thuente).
/// - `max_iters`: Inner iteration cap for this subproblem.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a
/// terminal slog observer is attached with `ObserverMode::Always` and a
/// one-time pre-iteration line logs the merit at `u0`.
///
/// # Errors
/// - Propagates any `argmin` runtime error (observer failures, solver
///   errors, line-search failures) via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors for the best iterate.
pub fn run_inner_lbfgs<'a, S>(
    u0: Point, opts: &SolverOptions, problem: AugmentedProblem<'a>, solver: S, max_iters: u64,
) -> SearchResult<InnerSolve>
where
    S: argmin::core::Solver<
            AugmentedProblem<'a>,
            argmin::core::IterState<Point, Gradient, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&u0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(u0).max_iters(max_iters));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    #[cfg(not(feature = "obs_slog"))]
    let _ = opts;

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter() as usize;
    let fn_evals = result.get_func_counts().clone();
    let point = validate_solution(result.take_best_param())?;
    Ok(InnerSolve { point, iterations, fn_evals })
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state(u0: &Point, problem: &AugmentedProblem<'_>) -> SearchResult<()> {
    let merit0 = problem.cost(u0)?;
    eprintln!("inner solve: L(u0) = {:.6} (lambda = {:.4})", merit0, problem.multiplier);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::SearchResult as SR,
        nearest_point::{
            builders::build_inner_more_thuente,
            traits::{EqualityConstraint, SolverOptions},
            types::Gradient,
        },
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - A full inner solve on a trivial merit problem with a loose
    //   penalty, verifying the returned point and counters.
    //
    // They intentionally DO NOT cover:
    // - Outer multiplier updates (see the augmented solver tests).
    // -------------------------------------------------------------------------

    /// Plane `h(u) = u₀ − 1`, for which the augmented merit has an interior
    /// minimum the inner solver can find unconstrained.
    struct Plane;

    impl EqualityConstraint for Plane {
        fn dim(&self) -> usize {
            2
        }

        fn value(&self, u: &Point) -> SR<f64> {
            Ok(u[0] - 1.0)
        }

        fn gradient(&self, _u: &Point) -> SR<Gradient> {
            Ok(array![1.0, 0.0])
        }

        fn evaluations(&self) -> u64 {
            0
        }

        fn gradient_evaluations(&self) -> u64 {
            0
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that one inner solve of `½‖u‖² + μ/2 (u₀ − 1)²` moves toward
    // the analytic minimizer `u₀ = μ/(1 + μ)`, `u₁ = 0`.
    //
    // Given
    // -----
    // - The plane constraint, λ = 0, μ = 100, starting at (0.5, 0.5).
    //
    // Expect
    // ------
    // - The returned point is within 1e-3 of (100/101, 0).
    fn inner_solve_reaches_analytic_minimizer() {
        // Arrange
        let plane = Plane;
        let opts = SolverOptions::default();
        let problem = AugmentedProblem { constraint: &plane, multiplier: 0.0, penalty: 100.0 };
        let solver = build_inner_more_thuente(&opts).expect("builder should succeed");

        // Act
        let inner = run_inner_lbfgs(array![0.5, 0.5], &opts, problem, solver, 200)
            .expect("inner solve should succeed");

        // Assert
        let expected = 100.0 / 101.0;
        assert!(
            (inner.point[0] - expected).abs() < 1e-3,
            "u0 = {}, expected ≈ {expected}",
            inner.point[0]
        );
        assert!(inner.point[1].abs() < 1e-3, "u1 = {}", inner.point[1]);
        assert!(inner.iterations > 0);
    }
}
