//! nearest_point::hlrf — improved Hasofer–Lind–Rackwitz–Fiessler solver.
//!
//! Purpose
//! -------
//! Implement the classical special-purpose iteration for the nearest-point
//! problem: linearize the constraint at the current iterate and jump to the
//! closest point of the linearized boundary,
//! `u⁺ = [(∇h·u − h)/‖∇h‖²]·∇h`, safeguarded by a backtracking line search
//! on the non-smooth merit `m(u) = ½‖u‖² + c·|h(u)|`. For well-behaved
//! limit states this converges in a handful of iterations and needs one
//! value and one gradient evaluation per step.
//!
//! Key behaviors
//! -------------
//! - Declare convergence only when the constraint residual **and** the
//!   KKT alignment residual (the component of `u` orthogonal to `∇h`) are
//!   below their tolerances.
//! - Accept a damped step when the full HLRF step increases the merit;
//!   after a bounded number of halvings the most-damped candidate is
//!   taken regardless, so the iteration cannot stall at a rejected step.
//! - Report budget exhaustion through `SolverOutcome::converged = false`
//!   with the last iterate, never as a fabricated success.
//!
//! Invariants & assumptions
//! ------------------------
//! - The constraint gradient is nonzero along the iteration path; a
//!   numerically zero gradient terminates the run as non-converged since
//!   the linearization is undefined there.
//! - Constraint magnitudes are judged relative to the starting residual,
//!   so events with large raw `g` scales converge under the same
//!   tolerances as normalized ones.
use crate::optimization::{
    errors::SearchResult,
    nearest_point::{
        traits::{EqualityConstraint, NearestPointSolver, SolverOptions, SolverOutcome},
        types::{EvalCounts, Point},
        validation::validate_gradient,
    },
};

/// Multiplier floor keeping the merit penalty dominant over `‖u‖/‖∇h‖`.
const MERIT_PENALTY_MARGIN: f64 = 10.0;

/// Maximum number of step halvings before accepting the raw HLRF step.
const MAX_BACKTRACKS: usize = 6;

/// Improved HLRF iteration with a backtracking merit safeguard.
#[derive(Debug, Clone, Copy, Default)]
pub struct HlrfSolver;

impl HlrfSolver {
    pub fn new() -> Self {
        Self
    }
}

impl NearestPointSolver for HlrfSolver {
    /// Run the iteration from `start` until convergence or budget
    /// exhaustion.
    ///
    /// # Errors
    /// - Propagates constraint evaluation failures (`Transform`, user
    ///   errors, non-finite values).
    /// - Returns gradient validation errors from the constraint.
    fn minimize(
        &self, constraint: &dyn EqualityConstraint, start: &Point, opts: &SolverOptions,
    ) -> SearchResult<SolverOutcome> {
        let dim = constraint.dim();
        let mut u = start.clone();
        let mut h = constraint.value(&u)?;
        let h_scale = h.abs().max(1.0);

        let mut constraint_residual = h.abs();
        let mut gradient_residual = f64::INFINITY;
        let mut iterations = 0usize;
        let mut converged = false;
        let mut status = format!("Maximum iterations ({}) reached", opts.max_iterations);

        for iteration in 0..opts.max_iterations {
            iterations = iteration + 1;

            let gradient = constraint.gradient(&u)?;
            validate_gradient(&gradient, dim)?;
            let grad_norm_sq = gradient.dot(&gradient);
            let grad_norm = grad_norm_sq.sqrt();
            if grad_norm <= f64::EPSILON {
                status = "Zero constraint gradient".to_string();
                break;
            }

            // KKT alignment: component of u orthogonal to the normal.
            let projection = u.dot(&gradient) / grad_norm;
            let tangential = &u - &(&gradient * (projection / grad_norm));
            gradient_residual = tangential.dot(&tangential).sqrt();
            constraint_residual = h.abs();

            let u_norm = u.dot(&u).sqrt();
            if constraint_residual <= opts.tols.constraint * h_scale
                && gradient_residual <= opts.tols.residual * u_norm.max(1.0)
            {
                converged = true;
                status = "Constraint and optimality residuals within tolerance".to_string();
                break;
            }

            // Full HLRF step: nearest point of the linearized boundary.
            let target = &gradient * ((gradient.dot(&u) - h) / grad_norm_sq);
            let direction = &target - &u;

            // Backtracking on the merit m(v) = ½‖v‖² + c|h(v)|.
            let penalty = u_norm / grad_norm + MERIT_PENALTY_MARGIN;
            let merit_current = 0.5 * u.dot(&u) + penalty * h.abs();
            let mut step = 1.0;
            let mut candidate = target.clone();
            let mut h_candidate = constraint.value(&candidate)?;
            for _ in 0..MAX_BACKTRACKS {
                let merit_candidate =
                    0.5 * candidate.dot(&candidate) + penalty * h_candidate.abs();
                if merit_candidate < merit_current {
                    break;
                }
                step *= 0.5;
                candidate = &u + &(&direction * step);
                h_candidate = constraint.value(&candidate)?;
            }

            let step_norm = (&candidate - &u).dot(&(&candidate - &u)).sqrt();
            u = candidate;
            h = h_candidate;

            if step_norm <= opts.tols.absolute + opts.tols.relative * u_norm
                && h.abs() <= opts.tols.constraint * h_scale
            {
                constraint_residual = h.abs();
                converged = true;
                status = "Step size below tolerance on the constraint surface".to_string();
                break;
            }

            if let Some(max_evals) = opts.max_evaluations {
                if constraint.evaluations() >= max_evals as u64 {
                    status = format!("Maximum evaluations ({max_evals}) reached");
                    break;
                }
            }
        }

        let mut fn_evals = EvalCounts::new();
        fn_evals.insert("constraint_count".to_string(), constraint.evaluations());
        fn_evals.insert("gradient_count".to_string(), constraint.gradient_evaluations());

        SolverOutcome::new(
            Some(u),
            converged,
            status,
            iterations,
            constraint_residual,
            gradient_residual,
            fn_evals,
        )
    }
}
