//! nearest_point::augmented — augmented-Lagrangian nearest-point solver.
//!
//! Purpose
//! -------
//! Solve `min ½‖u‖² s.t. h(u) = 0` through the classical multiplier method:
//! each outer iteration minimizes the smooth merit
//! `L(u) = ½‖u‖² + λh(u) + ½μh(u)²` with an `argmin` L-BFGS run (line
//! search per [`SolverOptions::line_searcher`]), then updates the
//! multiplier `λ ← λ + μh` and escalates the penalty when the constraint
//! residual has not dropped enough. Unlike HLRF this requires no
//! constraint-specific step formula, at the cost of more function
//! evaluations per outer iteration.
//!
//! Key behaviors
//! -------------
//! - Converge on the same two criteria as HLRF: constraint residual
//!   relative to the starting magnitude, and the KKT stationarity residual
//!   `‖u + (λ + μh)∇h‖`.
//! - Accumulate the inner solver's function-evaluation counters across
//!   outer iterations and merge them with the constraint's pass-through
//!   counters.
//! - Report outer-budget exhaustion as `converged = false` with the last
//!   iterate; hard inner-solver failures propagate as errors.
use crate::optimization::{
    errors::{SearchError, SearchResult},
    nearest_point::{
        adapter::AugmentedProblem,
        builders::{build_inner_hager_zhang, build_inner_more_thuente},
        run::{run_inner_lbfgs, InnerSolve},
        traits::{
            EqualityConstraint, LineSearcher, NearestPointSolver, SolverOptions, SolverOutcome,
        },
        types::{EvalCounts, Point},
    },
};

/// Initial quadratic-penalty weight.
const INITIAL_PENALTY: f64 = 10.0;

/// Penalty escalation factor applied when the constraint residual does not
/// shrink by `RESIDUAL_DECREASE` between outer iterations.
const PENALTY_GROWTH: f64 = 4.0;

/// Required per-iteration constraint-residual decrease ratio.
const RESIDUAL_DECREASE: f64 = 0.25;

/// Multiplier-method solver with `argmin` L-BFGS inner solves.
#[derive(Debug, Clone, Copy)]
pub struct AugmentedLagrangianSolver {
    max_outer: usize,
}

impl AugmentedLagrangianSolver {
    /// Create a solver with an explicit outer-iteration budget.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidMaxIterations`] when `max_outer == 0`.
    pub fn new(max_outer: usize) -> SearchResult<Self> {
        if max_outer == 0 {
            return Err(SearchError::InvalidMaxIterations {
                max_iterations: max_outer,
                reason: "Outer iteration budget must be greater than zero.",
            });
        }
        Ok(Self { max_outer })
    }
}

impl Default for AugmentedLagrangianSolver {
    fn default() -> Self {
        Self { max_outer: 20 }
    }
}

impl NearestPointSolver for AugmentedLagrangianSolver {
    /// Run the multiplier method from `start`.
    ///
    /// The inner iteration cap per subproblem is `opts.max_iterations`;
    /// `iterations` on the outcome counts **outer** multiplier updates.
    ///
    /// # Errors
    /// - Propagates constraint evaluation failures and inner `argmin`
    ///   runtime errors.
    fn minimize(
        &self, constraint: &dyn EqualityConstraint, start: &Point, opts: &SolverOptions,
    ) -> SearchResult<SolverOutcome> {
        let mut u = start.clone();
        let mut multiplier = 0.0;
        let mut penalty = INITIAL_PENALTY;

        let mut h = constraint.value(&u)?;
        let h_scale = h.abs().max(1.0);
        let mut prev_residual = h.abs();

        let mut constraint_residual = h.abs();
        let mut gradient_residual = f64::INFINITY;
        let mut iterations = 0usize;
        let mut converged = false;
        let mut status = format!("Maximum outer iterations ({}) reached", self.max_outer);
        let mut fn_evals = EvalCounts::new();

        for outer in 0..self.max_outer {
            iterations = outer + 1;

            let problem = AugmentedProblem { constraint, multiplier, penalty };
            let inner: InnerSolve = match opts.line_searcher {
                LineSearcher::MoreThuente => {
                    let solver = build_inner_more_thuente(opts)?;
                    run_inner_lbfgs(u.clone(), opts, problem, solver, opts.max_iterations as u64)?
                }
                LineSearcher::HagerZhang => {
                    let solver = build_inner_hager_zhang(opts)?;
                    run_inner_lbfgs(u.clone(), opts, problem, solver, opts.max_iterations as u64)?
                }
            };
            for (key, count) in inner.fn_evals {
                *fn_evals.entry(key).or_insert(0) += count;
            }
            u = inner.point;

            h = constraint.value(&u)?;
            constraint_residual = h.abs();
            let gradient = constraint.gradient(&u)?;
            let multiplier_estimate = multiplier + penalty * h;
            let kkt = &u + &(&gradient * multiplier_estimate);
            gradient_residual = kkt.dot(&kkt).sqrt();

            let u_norm = u.dot(&u).sqrt();
            if constraint_residual <= opts.tols.constraint * h_scale
                && gradient_residual <= opts.tols.residual * u_norm.max(1.0)
            {
                converged = true;
                status = "Constraint and stationarity residuals within tolerance".to_string();
                break;
            }

            multiplier += penalty * h;
            if constraint_residual > RESIDUAL_DECREASE * prev_residual {
                penalty *= PENALTY_GROWTH;
            }
            prev_residual = constraint_residual;

            if let Some(max_evals) = opts.max_evaluations {
                if constraint.evaluations() >= max_evals as u64 {
                    status = format!("Maximum evaluations ({max_evals}) reached");
                    break;
                }
            }
        }

        fn_evals.insert("constraint_count".to_string(), constraint.evaluations());
        fn_evals.insert("constraint_gradient_count".to_string(), constraint.gradient_evaluations());

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
