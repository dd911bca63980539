//! Public API surface for the design-point search.
//!
//! - [`PerformanceFunction`]: trait users implement for their model.
//! - [`EqualityConstraint`]: object-safe view of the standardized limit
//!   state consumed by solvers and by the reliability engines.
//! - [`NearestPointSolver`]: the pluggable constrained-solver capability.
//! - [`SolverOptions`] and [`Tolerances`]: configuration for a search.
//! - [`LineSearcher`]: choice of line search used by the inner L-BFGS.
//! - [`SolverOutcome`]: normalized result returned by every solver.
//!
//! Convention: solvers minimize `½‖u‖²` subject to `h(u) = 0`, where the
//! standardized limit state `h` is negative strictly inside the failure
//! domain. If an analytic performance-function gradient is provided, it is
//! the gradient of `g` in *physical* coordinates; the constraint adapter
//! chains it into standard space.
use crate::optimization::{
    errors::{SearchError, SearchResult},
    nearest_point::{
        types::{EvalCounts, Gradient, Point},
        validation::{validate_solution, verify_tolerance},
    },
};
use std::str::FromStr;

/// User-implemented scalar performance function `g: Rⁿ → R` over physical
/// coordinates.
///
/// Required:
/// - `value(&Point) -> SearchResult<f64>`: evaluate `g(x)`.
///   - Errors: return a descriptive `SearchError` for invalid inputs or
///     model failures.
/// - `check(&Point) -> SearchResult<()>`: validation hook to reject points
///   outside the function domain. Called once on the starting point before
///   a search.
///
/// Optional:
/// - `gradient(&Point) -> SearchResult<Gradient>`: analytic `∇g(x)`.
///   If not implemented, robust finite differences of the standardized
///   constraint are used automatically.
pub trait PerformanceFunction {
    // Required methods
    fn value(&self, x: &Point) -> SearchResult<f64>;
    fn check(&self, x: &Point) -> SearchResult<()>;

    // Optional methods
    fn gradient(&self, _x: &Point) -> SearchResult<Gradient> {
        Err(SearchError::GradientNotImplemented)
    }
}

/// Object-safe view of the standardized equality constraint `h(u) = 0`.
///
/// Solvers and the downstream reliability engines depend only on this
/// trait, never on the concrete adapter, so the constraint source can be
/// substituted in tests (e.g., analytic boundaries with known design
/// points).
pub trait EqualityConstraint {
    /// Standard-space dimension `n`.
    fn dim(&self) -> usize;

    /// Evaluate `h(u)`. Negative strictly inside the failure domain.
    fn value(&self, u: &Point) -> SearchResult<f64>;

    /// Evaluate `∇h(u)` (analytic chain rule or finite differences).
    fn gradient(&self, u: &Point) -> SearchResult<Gradient>;

    /// Number of `value` evaluations performed so far (pass-through
    /// counter for callers that budget function calls).
    fn evaluations(&self) -> u64;

    /// Number of `gradient` evaluations performed so far.
    fn gradient_evaluations(&self) -> u64;
}

/// Pluggable nearest-point solver capability.
///
/// Given the standardized constraint and a standard-space starting point,
/// return the point of `{h = 0}` with minimum Euclidean norm, together with
/// convergence diagnostics. Implementations must report budget exhaustion
/// through `SolverOutcome::converged = false` rather than an error, so the
/// orchestration layer can attach the last iterate to its
/// `ConvergenceFailure`; hard numerical failures remain `Err`.
pub trait NearestPointSolver {
    fn minimize(
        &self, constraint: &dyn EqualityConstraint, start: &Point, opts: &SolverOptions,
    ) -> SearchResult<SolverOutcome>;
}

/// Choice of line search used inside the inner L-BFGS solves.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `SearchError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = SearchError;

    /// Parse a line-search choice from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"MoreThuente"`
    /// - `"HagerZhang"`
    /// - Any case variant (e.g., `"morethuente"`, `"HAGERZHANG"`).
    ///
    /// Any other value returns `SearchError::InvalidLineSearch` with a
    /// helpful message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(SearchError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Numerical tolerances for the design-point search.
///
/// - `absolute`: absolute step tolerance `‖u_{k+1} − u_k‖` and inner
///   gradient tolerance.
/// - `relative`: relative step tolerance, scaled by `‖u_k‖`, and inner
///   cost-change tolerance.
/// - `residual`: KKT alignment tolerance — the norm of the component of
///   `u` orthogonal to `∇h(u)`, scaled by `max(1, ‖u‖)`.
/// - `constraint`: admissible `|h(u)|` at the reported optimum, scaled by
///   the initial constraint magnitude.
///
/// All four must be finite and strictly positive (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub absolute: f64,
    pub relative: f64,
    pub residual: f64,
    pub constraint: f64,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - Every tolerance must be **finite and strictly positive**.
    ///
    /// # Errors
    /// - [`SearchError::InvalidTolerance`] naming the offending field.
    pub fn new(absolute: f64, relative: f64, residual: f64, constraint: f64) -> SearchResult<Self> {
        verify_tolerance("absolute", absolute)?;
        verify_tolerance("relative", relative)?;
        verify_tolerance("residual", residual)?;
        verify_tolerance("constraint", constraint)?;
        Ok(Self { absolute, relative, residual, constraint })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { absolute: 1e-6, relative: 1e-6, residual: 1e-6, constraint: 1e-6 }
    }
}

/// Solver-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances.
/// - `max_iterations: usize` — hard cap on (outer) solver iterations.
/// - `max_evaluations: Option<usize>` — optional cap on constraint
///   evaluations, checked against the pass-through counter.
/// - `line_searcher: LineSearcher` — line search used by the inner L-BFGS
///   of penalty-based solvers; ignored by HLRF.
/// - `lbfgs_mem: Option<usize>` — optional L-BFGS history size.
/// - `verbose: bool` — if `true`, attaches an observer (behind the
///   `obs_slog` feature) to inner solves and prints progress.
///
/// Default:
/// - `tols`: all 1e-6
/// - `max_iterations`: 100
/// - `max_evaluations`: `None`
/// - `line_searcher`: `MoreThuente`
/// - `lbfgs_mem`: `None` (uses default of 7)
/// - `verbose`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub tols: Tolerances,
    pub max_iterations: usize,
    pub max_evaluations: Option<usize>,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
}

impl SolverOptions {
    /// Create a new set of solver options.
    ///
    /// # Errors
    /// - [`SearchError::InvalidMaxIterations`] if `max_iterations == 0`.
    /// - [`SearchError::InvalidMaxEvaluations`] if `max_evaluations == Some(0)`.
    /// - [`SearchError::InvalidLbfgsMemory`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, max_iterations: usize, max_evaluations: Option<usize>,
        line_searcher: LineSearcher, lbfgs_mem: Option<usize>, verbose: bool,
    ) -> SearchResult<Self> {
        if max_iterations == 0 {
            return Err(SearchError::InvalidMaxIterations {
                max_iterations,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if let Some(m) = max_evaluations {
            if m == 0 {
                return Err(SearchError::InvalidMaxEvaluations {
                    max_evaluations: m,
                    reason: "Maximum evaluations must be greater than zero.",
                });
            }
        }
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(SearchError::InvalidLbfgsMemory {
                    memory: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, max_iterations, max_evaluations, line_searcher, lbfgs_mem, verbose })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            max_iterations: 100,
            max_evaluations: None,
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: false,
        }
    }
}

/// Canonical result returned by every [`NearestPointSolver`].
///
/// - `point`: best standard-space point found.
/// - `converged`: `true` only if the solver met its feasibility and
///   optimality criteria; budget exhaustion reports `false` here instead of
///   an error so the caller still sees the last iterate.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of (outer) solver iterations performed.
/// - `constraint_residual`: final `|h(u)|`.
/// - `gradient_residual`: final KKT alignment residual.
/// - `fn_evals`: function-evaluation counters (constraint, gradient, and
///   any inner-solver counters).
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub point: Point,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub constraint_residual: f64,
    pub gradient_residual: f64,
    pub fn_evals: EvalCounts,
}

impl SolverOutcome {
    /// Build a validated [`SolverOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `point` check via `validate_solution` (present and all finite).
    ///
    /// # Errors
    /// - Propagates any validation errors for `point`.
    pub fn new(
        point: Option<Point>, converged: bool, status: String, iterations: usize,
        constraint_residual: f64, gradient_residual: f64, fn_evals: EvalCounts,
    ) -> SearchResult<Self> {
        let point = validate_solution(point)?;
        Ok(Self {
            point,
            converged,
            status,
            iterations,
            constraint_residual,
            gradient_residual,
            fn_evals,
        })
    }
}
