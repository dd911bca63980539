//! nearest_point::builders — inner L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the
//! augmented-Lagrangian inner solves. These helpers hide Argmin's generic
//! wiring and apply crate-level options (tolerances, memory size) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Conventions
//! -----------
//! - The inner gradient tolerance is taken from `tols.absolute` and the
//!   inner cost-change tolerance from `tols.relative`; the outer loop owns
//!   the constraint and KKT criteria.
//! - The builders do **not** set an initial parameter vector or
//!   `max_iters`; these are treated as runtime concerns and are applied by
//!   the runner (`run_inner_lbfgs`).
//! - Errors are always reported via [`SearchResult`]; the underlying
//!   `argmin::core::Error` values never leak across module boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::SearchResult,
    nearest_point::{
        traits::SolverOptions,
        types::{
            Gradient, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, Merit, MoreThuenteLS,
            Point, DEFAULT_LBFGS_MEM,
        },
    },
};

/// Construct L-BFGS with the Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` or [`DEFAULT_LBFGS_MEM`] as the history size and
/// wires the inner tolerances via [`configure_lbfgs`].
///
/// # Errors
/// `SearchError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_inner_hager_zhang(opts: &SolverOptions) -> SearchResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with the More–Thuente line search.
///
/// Uses `opts.lbfgs_mem` or [`DEFAULT_LBFGS_MEM`] as the history size and
/// wires the inner tolerances via [`configure_lbfgs`].
///
/// # Errors
/// `SearchError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_inner_more_thuente(opts: &SolverOptions) -> SearchResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the inner tolerances to an L-BFGS solver, generic over the
/// line-search type so both builders can share the wiring.
///
/// # Errors
/// `SearchError` (via `From<argmin::core::Error>`) when
/// `with_tolerance_grad` or `with_tolerance_cost` rejects a value.
pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Point, Gradient, Merit>, opts: &SolverOptions,
) -> SearchResult<LBFGS<L, Point, Gradient, Merit>> {
    let solver = solver
        .with_tolerance_grad(opts.tols.absolute)?
        .with_tolerance_cost(opts.tols.relative)?;
    Ok(solver)
}
