//! nearest_point — argmin-backed design-point search.
//!
//! Purpose
//! -------
//! Provide the constrained-minimization layer that locates the design
//! point: the point of the standardized failure boundary `{h(u) = 0}`
//! nearest the origin. Callers implement a single trait,
//! [`PerformanceFunction`], choose a [`NearestPointSolver`], and invoke
//! [`api::find_design_point`] with a starting point and
//! [`SolverOptions`].
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied events into standardized constraints
//!   `h(u) = s·(g(T⁻¹(u)) − t)` via [`adapter::StandardConstraint`],
//!   with chain-rule or finite-difference gradients.
//! - Expose two interchangeable solvers behind one object-safe trait:
//!   the special-purpose HLRF iteration ([`hlrf`]) and a general
//!   augmented-Lagrangian scheme ([`augmented`]) whose inner smooth
//!   subproblems run on `argmin` L-BFGS via [`builders`] and [`run`].
//! - Provide robust finite-difference helpers in [`finite_diff`] for
//!   gradients and Hessians when analytic derivatives are missing, with
//!   post-hoc validation and error capture.
//! - Centralize configuration ([`traits::Tolerances`],
//!   [`traits::SolverOptions`]) and validation logic ([`validation`]) so
//!   downstream code can assume sane, finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The constraint sign convention (`h < 0` inside the failure domain)
//!   is established once by the adapter; solvers never inspect the event.
//! - [`PerformanceFunction::value`] and
//!   [`PerformanceFunction::gradient`] must treat invalid inputs as
//!   recoverable [`SearchError`](crate::optimization::errors::SearchError)
//!   values, not panics.
//! - Budget exhaustion is reported through
//!   `SolverOutcome::converged == false`; only the orchestration layer
//!   turns it into a `ConvergenceFailure`.
//!
//! Conventions
//! -----------
//! - Vectors and matrices use the canonical aliases
//!   [`types::Point`], [`types::Gradient`], [`types::Hessian`]; all are
//!   assumed finite whenever a search proceeds.
//! - Errors bubble up as `SearchResult<T>`; this module and its children
//!   never intentionally panic or use `unsafe`.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions and gradient handling
//!   in [`adapter`], solver construction in [`builders`], the inner runner
//!   in [`run`], both solvers on analytic boundaries, and the
//!   finite-difference + validation behavior.
//! - The integration suite exercises [`api::find_design_point`] end to end
//!   on events with known design points.

pub mod adapter;
pub mod api;
pub mod augmented;
pub mod builders;
pub mod finite_diff;
pub mod hlrf;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::find_design_point;
pub use self::traits::{
    EqualityConstraint, LineSearcher, NearestPointSolver, PerformanceFunction, SolverOptions,
    SolverOutcome, Tolerances,
};
pub use self::types::{EvalCounts, Gradient, Hessian, Point, DEFAULT_LBFGS_MEM};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::api::find_design_point;
    pub use super::augmented::AugmentedLagrangianSolver;
    pub use super::hlrf::HlrfSolver;
    pub use super::traits::{
        LineSearcher, NearestPointSolver, PerformanceFunction, SolverOptions, Tolerances,
    };
    pub use super::types::{Gradient, Hessian, Point};
}
