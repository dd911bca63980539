//! optimization — design-point search stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide the constrained-optimization layer of the reliability core:
//! standardized limit-state adapters, pluggable nearest-point solvers, and a
//! single error/result surface. Callers implement a performance function,
//! choose a solver and tolerances, and obtain a design point plus
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for locating the **design point** — the point
//!   of the failure boundary nearest the standard-space origin
//!   (`nearest_point`), including solver configuration and stopping
//!   criteria.
//! - Normalize configuration issues, numerical failures, transform domain
//!   errors, and backend solver errors into a single enum
//!   (`errors::SearchError`) with a common result alias (`SearchResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers operate on the standardized constraint `h(u)` and assume
//!   inputs are finite once validation has passed; invalid states are
//!   reported as `SearchError`, not panics.
//! - Performance-function implementations treat domain violations as
//!   recoverable errors surfaced through the search layer.
//! - A non-converged solver outcome is fatal for the search that produced
//!   it; this layer never substitutes a fallback point or retries with a
//!   different start.
//!
//! Conventions
//! -----------
//! - All solvers minimize `½‖u‖²` subject to `h(u) = 0`, where `h < 0`
//!   denotes the interior of the failure domain.
//! - Points, gradients, and Hessians are represented using `ndarray`-based
//!   aliases from `nearest_point::types`.
//! - Public entrypoints that can fail return `SearchResult<T>`; callers
//!   never see raw Argmin errors or transform-specific enums.
//!
//! Downstream usage
//! ----------------
//! - Reliability engines consume the `DesignPoint` produced by
//!   `nearest_point::api::find_design_point` and never call the solvers
//!   directly.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover solver wiring, tolerance handling,
//!   adapter sign conventions, and finite-difference fallbacks; the
//!   integration test exercises full searches on analytic boundaries.

pub mod errors;
pub mod nearest_point;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_reliability::optimization::prelude::*;
//
// to import the main search surface in a single line.

pub mod prelude {
    pub use super::errors::{SearchError, SearchResult};
    pub use super::nearest_point::prelude::*;
}
