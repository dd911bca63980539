//! nearest_point::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! design-point search. By defining these in one place, the rest of the
//! search code can stay agnostic to `ndarray` and Argmin generics and can
//! more easily evolve if the backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for standard-space points, gradients,
//!   Hessians, and scalar merit values (`Point`, `Gradient`, `Hessian`,
//!   `Merit`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`EvalCounts`).
//! - Expose pre-wired L-BFGS solver aliases for the two line-search
//!   strategies used by the augmented-Lagrangian inner solves.
//!
//! Conventions
//! -----------
//! - `Point` and `Gradient` are treated conceptually as column vectors with
//!   length equal to the standard-space dimension.
//! - `Hessian` is a dense square matrix with dimension
//!   `point.len() × point.len()` when used.
//! - `DEFAULT_LBFGS_MEM` encodes the typical history size for L-BFGS;
//!   callers may override this via per-run options.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Standard-space point `u` for the design-point search.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical point type
/// throughout the search layer.
pub type Point = Array1<f64>;

/// Gradient vector `∇h(u)` or merit-function gradient.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Point`.
pub type Gradient = Array1<f64>;

/// Dense Hessian matrix for second-order information.
///
/// Alias for `ndarray::Array2<f64>`; `n × n` for `n = Point.len()`.
pub type Hessian = Array2<f64>;

/// Scalar merit value minimized by the inner unconstrained solves.
pub type Merit = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"constraint_count"`) to counts.
pub type EvalCounts = HashMap<String, u64>;

/// Default history size (`m`) for the inner L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Point, Gradient, Merit>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Point, Gradient, Merit>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Point, Gradient, Merit>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Point, Gradient, Merit>;
