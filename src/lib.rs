//! rust_reliability — analytic structural reliability methods.
//!
//! Purpose
//! -------
//! Estimate the probability that a scalar performance function of a random
//! input vector falls in a failure domain, without simulation. The crate
//! transforms the problem into a standardized probability space, locates the
//! design point (the failure-boundary point nearest the origin) with a
//! pluggable constrained solver, and derives first- and second-order
//! probability approximations, geometric validation, and closed-form
//! parameter sensitivities from the local geometry at that point.
//!
//! Key behaviors
//! -------------
//! - Map physical random vectors into standard space and back through the
//!   [`transform`] layer, with explicit domain errors on CDF saturation.
//! - Drive a [`NearestPointSolver`](optimization::nearest_point::traits::NearestPointSolver)
//!   (improved HLRF or an augmented-Lagrangian scheme backed by `argmin`
//!   L-BFGS) to a converged [`DesignPoint`](reliability::design_point::DesignPoint),
//!   returning an explicit evaluation trace instead of hidden state.
//! - Compute FORM probabilities and importance factors, SORM curvature
//!   corrections (Breitung, Hohenbichler, Tvedt) from a shared curvature
//!   profile, and envelope-theorem sensitivities of the reliability index.
//! - Independently validate a design point by sampling the enlarged
//!   β-sphere in the [`geometric_tests`] layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All vectors and matrices are `ndarray` containers over `f64`, behind
//!   the aliases in `optimization::nearest_point::types`.
//! - Engines never mutate a [`DesignPoint`](reliability::design_point::DesignPoint)
//!   or an [`Event`](reliability::event::Event); they are pure read-only
//!   consumers and safe to call concurrently on distinct instances.
//! - Every fallible path surfaces a domain error enum; results that survive
//!   numerical clipping carry explicit validity warnings.
//!
//! Conventions
//! -----------
//! - The standardized limit state `h(u)` is sign-adjusted so that `h < 0`
//!   always denotes the interior of the failure domain, regardless of the
//!   event's comparison operator.
//! - The origin-in-failure-domain flag is computed once by the search and
//!   consumed uniformly by FORM, SORM, and the sensitivity layer.
//! - No code path retries a failed search with a different starting point;
//!   convergence failures are surfaced to the caller unchanged.
//!
//! Downstream usage
//! ----------------
//! - Implement `PerformanceFunction` for your model, build an `Event` and a
//!   transform, and call
//!   [`find_design_point`](optimization::nearest_point::api::find_design_point).
//! - Feed the resulting design point to
//!   [`FormOutcome`](reliability::form::FormOutcome),
//!   [`SormOutcome`](reliability::sorm::SormOutcome),
//!   [`SensitivityOutcome`](reliability::sensitivity::SensitivityOutcome),
//!   and
//!   [`StrongMaximumOutcome`](geometric_tests::strong_maximum::StrongMaximumOutcome).
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; an end-to-end pipeline test under
//!   `tests/` checks the analytic scenarios (exact half-space probability,
//!   curvature-corrected parabolic boundary, two-lobe design-point
//!   validation).

pub mod geometric_tests;
pub mod optimization;
pub mod reliability;
pub mod transform;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_reliability::prelude::*;
//
// to import the main analysis surface in a single line.

pub mod prelude {
    pub use crate::geometric_tests::strong_maximum::StrongMaximumOutcome;
    pub use crate::optimization::nearest_point::{
        api::find_design_point,
        augmented::AugmentedLagrangianSolver,
        hlrf::HlrfSolver,
        traits::{
            LineSearcher, NearestPointSolver, PerformanceFunction, SolverOptions, Tolerances,
        },
    };
    pub use crate::reliability::{
        design_point::DesignPoint,
        event::{ComparisonOperator, Event},
        form::{FormOutcome, ImportanceConvention},
        sorm::SormOutcome,
    };
    pub use crate::transform::{
        independent::IndependentMarginalTransform,
        traits::{StandardNormalTransform, StandardSpaceTransform},
    };
}
