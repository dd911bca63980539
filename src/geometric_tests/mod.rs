//! Geometric validation tests for design points.
//!
//! FORM and SORM are only as good as the assumption that the optimizer
//! found the *global* nearest boundary point. This module holds the
//! sampling-based checks of that assumption — currently the Strong Maximum
//! Test ([`strong_maximum`]), which probes an enlarged β-sphere for
//! failure-domain points outside the design point's angular vicinity.
//! Tests here are purely observational: they never mutate the design point
//! or the event, and they report classifications rather than verdicts.

pub mod errors;
pub mod strong_maximum;
pub mod validation;

pub use self::errors::{GeoTestError, GeoTestResult};
pub use self::strong_maximum::{required_sample_count, StrongMaximumOutcome};
