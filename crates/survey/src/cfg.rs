//! Numeric constants shared by every solver.
//!
//! Policy
//! - Fixed constants, no per-call tolerances. All degeneracy checks (parallel
//!   lines, coincident control, danger circle, zero closing vector) compare
//!   against the same threshold.

/// Threshold below which a determinant, area, or length counts as zero.
pub const EPS_DEGENERATE: f64 = 1e-9;

/// Mean Earth radius (spherical model) used for WGS84 distance and area.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
