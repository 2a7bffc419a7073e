//! Flat call surface for collaborators (UI, import/export, reporting).
//!
//! Collaborators hand in plain coordinates and angles and read plain numbers
//! back. These re-exports keep their imports to one path; the module tree
//! stays free to move underneath.

// Primitives
pub use crate::angle::{
    decimal_to_dms, dms_to_decimal, normalize_180, normalize_360, Bearing, Dms, MathAngle,
};
pub use crate::planar::{
    bearing, centroid, circumcircle, distance, line_intersection, orientation, perimeter,
    polygon_area, radiate, segment_distances, segment_intersection, signed_area,
    CoordinateSystem, DistanceResult, Orientation, Point,
};
// Traverse
pub use crate::traverse::{
    compensated_traverse, legs_between, AngularClosure, AngularError, ClosingError,
    CompensatedTraverse, LinearRule, RelativePrecision, StartOrientation, TraverseInput,
    TraverseLeg,
};
// Transformations and resection
pub use crate::helmert::{
    helmert_apply, helmert_fit, HelmertFit, HelmertPair, HelmertParams, Residual,
};
pub use crate::resection::{danger_circle_clearance, observed_angle, resection};
pub use crate::SolveError;

use nalgebra::Vector2;

/// Parcel summary as shown on a plot sheet: area (m²), perimeter (m), centroid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParcelSummary {
    pub area: f64,
    pub perimeter: f64,
    pub centroid: Option<Vector2<f64>>,
    pub edges: Vec<DistanceResult>,
}

/// Area, perimeter, edge lengths, and centroid of one ring in one call.
///
/// The centroid is computed on raw coordinates (degrees for WGS84).
pub fn parcel_summary(points: &[Point], system: CoordinateSystem) -> ParcelSummary {
    let edges = segment_distances(points, system);
    ParcelSummary {
        area: polygon_area(points, system),
        perimeter: edges.iter().map(|e| e.distance).sum(),
        centroid: centroid(points),
        edges,
    }
}
