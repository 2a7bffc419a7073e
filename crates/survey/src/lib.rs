//! Survey computation engine.
//!
//! Pure, stateless numerics for turning field observations into adjusted
//! geometry:
//! - `planar`: distances, bearings, parcel area/perimeter/centroid, intersections
//!   (planar grids and WGS84 on a spherical Earth).
//! - `traverse`: traverse walk with angular and linear closure adjustment.
//! - `helmert`: least-squares 2D conformal transformation.
//! - `resection`: three-point resection with danger-circle detection.
//! - `angle`: bearing vs. trigonometric angle types, DMS notation.
//!
//! Nothing here allocates shared state or performs I/O; every call may run on
//! any thread.

pub mod angle;
pub mod api;
pub mod cfg;
pub mod error;
pub mod helmert;
pub mod planar;
pub mod resection;
pub mod synth;
pub mod traverse;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::SolveError;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::angle::{decimal_to_dms, dms_to_decimal, Bearing, Dms, MathAngle};
    pub use crate::helmert::{helmert_apply, helmert_fit, HelmertFit, HelmertPair, HelmertParams};
    pub use crate::planar::{
        bearing, centroid, distance, line_intersection, perimeter, polygon_area,
        segment_distances, CoordinateSystem, DistanceResult, Point,
    };
    pub use crate::resection::resection;
    pub use crate::traverse::{
        compensated_traverse, AngularClosure, CompensatedTraverse, LinearRule, StartOrientation,
        TraverseInput, TraverseLeg,
    };
    pub use crate::SolveError;
    pub use nalgebra::Vector2 as Vec2;
}
