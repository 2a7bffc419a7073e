//! Geometry primitives for parcels and observations.
//!
//! Purpose
//! - Distances, bearings, ring metrics (area, perimeter, centroid) and line
//!   intersections over survey points, in either a planar system (meters) or
//!   WGS84 (decimal degrees, spherical Earth).
//! - Every other module builds on these; nothing here holds state.
//!
//! Conventions
//! - Planar: x = Easting, y = Northing. Bearings are surveyor azimuths.
//! - WGS84: x = longitude, y = latitude. Distances use Haversine on a sphere of
//!   radius `cfg::EARTH_RADIUS_M`; areas use an equirectangular projection about
//!   the ring's mean latitude (valid for parcels small relative to the Earth).
//! - Degeneracy thresholds: `cfg::EPS_DEGENERATE`.

mod intersect;
mod metrics;
mod polygon;
mod types;

pub use intersect::{circumcircle, line_intersection, segment_intersection};
pub use metrics::{
    bearing, distance, haversine_distance, initial_bearing, planar_bearing, planar_distance,
    radiate,
};
pub use polygon::{
    centroid, orientation, perimeter, polygon_area, segment_distances, signed_area,
};
pub use types::{CoordinateSystem, DistanceResult, Orientation, Point};
