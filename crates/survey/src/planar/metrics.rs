//! Point-to-point measures: distance, bearing, radiation.

use nalgebra::Vector2;

use super::types::{CoordinateSystem, Point};
use crate::angle::{normalize_360, Bearing};
use crate::cfg::EARTH_RADIUS_M;

/// Euclidean distance in the plane.
#[inline]
pub fn planar_distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (b - a).norm()
}

/// Surveyor bearing from `a` to `b`: `atan2(Δx, Δy)` wrapped into [0, 360).
///
/// Coincident points yield 0° by convention; that value carries no meaning.
#[inline]
pub fn planar_bearing(a: Vector2<f64>, b: Vector2<f64>) -> Bearing {
    let d = b - a;
    if d.x == 0.0 && d.y == 0.0 {
        return Bearing::NORTH;
    }
    Bearing::new(d.x.atan2(d.y).to_degrees())
}

/// Haversine great-circle distance in meters; inputs are `(lon, lat)` degrees.
pub fn haversine_distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial great-circle bearing from `a` to `b`; inputs are `(lon, lat)` degrees.
pub fn initial_bearing(a: Vector2<f64>, b: Vector2<f64>) -> Bearing {
    let phi1 = a.y.to_radians();
    let phi2 = b.y.to_radians();
    let d_lambda = (b.x - a.x).to_radians();
    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    Bearing::new(normalize_360(y.atan2(x).to_degrees()))
}

/// Distance in meters between two points of the same system.
pub fn distance(p1: &Point, p2: &Point, system: CoordinateSystem) -> f64 {
    if system.is_geodetic() {
        haversine_distance(p1.xy(), p2.xy())
    } else {
        planar_distance(p1.xy(), p2.xy())
    }
}

/// Bearing from `p1` to `p2` in [0, 360).
pub fn bearing(p1: &Point, p2: &Point, system: CoordinateSystem) -> Bearing {
    if system.is_geodetic() {
        initial_bearing(p1.xy(), p2.xy())
    } else {
        planar_bearing(p1.xy(), p2.xy())
    }
}

/// Planar radiation: the point `distance` meters from `origin` along `bearing`.
#[inline]
pub fn radiate(origin: Vector2<f64>, bearing: Bearing, distance: f64) -> Vector2<f64> {
    origin + bearing.unit() * distance
}
