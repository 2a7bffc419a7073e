//! Ring metrics: area, perimeter, edge lengths, centroid, winding.

use nalgebra::Vector2;

use super::metrics::distance;
use super::types::{CoordinateSystem, DistanceResult, Orientation, Point};
use crate::cfg::{EARTH_RADIUS_M, EPS_DEGENERATE};

/// Half the shoelace sum; positive for counter‑clockwise rings.
fn shoelace(ring: &[Vector2<f64>]) -> f64 {
    let n = ring.len();
    let mut twice = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        twice += p.x * q.y - q.x * p.y;
    }
    0.5 * twice
}

/// Equirectangular projection about the mean latitude, in meters.
fn project_local_tangent(points: &[Point]) -> Vec<Vector2<f64>> {
    let mean_lat = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;
    let k = mean_lat.to_radians().cos();
    points
        .iter()
        .map(|p| {
            Vector2::new(
                p.x.to_radians() * EARTH_RADIUS_M * k,
                p.y.to_radians() * EARTH_RADIUS_M,
            )
        })
        .collect()
}

/// Signed planar area (counter‑clockwise positive). Fewer than 3 points → 0.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let ring: Vec<Vector2<f64>> = points.iter().map(Point::xy).collect();
    shoelace(&ring)
}

/// Unsigned ring area in square meters. Fewer than 3 points → 0.
pub fn polygon_area(points: &[Point], system: CoordinateSystem) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let ring: Vec<Vector2<f64>> = if system.is_geodetic() {
        project_local_tangent(points)
    } else {
        points.iter().map(Point::xy).collect()
    };
    shoelace(&ring).abs()
}

/// Ordered edge lengths including the closing edge `last → first`.
pub fn segment_distances(points: &[Point], system: CoordinateSystem) -> Vec<DistanceResult> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            DistanceResult {
                from: a.id,
                to: b.id,
                distance: distance(a, b, system),
            }
        })
        .collect()
}

/// Closed-ring perimeter in meters (0 for fewer than 2 points).
pub fn perimeter(points: &[Point], system: CoordinateSystem) -> f64 {
    segment_distances(points, system)
        .iter()
        .map(|d| d.distance)
        .sum()
}

/// Area centroid of a planar ring.
///
/// Near-zero signed area (collinear or self-cancelling rings) falls back to the
/// vertex mean. Fewer than 3 points → `None`.
pub fn centroid(points: &[Point]) -> Option<Vector2<f64>> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = points[i].xy();
        let q = points[(i + 1) % n].xy();
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    a *= 0.5;
    if a.abs() < EPS_DEGENERATE {
        let sum = points
            .iter()
            .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.xy());
        return Some(sum / n as f64);
    }
    Some(Vector2::new(cx / (6.0 * a), cy / (6.0 * a)))
}

/// Winding of a planar ring.
pub fn orientation(points: &[Point]) -> Orientation {
    let a = signed_area(points);
    if a.abs() < EPS_DEGENERATE {
        Orientation::Degenerate
    } else if a > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}
