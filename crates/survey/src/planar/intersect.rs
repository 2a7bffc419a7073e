//! Line/segment intersection and the circumcircle of three points.

use nalgebra::Vector2;

use crate::cfg::EPS_DEGENERATE;

/// Parameters `(t, u)` of the crossing on `p1→p2` and `p3→p4`, if not parallel.
fn crossing_params(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
    p4: Vector2<f64>,
) -> Option<(f64, f64)> {
    let r = p2 - p1;
    let s = p4 - p3;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < EPS_DEGENERATE {
        return None;
    }
    let qp = p3 - p1;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    Some((t, u))
}

/// Intersection of the infinite lines through `p1,p2` and `p3,p4`.
///
/// `None` when the lines are parallel or coincident.
pub fn line_intersection(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
    p4: Vector2<f64>,
) -> Option<Vector2<f64>> {
    let (t, _) = crossing_params(p1, p2, p3, p4)?;
    Some(p1 + (p2 - p1) * t)
}

/// Intersection of the closed segments `[p1,p2]` and `[p3,p4]`.
pub fn segment_intersection(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
    p4: Vector2<f64>,
) -> Option<Vector2<f64>> {
    let (t, u) = crossing_params(p1, p2, p3, p4)?;
    let inside = |v: f64| (-EPS_DEGENERATE..=1.0 + EPS_DEGENERATE).contains(&v);
    if inside(t) && inside(u) {
        Some(p1 + (p2 - p1) * t)
    } else {
        None
    }
}

/// Center and radius of the circle through `a`, `b`, `c`; `None` if collinear.
pub fn circumcircle(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Option<(Vector2<f64>, f64)> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
    if d.abs() < EPS_DEGENERATE {
        return None;
    }
    let ab2 = ab.norm_squared();
    let ac2 = ac.norm_squared();
    let ux = (ac.y * ab2 - ab.y * ac2) / d;
    let uy = (ab.x * ac2 - ac.x * ab2) / d;
    let offset = Vector2::new(ux, uy);
    Some((a + offset, offset.norm()))
}
