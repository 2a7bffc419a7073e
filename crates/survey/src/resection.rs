//! Three-point resection (cotangent form, B central).
//!
//! Given known points A, B, C and the angles ∠APB and ∠BPC observed at the
//! unknown station P, each angle places P on a circle through B. The angles are
//! counter‑clockwise: ray P→B lies counter‑clockwise of ray P→A, and ray P→C
//! counter‑clockwise of ray P→B, each by less than 180°. With B as origin,
//! `a = A − B` and `c = C − B` the circles are `|p|² = d₁·p` and `|p|² = d₂·p`
//! where
//!
//! - `d₁ = a − cot(α)·a⊥`
//! - `d₂ = c + cot(β)·c⊥`, with `v⊥ = (−v.y, v.x)`.
//!
//! Subtracting gives the linear relation `(d₁ − d₂)·p = 0`; substituting back
//! yields `p = (d₁·w / |w|²)·w` with `w = (d₁ − d₂)⊥`. When `|w|²` vanishes the
//! two circles coincide: P lies on the danger circle through A, B, C.
//!
//! Angles enter through their cotangent, so a right angle fixes its circle
//! without regard to the side. Distinct A, B, C and angles in (0°, 180°) are the
//! caller's responsibility.

use nalgebra::Vector2;

use crate::cfg::EPS_DEGENERATE;
use crate::error::SolveError;
use crate::planar::circumcircle;

#[inline]
fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

#[inline]
fn cot_deg(deg: f64) -> f64 {
    let r = deg.to_radians();
    r.cos() / r.sin()
}

/// Station coordinates from `alpha` = ∠APB and `beta` = ∠BPC, degrees.
pub fn resection(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    alpha: f64,
    beta: f64,
) -> Result<Vector2<f64>, SolveError> {
    let ra = a - b;
    let rc = c - b;
    let d1 = ra - perp(ra) * cot_deg(alpha);
    let d2 = rc + perp(rc) * cot_deg(beta);
    let w = perp(d1 - d2);
    let denom = w.norm_squared();
    if denom < EPS_DEGENERATE {
        return Err(SolveError::degenerate("station on danger circle"));
    }
    let p = w * (d1.dot(&w) / denom);
    Ok(b + p)
}

/// Angle at `station` between the rays to `from` and `to`, in [0, 180].
pub fn observed_angle(station: Vector2<f64>, from: Vector2<f64>, to: Vector2<f64>) -> f64 {
    (from - station).angle(&(to - station)).to_degrees()
}

/// Relative distance of `station` from the circle through `a`, `b`, `c`:
/// `| |P − O| − R | / R`. Small values flag a weak fix; `None` if `a, b, c`
/// are collinear (no danger circle exists).
pub fn danger_circle_clearance(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    station: Vector2<f64>,
) -> Option<f64> {
    let (center, radius) = circumcircle(a, b, c)?;
    Some(((station - center).norm() - radius).abs() / radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
        u.x * v.y - u.y * v.x
    }

    /// A, B, C seen counter-clockwise from `p`, each step below 180°.
    fn counter_clockwise_from(
        p: Vector2<f64>,
        a: Vector2<f64>,
        b: Vector2<f64>,
        c: Vector2<f64>,
    ) -> bool {
        cross(a - p, b - p) > 0.0 && cross(b - p, c - p) > 0.0
    }

    fn round_trip(
        a: Vector2<f64>,
        b: Vector2<f64>,
        c: Vector2<f64>,
        p: Vector2<f64>,
    ) -> Result<Vector2<f64>, SolveError> {
        resection(a, b, c, observed_angle(p, a, b), observed_angle(p, b, c))
    }

    #[test]
    fn recovers_station_below_triangle() {
        let (a, b, c) = (vector![0.0, 0.0], vector![10.0, 0.0], vector![10.0, 10.0]);
        let p = vector![5.0, -5.0];
        let alpha = observed_angle(p, a, b);
        let beta = observed_angle(p, b, c);
        assert!((alpha - 90.0).abs() < 1e-9);
        assert!((beta - 0.5_f64.atan().to_degrees()).abs() < 1e-9);
        assert!(alpha > 0.0 && alpha < 180.0 && beta > 0.0 && beta < 180.0);
        let got = resection(a, b, c, alpha, beta).unwrap();
        assert!((got - p).norm() < 1e-6);
    }

    #[test]
    fn station_angles_match_vector_angles() {
        let p: Vector2<f64> = vector![5.0, -5.0];
        let (a, b) = (vector![0.0, 0.0], vector![10.0, 10.0]);
        let want = (a - p).angle(&(b - p)).to_degrees();
        assert!((observed_angle(p, a, b) - want).abs() < 1e-12);
        assert!((observed_angle(p, b, a) - want).abs() < 1e-12);
    }

    #[test]
    fn targets_seen_counter_clockwise() {
        // From the origin, targets at bearings 80°, 20°, 300° sweep counter-clockwise.
        let p = vector![0.0, 0.0];
        let at = |deg: f64, r: f64| {
            let t = deg.to_radians();
            vector![t.sin() * r, t.cos() * r]
        };
        let (a, b, c) = (at(80.0, 150.0), at(20.0, 90.0), at(300.0, 120.0));
        assert!(counter_clockwise_from(p, a, b, c));
        let alpha = observed_angle(p, a, b);
        let beta = observed_angle(p, b, c);
        assert!((alpha - 60.0).abs() < 1e-9);
        assert!((beta - 80.0).abs() < 1e-9);
        let got = resection(a, b, c, alpha, beta).unwrap();
        assert!((got - p).norm() < 1e-6);
    }

    #[test]
    fn random_stations_round_trip() {
        let mut rng = StdRng::seed_from_u64(2024);
        let a = vector![2_000.0, 5_000.0];
        let b = vector![2_600.0, 5_400.0];
        let c = vector![3_100.0, 4_900.0];
        let mut solved = 0;
        for _ in 0..1000 {
            let p: Vector2<f64> = Vector2::new(
                rng.gen_range(1_000.0..4_000.0),
                rng.gen_range(3_000.0..7_000.0),
            );
            if !counter_clockwise_from(p, a, b, c) {
                continue;
            }
            // Keep clear of the danger circle and the targets themselves.
            match danger_circle_clearance(a, b, c, p) {
                Some(k) if k > 0.05 => {}
                _ => continue,
            }
            if [a, b, c].iter().any(|q| (q - p).norm() < 10.0) {
                continue;
            }
            let got = round_trip(a, b, c, p).unwrap();
            assert!((got - p).norm() < 1e-5, "station {p:?} solved as {got:?}");
            solved += 1;
        }
        assert!(solved > 100);
    }

    #[test]
    fn danger_circle_is_rejected() {
        let (a, b, c) = (vector![0.0, 0.0], vector![10.0, 0.0], vector![10.0, 10.0]);
        // (0,10) lies on the circumcircle centered at (5,5).
        let p = vector![0.0, 10.0];
        assert!(counter_clockwise_from(p, a, b, c));
        assert!(danger_circle_clearance(a, b, c, p).unwrap() < 1e-12);
        assert!((observed_angle(p, a, b) - 45.0).abs() < 1e-9);
        assert!(matches!(
            round_trip(a, b, c, p),
            Err(SolveError::Degenerate { .. })
        ));
    }

    #[test]
    fn clearance_needs_a_triangle() {
        let line = (vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]);
        assert!(danger_circle_clearance(line.0, line.1, line.2, vector![0.0, 5.0]).is_none());
    }
}
