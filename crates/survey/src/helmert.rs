//! 2D conformal (4‑parameter Helmert) transformation.
//!
//! Model: `x' = tx + s·(x·cosθ − y·sinθ)`, `y' = ty + s·(x·sinθ + y·cosθ)`.
//!
//! The fit is the closed-form least-squares solution. With centered source
//! coordinates `(u, v)` and centered targets `(u', v')`:
//! - `a = s·cosθ = Σ(u·u' + v·v') / Σ(u² + v²)`
//! - `b = s·sinθ = Σ(u·v' − v·u') / Σ(u² + v²)`
//! - translation from the centroid relation `t = c' − M·c`.
//!
//! Two pairs determine the transform exactly; more pairs give the
//! least-squares optimum.

use nalgebra::{Matrix2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angle::MathAngle;
use crate::cfg::EPS_DEGENERATE;
use crate::error::SolveError;

/// A point known in both the source and the target frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelmertPair {
    pub source: Vector2<f64>,
    pub target: Vector2<f64>,
}

/// Similarity parameters. `rotation` is counter‑clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelmertParams {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
    pub rotation: MathAngle,
}

impl HelmertParams {
    pub fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            scale: 1.0,
            rotation: MathAngle(0.0),
        }
    }

    /// Linear part `s·R(θ)`.
    #[inline]
    pub fn matrix(&self) -> Matrix2<f64> {
        let (sin, cos) = self.rotation.radians().sin_cos();
        Matrix2::new(cos, -sin, sin, cos) * self.scale
    }

    #[inline]
    pub fn translation(&self) -> Vector2<f64> {
        Vector2::new(self.tx, self.ty)
    }

    /// Forward transform of one point.
    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.matrix() * p + self.translation()
    }

    pub fn apply_all(&self, points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
        let m = self.matrix();
        let t = self.translation();
        points.iter().map(|p| m * p + t).collect()
    }

    /// Target → source parameters; `None` for a vanishing scale.
    pub fn inverse(&self) -> Option<Self> {
        if self.scale.abs() < EPS_DEGENERATE {
            return None;
        }
        let inv = Self {
            tx: 0.0,
            ty: 0.0,
            scale: 1.0 / self.scale,
            rotation: MathAngle(-self.rotation.degrees()),
        };
        let t = -(inv.matrix() * self.translation());
        Some(Self {
            tx: t.x,
            ty: t.y,
            ..inv
        })
    }
}

/// Target minus transformed source.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Residual {
    pub dx: f64,
    pub dy: f64,
    pub total: f64,
}

/// Fitted parameters with per-pair residuals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HelmertFit {
    pub params: HelmertParams,
    pub residuals: Vec<Residual>,
    /// Root mean square of residual magnitudes.
    pub rmse: f64,
}

/// Forward transform (free-function form of [`HelmertParams::apply`]).
#[inline]
pub fn helmert_apply(point: Vector2<f64>, params: &HelmertParams) -> Vector2<f64> {
    params.apply(point)
}

/// Least-squares conformal fit from at least two control pairs.
pub fn helmert_fit(pairs: &[HelmertPair]) -> Result<HelmertFit, SolveError> {
    let n = pairs.len();
    if n < 2 {
        return Err(SolveError::insufficient(2, n));
    }
    let inv_n = 1.0 / n as f64;
    let src_c = pairs
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.source)
        * inv_n;
    let dst_c = pairs
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.target)
        * inv_n;

    let mut sxx = 0.0;
    let mut sa = 0.0;
    let mut sb = 0.0;
    for p in pairs {
        let u = p.source - src_c;
        let w = p.target - dst_c;
        sxx += u.norm_squared();
        sa += u.x * w.x + u.y * w.y;
        sb += u.x * w.y - u.y * w.x;
    }
    if sxx < EPS_DEGENERATE {
        return Err(SolveError::degenerate("control points coincide"));
    }
    let a = sa / sxx;
    let b = sb / sxx;
    let t = dst_c - Matrix2::new(a, -b, b, a) * src_c;
    let params = HelmertParams {
        tx: t.x,
        ty: t.y,
        scale: a.hypot(b),
        rotation: MathAngle::from_radians(b.atan2(a)),
    };

    let residuals: Vec<Residual> = pairs
        .iter()
        .map(|p| {
            let r = p.target - params.apply(p.source);
            Residual {
                dx: r.x,
                dy: r.y,
                total: r.norm(),
            }
        })
        .collect();
    let rmse = (residuals.iter().map(|r| r.total * r.total).sum::<f64>() * inv_n).sqrt();
    tracing::debug!(
        pairs = n,
        scale = params.scale,
        rotation = params.rotation.degrees(),
        rmse,
        "helmert fit"
    );
    Ok(HelmertFit {
        params,
        residuals,
        rmse,
    })
}
