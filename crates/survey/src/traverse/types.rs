//! Value types for traverse input and results.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angle::Bearing;
use crate::planar::planar_bearing;

/// One observed leg: distance to the next station (m), then the right-hand
/// angle measured there (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraverseLeg {
    pub angle: f64,
    pub distance: f64,
}

/// How the initial bearing (direction of the first leg) is obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StartOrientation {
    /// Given directly.
    Bearing(Bearing),
    /// Known orientation point; the initial bearing is start → point.
    Toward(Vector2<f64>),
}

impl StartOrientation {
    pub fn resolve(&self, start: Vector2<f64>) -> Bearing {
        match *self {
            StartOrientation::Bearing(b) => b,
            StartOrientation::Toward(p) => planar_bearing(start, p),
        }
    }
}

/// Closing observation at the known end point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngularClosure {
    /// Known point sighted from the end point.
    pub reference: Vector2<f64>,
    /// Right‑hand angle at the end point from the last backsight to `reference`, degrees.
    pub measured_angle: f64,
}

/// Linear misclosure distribution rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LinearRule {
    /// Proportional to cumulative distance from the start (compass/Bowditch).
    #[default]
    Compass,
    /// dx by cumulative |Δx|, dy by cumulative |Δy|.
    Transit,
}

/// Everything needed to compute and adjust one traverse.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraverseInput {
    pub start: Vector2<f64>,
    /// Known coordinates of the final station.
    pub end: Vector2<f64>,
    pub orientation: StartOrientation,
    pub legs: Vec<TraverseLeg>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub closure: Option<AngularClosure>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rule: LinearRule,
}

/// Known end minus computed end.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosingError {
    pub dx: f64,
    pub dy: f64,
    pub total: f64,
    /// Direction of the correction vector (0° when it vanishes).
    pub bearing: Bearing,
}

/// Angular misclosure and the correction applied to each leg angle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngularError {
    /// Theoretical minus measured closing bearing, in (-180, 180].
    pub degrees: f64,
    pub per_station: f64,
}

/// Traverse length over closing-error length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelativePrecision {
    Infinite,
    /// `1 : n` with `n = total distance / |closing error|`.
    OneIn(f64),
}

impl RelativePrecision {
    pub fn ratio(self) -> f64 {
        match self {
            Self::Infinite => f64::INFINITY,
            Self::OneIn(n) => n,
        }
    }
}

/// Result of [`compensated_traverse`](super::compensated_traverse). Never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompensatedTraverse {
    /// Stations of the raw walk, one per leg.
    pub unadjusted: Vec<Vector2<f64>>,
    /// Stations after angular (if any) and linear adjustment.
    pub adjusted: Vec<Vector2<f64>>,
    /// Bearing of each leg after angular correction.
    pub bearings: Vec<Bearing>,
    pub closing_error: ClosingError,
    pub angular_error: Option<AngularError>,
    pub total_distance: f64,
    pub relative_precision: RelativePrecision,
}
