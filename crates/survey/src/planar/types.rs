//! Point and coordinate-system value types.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which formula family applies to a set of points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoordinateSystem {
    /// Site grid in meters.
    #[default]
    Local,
    /// Projected grid in meters (e.g. a UTM zone); treated exactly like `Local`.
    Projected { epsg: u32 },
    /// Geodetic longitude/latitude in decimal degrees.
    Wgs84,
}

impl CoordinateSystem {
    #[inline]
    pub fn is_geodetic(self) -> bool {
        matches!(self, Self::Wgs84)
    }
}

/// Labeled survey point. `id` never enters the math.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    #[inline]
    pub fn xy(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

/// Length of one ring edge, labeled by its end point ids.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceResult {
    pub from: i64,
    pub to: i64,
    /// Meters.
    pub distance: f64,
}

/// Winding of a planar ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Degenerate,
}
