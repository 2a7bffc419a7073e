//! Angle conventions and sexagesimal notation.
//!
//! Two conventions meet in survey work and are kept apart by type:
//! - `Bearing`: azimuth in degrees, 0° = north (+y), clockwise, in [0, 360).
//! - `MathAngle`: trigonometric angle in degrees, 0° = east (+x), counter‑clockwise.
//!
//! `Dms` is the degrees/minutes/seconds notation. The sign lives on the degrees
//! component only; for magnitudes below one degree that component is a signed zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wrap degrees into [0, 360).
#[inline]
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Wrap degrees into (-180, 180].
#[inline]
pub fn normalize_180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Surveyor azimuth: clockwise from north, always in [0, 360).
///
/// Deserialization normalizes like [`Bearing::new`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Bearing(f64);

impl From<f64> for Bearing {
    #[inline]
    fn from(degrees: f64) -> Self {
        Self::new(degrees)
    }
}

impl From<Bearing> for f64 {
    #[inline]
    fn from(b: Bearing) -> Self {
        b.0
    }
}

impl Bearing {
    pub const NORTH: Bearing = Bearing(0.0);

    /// Normalizing constructor.
    #[inline]
    pub fn new(degrees: f64) -> Self {
        Self(normalize_360(degrees))
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Reverse direction (bearing + 180°).
    #[inline]
    pub fn back(self) -> Self {
        Self::new(self.0 + 180.0)
    }

    /// Rotate clockwise by `degrees` (negative turns counter‑clockwise).
    #[inline]
    pub fn turn(self, degrees: f64) -> Self {
        Self::new(self.0 + degrees)
    }

    /// Same direction expressed in the trigonometric convention.
    #[inline]
    pub fn to_math(self) -> MathAngle {
        MathAngle(normalize_360(90.0 - self.0))
    }

    /// Unit direction vector `(sin β, cos β)` = (east, north).
    #[inline]
    pub fn unit(self) -> nalgebra::Vector2<f64> {
        let r = self.radians();
        nalgebra::Vector2::new(r.sin(), r.cos())
    }
}

/// Trigonometric angle: counter‑clockwise from +x. Not normalized.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MathAngle(pub f64);

impl MathAngle {
    #[inline]
    pub fn from_radians(rad: f64) -> Self {
        Self(rad.to_degrees())
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    #[inline]
    pub fn to_bearing(self) -> Bearing {
        Bearing::new(90.0 - self.0)
    }
}

/// Degrees, minutes, seconds. `minutes` and `seconds` are non‑negative magnitudes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dms {
    /// Whole degrees carrying the sign (may be `-0.0`).
    pub degrees: f64,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.degrees.is_sign_negative()
    }
}

/// Split decimal degrees into `Dms` without rounding (no 60″ carry can occur).
pub fn decimal_to_dms(decimal: f64) -> Dms {
    let abs = decimal.abs();
    let d = abs.trunc();
    let m_full = (abs - d) * 60.0;
    let m = m_full.trunc();
    let s = (m_full - m) * 60.0;
    Dms {
        degrees: if decimal.is_sign_negative() { -d } else { d },
        minutes: m as u32,
        seconds: s,
    }
}

/// Inverse of [`decimal_to_dms`].
pub fn dms_to_decimal(dms: Dms) -> f64 {
    let magnitude = dms.degrees.abs() + f64::from(dms.minutes) / 60.0 + dms.seconds / 3600.0;
    if dms.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}
