//! Traverse computation and closure adjustment.
//!
//! Purpose
//! - Walk an open or closed traverse from a known start point and initial
//!   bearing through a sequence of (angle, distance) legs, then distribute the
//!   angular and linear misclosure against a known end point.
//!
//! Conventions
//! - The initial bearing is the direction of the first leg. Each leg is
//!   radiated along the running bearing; the bearing then becomes
//!   `current + 180 + angle` (mod 360), so a leg's angle is the right‑hand
//!   angle measured at the station it arrives at.
//! - Angular closure (optional) compares the bearing to a closing reference point
//!   from the known end point with the one implied by the last back-bearing and
//!   the measured closing angle. The error (theoretical minus measured) is split
//!   equally over the leg angles and the walk re-run.
//! - Linear closure moves each station by the closing vector scaled by its share
//!   of the traversed length (`LinearRule::Compass`) or of the |Δx|/|Δy| sums
//!   (`LinearRule::Transit`). The last adjusted station is the known end point.

mod adjust;
mod types;
mod walk;

pub use adjust::{angular_misclosure, compensated_traverse};
pub use types::{
    AngularClosure, AngularError, ClosingError, CompensatedTraverse, LinearRule,
    RelativePrecision, StartOrientation, TraverseInput, TraverseLeg,
};
pub use walk::{legs_between, walk, Walk};

#[cfg(test)]
mod tests;
