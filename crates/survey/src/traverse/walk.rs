//! Unadjusted traverse walk and its inverse.

use nalgebra::Vector2;

use super::types::TraverseLeg;
use crate::angle::{normalize_360, Bearing};
use crate::planar::{planar_bearing, planar_distance, radiate};

/// Stations and forward bearings of an unadjusted walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Walk {
    pub stations: Vec<Vector2<f64>>,
    /// Bearing each leg was radiated along.
    pub bearings: Vec<Bearing>,
}

impl Walk {
    /// Forward bearing of the last leg, if any.
    pub fn last_bearing(&self) -> Option<Bearing> {
        self.bearings.last().copied()
    }
}

/// Walk `legs` from `start`. Each leg is radiated along the running bearing,
/// which then turns by `180 + angle` for the next leg.
pub fn walk(start: Vector2<f64>, initial: Bearing, legs: &[TraverseLeg]) -> Walk {
    let mut stations = Vec::with_capacity(legs.len());
    let mut bearings = Vec::with_capacity(legs.len());
    let mut current = start;
    let mut b = initial;
    for leg in legs {
        current = radiate(current, b, leg.distance);
        bearings.push(b);
        stations.push(current);
        b = b.turn(180.0 + leg.angle);
    }
    Walk { stations, bearings }
}

/// Inverse of [`walk`]: the legs that lead from `start` through `stations`.
///
/// The initial bearing is `start → stations[0]`; the last leg's angle turns
/// onto `exit`.
pub fn legs_between(
    start: Vector2<f64>,
    stations: &[Vector2<f64>],
    exit: Bearing,
) -> Vec<TraverseLeg> {
    let mut prev = start;
    let forward: Vec<Bearing> = stations
        .iter()
        .map(|&st| {
            let b = planar_bearing(prev, st);
            prev = st;
            b
        })
        .collect();
    let mut prev = start;
    stations
        .iter()
        .enumerate()
        .map(|(i, &st)| {
            let next = forward.get(i + 1).copied().unwrap_or(exit);
            let angle = normalize_360(next.degrees() - forward[i].degrees() - 180.0);
            let distance = planar_distance(prev, st);
            prev = st;
            TraverseLeg { angle, distance }
        })
        .collect()
}
