//! Angular and linear closure of a traverse walk.

use nalgebra::Vector2;

use super::types::{
    AngularClosure, AngularError, ClosingError, CompensatedTraverse, LinearRule,
    RelativePrecision, TraverseInput, TraverseLeg,
};
use super::walk::{walk, Walk};
use crate::angle::normalize_180;
use crate::cfg::EPS_DEGENERATE;
use crate::error::SolveError;
use crate::planar::planar_bearing;

/// Angular misclosure of a walk against a closing observation at `end`.
///
/// The measured closing bearing is the back-bearing of the last leg turned by
/// the measured closing angle; the theoretical one is `end → reference`.
/// `degrees` is theoretical minus measured. `per_station` is added to every
/// leg angle and turns the measured closing bearing toward the theoretical
/// one. `None` for an empty walk.
pub fn angular_misclosure(
    walk: &Walk,
    end: Vector2<f64>,
    closure: &AngularClosure,
) -> Option<AngularError> {
    let last = walk.last_bearing()?;
    let theoretical = planar_bearing(end, closure.reference);
    let observed = last.back().turn(closure.measured_angle);
    let degrees = normalize_180(theoretical.degrees() - observed.degrees());
    let per_station = degrees / walk.bearings.len() as f64;
    Some(AngularError {
        degrees,
        per_station,
    })
}

/// Compute, close, and adjust a traverse.
///
/// Fails only on an empty leg list; angles and distances are trusted as given.
pub fn compensated_traverse(input: &TraverseInput) -> Result<CompensatedTraverse, SolveError> {
    if input.legs.is_empty() {
        return Err(SolveError::insufficient(1, 0));
    }
    let initial = input.orientation.resolve(input.start);
    let raw = walk(input.start, initial, &input.legs);

    let angular_error = input
        .closure
        .as_ref()
        .and_then(|c| angular_misclosure(&raw, input.end, c));
    let corrected = angular_error.map(|err| {
        let legs: Vec<TraverseLeg> = input
            .legs
            .iter()
            .map(|l| TraverseLeg {
                angle: l.angle + err.per_station,
                distance: l.distance,
            })
            .collect();
        walk(input.start, initial, &legs)
    });
    let base = corrected.as_ref().unwrap_or(&raw);

    let Some(&computed_end) = base.stations.last() else {
        return Err(SolveError::insufficient(1, 0));
    };
    let d = input.end - computed_end;
    let total_distance: f64 = input.legs.iter().map(|l| l.distance).sum();
    let misclosure = d.norm();
    let closing_error = ClosingError {
        dx: d.x,
        dy: d.y,
        total: misclosure,
        bearing: planar_bearing(computed_end, input.end),
    };
    let relative_precision = if misclosure < EPS_DEGENERATE {
        RelativePrecision::Infinite
    } else {
        RelativePrecision::OneIn(total_distance / misclosure)
    };

    let adjusted = match input.rule {
        LinearRule::Compass => distribute_compass(&base.stations, &input.legs, d, input.end),
        LinearRule::Transit => distribute_transit(&base.stations, input.start, d, input.end),
    };

    let bearings = base.bearings.clone();

    tracing::debug!(
        legs = input.legs.len(),
        total_distance,
        misclosure,
        angular = ?angular_error.map(|e| e.degrees),
        "traverse adjusted"
    );

    Ok(CompensatedTraverse {
        unadjusted: raw.stations,
        adjusted,
        bearings,
        closing_error,
        angular_error,
        total_distance,
        relative_precision,
    })
}

/// Shift each station by `d · cumulative distance / total distance`.
fn distribute_compass(
    stations: &[Vector2<f64>],
    legs: &[TraverseLeg],
    d: Vector2<f64>,
    end: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    let total: f64 = legs.iter().map(|l| l.distance).sum();
    let mut cum = 0.0;
    let mut out = Vec::with_capacity(stations.len());
    for (st, leg) in stations.iter().zip(legs) {
        cum += leg.distance;
        let share = if total > 0.0 { cum / total } else { 0.0 };
        out.push(st + d * share);
    }
    snap_last(&mut out, end);
    out
}

/// Shift x by cumulative |Δx| share and y by cumulative |Δy| share.
fn distribute_transit(
    stations: &[Vector2<f64>],
    start: Vector2<f64>,
    d: Vector2<f64>,
    end: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    let mut prev = start;
    let steps: Vec<Vector2<f64>> = stations
        .iter()
        .map(|&st| {
            let step = (st - prev).abs();
            prev = st;
            step
        })
        .collect();
    let sum_x: f64 = steps.iter().map(|s| s.x).sum();
    let sum_y: f64 = steps.iter().map(|s| s.y).sum();
    let mut cum: Vector2<f64> = Vector2::zeros();
    let mut out = Vec::with_capacity(stations.len());
    for (st, step) in stations.iter().zip(&steps) {
        cum += step;
        let fx = if sum_x > 0.0 { cum.x / sum_x } else { 0.0 };
        let fy = if sum_y > 0.0 { cum.y / sum_y } else { 0.0 };
        out.push(Vector2::new(st.x + d.x * fx, st.y + d.y * fy));
    }
    snap_last(&mut out, end);
    out
}

/// The final station closes exactly on the known end point.
#[inline]
fn snap_last(stations: &mut [Vector2<f64>], end: Vector2<f64>) {
    if let Some(last) = stations.last_mut() {
        *last = end;
    }
}
