use super::*;
use crate::angle::Bearing;
use crate::error::SolveError;
use crate::synth::{synthetic_traverse, ReplayToken, TraverseNoise};
use nalgebra::{vector, Vector2};

fn leg(angle: f64, distance: f64) -> TraverseLeg {
    TraverseLeg { angle, distance }
}

fn input(
    start: Vector2<f64>,
    end: Vector2<f64>,
    reference: f64,
    legs: Vec<TraverseLeg>,
) -> TraverseInput {
    TraverseInput {
        start,
        end,
        orientation: StartOrientation::Bearing(Bearing::new(reference)),
        legs,
        closure: None,
        rule: LinearRule::Compass,
    }
}

#[test]
fn straight_line_closes_exactly() {
    // Initial bearing is the first leg; a straight continuation is a 180° angle.
    let job = input(
        vector![0.0, 0.0],
        vector![100.0, 0.0],
        90.0,
        vec![leg(180.0, 50.0), leg(180.0, 50.0)],
    );
    let res = compensated_traverse(&job).unwrap();
    assert!((res.unadjusted[0] - vector![50.0, 0.0]).norm() < 1e-9);
    let last = *res.unadjusted.last().unwrap();
    assert!((last - vector![100.0, 0.0]).norm() < 1e-9);
    assert!(res.closing_error.total < 1e-9);
    assert_eq!(res.relative_precision, RelativePrecision::Infinite);
    assert!(res.relative_precision.ratio().is_infinite());
    assert!((res.total_distance - 100.0).abs() < 1e-12);
    assert!(res.angular_error.is_none());
    for b in &res.bearings {
        assert!((b.degrees() - 90.0).abs() < 1e-9);
    }
}

#[test]
fn first_leg_follows_initial_bearing() {
    let w = walk(vector![0.0, 0.0], Bearing::NORTH, &[leg(90.0, 10.0)]);
    assert!((w.stations[0] - vector![0.0, 10.0]).norm() < 1e-9);
    assert_eq!(w.bearings, vec![Bearing::NORTH]);
    // The angle at the new station turns the next leg to 270°.
    let w = walk(
        vector![0.0, 0.0],
        Bearing::NORTH,
        &[leg(90.0, 10.0), leg(0.0, 5.0)],
    );
    assert!((w.bearings[1].degrees() - 270.0).abs() < 1e-9);
    assert!((w.stations[1] - vector![-5.0, 10.0]).norm() < 1e-9);
}

#[test]
fn zero_angle_doubles_back() {
    let w = walk(
        vector![0.0, 0.0],
        Bearing::new(90.0),
        &[leg(0.0, 50.0), leg(0.0, 50.0)],
    );
    assert!((w.stations[0] - vector![50.0, 0.0]).norm() < 1e-9);
    assert!((w.stations[1] - vector![0.0, 0.0]).norm() < 1e-9);
    assert!((w.bearings[0].degrees() - 90.0).abs() < 1e-9);
    assert!((w.bearings[1].degrees() - 270.0).abs() < 1e-9);
}

#[test]
fn empty_legs_yield_no_result() {
    let job = input(vector![0.0, 0.0], vector![1.0, 1.0], 0.0, Vec::new());
    assert_eq!(
        compensated_traverse(&job),
        Err(SolveError::InsufficientInput { needed: 1, got: 0 })
    );
}

fn square_legs(last_distance: f64) -> Vec<TraverseLeg> {
    vec![
        leg(90.0, 100.0),
        leg(90.0, 100.0),
        leg(90.0, 100.0),
        leg(90.0, last_distance),
    ]
}

#[test]
fn square_loop_walks_counter_clockwise() {
    let w = walk(vector![0.0, 0.0], Bearing::new(180.0), &square_legs(100.0));
    let expected = [
        vector![0.0, -100.0],
        vector![100.0, -100.0],
        vector![100.0, 0.0],
        vector![0.0, 0.0],
    ];
    for (s, e) in w.stations.iter().zip(expected.iter()) {
        assert!((s - e).norm() < 1e-9);
    }
}

#[test]
fn compass_rule_distributes_by_cumulative_distance() {
    let job = input(vector![0.0, 0.0], vector![0.0, 0.0], 180.0, square_legs(100.4));
    let res = compensated_traverse(&job).unwrap();
    let ce = res.closing_error;
    assert!((ce.dx - 0.4).abs() < 1e-9);
    assert!(ce.dy.abs() < 1e-9);
    assert!((ce.total - 0.4).abs() < 1e-9);
    assert!((ce.bearing.degrees() - 90.0).abs() < 1e-6);
    match res.relative_precision {
        RelativePrecision::OneIn(n) => assert!((n - 400.4 / 0.4).abs() < 1e-6),
        RelativePrecision::Infinite => panic!("expected finite precision"),
    }
    let share = 200.0 / 400.4;
    let expect = vector![100.0 + 0.4 * share, -100.0];
    assert!((res.adjusted[1] - expect).norm() < 1e-9);
    assert_eq!(*res.adjusted.last().unwrap(), vector![0.0, 0.0]);
    // unadjusted stays raw
    assert!((res.unadjusted[3] - vector![-0.4, 0.0]).norm() < 1e-9);
}

#[test]
fn transit_rule_uses_coordinate_shares() {
    // East 100 then north 100; known end is 0.5 m further east.
    let legs = vec![leg(90.0, 100.0), leg(0.0, 100.0)];
    let mut job = input(vector![0.0, 0.0], vector![100.5, 100.0], 90.0, legs);
    let compass = compensated_traverse(&job).unwrap();
    assert!((compass.adjusted[0] - vector![100.25, 0.0]).norm() < 1e-9);
    job.rule = LinearRule::Transit;
    let transit = compensated_traverse(&job).unwrap();
    assert!((transit.adjusted[0] - vector![100.5, 0.0]).norm() < 1e-9);
    assert_eq!(transit.adjusted[1], vector![100.5, 100.0]);
}

#[test]
fn orientation_point_matches_given_bearing() {
    let start = vector![100.0, 0.0];
    let given = input(start, vector![100.0, 0.0], 180.0, square_legs(100.0));
    let mut sighted = given.clone();
    sighted.orientation = StartOrientation::Toward(vector![100.0, -250.0]);
    let a = compensated_traverse(&given).unwrap();
    let b = compensated_traverse(&sighted).unwrap();
    for (p, q) in a.unadjusted.iter().zip(&b.unadjusted) {
        assert!((p - q).norm() < 1e-9);
    }
}

#[test]
fn angular_closure_reduces_uniform_angle_bias() {
    let biased: Vec<TraverseLeg> = square_legs(100.0)
        .into_iter()
        .map(|l| leg(l.angle + 0.01, l.distance))
        .collect();
    let mut job = input(vector![0.0, 0.0], vector![0.0, 0.0], 180.0, biased);
    // At the end point the backsight is the previous station (east);
    // the reference (0,100) lies due north: 270° clockwise from the backsight.
    job.closure = Some(AngularClosure {
        reference: vector![0.0, 100.0],
        measured_angle: 270.0,
    });
    let res = compensated_traverse(&job).unwrap();
    // Three biased angles precede the last leg: measured closing bearing 0.03°.
    let ang = res.angular_error.expect("angular error");
    assert!((ang.degrees + 0.03).abs() < 1e-9);
    assert!((ang.per_station + 0.0075).abs() < 1e-9);
    let last = res.bearings.last().unwrap().degrees();
    assert!((last - 270.0075).abs() < 1e-9);

    let mut bare = job.clone();
    bare.closure = None;
    let raw = compensated_traverse(&bare).unwrap();
    assert!(res.closing_error.total < raw.closing_error.total);
}

#[test]
fn angular_misclosure_of_empty_walk_is_none() {
    let w = walk(vector![0.0, 0.0], Bearing::NORTH, &[]);
    let c = AngularClosure {
        reference: vector![1.0, 0.0],
        measured_angle: 10.0,
    };
    assert!(angular_misclosure(&w, vector![0.0, 0.0], &c).is_none());
}

#[test]
fn last_adjusted_station_is_end_for_synthetic_traverses() {
    for index in 0..20 {
        let tok = ReplayToken { seed: 11, index };
        let mut job = synthetic_traverse(TraverseNoise::default(), tok).expect("traverse");
        for rule in [LinearRule::Compass, LinearRule::Transit] {
            job.rule = rule;
            let res = compensated_traverse(&job).unwrap();
            assert_eq!(*res.adjusted.last().unwrap(), job.end);
            assert_eq!(res.adjusted.len(), job.legs.len());
            assert_eq!(res.unadjusted.len(), job.legs.len());
            assert!(res.angular_error.is_some());
            // Survey-grade noise keeps the ratio well above 1:1000.
            assert!(res.relative_precision.ratio() > 1000.0);
        }
        job.closure = None;
        let res = compensated_traverse(&job).unwrap();
        assert_eq!(*res.adjusted.last().unwrap(), job.end);
    }
}

#[test]
fn angular_closure_improves_noisy_traverse_on_average() {
    let mut with = 0.0;
    let mut without = 0.0;
    let noise = TraverseNoise {
        angle_jitter_deg: 0.01,
        distance_jitter_m: 0.0,
        ..TraverseNoise::default()
    };
    for index in 0..30 {
        let tok = ReplayToken { seed: 5, index };
        let job = synthetic_traverse(noise, tok).expect("traverse");
        with += compensated_traverse(&job).unwrap().closing_error.total;
        let mut bare = job.clone();
        bare.closure = None;
        without += compensated_traverse(&bare).unwrap().closing_error.total;
    }
    assert!(with < without);
}

#[test]
fn legs_between_inverts_walk() {
    let start = vector![500.0, 500.0];
    let stations = vec![
        vector![540.0, 530.0],
        vector![600.0, 480.0],
        vector![560.0, 420.0],
        vector![500.0, 500.0],
    ];
    let exit = Bearing::new(33.0);
    let legs = legs_between(start, &stations, exit);
    assert_eq!(legs.len(), 4);
    assert!((legs[0].distance - 50.0).abs() < 1e-9);
    assert!(legs.iter().all(|l| (0.0..360.0).contains(&l.angle)));
    let initial = StartOrientation::Toward(stations[0]).resolve(start);
    let w = walk(start, initial, &legs);
    for (got, want) in w.stations.iter().zip(&stations) {
        assert!((got - want).norm() < 1e-9);
    }
    // The last angle turns onto the exit bearing.
    let after = w.bearings[3].turn(180.0 + legs[3].angle);
    assert!((after.degrees() - 33.0).abs() < 1e-9);
}
