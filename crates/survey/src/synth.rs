//! Synthetic parcels and traverses (radial jitter + replay tokens).
//!
//! Purpose
//! - Reproducible field data for tests and benches: star-shaped parcels around
//!   a site center, and closed traverses around them with bounded observation
//!   noise on angles and distances.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, sort by angle (counter-clockwise, simple ring).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::angle::{normalize_360, Bearing};
use crate::planar::{planar_bearing, Point};
use crate::traverse::{legs_between, AngularClosure, LinearRule, StartOrientation, TraverseInput};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter parcel sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ParcelCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Meters.
    pub base_radius: f64,
    pub center: Vector2<f64>,
}

impl Default for ParcelCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 4, max: 9 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 80.0,
            center: Vector2::new(1000.0, 2000.0),
        }
    }
}

/// Observation noise for synthetic traverses (uniform, half-widths).
#[derive(Clone, Copy, Debug)]
pub struct TraverseNoise {
    pub parcel: ParcelCfg,
    pub angle_jitter_deg: f64,
    pub distance_jitter_m: f64,
}

impl Default for TraverseNoise {
    fn default() -> Self {
        Self {
            parcel: ParcelCfg::default(),
            angle_jitter_deg: 0.002,
            distance_jitter_m: 0.005,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn draw_ring<R: Rng>(cfg: &ParcelCfg, rng: &mut R) -> Vec<Vector2<f64>> {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-6);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            phase + (k as f64) * delta + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u) * r0;
            cfg.center + Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}

/// Draw a counter-clockwise parcel ring with ids `1..=n`.
pub fn draw_parcel(cfg: ParcelCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    draw_ring(&cfg, &mut rng)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Point::new(i as i64 + 1, p.x, p.y))
        .collect()
}

/// Closed traverse around a synthetic parcel, with a closing angle observation.
///
/// The traverse starts and ends on the first vertex and is oriented toward the
/// second vertex, which is also the closing reference. The last leg's angle
/// turns back onto the first leg.
pub fn synthetic_traverse(noise: TraverseNoise, tok: ReplayToken) -> Option<TraverseInput> {
    let mut rng = tok.to_std_rng();
    let ring = draw_ring(&noise.parcel, &mut rng);
    let n = ring.len();
    if n < 3 {
        return None;
    }
    let start = ring[0];
    let initial = planar_bearing(start, ring[1]);
    let mut path: Vec<Vector2<f64>> = ring[1..].to_vec();
    path.push(start);
    let aj = noise.angle_jitter_deg.abs();
    let dj = noise.distance_jitter_m.abs();
    let mut jitter = |amp: f64| (rng.gen::<f64>() * 2.0 - 1.0) * amp;
    let legs = legs_between(start, &path, initial)
        .into_iter()
        .map(|mut leg| {
            leg.angle += jitter(aj);
            leg.distance += jitter(dj);
            leg
        })
        .collect();
    let last_back: Bearing = planar_bearing(start, ring[n - 1]);
    let measured_angle = normalize_360(initial.degrees() - last_back.degrees()) + jitter(aj);
    Some(TraverseInput {
        start,
        end: start,
        orientation: StartOrientation::Toward(ring[1]),
        legs,
        closure: Some(AngularClosure {
            reference: ring[1],
            measured_angle,
        }),
        rule: LinearRule::Compass,
    })
}
