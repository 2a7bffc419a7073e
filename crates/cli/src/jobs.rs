//! Job-file loading for the subcommands.
//!
//! JSON jobs deserialize straight into the engine's serde types. Point lists
//! may also come from CSV (`id,x,y` header) through polars' lazy reader.
//! Every numeric value is checked for finiteness here, before the engine sees it.

use anyhow::{anyhow, bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use survey::api::{HelmertPair, Point, TraverseInput};
use survey::traverse::StartOrientation;
use survey::Vec2;

/// Resection job: three known points and the station angles ∠APB, ∠BPC (degrees).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ResectionJob {
    pub a: Vec2<f64>,
    pub b: Vec2<f64>,
    pub c: Vec2<f64>,
    pub alpha: f64,
    pub beta: f64,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn ensure_finite<I: IntoIterator<Item = f64>>(what: &str, values: I) -> Result<()> {
    if values.into_iter().all(f64::is_finite) {
        Ok(())
    } else {
        bail!("{what}: non-finite coordinate or observation")
    }
}

fn xy(v: &Vec2<f64>) -> [f64; 2] {
    [v.x, v.y]
}

/// Points from `.csv` (polars) or JSON (`[{"id":1,"x":..,"y":..}, ..]`).
pub fn load_points(path: &Path) -> Result<Vec<Point>> {
    let points = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
        points_from_csv(path)?
    } else {
        read_json::<Vec<Point>>(path)?
    };
    ensure_finite("points", points.iter().flat_map(|p| [p.x, p.y]))?;
    Ok(points)
}

fn points_from_csv(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("id").cast(DataType::Int64),
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "points_csv_shape");

    let ids = df.column("id")?.i64()?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    ids.into_iter()
        .zip(xs)
        .zip(ys)
        .enumerate()
        .map(|(row, ((id, x), y))| match (id, x, y) {
            (Some(id), Some(x), Some(y)) => Ok(Point::new(id, x, y)),
            _ => Err(anyhow!("{}: missing value in row {}", path.display(), row + 1)),
        })
        .collect()
}

pub fn load_traverse(path: &Path) -> Result<TraverseInput> {
    let job: TraverseInput = read_json(path)?;
    let mut values: Vec<f64> = [xy(&job.start), xy(&job.end)].concat();
    match job.orientation {
        StartOrientation::Bearing(b) => values.push(b.degrees()),
        StartOrientation::Toward(p) => values.extend(xy(&p)),
    }
    for leg in &job.legs {
        values.extend([leg.angle, leg.distance]);
    }
    if let Some(c) = &job.closure {
        values.extend(xy(&c.reference));
        values.push(c.measured_angle);
    }
    ensure_finite("traverse", values)?;
    Ok(job)
}

pub fn load_pairs(path: &Path) -> Result<Vec<HelmertPair>> {
    let pairs: Vec<HelmertPair> = read_json(path)?;
    ensure_finite(
        "control pairs",
        pairs.iter().flat_map(|p| [xy(&p.source), xy(&p.target)].concat()),
    )?;
    Ok(pairs)
}

/// Plain coordinate list (`[[x, y], ..]`) to push through a fitted transform.
pub fn load_coords(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let coords: Vec<Vec2<f64>> = read_json(path)?;
    ensure_finite("coordinates", coords.iter().flat_map(xy))?;
    Ok(coords)
}

pub fn load_resection(path: &Path) -> Result<ResectionJob> {
    let job: ResectionJob = read_json(path)?;
    let values = [xy(&job.a), xy(&job.b), xy(&job.c), [job.alpha, job.beta]].concat();
    ensure_finite("resection", values)?;
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_points_are_read_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parcel.csv");
        fs::write(&path, "id,x,y\n1,0,0\n2,10,0\n3,10.5,10\n4,0,10\n").unwrap();
        let pts = load_points(&path).unwrap();
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[2], Point::new(3, 10.5, 10.0));
    }

    #[test]
    fn json_points_and_nan_rejection() {
        let dir = tempdir().unwrap();
        let ok = dir.path().join("pts.json");
        fs::write(&ok, r#"[{"id":1,"x":1.0,"y":2.0},{"id":2,"x":3.0,"y":4.0}]"#).unwrap();
        assert_eq!(load_points(&ok).unwrap()[1], Point::new(2, 3.0, 4.0));

        let bad = dir.path().join("bad.csv");
        fs::write(&bad, "id,x,y\n1,0,0\n2,NaN,0\n").unwrap();
        assert!(load_points(&bad).is_err());
    }

    #[test]
    fn traverse_job_defaults_rule_and_closure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trav.json");
        let job = r#"{
            "start": [0.0, 0.0],
            "end": [100.0, 0.0],
            "orientation": {"bearing": 90.0},
            "legs": [{"angle": 180.0, "distance": 50.0}, {"angle": 180.0, "distance": 50.0}]
        }"#;
        fs::write(&path, job).unwrap();
        let t = load_traverse(&path).unwrap();
        assert_eq!(t.legs.len(), 2);
        assert!(t.closure.is_none());
        assert_eq!(t.rule, survey::api::LinearRule::Compass);
    }

    #[test]
    fn job_bearings_are_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trav.json");
        let job = r#"{
            "start": [0.0, 0.0],
            "end": [0.0, 10.0],
            "orientation": {"bearing": 450.0},
            "legs": [{"angle": 90.0, "distance": 10.0}]
        }"#;
        fs::write(&path, job).unwrap();
        let t = load_traverse(&path).unwrap();
        match t.orientation {
            StartOrientation::Bearing(b) => assert!((b.degrees() - 90.0).abs() < 1e-12),
            StartOrientation::Toward(_) => panic!("expected a bearing"),
        }
    }

    #[test]
    fn malformed_resection_job_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("res.json");
        fs::write(&path, r#"{"a":[0,0],"b":[10,0],"alpha":90}"#).unwrap();
        assert!(load_resection(&path).is_err());
        assert!(load_resection(&dir.path().join("missing.json")).is_err());
    }
}
