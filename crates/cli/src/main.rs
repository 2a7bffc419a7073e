use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use survey::api::{
    compensated_traverse, danger_circle_clearance, helmert_fit, parcel_summary, resection,
    CoordinateSystem,
};
use tracing_subscriber::fmt::SubscriberBuilder;

mod jobs;
mod provenance;

use provenance::Payload;

/// Clearance below which a resection fix is reported as weak.
const WEAK_FIX_CLEARANCE: f64 = 0.05;

#[derive(Parser)]
#[command(name = "survey")]
#[command(about = "Survey computations: parcels, traverses, transformations, resections")]
struct Cmd {
    /// Write the JSON result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum System {
    Local,
    Projected,
    Wgs84,
}

#[derive(Subcommand)]
enum Action {
    /// Area, perimeter, centroid and edge lengths of a parcel ring
    Parcel {
        /// Points as JSON or CSV (`id,x,y`)
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = System::Local)]
        system: System,
        /// EPSG code recorded for projected grids
        #[arg(long, default_value_t = 0)]
        epsg: u32,
    },
    /// Compute and adjust a traverse job
    Traverse {
        #[arg(long)]
        input: PathBuf,
    },
    /// Fit a Helmert transform from control pairs
    Helmert {
        #[arg(long)]
        input: PathBuf,
        /// Coordinates (`[[x, y], ..]`) to transform with the fitted parameters
        #[arg(long)]
        apply: Option<PathBuf>,
    },
    /// Solve a three-point resection
    Resection {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let out = cmd.out.as_deref();
    match cmd.action {
        Action::Parcel {
            input,
            system,
            epsg,
        } => parcel(&input, coordinate_system(system, epsg), out),
        Action::Traverse { input } => traverse(&input, out),
        Action::Helmert { input, apply } => helmert(&input, apply.as_deref(), out),
        Action::Resection { input } => resect(&input, out),
        Action::Report => report(),
    }
}

fn coordinate_system(system: System, epsg: u32) -> CoordinateSystem {
    match system {
        System::Local => CoordinateSystem::Local,
        System::Projected => CoordinateSystem::Projected { epsg },
        System::Wgs84 => CoordinateSystem::Wgs84,
    }
}

fn parcel(input: &Path, system: CoordinateSystem, out: Option<&Path>) -> Result<()> {
    let points = jobs::load_points(input)?;
    let summary = parcel_summary(&points, system);
    tracing::info!(
        input = %input.display(),
        points = points.len(),
        area = summary.area,
        perimeter = summary.perimeter,
        "parcel"
    );
    let result = json!({ "system": system, "summary": summary });
    let payload = Payload::new("parcel", json!({ "system": system })).with_input(input);
    emit(&result, payload, out)
}

fn traverse(input: &Path, out: Option<&Path>) -> Result<()> {
    let job = jobs::load_traverse(input)?;
    let res = compensated_traverse(&job)
        .with_context(|| format!("adjusting traverse {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        legs = job.legs.len(),
        misclosure = res.closing_error.total,
        ratio = res.relative_precision.ratio(),
        angular = ?res.angular_error.map(|e| e.degrees),
        "traverse"
    );
    let payload = Payload::new(
        "traverse",
        json!({ "rule": job.rule, "angular_closure": job.closure.is_some() }),
    )
    .with_input(input);
    emit(&res, payload, out)
}

fn helmert(input: &Path, apply: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let pairs = jobs::load_pairs(input)?;
    let fit = helmert_fit(&pairs).with_context(|| format!("fitting {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        pairs = pairs.len(),
        scale = fit.params.scale,
        rotation = fit.params.rotation.degrees(),
        rmse = fit.rmse,
        "helmert"
    );
    let mut payload = Payload::new("helmert", json!({ "pairs": pairs.len() })).with_input(input);
    let transformed = match apply {
        Some(path) => {
            let coords = jobs::load_coords(path)?;
            payload = payload.with_input(path);
            Some(fit.params.apply_all(&coords))
        }
        None => None,
    };
    let result = json!({ "fit": fit, "transformed": transformed });
    emit(&result, payload, out)
}

fn resect(input: &Path, out: Option<&Path>) -> Result<()> {
    let job = jobs::load_resection(input)?;
    let station = resection(job.a, job.b, job.c, job.alpha, job.beta)
        .with_context(|| format!("resecting {}", input.display()))?;
    let clearance = danger_circle_clearance(job.a, job.b, job.c, station);
    if clearance.is_some_and(|k| k < WEAK_FIX_CLEARANCE) {
        tracing::warn!(clearance = ?clearance, "station close to the danger circle");
    }
    tracing::info!(
        input = %input.display(),
        x = station.x,
        y = station.y,
        "resection"
    );
    let result = json!({ "station": station, "danger_circle_clearance": clearance });
    let payload = Payload::new("resection", json!({ "alpha": job.alpha, "beta": job.beta }))
        .with_input(input);
    emit(&result, payload, out)
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}

/// Print the result, or write it to `out` together with its provenance sidecar.
fn emit<T: Serialize>(result: &T, payload: Payload, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(result)?;
    let Some(out) = out else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "written");
    Ok(())
}
