//! Print closure statistics for a few synthetic traverses.
//!
//! Usage:
//!   cargo run -p survey --example closure_report -- compass
//!   cargo run -p survey --example closure_report -- transit

use survey::synth::{synthetic_traverse, ReplayToken, TraverseNoise};
use survey::traverse::{compensated_traverse, LinearRule};

fn main() {
    let rule = match std::env::args().nth(1).as_deref() {
        Some("transit") => LinearRule::Transit,
        Some("compass") | None => LinearRule::Compass,
        Some(_) => {
            eprintln!("usage: closure_report [compass|transit]");
            return;
        }
    };
    for index in 0..5 {
        let Some(mut job) = synthetic_traverse(TraverseNoise::default(), ReplayToken { seed: 2025, index })
        else {
            continue;
        };
        job.rule = rule;
        match compensated_traverse(&job) {
            Ok(res) => {
                let ang = res.angular_error.map(|a| a.degrees * 3600.0).unwrap_or(0.0);
                println!(
                    "traverse {index}: legs={}, length={:.3} m, angular={:+.1}\", linear={:.4} m, 1:{:.0}",
                    job.legs.len(),
                    res.total_distance,
                    ang,
                    res.closing_error.total,
                    res.relative_precision.ratio()
                );
            }
            Err(err) => eprintln!("traverse {index}: {err}"),
        }
    }
}
