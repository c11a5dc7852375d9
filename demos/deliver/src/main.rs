//! deliver — print turn-by-turn directions for a delivery tour.
//!
//! ```text
//! deliver <map.txt> <deliveries.csv> <depot-lat> <depot-lon> [--json]
//! ```
//!
//! Try it with the bundled sample:
//!
//! ```text
//! cargo run -p deliver -- demos/deliver/data/westwood.txt \
//!     demos/deliver/data/deliveries.csv 34.0000 -118.0000
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr so
//! `--json` output stays clean on stdout.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dp_core::GeoCoord;
use dp_plan::{DeliveryPlanner, load_requests_csv};
use dp_spatial::StreetMap;

const USAGE: &str = "usage: deliver <map.txt> <deliveries.csv> <depot-lat> <depot-lon> [--json]";

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Args {
    map:        PathBuf,
    deliveries: PathBuf,
    depot_lat:  String,
    depot_lon:  String,
    json:       bool,
}

fn parse_args() -> Result<Args> {
    let mut json = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => positional.push(arg),
        }
    }

    let [map, deliveries, depot_lat, depot_lon]: [String; 4] = match positional.try_into() {
        Ok(p) => p,
        Err(_) => bail!("{USAGE}"),
    };
    Ok(Args {
        map: map.into(),
        deliveries: deliveries.into(),
        depot_lat,
        depot_lon,
        json,
    })
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let map = StreetMap::open(&args.map)
        .with_context(|| format!("loading street map {}", args.map.display()))?;
    let requests = load_requests_csv(&args.deliveries)
        .with_context(|| format!("loading deliveries {}", args.deliveries.display()))?;
    info!(stops = requests.len(), "loaded delivery requests");

    let mut depot = GeoCoord::parse(&args.depot_lat, &args.depot_lon).context("parsing depot")?;
    if !map.contains(&depot) {
        // Coordinates are matched by text, so snap a near-miss onto the map.
        let Some(snapped) = map.nearest_coord(depot.latitude(), depot.longitude()) else {
            bail!("street map {} is empty", args.map.display());
        };
        warn!(requested = %depot, snapped = %snapped, "depot is not a map coordinate; snapping");
        depot = snapped.clone();
    }

    let t0 = Instant::now();
    let plan = DeliveryPlanner::new(&map).plan(&depot, &requests)?;
    info!(
        commands = plan.commands.len(),
        elapsed_ms = t0.elapsed().as_secs_f64() * 1_000.0,
        "plan complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Depot: {depot}");
    println!(
        "Crow-flight tour: {:.2} mi before, {:.2} mi after ordering",
        plan.crow.before, plan.crow.after
    );
    println!();
    for (i, command) in plan.commands.iter().enumerate() {
        println!("{:>3}. {command}", i + 1);
    }
    println!();
    println!(
        "{} deliveries, {:.2} miles driven",
        plan.deliveries(),
        plan.total_miles
    );
    Ok(())
}
