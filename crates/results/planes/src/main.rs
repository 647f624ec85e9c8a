#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
//! Recovering planes from a synthetic point cloud with greedy moving.

use std::path::PathBuf;

use clap::Parser;
use greedy_planes::{GreedyClustering, GreedyMovingKl, SearchConfig};
use planegen::{diagnostics, Instance, Plane, PlaneCollection};
use rand::prelude::*;

mod utils;

/// Clusters points sampled from several planes and reports how well the
/// planes were recovered.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The rotations of each plane as `alpha,beta` in degrees.
    #[arg(short('p'), long, value_parser = parse_angles, num_args = 1.., default_values = ["0,90", "90,0"])]
    planes: Vec<[f64; 2]>,

    /// The number of points sampled on each plane.
    #[arg(short('n'), long, default_value = "8")]
    points_per_plane: usize,

    /// The standard deviation of the noise added to the points.
    #[arg(short('d'), long, default_value = "0.0")]
    deviation: f64,

    /// The distance below which a triplet is rewarded for being grouped.
    #[arg(short('c'), long, default_value = "0.03")]
    constant: f64,

    /// The seed for the random number generator.
    #[arg(short('s'), long)]
    seed: Option<u64>,

    /// The number of times to run the clustering.
    #[arg(short('r'), long, default_value = "1")]
    repeats: usize,

    /// The number of decimal digits kept when comparing gains.
    #[arg(long, default_value_t = greedy_planes::config::DEFAULT_PRECISION)]
    precision: u32,

    /// An upper bound on the number of passes.
    #[arg(short('m'), long)]
    max_passes: Option<usize>,

    /// Whether to compute candidate moves in parallel.
    #[arg(long)]
    parallel: bool,

    /// The directory to which the points, distances and normals are written.
    #[arg(short('o'), long)]
    out_dir: Option<PathBuf>,

    /// The directory from which to read the points, distances and normals
    /// instead of generating them.
    #[arg(short('i'), long)]
    inp_dir: Option<PathBuf>,
}

/// Parses a pair of angles given as `alpha,beta`.
fn parse_angles(s: &str) -> Result<[f64; 2], String> {
    let (alpha, beta) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected `alpha,beta` but got {s:?}."))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("Invalid angle {v:?}: {e}"));
    Ok([parse(alpha)?, parse(beta)?])
}

/// Samples the planes described by the arguments and builds an instance.
fn generate(args: &Args) -> Result<Instance, String> {
    let mut rng = args.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let planes = args
        .planes
        .iter()
        .map(|&angles| Plane::new(args.points_per_plane, angles, args.deviation, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;
    let collection = PlaneCollection::new(&planes, &mut rng);
    ftlog::info!(
        "Generated {} points on {} planes.",
        collection.node_count(),
        planes.len()
    );

    Ok(Instance::from_collection(&collection, args.constant))
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    println!("Args: {args:?}");

    if args.repeats == 0 {
        return Err("The number of repeats must be positive.".to_string());
    }

    let node_count = args.points_per_plane * args.planes.len();
    let (_guard, log_path) = utils::configure_logger(&format!("planes-{node_count}"))?;
    println!("Log file: {log_path:?}");

    ftlog::info!("{args:?}");

    let instance = if let Some(inp_dir) = &args.inp_dir {
        utils::load(inp_dir, node_count, args.constant)?
    } else {
        generate(&args)?
    };
    if let Some(out_dir) = &args.out_dir {
        utils::save(&instance, out_dir)?;
    }

    let costs = instance.costs()?;
    let config = SearchConfig::default()
        .with_precision(args.precision)
        .with_max_passes(args.max_passes)
        .with_measure_time(true)
        .with_parallel(args.parallel);

    let mut times = Vec::with_capacity(args.repeats);
    let mut cluster_counts = Vec::with_capacity(args.repeats);
    let mut deviations = Vec::new();

    for r in 0..args.repeats {
        let result = GreedyMovingKl::new(&costs, config.clone()).cluster()?;
        let elapsed = result.elapsed.map_or(0.0, |e| e.as_secs_f64());
        let angles = diagnostics::compare(&result.clusters, instance.nodes(), instance.normals())?;

        ftlog::info!(
            "Repeat {}: {} clusters in {} passes, cost {:.6e}, {elapsed:.6} seconds, angle deviations {angles:?}.",
            r + 1,
            result.num_clusters(),
            result.num_passes(),
            result.total_cost
        );

        times.push(elapsed);
        #[allow(clippy::cast_precision_loss)]
        cluster_counts.push(result.num_clusters() as f64);
        deviations.extend(angles);
    }

    let mean_time = utils::mean(&times).unwrap_or_default();
    let mean_clusters = utils::mean(&cluster_counts).unwrap_or_default();
    println!("Mean time: {mean_time:.6} seconds");
    println!("Mean number of clusters: {mean_clusters:.3}");
    match utils::mean(&deviations) {
        Some(d) => println!("Mean angle deviation: {d:.6} degrees"),
        None => println!("Mean angle deviation: none, no cluster had three points"),
    }
    ftlog::info!("Mean time {mean_time:.6} s, mean clusters {mean_clusters:.3}, deviations {deviations:?}.");

    Ok(())
}
