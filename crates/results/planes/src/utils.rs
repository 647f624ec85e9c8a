//! Helpers for the planes experiment.

use std::path::{Path, PathBuf};

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};
use planegen::{io, Instance};

/// Sends `ftlog` output to `logs/<name>.log` under the working directory,
/// rotating the file daily.
///
/// Logging from `ftlog`'s own appenders goes to `logs/<name>.err.log`.
///
/// # Returns
///
/// The guard that flushes the logger when dropped, and the path of the log.
///
/// # Errors
///
/// - If the logs directory cannot be created.
/// - If a logger is already installed.
pub fn configure_logger(name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let logs_dir = std::env::current_dir().map_err(|e| e.to_string())?.join("logs");
    std::fs::create_dir_all(&logs_dir).map_err(|e| format!("Could not create {logs_dir:?}: {e}"))?;

    let log_path = logs_dir.join(format!("{name}.log"));
    let appender_log = logs_dir.join(format!("{name}.err.log"));
    let root = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    ftlog::Builder::new()
        .max_log_level(LevelFilter::Info)
        .root(root)
        .filter("ftlog::appender", "appender-errors", LevelFilter::Debug)
        .appender("appender-errors", FileAppender::new(appender_log))
        .try_init()
        .map(|guard| (guard, log_path))
        .map_err(|e| format!("Could not start the logger: {e}"))
}

/// The paths of the points, distances and normals files for `n` points.
fn paths(dir: &Path, n: usize) -> [PathBuf; 3] {
    [
        dir.join(format!("{n}.txt")),
        dir.join(format!("d{n}.txt")),
        dir.join(format!("n{n}.txt")),
    ]
}

/// Writes the points, distances and normals of an instance to `dir`.
///
/// # Errors
///
/// - If `dir` could not be created.
/// - If any of the files could not be written.
pub fn save(instance: &Instance, dir: &Path) -> Result<(), String> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    }

    let [nodes, distances, normals] = paths(dir, instance.node_count());
    io::write_nodes(&nodes, instance.nodes())?;
    io::write_rows(&distances, instance.distances())?;
    io::write_vectors(&normals, instance.normals())?;

    ftlog::info!("Saved {} points to {dir:?}.", instance.node_count());
    Ok(())
}

/// Reads an instance of `n` points from `dir`.
///
/// # Errors
///
/// - If any of the files could not be read or parsed.
/// - If the files do not describe `n` points.
pub fn load(dir: &Path, n: usize, constant: f64) -> Result<Instance, String> {
    let [nodes, distances, normals] = paths(dir, n);

    let nodes = io::read_nodes(&nodes)?;
    if nodes.len() != n {
        return Err(format!("Expected {n} points in {dir:?} but found {}.", nodes.len()));
    }
    let instance = Instance::from_parts(nodes, io::read_rows(&distances)?, io::read_vectors(&normals)?, constant)?;

    ftlog::info!("Loaded {n} points from {dir:?}.");
    Ok(instance)
}

/// The mean of the values, or `None` if there are none.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
