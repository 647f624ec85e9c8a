//! Plain text files of point coordinates, triplet distances and normals.
//!
//! Values are written in scientific notation with 18 digits after the decimal
//! point and separated by whitespace, one row per line.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::Point;

/// Reads every whitespace-separated number in a file.
///
/// # Errors
///
/// * If the file cannot be read.
/// * If any token is not a number.
pub fn read_values<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("Could not read {path:?}: {e}"))?;
    text.split_whitespace()
        .map(|t| t.parse::<f64>().map_err(|e| format!("Could not parse {t:?} in {path:?}: {e}")))
        .collect()
}

/// Writes each value on its own line.
///
/// # Errors
///
/// * If the file cannot be created or written.
pub fn write_values<P: AsRef<Path>>(path: P, values: &[f64]) -> Result<(), String> {
    let mut writer = BufWriter::new(File::create(path).map_err(|e| e.to_string())?);
    for v in values {
        writeln!(writer, "{v:.18e}").map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

/// Reads rows of three numbers, one row per non-empty line.
///
/// # Errors
///
/// * If the file cannot be read.
/// * If any line does not hold exactly three numbers.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<[f64; 3]>, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("Could not read {path:?}: {e}"))?;

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let values = line
                .split_whitespace()
                .map(|t| t.parse::<f64>().map_err(|e| format!("Could not parse {t:?} on line {}: {e}", i + 1)))
                .collect::<Result<Vec<_>, _>>()?;
            <[f64; 3]>::try_from(values)
                .map_err(|v| format!("Expected 3 values on line {} of {path:?} but got {}.", i + 1, v.len()))
        })
        .collect()
}

/// Writes rows of three numbers, one row per line.
///
/// # Errors
///
/// * If the file cannot be created or written.
pub fn write_rows<P: AsRef<Path>>(path: P, rows: &[[f64; 3]]) -> Result<(), String> {
    let mut writer = BufWriter::new(File::create(path).map_err(|e| e.to_string())?);
    for [a, b, c] in rows {
        writeln!(writer, "{a:.18e} {b:.18e} {c:.18e}").map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

/// Writes points as the flattened `3 x n` matrix of their coordinates: all
/// `x` values, then all `y` values, then all `z` values.
///
/// # Errors
///
/// * If the file cannot be created or written.
pub fn write_nodes<P: AsRef<Path>>(path: P, nodes: &[Point]) -> Result<(), String> {
    let values = (0..3).flat_map(|axis| nodes.iter().map(move |p| p[axis])).collect::<Vec<_>>();
    write_values(path, &values)
}

/// Reads points written by [`write_nodes`].
///
/// # Errors
///
/// * If the file cannot be read or parsed.
/// * If the number of values is not a multiple of three.
pub fn read_nodes<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, String> {
    let values = read_values(path)?;
    if values.len() % 3 != 0 {
        return Err(format!("Expected a multiple of 3 coordinates but got {}.", values.len()));
    }

    let n = values.len() / 3;
    Ok((0..n)
        .map(|i| Point::new(values[i], values[n + i], values[2 * n + i]))
        .collect())
}

/// Writes points as rows of three coordinates.
///
/// # Errors
///
/// * If the file cannot be created or written.
pub fn write_vectors<P: AsRef<Path>>(path: P, vectors: &[Point]) -> Result<(), String> {
    let rows = vectors.iter().map(|v| [v.x, v.y, v.z]).collect::<Vec<_>>();
    write_rows(path, &rows)
}

/// Reads points written by [`write_vectors`].
///
/// # Errors
///
/// * If the file cannot be read or parsed.
pub fn read_vectors<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, String> {
    Ok(read_rows(path)?.into_iter().map(Point::from).collect())
}
