//! Comparing recovered clusters with the planes that generated them.

use crate::{fit, Point};

/// Fits a plane to each cluster with at least three points.
///
/// # Errors
///
/// * If any cluster refers to a point that does not exist.
pub fn refit_normals(clusters: &[Vec<usize>], nodes: &[Point]) -> Result<Vec<Point>, String> {
    let mut normals = Vec::new();
    for cluster in clusters.iter().filter(|c| c.len() >= 3) {
        let points = cluster
            .iter()
            .map(|&i| {
                nodes
                    .get(i)
                    .copied()
                    .ok_or_else(|| format!("Point {i} is out of range for {} points.", nodes.len()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(normal) = fit::fit_normal(&points) {
            normals.push(normal);
        }
    }
    Ok(normals)
}

/// The angle, in degrees, between the planes with the given normals.
///
/// The orientation of a normal does not matter, so the result is in
/// `[0, 90]`. Zero vectors are treated as parallel to everything.
#[must_use]
pub fn plane_angle(a: &Point, b: &Point) -> f64 {
    let norms = a.norm() * b.norm();
    let cosine = if norms > 0.0 { a.dot(b) / norms } else { 1.0 };
    let cosine = if cosine.abs() >= 1.0 { 1.0 } else { cosine };

    let angle = cosine.acos().to_degrees();
    angle.abs().min((180.0 - angle).abs())
}

/// For each reference normal, the smallest angle to any of the recovered
/// normals.
///
/// Returns an empty list when there are no recovered normals.
#[must_use]
pub fn angle_deviations(reference: &[Point], recovered: &[Point]) -> Vec<f64> {
    if recovered.is_empty() {
        return Vec::new();
    }

    reference
        .iter()
        .map(|r| recovered.iter().map(|n| plane_angle(r, n)).fold(f64::INFINITY, f64::min))
        .collect()
}

/// Refits the clusters and reports the angle deviations from the reference
/// normals.
///
/// # Errors
///
/// See [`refit_normals`].
pub fn compare(clusters: &[Vec<usize>], nodes: &[Point], reference: &[Point]) -> Result<Vec<f64>, String> {
    let recovered = refit_normals(clusters, nodes)?;
    ftlog::debug!(
        "Refit {} of {} clusters against {} reference planes.",
        recovered.len(),
        clusters.len(),
        reference.len()
    );
    Ok(angle_deviations(reference, &recovered))
}
