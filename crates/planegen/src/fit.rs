//! Least-squares planes through the origin.

use nalgebra::Matrix3;

use crate::Point;

/// Fits a plane through the origin to the given points.
///
/// The plane minimizes the sum of squared distances from the points, so its
/// normal is the eigenvector of `sum(x * x^T)` with the smallest eigenvalue.
///
/// # Returns
///
/// The unit normal of the plane, or `None` if there are fewer than three
/// points.
#[must_use]
pub fn fit_normal(points: &[Point]) -> Option<Point> {
    if points.len() < 3 {
        return None;
    }

    let scatter = points.iter().fold(Matrix3::zeros(), |acc, x| acc + x * x.transpose());
    let eigen = scatter.symmetric_eigen();

    let (smallest, _) = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|&(_, a), &(_, b)| a.total_cmp(b))?;

    let normal = eigen.eigenvectors.column(smallest).into_owned();
    normal.try_normalize(f64::EPSILON)
}

/// The distance from a point to the plane through the origin with the given
/// unit normal.
#[must_use]
pub fn distance_to_plane(normal: &Point, point: &Point) -> f64 {
    normal.dot(point).abs()
}

/// The distances of three points to the plane through the origin that best
/// fits them.
#[must_use]
pub fn triplet_distances(a: &Point, b: &Point, c: &Point) -> [f64; 3] {
    let points = [*a, *b, *c];
    fit_normal(&points).map_or([0.0; 3], |normal| points.map(|p| distance_to_plane(&normal, &p)))
}
