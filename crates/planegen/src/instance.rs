//! An instance of the clustering problem built from a point cloud.

use greedy_planes::CostTable;
use rayon::prelude::*;

use crate::{fit, PlaneCollection, Point};

/// A point cloud, the normals of the planes it was sampled from, and the
/// distances of every triple of points to their best-fit plane.
///
/// The cost of grouping a triple is the largest of its three distances minus
/// `constant`. Triples that are flatter than `constant` thus get negative
/// costs and encourage grouping.
#[derive(Clone, Debug)]
pub struct Instance {
    /// The points.
    nodes: Vec<Point>,
    /// The normals of the generating planes.
    normals: Vec<Point>,
    /// The offset subtracted from the distances to get costs.
    constant: f64,
    /// The distances of each triple, in lexicographic order of triples.
    distances: Vec<[f64; 3]>,
}

impl Instance {
    /// Builds an instance from a generated collection of planes.
    ///
    /// The distances of all triples are computed in parallel.
    #[must_use]
    pub fn from_collection(collection: &PlaneCollection, constant: f64) -> Self {
        let nodes = collection.nodes().to_vec();
        let distances = Self::compute_distances(&nodes);

        Self {
            nodes,
            normals: collection.normals().to_vec(),
            constant,
            distances,
        }
    }

    /// Rebuilds an instance from previously computed parts.
    ///
    /// # Errors
    ///
    /// * If the number of distance rows is not the number of triples of
    ///   points.
    pub fn from_parts(
        nodes: Vec<Point>,
        distances: Vec<[f64; 3]>,
        normals: Vec<Point>,
        constant: f64,
    ) -> Result<Self, String> {
        let expected = greedy_planes::cost::num_triplets(nodes.len());
        if distances.len() != expected {
            return Err(format!(
                "Expected {expected} rows of distances for {} points but got {}.",
                nodes.len(),
                distances.len()
            ));
        }

        Ok(Self {
            nodes,
            normals,
            constant,
            distances,
        })
    }

    /// Computes the distances of every triple to its best-fit plane.
    fn compute_distances(nodes: &[Point]) -> Vec<[f64; 3]> {
        let triplets = CostTable::triplets(nodes.len()).collect::<Vec<_>>();
        ftlog::debug!("Fitting planes to {} triplets of {} points.", triplets.len(), nodes.len());

        triplets
            .par_iter()
            .map(|&(i, j, k)| fit::triplet_distances(&nodes[i], &nodes[j], &nodes[k]))
            .collect()
    }

    /// The points.
    #[must_use]
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// The number of points.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The normals of the generating planes.
    #[must_use]
    pub fn normals(&self) -> &[Point] {
        &self.normals
    }

    /// The offset subtracted from the distances to get costs.
    #[must_use]
    pub const fn constant(&self) -> f64 {
        self.constant
    }

    /// The distances of each triple to its best-fit plane.
    #[must_use]
    pub fn distances(&self) -> &[[f64; 3]] {
        &self.distances
    }

    /// The costs of grouping each triple.
    ///
    /// # Errors
    ///
    /// * If any distance is not finite.
    pub fn costs(&self) -> Result<CostTable, String> {
        let costs = self
            .distances
            .iter()
            .map(|d| d.iter().copied().fold(f64::NEG_INFINITY, f64::max) - self.constant)
            .collect();
        CostTable::new(self.node_count(), costs)
    }
}
