//! Several planes mixed into one point cloud.

use rand::prelude::*;

use crate::{Plane, Point};

/// The points of several `Plane`s, shuffled together.
#[derive(Clone, Debug)]
pub struct PlaneCollection {
    /// The shuffled points.
    nodes: Vec<Point>,
    /// The normal of each plane.
    normals: Vec<Point>,
    /// The rotation angles of each plane.
    angles: Vec<[f64; 2]>,
}

impl PlaneCollection {
    /// Combines the given planes and shuffles their points.
    pub fn new<R: Rng>(planes: &[Plane], rng: &mut R) -> Self {
        let mut nodes = planes.iter().flat_map(|p| p.nodes().iter().copied()).collect::<Vec<_>>();
        nodes.shuffle(rng);

        Self {
            nodes,
            normals: planes.iter().map(|p| *p.normal()).collect(),
            angles: planes.iter().map(Plane::angles).collect(),
        }
    }

    /// The shuffled points of all planes.
    #[must_use]
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// The total number of points.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The normals of the planes, in the order the planes were given.
    #[must_use]
    pub fn normals(&self) -> &[Point] {
        &self.normals
    }

    /// The rotation angles of the planes.
    #[must_use]
    pub fn angles(&self) -> &[[f64; 2]] {
        &self.angles
    }
}
