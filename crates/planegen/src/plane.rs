//! A single noisy plane through the origin.

use nalgebra::{Rotation3, Vector3};
use rand::prelude::*;
use rand_distr::Normal;

use crate::Point;

/// Points scattered on a rotated plane.
///
/// The points are first drawn uniformly from the square `[-1, 1]^2` in the
/// `xy` plane. Noise drawn from `N(0, deviation) / 10` is added to their `z`
/// coordinates. The points and the normal `(0, 0, 1)` are then rotated about
/// the `y` axis by `alpha` degrees followed by the `x` axis by `beta` degrees,
/// and finally the points are shifted so that their mean is the origin.
#[derive(Clone, Debug)]
pub struct Plane {
    /// The points on the plane.
    nodes: Vec<Point>,
    /// The unit normal of the plane.
    normal: Point,
    /// The rotation angles, `[alpha, beta]`, in degrees.
    angles: [f64; 2],
    /// The standard deviation of the noise.
    deviation: f64,
}

impl Plane {
    /// Generates a new `Plane`.
    ///
    /// # Arguments
    ///
    /// * `node_count`: The number of points on the plane.
    /// * `angles`: The rotations about the `y` and `x` axes, in degrees.
    /// * `deviation`: The standard deviation of the noise.
    /// * `rng`: The random number generator.
    ///
    /// # Errors
    ///
    /// * If `deviation` is negative or not finite.
    pub fn new<R: Rng>(node_count: usize, angles: [f64; 2], deviation: f64, rng: &mut R) -> Result<Self, String> {
        if !deviation.is_finite() {
            return Err(format!("Deviation must be finite but was {deviation}."));
        }
        let noise = Normal::new(0.0, deviation).map_err(|e| e.to_string())?;

        let rotation = Self::rotation(angles);
        let mut nodes = (0..node_count)
            .map(|_| {
                let x = rng.gen_range(-1.0..=1.0);
                let y = rng.gen_range(-1.0..=1.0);
                let z = noise.sample(rng) / 10.0;
                rotation * Vector3::new(x, y, z)
            })
            .collect::<Vec<_>>();

        if !nodes.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let mean = nodes.iter().sum::<Point>() / nodes.len() as f64;
            for node in &mut nodes {
                *node -= mean;
            }
        }

        Ok(Self {
            nodes,
            normal: rotation * Vector3::z(),
            angles,
            deviation,
        })
    }

    /// The extrinsic rotation for the given `[alpha, beta]` angles in degrees.
    fn rotation([alpha, beta]: [f64; 2]) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), beta.to_radians())
            * Rotation3::from_axis_angle(&Vector3::y_axis(), alpha.to_radians())
    }

    /// The points on the plane.
    #[must_use]
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// The number of points on the plane.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The unit normal of the plane.
    #[must_use]
    pub const fn normal(&self) -> &Point {
        &self.normal
    }

    /// The rotation angles, `[alpha, beta]`, in degrees.
    #[must_use]
    pub const fn angles(&self) -> [f64; 2] {
        self.angles
    }

    /// The standard deviation of the noise.
    #[must_use]
    pub const fn deviation(&self) -> f64 {
        self.deviation
    }
}
