//! Tests for generating planes and fitting them back.

use float_cmp::approx_eq;
use planegen::{diagnostics, fit, Plane, PlaneCollection, Point};
use rand::prelude::*;
use test_case::test_case;

#[test_case([0.0, 0.0], 1 ; "flat")]
#[test_case([0.0, 90.0], 2 ; "about x")]
#[test_case([90.0, 0.0], 3 ; "about y")]
#[test_case([30.0, 60.0], 4 ; "both")]
fn noiseless_plane_is_recovered(angles: [f64; 2], seed: u64) -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let plane = Plane::new(20, angles, 0.0, &mut rng)?;

    assert_eq!(plane.node_count(), 20);
    assert!(approx_eq!(f64, plane.normal().norm(), 1.0, epsilon = 1e-12));

    let mean = plane.nodes().iter().sum::<Point>() / 20.0;
    assert!(mean.norm() < 1e-12, "Mean {mean:?} is not at the origin.");

    let fitted = fit::fit_normal(plane.nodes()).ok_or("Could not fit a plane.")?;
    assert!(approx_eq!(f64, fitted.norm(), 1.0, epsilon = 1e-12));
    assert!(diagnostics::plane_angle(plane.normal(), &fitted) < 1e-4);

    for node in plane.nodes() {
        assert!(fit::distance_to_plane(plane.normal(), node) < 1e-12);
    }
    Ok(())
}

#[test]
fn rotations_move_the_normal() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(7);

    let flat = Plane::new(3, [0.0, 0.0], 0.0, &mut rng)?;
    assert!((flat.normal() - Point::z()).norm() < 1e-12);

    let tilted = Plane::new(3, [90.0, 0.0], 0.0, &mut rng)?;
    assert!((tilted.normal() - Point::x()).norm() < 1e-12);

    let rolled = Plane::new(3, [0.0, 90.0], 0.0, &mut rng)?;
    assert!((rolled.normal() + Point::y()).norm() < 1e-12);

    Ok(())
}

#[test]
fn noisy_plane_is_close() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(11);
    let plane = Plane::new(200, [20.0, 45.0], 0.1, &mut rng)?;

    let fitted = fit::fit_normal(plane.nodes()).ok_or("Could not fit a plane.")?;
    assert!(diagnostics::plane_angle(plane.normal(), &fitted) < 5.0);
    Ok(())
}

#[test]
fn bad_deviations_are_errors() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(Plane::new(5, [0.0, 0.0], -1.0, &mut rng).is_err());
    assert!(Plane::new(5, [0.0, 0.0], f64::NAN, &mut rng).is_err());
    assert!(Plane::new(5, [0.0, 0.0], f64::INFINITY, &mut rng).is_err());
}

#[test]
fn collection_mixes_all_points() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(5);
    let planes = [
        Plane::new(5, [0.0, 90.0], 0.0, &mut rng)?,
        Plane::new(6, [90.0, 0.0], 0.0, &mut rng)?,
        Plane::new(7, [0.0, 0.0], 0.0, &mut rng)?,
    ];
    let collection = PlaneCollection::new(&planes, &mut rng);

    assert_eq!(collection.node_count(), 18);
    assert_eq!(collection.normals().len(), 3);
    assert_eq!(collection.angles(), &[[0.0, 90.0], [90.0, 0.0], [0.0, 0.0]]);

    for plane in &planes {
        for node in plane.nodes() {
            assert!(collection.nodes().contains(node));
        }
    }
    Ok(())
}

#[test]
fn fits_need_three_points() {
    assert!(fit::fit_normal(&[]).is_none());
    assert!(fit::fit_normal(&[Point::x(), Point::y()]).is_none());
    assert!(fit::fit_normal(&[Point::x(), Point::y(), Point::x() + Point::y()]).is_some());
}

#[test]
fn triplet_distances_are_zero_through_the_origin() {
    let d = fit::triplet_distances(&Point::new(1.0, 0.0, 0.0), &Point::new(0.0, 2.0, 0.0), &Point::new(-1.0, -1.0, 0.0));
    assert!(d.iter().all(|&x| x < 1e-12));

    let d = fit::triplet_distances(&Point::new(1.0, 0.0, 1.0), &Point::new(0.0, 1.0, 1.0), &Point::new(-1.0, -1.0, 1.0));
    assert!(d.iter().any(|&x| x > 0.1));
}
