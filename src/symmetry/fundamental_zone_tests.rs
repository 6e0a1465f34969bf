use std::f64::consts::{PI, SQRT_2};

use nalgebra::{Quaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rotation::RodriguesVector;
use crate::symmetry::fundamental_zone::{
    bounding_planes, inside_cubic_fz, inside_cyclic_fz, inside_dihedral_fz, is_inside_fz,
    reduce_to_fz,
};
use crate::symmetry::{CubicKind, SymmetryDescriptor, SymmetryError};

fn all_symmetries() -> Vec<SymmetryDescriptor> {
    vec![
        SymmetryDescriptor::Cyclic(1),
        SymmetryDescriptor::Cyclic(2),
        SymmetryDescriptor::Cyclic(3),
        SymmetryDescriptor::Cyclic(4),
        SymmetryDescriptor::Cyclic(6),
        SymmetryDescriptor::Dihedral(2),
        SymmetryDescriptor::Dihedral(3),
        SymmetryDescriptor::Dihedral(4),
        SymmetryDescriptor::Dihedral(6),
        SymmetryDescriptor::Cubic(CubicKind::Tetrahedral),
        SymmetryDescriptor::Cubic(CubicKind::Octahedral),
    ]
}

/// Draws a rotation uniformly from $`SO(3)`$ by rejection sampling of the unit 4-ball.
fn random_rotation(rng: &mut StdRng) -> RodriguesVector {
    loop {
        let q = Quaternion::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let norm = q.norm();
        if (0.1..1.0).contains(&norm) {
            return RodriguesVector::from_quaternion(&q);
        }
    }
}

#[test]
fn test_fundamental_zone_coverage_without_overlap() {
    let mut rng = StdRng::seed_from_u64(20240611);
    for symmetry in all_symmetries() {
        for _ in 0..400 {
            let rod = random_rotation(&mut rng);
            let n_inside = symmetry
                .equivalent_orientations(&rod)
                .unwrap()
                .iter()
                .filter(|equivalent| is_inside_fz(equivalent, &symmetry).unwrap())
                .count();
            assert_eq!(n_inside, 1, "{symmetry}: {rod}");
        }
    }
}

#[test]
fn test_fundamental_zone_in_plane_half_turn_coverage() {
    for n in [2, 3, 4, 6] {
        let symmetry = SymmetryDescriptor::Cyclic(n);
        for azimuth in [0.123, 0.9, 1.7, 2.5, 3.05] {
            let rod = RodriguesVector::half_turn(&Vector3::new(
                f64::cos(azimuth),
                f64::sin(azimuth),
                0.0,
            ));
            let equivalents = symmetry.equivalent_orientations(&rod).unwrap();
            assert!(equivalents.iter().all(RodriguesVector::is_half_turn));
            let n_inside = equivalents
                .iter()
                .filter(|equivalent| is_inside_fz(equivalent, &symmetry).unwrap())
                .count();
            assert_eq!(n_inside, 1, "{symmetry}: azimuth {azimuth}");
        }
    }
}

#[test]
fn test_fundamental_zone_boundary_determinism() {
    let bound = (PI / 8.0).tan();
    let lower = RodriguesVector::from_vector(&Vector3::new(0.0, 0.0, -bound));
    let upper = RodriguesVector::from_vector(&Vector3::new(0.0, 0.0, bound));
    for _ in 0..10 {
        assert!(inside_cyclic_fz(&lower, 4).unwrap());
        assert!(!inside_cyclic_fz(&upper, 4).unwrap());
    }

    let twist = &bounding_planes(&SymmetryDescriptor::Cyclic(4)).unwrap()[0];
    assert!(twist.contains(&Vector3::new(0.3, -0.2, -bound)));
    assert!(!twist.contains(&Vector3::new(0.3, -0.2, bound)));

    let face = SQRT_2 - 1.0;
    assert!(inside_cubic_fz(
        &RodriguesVector::from_vector(&Vector3::new(-face, 0.0, 0.0)),
        CubicKind::Octahedral
    ));
    assert!(!inside_cubic_fz(
        &RodriguesVector::from_vector(&Vector3::new(face, 0.0, 0.0)),
        CubicKind::Octahedral
    ));

    let tetrahedral =
        bounding_planes(&SymmetryDescriptor::Cubic(CubicKind::Tetrahedral)).unwrap();
    assert!(tetrahedral
        .iter()
        .all(|plane| plane.contains(&Vector3::new(-0.5, -0.5, 0.0))));
    assert!(!tetrahedral
        .iter()
        .all(|plane| plane.contains(&Vector3::new(0.5, 0.5, 0.0))));

    let lower = RodriguesVector::from_vector(&Vector3::new(-1.0, 0.0, 0.0));
    let upper = RodriguesVector::from_vector(&Vector3::new(1.0, 0.0, 0.0));
    assert!(inside_dihedral_fz(&lower, 2).unwrap());
    assert!(!inside_dihedral_fz(&upper, 2).unwrap());
}

#[test]
fn test_fundamental_zone_cyclic() {
    // The trivial group accepts everything.
    let rod = RodriguesVector::from_vector(&Vector3::new(5.0, -3.0, 40.0));
    assert!(inside_cyclic_fz(&rod, 1).unwrap());
    let rod = RodriguesVector::half_turn(&Vector3::new(1.0, 2.0, 3.0));
    assert!(inside_cyclic_fz(&rod, 1).unwrap());

    // Cyclic zones are unbounded perpendicular to the principal axis.
    let rod = RodriguesVector::from_vector(&Vector3::new(100.0, -250.0, 0.1));
    assert!(inside_cyclic_fz(&rod, 4).unwrap());
    assert!(inside_cyclic_fz(&rod, 6).unwrap());

    // A 50-degree twist exceeds the C4 bound of 45 degrees.
    let rod = RodriguesVector::from_axis_angle(&Vector3::z(), 50f64.to_radians());
    assert!(!inside_cyclic_fz(&rod, 4).unwrap());
    assert!(inside_cyclic_fz(&rod, 3).unwrap());
    assert!(inside_cyclic_fz(&rod, 2).unwrap());

    assert!(matches!(
        inside_cyclic_fz(&rod, 5),
        Err(SymmetryError::Unsupported(_))
    ));
}

#[test]
fn test_fundamental_zone_half_turns() {
    let about_x = RodriguesVector::half_turn(&Vector3::x());
    let about_y = RodriguesVector::half_turn(&Vector3::y());
    let about_z = RodriguesVector::half_turn(&Vector3::z());
    let in_plane = RodriguesVector::half_turn(&Vector3::new(0.6f64.cos(), 0.6f64.sin(), 0.0));
    let tilted = RodriguesVector::half_turn(&Vector3::new(1.0, 0.0, 1.0));

    assert!(inside_cyclic_fz(&about_x, 4).unwrap());
    assert!(inside_cyclic_fz(&in_plane, 4).unwrap());
    assert!(!inside_cyclic_fz(&in_plane, 6).unwrap());
    assert!(!inside_cyclic_fz(&about_y, 2).unwrap());
    assert!(!inside_cyclic_fz(&about_z, 4).unwrap());
    assert!(!inside_cyclic_fz(&tilted, 3).unwrap());

    for symmetry in all_symmetries().into_iter().skip(5) {
        assert!(!is_inside_fz(&about_x, &symmetry).unwrap());
        assert!(!is_inside_fz(&tilted, &symmetry).unwrap());
    }
}

#[test]
fn test_fundamental_zone_bounding_planes() {
    assert!(bounding_planes(&SymmetryDescriptor::Cyclic(1))
        .unwrap()
        .is_empty());
    assert_eq!(bounding_planes(&SymmetryDescriptor::Cyclic(6)).unwrap().len(), 1);
    assert_eq!(bounding_planes(&SymmetryDescriptor::Dihedral(6)).unwrap().len(), 7);
    assert_eq!(
        bounding_planes(&SymmetryDescriptor::Cubic(CubicKind::Tetrahedral))
            .unwrap()
            .len(),
        4
    );
    assert_eq!(
        bounding_planes(&SymmetryDescriptor::Cubic(CubicKind::Octahedral))
            .unwrap()
            .len(),
        7
    );
    assert!(bounding_planes(&SymmetryDescriptor::Dihedral(8)).is_err());

    let planes = bounding_planes(&SymmetryDescriptor::Cyclic(2)).unwrap();
    approx::assert_relative_eq!(planes[0].offset, 1.0, epsilon = 1e-15);
}

#[test]
fn test_fundamental_zone_reduce() {
    let mut rng = StdRng::seed_from_u64(7);
    for symmetry in all_symmetries() {
        for _ in 0..50 {
            let rod = random_rotation(&mut rng);
            let reduced = reduce_to_fz(&rod, &symmetry).unwrap().unwrap();
            assert!(is_inside_fz(&reduced, &symmetry).unwrap());

            // Reduction is idempotent.
            let twice = reduce_to_fz(&reduced, &symmetry).unwrap().unwrap();
            approx::assert_relative_eq!(
                twice.components().unwrap(),
                reduced.components().unwrap(),
                epsilon = 1e-10
            );
        }
    }
    assert!(reduce_to_fz(&RodriguesVector::identity(), &SymmetryDescriptor::Cyclic(7)).is_err());
}
