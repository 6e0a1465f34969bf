use itertools::Itertools;
use nalgebra::Quaternion;

use crate::rotation::rodrigues::quaternion_product;
use crate::symmetry::{CubicKind, SymmetryDescriptor, SymmetryError, POINT_GROUP_SYMBOLS};

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

fn same_rotation(a: &Quaternion<f64>, b: &Quaternion<f64>) -> bool {
    (a - b).norm() < 1e-9 || (a + b).norm() < 1e-9
}

#[test]
fn test_symmetry_validate() {
    for symmetry in all_symmetries() {
        assert!(symmetry.validate().is_ok());
    }
    for symmetry in [
        SymmetryDescriptor::Cyclic(0),
        SymmetryDescriptor::Cyclic(5),
        SymmetryDescriptor::Cyclic(8),
        SymmetryDescriptor::Dihedral(0),
        SymmetryDescriptor::Dihedral(1),
        SymmetryDescriptor::Dihedral(5),
    ] {
        assert!(matches!(
            symmetry.validate(),
            Err(SymmetryError::Unsupported(_))
        ));
        assert!(symmetry.rotations().is_err());
    }
}

#[test]
fn test_symmetry_rotations_form_groups() {
    for symmetry in all_symmetries() {
        let rotations = symmetry.rotations().unwrap();
        assert_eq!(rotations.len(), symmetry.group_order());
        assert_eq!(rotations[0], Quaternion::identity());

        // Unit quaternions with non-negative scalar parts, all distinct.
        assert!(rotations
            .iter()
            .all(|q| (q.norm() - 1.0).abs() < 1e-12 && q.w >= 0.0));
        assert!(rotations
            .iter()
            .tuple_combinations()
            .all(|(a, b)| !same_rotation(a, b)));

        // Closure
        for (a, b) in rotations.iter().cartesian_product(rotations.iter()) {
            let product = quaternion_product(a, b);
            assert!(
                rotations.iter().any(|c| same_rotation(&product, c)),
                "{symmetry} is not closed"
            );
        }
    }
}

#[test]
fn test_symmetry_from_fz_type() {
    assert_eq!(
        SymmetryDescriptor::from_fz_type(0, 7).unwrap(),
        SymmetryDescriptor::Cyclic(1)
    );
    assert_eq!(
        SymmetryDescriptor::from_fz_type(1, 4).unwrap(),
        SymmetryDescriptor::Cyclic(4)
    );
    assert_eq!(
        SymmetryDescriptor::from_fz_type(2, 6).unwrap(),
        SymmetryDescriptor::Dihedral(6)
    );
    assert_eq!(
        SymmetryDescriptor::from_fz_type(3, 0).unwrap(),
        SymmetryDescriptor::Cubic(CubicKind::Tetrahedral)
    );
    assert_eq!(
        SymmetryDescriptor::from_fz_type(4, 0).unwrap(),
        SymmetryDescriptor::Cubic(CubicKind::Octahedral)
    );
    assert!(SymmetryDescriptor::from_fz_type(1, 5).is_err());
    assert!(SymmetryDescriptor::from_fz_type(2, 1).is_err());
    assert!(SymmetryDescriptor::from_fz_type(5, 0).is_err());
    assert!(SymmetryDescriptor::from_fz_type(-1, 0).is_err());

    for symmetry in all_symmetries() {
        let (fz_type, fz_order) = symmetry.fz_type();
        assert_eq!(
            SymmetryDescriptor::from_fz_type(fz_type, fz_order).unwrap(),
            symmetry
        );
    }
}

#[test]
fn test_symmetry_from_point_group_number() {
    let expected = [
        (1, "C1"),
        (2, "C1"),
        (5, "C2"),
        (8, "D2"),
        (10, "C4"),
        (14, "D4"),
        (15, "D4"),
        (17, "C3"),
        (20, "D3"),
        (22, "C6"),
        (27, "D6"),
        (28, "T"),
        (29, "T"),
        (30, "O"),
        (31, "O"),
        (32, "O"),
    ];
    for (number, symbol) in expected {
        let symmetry = SymmetryDescriptor::from_point_group_number(number).unwrap();
        assert_eq!(symmetry.to_string(), symbol, "point group {number}");
    }
    assert_eq!(POINT_GROUP_SYMBOLS[30], "-43m");
    assert!(SymmetryDescriptor::from_point_group_number(0).is_err());
    assert!(SymmetryDescriptor::from_point_group_number(33).is_err());
}

#[test]
fn test_symmetry_equivalent_orientations() {
    use crate::rotation::RodriguesVector;
    use nalgebra::Vector3;

    let rod = RodriguesVector::from_axis_angle(&Vector3::z(), 0.3);
    let equivalents = SymmetryDescriptor::Cyclic(4)
        .equivalent_orientations(&rod)
        .unwrap();
    assert_eq!(equivalents.len(), 4);
    approx::assert_relative_eq!(equivalents[0].rotation_angle(), 0.3, epsilon = 1e-12);
    approx::assert_relative_eq!(
        equivalents[1].twist_angle(),
        0.3 + std::f64::consts::FRAC_PI_2,
        epsilon = 1e-12
    );
    assert!(equivalents[2].rotation_angle() > 2.0);
}

#[test]
fn test_symmetry_serde_yaml() {
    for symmetry in all_symmetries() {
        let yaml = serde_yaml::to_string(&symmetry).unwrap();
        let back: SymmetryDescriptor = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, symmetry);
    }
    let symmetry: SymmetryDescriptor = serde_yaml::from_str("!Dihedral 3").unwrap();
    assert_eq!(symmetry, SymmetryDescriptor::Dihedral(3));
    let symmetry: SymmetryDescriptor = serde_yaml::from_str("!Cubic Octahedral").unwrap();
    assert_eq!(symmetry, SymmetryDescriptor::Cubic(CubicKind::Octahedral));
}
