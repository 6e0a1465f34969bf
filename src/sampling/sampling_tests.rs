use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::rotation::{
    compose_rodrigues, cubochoric_to_rodrigues, euler_to_rodrigues, rodrigues_to_euler,
    CubochoricCoordinate, EulerTriple, RotationError,
};
use crate::sampling::{
    sample, sample_with_mode, AxisRange, SampleGridSpec, SamplingError, SamplingMode,
};
use crate::symmetry::{is_inside_fz, CubicKind, SymmetryDescriptor};

fn z_line_grid() -> SampleGridSpec {
    SampleGridSpec::builder()
        .axes([
            AxisRange::new(0.0, 0.0, 0.1),
            AxisRange::new(0.0, 0.0, 0.1),
            AxisRange::new(-1.0, 1.0, 0.1),
        ])
        .build()
        .unwrap()
}

#[test]
fn test_sampling_axis_coordinates() {
    let coordinates = AxisRange::new(-1.0, 1.0, 0.1).coordinates(false).unwrap();
    assert_eq!(coordinates.len(), 21);
    approx::assert_relative_eq!(coordinates[0], -1.0);
    approx::assert_relative_eq!(coordinates[20], 1.0, epsilon = 1e-12);

    let coordinates = AxisRange::new(-1.0, 1.0, 0.1).coordinates(true).unwrap();
    assert_eq!(coordinates.len(), 20);
    approx::assert_relative_eq!(coordinates[0], -0.95, epsilon = 1e-12);
    approx::assert_relative_eq!(coordinates[19], 0.95, epsilon = 1e-12);

    assert_eq!(
        AxisRange::new(0.3, 0.3, 0.1).coordinates(false).unwrap(),
        vec![0.3]
    );
    assert!(AxisRange::new(0.3, 0.3, 0.1)
        .coordinates(true)
        .unwrap()
        .is_empty());
}

#[test]
fn test_sampling_full_grid_spec() {
    for offset in [false, true] {
        let grid = SampleGridSpec::full(5, offset);
        let [xs, ys, zs] = grid.coordinates().unwrap();
        assert_eq!(xs.len(), 10);
        assert_eq!(ys.len(), 10);
        assert_eq!(zs.len(), 10);
        assert_eq!(grid.n_points().unwrap(), 1000);
        assert!(xs
            .iter()
            .all(|x| CubochoricCoordinate::new(*x, 0.0, 0.0).is_in_domain()));
    }
}

#[test]
fn test_sampling_cyclic_z_line() {
    let result = sample(&z_line_grid(), &SymmetryDescriptor::Cyclic(4)).unwrap();
    assert_eq!(result.n_grid_points, 21);
    assert_eq!(result.len(), 7);
    assert!(result.has_valid_angles());
    for euler in &result.orientations {
        let twist = euler_to_rodrigues(euler).twist_angle();
        assert!((-FRAC_PI_4 - 1e-12..FRAC_PI_4).contains(&twist));
    }

    // Traversal order follows the grid: the first survivor is the most negative twist.
    let first = euler_to_rodrigues(&result.orientations[0]).twist_angle();
    let last = euler_to_rodrigues(&result.orientations[6]).twist_angle();
    assert!(first < 0.0);
    assert!(last > 0.0);

    // The trivial group keeps every point.
    let result = sample(&z_line_grid(), &SymmetryDescriptor::Cyclic(1)).unwrap();
    assert_eq!(result.len(), 21);
}

#[test]
fn test_sampling_cyclic_small_cube() {
    let grid = SampleGridSpec::cube(0.2, 0.1, false);
    let result = sample(&grid, &SymmetryDescriptor::Cyclic(4)).unwrap();
    assert_eq!(result.n_grid_points, 125);
    assert_eq!(result.len(), 125);
    assert_eq!(result.orientations[62], EulerTriple::new(0.0, 0.0, 0.0));
    for euler in &result.orientations {
        let twist = euler_to_rodrigues(euler).twist_angle();
        assert!((-FRAC_PI_4 - 1e-12..FRAC_PI_4).contains(&twist));
    }
}

#[test]
fn test_sampling_matches_sequential_traversal() {
    let grid = SampleGridSpec::cube(0.8, 0.13, true);
    let symmetry = SymmetryDescriptor::Dihedral(4);
    let result = sample(&grid, &symmetry).unwrap();

    let [xs, ys, zs] = grid.coordinates().unwrap();
    let mut expected = vec![];
    for x in &xs {
        for y in &ys {
            for z in &zs {
                let rod = cubochoric_to_rodrigues(&CubochoricCoordinate::new(*x, *y, *z)).unwrap();
                if is_inside_fz(&rod, &symmetry).unwrap() {
                    expected.push(rodrigues_to_euler(&rod));
                }
            }
        }
    }
    assert_eq!(result.orientations, expected);
    assert_eq!(result.n_grid_points, xs.len() * ys.len() * zs.len());

    // Determinism
    assert_eq!(sample(&grid, &symmetry).unwrap(), result);
}

#[test]
fn test_sampling_full_grid_fractions() {
    let grid = SampleGridSpec::full(6, true);
    let n_points = 12 * 12 * 12;

    let result = sample(&grid, &SymmetryDescriptor::Cyclic(1)).unwrap();
    assert_eq!(result.n_grid_points, n_points);
    assert_eq!(result.len(), n_points);

    #[allow(clippy::cast_precision_loss)]
    let fraction = |symmetry: SymmetryDescriptor| {
        sample(&grid, &symmetry).unwrap().len() as f64 / n_points as f64
    };
    let cyclic = fraction(SymmetryDescriptor::Cyclic(4));
    assert!((0.15..0.35).contains(&cyclic), "{cyclic}");
    let octahedral = fraction(SymmetryDescriptor::Cubic(CubicKind::Octahedral));
    assert!((0.02..0.065).contains(&octahedral), "{octahedral}");
}

#[test]
fn test_sampling_invalid_grid() {
    let symmetry = SymmetryDescriptor::Cyclic(4);
    for range in [
        AxisRange::new(-0.2, 0.2, 0.0),
        AxisRange::new(-0.2, 0.2, -0.1),
        AxisRange::new(0.2, -0.2, 0.1),
        AxisRange::new(f64::NAN, 0.2, 0.1),
        AxisRange::new(-0.2, f64::INFINITY, 0.1),
    ] {
        let mut grid = SampleGridSpec::cube(0.2, 0.1, false);
        grid.axes[1] = range;
        assert!(matches!(
            sample(&grid, &symmetry),
            Err(SamplingError::InvalidGridSpec(_))
        ));
    }

    assert!(matches!(
        sample(
            &SampleGridSpec::cube(0.2, 0.1, false),
            &SymmetryDescriptor::Cyclic(5)
        ),
        Err(SamplingError::Symmetry(_))
    ));

    assert!(matches!(
        sample(&SampleGridSpec::cube(1.5, 0.5, false), &symmetry),
        Err(SamplingError::Rotation(RotationError::Domain { .. }))
    ));
}

#[test]
fn test_sampling_oversized_step() {
    let symmetry = SymmetryDescriptor::Cubic(CubicKind::Octahedral);
    let result = sample(&SampleGridSpec::cube(0.5, 5.0, false), &symmetry).unwrap();
    assert_eq!(result.n_grid_points, 1);
    assert!(result.len() <= 1);

    let result = sample(&SampleGridSpec::cube(0.5, 5.0, true), &symmetry).unwrap();
    assert_eq!(result.n_grid_points, 0);
    assert!(result.is_empty());
    assert!(!result.has_valid_angles());
}

#[test]
fn test_sampling_misorientation_mode() {
    let grid = SampleGridSpec::cube(0.3, 0.1, false);
    let symmetry = SymmetryDescriptor::Cyclic(1);
    let max_angle = 0.25;
    let mode = SamplingMode::Misorientation {
        reference: EulerTriple::new(0.0, 0.0, 0.0),
        max_angle: Some(max_angle),
    };
    let result = sample_with_mode(&grid, &symmetry, &mode).unwrap();

    let expected = sample(&grid, &symmetry)
        .unwrap()
        .orientations
        .into_iter()
        .filter(|euler| euler_to_rodrigues(euler).rotation_angle() <= max_angle)
        .count();
    assert_eq!(result.len(), expected);
    assert!(expected > 1 && expected < 343);
    assert!(result
        .orientations
        .iter()
        .all(|euler| euler_to_rodrigues(euler).rotation_angle() <= max_angle + 1e-9));

    // A half-turn reference composed with the identity grid point stays a half-turn.
    let grid = SampleGridSpec::cube(0.0, 0.1, false);
    let mode = SamplingMode::Misorientation {
        reference: EulerTriple::new(0.0, PI, 0.0),
        max_angle: None,
    };
    let result = sample_with_mode(&grid, &symmetry, &mode).unwrap();
    assert_eq!(result.len(), 1);
    approx::assert_relative_eq!(result.orientations[0].phi, PI, epsilon = 1e-10);
}

#[test]
fn test_sampling_misorientation_reference_first() {
    // A quarter-turn about x as the reference, and a single grid point on the z axis.
    let reference = EulerTriple::new(0.0, FRAC_PI_2, 0.0);
    let sigma = euler_to_rodrigues(&reference);
    let grid = SampleGridSpec::builder()
        .axes([
            AxisRange::new(0.0, 0.0, 0.1),
            AxisRange::new(0.0, 0.0, 0.1),
            AxisRange::new(0.3, 0.3, 0.1),
        ])
        .build()
        .unwrap();
    let mode = SamplingMode::Misorientation {
        reference,
        max_angle: None,
    };
    let result = sample_with_mode(&grid, &SymmetryDescriptor::Cyclic(1), &mode).unwrap();
    assert_eq!(result.len(), 1);

    let grid_rod = cubochoric_to_rodrigues(&CubochoricCoordinate::new(0.0, 0.0, 0.3)).unwrap();
    let expected = rodrigues_to_euler(&compose_rodrigues(&sigma, &grid_rod).unwrap());
    let reversed = rodrigues_to_euler(&compose_rodrigues(&grid_rod, &sigma).unwrap());
    let sampled = result.orientations[0];
    approx::assert_relative_eq!(sampled.phi1, expected.phi1, epsilon = 1e-10);
    approx::assert_relative_eq!(sampled.phi, expected.phi, epsilon = 1e-10);
    approx::assert_relative_eq!(sampled.phi2, expected.phi2, epsilon = 1e-10);
    assert!((sampled.phi1 - reversed.phi1).abs() > 0.1);

    // Every grid point of a small cube is composed the same way.
    let grid = SampleGridSpec::cube(0.2, 0.1, false);
    let result = sample_with_mode(&grid, &SymmetryDescriptor::Cyclic(1), &mode).unwrap();
    let [xs, ys, zs] = grid.coordinates().unwrap();
    let mut expected = vec![];
    for x in &xs {
        for y in &ys {
            for z in &zs {
                let rod = cubochoric_to_rodrigues(&CubochoricCoordinate::new(*x, *y, *z)).unwrap();
                expected.push(rodrigues_to_euler(&compose_rodrigues(&sigma, &rod).unwrap()));
            }
        }
    }
    assert_eq!(result.len(), expected.len());
    for (sampled, expected) in result.orientations.iter().zip(expected.iter()) {
        approx::assert_relative_eq!(sampled.phi1, expected.phi1, epsilon = 1e-10);
        approx::assert_relative_eq!(sampled.phi, expected.phi, epsilon = 1e-10);
        approx::assert_relative_eq!(sampled.phi2, expected.phi2, epsilon = 1e-10);
    }
}

#[test]
fn test_sampling_grid_point_count_overflow() {
    let grid = SampleGridSpec::cube(1.0, 1.0e-7, false);
    assert!(matches!(
        grid.n_points(),
        Err(SamplingError::InvalidGridSpec(_))
    ));
    assert!(matches!(
        sample(&grid, &SymmetryDescriptor::Cyclic(1)),
        Err(SamplingError::InvalidGridSpec(_))
    ));

    let axis = AxisRange::new(-1.0, 1.0, 1.0e-7);
    assert!((20_000_000..=20_000_001).contains(&axis.n_coordinates(false).unwrap()));
    assert_eq!(
        SampleGridSpec::cube(0.2, 0.1, true).n_points().unwrap(),
        4 * 4 * 4
    );
}
