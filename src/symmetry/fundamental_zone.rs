//! Fundamental-zone membership tests in Rodrigues space.
//!
//! Every zone is a convex region bounded by pairs of parallel planes
//! $`-d \leq \boldsymbol{\rho} \cdot \mathbf{n} < d`$. For each pair, the plane on the negative
//! side is inclusive and the one on the positive side exclusive. The symmetry operation relating
//! the two planes of a pair maps one onto the other, so every orientation has exactly one
//! symmetry-equivalent inside the zone.

use std::f64::consts::{PI, SQRT_2};

use nalgebra::Vector3;

use crate::auxiliary::geometry::get_line_azimuth;
use crate::rotation::RodriguesVector;
use crate::symmetry::{CubicKind, SymmetryDescriptor, SymmetryError};

#[cfg(test)]
#[path = "fundamental_zone_tests.rs"]
mod fundamental_zone_tests;

/// Threshold below which the $`z`$-component of a half-turn axis is considered to vanish.
const AXIS_THRESHOLD: f64 = 1.0e-10;

/// Normals of the four truncation planes of the cubic zones. The associated offset is $`1`$.
const CUBIC_TRUNCATION_NORMALS: [[f64; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

// ==================
// Struct definitions
// ==================

/// A pair of parallel planes $`\boldsymbol{\rho} \cdot \mathbf{n} = \pm d`$ bounding a
/// fundamental zone.
#[derive(Clone, Debug)]
pub struct BoundingPlanePair {
    /// The outward normal $`\mathbf{n}`$ of the positive-side plane. Not necessarily normalised.
    pub normal: Vector3<f64>,

    /// The offset $`d > 0`$.
    pub offset: f64,
}

impl BoundingPlanePair {
    fn new(normal: [f64; 3], offset: f64) -> Self {
        Self {
            normal: Vector3::from(normal),
            offset,
        }
    }

    /// Checks if `vector` lies between the two planes, with the negative side inclusive and the
    /// positive side exclusive.
    #[must_use]
    pub fn contains(&self, vector: &Vector3<f64>) -> bool {
        let projection = vector.dot(&self.normal);
        -self.offset <= projection && projection < self.offset
    }
}

/// Returns the bounding plane pairs of the fundamental zone of a rotation group.
///
/// The cyclic groups are bounded only along the principal axis: the twist condition
/// $`-\pi/n \leq 2\arctan\rho_z < \pi/n`$ is the plane pair with normal $`\hat{\mathbf{z}}`$
/// and offset $`\tan(\pi/2n)`$. The trivial group has no bounding planes.
///
/// # Errors
///
/// Errors with [`SymmetryError::Unsupported`] if the descriptor is malformed.
pub fn bounding_planes(
    symmetry: &SymmetryDescriptor,
) -> Result<Vec<BoundingPlanePair>, SymmetryError> {
    symmetry.validate()?;
    let twist = |n: u32| BoundingPlanePair::new([0.0, 0.0, 1.0], (PI / f64::from(2 * n)).tan());
    let planes = match symmetry {
        SymmetryDescriptor::Cyclic(1) => vec![],
        SymmetryDescriptor::Cyclic(n) => vec![twist(*n)],
        SymmetryDescriptor::Dihedral(n) => std::iter::once(twist(*n))
            .chain(
                SymmetryDescriptor::dihedral_axes(*n)?
                    .iter()
                    .map(|u| BoundingPlanePair::new(*u, 1.0)),
            )
            .collect(),
        SymmetryDescriptor::Cubic(kind) => cubic_planes(*kind),
    };
    Ok(planes)
}

fn cubic_planes(kind: CubicKind) -> Vec<BoundingPlanePair> {
    let truncations = CUBIC_TRUNCATION_NORMALS
        .iter()
        .map(|n| BoundingPlanePair::new(*n, 1.0));
    match kind {
        CubicKind::Tetrahedral => truncations.collect(),
        CubicKind::Octahedral => {
            let face = SQRT_2 - 1.0;
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
                .into_iter()
                .map(|n| BoundingPlanePair::new(n, face))
                .chain(truncations)
                .collect()
        }
    }
}

// =========
// Functions
// =========

/// Tests membership of the fundamental zone of the cyclic group $`\mathcal{C}_n`$.
///
/// Finite vectors must satisfy the twist condition $`-\pi/n \leq \psi < \pi/n`$ with
/// $`\psi = 2\arctan\rho_z`$. A half-turn can only be inside when its axis lies in the
/// $`xy`$-plane, in which case the azimuth $`\theta \in [0, \pi)`$ of the axis must satisfy
/// $`0 \leq \theta < \pi/n`$.
///
/// # Errors
///
/// Errors with [`SymmetryError::Unsupported`] if `n` is not a cyclic crystallographic order.
pub fn inside_cyclic_fz(rod: &RodriguesVector, n: u32) -> Result<bool, SymmetryError> {
    let symmetry = SymmetryDescriptor::Cyclic(n);
    let planes = bounding_planes(&symmetry)?;
    match rod.components() {
        Some(vector) => Ok(planes.iter().all(|plane| plane.contains(&vector))),
        None if n == 1 => Ok(true),
        None => {
            let axis = rod.axis();
            Ok(axis[2].abs() < AXIS_THRESHOLD && get_line_azimuth(axis) < PI / f64::from(n))
        }
    }
}

/// Tests membership of the fundamental zone of the dihedral group $`\mathcal{D}_n`$: the cyclic
/// twist condition together with $`-1 \leq \boldsymbol{\rho} \cdot \mathbf{u}_k < 1`$ for each
/// two-fold axis $`\mathbf{u}_k`$. Half-turns are never inside.
///
/// # Errors
///
/// Errors with [`SymmetryError::Unsupported`] if `n` is not a dihedral crystallographic order.
pub fn inside_dihedral_fz(rod: &RodriguesVector, n: u32) -> Result<bool, SymmetryError> {
    let planes = bounding_planes(&SymmetryDescriptor::Dihedral(n))?;
    Ok(rod
        .components()
        .map_or(false, |vector| planes.iter().all(|plane| plane.contains(&vector))))
}

/// Tests membership of a cubic fundamental zone. Half-turns are never inside.
///
/// * Octahedral: $`-(\sqrt{2}-1) \leq \rho_i < \sqrt{2}-1`$ for each axis together with the four
/// truncation pairs $`-1 \leq \boldsymbol{\rho} \cdot (\pm 1, \pm 1, \pm 1) < 1`$.
/// * Tetrahedral: the four truncation pairs only.
#[must_use]
pub fn inside_cubic_fz(rod: &RodriguesVector, kind: CubicKind) -> bool {
    let planes = cubic_planes(kind);
    rod.components()
        .map_or(false, |vector| planes.iter().all(|plane| plane.contains(&vector)))
}

/// Determines if a Rodrigues vector lies inside the fundamental zone of a rotation group.
///
/// # Arguments
///
/// * `rod` - The Rodrigues vector, possibly a half-turn.
/// * `symmetry` - The rotation group.
///
/// # Returns
///
/// `true` if `rod` is inside the zone.
///
/// # Errors
///
/// Errors with [`SymmetryError::Unsupported`] if the descriptor is malformed.
pub fn is_inside_fz(
    rod: &RodriguesVector,
    symmetry: &SymmetryDescriptor,
) -> Result<bool, SymmetryError> {
    match symmetry {
        SymmetryDescriptor::Cyclic(n) => inside_cyclic_fz(rod, *n),
        SymmetryDescriptor::Dihedral(n) => inside_dihedral_fz(rod, *n),
        SymmetryDescriptor::Cubic(kind) => Ok(inside_cubic_fz(rod, *kind)),
    }
}

/// Brings an orientation into the fundamental zone.
///
/// # Returns
///
/// The first symmetry-equivalent of `rod` (in the order of [`SymmetryDescriptor::rotations`])
/// that lies inside the zone, or `None` if rounding errors place every equivalent just outside.
///
/// # Errors
///
/// Errors with [`SymmetryError::Unsupported`] if the descriptor is malformed.
pub fn reduce_to_fz(
    rod: &RodriguesVector,
    symmetry: &SymmetryDescriptor,
) -> Result<Option<RodriguesVector>, SymmetryError> {
    for equivalent in symmetry.equivalent_orientations(rod)? {
        if is_inside_fz(&equivalent, symmetry)? {
            return Ok(Some(equivalent));
        }
    }
    Ok(None)
}
