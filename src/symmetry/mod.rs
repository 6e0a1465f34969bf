//! Crystallographic rotation symmetry and orientation fundamental zones.
//!
//! Only the eleven proper rotation groups compatible with a crystal lattice are supported. A
//! point group with improper elements enters through its Laue class, whose proper rotation
//! subgroup is one of these eleven.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;

use nalgebra::Quaternion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rotation::rodrigues::quaternion_product;
use crate::rotation::RodriguesVector;

pub mod fundamental_zone;

pub use fundamental_zone::{
    bounding_planes, inside_cubic_fz, inside_cyclic_fz, inside_dihedral_fz, is_inside_fz,
    reduce_to_fz, BoundingPlanePair,
};

#[cfg(test)]
#[path = "symmetry_tests.rs"]
mod symmetry_tests;

/// $`\sqrt{3}/2`$.
const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// Hermann–Mauguin symbols of the 32 crystallographic point groups in International Tables order.
pub const POINT_GROUP_SYMBOLS: [&str; 32] = [
    "1", "-1", "2", "m", "2/m", "222", "mm2", "mmm", "4", "-4", "4/m", "422", "4mm", "-42m",
    "4/mmm", "3", "-3", "32", "3m", "-3m", "6", "-6", "6/m", "622", "6mm", "-6m2", "6/mmm", "23",
    "m-3", "432", "-43m", "m-3m",
];

// =================
// Error definitions
// =================

/// Errors arising from symmetry descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymmetryError {
    /// The descriptor does not name one of the supported crystallographic rotation groups.
    #[error("Unsupported symmetry: {0}.")]
    Unsupported(String),
}

// ================
// Enum definitions
// ================

/// The two cubic rotation groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubicKind {
    /// The tetrahedral rotation group $`\mathcal{T}`$ of order 12.
    Tetrahedral,

    /// The octahedral rotation group $`\mathcal{O}`$ of order 24.
    Octahedral,
}

/// A proper crystallographic rotation group, identified by its family and order.
///
/// The principal axis of the cyclic and dihedral groups is $`z`$. The two-fold axes of the
/// dihedral groups lie in the $`xy`$-plane; see [`SymmetryDescriptor::dihedral_axes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymmetryDescriptor {
    /// The cyclic group $`\mathcal{C}_n`$ with $`n \in \{1, 2, 3, 4, 6\}`$.
    Cyclic(u32),

    /// The dihedral group $`\mathcal{D}_n`$ with $`n \in \{2, 3, 4, 6\}`$.
    Dihedral(u32),

    /// One of the cubic groups.
    Cubic(CubicKind),
}

impl SymmetryDescriptor {
    /// Checks that this descriptor names a supported crystallographic rotation group.
    ///
    /// # Errors
    ///
    /// Errors with [`SymmetryError::Unsupported`] for non-crystallographic orders.
    pub fn validate(&self) -> Result<(), SymmetryError> {
        match self {
            Self::Cyclic(1 | 2 | 3 | 4 | 6)
            | Self::Dihedral(2 | 3 | 4 | 6)
            | Self::Cubic(_) => Ok(()),
            Self::Cyclic(n) => Err(SymmetryError::Unsupported(format!(
                "cyclic order {n} is not crystallographic"
            ))),
            Self::Dihedral(n) => Err(SymmetryError::Unsupported(format!(
                "dihedral order {n} is not crystallographic"
            ))),
        }
    }

    /// Constructs a descriptor from the legacy integer pair used by orientation-sampling
    /// programs.
    ///
    /// # Arguments
    ///
    /// * `fz_type` - The zone family: 0 for triclinic, 1 for cyclic, 2 for dihedral, 3 for
    /// tetrahedral, and 4 for octahedral.
    /// * `fz_order` - The order of the principal axis. Only used for the cyclic and dihedral
    /// families.
    ///
    /// # Returns
    ///
    /// The validated descriptor.
    ///
    /// # Errors
    ///
    /// Errors with [`SymmetryError::Unsupported`] for unknown families or unsupported orders.
    pub fn from_fz_type(fz_type: i32, fz_order: u32) -> Result<Self, SymmetryError> {
        let symmetry = match fz_type {
            0 => Self::Cyclic(1),
            1 => Self::Cyclic(fz_order),
            2 => Self::Dihedral(fz_order),
            3 => Self::Cubic(CubicKind::Tetrahedral),
            4 => Self::Cubic(CubicKind::Octahedral),
            _ => {
                return Err(SymmetryError::Unsupported(format!(
                    "unknown fundamental-zone type {fz_type}"
                )))
            }
        };
        symmetry.validate()?;
        Ok(symmetry)
    }

    /// Constructs the descriptor of the proper rotation subgroup of the Laue class of a
    /// crystallographic point group.
    ///
    /// # Arguments
    ///
    /// * `number` - The point-group number from 1 ($`1`$) to 32 ($`m\bar{3}m`$), in
    /// International Tables order.
    ///
    /// # Errors
    ///
    /// Errors with [`SymmetryError::Unsupported`] if `number` is out of range.
    pub fn from_point_group_number(number: u32) -> Result<Self, SymmetryError> {
        let symmetry = match number {
            1..=2 => Self::Cyclic(1),
            3..=5 => Self::Cyclic(2),
            6..=8 => Self::Dihedral(2),
            9..=11 => Self::Cyclic(4),
            12..=15 => Self::Dihedral(4),
            16..=17 => Self::Cyclic(3),
            18..=20 => Self::Dihedral(3),
            21..=23 => Self::Cyclic(6),
            24..=27 => Self::Dihedral(6),
            28..=29 => Self::Cubic(CubicKind::Tetrahedral),
            30..=32 => Self::Cubic(CubicKind::Octahedral),
            _ => {
                return Err(SymmetryError::Unsupported(format!(
                    "point-group number {number} is not in 1..=32"
                )))
            }
        };
        Ok(symmetry)
    }

    /// The legacy integer pair `(fz_type, fz_order)` of this descriptor. See
    /// [`Self::from_fz_type`].
    #[must_use]
    pub fn fz_type(&self) -> (i32, u32) {
        match self {
            Self::Cyclic(1) => (0, 1),
            Self::Cyclic(n) => (1, *n),
            Self::Dihedral(n) => (2, *n),
            Self::Cubic(CubicKind::Tetrahedral) => (3, 0),
            Self::Cubic(CubicKind::Octahedral) => (4, 0),
        }
    }

    /// The number of proper rotations in the group.
    #[must_use]
    pub fn group_order(&self) -> usize {
        match self {
            Self::Cyclic(n) => *n as usize,
            Self::Dihedral(n) => 2 * *n as usize,
            Self::Cubic(CubicKind::Tetrahedral) => 12,
            Self::Cubic(CubicKind::Octahedral) => 24,
        }
    }

    /// The unit two-fold axes perpendicular to the principal axis of a dihedral group of order
    /// `n`. These are also the normals of the corresponding fundamental-zone bounding planes.
    ///
    /// # Errors
    ///
    /// Errors with [`SymmetryError::Unsupported`] if `n` is not a dihedral crystallographic
    /// order.
    pub fn dihedral_axes(n: u32) -> Result<&'static [[f64; 3]], SymmetryError> {
        const D2: [[f64; 3]; 2] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        const D3: [[f64; 3]; 3] = [
            [HALF_SQRT_3, 0.5, 0.0],
            [HALF_SQRT_3, -0.5, 0.0],
            [0.0, 1.0, 0.0],
        ];
        const D4: [[f64; 3]; 4] = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0],
            [FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0],
        ];
        const D6: [[f64; 3]; 6] = [
            [0.5, HALF_SQRT_3, 0.0],
            [HALF_SQRT_3, 0.5, 0.0],
            [HALF_SQRT_3, -0.5, 0.0],
            [0.5, -HALF_SQRT_3, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        match n {
            2 => Ok(&D2),
            3 => Ok(&D3),
            4 => Ok(&D4),
            6 => Ok(&D6),
            _ => Err(SymmetryError::Unsupported(format!(
                "dihedral order {n} is not crystallographic"
            ))),
        }
    }

    /// Returns the proper rotations of the group as unit quaternions with non-negative scalar
    /// parts. The identity is always the first element.
    ///
    /// # Errors
    ///
    /// Errors with [`SymmetryError::Unsupported`] if the descriptor is malformed.
    pub fn rotations(&self) -> Result<Vec<Quaternion<f64>>, SymmetryError> {
        self.validate()?;
        let principal = |n: u32| {
            (0..n).map(move |k| {
                let (sin, cos) = (PI * f64::from(k) / f64::from(n)).sin_cos();
                Quaternion::new(cos, 0.0, 0.0, sin)
            })
        };
        let rotations = match self {
            Self::Cyclic(n) => principal(*n).collect::<Vec<_>>(),
            Self::Dihedral(n) => principal(*n)
                .chain(
                    Self::dihedral_axes(*n)?
                        .iter()
                        .map(|u| Quaternion::new(0.0, u[0], u[1], u[2])),
                )
                .collect::<Vec<_>>(),
            Self::Cubic(kind) => {
                let mut rotations = vec![
                    Quaternion::new(1.0, 0.0, 0.0, 0.0),
                    Quaternion::new(0.0, 1.0, 0.0, 0.0),
                    Quaternion::new(0.0, 0.0, 1.0, 0.0),
                    Quaternion::new(0.0, 0.0, 0.0, 1.0),
                ];
                for sx in [1.0, -1.0] {
                    for sy in [1.0, -1.0] {
                        for sz in [1.0, -1.0] {
                            rotations.push(Quaternion::new(0.5, 0.5 * sx, 0.5 * sy, 0.5 * sz));
                        }
                    }
                }
                if *kind == CubicKind::Octahedral {
                    let r = FRAC_1_SQRT_2;
                    for i in 0..3 {
                        for s in [1.0, -1.0] {
                            let mut q = Quaternion::new(r, 0.0, 0.0, 0.0);
                            q.coords[i] = s * r;
                            rotations.push(q);
                        }
                    }
                    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
                        for s in [1.0, -1.0] {
                            let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
                            q.coords[i] = r;
                            q.coords[j] = s * r;
                            rotations.push(q);
                        }
                    }
                }
                rotations
            }
        };
        Ok(rotations)
    }

    /// Returns all orientations symmetry-equivalent to `rod`, i.e. $`g \circ \boldsymbol{\rho}`$
    /// for every rotation $`g`$ in the group, in the order of [`Self::rotations`].
    ///
    /// # Errors
    ///
    /// Errors with [`SymmetryError::Unsupported`] if the descriptor is malformed.
    pub fn equivalent_orientations(
        &self,
        rod: &RodriguesVector,
    ) -> Result<Vec<RodriguesVector>, SymmetryError> {
        let quaternion = rod.to_quaternion();
        Ok(self
            .rotations()?
            .iter()
            .map(|g| RodriguesVector::from_quaternion(&quaternion_product(g, &quaternion)))
            .collect())
    }
}

impl Default for SymmetryDescriptor {
    fn default() -> Self {
        Self::Cyclic(1)
    }
}

impl fmt::Display for SymmetryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cyclic(n) => write!(f, "C{n}"),
            Self::Dihedral(n) => write!(f, "D{n}"),
            Self::Cubic(CubicKind::Tetrahedral) => write!(f, "T"),
            Self::Cubic(CubicKind::Octahedral) => write!(f, "O"),
        }
    }
}
