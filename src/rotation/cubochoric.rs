//! The cubochoric parameterisation of rotation space.
//!
//! The cubochoric cube of edge $`\pi^{2/3}`$ is mapped onto the homochoric ball of radius
//! $`(3\pi/4)^{1/3}`$ by an equal-volume mapping, which in turn maps onto the axis–angle ball.
//! Uniform grids in the cube therefore give uniform samplings of $`SO(3)`$.
//!
//! Reference: D. Roşca, A. Morawiec, M. De Graef, *A new method of constructing a grid in the
//! space of 3D rotations and its applications to texture analysis*, Modelling Simul. Mater.
//! Sci. Eng. **22**, 075013 (2014).

use std::f64::consts::{PI, SQRT_2};
use std::fmt;

use nalgebra::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::rotation::rodrigues::RodriguesVector;
use crate::rotation::RotationError;

/// The edge length $`\pi^{2/3}`$ of the cubochoric cube.
pub const CUBE_EDGE: f64 = 2.145_029_397_111_025_5;

/// The semi-edge $`\pi^{2/3}/2`$ of the cubochoric cube.
pub const CUBE_SEMI_EDGE: f64 = 0.5 * CUBE_EDGE;

/// Tolerance for the cube membership test, so that grid points computed as
/// $`\pm\pi^{2/3}/2`$ with rounding errors are still accepted.
const DOMAIN_TOLERANCE: f64 = 1.0e-9;

/// Ratio $`(\pi/6)^{1/6}`$ between the cube and the ball grid parameters.
const SC: f64 = 0.897_772_786_961_286_2;

/// $`(3\pi/4)^{1/3} 2^{1/4} / \beta`$ with $`\beta = \pi^{5/6} / (2 \cdot 6^{1/6})`$.
const PREK: f64 = 1.643_456_402_972_503;

/// $`\sqrt{6/\pi}`$.
const PREF: f64 = 1.381_976_597_885_342;

/// Coefficients of the polynomial in $`|\mathbf{h}|^2`$ approximating $`\cos(\omega/2)`$, the
/// inverse of $`|\mathbf{h}|^3 = \tfrac{3}{4}(\omega - \sin\omega)`$.
const HOMOCHORIC_FIT: [f64; 16] = [
    1.000_000_000_001_885_2,
    -0.500_000_000_219_484_7,
    -0.024_999_992_127_593_126,
    -0.003_928_701_544_781_374,
    -0.000_815_270_153_545_043_8,
    -0.000_200_950_042_611_971_2,
    -0.000_023_979_867_760_717_56,
    -0.000_082_028_689_266_058_41,
    0.000_124_487_150_420_900_92,
    -0.000_174_911_421_482_257_7,
    0.000_170_348_193_414_005_4,
    -0.000_120_620_650_041_168_28,
    0.000_059_719_705_868_660_826,
    -0.000_019_807_567_239_656_47,
    0.000_003_953_714_684_212_874,
    -0.000_000_365_550_014_397_195_44,
];

// ================
// Enum definitions
// ================

/// The six pyramids, grouped in opposite pairs, into which the cubochoric cube is split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pyramid {
    /// Pyramids with apex at the origin and base on the $`\pm x`$ faces.
    X,

    /// Pyramids with base on the $`\pm y`$ faces.
    Y,

    /// Pyramids with base on the $`\pm z`$ faces.
    Z,
}

impl Pyramid {
    /// Determines the pyramid containing `xyz`. Points on shared faces are assigned to the first
    /// of $`z`$, $`x`$, $`y`$ that contains them.
    fn containing(xyz: &Vector3<f64>) -> Self {
        let (x, y, z) = (xyz[0].abs(), xyz[1].abs(), xyz[2].abs());
        if x <= z && y <= z {
            Self::Z
        } else if z <= x && y <= x {
            Self::X
        } else {
            Self::Y
        }
    }

    /// The permutation bringing this pyramid onto the $`z`$ pyramid, and its inverse.
    fn permutations(self) -> ([usize; 3], [usize; 3]) {
        match self {
            Self::Z => ([0, 1, 2], [0, 1, 2]),
            Self::X => ([1, 2, 0], [2, 0, 1]),
            Self::Y => ([2, 0, 1], [1, 2, 0]),
        }
    }
}

// ==================
// Struct definitions
// ==================

/// A point in the cubochoric cube $`[-\pi^{2/3}/2, \pi^{2/3}/2]^3`$.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubochoricCoordinate {
    xyz: Vector3<f64>,
}

impl CubochoricCoordinate {
    /// Creates a cubochoric coordinate. No domain check is performed here; this is deferred to
    /// the conversions.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            xyz: Vector3::new(x, y, z),
        }
    }

    /// The three components.
    #[must_use]
    pub fn xyz(&self) -> &Vector3<f64> {
        &self.xyz
    }

    /// Checks if this coordinate lies inside the cubochoric cube.
    #[must_use]
    pub fn is_in_domain(&self) -> bool {
        self.xyz
            .iter()
            .all(|x| x.is_finite() && x.abs() <= CUBE_SEMI_EDGE + DOMAIN_TOLERANCE)
    }

    /// Maps this coordinate onto the homochoric ball.
    ///
    /// # Errors
    ///
    /// Errors with [`RotationError::Domain`] if the coordinate lies outside the cube.
    pub fn to_homochoric(&self) -> Result<Vector3<f64>, RotationError> {
        if !self.is_in_domain() {
            return Err(RotationError::Domain {
                coordinate: [self.xyz[0], self.xyz[1], self.xyz[2]],
                semi_edge: CUBE_SEMI_EDGE,
            });
        }
        if self.xyz.iter().all(|&x| x == 0.0) {
            return Ok(Vector3::zeros());
        }

        let (perm, inv) = Pyramid::containing(&self.xyz).permutations();
        let xyz = Vector3::new(self.xyz[perm[0]], self.xyz[perm[1]], self.xyz[perm[2]]) * SC;

        let ho = if xyz[0] == 0.0 && xyz[1] == 0.0 {
            // Points on the pyramid axis map straight onto the ball axis.
            Vector3::new(0.0, 0.0, PREF * xyz[2])
        } else {
            // Square to curved square, then inverse Lambert projection onto the sphere grid.
            // `xyz[2]` cannot vanish here as it dominates the other two components.
            let (i, j) = if xyz[1].abs() <= xyz[0].abs() {
                (1, 0)
            } else {
                (0, 1)
            };
            let (sin_q, cos_q) = (PI / 12.0 * xyz[i] / xyz[j]).sin_cos();
            let scale = PREK * xyz[j] / (SQRT_2 - cos_q).sqrt();
            let t = [(SQRT_2 * cos_q - 1.0) * scale, SQRT_2 * sin_q * scale];
            let t2 = t[0] * t[0] + t[1] * t[1];
            let s = t2 * PI / 24.0 / (xyz[2] * xyz[2]);
            let c = t2 * (PI / 24.0).sqrt() / xyz[2];
            let q = (1.0 - s).max(0.0).sqrt();
            Vector3::new(t[j] * q, t[i] * q, PREF * xyz[2] - c)
        };
        Ok(Vector3::new(ho[inv[0]], ho[inv[1]], ho[inv[2]]))
    }

    /// Converts this coordinate to the unit quaternion of the rotation it represents.
    ///
    /// # Errors
    ///
    /// Errors with [`RotationError::Domain`] if the coordinate lies outside the cube.
    pub fn to_quaternion(&self) -> Result<Quaternion<f64>, RotationError> {
        let ho = self.to_homochoric()?;
        let h2 = ho.norm_squared();
        if h2 < 1.0e-16 {
            return Ok(Quaternion::identity());
        }
        let mut power = h2;
        let mut half_cos = HOMOCHORIC_FIT[0] + HOMOCHORIC_FIT[1] * h2;
        for coefficient in HOMOCHORIC_FIT.iter().skip(2) {
            power *= h2;
            half_cos += coefficient * power;
        }
        let half_cos = half_cos.clamp(-1.0, 1.0);
        let half_sin = (1.0 - half_cos * half_cos).sqrt();
        Ok(Quaternion::from_parts(half_cos, ho * (half_sin / h2.sqrt())))
    }

    /// Converts this coordinate to a Rodrigues vector.
    ///
    /// # Errors
    ///
    /// Errors with [`RotationError::Domain`] if the coordinate lies outside the cube.
    pub fn to_rodrigues(&self) -> Result<RodriguesVector, RotationError> {
        Ok(RodriguesVector::from_quaternion(&self.to_quaternion()?))
    }
}

impl From<Vector3<f64>> for CubochoricCoordinate {
    fn from(xyz: Vector3<f64>) -> Self {
        Self { xyz }
    }
}

impl fmt::Display for CubochoricCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:+.7}, {:+.7}, {:+.7})",
            self.xyz[0], self.xyz[1], self.xyz[2]
        )
    }
}

/// Converts a cubochoric coordinate to a Rodrigues vector in closed form (cubochoric →
/// homochoric → axis–angle → Rodrigues).
///
/// # Arguments
///
/// * `cu` - The cubochoric coordinate.
///
/// # Returns
///
/// The Rodrigues vector; grid points on the cube surface yield half-turns.
///
/// # Errors
///
/// Errors with [`RotationError::Domain`] if `cu` lies outside the cubochoric cube.
pub fn cubochoric_to_rodrigues(cu: &CubochoricCoordinate) -> Result<RodriguesVector, RotationError> {
    cu.to_rodrigues()
}
