//! Rodrigues–Frank vectors and their composition.

use std::fmt;

use nalgebra::{Quaternion, UnitVector3, Vector3};
use serde::{Deserialize, Serialize};

use crate::auxiliary::geometry::{get_positive_pole, normalise_rotation_angle};
use crate::rotation::{RotationError, COMPOSITION_THRESHOLD};

/// Threshold on the vector part of a unit quaternion below which the rotation is the identity.
const IDENTITY_THRESHOLD: f64 = 1.0e-14;

/// Threshold on the scalar part of a unit quaternion below which the rotation is a half-turn.
///
/// This must exceed the accuracy of the homochoric polynomial inversion (a few $`10^{-11}`$),
/// otherwise grid points on the cubochoric cube surface would acquire huge but finite
/// magnitudes instead of being recognised as half-turns.
pub(crate) const HALF_TURN_THRESHOLD: f64 = 1.0e-10;

// ==================
// Struct definitions
// ==================

/// A Rodrigues–Frank vector $`\boldsymbol{\rho} = \hat{\mathbf{n}} \tan(\omega/2)`$.
///
/// The vector is stored as a unit axis $`\hat{\mathbf{n}}`$ and a non-negative magnitude
/// $`\tan(\omega/2)`$ with $`\omega \in [0, \pi]`$. Half-turns ($`\omega = \pi`$) have an infinite
/// magnitude; since $`\pm\hat{\mathbf{n}}`$ describe the same half-turn, their axes are
/// always kept on the positive hemisphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RodriguesVector {
    /// The unit rotation axis.
    axis: Vector3<f64>,

    /// The magnitude $`\tan(\omega/2)`$, possibly infinite.
    magnitude: f64,
}

impl RodriguesVector {
    /// Returns the identity rotation, whose axis is conventionally taken to be $`z`$.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            axis: Vector3::z(),
            magnitude: 0.0,
        }
    }

    /// Constructs a Rodrigues vector from its three finite Cartesian components.
    ///
    /// # Arguments
    ///
    /// * `vector` - The components $`(\rho_x, \rho_y, \rho_z)`$.
    ///
    /// # Returns
    ///
    /// The Rodrigues vector.
    #[must_use]
    pub fn from_vector(vector: &Vector3<f64>) -> Self {
        let magnitude = vector.norm();
        if magnitude < IDENTITY_THRESHOLD {
            Self::identity()
        } else {
            Self {
                axis: vector / magnitude,
                magnitude,
            }
        }
    }

    /// Constructs the Rodrigues vector of a rotation through `angle` about `axis`.
    ///
    /// Negative angles are absorbed into the axis so that the stored angle lies in
    /// $`[0, \pi]`$.
    ///
    /// # Arguments
    ///
    /// * `axis` - The rotation axis, which need not be normalised.
    /// * `angle` - The rotation angle in radians.
    ///
    /// # Returns
    ///
    /// The Rodrigues vector.
    #[must_use]
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Self {
        let (normalised_angle, _) = normalise_rotation_angle(angle, 0.0);
        let unit_axis = UnitVector3::new_normalize(*axis).into_inner();
        let (unit_axis, normalised_angle) = if normalised_angle < 0.0 {
            (-unit_axis, -normalised_angle)
        } else {
            (unit_axis, normalised_angle)
        };
        let (half_sin, half_cos) = (0.5 * normalised_angle).sin_cos();
        Self::from_quaternion(&Quaternion::from_parts(half_cos, unit_axis * half_sin))
    }

    /// Constructs the half-turn about `axis`.
    #[must_use]
    pub fn half_turn(axis: &Vector3<f64>) -> Self {
        let unit_axis = UnitVector3::new_normalize(*axis).into_inner();
        Self {
            axis: get_positive_pole(&unit_axis, IDENTITY_THRESHOLD),
            magnitude: f64::INFINITY,
        }
    }

    /// Constructs a Rodrigues vector from a quaternion $`(q_0, \mathbf{q})`$.
    ///
    /// The quaternion is normalised first. Since $`q`$ and $`-q`$ describe the same rotation, the
    /// sign is chosen such that $`q_0 \geq 0`$.
    ///
    /// # Arguments
    ///
    /// * `quaternion` - A non-zero quaternion.
    ///
    /// # Returns
    ///
    /// The Rodrigues vector.
    #[must_use]
    pub fn from_quaternion(quaternion: &Quaternion<f64>) -> Self {
        let norm = quaternion.norm();
        let sign = if quaternion.w < 0.0 { -1.0 } else { 1.0 };
        let scalar = sign * quaternion.w / norm;
        let vector = quaternion.imag() * (sign / norm);
        let vector_norm = vector.norm();
        if vector_norm < IDENTITY_THRESHOLD {
            Self::identity()
        } else if scalar < HALF_TURN_THRESHOLD {
            Self::half_turn(&vector)
        } else {
            Self {
                axis: vector / vector_norm,
                magnitude: vector_norm / scalar,
            }
        }
    }

    /// Returns the unit quaternion $`(\cos(\omega/2), \hat{\mathbf{n}} \sin(\omega/2))`$ of this
    /// rotation, with a non-negative scalar part.
    #[must_use]
    pub fn to_quaternion(&self) -> Quaternion<f64> {
        if self.is_half_turn() {
            Quaternion::from_parts(0.0, self.axis)
        } else {
            let scalar = 1.0 / (1.0 + self.magnitude * self.magnitude).sqrt();
            Quaternion::from_parts(scalar, self.axis * (self.magnitude * scalar))
        }
    }

    /// The unit rotation axis.
    #[must_use]
    pub fn axis(&self) -> &Vector3<f64> {
        &self.axis
    }

    /// The magnitude $`\tan(\omega/2)`$, which is infinite for half-turns.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Indicates if this is a half-turn, i.e. if its magnitude is unbounded.
    #[must_use]
    pub fn is_half_turn(&self) -> bool {
        self.magnitude.is_infinite()
    }

    /// Returns the three Cartesian components, or `None` for a half-turn.
    #[must_use]
    pub fn components(&self) -> Option<Vector3<f64>> {
        if self.is_half_turn() {
            None
        } else {
            Some(self.axis * self.magnitude)
        }
    }

    /// Returns the rotation angle $`\omega \in [0, \pi]`$ in radians.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        2.0 * self.magnitude.atan()
    }

    /// Returns the twist angle $`\psi = 2 \operatorname{atan2}(q_z, q_0)`$ about the $`z`$-axis
    /// in the swing–twist decomposition of this rotation.
    ///
    /// For finite vectors $`\psi = 2 \arctan \rho_z \in (-\pi, \pi)`$. Half-turns give
    /// $`\pm\pi`$, or $`0`$ when their axis lies in the $`xy`$-plane.
    #[must_use]
    pub fn twist_angle(&self) -> f64 {
        let quaternion = self.to_quaternion();
        2.0 * quaternion.k.atan2(quaternion.w)
    }

    /// Returns the inverse rotation.
    #[must_use]
    pub fn inverse(&self) -> Self {
        if self.is_half_turn() {
            *self
        } else {
            Self::from_vector(&-(self.axis * self.magnitude))
        }
    }
}

impl Default for RodriguesVector {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for RodriguesVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.components() {
            Some(vector) => write!(
                f,
                "[{:+.7}, {:+.7}, {:+.7}]",
                vector[0], vector[1], vector[2]
            ),
            None => write!(
                f,
                "∞ × [{:+.7}, {:+.7}, {:+.7}]",
                self.axis[0], self.axis[1], self.axis[2]
            ),
        }
    }
}

// =========
// Functions
// =========

/// Multiplies two quaternions with the passive sign convention,
/// $`ab = (a_0 b_0 - \mathbf{a} \cdot \mathbf{b},\ a_0 \mathbf{b} + b_0 \mathbf{a} - \mathbf{a} \times \mathbf{b})`$.
pub(crate) fn quaternion_product(a: &Quaternion<f64>, b: &Quaternion<f64>) -> Quaternion<f64> {
    let (a_vec, b_vec) = (a.imag(), b.imag());
    Quaternion::from_parts(
        a.w * b.w - a_vec.dot(&b_vec),
        b_vec * a.w + a_vec * b.w - a_vec.cross(&b_vec),
    )
}

/// Composes two rotations given as Rodrigues vectors:
///
/// ```math
/// \boldsymbol{\rho}' = \frac{\boldsymbol{\sigma} + \boldsymbol{\rho} - \boldsymbol{\sigma} \times \boldsymbol{\rho}}
///                         {1 - \boldsymbol{\sigma} \cdot \boldsymbol{\rho}}.
/// ```
///
/// If either operand is a half-turn, the formula above is not applicable and the equivalent
/// quaternion product is evaluated instead.
///
/// # Arguments
///
/// * `sigma` - The first rotation $`\boldsymbol{\sigma}`$.
/// * `rod` - The second rotation $`\boldsymbol{\rho}`$.
///
/// # Returns
///
/// The composed rotation.
///
/// # Errors
///
/// Errors with [`RotationError::SingularComposition`] if the composed rotation is a half-turn,
/// i.e. if the denominator (or, for half-turn operands, the scalar part of the quaternion
/// product) is smaller than [`COMPOSITION_THRESHOLD`] in magnitude.
pub fn compose_rodrigues(
    sigma: &RodriguesVector,
    rod: &RodriguesVector,
) -> Result<RodriguesVector, RotationError> {
    match (sigma.components(), rod.components()) {
        (Some(sigma_vec), Some(rod_vec)) => {
            let denominator = 1.0 - sigma_vec.dot(&rod_vec);
            if denominator.abs() < COMPOSITION_THRESHOLD {
                return Err(RotationError::SingularComposition { denominator });
            }
            let numerator = sigma_vec + rod_vec - sigma_vec.cross(&rod_vec);
            Ok(RodriguesVector::from_vector(&(numerator / denominator)))
        }
        _ => {
            let product = quaternion_product(&sigma.to_quaternion(), &rod.to_quaternion());
            if product.w.abs() < COMPOSITION_THRESHOLD {
                return Err(RotationError::SingularComposition {
                    denominator: product.w,
                });
            }
            Ok(RodriguesVector::from_quaternion(&product))
        }
    }
}

/// Composes two rotations through their quaternion product.
///
/// Unlike [`compose_rodrigues`], this never fails: a composed half-turn is returned with an
/// infinite magnitude.
#[must_use]
pub fn compose_rotations(sigma: &RodriguesVector, rod: &RodriguesVector) -> RodriguesVector {
    RodriguesVector::from_quaternion(&quaternion_product(
        &sigma.to_quaternion(),
        &rod.to_quaternion(),
    ))
}
