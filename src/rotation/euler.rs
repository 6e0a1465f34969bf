//! Bunge Euler angles.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Quaternion;
use serde::{Deserialize, Serialize};

use crate::rotation::rodrigues::RodriguesVector;

/// Threshold on $`q_0^2 + q_3^2`$ or $`q_1^2 + q_2^2`$ below which the Euler decomposition is
/// degenerate ($`\Phi = \pi`$ or $`\Phi = 0`$).
const GIMBAL_THRESHOLD: f64 = 1.0e-8;

/// Angles smaller than this in magnitude are snapped to zero.
const ZERO_ANGLE_THRESHOLD: f64 = 1.0e-12;

/// A triple of Euler angles $`(\varphi_1, \Phi, \varphi_2)`$ in the Bunge ($`zxz`$) convention.
///
/// All angles are in **radians**, reduced to $`\varphi_1 \in [0, 2\pi)`$, $`\Phi \in [0, \pi]`$
/// and $`\varphi_2 \in [0, 2\pi)`$ when produced by [`rodrigues_to_euler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerTriple {
    /// The first rotation $`\varphi_1`$ about $`z`$.
    pub phi1: f64,

    /// The second rotation $`\Phi`$ about the rotated $`x`$.
    pub phi: f64,

    /// The third rotation $`\varphi_2`$ about the rotated $`z`$.
    pub phi2: f64,
}

impl EulerTriple {
    /// Creates an Euler triple from angles in radians.
    #[must_use]
    pub fn new(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self { phi1, phi, phi2 }
    }

    /// Creates an Euler triple from angles in degrees.
    #[must_use]
    pub fn from_degrees(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self::new(phi1.to_radians(), phi.to_radians(), phi2.to_radians())
    }

    /// Returns the three angles in degrees.
    #[must_use]
    pub fn to_degrees(&self) -> [f64; 3] {
        [
            self.phi1.to_degrees(),
            self.phi.to_degrees(),
            self.phi2.to_degrees(),
        ]
    }

    /// Checks if all three angles are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.phi1.is_finite() && self.phi.is_finite() && self.phi2.is_finite()
    }

    /// Returns the unit quaternion of this orientation, with a non-negative scalar part.
    #[must_use]
    pub fn to_quaternion(&self) -> Quaternion<f64> {
        let (sin_phi, cos_phi) = (0.5 * self.phi).sin_cos();
        let sigma = 0.5 * (self.phi1 + self.phi2);
        let delta = 0.5 * (self.phi1 - self.phi2);
        let quaternion = Quaternion::new(
            cos_phi * sigma.cos(),
            sin_phi * delta.cos(),
            sin_phi * delta.sin(),
            cos_phi * sigma.sin(),
        );
        if quaternion.w < 0.0 {
            -quaternion
        } else {
            quaternion
        }
    }
}

impl fmt::Display for EulerTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [phi1, phi, phi2] = self.to_degrees();
        write!(f, "({phi1:>9.4}°, {phi:>9.4}°, {phi2:>9.4}°)")
    }
}

/// Reduces an angle from $`(-\pi, \pi]`$ to $`[0, 2\pi)`$, snapping near-zero values to zero.
fn reduce_angle(angle: f64) -> f64 {
    if angle.abs() < ZERO_ANGLE_THRESHOLD {
        0.0
    } else if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Converts a unit quaternion (passive convention) to Bunge Euler angles.
fn quaternion_to_euler(quaternion: &Quaternion<f64>) -> EulerTriple {
    let (q0, q1, q2, q3) = (quaternion.w, quaternion.i, quaternion.j, quaternion.k);
    let q03 = q0 * q0 + q3 * q3;
    let q12 = q1 * q1 + q2 * q2;
    let (phi1, phi, phi2) = if q12 < GIMBAL_THRESHOLD {
        ((2.0 * q0 * q3).atan2(q0 * q0 - q3 * q3), 0.0, 0.0)
    } else if q03 < GIMBAL_THRESHOLD {
        ((2.0 * q1 * q2).atan2(q1 * q1 - q2 * q2), PI, 0.0)
    } else {
        let chi = (q03 * q12).sqrt();
        (
            ((q0 * q2 + q1 * q3) * chi).atan2((q0 * q1 - q2 * q3) * chi),
            (2.0 * chi).atan2(q03 - q12),
            ((q1 * q3 - q0 * q2) * chi).atan2((q0 * q1 + q2 * q3) * chi),
        )
    };
    EulerTriple::new(reduce_angle(phi1), reduce_angle(phi), reduce_angle(phi2))
}

/// Converts a Rodrigues vector to Bunge Euler angles.
///
/// The identity maps onto $`(0, 0, 0)`$; the degenerate cases $`\Phi = 0`$ and $`\Phi = \pi`$
/// are resolved by setting $`\varphi_2 = 0`$.
///
/// # Arguments
///
/// * `rod` - The Rodrigues vector, possibly a half-turn.
///
/// # Returns
///
/// The Euler triple in radians.
#[must_use]
pub fn rodrigues_to_euler(rod: &RodriguesVector) -> EulerTriple {
    quaternion_to_euler(&rod.to_quaternion())
}

/// Converts Bunge Euler angles to a Rodrigues vector.
#[must_use]
pub fn euler_to_rodrigues(euler: &EulerTriple) -> RodriguesVector {
    RodriguesVector::from_quaternion(&euler.to_quaternion())
}
