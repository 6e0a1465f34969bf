//! Orientation representations and the conversions between them.
//!
//! Three representations are used by the sampler:
//! - [`CubochoricCoordinate`]: a point in the equal-volume cube parameterisation of $`SO(3)`$,
//!   used to lay down uniform sampling grids,
//! - [`RodriguesVector`]: the Rodrigues–Frank vector $`\hat{\mathbf{n}} \tan(\omega/2)`$, in
//!   which fundamental zones are bounded by planes, and
//! - [`EulerTriple`]: Bunge $`(\varphi_1, \Phi, \varphi_2)`$ angles, the output unit handed to
//!   downstream consumers.
//!
//! All conversions follow the passive sign convention ($`P = -1`$) consistently, so that
//! Rodrigues composition, quaternion products and Euler conversions agree with each other.

use thiserror::Error;

pub mod cubochoric;
pub mod euler;
pub mod rodrigues;

pub use cubochoric::{cubochoric_to_rodrigues, CubochoricCoordinate, CUBE_SEMI_EDGE};
pub use euler::{euler_to_rodrigues, rodrigues_to_euler, EulerTriple};
pub use rodrigues::{compose_rodrigues, compose_rotations, RodriguesVector};


/// Threshold below which the denominator of a Rodrigues composition is considered to vanish.
pub const COMPOSITION_THRESHOLD: f64 = 1.0e-10;

// =================
// Error definitions
// =================

/// Errors arising from orientation conversions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotationError {
    /// The cubochoric coordinate lies outside the cubochoric cube.
    #[error(
        "Cubochoric coordinate ({:+.6}, {:+.6}, {:+.6}) lies outside the cube of semi-edge {semi_edge:.6}.",
        .coordinate[0], .coordinate[1], .coordinate[2]
    )]
    Domain {
        /// The offending coordinate.
        coordinate: [f64; 3],

        /// The semi-edge of the cubochoric cube.
        semi_edge: f64,
    },

    /// The composition of two rotations is a half-turn, for which the Rodrigues composition
    /// formula diverges.
    #[error("Singular Rodrigues composition: denominator {denominator:+.3e} vanishes.")]
    SingularComposition {
        /// The value of the vanishing denominator.
        denominator: f64,
    },
}
