//! Orientation sampling over cubochoric grids.
//!
//! Each grid point is converted to a Rodrigues vector, tested against the fundamental zone of
//! the requested rotation group, and kept as a Bunge Euler triple if it lies inside.

use std::fmt;

use itertools::Itertools;
use log;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rotation::{
    compose_rodrigues, compose_rotations, euler_to_rodrigues, rodrigues_to_euler,
    CubochoricCoordinate, EulerTriple, RodriguesVector, RotationError,
};
use crate::symmetry::{is_inside_fz, SymmetryDescriptor, SymmetryError};

pub mod grid;

pub use grid::{AxisRange, SampleGridSpec, SampleGridSpecBuilder};

#[cfg(test)]
#[path = "sampling_tests.rs"]
mod sampling_tests;

// =================
// Error definitions
// =================

/// Errors arising from orientation sampling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    /// The grid specification has a non-positive step, inverted bounds, or non-finite values.
    #[error("Invalid grid specification: {0}.")]
    InvalidGridSpec(String),

    /// A rotation conversion has failed.
    #[error(transparent)]
    Rotation(#[from] RotationError),

    /// The symmetry descriptor is malformed.
    #[error(transparent)]
    Symmetry(#[from] SymmetryError),
}

// ================
// Enum definitions
// ================

/// An enumerated type indicating how grid points are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SamplingMode {
    /// Each grid point is an orientation in its own right.
    #[default]
    FundamentalZone,

    /// Each grid point is a misorientation $`\boldsymbol{\rho}`$ composed with a reference
    /// orientation $`\boldsymbol{\sigma}`$ as in [`compose_rodrigues`] with $`\boldsymbol{\sigma}`$
    /// first. The composed orientation is then tested against the zone.
    Misorientation {
        /// The reference orientation.
        reference: EulerTriple,

        /// The largest misorientation angle, in radians, to be retained. If `None`, all grid
        /// points are retained.
        max_angle: Option<f64>,
    },
}

impl SamplingMode {
    /// Maps a grid rotation onto the orientation to be tested against the fundamental zone.
    ///
    /// Composed orientations that are exact half-turns cannot be written as finite Rodrigues
    /// vectors and are evaluated in quaternion form instead.
    ///
    /// # Returns
    ///
    /// The orientation to be tested, or `None` if the grid rotation is rejected by the maximum
    /// misorientation angle.
    fn orientation(
        &self,
        reference: Option<&RodriguesVector>,
        rod: RodriguesVector,
    ) -> Result<Option<RodriguesVector>, RotationError> {
        match (self, reference) {
            (Self::Misorientation { max_angle, .. }, Some(reference)) => {
                if max_angle.map_or(false, |max_angle| rod.rotation_angle() > max_angle) {
                    return Ok(None);
                }
                match compose_rodrigues(reference, &rod) {
                    Ok(composed) => Ok(Some(composed)),
                    Err(RotationError::SingularComposition { .. }) => {
                        Ok(Some(compose_rotations(reference, &rod)))
                    }
                    Err(err) => Err(err),
                }
            }
            _ => Ok(Some(rod)),
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FundamentalZone => write!(f, "Fundamental zone"),
            Self::Misorientation {
                reference,
                max_angle,
            } => {
                write!(f, "Misorientation about {reference}")?;
                if let Some(max_angle) = max_angle {
                    write!(f, " up to {:.4}°", max_angle.to_degrees())?;
                }
                Ok(())
            }
        }
    }
}

// ==================
// Struct definitions
// ==================

/// A structure containing the orientations retained from a grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// The retained orientations as Bunge Euler triples in radians, in grid traversal order.
    pub orientations: Vec<EulerTriple>,

    /// The number of grid points visited.
    pub n_grid_points: usize,
}

impl SampleResult {
    /// Returns `true` if at least one orientation has been retained. Every retained orientation
    /// has passed the fundamental-zone test.
    #[must_use]
    pub fn has_valid_angles(&self) -> bool {
        !self.orientations.is_empty()
    }

    /// The number of retained orientations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    /// Returns `true` if no orientations have been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }
}

// =========
// Functions
// =========

/// Samples the fundamental zone of a rotation group on a cubochoric grid.
///
/// # Arguments
///
/// * `grid` - The grid specification.
/// * `symmetry` - The rotation group whose fundamental zone is sampled.
///
/// # Returns
///
/// The retained orientations in lexicographic grid order (first axis outermost).
///
/// # Errors
///
/// Errors if the grid or the symmetry descriptor is invalid, or if any grid point lies outside
/// the cubochoric cube. No partial result is returned.
pub fn sample(
    grid: &SampleGridSpec,
    symmetry: &SymmetryDescriptor,
) -> Result<SampleResult, SamplingError> {
    sample_with_mode(grid, symmetry, &SamplingMode::FundamentalZone)
}

/// Samples orientations on a cubochoric grid in a given [`SamplingMode`].
///
/// Grid points sharing the same first-axis coordinate are processed together on one worker;
/// the per-worker results are concatenated in grid order, so the output is identical to that
/// of a sequential traversal.
///
/// In [`SamplingMode::Misorientation`], a composition that is an exact half-turn is kept as a
/// half-turn and tested against the zone rather than raised as
/// [`RotationError::SingularComposition`].
///
/// # Errors
///
/// Errors if the grid or the symmetry descriptor is invalid, if the grid has more points than
/// can be indexed, or if any grid point lies outside the cubochoric cube. No partial result is
/// returned.
pub fn sample_with_mode(
    grid: &SampleGridSpec,
    symmetry: &SymmetryDescriptor,
    mode: &SamplingMode,
) -> Result<SampleResult, SamplingError> {
    grid.validate()?;
    symmetry.validate()?;
    let n_grid_points = grid.n_points()?;
    let [xs, ys, zs] = grid.coordinates()?;
    log::debug!(
        "Sampling {n_grid_points} grid points ({} × {} × {}) for {symmetry} in mode: {mode}.",
        xs.len(),
        ys.len(),
        zs.len()
    );

    let reference = match mode {
        SamplingMode::Misorientation { reference, .. } => Some(euler_to_rodrigues(reference)),
        SamplingMode::FundamentalZone => None,
    };

    let shards = xs
        .par_iter()
        .map(|&x| {
            ys.iter()
                .cartesian_product(zs.iter())
                .filter_map(|(&y, &z)| {
                    let orientation = CubochoricCoordinate::new(x, y, z)
                        .to_rodrigues()
                        .and_then(|rod| mode.orientation(reference.as_ref(), rod));
                    match orientation {
                        Ok(Some(rod)) => match is_inside_fz(&rod, symmetry) {
                            Ok(true) => Some(Ok(rodrigues_to_euler(&rod))),
                            Ok(false) => None,
                            Err(err) => Some(Err(SamplingError::from(err))),
                        },
                        Ok(None) => None,
                        Err(err) => Some(Err(SamplingError::from(err))),
                    }
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let orientations = shards.into_iter().flatten().collect_vec();
    log::debug!(
        "{} of {n_grid_points} grid points retained.",
        orientations.len()
    );

    Ok(SampleResult {
        orientations,
        n_grid_points,
    })
}
