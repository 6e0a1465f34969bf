//! A stateful façade over the sampler for interactive callers.

use log;
use serde::{Deserialize, Serialize};

use crate::rotation::EulerTriple;
use crate::sampling::{sample_with_mode, SampleGridSpec, SampleResult, SamplingError, SamplingMode};
use crate::symmetry::SymmetryDescriptor;


// ==================
// Struct definitions
// ==================

/// A sampling session holding the current configuration and the result of the most recent
/// recompute.
///
/// Every mutator stores the new configuration and immediately recomputes the whole sample. A
/// session is meant to be driven from a single thread of control; callers wanting to keep a
/// responsive front end should run [`crate::sampling::sample_with_mode`] on a worker themselves.
#[derive(Clone, Debug)]
pub struct SamplingSession {
    /// The current grid specification.
    grid: SampleGridSpec,

    /// The current rotation group.
    symmetry: SymmetryDescriptor,

    /// The current sampling mode.
    mode: SamplingMode,

    /// The result of the most recent recompute, or `None` if that recompute failed.
    result: Option<SampleResult>,
}

impl SamplingSession {
    /// Creates a session in [`SamplingMode::FundamentalZone`] and computes its first sample.
    ///
    /// # Errors
    ///
    /// Errors if the initial configuration cannot be sampled.
    pub fn new(grid: SampleGridSpec, symmetry: SymmetryDescriptor) -> Result<Self, SamplingError> {
        Self::with_mode(grid, symmetry, SamplingMode::FundamentalZone)
    }

    /// Creates a session in the given sampling mode and computes its first sample.
    ///
    /// # Errors
    ///
    /// Errors if the initial configuration cannot be sampled.
    pub fn with_mode(
        grid: SampleGridSpec,
        symmetry: SymmetryDescriptor,
        mode: SamplingMode,
    ) -> Result<Self, SamplingError> {
        let mut session = Self {
            grid,
            symmetry,
            mode,
            result: None,
        };
        session.recompute()?;
        Ok(session)
    }

    /// Replaces the rotation group and recomputes.
    ///
    /// # Errors
    ///
    /// Errors if the new configuration cannot be sampled. The new rotation group is kept
    /// nonetheless and the current result is cleared.
    pub fn update_symmetry(
        &mut self,
        symmetry: SymmetryDescriptor,
    ) -> Result<&SampleResult, SamplingError> {
        self.symmetry = symmetry;
        self.recompute()
    }

    /// Replaces the grid specification and recomputes.
    ///
    /// # Errors
    ///
    /// Errors if the new configuration cannot be sampled. The new grid is kept nonetheless and
    /// the current result is cleared.
    pub fn update_grid(&mut self, grid: SampleGridSpec) -> Result<&SampleResult, SamplingError> {
        self.grid = grid;
        self.recompute()
    }

    /// Replaces the sampling mode and recomputes.
    ///
    /// # Errors
    ///
    /// Errors if the new configuration cannot be sampled. The new mode is kept nonetheless and
    /// the current result is cleared.
    pub fn update_mode(&mut self, mode: SamplingMode) -> Result<&SampleResult, SamplingError> {
        self.mode = mode;
        self.recompute()
    }

    fn recompute(&mut self) -> Result<&SampleResult, SamplingError> {
        self.result = None;
        let result = sample_with_mode(&self.grid, &self.symmetry, &self.mode).map_err(|err| {
            log::debug!("Recompute for {} has failed: {err}", self.symmetry);
            err
        })?;
        log::debug!(
            "Recomputed {} orientation(s) for {}.",
            result.len(),
            self.symmetry
        );
        Ok(self.result.insert(result))
    }

    /// The result of the most recent recompute, or `None` if it failed.
    #[must_use]
    pub fn current_result(&self) -> Option<&SampleResult> {
        self.result.as_ref()
    }

    /// Returns `true` if the most recent recompute succeeded and retained at least one
    /// orientation.
    #[must_use]
    pub fn has_valid_angles(&self) -> bool {
        self.result
            .as_ref()
            .map_or(false, SampleResult::has_valid_angles)
    }

    /// The retained orientations of the most recent recompute, empty if it failed.
    #[must_use]
    pub fn euler_angles(&self) -> &[EulerTriple] {
        match self.result.as_ref() {
            Some(result) => &result.orientations,
            None => &[],
        }
    }

    /// The current grid specification.
    #[must_use]
    pub fn grid(&self) -> &SampleGridSpec {
        &self.grid
    }

    /// The current rotation group.
    #[must_use]
    pub fn symmetry(&self) -> &SymmetryDescriptor {
        &self.symmetry
    }

    /// The current sampling mode.
    #[must_use]
    pub fn mode(&self) -> &SamplingMode {
        &self.mode
    }
}

// ================
// Enum definitions
// ================

/// An enumerated type for the ways a set of orientations can be specified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AngleInput {
    /// A single orientation given directly.
    Single(EulerTriple),

    /// Orientations sampled on a cubochoric grid.
    Grid {
        /// The grid specification.
        grid: SampleGridSpec,

        /// The rotation group whose fundamental zone is sampled.
        symmetry: SymmetryDescriptor,

        /// The sampling mode.
        #[serde(default)]
        mode: SamplingMode,
    },
}

impl AngleInput {
    /// Checks if this input yields at least one orientation.
    ///
    /// # Errors
    ///
    /// Errors if a grid input cannot be sampled.
    pub fn has_valid_angles(&self) -> Result<bool, SamplingError> {
        Ok(!acquire_orientations(self)?.is_empty())
    }
}

// =========
// Functions
// =========

/// Acquires the orientations described by an [`AngleInput`].
///
/// # Arguments
///
/// * `input` - The angle input.
///
/// # Returns
///
/// The orientations as Bunge Euler triples in radians. A single orientation with non-finite
/// angles yields no orientations.
///
/// # Errors
///
/// Errors if a grid input cannot be sampled.
pub fn acquire_orientations(input: &AngleInput) -> Result<Vec<EulerTriple>, SamplingError> {
    match input {
        AngleInput::Single(euler) if euler.is_finite() => Ok(vec![*euler]),
        AngleInput::Single(_) => Ok(vec![]),
        AngleInput::Grid {
            grid,
            symmetry,
            mode,
        } => Ok(sample_with_mode(grid, symmetry, mode)?.orientations),
    }
}
