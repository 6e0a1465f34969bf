//! Regular grids in the cubochoric cube.

use std::fmt;

use derive_builder::Builder;
use itertools::Itertools;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::io::format::nice_bool;
use crate::rotation::CUBE_SEMI_EDGE;
use crate::sampling::SamplingError;

/// Tolerance, in units of the step, for the last grid point of an axis to still be accepted.
const STEP_TOLERANCE: f64 = 1.0e-9;

// ==================
// Struct definitions
// ==================

/// The bounds and step of one cubochoric axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// The lower bound.
    pub low: f64,

    /// The upper bound.
    pub high: f64,

    /// The grid step.
    pub step: f64,
}

impl AxisRange {
    /// Creates an axis range.
    #[must_use]
    pub fn new(low: f64, high: f64, step: f64) -> Self {
        Self { low, high, step }
    }

    /// Checks that the step is positive and the bounds are ordered, all values being finite.
    ///
    /// # Errors
    ///
    /// Errors with [`SamplingError::InvalidGridSpec`] describing the first violation found.
    pub fn validate(&self) -> Result<(), SamplingError> {
        if !(self.low.is_finite() && self.high.is_finite() && self.step.is_finite()) {
            return Err(SamplingError::InvalidGridSpec(format!(
                "non-finite axis range {self}"
            )));
        }
        if self.step <= 0.0 {
            return Err(SamplingError::InvalidGridSpec(format!(
                "non-positive step {} in axis range {self}",
                self.step
            )));
        }
        if self.low > self.high {
            return Err(SamplingError::InvalidGridSpec(format!(
                "lower bound exceeds upper bound in axis range {self}"
            )));
        }
        Ok(())
    }

    /// The number of grid coordinates along this axis, without generating them.
    ///
    /// # Errors
    ///
    /// Errors with [`SamplingError::InvalidGridSpec`] if the axis range is invalid or has too
    /// many points to be indexed.
    pub fn n_coordinates(&self, offset: bool) -> Result<usize, SamplingError> {
        self.validate()?;
        let shift = if offset { 0.5 * self.step } else { 0.0 };
        let span = self.high - self.low - shift;
        if span < -STEP_TOLERANCE * self.step {
            return Ok(0);
        }
        (span.max(0.0) / self.step + STEP_TOLERANCE)
            .floor()
            .to_usize()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| {
                SamplingError::InvalidGridSpec(format!("too many grid points in axis range {self}"))
            })
    }

    /// Returns the grid coordinates $`l + s + i\delta`$ along this axis, where $`s = \delta/2`$
    /// if `offset` is set and $`0`$ otherwise, for all $`i \geq 0`$ that do not exceed the upper
    /// bound.
    ///
    /// # Errors
    ///
    /// Errors with [`SamplingError::InvalidGridSpec`] if the axis range is invalid or has too
    /// many points to be indexed.
    pub fn coordinates(&self, offset: bool) -> Result<Vec<f64>, SamplingError> {
        let n_points = self.n_coordinates(offset)?;
        let shift = if offset { 0.5 * self.step } else { 0.0 };
        Ok((0..n_points)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let i = i as f64;
                self.low + shift + i * self.step
            })
            .collect())
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:+.7}, {:+.7}] by {:.7}",
            self.low, self.high, self.step
        )
    }
}

/// A structure specifying a regular grid in the cubochoric cube.
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleGridSpec {
    /// The ranges along the three cubochoric axes. The first axis is the outermost in the
    /// traversal order.
    pub axes: [AxisRange; 3],

    /// Boolean indicating if the grid is shifted by half a step along every axis.
    #[builder(default = "false")]
    #[serde(default)]
    pub offset: bool,
}

impl SampleGridSpec {
    /// Returns a builder to construct a [`SampleGridSpec`] structure.
    pub fn builder() -> SampleGridSpecBuilder {
        SampleGridSpecBuilder::default()
    }

    /// Creates a grid with the same range on all three axes.
    #[must_use]
    pub fn uniform(range: AxisRange, offset: bool) -> Self {
        Self {
            axes: [range; 3],
            offset,
        }
    }

    /// Creates a grid over the cube $`[-w, w]^3`$ centred at the origin.
    ///
    /// # Arguments
    ///
    /// * `half_width` - The half-width $`w`$ of the cube.
    /// * `step` - The grid step along each axis.
    /// * `offset` - Boolean indicating if the grid is shifted by half a step.
    #[must_use]
    pub fn cube(half_width: f64, step: f64, offset: bool) -> Self {
        Self::uniform(AxisRange::new(-half_width, half_width, step), offset)
    }

    /// Creates a grid covering the entire cubochoric cube with `n_per_semi_edge` intervals along
    /// each semi-edge.
    ///
    /// The upper bound is pulled in by half a step so that exactly $`2N`$ points are placed along
    /// each axis whether or not the grid is offset. Without the offset, the faces $`-a/2`$ are
    /// sampled but the opposite faces $`+a/2`$, which describe the same half-turns, are not.
    #[must_use]
    pub fn full(n_per_semi_edge: u32, offset: bool) -> Self {
        let step = CUBE_SEMI_EDGE / f64::from(n_per_semi_edge.max(1));
        Self::uniform(
            AxisRange::new(-CUBE_SEMI_EDGE, CUBE_SEMI_EDGE - 0.5 * step, step),
            offset,
        )
    }

    /// Validates all three axis ranges.
    ///
    /// # Errors
    ///
    /// Errors with [`SamplingError::InvalidGridSpec`] if any range is invalid.
    pub fn validate(&self) -> Result<(), SamplingError> {
        self.axes.iter().try_for_each(AxisRange::validate)
    }

    /// Returns the grid coordinates along each of the three axes.
    ///
    /// # Errors
    ///
    /// Errors with [`SamplingError::InvalidGridSpec`] if any range is invalid.
    pub fn coordinates(&self) -> Result<[Vec<f64>; 3], SamplingError> {
        self.validate()?;
        Ok([
            self.axes[0].coordinates(self.offset)?,
            self.axes[1].coordinates(self.offset)?,
            self.axes[2].coordinates(self.offset)?,
        ])
    }

    /// The total number of grid points.
    ///
    /// # Errors
    ///
    /// Errors with [`SamplingError::InvalidGridSpec`] if any range is invalid or if the total
    /// number of points cannot be indexed.
    pub fn n_points(&self) -> Result<usize, SamplingError> {
        self.axes
            .iter()
            .map(|axis| axis.n_coordinates(self.offset))
            .try_fold(1usize, |acc, n| {
                acc.checked_mul(n?).ok_or_else(|| {
                    SamplingError::InvalidGridSpec("too many grid points in grid".to_string())
                })
            })
    }
}

impl Default for SampleGridSpec {
    fn default() -> Self {
        Self::full(50, false)
    }
}

impl fmt::Display for SampleGridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.axes
                .iter()
                .enumerate()
                .map(|(i, axis)| format!("Axis {}: {axis}", i + 1))
                .join("\n")
        )?;
        write!(f, "Offset grid by half a step: {}", nice_bool(self.offset))
    }
}
