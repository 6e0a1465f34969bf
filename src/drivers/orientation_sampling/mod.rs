use std::fmt;

use anyhow::format_err;
use derive_builder::Builder;
use itertools::Itertools;
use log;
use serde::{Deserialize, Serialize};

use crate::drivers::RfzDriver;
use crate::io::format::{
    log_subtitle, log_title, nice_bool, rfz_output, rfz_warn, write_subtitle, RfzOutput,
};
use crate::io::{write_angle_file, write_rfz_binary, RfzFileType};
use crate::sampling::{SampleGridSpec, SampleResult, SamplingMode};
use crate::session::SamplingSession;
use crate::symmetry::{bounding_planes, SymmetryDescriptor};


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for orientation sampling.
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationSamplingParams {
    /// The rotation group whose fundamental zone is sampled.
    #[builder(default = "SymmetryDescriptor::default()")]
    #[serde(default)]
    pub symmetry: SymmetryDescriptor,

    /// The cubochoric grid to be traversed.
    #[builder(default = "SampleGridSpec::default()")]
    #[serde(default)]
    pub grid: SampleGridSpec,

    /// The interpretation of the grid points.
    #[builder(default = "SamplingMode::default()")]
    #[serde(default)]
    pub mode: SamplingMode,

    /// Boolean indicating if the retained orientations are to be written to the output file.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_orientations: bool,

    /// Optional path of an angle file to which the retained orientations are written in degrees.
    /// If `None`, no angle file will be written.
    #[builder(default = "None")]
    #[serde(default)]
    pub angle_file: Option<String>,

    /// Optional name for saving the result as a binary file of type [`RfzFileType::Smp`]. If
    /// `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<String>,
}

impl OrientationSamplingParams {
    /// Returns a builder to construct a [`OrientationSamplingParams`] structure.
    pub fn builder() -> OrientationSamplingParamsBuilder {
        OrientationSamplingParamsBuilder::default()
    }
}

impl Default for OrientationSamplingParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `OrientationSamplingParams`.")
    }
}

impl fmt::Display for OrientationSamplingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rotation group: {} (order {})",
            self.symmetry,
            self.symmetry.group_order()
        )?;
        writeln!(f, "Sampling mode: {}", self.mode)?;
        writeln!(f)?;
        writeln!(f, "Cubochoric grid:")?;
        for line in self.grid.to_string().lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Report retained orientations: {}",
            nice_bool(self.write_orientations)
        )?;
        writeln!(
            f,
            "Write angle file: {}",
            self.angle_file
                .as_ref()
                .map_or_else(|| nice_bool(false), Clone::clone)
        )?;
        writeln!(
            f,
            "Save orientation sampling results to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                format!("{name}.{}", RfzFileType::Smp.ext())
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;

        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain orientation sampling results.
#[derive(Clone, Builder, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationSamplingResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: OrientationSamplingParams,

    /// The retained orientations.
    pub sample: SampleResult,
}

impl OrientationSamplingResult {
    /// Returns a builder to construct a [`OrientationSamplingResult`] structure.
    fn builder() -> OrientationSamplingResultBuilder {
        OrientationSamplingResultBuilder::default()
    }

    /// Writes the retained orientations in a nicely formatted table.
    fn write_orientation_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtitle(f, "Retained orientations (Bunge, degrees)")?;
        writeln!(f)?;
        let count_length = self.sample.len().max(1).ilog10() as usize + 2;
        writeln!(f, "{}", "┈".repeat(count_length + 39))?;
        writeln!(
            f,
            "{:>count_length$} {:>12} {:>12} {:>12}",
            "#", "φ1", "Φ", "φ2"
        )?;
        writeln!(f, "{}", "┈".repeat(count_length + 39))?;
        for (i, euler) in self.sample.orientations.iter().enumerate() {
            let [phi1, phi, phi2] = euler.to_degrees();
            writeln!(
                f,
                "{:>count_length$} {phi1:>12.6} {phi:>12.6} {phi2:>12.6}",
                i + 1
            )?;
        }
        writeln!(f, "{}", "┈".repeat(count_length + 39))?;
        Ok(())
    }
}

impl fmt::Display for OrientationSamplingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid points visited: {}", self.sample.n_grid_points)?;
        #[allow(clippy::cast_precision_loss)]
        let percentage = if self.sample.n_grid_points > 0 {
            100.0 * self.sample.len() as f64 / self.sample.n_grid_points as f64
        } else {
            0.0
        };
        writeln!(
            f,
            "Orientations retained: {} ({percentage:.3} %)",
            self.sample.len()
        )?;
        writeln!(f)?;

        if self.parameters.write_orientations && self.sample.has_valid_angles() {
            self.write_orientation_table(f)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for orientation sampling.
#[derive(Clone, Builder)]
pub struct OrientationSamplingDriver<'a> {
    /// The control parameters for orientation sampling.
    parameters: &'a OrientationSamplingParams,

    /// The result of the orientation sampling.
    #[builder(setter(skip), default = "None")]
    result: Option<OrientationSamplingResult>,
}

impl<'a> OrientationSamplingDriver<'a> {
    /// Returns a builder to construct a [`OrientationSamplingDriver`] structure.
    pub fn builder() -> OrientationSamplingDriverBuilder<'a> {
        OrientationSamplingDriverBuilder::default()
    }

    /// Logs the bounding planes of the fundamental zone to be sampled.
    fn log_fundamental_zone(&self) -> Result<(), anyhow::Error> {
        let planes = bounding_planes(&self.parameters.symmetry)?;
        log_subtitle(&format!(
            "Fundamental zone of {}",
            self.parameters.symmetry
        ));
        rfz_output!("");
        if planes.is_empty() {
            rfz_output!("No bounding planes: the whole of Rodrigues space is sampled.");
        } else {
            rfz_output!("{}", "┈".repeat(46));
            rfz_output!("{:>30} {:>15}", "Normal", "Offset");
            rfz_output!("{}", "┈".repeat(46));
            for plane in planes.iter() {
                rfz_output!(
                    "({}) {:>15.7}",
                    plane.normal.iter().map(|x| format!("{x:+.5}")).join(", "),
                    plane.offset
                );
            }
            rfz_output!("{}", "┈".repeat(46));
            rfz_output!("(Each pair −d ≤ ρ·n < d includes its negative plane only.)");
        }
        rfz_output!("");
        Ok(())
    }

    /// Executes orientation sampling.
    fn sample_orientations(&mut self) -> Result<(), anyhow::Error> {
        log_title("Orientation Sampling");
        rfz_output!("");
        let params = self.parameters;
        params.log_output_display();

        self.log_fundamental_zone()?;

        let session = SamplingSession::with_mode(params.grid.clone(), params.symmetry, params.mode)
            .map_err(|err| format_err!(err))?;
        let sample = session
            .current_result()
            .cloned()
            .ok_or_else(|| format_err!("No sampled orientations found in the session."))?;
        if !session.has_valid_angles() {
            rfz_warn!(
                "No orientations of {} are retained from the grid.",
                params.symmetry
            );
        }
        log::debug!(
            "Orientation sampling for {} has retained {} of {} grid points.",
            params.symmetry,
            sample.len(),
            sample.n_grid_points
        );

        let smp_res = self.result.insert(
            OrientationSamplingResult::builder()
                .parameters(params.clone())
                .sample(sample)
                .build()
                .map_err(|err| format_err!(err))?,
        );
        log_subtitle("Orientation sampling summary");
        rfz_output!("");
        smp_res.log_output_display();

        // Write the angle file, if requested
        if let Some(angle_file) = params.angle_file.as_ref() {
            write_angle_file(angle_file, &smp_res.sample.orientations)?;
            rfz_output!("Retained orientations written to {angle_file}.");
            rfz_output!("");
        }

        // Save orientation sampling result, if requested
        if let Some(name) = params.result_save_name.as_ref() {
            write_rfz_binary(name, RfzFileType::Smp, smp_res)?;
            rfz_output!(
                "Orientation sampling results saved as {name}.{}.",
                RfzFileType::Smp.ext()
            );
            rfz_output!("");
        }

        Ok(())
    }
}

impl RfzDriver for OrientationSamplingDriver<'_> {
    type Params = OrientationSamplingParams;

    type Outcome = OrientationSamplingResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No orientation sampling results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.sample_orientations()
    }
}
