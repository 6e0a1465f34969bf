//! Input specification for RFZSampler configuration YAML files.

use anyhow::{self, format_err};
use serde::{Deserialize, Serialize};

use crate::drivers::orientation_sampling::{
    OrientationSamplingDriver, OrientationSamplingParams, OrientationSamplingResult,
};
use crate::drivers::RfzDriver;
use crate::interfaces::InputHandle;
use crate::io::format::{log_macsec_begin, log_macsec_end, log_title, rfz_output, rfz_warn, RfzOutput};
use crate::io::{read_rfz_binary, RfzFileType};


// ================
// Enum definitions
// ================

/// An enumerated type representing possible choices for specifying orientation sampling in the
/// input file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrientationSamplingInputKind {
    /// Variant for specifying the parameters for a fresh orientation sampling.
    Parameters(OrientationSamplingParams),

    /// Variant for specifying the name of a binary file of type [`RfzFileType::Smp`] from which
    /// the results of a previous orientation sampling are to be read (without the extension).
    FromFile(String),
}

impl Default for OrientationSamplingInputKind {
    fn default() -> Self {
        OrientationSamplingInputKind::Parameters(OrientationSamplingParams::default())
    }
}

// ==================
// Struct definitions
// ==================

/// A structure containing RFZSampler input specifications that can be serialised into and
/// deserialised from YAML configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Input {
    /// Specification for orientation sampling.
    #[serde(default)]
    pub sampling: Option<OrientationSamplingInputKind>,
}

impl Default for Input {
    fn default() -> Self {
        Input {
            sampling: Some(OrientationSamplingInputKind::default()),
        }
    }
}

impl InputHandle for Input {
    fn handle(&self) -> Result<(), anyhow::Error> {
        match self.sampling.as_ref() {
            Some(OrientationSamplingInputKind::Parameters(params)) => {
                log_macsec_begin("Orientation sampling");
                rfz_output!("");
                let mut driver = OrientationSamplingDriver::builder()
                    .parameters(params)
                    .build()
                    .map_err(|err| format_err!(err))?;
                let res = driver.run();
                log_macsec_end("Orientation sampling");
                rfz_output!("");
                res
            }
            Some(OrientationSamplingInputKind::FromFile(name)) => {
                log_macsec_begin("Orientation sampling results from file");
                rfz_output!("");
                let smp_res =
                    read_rfz_binary::<OrientationSamplingResult, _>(name, RfzFileType::Smp)?;
                log_title("Orientation Sampling");
                rfz_output!("");
                rfz_output!(
                    "Orientation sampling results read in from {name}.{}:",
                    RfzFileType::Smp.ext()
                );
                rfz_output!("");
                smp_res.parameters.log_output_display();
                smp_res.log_output_display();
                log_macsec_end("Orientation sampling results from file");
                rfz_output!("");
                Ok(())
            }
            None => {
                rfz_warn!("No orientation sampling has been requested.");
                Ok(())
            }
        }
    }
}
