//! Reading and writing of RFZSampler files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{self, bail, format_err};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

use crate::rotation::EulerTriple;

pub(crate) mod format;


/// The header line of an angle file listing Bunge Euler angles.
const ANGLE_FILE_HEADER: &str = "eu";

/// An enumerated type for RFZSampler file types.
pub enum RfzFileType {
    /// Variant for binary files containing orientation sampling results.
    Smp,
}

impl RfzFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            RfzFileType::Smp => "rfz.smp".to_string(),
        }
    }
}

/// Reads an RFZSampler binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without RFZSampler-specific extensions).
/// * `file_type` - The type of the RFZSampler file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_rfz_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: RfzFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into an RFZSampler binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without RFZSampler-specific extensions).
/// * `file_type` - The type of the RFZSampler file to be written.
/// * `value` - The structure to be serialised.
pub fn write_rfz_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: RfzFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads an RFZSampler configuration YAML file and deserialises it into an appropriate
/// structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
pub fn read_rfz_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into an RFZSampler configuration YAML file.
///
/// # Arguments
///
/// * `name` - The name of the YAML file to be written (without extensions). The resulting file
/// will have the `.yml` extension.
pub fn write_rfz_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension("yml");
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, value).map_err(|err| format_err!(err))
}

/// Writes orientations into an angle file.
///
/// The file starts with the line `eu`, followed by the number of orientations, followed by one
/// line per orientation holding $`\varphi_1`$, $`\Phi`$ and $`\varphi_2`$ in degrees.
///
/// # Arguments
///
/// * `name` - The path of the angle file to be written, used as given.
/// * `orientations` - The orientations to be written.
pub fn write_angle_file<P: AsRef<Path>>(
    name: P,
    orientations: &[EulerTriple],
) -> Result<(), anyhow::Error> {
    let mut writer = BufWriter::new(File::create(name.as_ref())?);
    writeln!(writer, "{ANGLE_FILE_HEADER}")?;
    writeln!(writer, "{}", orientations.len())?;
    for euler in orientations {
        let [phi1, phi, phi2] = euler.to_degrees();
        writeln!(writer, "{phi1:.6} {phi:.6} {phi2:.6}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads orientations from an angle file written by [`write_angle_file`].
///
/// # Returns
///
/// The orientations as Bunge Euler triples in radians.
///
/// # Errors
///
/// Errors if the file cannot be read, if its header is not `eu`, if a line does not contain
/// exactly three angles, or if the number of orientations does not match the declared count.
pub fn read_angle_file<P: AsRef<Path>>(name: P) -> Result<Vec<EulerTriple>, anyhow::Error> {
    let reader = BufReader::new(File::open(name.as_ref()).map_err(|err| format_err!(err))?);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| format_err!("Angle file is empty."))??;
    if header.trim() != ANGLE_FILE_HEADER {
        bail!("Unexpected angle file header `{}`.", header.trim());
    }
    let n_orientations = lines
        .next()
        .ok_or_else(|| format_err!("Angle file has no orientation count."))??
        .trim()
        .parse::<usize>()
        .map_err(|err| format_err!(err))?;

    let orientations = lines
        .filter(|line| line.as_ref().map_or(true, |line| !line.trim().is_empty()))
        .map(|line| -> Result<EulerTriple, anyhow::Error> {
            let line = line?;
            let angles = line
                .split_whitespace()
                .map(|angle| angle.parse::<f64>().map_err(|err| format_err!(err)))
                .collect::<Result<Vec<_>, _>>()?;
            match angles.as_slice() {
                [phi1, phi, phi2] => Ok(EulerTriple::from_degrees(*phi1, *phi, *phi2)),
                _ => Err(format_err!("Malformed angle line `{line}`.")),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    if orientations.len() != n_orientations {
        bail!(
            "Angle file declares {n_orientations} orientation(s) but contains {}.",
            orientations.len()
        );
    }
    Ok(orientations)
}
