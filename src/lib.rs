//! # RFZSampler: Cubochoric Orientation Sampling in Rodrigues Fundamental Zones
//!
//! RFZSampler generates sets of crystal orientations that uniformly sample the fundamental zone
//! of a crystallographic rotation group. It works in the following steps:
//! - a regular grid is laid over the cubochoric cube, an equal-volume parameterisation of the
//!   rotation group $`\mathsf{SO}(3)`$,
//! - every grid point is mapped to a Rodrigues vector via the homochoric ball,
//! - the Rodrigues vector is tested against the fundamental zone of the requested rotation
//!   group (cyclic, dihedral, tetrahedral or octahedral), and
//! - the retained orientations are reported as Bunge Euler angles.
//!
//! All Euler angles handled by the library are in radians. Degrees appear only in formatted
//! output and in angle files.
//!
//! ## Getting started
//!
//! Library users will mostly need [`sampling::sample`] together with
//! [`sampling::SampleGridSpec`] and [`symmetry::SymmetryDescriptor`], or
//! [`session::SamplingSession`] for interactive front ends that edit the configuration
//! repeatedly.
//!
//! The `rfzsampler` binary reads a YAML configuration file:
//!
//! ```text
//! rfzsampler --config input.yml --output report.out
//! ```
//!
//! where `input.yml` contains a `sampling` section deserialised into
//! [`drivers::orientation_sampling::OrientationSamplingParams`].

pub mod auxiliary;
pub mod drivers;
pub mod interfaces;
pub mod io;
pub mod rotation;
pub mod sampling;
pub mod session;
pub mod symmetry;
