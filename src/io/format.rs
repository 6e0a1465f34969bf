//! Nice RFZSampler output formatting.

use std::fmt;

use log;

const RFZ_BANNER_LENGTH: usize = 103;

/// Logs an error to both the default logger and the `rfz-output` logger.
macro_rules! rfz_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "rfz-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `rfz-output` logger.
macro_rules! rfz_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "rfz-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `rfz-output` logger.
macro_rules! rfz_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "rfz-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {rfz_error, rfz_output, rfz_warn};

/// Logs a nicely formatted section title to the `rfz-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(RFZ_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    rfz_output!("┌──{bar}──┐");
    rfz_output!("│§ {title:^length$} §│");
    rfz_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let bar = "═".repeat(subtitle.chars().count());
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `rfz-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let bar = "═".repeat(subtitle.chars().count());
    rfz_output!("{}", subtitle);
    rfz_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `rfz-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = RFZ_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    rfz_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `rfz-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = RFZ_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    rfz_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging RFZSampler outputs nicely.
pub(crate) trait RfzOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            rfz_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> RfzOutput for T where T: fmt::Debug + fmt::Display {}
