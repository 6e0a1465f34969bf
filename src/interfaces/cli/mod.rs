//! Command-line interface of RFZSampler.

use std::path::{Path, PathBuf};

use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::interfaces::input::Input;
use crate::interfaces::InputHandle;
use crate::io::format::{rfz_error, rfz_output};
use crate::io::read_rfz_yaml;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// The pattern of the formatted report: bare lines.
const OUTPUT_PATTERN: &str = "{m}{n}";

/// The pattern of ordinary diagnostics.
const DIAGNOSTIC_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l}):<5} {t} - {m}{n}";

/// Logs a nicely formatted RFZSampler heading to the `rfz-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    rfz_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    rfz_output!("│                                                                                                     │");
    rfz_output!("│   RRRRRRRRRRRRRRRRR   FFFFFFFFFFFFFFFFFFFFFFZZZZZZZZZZZZZZZZZZZ                                     │");
    rfz_output!("│   R::::::::::::::::R  F::::::::::::::::::::FZ:::::::::::::::::Z                                     │");
    rfz_output!("│   R::::::RRRRRR:::::R FF::::::FFFFFFFFF::::FZ:::::::ZZZZZZ::::Z                                     │");
    rfz_output!("│   RR:::::R     R:::::R  F:::::F       FFFFFFZZZZZ     Z:::::Z                                       │");
    rfz_output!("│     R::::R     R:::::R  F:::::F                     Z:::::Z                                         │");
    rfz_output!("│     R::::RRRRRR:::::R   F::::::FFFFFFFFFF          Z:::::Z        Cubochoric orientation sampling   │");
    rfz_output!("│     R:::::::::::::RR    F:::::::::::::::F         Z:::::Z         in Rodrigues fundamental zones    │");
    rfz_output!("│     R::::RRRRRR:::::R   F::::::FFFFFFFFFF        Z:::::Z                                            │");
    rfz_output!("│     R::::R     R:::::R  F:::::F                 Z:::::Z                                             │");
    rfz_output!("│     R::::R     R:::::R  F:::::F               Z:::::Z     ZZZZZ                                     │");
    rfz_output!("│   RR:::::R     R:::::RFF:::::::FF            Z:::::ZZZZZZ::::::Z                                    │");
    rfz_output!("│   R::::::R     R:::::RF::::::::FF           Z:::::::::::::::::::Z                                   │");
    rfz_output!("│   RRRRRRRR     RRRRRRRFFFFFFFFFFF           ZZZZZZZZZZZZZZZZZZZZZ                   {version:>13} │");
    rfz_output!("│                                                                                                     │");
    rfz_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    rfz_output!("");
}

/// The command-line arguments of RFZSampler.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Configuration YAML file specifying the calculation.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file to which the report is written. If absent, the report goes to the console.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbosity of the diagnostics written to the console: `-v` for debug messages, `-vv` for
    /// trace messages.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The level of ordinary diagnostics implied by the verbosity flag.
    fn diagnostic_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Sets up `log4rs` with a report stream on the `rfz-output` target and a diagnostic stream on
/// the root logger.
///
/// # Arguments
///
/// * `output` - Optional path of a file receiving the report. If `None`, the report is written to
/// the console.
/// * `diagnostic_level` - The level of ordinary diagnostics, which are always written to the
/// console.
///
/// # Errors
///
/// Errors if the output file cannot be created or if a global logger has already been set.
pub fn setup_logger(
    output: Option<&Path>,
    diagnostic_level: LevelFilter,
) -> Result<(), anyhow::Error> {
    let diagnostics = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DIAGNOSTIC_PATTERN)))
        .build();
    let report: Box<dyn log4rs::append::Append> = if let Some(path) = output {
        Box::new(
            FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(OUTPUT_PATTERN)))
                .append(false)
                .build(path)
                .map_err(|err| format_err!(err))?,
        )
    } else {
        Box::new(
            ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new(OUTPUT_PATTERN)))
                .build(),
        )
    };

    let config = Config::builder()
        .appender(Appender::builder().build("diagnostics", Box::new(diagnostics)))
        .appender(Appender::builder().build("report", report))
        .logger(
            Logger::builder()
                .appender("report")
                .additive(false)
                .build("rfz-output", LevelFilter::Info),
        )
        .build(
            Root::builder()
                .appender("diagnostics")
                .build(diagnostic_level),
        )
        .map_err(|err| format_err!(err))?;
    log4rs::init_config(config).map_err(|err| format_err!(err))?;
    Ok(())
}

/// Runs RFZSampler on the command-line arguments: sets up logging, reads the configuration file
/// and handles every section in it.
///
/// # Errors
///
/// Errors if logging cannot be set up, if the configuration file cannot be read, or if any
/// requested calculation fails.
pub fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    setup_logger(cli.output.as_deref(), cli.diagnostic_level())?;
    log_heading();

    let config = cli
        .config
        .as_ref()
        .ok_or_else(|| format_err!("No configuration file has been specified."))?;
    let input = read_rfz_yaml::<Input, _>(config).map_err(|err| {
        rfz_error!("Unable to read configuration file {}: {err}", config.display());
        err
    })?;
    input.handle().map_err(|err| {
        rfz_error!("{err}");
        err
    })
}
