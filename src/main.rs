use std::process;

use clap::Parser;

use rfzsampler::interfaces::cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}
