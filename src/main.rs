//! ampify - Convert an HTML page into an AMP page.

mod asset;
mod cli;
mod config;
mod dom;
mod embed;
mod logger;
mod pipeline;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Err(err) = run(&cli) {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Build { build_args } => {
            logger::set_verbose(build_args.verbose);
            let config = ProjectConfig::load(cli)?;
            cli::build::build_page(&config)
        }
        Commands::Shim { output } => cli::shim::write_shim(output.as_deref()),
    }
}
