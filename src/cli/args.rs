//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert an HTML page into an AMP page
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: ampify.toml)
    #[arg(short = 'C', long, global = true, default_value = "ampify.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the AMP page
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the stylesheet preload script
    Shim {
        /// Write the script to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

/// Build command arguments. Paths are relative to the project root.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Source HTML page
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Stylesheet to inline
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub stylesheet: Option<PathBuf>,

    /// Output page
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Analytics account id
    #[arg(short, long)]
    pub account: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_overrides() {
        let cli = Cli::parse_from([
            "ampify", "b", "-i", "page.html", "--account", "UA-9-9", "-V",
        ]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.input, Some(PathBuf::from("page.html")));
        assert_eq!(build_args.account.as_deref(), Some("UA-9-9"));
        assert!(build_args.verbose);
        assert!(build_args.output.is_none());
        assert_eq!(cli.config, PathBuf::from("ampify.toml"));
    }

    #[test]
    fn test_parse_shim() {
        let cli = Cli::parse_from(["ampify", "--color", "never", "shim", "-o", "preload.js"]);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(
            cli.command,
            Commands::Shim { output: Some(ref p) } if p == &PathBuf::from("preload.js")
        ));
    }
}
