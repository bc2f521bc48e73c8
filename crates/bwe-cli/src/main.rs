//! BWE CLI - Command-line interface for bandwidth-enhanced partial synthesis
//!
//! This binary renders partial collections to audio, morphs between
//! collections, and validates and summarizes the JSON documents involved.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bwe_cli::commands;
use cli_args::{Cli, Commands};

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render { spec, output } => commands::render::run(&spec, &output),
        Commands::Morph { spec, output } => commands::morph::run(&spec, &output),
        Commands::Validate { spec, kind, json } => commands::validate::run(&spec, &kind, json),
        Commands::Info { partials, json } => commands::info::run(&partials, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli =
            Cli::try_parse_from(["bwe", "render", "--spec", "tone.json", "-o", "tone.wav"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Render { spec, output } => {
                assert_eq!(spec, "tone.json");
                assert_eq!(output, "tone.wav");
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_validate_defaults() {
        let cli = Cli::try_parse_from(["bwe", "validate", "--spec", "doc.json"]).unwrap();
        match cli.command {
            Commands::Validate { spec, kind, json } => {
                assert_eq!(spec, "doc.json");
                assert_eq!(kind, "render");
                assert!(!json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["bwe", "validate", "--spec", "doc.json", "--kind", "score"]).is_err());
    }

    #[test]
    fn test_cli_global_verbose_flag() {
        let cli =
            Cli::try_parse_from(["bwe", "info", "--partials", "p.json", "--verbose"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Info { partials, json } => {
                assert_eq!(partials, "p.json");
                assert!(!json);
            }
            _ => panic!("expected info command"),
        }
    }

    #[test]
    fn test_cli_requires_output_for_morph() {
        let err = Cli::try_parse_from(["bwe", "morph", "--spec", "m.json"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));
    }
}
