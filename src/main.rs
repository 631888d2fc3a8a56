//! Command-line interface for sass_export
//!
//! Usage:
//!   sass_export [OPTIONS] `<INPUT>`...
//!
//! Extracts `$variables` from the given stylesheets and prints them as JSON
//! (or YAML), grouped by `//@sass-export-section` markers unless `--array`
//! is given.
mod logging;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};
use sass_export::export::{self, ExportMode, ExportOptions, ExportResult, OutputFormat};

fn build_cli() -> Command {
    Command::new("sass_export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export SASS variables to JSON or YAML design tokens")
        .arg_required_else_help(true)
        .arg(
            Arg::new("inputs")
                .help("Stylesheets to read, merged in the given order")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the result to this file instead of stdout")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("array")
                .long("array")
                .short('a')
                .help("Export one flat list of declarations instead of sections")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format ('json' or 'yaml')")
                .default_value("json"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Print JSON on a single line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging on stderr")
                .action(ArgAction::SetTrue),
        )
}

fn options_from_matches(matches: &ArgMatches) -> ExportResult<ExportOptions> {
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json")
        .parse()?;

    Ok(ExportOptions {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        mode: if matches.get_flag("array") {
            ExportMode::Array
        } else {
            ExportMode::Structured
        },
        format,
        pretty: !matches.get_flag("compact"),
    })
}

fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = logging::init_logger(matches.get_flag("verbose")) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    let options = match options_from_matches(&matches) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("Exporting {} stylesheet(s) as {}", options.inputs.len(), options.format);

    if let Err(e) = export::run(&options) {
        error!("Export failed: {:?}", e);
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}
