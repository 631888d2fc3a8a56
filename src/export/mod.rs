//! Stylesheet export
//!
//! Reads SASS files, extracts their variables and renders the result as JSON
//! or YAML for design-token tooling.
//!
//! Every input is extracted on its own worker thread. Workers share nothing
//! but the read-only source text; results are merged in input order.

pub mod error;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::thread;

use log::{debug, info};
use serde::Serialize;

use crate::sass::{Declaration, StructuredResult, parse, parse_structured};
pub use error::{ExportError, ExportResult, IoContext, JsonContext};

/// Shape of the exported data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Declarations grouped by section
    #[default]
    Structured,
    /// One flat list of declarations
    Array,
}

/// Serialization format of the exported data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(ExportError::UnsupportedFormat { format: s.to_string() }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for ExportMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structured" => Ok(ExportMode::Structured),
            "array" => Ok(ExportMode::Array),
            _ => Err(ExportError::UnsupportedFormat { format: s.to_string() }),
        }
    }
}

/// Options for one export run
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Stylesheets to read, in order
    pub inputs: Vec<PathBuf>,
    /// Output file, stdout when `None`
    pub output: Option<PathBuf>,
    pub mode: ExportMode,
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Extracted data of one or more stylesheets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Exported {
    Array(Vec<Declaration>),
    Structured(StructuredResult),
}

impl Exported {
    pub fn is_empty(&self) -> bool {
        match self {
            Exported::Array(declarations) => declarations.is_empty(),
            Exported::Structured(result) => result.is_empty(),
        }
    }
}

/// Read every input as UTF-8 text
pub fn read_inputs(paths: &[PathBuf]) -> ExportResult<Vec<String>> {
    if paths.is_empty() {
        return Err(ExportError::NoInput);
    }

    paths
        .iter()
        .map(|path| {
            debug!("Reading stylesheet {}", path.display());
            fs::read_to_string(path).with_io_context(path, "Failed to read stylesheet")
        })
        .collect()
}

/// Extract every source on its own worker and merge the results in order
pub fn extract_sources(sources: &[String], mode: ExportMode) -> Exported {
    match mode {
        ExportMode::Array => {
            let per_source = run_workers(sources, parse);
            Exported::Array(per_source.into_iter().flatten().collect())
        }
        ExportMode::Structured => {
            let per_source = run_workers(sources, parse_structured);
            let mut merged = StructuredResult::new();
            for result in per_source {
                merged.merge(result);
            }
            Exported::Structured(merged)
        }
    }
}

fn run_workers<T, F>(sources: &[String], extract: F) -> Vec<T>
where
    T: Send,
    F: Fn(&str) -> T + Sync,
{
    let extract = &extract;
    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || extract(source.as_str())))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// Render extracted data in the requested format
pub fn render(exported: &Exported, format: OutputFormat, pretty: bool) -> ExportResult<String> {
    match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(exported).with_json_context("Failed to render JSON output")
        }
        OutputFormat::Json => {
            serde_json::to_string(exported).with_json_context("Failed to render JSON output")
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(exported)?),
    }
}

/// Write rendered output to a file, creating parent directories, or to stdout
pub fn write_output(output: Option<&Path>, content: &str) -> ExportResult<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_io_context(parent, "Failed to create output directory")?;
            }
            fs::write(path, content).with_io_context(path, "Failed to write output")?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Read, extract and render all inputs of `options`
pub fn export_files(options: &ExportOptions) -> ExportResult<String> {
    let sources = read_inputs(&options.inputs)?;
    let exported = extract_sources(&sources, options.mode);
    if exported.is_empty() {
        info!("No variables found in {} input file(s)", sources.len());
    }
    render(&exported, options.format, options.pretty)
}

/// Run a complete export and write the result to the configured target
pub fn run(options: &ExportOptions) -> ExportResult<()> {
    let rendered = export_files(options)?;
    write_output(options.output.as_deref(), &rendered)
}

#[cfg(test)]
mod export_tests;
