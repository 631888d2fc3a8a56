//! Sass Export Library
//!
//! This library extracts variable declarations from SASS stylesheets and
//! exports them, grouped by section, as JSON or YAML design tokens.

pub mod export;
pub mod sass;
#[cfg(test)]
pub mod test_utils;

pub use sass::{Declaration, PARAM_SUFFIX, SassParser, StructuredResult, parse, parse_structured};
