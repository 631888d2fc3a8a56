//! Sass Export Marker Constants
//!
//! This module contains the marker tags and names recognized inside SASS
//! stylesheets. Centralizing these constants keeps the patterns, the state
//! machine and the tests in agreement.

/// Tag used by section markers (e.g. `//@sass-export-section="colors"`)
pub const SECTION_TAG: &str = "sass-export-section";
/// Tag used by the section end marker (`//@end-sass-export-section`)
pub const END_SECTION_TAG: &str = "end-sass-export-section";
/// Tag used by section parameters (e.g. `//@param displayName="Colors"`)
pub const PARAM_TAG: &str = "param";
/// Tag used inside block comments to annotate the next declaration
pub const META_DATA_TAG: &str = "meta-data";

/// Section that declarations land in when no named section is open
pub const DEFAULT_SECTION: &str = "variables";

/// Suffix appended to a section name to form its parameter entry key
pub const PARAM_SUFFIX: &str = "-params";

