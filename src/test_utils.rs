//! Test utilities shared across the codebase

use std::fs;
use std::path::{Path, PathBuf};

/// Sample stylesheet with a default section, a named section with params,
/// a metadata annotation and a map literal
pub const SAMPLE_STYLESHEET: &str = r#"$black: #000;
$white: #fff;

//@sass-export-section="colors"
//@param displayName="Colors"
/** @meta-data description="Brand gray" **/
$brand-gray: #b0bec5;
//@end-sass-export-section

$breakpoints: (
  small: 767px,
  large: 1200px
);
"#;

/// Write a stylesheet into `dir` and return its path
pub fn write_stylesheet(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test stylesheet");
    path
}
