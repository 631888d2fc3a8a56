//! SASS variable extraction
//!
//! Mines `$name: value;` declarations from SASS stylesheets for export to
//! design-token files:
//! - map literal values are parsed into nested entries
//! - `//@sass-export-section="name"` markers group declarations
//! - `//@param key="value"` markers describe the enclosing section
//! - `/** @meta-data key="value" **/` blocks annotate the next declaration
//!
//! Values are kept as opaque strings; nothing is evaluated.

pub mod constants;
pub mod declaration;
pub mod map_value;
pub mod parser;
pub mod patterns;
pub mod section;
pub mod tokenizer;

pub use constants::PARAM_SUFFIX;
pub use declaration::Declaration;
pub use parser::{SassParser, parse, parse_structured};
pub use section::StructuredResult;
