//! Lexical patterns for SASS variable extraction
//!
//! Every pattern is compiled once into an immutable `Regex` and shared
//! read-only. None of them carries iteration state, so any number of
//! extractions can run at the same time.
//!
//! The `regex` crate has no look-around. A variable name must not start with
//! a digit, which the separate first-character class below expresses. A `;`
//! that is followed by a `}` before any `{` belongs to a brace block; the
//! tokenizer rejects such declarations in code.

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::{END_SECTION_TAG, META_DATA_TAG, PARAM_TAG, SECTION_TAG};

/// Variable identifier: ASCII word characters and hyphens, not starting with a digit
const VARIABLE: &str = r"[A-Za-z_-][A-Za-z0-9_-]*";

/// Declaration value: a quoted string, or any run of characters up to `;`
const VALUE: &str = r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|[^;]+"#;

/// Declaration terminator, with or without a trailing flag
const TERMINATOR: &str = r"(?:\s*!(?:global|default)\s*;|\s*;)";

/// Block comment that contains at least one `@meta-data` line
fn meta_data_comment() -> String {
    format!(r"/\*(?:[^*]|\*+[^*/])*@{META_DATA_TAG}(?:[^*]|\*+[^*/])*\*+/")
}

/// Declaration without any capture groups, for embedding in larger patterns
fn declaration_body() -> String {
    format!(r#"\$['"]?{VARIABLE}['"]?\s*:\s*(?:{VALUE}){TERMINATOR}"#)
}

/// A single declaration with `name` and `value` groups
pub static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\$['"]?(?P<name>{VARIABLE})['"]?\s*:\s*(?P<value>{VALUE}){TERMINATOR}"#
    ))
    .expect("Failed to compile declaration regex")
});

/// Declarations only, used by flat extraction
pub static DECLARATION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?P<decl>{})", declaration_body()))
        .expect("Failed to compile declaration token regex")
});

/// Unified token pattern. Alternatives are listed in priority order:
/// metadata block with its declaration, declaration, section start,
/// section parameter, section end.
pub static STRUCTURED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        concat!(
            r"(?P<meta>{meta})\s*(?P<meta_decl>{decl})",
            r"|(?P<decl>{decl})",
            r#"|@{section}=(?P<section>".+")"#,
            r#"|@{param}\s(?P<param_key>.+)=['"](?P<param_value>.+)['"]"#,
            r"|(?P<end>@{end})",
        ),
        meta = meta_data_comment(),
        decl = declaration_body(),
        section = SECTION_TAG,
        param = PARAM_TAG,
        end = END_SECTION_TAG,
    ))
    .expect("Failed to compile structured token regex")
});

/// One `@meta-data key="value"` entry inside a metadata block
pub static META_DATA_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"@{META_DATA_TAG}\s+(?P<key>[^\s=]+)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#
    ))
    .expect("Failed to compile meta-data entry regex")
});

/// Trailing `!default` / `!global` flag before the terminating `;`
pub static TRAILING_FLAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*!(?:default|global)\s*;\s*$").expect("Failed to compile trailing flag regex")
});

/// Whitespace runs that contain at least one newline
pub static NEWLINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n+\s*").expect("Failed to compile newline run regex"));

/// A map key, optionally quoted
pub static MAP_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^['"]?(?P<key>{VARIABLE})['"]?$"#)).expect("Failed to compile map key regex")
});
