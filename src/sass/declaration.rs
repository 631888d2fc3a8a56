//! SASS variable declarations
//!
//! Turns one raw `$name: value;` token into a normalized [`Declaration`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::map_value::parse_map_value;
use super::patterns::{DECLARATION, NEWLINE_RUN, TRAILING_FLAG};

/// A single extracted `$name: value;` variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Variable name without the `$` sigil
    pub name: String,
    /// Raw value text, whitespace-normalized and unquoted
    pub value: String,
    /// Entries of a map literal value, in source order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_value: Option<Vec<Declaration>>,
    /// Annotations from a preceding `@meta-data` block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<BTreeMap<String, String>>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            map_value: None,
            meta_data: None,
        }
    }

    /// Check whether the value is a parenthesized map literal
    pub fn is_map(&self) -> bool {
        self.map_value.is_some()
    }
}

/// Parse one declaration token.
///
/// Returns `None` when the text does not hold a valid declaration. The map
/// entries of the value are not filled in, see [`parse_declaration_tree`].
pub fn parse_declaration(token: &str) -> Option<Declaration> {
    parse_parts(token).map(|(declaration, _)| declaration)
}

/// Parse one declaration token together with the entries of a map literal value
pub fn parse_declaration_tree(token: &str) -> Option<Declaration> {
    let (mut declaration, raw_value) = parse_parts(token)?;

    // Map entries come from the raw text so line comments still end at their newline
    let entries = parse_map_value(&raw_value);
    if !entries.is_empty() {
        declaration.map_value = Some(entries);
    }
    Some(declaration)
}

/// Normalized declaration plus the trimmed raw value text
fn parse_parts(token: &str) -> Option<(Declaration, String)> {
    let stripped = TRAILING_FLAG.replace(token, ";");
    let caps = DECLARATION.captures(&stripped)?;

    // Only the first underscore is converted
    let name = caps["name"].trim().replacen('_', "-", 1);
    let raw_value = caps["value"].trim();
    let value = NEWLINE_RUN.replace_all(raw_value, " ");

    Some((Declaration::new(name, unquote(&value)), raw_value.to_string()))
}

/// Strip one pair of matching single or double quotes wrapping the whole value
fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
