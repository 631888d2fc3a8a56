//! Map literal parsing
//!
//! A map literal is a value wrapped in one pair of parentheses holding
//! `key: value` entries separated by commas, e.g.
//! `(small: 767px, large: (lg: 1200px, xl: 1400px))`.
//!
//! Comments are dropped first. Entries are then split at top-level commas;
//! parentheses and quoted strings are skipped as a whole, so function calls
//! like `rgba(255, 0, 0, .5)` stay in one entry.
//! Each entry is re-parsed as a `$key: value;` declaration and its value is
//! parsed again, so nesting depth follows whatever the source text holds.

use super::declaration::{Declaration, parse_declaration_tree};
use super::patterns::MAP_KEY;

/// Parse the entries of a map literal value.
///
/// Expects the value as written in the source: once newlines are collapsed a
/// `//` comment can no longer be told apart from the entries after it.
/// Returns an empty list when the value is not a map literal or holds no
/// `key: value` entries.
pub fn parse_map_value(value: &str) -> Vec<Declaration> {
    let cleaned = strip_comments(value);
    let Some(body) = map_body(&cleaned) else {
        return Vec::new();
    };

    split_entries(body)
        .into_iter()
        .filter_map(parse_entry)
        .collect()
}

/// Parse a single `key: value` entry, descending into nested maps
fn parse_entry(entry: &str) -> Option<Declaration> {
    let colon = find_top_level(entry, b':')?;
    let key = entry[..colon].trim();
    let value = entry[colon + 1..].trim();
    if value.is_empty() {
        return None;
    }

    let key = MAP_KEY.captures(key)?;
    parse_declaration_tree(&format!("${}: {};", &key["key"], value))
}

/// Remove `//` and `/* */` comments outside quoted strings.
/// A `//` right after `:` is part of a URL, not a comment.
fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut cleaned = String::with_capacity(text.len());
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];
        let next = bytes.get(index + 1).copied();

        match (quote, byte) {
            (Some(_), b'\\') => index += 1,
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'/') if next == Some(b'/') && (index == 0 || bytes[index - 1] != b':') => {
                cleaned.push_str(&text[start..index]);
                index = text[index..].find('\n').map_or(bytes.len(), |end| index + end);
                start = index;
                continue;
            }
            (None, b'/') if next == Some(b'*') => {
                cleaned.push_str(&text[start..index]);
                cleaned.push(' ');
                index = text[index + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |end| index + 2 + end + 2);
                start = index;
                continue;
            }
            _ => {}
        }
        index += 1;
    }

    cleaned.push_str(&text[start.min(bytes.len())..]);
    cleaned
}

/// Inner text of a value wrapped in one matching pair of parentheses
fn map_body(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if !trimmed.starts_with('(') || !trimmed.ends_with(')') {
        return None;
    }

    // The opening parenthesis must be closed by the very last character
    let last = trimmed.len() - 1;
    let mut closed_at = None;
    scan_top_level(trimmed, |index, byte, depth| {
        if byte == b')' && depth == 0 && closed_at.is_none() {
            closed_at = Some(index);
        }
    });

    (closed_at == Some(last)).then(|| &trimmed[1..last])
}

/// Split a map body at top-level commas, dropping empty entries
fn split_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    scan_top_level(body, |index, byte, depth| {
        if byte == b',' && depth == 0 {
            entries.push(&body[start..index]);
            start = index + 1;
        }
    });
    entries.push(&body[start..]);
    entries.retain(|entry| !entry.trim().is_empty());
    entries
}

/// Byte offset of the first `target` outside parentheses and quotes
fn find_top_level(text: &str, target: u8) -> Option<usize> {
    let mut found = None;
    scan_top_level(text, |index, byte, depth| {
        if byte == target && depth == 0 && found.is_none() {
            found = Some(index);
        }
    });
    found
}

/// Visit every ASCII byte outside quoted strings together with the
/// parenthesis depth it sits at. A `)` is reported at the depth it closes to.
fn scan_top_level(text: &str, mut visit: impl FnMut(usize, u8, usize)) {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut index = 0;

    while index < bytes.len() {
        let byte = bytes[index];
        match (quote, byte) {
            (Some(_), b'\\') => index += 1,
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'(') => {
                visit(index, byte, depth);
                depth += 1;
            }
            (None, b')') => {
                depth = depth.saturating_sub(1);
                visit(index, byte, depth);
            }
            (None, _) => visit(index, byte, depth),
        }
        index += 1;
    }
}
