//! Token extraction for SASS stylesheets
//!
//! Scans raw stylesheet text once and returns the recognized tokens in source
//! order. Text that matches no pattern is skipped silently.

use std::collections::BTreeMap;

use log::trace;
use regex::{Captures, Regex};

use super::patterns::{DECLARATION_TOKEN, META_DATA_ENTRY, STRUCTURED_TOKEN, TRAILING_FLAG};

/// A lexical token produced by [`tokenize`]
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Raw declaration text, e.g. `$black: #000;`
    Declaration(String),
    /// Section start marker with the raw (still quoted) section name
    SectionStart(String),
    /// Section end marker
    SectionEnd,
    /// Parameter of the enclosing section
    SectionParam { key: String, value: String },
    /// Entries of a metadata block; always followed by the declaration it annotates
    MetaData(BTreeMap<String, String>),
}

/// Extract every token (declarations and markers) from the text
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    scan(text, &STRUCTURED_TOKEN, |caps| {
        if let (Some(meta), Some(decl)) = (caps.name("meta"), caps.name("meta_decl")) {
            tokens.push(Token::MetaData(parse_meta_data(meta.as_str())));
            tokens.push(Token::Declaration(decl.as_str().to_string()));
        } else if let Some(decl) = caps.name("decl") {
            tokens.push(Token::Declaration(decl.as_str().to_string()));
        } else if let Some(section) = caps.name("section") {
            tokens.push(Token::SectionStart(section.as_str().to_string()));
        } else if let (Some(key), Some(value)) = (caps.name("param_key"), caps.name("param_value")) {
            tokens.push(Token::SectionParam {
                key: key.as_str().trim().to_string(),
                value: value.as_str().to_string(),
            });
        } else if caps.name("end").is_some() {
            tokens.push(Token::SectionEnd);
        }
    });

    trace!("Tokenized {} bytes into {} tokens", text.len(), tokens.len());
    tokens
}

/// Extract raw declaration texts only, ignoring every marker
pub fn extract_declarations(text: &str) -> Vec<String> {
    let mut declarations = Vec::new();
    scan(text, &DECLARATION_TOKEN, |caps| {
        declarations.push(caps["decl"].to_string());
    });
    declarations
}

/// Collect the `@meta-data key="value"` entries of a block comment.
/// Later duplicate keys overwrite earlier ones.
pub fn parse_meta_data(block: &str) -> BTreeMap<String, String> {
    META_DATA_ENTRY
        .captures_iter(block)
        .filter_map(|caps| {
            let value = caps.name("dq").or_else(|| caps.name("sq"))?;
            Some((caps["key"].to_string(), value.as_str().to_string()))
        })
        .collect()
}

/// Walk all non-overlapping matches of `pattern` left to right.
///
/// The cursor is local to this call. A declaration match that sits inside a
/// brace block is rejected and scanning resumes one character after the
/// rejected match start.
fn scan<'t>(text: &'t str, pattern: &Regex, mut on_match: impl FnMut(&Captures<'t>)) {
    let mut braces = BraceLookahead::new(text);
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = pattern.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        let declaration = caps
            .name("decl")
            .or_else(|| caps.name("meta_decl"))
            .map(|m| m.as_str());

        let inside_block = declaration
            .is_some_and(|decl| !TRAILING_FLAG.is_match(decl) && braces.closes_block_at(whole.end()));

        if inside_block {
            trace!("Skipping declaration inside a block: {:?}", whole.as_str());
            pos = whole.start() + next_char_len(&text[whole.start()..]);
            continue;
        }

        on_match(&caps);
        pos = whole.end();
    }
}

/// Remembers the next brace ahead of the scan cursor so that repeated
/// lookups walk the text once.
struct BraceLookahead<'t> {
    text: &'t str,
    /// Offset the last lookup started from
    from: usize,
    /// First `{` or `}` at or after `from`
    next: Option<usize>,
}

impl<'t> BraceLookahead<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            from: 0,
            next: find_brace(text, 0),
        }
    }

    /// True if a `}` appears at or after `offset` before any `{`
    fn closes_block_at(&mut self, offset: usize) -> bool {
        if offset < self.from {
            self.next = find_brace(self.text, offset);
        } else {
            while let Some(index) = self.next.filter(|&index| index < offset) {
                self.next = find_brace(self.text, index + 1);
            }
        }
        self.from = offset;

        self.next.is_some_and(|index| self.text.as_bytes()[index] == b'}')
    }
}

fn find_brace(text: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(['{', '}']).map(|index| from + index)
}

fn next_char_len(text: &str) -> usize {
    text.chars().next().map_or(1, char::len_utf8)
}
