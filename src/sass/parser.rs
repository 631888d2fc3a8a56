//! SASS variable parser
//!
//! Entry points for extracting `$name: value;` declarations from stylesheet
//! source text, either as one flat list or grouped by export sections.

use log::debug;

use super::declaration::{Declaration, parse_declaration_tree};
use super::section::{SectionStateMachine, StructuredResult};
use super::tokenizer::{extract_declarations, tokenize};

/// Parser over borrowed stylesheet source
#[derive(Debug, Clone, Copy)]
pub struct SassParser<'a> {
    content: &'a str,
}

impl<'a> SassParser<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &'a str {
        self.content
    }

    /// Extract all declarations in source order, ignoring section markers
    pub fn parse(&self) -> Vec<Declaration> {
        parse(self.content)
    }

    /// Extract declarations grouped by section
    pub fn parse_structured(&self) -> StructuredResult {
        parse_structured(self.content)
    }
}

/// Extract all declarations in source order.
///
/// Section, param and metadata markers produce nothing here.
pub fn parse(text: &str) -> Vec<Declaration> {
    let declarations: Vec<Declaration> = extract_declarations(text)
        .iter()
        .filter_map(|token| parse_declaration_tree(token))
        .collect();

    debug!("Parsed {} declarations", declarations.len());
    declarations
}

/// Extract declarations grouped by section, with section params and
/// per-declaration metadata
pub fn parse_structured(text: &str) -> StructuredResult {
    let result = SectionStateMachine::run(tokenize(text));
    debug!("Parsed structured result with keys {:?}", result.keys());
    result
}
