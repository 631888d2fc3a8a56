//! Section grouping for extracted declarations
//!
//! [`SectionStateMachine`] consumes the token stream and groups declarations
//! by the section markers around them:
//!
//! ```text
//! $black: #000;                          -> "variables"
//! //@sass-export-section="colors"
//! //@param displayName="Colors"          -> "colors-params"
//! /** @meta-data description="Brand" **/
//! $brand: #b0bec5;                       -> "colors", with metaData
//! //@end-sass-export-section
//! ```
//!
//! - Param markers outside a named section are dropped.
//! - Params are committed when their section closes, when another section
//!   starts, or at the end of the stream.
//! - Pending metadata survives structural markers and attaches to the next
//!   declaration that parses.

use std::collections::BTreeMap;

use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::constants::{DEFAULT_SECTION, PARAM_SUFFIX};
use super::declaration::{Declaration, parse_declaration_tree};
use super::tokenizer::Token;

/// Declarations grouped by section, plus per-section parameters.
///
/// Sections keep the order in which they were first encountered. Serializes
/// to one flat object where parameters appear under `<section>-params`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredResult {
    sections: Vec<(String, Vec<Declaration>)>,
    params: Vec<(String, BTreeMap<String, String>)>,
}

impl StructuredResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.params.is_empty()
    }

    /// Declarations of a section, if the section exists
    pub fn section(&self, name: &str) -> Option<&[Declaration]> {
        self.sections
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, declarations)| declarations.as_slice())
    }

    /// Parameters committed for a section
    pub fn params(&self, section: &str) -> Option<&BTreeMap<String, String>> {
        self.params
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, params)| params)
    }

    /// Iterate over sections and their declarations in encounter order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.sections
            .iter()
            .map(|(name, declarations)| (name.as_str(), declarations.as_slice()))
    }

    /// All top-level keys: section names, then `<section>-params` entries
    pub fn keys(&self) -> Vec<String> {
        self.sections
            .iter()
            .map(|(name, _)| name.clone())
            .chain(self.params.iter().map(|(name, _)| params_key(name)))
            .collect()
    }

    /// Get or create the declaration list of a section
    pub fn ensure_section(&mut self, name: &str) -> &mut Vec<Declaration> {
        let index = match self.sections.iter().position(|(section, _)| section == name) {
            Some(index) => index,
            None => {
                self.sections.push((name.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }

    /// Merge parameters into a section's parameter map, later keys winning
    pub fn add_params(&mut self, section: &str, params: BTreeMap<String, String>) {
        match self.params.iter_mut().find(|(name, _)| name == section) {
            Some((_, existing)) => existing.extend(params),
            None => self.params.push((section.to_string(), params)),
        }
    }

    /// Append another result: declarations join same-named sections,
    /// parameters are overlaid key by key
    pub fn merge(&mut self, other: StructuredResult) {
        for (name, declarations) in other.sections {
            self.ensure_section(&name).extend(declarations);
        }
        for (name, params) in other.params {
            self.add_params(&name, params);
        }
    }
}

impl Serialize for StructuredResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len() + self.params.len()))?;
        for (name, declarations) in &self.sections {
            map.serialize_entry(name, declarations)?;
        }
        for (name, params) in &self.params {
            map.serialize_entry(&params_key(name), params)?;
        }
        map.end()
    }
}

/// Key under which a section's parameters are exported
pub fn params_key(section: &str) -> String {
    format!("{section}{PARAM_SUFFIX}")
}

/// Section grouping state, one instance per extraction
#[derive(Debug, Default)]
pub struct SectionStateMachine {
    /// Open named section, `None` while in the default section
    current: Option<String>,
    pending_params: BTreeMap<String, String>,
    pending_meta_data: BTreeMap<String, String>,
    result: StructuredResult,
}

impl SectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the machine over a whole token stream
    pub fn run(tokens: impl IntoIterator<Item = Token>) -> StructuredResult {
        let mut tokens = tokens.into_iter().peekable();
        if tokens.peek().is_none() {
            return StructuredResult::new();
        }

        let mut machine = Self::new();
        machine.result.ensure_section(DEFAULT_SECTION);
        for token in tokens {
            machine.process(token);
        }
        machine.finish()
    }

    /// Name of the section declarations currently land in
    pub fn current_section(&self) -> &str {
        self.current.as_deref().unwrap_or(DEFAULT_SECTION)
    }

    pub fn process(&mut self, token: Token) {
        match token {
            Token::SectionStart(raw) => self.start_section(&raw),
            Token::SectionEnd => {
                self.flush_params();
                self.current = None;
            }
            Token::SectionParam { key, value } => {
                if self.current.is_some() {
                    self.pending_params.insert(key, value);
                } else {
                    debug!("Dropping section param '{}' outside of a named section", key);
                }
            }
            Token::MetaData(entries) => self.pending_meta_data.extend(entries),
            Token::Declaration(text) => self.add_declaration(&text),
        }
    }

    /// Commit pending params and return the grouped result
    pub fn finish(mut self) -> StructuredResult {
        self.flush_params();
        self.result
    }

    /// Open a named section. Params belong to the section that was open when
    /// they were given, so pending ones are committed before switching.
    fn start_section(&mut self, raw: &str) {
        let name = raw.replace('"', "");
        if name.is_empty() {
            debug!("Ignoring section marker with an empty name");
            return;
        }

        self.flush_params();
        self.result.ensure_section(&name);
        self.current = Some(name);
    }

    fn add_declaration(&mut self, text: &str) {
        let Some(mut declaration) = parse_declaration_tree(text) else {
            debug!("Dropping malformed declaration: {:?}", text);
            return;
        };

        let meta_data = std::mem::take(&mut self.pending_meta_data);
        if !meta_data.is_empty() {
            declaration.meta_data = Some(meta_data);
        }

        let section = self.current_section().to_string();
        self.result.ensure_section(&section).push(declaration);
    }

    fn flush_params(&mut self) {
        let params = std::mem::take(&mut self.pending_params);
        if let Some(section) = &self.current {
            if !params.is_empty() {
                self.result.add_params(section, params);
            }
        }
    }
}
