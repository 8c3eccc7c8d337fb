//! Placeholder scanner.
//!
//! Grammar:
//!
//! ```text
//! token        = "<" identifier [ ":" alternatives ] ">"
//! identifier   = { ALPHA | DIGIT | "_" }
//! alternatives = { ALPHA | DIGIT | "_" | "|" | " " }
//! ```
//!
//! A `<` that does not start a well-formed token is plain text and scanning
//! resumes at the next character. An empty identifier (`<>`) is still a
//! token here; it is rejected later when a key is derived from it.

use super::identifier::derive_key;
use crate::error::{CaptionError, Result};
use std::ops::Range;

/// One placeholder occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken {
    /// The token text exactly as written, including the angle brackets.
    pub text: String,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset one past the closing `>`.
    pub end: usize,
    /// The identifier before any `:`.
    pub identifier: String,
    /// Alternatives listed after `:`. Reserved; substitution ignores them.
    pub alternatives: Vec<String>,
}

impl PlaceholderToken {
    /// Byte range of the token within its template.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The camelCase field key for this token.
    pub fn key(&self) -> Result<String> {
        derive_key(&self.text)
    }
}

/// Scan a template for placeholder tokens, left to right.
///
/// Returns an empty vector when the template has no tokens.
pub fn scan_tokens(template: &str) -> Vec<PlaceholderToken> {
    let mut tokens = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = template[search_from..].find('<') {
        let start = search_from + offset;
        match parse_token_at(template, start) {
            Some(token) => {
                search_from = token.end;
                tokens.push(token);
            }
            // '<' is one byte, so start + 1 is always a char boundary
            None => search_from = start + 1,
        }
    }

    tokens
}

/// Scan a template for placeholder tokens, requiring at least one.
///
/// # Returns
///
/// * `Ok(Vec<PlaceholderToken>)` - Tokens in template order, duplicates kept
/// * `Err(CaptionError::NoTokensFound)` - The template has no placeholders
pub fn extract_tokens(template: &str) -> Result<Vec<PlaceholderToken>> {
    let tokens = scan_tokens(template);
    if tokens.is_empty() {
        return Err(CaptionError::NoTokensFound);
    }
    Ok(tokens)
}

fn parse_token_at(template: &str, start: usize) -> Option<PlaceholderToken> {
    let body = &template[start + 1..];

    let ident_len = body
        .find(|c: char| !is_identifier_char(c))
        .unwrap_or(body.len());
    let identifier = &body[..ident_len];
    let after_ident = &body[ident_len..];

    let (alternatives, suffix_len) = match after_ident.strip_prefix(':') {
        Some(suffix) => {
            let alt_len = suffix
                .find(|c: char| !is_alternative_char(c))
                .unwrap_or(suffix.len());
            (split_alternatives(&suffix[..alt_len]), 1 + alt_len)
        }
        None => (Vec::new(), 0),
    };

    if !after_ident[suffix_len..].starts_with('>') {
        return None;
    }

    let end = start + 1 + ident_len + suffix_len + 1;
    Some(PlaceholderToken {
        text: template[start..end].to_string(),
        start,
        end,
        identifier: identifier.to_string(),
        alternatives,
    })
}

fn split_alternatives(raw: &str) -> Vec<String> {
    raw.split(['|', ' '])
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_alternative_char(c: char) -> bool {
    is_identifier_char(c) || c == '|' || c == ' '
}
