//! Field keys and labels derived from placeholder tokens.

use super::tokenizer::is_identifier_char;
use crate::error::{CaptionError, Result};

/// Derive the camelCase field key from a raw token such as `<animalType>`.
///
/// The key is the text strictly between `<` and the first `:` or `>`.
///
/// # Returns
///
/// * `Ok(String)` - The key, e.g. `animalType`
/// * `Err(CaptionError::MalformedToken)` - The token has no `<`, no terminator,
///   or an identifier that is empty or contains other characters
pub fn derive_key(token: &str) -> Result<String> {
    let malformed = || CaptionError::MalformedToken {
        token: token.to_string(),
    };

    let inner = token.strip_prefix('<').ok_or_else(malformed)?;
    let end = inner.find([':', '>']).ok_or_else(malformed)?;
    let key = &inner[..end];

    if key.is_empty() || !key.chars().all(is_identifier_char) {
        return Err(malformed());
    }

    Ok(key.to_string())
}

/// Derive a Title Case label from a camelCase key.
///
/// Inserts a space before every uppercase ASCII letter, then uppercases the
/// first character: `animalType` becomes `Animal Type`, `id` becomes `Id`.
pub fn derive_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
