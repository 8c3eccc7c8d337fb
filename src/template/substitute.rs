//! Caption rendering: replace every placeholder with its field's value.
//!
//! Replacement works on the token spans from the scanner, so a value that
//! happens to contain placeholder text is copied verbatim and never
//! re-scanned.

use super::registry::FieldRegistry;
use super::tokenizer::extract_tokens;
use crate::error::{CaptionError, Result};
use std::collections::HashMap;

/// Render `template` with the values held in `fields`.
///
/// Tokens are consumed left to right. The n-th occurrence of a key reads the
/// n-th field with that key (see [`FieldRegistry::value_for`]). Empty values
/// render as empty text.
///
/// # Returns
///
/// * `Ok(String)` - The rendered caption
/// * `Err(CaptionError::NoTokensFound)` - The template has no placeholders
/// * `Err(CaptionError::MalformedToken)` - A token has no usable identifier
/// * `Err(CaptionError::MissingFieldValue)` - A key has no field; the
///   registry is out of date with the template
pub fn generate_caption(template: &str, fields: &FieldRegistry) -> Result<String> {
    let tokens = extract_tokens(template)?;

    let mut output = String::with_capacity(template.len());
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut cursor = 0;

    for token in &tokens {
        let key = token.key()?;
        let seen = occurrences.entry(key.clone()).or_insert(0);
        let value = fields
            .value_for(&key, *seen)
            .ok_or_else(|| CaptionError::MissingFieldValue { key: key.clone() })?;
        *seen += 1;

        output.push_str(&template[cursor..token.start]);
        output.push_str(value);
        cursor = token.end;
    }
    output.push_str(&template[cursor..]);

    Ok(output)
}
