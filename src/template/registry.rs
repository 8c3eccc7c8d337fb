//! Field registry: the ordered fields materialized for a template.
//!
//! The registry is rebuilt wholesale on every regeneration. Values typed
//! into the previous registry are discarded, even for keys that survive the
//! template edit: changing the template after filling fields clears all
//! values.

use super::identifier::derive_label;
use super::tokenizer::{PlaceholderToken, scan_tokens};
use crate::error::{CaptionError, Result};
use serde::{Deserialize, Serialize};

/// A named, user-editable value derived from one placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// camelCase key, e.g. `animalType`.
    pub key: String,
    /// Title Case label, e.g. `Animal Type`.
    pub label: String,
    /// User-entered value; empty until set.
    #[serde(default)]
    pub value: String,
}

impl Field {
    /// Build an empty field from a token.
    pub fn from_token(token: &PlaceholderToken) -> Result<Self> {
        let key = token.key()?;
        Ok(Self {
            label: derive_label(&key),
            key,
            value: String::new(),
        })
    }
}

/// Ordered fields, one per token occurrence, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: Vec<Field>,
}

impl FieldRegistry {
    /// Derive a fresh registry from a template.
    ///
    /// A template without tokens yields an empty registry. A malformed token
    /// fails the whole regeneration.
    pub fn regenerate(template: &str) -> Result<Self> {
        let fields = scan_tokens(template)
            .iter()
            .map(Field::from_token)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Set the value of every field with `key`.
    ///
    /// Returns the number of fields updated.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<usize> {
        let mut updated = 0;
        for field in self.fields.iter_mut().filter(|f| f.key == key) {
            field.value = value.to_string();
            updated += 1;
        }

        if updated == 0 {
            return Err(CaptionError::MissingFieldValue {
                key: key.to_string(),
            });
        }
        Ok(updated)
    }

    /// Set the value of the field at `index` (zero-based, template order).
    pub fn set_value_at(&mut self, index: usize, value: &str) -> Result<()> {
        let count = self.fields.len();
        let field = self.fields.get_mut(index).ok_or_else(|| {
            CaptionError::UserError(format!(
                "field index {} is out of range ({} field(s))",
                index, count
            ))
        })?;
        field.value = value.to_string();
        Ok(())
    }

    /// Value for the `occurrence`-th appearance (zero-based) of `key`.
    ///
    /// The n-th occurrence reads the n-th field with that key. When there are
    /// fewer fields than occurrences, the first field with that key is used.
    /// `None` only when no field has the key.
    pub fn value_for(&self, key: &str, occurrence: usize) -> Option<&str> {
        let matching: Vec<&Field> = self.fields.iter().filter(|f| f.key == key).collect();
        matching
            .get(occurrence)
            .or_else(|| matching.first())
            .map(|f| f.value.as_str())
    }
}

/// Regenerate the field registry for a template.
///
/// Equivalent to [`FieldRegistry::regenerate`]; all values start empty.
pub fn regenerate_fields(template: &str) -> Result<FieldRegistry> {
    FieldRegistry::regenerate(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "a <imageType> of a <animalType> eating a <foodType>";

    fn keys_and_labels(registry: &FieldRegistry) -> Vec<(String, String)> {
        registry
            .iter()
            .map(|f| (f.key.clone(), f.label.clone()))
            .collect()
    }

    #[test]
    fn test_regenerate_concrete_template() {
        let registry = regenerate_fields(TEMPLATE).unwrap();
        assert_eq!(
            registry.fields().to_vec(),
            vec![
                Field {
                    key: "imageType".to_string(),
                    label: "Image Type".to_string(),
                    value: String::new(),
                },
                Field {
                    key: "animalType".to_string(),
                    label: "Animal Type".to_string(),
                    value: String::new(),
                },
                Field {
                    key: "foodType".to_string(),
                    label: "Food Type".to_string(),
                    value: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_regenerate_is_idempotent() {
        let first = regenerate_fields(TEMPLATE).unwrap();
        let second = regenerate_fields(TEMPLATE).unwrap();
        assert_eq!(first, second);
        assert!(second.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_registry_has_one_field_per_occurrence() {
        let registry = regenerate_fields("<x> then <y> then <x>").unwrap();
        let keys: Vec<&str> = registry.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "x"]);
    }

    #[test]
    fn test_no_tokens_yields_empty_registry() {
        let registry = regenerate_fields("no placeholders here").unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_malformed_token_fails_regeneration() {
        let err = regenerate_fields("a <> b").unwrap_err();
        assert!(matches!(err, CaptionError::MalformedToken { .. }));
    }

    #[test]
    fn test_removed_and_added_placeholders() {
        let before = regenerate_fields("a <animalType> eating a <foodType>").unwrap();
        let after = regenerate_fields("a <animalType> wearing a <hatStyle>").unwrap();

        assert!(before.iter().any(|f| f.key == "foodType"));
        assert!(!after.iter().any(|f| f.key == "foodType"));
        assert_eq!(after.fields().last().unwrap().key, "hatStyle");
        assert_eq!(
            keys_and_labels(&after),
            vec![
                ("animalType".to_string(), "Animal Type".to_string()),
                ("hatStyle".to_string(), "Hat Style".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_value_updates_all_fields_with_key() {
        let mut registry = regenerate_fields("<x> and <x> and <y>").unwrap();
        assert_eq!(registry.set_value("x", "one").unwrap(), 2);
        assert_eq!(registry.value_for("x", 0), Some("one"));
        assert_eq!(registry.value_for("x", 1), Some("one"));
        assert_eq!(registry.value_for("y", 0), Some(""));
    }

    #[test]
    fn test_set_value_unknown_key() {
        let mut registry = regenerate_fields(TEMPLATE).unwrap();
        let err = registry.set_value("hatStyle", "bowler").unwrap_err();
        assert!(matches!(err, CaptionError::MissingFieldValue { key } if key == "hatStyle"));
    }

    #[test]
    fn test_set_value_at_and_occurrence_lookup() {
        let mut registry = regenerate_fields("<x> and <x>").unwrap();
        registry.set_value_at(0, "first").unwrap();
        registry.set_value_at(1, "second").unwrap();
        assert_eq!(registry.value_for("x", 0), Some("first"));
        assert_eq!(registry.value_for("x", 1), Some("second"));
        // more occurrences than fields fall back to the first field
        assert_eq!(registry.value_for("x", 2), Some("first"));
        assert_eq!(registry.value_for("z", 0), None);
    }

    #[test]
    fn test_set_value_at_out_of_range() {
        let mut registry = regenerate_fields(TEMPLATE).unwrap();
        let err = registry.set_value_at(3, "nope").unwrap_err();
        assert_eq!(err.to_string(), "field index 3 is out of range (3 field(s))");
    }

    #[test]
    fn test_registry_serializes_as_list() {
        let mut registry = regenerate_fields("<animalType>").unwrap();
        registry.set_value("animalType", "cat").unwrap();
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"key": "animalType", "label": "Animal Type", "value": "cat"}])
        );
    }
}
