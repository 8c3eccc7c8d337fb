//! Placeholder template engine.
//!
//! A caption template is free text with `<placeholder>` tokens:
//!
//! ```text
//! a <imageType> of a <animalType> eating a <foodType>
//! ```
//!
//! - **Tokenizer**: finds the ordered placeholder occurrences with their spans
//! - **Identifier**: turns a token into a camelCase key and a Title Case label
//! - **Registry**: the ordered fields materialized for a template
//! - **Substitute**: renders the template with the registry's values
//!
//! # Syntax
//!
//! - `<name>` - a field named `name` (letters, digits, `_`)
//! - `<name:alt1|alt2>` - same field; the alternatives are parsed but not
//!   yet offered as choices
//!
//! Occurrences are never merged: `<x> and <x>` yields two tokens and two
//! fields.

mod identifier;
mod registry;
mod substitute;
mod tokenizer;

pub use identifier::{derive_key, derive_label};
pub use registry::{Field, FieldRegistry, regenerate_fields};
pub use substitute::generate_caption;
pub use tokenizer::{PlaceholderToken, extract_tokens, scan_tokens};
