//! Captioner: placeholder-driven caption templates for image folders.
//!
//! A template such as `a <imageType> of a <animalType>` yields one field per
//! placeholder; filling the fields renders the caption, which is then saved
//! next to the selected image.
//!
//! - [`template`]: tokenizer, key/label derivation, field registry, rendering
//! - [`session`]: the session controller binding template, fields and output
//! - [`catalog`]: the image folder and current selection
//! - [`persist`]: caption stores (HTTP endpoint or caption files)

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod persist;
pub mod session;
pub mod template;
