//! CLI argument parsing for captioner.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Captioner: fill caption templates and save them next to your images.
///
/// A template is text with `<placeholder>` tokens, for example
/// "a <imageType> of a <animalType> eating a <foodType>". Each placeholder
/// becomes a field; filling the fields renders the caption.
#[derive(Parser, Debug)]
#[command(name = "captioner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ./captioner.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for captioner.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the fields a template defines.
    Fields(FieldsArgs),

    /// Render a template with field values.
    Generate(GenerateArgs),

    /// List the images in a folder with their stored captions.
    List(ListArgs),

    /// Save a caption for one image.
    ///
    /// The caption goes to the configured store: the captions endpoint
    /// (default) or the caption file next to the image.
    Save(SaveArgs),

    /// Interactive captioning session over an image folder.
    ///
    /// Reads one action per line from stdin. Type `help` for the list.
    Session(SessionArgs),
}

/// Arguments for the `fields` command.
#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Caption template.
    pub template: String,

    /// Print the fields as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Field values shared by `generate` and `save`.
#[derive(Parser, Debug)]
pub struct ValueArgs {
    /// Field value as key=value (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Caption template.
    pub template: String,

    #[command(flatten)]
    pub values: ValueArgs,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Image folder.
    pub folder: PathBuf,
}

/// Arguments for the `save` command.
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Image folder.
    pub folder: PathBuf,

    /// Image filename within the folder.
    pub image: String,

    /// Caption text to save as-is.
    #[arg(long, conflicts_with = "template", required_unless_present = "template")]
    pub caption: Option<String>,

    /// Template to render with --set values.
    #[arg(long)]
    pub template: Option<String>,

    #[command(flatten)]
    pub values: ValueArgs,
}

/// Arguments for the `session` command.
#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Image folder.
    pub folder: PathBuf,
}

/// Parse a `key=value` assignment. The value may contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
