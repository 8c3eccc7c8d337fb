//! Command implementations for captioner.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. The interactive session lives in `session`.

mod session;

use crate::catalog::ImageCatalog;
use crate::cli::{Cli, Command, FieldsArgs, GenerateArgs, ListArgs, SaveArgs};
use crate::config::Config;
use crate::error::{CaptionError, Result};
use crate::events::{Event, EventAction, EventLog};
use crate::persist::{CaptionStore, store_for};
use crate::session::Session;
use crate::template::FieldRegistry;
use serde_json::json;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Fields(args) => cmd_fields(args),
        Command::Generate(args) => cmd_generate(args),
        Command::List(args) => cmd_list(args, &config),
        Command::Save(args) => cmd_save(args, &config),
        Command::Session(args) => session::cmd_session(args, &config),
    }
}

fn cmd_fields(args: FieldsArgs) -> Result<()> {
    let mut session = Session::new();
    session.edit_template(args.template);
    let fields = session.create_fields()?;

    if args.json {
        let json = serde_json::to_string_pretty(fields).map_err(|e| {
            CaptionError::UserError(format!("failed to serialize fields to JSON: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    if fields.is_empty() {
        println!("No placeholders found. Add one like <animalType> to the template.");
        return Ok(());
    }
    print!("{}", format_fields(fields));
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let session = render(&args.template, &args.values.values)?;
    println!("{}", session.output);
    Ok(())
}

fn cmd_list(args: ListArgs, config: &Config) -> Result<()> {
    let catalog = ImageCatalog::scan(&args.folder, config)?;
    print!("{}", format_catalog(&catalog));
    Ok(())
}

fn cmd_save(args: SaveArgs, config: &Config) -> Result<()> {
    let mut catalog = ImageCatalog::scan(&args.folder, config)?;
    let index = catalog
        .entries()
        .iter()
        .position(|entry| entry.filename == args.image)
        .ok_or_else(|| {
            CaptionError::UserError(format!(
                "image '{}' not found in '{}'",
                args.image, catalog.path
            ))
        })?;
    catalog.select(index)?;

    let mut session = match (&args.caption, &args.template) {
        (Some(caption), _) => {
            let mut session = Session::new();
            session.edit_output(caption.clone());
            session
        }
        (None, Some(template)) => render(template, &args.values.values)?,
        (None, None) => {
            return Err(CaptionError::UserError(
                "either --caption or --template is required".to_string(),
            ));
        }
    };

    let store = store_for(config)?;
    let log = EventLog::for_folder(&args.folder, config);
    let image = save_selected(&mut session, &mut catalog, store.as_ref(), &log, config.separator())?;

    println!("Saved caption for {}!", image);
    Ok(())
}

/// Create fields for `template`, apply `values`, and generate the caption.
fn render(template: &str, values: &[(String, String)]) -> Result<Session> {
    let mut session = Session::new();
    session.edit_template(template);
    session.create_fields()?;
    for (key, value) in values {
        session.set_field(key, value)?;
    }
    session.generate_caption()?;
    Ok(session)
}

/// Save the session output for the selected image and log the outcome.
///
/// Returns the filename of the image whose caption was saved.
fn save_selected(
    session: &mut Session,
    catalog: &mut ImageCatalog,
    store: &dyn CaptionStore,
    log: &EventLog,
    separator: char,
) -> Result<String> {
    let request = session.begin_save(catalog, separator)?;
    let image = request.image_filename.clone();
    let filename = request.record.filename.clone();

    let outcome = store.persist(&request.record);
    match session.complete_save(request, outcome, catalog) {
        Ok(response) => {
            log.record(Event::new(EventAction::Save).with_image(&image).with_details(json!({
                "filename": filename,
                "store": store.describe(),
                "response": response,
            })));
            Ok(image)
        }
        Err(e) => {
            log.record(
                Event::new(EventAction::SaveFailed)
                    .with_image(&image)
                    .with_details(json!({
                        "filename": filename,
                        "store": store.describe(),
                        "error": e.to_string(),
                    })),
            );
            Err(e)
        }
    }
}

fn format_fields(fields: &FieldRegistry) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}  {:<24} {:<20} = {:?}\n",
            i, field.label, field.key, field.value
        ));
    }
    out
}

fn format_catalog(catalog: &ImageCatalog) -> String {
    if catalog.is_empty() {
        return format!("No images found in '{}'.\n", catalog.path);
    }

    let mut out = format!("Images in '{}' ({}):\n", catalog.path, catalog.files.total);
    for (i, entry) in catalog.entries().iter().enumerate() {
        let marker = if i == catalog.selected_image_index { '*' } else { ' ' };
        let caption = if entry.caption.is_empty() {
            "(no caption)"
        } else {
            entry.caption.as_str()
        };
        out.push_str(&format!("{} {:>3}  {}  {}\n", marker, i, entry.filename, caption));
    }
    out
}
