//! Implementation of the `captioner session` command.
//!
//! One user action per input line. Actions run to completion before the
//! next line is read, so handlers never interleave; a save blocks the loop
//! until the store answers. A failed action prints an error and the
//! session carries on with its state unchanged.

use super::{format_catalog, format_fields, save_selected};
use crate::catalog::ImageCatalog;
use crate::cli::SessionArgs;
use crate::config::Config;
use crate::error::{CaptionError, Result};
use crate::events::{Event, EventAction, EventLog};
use crate::persist::{CaptionStore, store_for};
use crate::session::Session;
use serde_json::json;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Actions:
  template <text>        replace the template (output shows it raw)
  fields                 create one field per <placeholder>; clears values
  set <key> <value>      set every field named <key>
  set-at <index> <value> set one field by position
  generate               render the template into the output
  output <text>          overwrite the output by hand
  select <index>         select an image; output becomes its caption
  save                   save the output for the selected image
  reset                  clear template, fields and output
  show [--json]          print the session
  list                   list images and captions
  help                   show this help
  quit                   leave the session
";

/// Execute the `captioner session` command on stdin/stdout.
pub fn cmd_session(args: SessionArgs, config: &Config) -> Result<()> {
    let catalog = ImageCatalog::scan(&args.folder, config)?;
    let store = store_for(config)?;
    let log = EventLog::for_folder(&args.folder, config);

    let mut controller = SessionLoop::new(catalog, store.as_ref(), &log, config.separator());
    let stdin = io::stdin();
    controller.run(stdin.lock(), &mut io::stdout(), &mut io::stderr())
}

enum Flow {
    Continue,
    Quit,
}

/// The session plus its collaborators, driven line by line.
struct SessionLoop<'a> {
    session: Session,
    catalog: ImageCatalog,
    store: &'a dyn CaptionStore,
    log: &'a EventLog,
    separator: char,
}

impl<'a> SessionLoop<'a> {
    fn new(
        catalog: ImageCatalog,
        store: &'a dyn CaptionStore,
        log: &'a EventLog,
        separator: char,
    ) -> Self {
        let mut session = Session::new();
        session.load_selected(&catalog);
        Self {
            session,
            catalog,
            store,
            log,
            separator,
        }
    }

    fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<()> {
        writeln!(
            out,
            "Captioning {} image(s) in '{}'. Type `help` for actions.",
            self.catalog.files.total, self.catalog.path
        )
        .map_err(write_error)?;

        for line in input.lines() {
            let line = line
                .map_err(|e| CaptionError::UserError(format!("failed to read input: {}", e)))?;

            match self.handle_line(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(err, "Error: {}", e).map_err(write_error)?,
            }
        }
        Ok(())
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim_start();
        let (action, rest) = line
            .split_once(char::is_whitespace)
            .map(|(action, rest)| (action, rest.trim_start()))
            .unwrap_or((line.trim_end(), ""));

        match action {
            "" => {}
            "template" => {
                self.session.edit_template(rest);
                writeln!(out, "{}", self.session.output).map_err(write_error)?;
            }
            "fields" => self.create_fields(out)?,
            "set" => {
                let (key, value) = key_and_value(rest, "set <key> <value>")?;
                let updated = self.session.set_field(&key, &value)?;
                writeln!(out, "Set {} field(s) named '{}'.", updated, key).map_err(write_error)?;
            }
            "set-at" => {
                let (index, value) = key_and_value(rest, "set-at <index> <value>")?;
                self.session.set_field_at(parse_index(&index)?, &value)?;
            }
            "generate" => self.generate(out)?,
            "output" => self.session.edit_output(rest),
            "select" => self.select(parse_index(rest.trim())?, out)?,
            "save" => {
                let image = save_selected(
                    &mut self.session,
                    &mut self.catalog,
                    self.store,
                    self.log,
                    self.separator,
                )?;
                writeln!(out, "Saved caption for {}!", image).map_err(write_error)?;
            }
            "reset" => {
                self.session.reset();
                self.log.record(Event::new(EventAction::Reset));
                writeln!(out, "Session cleared.").map_err(write_error)?;
            }
            "show" => self.show(rest.trim() == "--json", out)?,
            "list" => write!(out, "{}", format_catalog(&self.catalog)).map_err(write_error)?,
            "help" => write!(out, "{}", HELP).map_err(write_error)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                return Err(CaptionError::UserError(format!(
                    "unknown action '{}'; type `help` for the list",
                    other
                )));
            }
        }

        Ok(Flow::Continue)
    }

    fn create_fields<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.session.create_fields()?;
        self.log.record(
            Event::new(EventAction::CreateFields).with_details(json!({
                "template": self.session.template,
                "fields": self.session.fields.len(),
            })),
        );

        let fields = &self.session.fields;
        if fields.is_empty() {
            writeln!(out, "No placeholders found; no fields to fill.").map_err(write_error)?;
        } else {
            write!(out, "{}", format_fields(fields)).map_err(write_error)?;
        }
        Ok(())
    }

    fn generate<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let caption = self.session.generate_caption()?.to_string();
        self.log.record(
            Event::new(EventAction::GenerateCaption).with_details(json!({ "caption": caption })),
        );
        writeln!(out, "{}", caption).map_err(write_error)
    }

    fn select<W: Write>(&mut self, index: usize, out: &mut W) -> Result<()> {
        self.session.select_image(&mut self.catalog, index)?;
        let filename = self
            .catalog
            .selected()
            .map(|entry| entry.filename.clone())
            .unwrap_or_default();
        self.log
            .record(Event::new(EventAction::SelectImage).with_image(&filename));

        writeln!(out, "Selected {}.", filename).map_err(write_error)?;
        writeln!(out, "{}", self.session.output).map_err(write_error)
    }

    fn show<W: Write>(&self, as_json: bool, out: &mut W) -> Result<()> {
        if as_json {
            let json = serde_json::to_string_pretty(&self.session).map_err(|e| {
                CaptionError::UserError(format!("failed to serialize session to JSON: {}", e))
            })?;
            return writeln!(out, "{}", json).map_err(write_error);
        }

        let image = self
            .catalog
            .selected()
            .map(|entry| entry.filename.as_str())
            .unwrap_or("(none)");
        writeln!(out, "Image:    {}", image).map_err(write_error)?;
        writeln!(out, "Template: {}", self.session.template).map_err(write_error)?;
        writeln!(out, "Fields:").map_err(write_error)?;
        write!(out, "{}", format_fields(&self.session.fields)).map_err(write_error)?;
        writeln!(out, "Output:   {}", self.session.output).map_err(write_error)
    }
}

/// Split `<first> <value...>` with shell-style quoting.
/// Split `<key> <value>`. The value is taken verbatim, spacing included,
/// unless it starts with a quote, in which case it must be one quoted word.
fn key_and_value(rest: &str, usage: &str) -> Result<(String, String)> {
    let usage_error = || CaptionError::UserError(format!("usage: {}", usage));
    let (key, value) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(usage_error)?;
    let value = value.trim_start();
    if value.is_empty() {
        return Err(usage_error());
    }

    if !value.starts_with(['"', '\'']) {
        return Ok((key.to_string(), value.to_string()));
    }

    let words = shell_words::split(value)
        .map_err(|e| CaptionError::UserError(format!("could not parse '{}': {}", value, e)))?;
    match words.as_slice() {
        [single] => Ok((key.to_string(), single.clone())),
        _ => Err(CaptionError::UserError(format!(
            "quote the whole value or none of it: '{}'",
            value
        ))),
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| CaptionError::UserError(format!("expected an index, got '{}'", raw)))
}

fn write_error(e: io::Error) -> CaptionError {
    CaptionError::UserError(format!("failed to write output: {}", e))
}
