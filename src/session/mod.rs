//! Session controller.
//!
//! A [`Session`] binds the template, its field registry and the caption
//! output. Every user action is one method that runs to completion; a
//! failing action leaves the session as it was.
//!
//! | Action          | Effect                                                  |
//! |-----------------|---------------------------------------------------------|
//! | Edit Template   | output := template                                      |
//! | Edit output     | output := text typed by the user                        |
//! | Create Fields   | fields := regenerate(template); output := template      |
//! | Generate        | output := render(template, fields)                      |
//! | Select image    | output := stored caption of that image                  |
//! | Save            | store(output) for the selected image; update catalog    |
//! | Reset           | everything cleared                                      |
//!
//! Save is split into [`Session::begin_save`] and [`Session::complete_save`]
//! so the store call sits between two pure state transitions. Only one save
//! may be in flight at a time. An output built from the template only saves
//! once every field has a value; a stored or hand-edited caption always
//! saves.


use crate::catalog::ImageCatalog;
use crate::error::{CaptionError, Result};
use crate::persist::{CaptionRecord, CaptionStore, caption_path};
use crate::template::{FieldRegistry, generate_caption, regenerate_fields};
use serde::{Deserialize, Serialize};

/// Where the current output text came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSource {
    #[default]
    Blank,
    /// Copied from the template by Edit Template or Create Fields.
    Template,
    /// Rendered by Generate.
    Generated,
    /// Loaded from the selected image.
    StoredCaption,
    /// Typed over by the user.
    Edited,
}

impl OutputSource {
    fn requires_fields(self) -> bool {
        matches!(self, OutputSource::Template | OutputSource::Generated)
    }
}

/// Editing state for one captioning session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub template: String,
    pub fields: FieldRegistry,
    pub output: String,
    #[serde(default)]
    pub source: OutputSource,
    #[serde(skip)]
    save_in_flight: bool,
}

/// A save that has started but not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// Catalog index of the image being captioned.
    pub image_index: usize,
    /// Filename of the image being captioned.
    pub image_filename: String,
    /// What the store receives.
    pub record: CaptionRecord,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the template. The output shows the raw template; fields are
    /// untouched until the next Create Fields.
    pub fn edit_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
        self.output = self.template.clone();
        self.source = OutputSource::Template;
    }

    /// Rebuild the fields from the template, discarding all entered values.
    pub fn create_fields(&mut self) -> Result<&FieldRegistry> {
        self.fields = regenerate_fields(&self.template)?;
        self.output = self.template.clone();
        self.source = OutputSource::Template;
        Ok(&self.fields)
    }

    /// Set every field named `key`. Returns how many fields changed.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<usize> {
        self.fields.set_value(key, value)
    }

    /// Set the field at `index`.
    pub fn set_field_at(&mut self, index: usize, value: &str) -> Result<()> {
        self.fields.set_value_at(index, value)
    }

    /// Overwrite the output with hand-edited text.
    pub fn edit_output(&mut self, output: impl Into<String>) {
        self.output = output.into();
        self.source = OutputSource::Edited;
    }

    /// Render the template with the current field values into the output.
    pub fn generate_caption(&mut self) -> Result<&str> {
        self.output = generate_caption(&self.template, &self.fields)?;
        self.source = OutputSource::Generated;
        Ok(&self.output)
    }

    /// Select another image; the output becomes that image's stored caption.
    pub fn select_image(&mut self, catalog: &mut ImageCatalog, index: usize) -> Result<()> {
        let entry = catalog.select(index)?;
        self.output = entry.caption.clone();
        self.source = OutputSource::StoredCaption;
        Ok(())
    }

    /// Load the caption of whatever the catalog currently has selected.
    pub fn load_selected(&mut self, catalog: &ImageCatalog) {
        self.output = catalog
            .selected()
            .map(|entry| entry.caption.clone())
            .unwrap_or_default();
        self.source = OutputSource::StoredCaption;
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    /// Start saving the output for the selected image.
    ///
    /// # Returns
    ///
    /// * `Ok(SaveRequest)` - The record to hand to a store
    /// * `Err(CaptionError::SaveInFlight)` - A previous save has not completed
    /// * `Err(CaptionError::UserError)` - No image is selected, or the output
    ///   comes from the template while some fields are still empty
    pub fn begin_save(&mut self, catalog: &ImageCatalog, separator: char) -> Result<SaveRequest> {
        if self.save_in_flight {
            return Err(CaptionError::SaveInFlight);
        }

        let entry = catalog.selected().ok_or_else(|| {
            CaptionError::UserError(format!("no image selected in '{}'", catalog.path))
        })?;

        if self.source.requires_fields() {
            let mut empty: Vec<&str> = Vec::new();
            for field in self.fields.iter().filter(|field| field.value.is_empty()) {
                if !empty.contains(&field.label.as_str()) {
                    empty.push(&field.label);
                }
            }
            if !empty.is_empty() {
                return Err(CaptionError::UserError(format!(
                    "fill in every field before saving; empty: {}",
                    empty.join(", ")
                )));
            }
        }

        let request = SaveRequest {
            image_index: catalog.selected_image_index,
            image_filename: entry.filename.clone(),
            record: CaptionRecord {
                filename: caption_path(&catalog.path, &entry.filename, separator),
                caption: self.output.clone(),
            },
        };

        self.save_in_flight = true;
        Ok(request)
    }

    /// Finish a save with the store's outcome.
    ///
    /// On success the catalog entry receives the saved caption. On failure
    /// neither the catalog nor the output changes and the error is returned.
    pub fn complete_save(
        &mut self,
        request: SaveRequest,
        outcome: Result<String>,
        catalog: &mut ImageCatalog,
    ) -> Result<String> {
        self.save_in_flight = false;
        let response = outcome?;

        let updated = catalog.with_caption(request.image_index, &request.record.caption);
        catalog.set_files(updated);
        Ok(response)
    }

    /// Save the output for the selected image through `store`.
    pub fn save(
        &mut self,
        catalog: &mut ImageCatalog,
        store: &dyn CaptionStore,
        separator: char,
    ) -> Result<String> {
        let request = self.begin_save(catalog, separator)?;
        let outcome = store.persist(&request.record);
        self.complete_save(request, outcome, catalog)
    }

    /// Clear template, fields and output. A save in flight stays in flight.
    pub fn reset(&mut self) {
        let saving = self.save_in_flight;
        *self = Self::default();
        self.save_in_flight = saving;
    }
}
