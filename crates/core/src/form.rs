//! State of the add-entry form.
//!
//! The form owns one flat [`EntryFormValues`] record and the selected [`EntryKind`]. Switching
//! kind only changes which inputs are visible; values typed for another kind stay in the record
//! (so switching back restores them) but never reach the built draft.

use crate::builder::{build_entry, EntryFormValues, FormField, SHARED_FIELDS};
use crate::entry::{EntryDraft, EntryKind};
use crate::{EntryError, EntryResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryForm {
    kind: EntryKind,
    values: EntryFormValues,
    error: Option<EntryError>,
}

impl EntryForm {
    /// An empty form with the default kind selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: EntryKind) {
        self.kind = kind;
    }

    /// Select a kind from an untyped tag, such as a `<select>` value.
    ///
    /// An unknown tag leaves the current kind selected and is returned as an error.
    pub fn select_kind(&mut self, tag: &str) -> EntryResult<()> {
        self.kind = tag.parse()?;
        Ok(())
    }

    pub fn values(&self) -> &EntryFormValues {
        &self.values
    }

    /// Inputs to show for the selected kind: shared fields first, then kind fields.
    pub fn visible_fields(&self) -> Vec<FormField> {
        SHARED_FIELDS
            .iter()
            .chain(self.kind.fields())
            .copied()
            .collect()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.values.set(field, value);
    }

    /// Append a diagnosis code unless it is blank or already listed.
    pub fn add_diagnosis_code(&mut self, code: &str) {
        let code = code.trim();
        if code.is_empty() || self.values.diagnosis_codes.iter().any(|c| c.trim() == code) {
            return;
        }
        self.values.diagnosis_codes.push(code.to_string());
    }

    pub fn remove_diagnosis_code(&mut self, code: &str) {
        let code = code.trim();
        self.values.diagnosis_codes.retain(|c| c.trim() != code);
    }

    /// Error from the last build attempt, shown inline on the form.
    pub fn error(&self) -> Option<&EntryError> {
        self.error.as_ref()
    }

    /// Build a draft for the selected kind.
    ///
    /// A failure is also stored on the form so it can be shown inline; a success clears it.
    /// The values are kept either way.
    pub fn build(&mut self) -> EntryResult<EntryDraft> {
        match build_entry(self.kind, &self.values) {
            Ok(draft) => {
                self.error = None;
                Ok(draft)
            }
            Err(e) => {
                tracing::debug!(error = %e, "entry form rejected");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Discard the draft and return to an empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
