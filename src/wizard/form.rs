//! Working form state: the record under construction plus its current
//! validation messages.
//!
//! Mutation happens through patches so edits to one field never disturb
//! another. Editing a field also drops any stale validation message recorded
//! against it; fresh messages only appear on the next validation pass.

use tracing::debug;

use super::record::{BrandRecord, Field, RecordPatch, SocialAccount, SocialPlatform};
use super::validate::ValidationErrors;

/// The record being assembled across steps, with field-keyed validation
/// messages from the most recent validation pass.
#[derive(Debug, Default)]
pub struct FormStateStore {
    record: BrandRecord,
    errors: ValidationErrors,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &BrandRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Merge a partial update into the record.
    ///
    /// Fields absent from the patch keep their current value. Any validation
    /// message recorded against a touched field is dropped. Returns the
    /// touched fields.
    pub fn apply(&mut self, patch: RecordPatch) -> Vec<Field> {
        let touched = patch.touched();
        if touched.is_empty() {
            return touched;
        }
        for field in &touched {
            self.errors.remove(*field);
        }
        patch.apply_to(&mut self.record);
        debug!(fields = touched.len(), "applied record patch");
        touched
    }

    /// Replace the whole record, e.g. when restoring a saved draft.
    /// Validation messages are cleared; the restored data gets a fresh pass.
    pub fn replace(&mut self, record: BrandRecord) {
        self.record = record;
        self.errors.clear();
    }

    /// Back to the empty record with no messages.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record the outcome of a validation pass, replacing prior messages.
    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Append an account row for the next platform without one.
    ///
    /// Returns the chosen platform, or `None` once every platform has a row.
    pub fn add_social_account(&mut self) -> Option<SocialPlatform> {
        let platform = self.record.next_unused_platform()?;
        self.record.social_media_accounts.push(SocialAccount {
            platform,
            url: String::new(),
        });
        self.errors.remove(Field::SocialMediaAccounts);
        Some(platform)
    }
}
