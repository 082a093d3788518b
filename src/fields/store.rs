//! Live field state: text, label and the two exclusion flags per section.

use crate::fields::key::FieldKey;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: FieldKey,
    pub label: String,
    pub text: String,
    pub hidden: bool,
    pub deleted: bool,
}

impl Field {
    fn new(key: FieldKey) -> Self {
        Self {
            key,
            label: key.default_label().to_string(),
            text: String::new(),
            hidden: false,
            deleted: false,
        }
    }

    /// Whether the field contributes a block to the composed output.
    pub fn is_included(&self) -> bool {
        !self.text.is_empty() && !self.hidden && !self.deleted
    }
}

/// Emitted by [`FieldStore::delete`] to drive the undo notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionNotification {
    pub key: FieldKey,
    pub label: String,
}

/// All ten fields, indexed by canonical position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStore {
    fields: [Field; 10],
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStore {
    pub fn new() -> Self {
        Self {
            fields: FieldKey::ALL.map(Field::new),
        }
    }

    pub fn get(&self, key: FieldKey) -> &Field {
        &self.fields[key.index()]
    }

    fn get_mut(&mut self, key: FieldKey) -> &mut Field {
        &mut self.fields[key.index()]
    }

    pub fn text(&self, key: FieldKey) -> &str {
        &self.get(key).text
    }

    pub fn label(&self, key: FieldKey) -> &str {
        &self.get(key).label
    }

    /// Fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn set_text(&mut self, key: FieldKey, text: impl Into<String>) {
        self.get_mut(key).text = text.into();
    }

    /// Empty labels are accepted as-is.
    pub fn set_label(&mut self, key: FieldKey, label: impl Into<String>) {
        self.get_mut(key).label = label.into();
    }

    pub fn delete(&mut self, key: FieldKey) -> DeletionNotification {
        let field = self.get_mut(key);
        field.deleted = true;
        DeletionNotification {
            key,
            label: field.label.clone(),
        }
    }

    /// Brings a deleted field back as active, clearing `hidden` as well.
    /// Returns false when the field was not deleted.
    pub fn restore(&mut self, key: FieldKey) -> bool {
        let field = self.get_mut(key);
        if !field.deleted {
            return false;
        }
        field.deleted = false;
        field.hidden = false;
        true
    }

    pub fn hide(&mut self, key: FieldKey) {
        self.get_mut(key).hidden = true;
    }

    pub fn show(&mut self, key: FieldKey) {
        self.get_mut(key).hidden = false;
    }

    /// Clears every `hidden` and `deleted` flag.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.hidden = false;
            field.deleted = false;
        }
    }

    /// Empties every text, leaving labels and flags alone.
    pub fn clear_texts(&mut self) {
        for field in &mut self.fields {
            field.text.clear();
        }
    }

    pub fn deleted_keys(&self) -> Vec<FieldKey> {
        self.fields
            .iter()
            .filter(|f| f.deleted)
            .map(|f| f.key)
            .collect()
    }

    pub fn texts(&self) -> BTreeMap<FieldKey, String> {
        self.fields
            .iter()
            .map(|f| (f.key, f.text.clone()))
            .collect()
    }

    pub fn labels(&self) -> BTreeMap<FieldKey, String> {
        self.fields
            .iter()
            .map(|f| (f.key, f.label.clone()))
            .collect()
    }

    /// Overwrites all texts and labels wholesale, then [`reset`](Self::reset)s
    /// the flags. Keys absent from the maps fall back to empty text and the
    /// default label.
    pub fn apply_snapshot(
        &mut self,
        texts: &BTreeMap<FieldKey, String>,
        labels: &BTreeMap<FieldKey, String>,
    ) {
        for field in &mut self.fields {
            field.text = texts.get(&field.key).cloned().unwrap_or_default();
            field.label = labels
                .get(&field.key)
                .cloned()
                .unwrap_or_else(|| field.key.default_label().to_string());
        }
        self.reset();
    }
}
