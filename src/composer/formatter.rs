//! Turns included fields into labeled blocks and joins them.

use crate::composer::schema::Section;
use crate::fields::{Field, FieldStore};

pub const SECTION_SEPARATOR: &str = "\n\n";

pub fn format_block(field: &Field) -> String {
    format!("{}:\n{}", field.label, field.text)
}

pub fn format_sections(store: &FieldStore) -> Vec<Section> {
    store
        .iter()
        .filter(|field| field.is_included())
        .map(|field| Section {
            key: field.key,
            text: format_block(field),
        })
        .collect()
}

pub fn join_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}
