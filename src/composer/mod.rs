//! Derives the prompt text from the live field store.
//!
//! Nothing is cached: every call walks the ten fields in canonical order,
//! so the output always reflects the latest edit.

pub mod formatter;
pub mod schema;

pub use formatter::{format_block, SECTION_SEPARATOR};
pub use schema::Section;

use crate::fields::FieldStore;

/// Joined prompt text; empty when no field qualifies.
pub fn compose(store: &FieldStore) -> String {
    formatter::join_sections(&formatter::format_sections(store))
}

/// Per-section blocks, identical to the pieces [`compose`] joins.
pub fn compose_sections(store: &FieldStore) -> Vec<Section> {
    formatter::format_sections(store)
}

/// Character count (Unicode scalar values) of the composed prompt.
pub fn char_count(store: &FieldStore) -> usize {
    compose(store).chars().count()
}

pub fn word_count(store: &FieldStore) -> usize {
    compose(store).split_whitespace().count()
}
