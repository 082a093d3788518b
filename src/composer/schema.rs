//! Data model for composed prompt sections.

use crate::fields::FieldKey;
use serde::Serialize;

/// One labeled block of the composed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub key: FieldKey,
    pub text: String, // "<label>:\n<text>"
}
