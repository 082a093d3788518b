//! Field store: the ten prompt sections being edited.

pub mod key;
pub mod store;

pub use key::{FieldKey, UnknownFieldKey};
pub use store::{DeletionNotification, Field, FieldStore};
