//! Strips BSON nulls out of client-supplied documents.
//!
//! Input DTOs serialize every absent optional field as `Bson::Null`.
//! Passing those nulls through would make finds match nothing and updates
//! erase fields, so every document is run through [`strip_nulls`] before it
//! reaches a collection.

use mongodb::bson::{Bson, Document};

/// Remove all top-level null entries from `document`. Nested documents are
/// left untouched.
pub fn strip_nulls(document: &mut Document) {
    let null_keys: Vec<String> = document
        .iter()
        .filter(|(_, value)| matches!(value, Bson::Null))
        .map(|(key, _)| key.clone())
        .collect();
    for key in null_keys {
        document.remove(&key);
    }
}
