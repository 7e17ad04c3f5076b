use std::borrow::Cow;

use crate::data::field_value::FieldValue;

/// Capability contract a record type supplies to the query pipeline.
///
/// The pipeline hardcodes no field names: each record type declares its
/// own searchable text, raw-match fields, categorical filter values and
/// typed sort keys. Unknown field names return `None` and impose no
/// constraint.
pub trait Queryable {
    /// Fields matched case-insensitively against the search term.
    fn search_text(&self) -> Vec<Cow<'_, str>>;

    /// Fields matched against the raw (non-case-folded) search term.
    /// Phone numbers live here so digit sequences match as typed.
    fn search_exact(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Categorical value for an equality filter, or `None` when the
    /// record type has no such field.
    fn filter_field(&self, field: &str) -> Option<Cow<'_, str>>;

    /// Typed sort key for a named field, or `None` when unknown.
    fn sort_field(&self, field: &str) -> Option<FieldValue>;
}
