//! Typed field access for the sort stage.
//!
//! Sorting is requested by field name, but records are plain structs. Each
//! repository declares its sortable fields once as a map from name to an
//! accessor function, so no dynamic lookup happens on the records themselves.

use std::fmt;

use chrono::{DateTime, Utc};

/// Value of a single record field, ordered by its natural ordering.
///
/// Values of the same kind compare naturally (numeric, byte-wise
/// lexicographic, chronological). `Missing` sorts before any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue<'a> {
    /// Optional field with no value on this record
    Missing,
    Integer(i64),
    Text(&'a str),
    Timestamp(DateTime<Utc>),
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Text)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue<'_> {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Timestamp)
    }
}

/// Extracts one field from a record.
pub type FieldAccessor<M> = for<'a> fn(&'a M) -> FieldValue<'a>;

/// The set of field names a repository allows `find` to sort by.
pub struct SortableFields<M> {
    fields: Vec<(&'static str, FieldAccessor<M>)>,
}

impl<M> SortableFields<M> {
    /// Empty set: every `sort` request is ignored
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a sortable field. Re-declaring a name replaces its accessor.
    pub fn field(mut self, name: &'static str, accessor: FieldAccessor<M>) -> Self {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = accessor,
            None => self.fields.push((name, accessor)),
        }
        self
    }

    /// Accessor for `name`, if it is sortable
    pub fn get(&self, name: &str) -> Option<FieldAccessor<M>> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, accessor)| *accessor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

impl<M> Default for SortableFields<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for SortableFields<M> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<M> fmt::Debug for SortableFields<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
