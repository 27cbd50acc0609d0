//! Row records fed into the table engine

use super::value::FieldValue;
use std::collections::BTreeMap;
use std::fmt;

/// One record of a dataset: field name to value.
///
/// A missing field and an explicit null are indistinguishable to the
/// engine; both read back as `FieldValue::Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: BTreeMap<String, FieldValue>,
}

static NULL: FieldValue = FieldValue::Null;

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, key: &str, value: FieldValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(key.to_string(), value);
    }

    /// Read a field, treating a missing field as null
    pub fn get(&self, key: &str) -> &FieldValue {
        self.fields.get(key).unwrap_or(&NULL)
    }

    /// Iterate over every field value, including nulls
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The `id` field as a string, if present and not null
    pub fn id(&self) -> Option<String> {
        self.get("id").search_text()
    }

    /// Build a row from a JSON object. Anything other than an object yields
    /// `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
            .collect();
        Some(Self { fields })
    }
}

/// Build rows from a JSON document.
///
/// A document that is not an array is treated as an empty dataset, and
/// array elements that are not objects are skipped.
pub fn rows_from_json(document: &serde_json::Value) -> Vec<Row> {
    let Some(items) = document.as_array() else {
        log::warn!("dataset document is not an array, treating it as empty");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let row = Row::from_json(item);
            if row.is_none() {
                log::warn!("skipping dataset element {} which is not an object", i);
            }
            row
        })
        .collect()
}

/// Rendering identity of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The row's own `id` field
    Id(String),
    /// Position within the current page slice
    Position(usize),
}

impl RowKey {
    pub fn for_row(row: &Row, page_position: usize) -> Self {
        row.id()
            .map(RowKey::Id)
            .unwrap_or(RowKey::Position(page_position))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{}", id),
            RowKey::Position(p) => write!(f, "#{}", p + 1),
        }
    }
}
