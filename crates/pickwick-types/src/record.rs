// ABOUTME: Record attribute maps and the per-instance field schema descriptor
// ABOUTME: Records are duck-typed JSON objects; the schema names the id/title/subtitle fields

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier field assumed unless the caller configures another one.
pub const DEFAULT_ID_FIELD: &str = "Id";

/// One backend metadata item: an attribute map with caller-chosen field names.
///
/// Records are immutable once fetched; a fetch replaces the whole list. Field
/// access never panics - a missing or non-string attribute reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// An empty attribute map, used as the clear-selection signal payload.
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String view of an attribute; non-string values read as `None`.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

/// Field names resolved once per picker instance.
///
/// The backend returns arbitrary attribute maps; the schema pins which
/// attribute is the unique identifier and which two are displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub id_field: String,
    pub title_field: String,
    pub subtitle_field: String,
}

impl RecordSchema {
    pub fn new(title_field: impl Into<String>, subtitle_field: impl Into<String>) -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            title_field: title_field.into(),
            subtitle_field: subtitle_field.into(),
        }
    }

    pub fn id_of<'a>(&self, record: &'a Record) -> Option<&'a str> {
        record.get_str(&self.id_field)
    }

    pub fn title_of<'a>(&self, record: &'a Record) -> Option<&'a str> {
        record.get_str(&self.title_field)
    }

    pub fn subtitle_of<'a>(&self, record: &'a Record) -> Option<&'a str> {
        record.get_str(&self.subtitle_field)
    }

    /// The display fields requested from the backend on every fetch.
    pub fn display_fields(&self) -> [String; 2] {
        [self.title_field.clone(), self.subtitle_field.clone()]
    }
}

/// Sort records by their title field, case-insensitive, ascending.
///
/// The sort is stable: records whose titles compare equal keep their
/// original fetch order.
pub fn sort_by_title(records: &mut [Record], title_field: &str) {
    records.sort_by(|a, b| {
        let a = a.get_str(title_field).unwrap_or_default().to_lowercase();
        let b = b.get_str(title_field).unwrap_or_default().to_lowercase();
        a.cmp(&b)
    });
}
