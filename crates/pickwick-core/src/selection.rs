// ABOUTME: The committed selection and its derived display values
// ABOUTME: At most one record is selected; committing replaces any previous selection

use pickwick_types::{Record, RecordSchema};

/// Tracks the single committed record, if any.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: String,
    record: Option<Record>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the committed record, or empty.
    pub fn selected_id(&self) -> &str {
        &self.selected
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Read-only display mode holds while a record is committed.
    pub fn is_read_only(&self) -> bool {
        self.record.is_some()
    }

    /// Commit the record with the given id out of the current list.
    ///
    /// Returns a copy of the committed record for the signal payload, or
    /// `None` when the id is not in the list (the selection is unchanged).
    pub fn commit(&mut self, id: &str, records: &[Record], schema: &RecordSchema) -> Option<Record> {
        let record = records
            .iter()
            .find(|record| schema.id_of(record) == Some(id))?
            .clone();
        self.selected = id.to_string();
        self.record = Some(record.clone());
        Some(record)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.record = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        ["a", "b"]
            .iter()
            .map(|id| {
                let mut record = Record::new();
                record.insert("Id", *id);
                record.insert("Name", format!("record {id}"));
                record
            })
            .collect()
    }

    fn schema() -> RecordSchema {
        RecordSchema::new("Name", "Id")
    }

    #[test]
    fn commit_returns_a_copy_of_the_record() {
        let mut selection = SelectionState::new();
        let committed = selection.commit("a", &records(), &schema()).unwrap();

        assert_eq!(committed.get_str("Name"), Some("record a"));
        assert_eq!(selection.selected_id(), "a");
        assert!(selection.is_read_only());
    }

    #[test]
    fn committing_replaces_the_previous_selection() {
        let mut selection = SelectionState::new();
        selection.commit("a", &records(), &schema()).unwrap();
        selection.commit("b", &records(), &schema()).unwrap();

        assert_eq!(selection.selected_id(), "b");
        assert_eq!(selection.record().unwrap().get_str("Id"), Some("b"));
    }

    #[test]
    fn unknown_id_leaves_the_selection_untouched() {
        let mut selection = SelectionState::new();
        selection.commit("a", &records(), &schema()).unwrap();

        assert!(selection.commit("zzz", &records(), &schema()).is_none());
        assert_eq!(selection.selected_id(), "a");
    }

    #[test]
    fn clear_resets_everything() {
        let mut selection = SelectionState::new();
        selection.commit("a", &records(), &schema()).unwrap();
        selection.clear();

        assert_eq!(selection.selected_id(), "");
        assert!(selection.record().is_none());
        assert!(!selection.is_read_only());
    }
}
