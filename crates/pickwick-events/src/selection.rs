// ABOUTME: The picker's selection-changed signal with its fixed payload schema
// ABOUTME: Full attribute map on commit, empty map on clear

use serde::{Deserialize, Serialize};

use pickwick_types::Record;

/// Emitted exactly once per successful select or clear action.
///
/// A commit carries a copy of the full record attribute map; a clear carries
/// an empty map. Consumers distinguish the two with [`SelectionChanged::is_clear`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub record: Record,
}

impl SelectionChanged {
    pub fn committed(record: Record) -> Self {
        Self { record }
    }

    pub fn cleared() -> Self {
        Self {
            record: Record::new(),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.record.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_payload_is_empty_map() {
        assert!(SelectionChanged::cleared().is_clear());
    }

    #[test]
    fn commit_payload_carries_attributes() {
        let mut record = Record::new();
        record.insert("Id", "1");
        record.insert("Name", "X");

        let signal = SelectionChanged::committed(record);
        assert!(!signal.is_clear());
        assert_eq!(signal.record.get_str("Name"), Some("X"));
    }
}
