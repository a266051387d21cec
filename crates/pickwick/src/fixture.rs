// ABOUTME: In-memory metadata backend over fixed record tables
// ABOUTME: Serves the demo binary and tests with the real JSON wire shape

use std::collections::HashMap;

use async_trait::async_trait;

use pickwick_core::{FilteredRequest, MetadataService, SearchRequest};
use pickwick_events::ServiceError;
use pickwick_types::{PicklistOption, Record};

/// A `MetadataService` over in-memory tables keyed by metadata name.
///
/// Responses are unsorted JSON arrays of attribute maps, as the real
/// capability delivers them; ordering is the picker's job.
#[derive(Debug, Default)]
pub struct StaticMetadataService {
    tables: HashMap<String, Vec<Record>>,
}

impl StaticMetadataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, metadata_name: &str, records: Vec<Record>) -> Self {
        self.tables.insert(metadata_name.to_string(), records);
        self
    }

    fn table(&self, metadata_name: &str) -> &[Record] {
        self.tables
            .get(metadata_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn payload(records: Vec<&Record>) -> Result<String, ServiceError> {
        serde_json::to_string(&records).map_err(|err| ServiceError::Payload(err.to_string()))
    }
}

#[async_trait]
impl MetadataService for StaticMetadataService {
    async fn fetch_by_filter(&self, request: FilteredRequest) -> Result<String, ServiceError> {
        let records = self
            .table(&request.metadata_name)
            .iter()
            .filter(|record| match &request.filter.filter_test {
                Some(value) => record.get_str(&request.filter.filter_by) == Some(value.as_str()),
                None => true,
            })
            .collect();
        Self::payload(records)
    }

    async fn search(&self, request: SearchRequest) -> Result<String, ServiceError> {
        let term = request.search_term.to_lowercase();
        let records = self
            .table(&request.metadata_name)
            .iter()
            .filter(|record| {
                request.fields.iter().any(|field| {
                    record
                        .get_str(field)
                        .is_some_and(|value| value.to_lowercase().contains(&term))
                })
            })
            .collect();
        Self::payload(records)
    }

    async fn picklist_values(
        &self,
        metadata_name: &str,
        field_name: &str,
    ) -> Result<Vec<PicklistOption>, ServiceError> {
        let mut values: Vec<String> = self
            .table(metadata_name)
            .iter()
            .filter_map(|record| record.get_str(field_name).map(str::to_string))
            .collect();
        values.sort();
        values.dedup();
        Ok(values
            .into_iter()
            .map(|value| PicklistOption::new(value.clone(), value))
            .collect())
    }
}

/// Build a record from `(field, value)` pairs. Fixture convenience.
pub fn record(attributes: &[(&str, &str)]) -> Record {
    let mut record = Record::new();
    for (field, value) in attributes {
        record.insert(*field, *value);
    }
    record
}
