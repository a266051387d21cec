// ABOUTME: Backend metadata capability and the orchestrator that issues queries
// ABOUTME: Responses parse off-loop, sort by title, and resolve onto the picker queue

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use pickwick_events::ServiceError;
use pickwick_logging::debug;
use pickwick_types::{Filter, PicklistOption, Record, sort_by_title};

use crate::message::{FetchOrigin, PickerMessage};

/// Request for the parent-driven filtered record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRequest {
    pub metadata_name: String,
    pub filter: Filter,
    /// Display fields the response must include: `[title, subtitle]`.
    pub fields: [String; 2],
}

/// Request for a free-text search against the configured fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub metadata_name: String,
    pub search_term: String,
    pub fields: [String; 2],
}

/// The backend metadata capability.
///
/// Responses use the JSON-array-of-attribute-maps wire shape, delivered as a
/// raw payload string; the orchestrator owns parsing and ordering.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Fetch records restricted by the filter pair, or the unrestricted
    /// default set when the filter carries no value.
    async fn fetch_by_filter(&self, request: FilteredRequest) -> Result<String, ServiceError>;

    /// Fetch records matching a free-text term.
    async fn search(&self, request: SearchRequest) -> Result<String, ServiceError>;

    /// Distinct values of a field, for the finder's filter combobox.
    async fn picklist_values(
        &self,
        metadata_name: &str,
        field_name: &str,
    ) -> Result<Vec<PicklistOption>, ServiceError>;
}

/// Issues backend queries and resolves them onto the picker's queue.
///
/// In-flight requests are never cancelled; responses apply in arrival order
/// (last response wins). Each request is stamped with a monotonic generation
/// so the picker can log when an older response overwrites a newer one.
pub struct SearchOrchestrator {
    service: Arc<dyn MetadataService>,
    queue: UnboundedSender<PickerMessage>,
    title_field: String,
    generation: u64,
}

impl SearchOrchestrator {
    pub fn new(
        service: Arc<dyn MetadataService>,
        queue: UnboundedSender<PickerMessage>,
        title_field: String,
    ) -> Self {
        Self {
            service,
            queue,
            title_field,
            generation: 0,
        }
    }

    /// Issue a filtered fetch. Must be called from within a tokio runtime.
    pub fn request_filtered(&mut self, request: FilteredRequest) -> u64 {
        let generation = self.next_generation();
        debug!(generation, filter_test = ?request.filter.filter_test, "issuing filtered fetch");
        self.spawn(generation, FetchOrigin::Filtered, {
            let service = Arc::clone(&self.service);
            async move { service.fetch_by_filter(request).await }
        });
        generation
    }

    /// Issue a free-text search. Must be called from within a tokio runtime.
    pub fn search(&mut self, request: SearchRequest) -> u64 {
        let generation = self.next_generation();
        debug!(generation, term = %request.search_term, "issuing search");
        self.spawn(generation, FetchOrigin::Search, {
            let service = Arc::clone(&self.service);
            async move { service.search(request).await }
        });
        generation
    }

    fn spawn<F>(&self, generation: u64, origin: FetchOrigin, fetch: F)
    where
        F: Future<Output = Result<String, ServiceError>> + Send + 'static,
    {
        let queue = self.queue.clone();
        let title_field = self.title_field.clone();
        tokio::spawn(async move {
            let result = fetch
                .await
                .and_then(|payload| parse_records(&payload, &title_field));
            // The picker may already be gone; a dropped resolution is fine.
            let _ = queue.send(PickerMessage::FetchResolved {
                origin,
                generation,
                result,
            });
        });
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Parse the wire payload into a title-sorted record list.
pub(crate) fn parse_records(payload: &str, title_field: &str) -> Result<Vec<Record>, ServiceError> {
    let values: Vec<Value> =
        serde_json::from_str(payload).map_err(|err| ServiceError::Payload(err.to_string()))?;

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Object(attributes) => records.push(Record::from(attributes)),
            other => {
                return Err(ServiceError::Payload(format!(
                    "expected an attribute map, got {other}"
                )));
            }
        }
    }

    sort_by_title(&mut records, title_field);
    Ok(records)
}
