// ABOUTME: Composition root wiring keystrokes and focus to the picker state machine
// ABOUTME: Background resumptions arrive on a single owned queue; collaborators are traits

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use pickwick_events::{Listbox, Notifier, PickerError, SelectionChanged, Toast};
use pickwick_logging::{debug, error, info, warn};
use pickwick_types::{Filter, PickerConfig, Record, RecordSchema};

use crate::debounce::Debouncer;
use crate::input::{self, InputDisposition};
use crate::message::{FetchOrigin, PickerMessage};
use crate::navigation::NavigationState;
use crate::search::{FilteredRequest, MetadataService, SearchOrchestrator, SearchRequest};
use crate::selection::SelectionState;

/// Recognized keyboard codes, matched exactly. Everything else falls through
/// to the input policy.
pub mod keys {
    pub const ARROW_UP: &str = "ArrowUp";
    pub const ARROW_DOWN: &str = "ArrowDown";
    pub const ENTER: &str = "Enter";
    pub const ESCAPE: &str = "Escape";
}

/// Shown to the host: the raw input, the ordered records with their derived
/// id list, focus, and the current inline error.
#[derive(Debug, Default)]
pub struct PickerState {
    pub input_value: String,
    pub records: Vec<Record>,
    pub record_ids: Vec<String>,
    pub focused: bool,
    pub error: Option<PickerError>,
}

/// A searchable, keyboard-navigable, single-selection record picker.
///
/// Keystrokes and focus enter through the synchronous methods; the two
/// backend fetches and the debounce timer resume through an owned message
/// queue applied by [`Picker::tick`] or [`Picker::handle_message`], so all
/// state mutation happens wherever the picker is polled.
pub struct Picker {
    config: PickerConfig,
    schema: RecordSchema,
    filter_test: Option<String>,
    state: PickerState,
    navigation: NavigationState,
    selection: SelectionState,
    debouncer: Debouncer,
    orchestrator: SearchOrchestrator,
    listbox: Box<dyn Listbox + Send>,
    notifier: Box<dyn Notifier + Send>,
    selected_tx: UnboundedSender<SelectionChanged>,
    queue_rx: UnboundedReceiver<PickerMessage>,
    queue_tx: UnboundedSender<PickerMessage>,
    /// Generation of the fetch currently reflected in `state.records`.
    applied_generation: u64,
}

impl Picker {
    /// Create the picker and immediately issue the default filtered fetch.
    ///
    /// Returns the picker and the receiving end of its selection-changed
    /// signal. Must be called from within a tokio runtime.
    pub fn attach(
        config: PickerConfig,
        service: Arc<dyn MetadataService>,
        listbox: Box<dyn Listbox + Send>,
        notifier: Box<dyn Notifier + Send>,
    ) -> (Self, UnboundedReceiver<SelectionChanged>) {
        let (selected_tx, selected_rx) = mpsc::unbounded_channel();
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let schema = config.schema();
        let orchestrator = SearchOrchestrator::new(
            service,
            queue_tx.clone(),
            schema.title_field.clone(),
        );

        let mut picker = Self {
            config,
            schema,
            filter_test: None,
            state: PickerState::default(),
            navigation: NavigationState::new(),
            selection: SelectionState::new(),
            debouncer: Debouncer::new(),
            orchestrator,
            listbox,
            notifier,
            selected_tx,
            queue_rx,
            queue_tx,
            applied_generation: 0,
        };

        info!(metadata_name = %picker.config.metadata_name, "picker attached");
        picker.request_filtered();
        (picker, selected_rx)
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn active_id(&self) -> &str {
        self.navigation.active_id()
    }

    pub fn selected_id(&self) -> &str {
        self.selection.selected_id()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selection.record()
    }

    /// Read-only display mode holds while a record is committed.
    pub fn is_read_only(&self) -> bool {
        self.selection.is_read_only()
    }

    pub fn show_listbox(&self) -> bool {
        self.state.focused && !self.state.records.is_empty() && !self.selection.is_read_only()
    }

    pub fn show_clear(&self) -> bool {
        self.selection.is_read_only() || !self.state.input_value.is_empty()
    }

    /// Entry point for every keystroke, with the input's current value.
    pub fn handle_keystroke(&mut self, code: &str, value: &str) {
        self.state.input_value = value.to_string();
        self.state.error = None;

        match code {
            keys::ARROW_UP => self.navigation.cycle(&self.state.record_ids, false),
            keys::ARROW_DOWN => self.navigation.cycle(&self.state.record_ids, true),
            keys::ENTER => self.select_item(),
            keys::ESCAPE => self.clear_selection(),
            _ => self.apply_input_policy(),
        }

        self.render_listbox();
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.state.focused = focused;
    }

    /// Host-visible clear, used by the finder when its filter changes.
    pub fn clear(&mut self) {
        self.clear_selection();
        self.render_listbox();
    }

    /// Replace the parent-driven filter value and refetch immediately,
    /// bypassing the debouncer.
    pub fn set_filter(&mut self, filter_test: Option<String>) {
        self.filter_test = filter_test;
        self.request_filtered();
    }

    /// Apply one background resumption (timer elapse or fetch resolution).
    pub fn handle_message(&mut self, message: PickerMessage) {
        match message {
            PickerMessage::DebounceElapsed { generation } => {
                if self.debouncer.is_current(generation) {
                    self.search();
                } else {
                    debug!(generation, "dropping elapse from a superseded timer");
                }
            }
            PickerMessage::FetchResolved {
                origin,
                generation,
                result,
            } => self.apply_fetch(origin, generation, result),
        }

        self.render_listbox();
    }

    /// Await the next background resumption and apply it.
    pub async fn tick(&mut self) {
        if let Some(message) = self.queue_rx.recv().await {
            self.handle_message(message);
        }
    }

    /// Apply every background resumption already queued, without waiting.
    pub fn drain_queue(&mut self) {
        while let Ok(message) = self.queue_rx.try_recv() {
            self.handle_message(message);
        }
    }

    fn apply_input_policy(&mut self) {
        match input::classify(&self.state.input_value) {
            InputDisposition::Searchable => {
                self.debouncer.schedule(&self.queue_tx);
            }
            InputDisposition::Empty => {
                self.state.records.clear();
                self.state.record_ids.clear();
                self.navigation.reset();
                self.request_filtered();
            }
            InputDisposition::TooShort => {
                self.state.error = Some(PickerError::MinimumLength);
            }
        }
    }

    /// Enter: default the cursor, then route the commit through the listbox.
    fn select_item(&mut self) {
        if self.state.record_ids.is_empty() {
            return;
        }
        let Some(active) = self.navigation.ensure_in(&self.state.record_ids) else {
            return;
        };
        let active = active.to_string();
        if let Some(chosen) = self.listbox.select_item(&active) {
            self.commit(&chosen);
        }
    }

    /// Commit a selection the listbox acknowledged.
    fn commit(&mut self, id: &str) {
        let Some(record) = self.selection.commit(id, &self.state.records, &self.schema) else {
            warn!(id, "ignoring commit for an id that is not in the current records");
            return;
        };
        self.state.input_value = self
            .schema
            .title_of(&record)
            .unwrap_or_default()
            .to_string();
        debug!(id, "selection committed");
        self.emit_selected(SelectionChanged::committed(record));
    }

    /// Escape or the public clear API: drop the selection, reset the lists,
    /// and refetch the default filtered set.
    fn clear_selection(&mut self) {
        self.selection.clear();
        self.navigation.reset();
        self.state.records.clear();
        self.state.record_ids.clear();
        self.state.input_value.clear();
        self.state.error = None;
        self.request_filtered();
        self.emit_selected(SelectionChanged::cleared());
    }

    fn request_filtered(&mut self) {
        self.state.error = None;
        let request = FilteredRequest {
            metadata_name: self.config.metadata_name.clone(),
            filter: Filter::new(self.config.filter_by.clone(), self.filter_test.clone()),
            fields: self.schema.display_fields(),
        };
        self.orchestrator.request_filtered(request);
    }

    fn search(&mut self) {
        self.state.error = None;
        let request = SearchRequest {
            metadata_name: self.config.metadata_name.clone(),
            search_term: self.state.input_value.clone(),
            fields: self.schema.display_fields(),
        };
        self.orchestrator.search(request);
    }

    fn apply_fetch(
        &mut self,
        origin: FetchOrigin,
        generation: u64,
        result: Result<Vec<Record>, pickwick_events::ServiceError>,
    ) {
        match result {
            Ok(records) => {
                if generation < self.applied_generation {
                    // Last response wins by policy; make the overwrite visible.
                    warn!(
                        generation,
                        applied = self.applied_generation,
                        "stale response overwriting newer results"
                    );
                }
                self.applied_generation = generation;
                self.state.record_ids = records
                    .iter()
                    .map(|record| self.schema.id_of(record).unwrap_or_default().to_string())
                    .collect();
                self.state.records = records;
                self.navigation.retain_in(&self.state.record_ids);

                if origin == FetchOrigin::Search && self.state.records.is_empty() {
                    self.notifier.notify(Toast::info(
                        "Info",
                        "No records found, please refine your search.",
                    ));
                }
            }
            Err(err) => {
                error!(%err, ?origin, "metadata fetch failed");
                self.state.error = Some(err.into());
            }
        }
    }

    fn emit_selected(&mut self, signal: SelectionChanged) {
        if self.selected_tx.send(signal).is_err() {
            debug!("selection signal dropped, no subscriber");
        }
    }

    fn render_listbox(&mut self) {
        self.listbox
            .render(&self.state.record_ids, self.navigation.active_id());
    }
}
