// ABOUTME: Thin coordinator chaining two pickers: primary selection filters the dependent
// ABOUTME: Also sources the primary's filter combobox from the picklist capability

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use pickwick_core::{MetadataService, Picker};
use pickwick_events::{EchoListbox, Listbox, Notifier, NullNotifier, SelectionChanged};
use pickwick_logging::{debug, error, info};
use pickwick_types::{PickerConfig, PicklistOption};

/// Configuration for the finder's two picker instances.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub primary: PickerConfig,
    /// The dependent picker; its `filter_by` names the payload field whose
    /// value is forwarded as the filter.
    pub dependent: PickerConfig,
}

/// External collaborators for one picker instance.
pub struct Collaborators {
    pub listbox: Box<dyn Listbox + Send>,
    pub notifier: Box<dyn Notifier + Send>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            listbox: Box::new(EchoListbox),
            notifier: Box::new(NullNotifier),
        }
    }
}

/// Pure glue over two pickers.
///
/// A non-empty selection in the primary forwards `payload[filter_by]` to the
/// dependent picker and re-emits the bare record identifier; an empty
/// (cleared) selection clears the dependent picker.
pub struct Finder {
    primary: Picker,
    dependent: Picker,
    primary_selected: UnboundedReceiver<SelectionChanged>,
    dependent_selected: UnboundedReceiver<SelectionChanged>,
    filter_options: Vec<PicklistOption>,
    selected_id: String,
    selected_filter: String,
    selected_tx: UnboundedSender<String>,
}

impl Finder {
    /// Attach both pickers and fetch the primary's filter options,
    /// substituting a lone `None` option when the backend has no values.
    ///
    /// Returns the finder and the receiving end of its re-emitted
    /// identifier signal. Must be called from within a tokio runtime.
    pub async fn attach(
        config: FinderConfig,
        service: Arc<dyn MetadataService>,
        primary_collaborators: Collaborators,
        dependent_collaborators: Collaborators,
    ) -> (Self, UnboundedReceiver<String>) {
        let filter_options = match service
            .picklist_values(&config.primary.metadata_name, &config.primary.filter_by)
            .await
        {
            Ok(options) if options.is_empty() => vec![PicklistOption::none()],
            Ok(options) => options,
            Err(err) => {
                error!(%err, "failed to fetch picklist values");
                Vec::new()
            }
        };

        let (primary, primary_selected) = Picker::attach(
            config.primary,
            Arc::clone(&service),
            primary_collaborators.listbox,
            primary_collaborators.notifier,
        );
        let (dependent, dependent_selected) = Picker::attach(
            config.dependent,
            service,
            dependent_collaborators.listbox,
            dependent_collaborators.notifier,
        );

        let (selected_tx, selected_rx) = mpsc::unbounded_channel();
        info!(options = filter_options.len(), "finder attached");

        (
            Self {
                primary,
                dependent,
                primary_selected,
                dependent_selected,
                filter_options,
                selected_id: String::new(),
                selected_filter: String::new(),
                selected_tx,
            },
            selected_rx,
        )
    }

    pub fn filter_options(&self) -> &[PicklistOption] {
        &self.filter_options
    }

    /// Identifier last re-emitted from the primary picker, or empty.
    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn primary(&self) -> &Picker {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut Picker {
        &mut self.primary
    }

    pub fn dependent(&self) -> &Picker {
        &self.dependent
    }

    pub fn dependent_mut(&mut self) -> &mut Picker {
        &mut self.dependent
    }

    /// A filter option was chosen: clear the primary and re-filter it.
    pub fn handle_filter_selected(&mut self, value: &str) {
        self.selected_filter = value.to_string();
        self.primary.clear();
        let filter = (!value.is_empty()).then(|| value.to_string());
        self.primary.set_filter(filter);
        // The clear above emitted an empty payload; chain it now rather than
        // on the next step.
        while let Ok(signal) = self.primary_selected.try_recv() {
            self.chain(signal);
        }
    }

    /// Await the next piece of background work from either picker or the
    /// primary's selection signal, and apply it.
    pub async fn step(&mut self) {
        tokio::select! {
            _ = self.primary.tick() => {}
            _ = self.dependent.tick() => {}
            Some(signal) = self.primary_selected.recv() => self.chain(signal),
            Some(signal) = self.dependent_selected.recv() => {
                debug!(clear = signal.is_clear(), "dependent selection changed");
            }
        }
    }

    /// Apply everything already queued, without waiting.
    pub fn pump(&mut self) {
        self.primary.drain_queue();
        self.dependent.drain_queue();
        while let Ok(signal) = self.primary_selected.try_recv() {
            self.chain(signal);
        }
        while let Ok(_signal) = self.dependent_selected.try_recv() {}
        // Chaining may have queued new fetches; apply what has resolved.
        self.primary.drain_queue();
        self.dependent.drain_queue();
    }

    /// React to the primary picker's selection-changed signal.
    fn chain(&mut self, signal: SelectionChanged) {
        if signal.is_clear() {
            self.selected_id.clear();
            self.dependent.clear();
            return;
        }

        let id_field = self.primary.config().schema().id_field;
        let id = signal
            .record
            .get_str(&id_field)
            .unwrap_or_default()
            .to_string();
        // A payload without the filter field keeps the previous filter value.
        let filter_field = self.dependent.config().filter_by.clone();
        if let Some(value) = signal.record.get_str(&filter_field) {
            self.selected_filter = value.to_string();
        }
        if id.is_empty() {
            return;
        }

        self.selected_id = id.clone();
        let _ = self.selected_tx.send(id);
        let filter = (!self.selected_filter.is_empty()).then(|| self.selected_filter.clone());
        self.dependent.set_filter(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{StaticMetadataService, record};
    use pickwick_core::keys;

    fn service() -> Arc<StaticMetadataService> {
        Arc::new(
            StaticMetadataService::new()
                .with_table(
                    "Widget__mdt",
                    vec![
                        record(&[("Id", "w1"), ("Name", "Anvil"), ("Status", "Active")]),
                        record(&[("Id", "w2"), ("Name", "Crate"), ("Status", "Retired")]),
                    ],
                )
                .with_table(
                    "Part__mdt",
                    vec![
                        record(&[("Id", "p1"), ("Name", "Bolt"), ("Status", "Active")]),
                        record(&[("Id", "p2"), ("Name", "Washer"), ("Status", "Retired")]),
                    ],
                ),
        )
    }

    fn config() -> FinderConfig {
        FinderConfig {
            primary: PickerConfig {
                filter_by: "Status".to_string(),
                ..PickerConfig::new("Widget__mdt")
            },
            dependent: PickerConfig {
                filter_by: "Status".to_string(),
                ..PickerConfig::new("Part__mdt")
            },
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    async fn attach() -> (Finder, UnboundedReceiver<String>) {
        let (mut finder, selected_rx) = Finder::attach(
            config(),
            service(),
            Collaborators::default(),
            Collaborators::default(),
        )
        .await;
        settle().await;
        finder.pump();
        (finder, selected_rx)
    }

    #[tokio::test]
    async fn attach_loads_filter_options_and_both_pickers() {
        let (finder, _selected_rx) = attach().await;

        let values: Vec<_> = finder
            .filter_options()
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, ["Active", "Retired"]);
        assert_eq!(finder.primary().state().record_ids, ["w1", "w2"]);
        assert_eq!(finder.dependent().state().record_ids, ["p1", "p2"]);
    }

    #[tokio::test]
    async fn missing_picklist_values_substitute_a_none_option() {
        let service = Arc::new(StaticMetadataService::new());
        let (finder, _selected_rx) = Finder::attach(
            config(),
            service,
            Collaborators::default(),
            Collaborators::default(),
        )
        .await;

        assert_eq!(finder.filter_options(), &[PicklistOption::none()]);
    }

    #[tokio::test]
    async fn primary_selection_filters_the_dependent_and_reemits_the_id() {
        let (mut finder, mut selected_rx) = attach().await;

        // Commit the first primary record (Anvil, Status Active).
        finder.primary_mut().handle_keystroke(keys::ENTER, "");
        finder.pump();
        settle().await;
        finder.pump();

        assert_eq!(selected_rx.try_recv().unwrap(), "w1");
        assert_eq!(finder.selected_id(), "w1");
        assert_eq!(finder.dependent().state().record_ids, ["p1"]);
    }

    #[tokio::test]
    async fn clearing_the_primary_clears_the_dependent() {
        let (mut finder, mut selected_rx) = attach().await;

        finder.primary_mut().handle_keystroke(keys::ENTER, "");
        finder.pump();
        settle().await;
        finder.pump();
        assert_eq!(selected_rx.try_recv().unwrap(), "w1");

        finder.primary_mut().handle_keystroke(keys::ESCAPE, "");
        finder.pump();
        settle().await;
        finder.pump();

        assert_eq!(finder.selected_id(), "");
        // The dependent was cleared and refetched with its previous filter.
        assert!(selected_rx.try_recv().is_err());
        assert_eq!(finder.dependent().state().record_ids, ["p1"]);
    }

    #[tokio::test]
    async fn filter_selection_clears_and_refilters_the_primary() {
        let (mut finder, _selected_rx) = attach().await;

        finder.handle_filter_selected("Retired");
        settle().await;
        finder.pump();

        assert_eq!(finder.primary().state().record_ids, ["w2"]);
        assert!(finder.primary().selected_id().is_empty());
    }
}
