// ABOUTME: Demo binary driving a scripted finder session against the fixture backend
// ABOUTME: Initializes logging, types a search, navigates, commits, and clears

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use pickwick::fixture::record;
use pickwick::{Collaborators, Finder, FinderConfig, StaticMetadataService};
use pickwick_core::keys;
use pickwick_logging::info;
use pickwick_types::PickerConfig;

fn demo_service() -> StaticMetadataService {
    StaticMetadataService::new()
        .with_table(
            "Widget__mdt",
            vec![
                record(&[("Id", "w1"), ("Name", "Anvil"), ("Status", "Active")]),
                record(&[("Id", "w2"), ("Name", "Crate"), ("Status", "Retired")]),
                record(&[("Id", "w3"), ("Name", "Crowbar"), ("Status", "Active")]),
            ],
        )
        .with_table(
            "Part__mdt",
            vec![
                record(&[("Id", "p1"), ("Name", "Bolt"), ("Status", "Active")]),
                record(&[("Id", "p2"), ("Name", "Washer"), ("Status", "Retired")]),
            ],
        )
}

fn demo_config() -> FinderConfig {
    FinderConfig {
        primary: PickerConfig {
            filter_by: "Status".to_string(),
            placeholder: "Search widgets...".to_string(),
            ..PickerConfig::new("Widget__mdt")
        },
        dependent: PickerConfig {
            filter_by: "Status".to_string(),
            placeholder: "Search parts...".to_string(),
            ..PickerConfig::new("Part__mdt")
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pickwick_logging::init_logging()?;

    let service = Arc::new(demo_service());
    let (mut finder, mut selected_rx) = Finder::attach(
        demo_config(),
        service,
        Collaborators::default(),
        Collaborators::default(),
    )
    .await;

    // Let the initial filtered fetches resolve.
    finder.step().await;
    finder.step().await;
    info!(
        options = ?finder.filter_options(),
        primary = ?finder.primary().state().record_ids,
        dependent = ?finder.dependent().state().record_ids,
        "finder ready"
    );

    // Type "cro" and wait out the debounce quiet period.
    let primary = finder.primary_mut();
    primary.set_focus(true);
    primary.handle_keystroke("c", "c");
    primary.handle_keystroke("r", "cr");
    primary.handle_keystroke("o", "cro");
    tokio::time::sleep(Duration::from_millis(350)).await;
    finder.step().await; // the elapse issues the search
    finder.step().await; // the search resolves
    info!(results = ?finder.primary().state().record_ids, "search results in");

    // Highlight the first hit and commit it.
    finder.primary_mut().handle_keystroke(keys::ARROW_DOWN, "cro");
    finder.primary_mut().handle_keystroke(keys::ENTER, "cro");
    finder.pump();
    finder.step().await; // the dependent refetches under the forwarded filter

    if let Ok(id) = selected_rx.try_recv() {
        info!(
            %id,
            input = %finder.primary().state().input_value,
            dependent = ?finder.dependent().state().record_ids,
            "selection committed"
        );
    }

    // Escape clears the selection and restores the default list.
    finder.primary_mut().handle_keystroke(keys::ESCAPE, "");
    finder.pump();
    finder.step().await; // the primary refetches its default set
    finder.step().await; // the dependent was cleared and refetches too
    info!(
        primary = ?finder.primary().state().record_ids,
        "selection cleared"
    );

    Ok(())
}
