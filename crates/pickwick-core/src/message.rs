// ABOUTME: Background resumptions delivered to the picker's event queue
// ABOUTME: Timer elapses and fetch resolutions; both carry a generation stamp

use pickwick_events::ServiceError;
use pickwick_types::Record;

/// Which backend operation produced a resolution.
///
/// Zero results from a search surface an informational notice; zero results
/// from a filtered fetch do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Filtered,
    Search,
}

/// One suspension point resuming onto the picker's queue.
#[derive(Debug)]
pub enum PickerMessage {
    /// The debounce quiet period elapsed without interruption.
    DebounceElapsed { generation: u64 },

    /// A backend fetch resolved, successfully or not.
    ///
    /// Responses are applied in arrival order; `generation` records issue
    /// order so a stale overwrite can be observed in the logs.
    FetchResolved {
        origin: FetchOrigin,
        generation: u64,
        result: Result<Vec<Record>, ServiceError>,
    },
}
