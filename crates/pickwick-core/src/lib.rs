// ABOUTME: The picker's internal state machine and its backend orchestration
// ABOUTME: Input policy, debounce, search, circular navigation, selection, composition root

pub mod debounce;
pub mod input;
pub mod message;
pub mod navigation;
pub mod picker;
pub mod search;
pub mod selection;

pub use debounce::Debouncer;
pub use message::{FetchOrigin, PickerMessage};
pub use navigation::NavigationState;
pub use picker::{Picker, PickerState, keys};
pub use search::{FilteredRequest, MetadataService, SearchOrchestrator, SearchRequest};
pub use selection::SelectionState;
