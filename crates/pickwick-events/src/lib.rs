// ABOUTME: Typed signal and collaborator definitions for decoupled communication
// ABOUTME: Fixed payload schema per signal name; no ad-hoc event objects

pub mod error;
pub mod listbox;
pub mod selection;
pub mod toast;

pub use error::{PickerError, ServiceError};
pub use listbox::{EchoListbox, Listbox};
pub use selection::SelectionChanged;
pub use toast::{Notifier, NullNotifier, Toast, ToastVariant};
