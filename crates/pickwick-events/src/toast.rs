// ABOUTME: Toast notification payloads and the notifier collaborator trait
// ABOUTME: Consumed for zero-result notices and fetch-error surfacing

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Info,
    Success,
    Warning,
    Error,
}

/// A notification handed to the toast surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub variant: ToastVariant,
    pub message: String,
}

impl Toast {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ToastVariant::Info,
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ToastVariant::Error,
            message: message.into(),
        }
    }
}

/// The toast surface collaborator. Implementations render or forward the
/// notification; the picker never inspects the outcome.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Drops every notification. Useful for hosts without a toast surface.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _toast: Toast) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_constructor_sets_variant() {
        let toast = Toast::info("Info", "No records found");
        assert_eq!(toast.variant, ToastVariant::Info);
        assert_eq!(toast.title, "Info");
    }
}
