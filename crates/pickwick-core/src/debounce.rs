// ABOUTME: Coalesces rapid qualifying keystrokes into a single delayed search trigger
// ABOUTME: Owned, cancellable timer handle; rescheduling aborts the previous timer

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::message::PickerMessage;

/// Quiet period a burst of typing must survive before a search fires.
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// At most one timer is pending per picker instance. Each schedule aborts
/// the previous timer; the elapse message carries a generation stamp so an
/// elapse that raced its own cancellation is recognized and dropped.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_quiet_period(QUIET_PERIOD)
    }

    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            generation: 0,
        }
    }

    /// Cancel any pending timer and start a fresh quiet period.
    ///
    /// Returns the generation the elapse message will carry. Must be called
    /// from within a tokio runtime.
    pub fn schedule(&mut self, queue: &UnboundedSender<PickerMessage>) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let quiet_period = self.quiet_period;
        let queue = queue.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = queue.send(PickerMessage::DebounceElapsed { generation });
        }));
        generation
    }

    /// True when `generation` belongs to the most recently scheduled timer.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    // Teardown must not leave a timer firing after disposal.
    fn drop(&mut self) {
        self.cancel();
    }
}
