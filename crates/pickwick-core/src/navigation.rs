// ABOUTME: Circular keyboard cursor over the current ordered record-id list
// ABOUTME: Empty active id is Idle; backward wraps at index 0, forward runs off the end

/// The keyboard highlight. `Idle` is represented by an empty active id; every
/// transition keeps the active id either empty or a member of the id list.
///
/// The forward and backward boundaries are deliberately asymmetric, matching
/// the observed lookup behavior: ArrowUp at index 0 wraps straight to the
/// last element, while ArrowDown at the last index drops back to `Idle` so
/// the following ArrowDown lands on the first element.
#[derive(Debug, Default)]
pub struct NavigationState {
    active_id: String,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn is_idle(&self) -> bool {
        self.active_id.is_empty()
    }

    pub fn reset(&mut self) {
        self.active_id.clear();
    }

    /// Move the highlight one step. No transition is valid over an empty list.
    pub fn cycle(&mut self, record_ids: &[String], forwards: bool) {
        if record_ids.is_empty() {
            return;
        }

        let current = record_ids.iter().position(|id| *id == self.active_id);
        self.active_id = match current {
            // Idle or out-of-range: both directions land on the first element.
            None => record_ids[0].clone(),
            Some(0) if !forwards => record_ids[record_ids.len() - 1].clone(),
            Some(index) if forwards => match record_ids.get(index + 1) {
                Some(next) => next.clone(),
                // Ran off the end; Idle until the next step.
                None => String::new(),
            },
            Some(index) => record_ids[index - 1].clone(),
        };
    }

    /// Default the cursor to the first id when it is empty or no longer in
    /// the list. Returns the resulting active id, or `None` for an empty list.
    pub fn ensure_in(&mut self, record_ids: &[String]) -> Option<&str> {
        if record_ids.is_empty() {
            return None;
        }
        if !record_ids.contains(&self.active_id) {
            self.active_id = record_ids[0].clone();
        }
        Some(&self.active_id)
    }

    /// Drop the highlight if its id left the list (after a fetch replaced it).
    pub fn retain_in(&mut self, record_ids: &[String]) {
        if !self.active_id.is_empty() && !record_ids.contains(&self.active_id) {
            self.reset();
        }
    }
}
