use std::collections::BTreeMap;

/// Why a reader flagged a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackReason {
    DataError,
    Outdated,
    LogicFlaw,
    OffTopic,
    Formatting,
    Other,
}

impl FeedbackReason {
    pub const VALUES: &[FeedbackReason] = &[
        FeedbackReason::DataError,
        FeedbackReason::Outdated,
        FeedbackReason::LogicFlaw,
        FeedbackReason::OffTopic,
        FeedbackReason::Formatting,
        FeedbackReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackReason::DataError => "Data error",
            FeedbackReason::Outdated => "Outdated information",
            FeedbackReason::LogicFlaw => "Logic flaw",
            FeedbackReason::OffTopic => "Off topic",
            FeedbackReason::Formatting => "Formatting problem",
            FeedbackReason::Other => "Other",
        }
    }
}

/// Feedback form state for one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackState {
    pub is_open: bool,
    pub submitted: bool,
    pub reason: Option<FeedbackReason>,
    pub detail: String,
}

/// Per-message feedback keyed by transcript index
///
/// Entries are created on first touch and never removed. Once submitted an
/// entry is frozen: every further transition is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackBook {
    entries: BTreeMap<usize, FeedbackState>,
}

impl FeedbackBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `index`, default if never touched
    pub fn get(&self, index: usize) -> FeedbackState {
        self.entries.get(&index).cloned().unwrap_or_default()
    }

    fn open_entry(&mut self, index: usize) -> Option<&mut FeedbackState> {
        let entry = self.entries.entry(index).or_default();
        (!entry.submitted).then_some(entry)
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(entry) = self.open_entry(index) {
            entry.is_open = !entry.is_open;
        }
    }

    pub fn set_reason(&mut self, index: usize, reason: FeedbackReason) {
        if let Some(entry) = self.open_entry(index) {
            entry.reason = Some(reason);
        }
    }

    pub fn set_detail(&mut self, index: usize, detail: impl Into<String>) {
        if let Some(entry) = self.open_entry(index) {
            entry.detail = detail.into();
        }
    }

    /// Submit feedback; returns `false` when no reason is set or it was
    /// already submitted
    pub fn submit(&mut self, index: usize) -> bool {
        match self.open_entry(index) {
            Some(entry) if entry.reason.is_some() => {
                entry.submitted = true;
                entry.is_open = false;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let book = FeedbackBook::new();
        assert_eq!(book.get(3), FeedbackState::default());
        assert!(!book.get(3).is_open);
    }

    #[test]
    fn test_toggle() {
        let mut book = FeedbackBook::new();
        book.toggle(1);
        assert!(book.get(1).is_open);
        book.toggle(1);
        assert!(!book.get(1).is_open);
    }

    #[test]
    fn test_submit_requires_reason() {
        let mut book = FeedbackBook::new();
        book.toggle(0);
        book.set_detail(0, "numbers look wrong");
        assert!(!book.submit(0));

        let state = book.get(0);
        assert!(state.is_open);
        assert!(!state.submitted);
        assert_eq!(state.detail, "numbers look wrong");
    }

    #[test]
    fn test_submitted_is_terminal() {
        let mut book = FeedbackBook::new();
        book.toggle(2);
        book.set_reason(2, FeedbackReason::Outdated);
        assert!(book.submit(2));

        let state = book.get(2);
        assert!(state.submitted);
        assert!(!state.is_open);

        book.toggle(2);
        book.set_reason(2, FeedbackReason::Other);
        book.set_detail(2, "changed my mind");
        assert!(!book.submit(2));

        let after = book.get(2);
        assert_eq!(after, state);
        assert_eq!(after.reason, Some(FeedbackReason::Outdated));
    }

    #[test]
    fn test_entries_are_independent() {
        let mut book = FeedbackBook::new();
        book.set_reason(0, FeedbackReason::DataError);
        book.submit(0);
        book.toggle(1);

        assert!(book.get(0).submitted);
        assert!(book.get(1).is_open);
        assert!(!book.get(1).submitted);
    }

    #[test]
    fn test_reason_labels_unique() {
        let mut labels: Vec<_> = FeedbackReason::VALUES.iter().map(|r| r.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), FeedbackReason::VALUES.len());
    }
}
