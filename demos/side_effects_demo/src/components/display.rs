use sidefx_core::{Signal, local_or_default, remember, signal};

use crate::journal::{Journal, JournalEvent};

/// Status text and busy flag of one component instance. Every write is
/// logged and recorded in the journal.
#[derive(Clone)]
pub struct DisplayState {
    component: &'static str,
    status: Signal<String>,
    busy: Signal<bool>,
    journal: Journal,
}

impl DisplayState {
    /// Remembers the state in the current group. The journal is captured from
    /// the composition local at first composition.
    pub fn remember(component: &'static str, initial: &str) -> Self {
        let state = remember(|| Self {
            component,
            status: signal(initial.to_string()),
            busy: signal(false),
            journal: local_or_default::<Journal>(),
        });
        (*state).clone()
    }

    pub fn status(&self) -> String {
        self.status.get()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn set_status(&self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("{}: {text}", self.component);
        self.journal
            .record(self.component, JournalEvent::Status(text.clone()));
        self.status.set(text);
    }

    pub fn set_busy(&self, busy: bool) {
        self.journal.record(self.component, JournalEvent::Busy(busy));
        self.busy.set(busy);
    }

    pub fn record(&self, event: JournalEvent) {
        self.journal.record(self.component, event);
    }
}
