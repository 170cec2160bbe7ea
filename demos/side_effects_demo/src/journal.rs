use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JournalEvent {
    Status(String),
    Busy(bool),
    Register,
    Unregister,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    pub component: &'static str,
    pub event: JournalEvent,
}

/// Shared, append-only record of every display-state write and listener
/// transition. Provided to components as a composition local.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<JournalEntry>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, component: &'static str, event: JournalEvent) {
        self.0.borrow_mut().push(JournalEntry { component, event });
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn for_component(&self, component: &str) -> Vec<JournalEvent> {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.component == component)
            .map(|e| e.event.clone())
            .collect()
    }

    /// Status texts written by `component`, in order.
    pub fn statuses(&self, component: &str) -> Vec<String> {
        self.for_component(component)
            .into_iter()
            .filter_map(|e| match e {
                JournalEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}
