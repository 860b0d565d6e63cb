use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use weir_core::event::Event;
use weir_core::sink::EventSink;

/// An event sink that remembers everything published to it.
///
/// Clones share storage, so a test can keep one handle while the engine
/// owns another on a different thread.
#[derive(Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<Event>>>,
    closed: Arc<AtomicBool>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl EventSink for CollectingSink {
    fn publish(&mut self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
