use super::EventSink;
use crate::event::Event;
use std::sync::mpsc::SyncSender;
use tracing::warn;

/// Hands events across to the thread that owns the real sink.
///
/// The channel is bounded, so a slow consumer backpressures the harvest
/// thread instead of growing a queue. Dropping this sink is what tells the
/// consumer the stream is over.
pub struct ChannelSink {
    tx: SyncSender<Event>,
}

impl ChannelSink {
    pub fn new(tx: SyncSender<Event>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn publish(&mut self, event: Event) {
        // A gone receiver means shutdown is already underway.
        if let Err(err) = self.tx.send(event) {
            warn!(count = err.0.count, "event channel disconnected; dropping event");
        }
    }
}
