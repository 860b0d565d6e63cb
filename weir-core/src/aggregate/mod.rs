mod table;

#[cfg(test)]
mod tests;

use crate::event::Event;
use crate::fields::FieldMap;
use crate::merge::{self, Strategy, TxAccumulator};
use crate::record::{Direction, LogRecord};
use chrono::Utc;
use table::TxTable;

/// Folds the record stream into one event per completed transaction.
///
/// Transactions interleave freely in the feed, so state is keyed by `vxid`:
/// an accumulator is created on the first record for an id and destroyed
/// exactly when that id's `End` is processed. The single thread that owns
/// the tail call owns this whole structure; nothing here is shared.
pub struct Aggregator {
    table: TxTable,
    next_count: u64,
    accept_client: bool,
    accept_backend: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_directions(true, true)
    }

    /// An aggregator accepting only the configured record directions.
    pub fn with_directions(client: bool, backend: bool) -> Self {
        Self {
            table: TxTable::new(),
            next_count: 1,
            accept_client: client,
            accept_backend: backend,
        }
    }

    /// Transactions currently being accumulated.
    pub fn in_flight(&self) -> usize {
        self.table.len()
    }

    /// Feed one record through the tag dispatcher.
    ///
    /// Returns the finished event when `record` completes its transaction;
    /// every other record mutates in-progress state and yields nothing.
    pub fn ingest(&mut self, record: &LogRecord) -> Option<Event> {
        if !self.accepts(record.direction) {
            return None;
        }

        match merge::classify(&record.tag) {
            Strategy::End => Some(self.finish(record)),
            strategy => {
                let acc = self.table.slot(record.vxid);
                merge::apply(acc, strategy, &record.tag, &record.payload);
                None
            }
        }
    }

    fn accepts(&self, direction: Direction) -> bool {
        match direction {
            Direction::Client => self.accept_client,
            Direction::Backend => self.accept_backend,
            Direction::Other => false,
        }
    }

    /// Snapshot and reset. An `End` with no prior records still yields an
    /// event; its fields are just empty.
    fn finish(&mut self, record: &LogRecord) -> Event {
        let tx = self
            .table
            .remove(record.vxid)
            .map(TxAccumulator::into_fields)
            .unwrap_or_else(FieldMap::new);

        let event = Event {
            timestamp: Utc::now(),
            count: self.next_count,
            direction: record.direction,
            vxid: record.vxid,
            tx,
        };
        self.next_count += 1;
        event
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
