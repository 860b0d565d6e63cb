use crate::merge::TxAccumulator;
use std::collections::{HashMap, VecDeque};
use tracing::warn;

/// Upper bound on simultaneously in-flight transactions. Ids that never
/// reach `End` (client disconnects, session records cut short) would
/// otherwise grow the table without limit.
const IN_FLIGHT_CAPACITY: usize = 4096;

/// Per-vxid accumulator storage with oldest-first eviction.
pub(super) struct TxTable {
    entries: HashMap<u32, TxAccumulator>,
    /// Ids in arrival order. Finished ids linger here until compaction;
    /// eviction skips anything no longer live.
    arrival: VecDeque<u32>,
    capacity: usize,
}

impl TxTable {
    pub(super) fn new() -> Self {
        Self::with_capacity(IN_FLIGHT_CAPACITY)
    }

    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            arrival: VecDeque::new(),
            capacity,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The accumulator for `vxid`, created lazily on first sight.
    pub(super) fn slot(&mut self, vxid: u32) -> &mut TxAccumulator {
        if !self.entries.contains_key(&vxid) {
            self.compact();
            self.make_room();
            self.arrival.push_back(vxid);
        }
        self.entries.entry(vxid).or_default()
    }

    pub(super) fn remove(&mut self, vxid: u32) -> Option<TxAccumulator> {
        self.entries.remove(&vxid)
    }

    fn make_room(&mut self) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.arrival.pop_front() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                warn!(
                    vxid = oldest,
                    in_flight = self.entries.len(),
                    "transaction never reached End; evicting oldest"
                );
            }
        }
    }

    /// Drop stale ids from the arrival order once they dominate it.
    fn compact(&mut self) {
        if self.arrival.len() >= self.capacity.saturating_mul(2) {
            let entries = &self.entries;
            self.arrival.retain(|id| entries.contains_key(id));
        }
    }
}
