use crate::fields::FieldMap;
use std::collections::HashMap;

/// Mutable state for one in-progress transaction.
///
/// Built up record by record until the transaction's `End` arrives, then
/// snapshotted into an event and discarded. The occurrence counters back the
/// `key.N` index scheme for repeated ACL checks; indices are zero-based and
/// follow arrival order regardless of interleaving with other tags.
#[derive(Debug, Default)]
pub struct TxAccumulator {
    fields: FieldMap,
    acl_seen: HashMap<String, u64>,
}

impl TxAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the accumulator, yielding the finished field map.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    /// Zero-based occurrence index for an ACL key, advancing the counter.
    pub(crate) fn next_acl_index(&mut self, key: &str) -> u64 {
        let counter = self.acl_seen.entry(key.to_owned()).or_insert(0);
        let index = *counter;
        *counter += 1;
        index
    }
}
