use crate::fields::FieldMap;
use crate::record::Direction;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An immutable snapshot of one completed transaction.
///
/// Built exactly once, when the transaction's `End` record arrives, and
/// never mutated afterward. `count` is the process-lifetime sequence number:
/// the first event of a session carries 1, and there are no gaps.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub vxid: u32,
    pub tx: FieldMap,
}
