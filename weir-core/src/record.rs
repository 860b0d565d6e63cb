use serde::Serialize;

/// Which side of the proxy a log record was written on.
///
/// The raw feed marks every record with a single letter: `c` for the
/// client-facing side, `b` for the backend-facing side. Anything else
/// (session records, raw markers) is `Other` and never reaches the
/// aggregation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Client,
    Backend,
    Other,
}

impl Direction {
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            "c" => Direction::Client,
            "b" => Direction::Backend,
            _ => Direction::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Client => "client",
            Direction::Backend => "backend",
            Direction::Other => "other",
        }
    }
}

/// One tagged record from the transaction log feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Transaction id grouping all records of one proxy transaction.
    pub vxid: u32,
    pub tag: String,
    pub direction: Direction,
    pub payload: String,
}

impl LogRecord {
    pub fn new(
        vxid: u32,
        tag: impl Into<String>,
        direction: Direction,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            vxid,
            tag: tag.into(),
            direction,
            payload: payload.into(),
        }
    }
}
