mod script;
mod sink;

pub use script::{ScriptedSource, Step};
pub use sink::CollectingSink;

use weir_core::record::{Direction, LogRecord};

/// Shorthand for a client-side record step.
pub fn client(vxid: u32, tag: &str, payload: &str) -> Step {
    Step::Record(LogRecord::new(vxid, tag, Direction::Client, payload))
}

/// Shorthand for a backend-side record step.
pub fn backend(vxid: u32, tag: &str, payload: &str) -> Step {
    Step::Record(LogRecord::new(vxid, tag, Direction::Backend, payload))
}

/// A record step with an explicit direction.
pub fn record(vxid: u32, tag: &str, direction: Direction, payload: &str) -> Step {
    Step::Record(LogRecord::new(vxid, tag, direction, payload))
}
