mod error;
mod text;


pub use error::SourceError;
pub use text::TextFeed;

use crate::record::LogRecord;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-record callback. Return zero to keep tailing; anything else asks the
/// session to stop cleanly.
pub type OnRecord<'a> = &'a mut dyn FnMut(LogRecord) -> i32;

/// Options for a tail call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailFlags {
    /// Follow feed growth instead of stopping at the current end.
    pub tail: bool,
    /// Let the source deliver records in batches when it can.
    pub batch: bool,
}

impl TailFlags {
    pub fn tailing() -> Self {
        Self {
            tail: true,
            batch: true,
        }
    }
}

/// A live session against a transaction log feed.
///
/// `tail` blocks the calling thread and invokes the callback once per record
/// in stream order. It returns `Ok(())` on a clean stop (feed closed, session
/// closed, or callback abort), `Err(SourceError::Overrun)` when the feed
/// outran the reader, and any other error on a fatal failure. A session that
/// returned is not re-entered implicitly; re-tailing is the caller's call.
pub trait SourceSession: Send {
    fn tail(
        &mut self,
        filter: &str,
        flags: TailFlags,
        on_record: OnRecord<'_>,
    ) -> Result<(), SourceError>;

    /// A handle that unblocks a pending `tail` from another thread.
    fn closer(&self) -> SessionCloser;
}

/// Cloneable stop handle for a session.
///
/// Closing is a request, not a preemption: a blocked read is interrupted at
/// its next wakeup, never mid-record.
#[derive(Debug, Clone, Default)]
pub struct SessionCloser {
    closed: Arc<AtomicBool>,
}

impl SessionCloser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
