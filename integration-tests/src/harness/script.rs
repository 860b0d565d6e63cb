use std::collections::VecDeque;
use std::io;
use weir_core::record::LogRecord;
use weir_core::source::{OnRecord, SessionCloser, SourceError, SourceSession, TailFlags};

/// One step of a scripted feed.
pub enum Step {
    Record(LogRecord),
    /// The feed outran the reader; the tail call returns the recoverable
    /// overrun error and the remaining steps play on the next tail.
    Overrun,
    /// A fatal feed failure.
    Fail(&'static str),
}

/// A log source session that plays a fixed tape of records and signals.
///
/// Mirrors the contract of the real feed: `tail` blocks the caller (here it
/// just runs the tape), errors end the call, and a later `tail` resumes
/// where the previous one stopped.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    closer: SessionCloser,
    tail_calls: usize,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            closer: SessionCloser::new(),
            tail_calls: 0,
        }
    }

    /// How many times `tail` was entered.
    pub fn tail_calls(&self) -> usize {
        self.tail_calls
    }
}

impl SourceSession for ScriptedSource {
    fn tail(
        &mut self,
        _filter: &str,
        _flags: TailFlags,
        on_record: OnRecord<'_>,
    ) -> Result<(), SourceError> {
        self.tail_calls += 1;

        while !self.closer.is_closed() {
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            match step {
                Step::Record(record) => {
                    if on_record(record) != 0 {
                        return Ok(());
                    }
                }
                Step::Overrun => return Err(SourceError::Overrun),
                Step::Fail(message) => return Err(SourceError::read(io::Error::other(message))),
            }
        }
        Ok(())
    }

    fn closer(&self) -> SessionCloser {
        self.closer.clone()
    }
}
