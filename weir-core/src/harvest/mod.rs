
use crate::aggregate::Aggregator;
use crate::sink::EventSink;
use crate::source::{SourceError, SourceSession, TailFlags};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("log source failed")]
    Source(#[from] SourceError),
}

/// Drive `session` until it stops, feeding every record through the
/// aggregator and publishing each finished event to `sink`.
///
/// Two states: running and halted. An overrun keeps us running — the tail
/// is re-entered on the same session and transactions accumulated so far
/// are kept. A clean stop or any other error halts for good; reopening a
/// session is the caller's decision, not ours.
pub fn run(
    session: &mut dyn SourceSession,
    aggregator: &mut Aggregator,
    sink: &mut dyn EventSink,
) -> Result<(), HarvestError> {
    let flags = TailFlags::tailing();

    loop {
        let outcome = session.tail("", flags, &mut |record| {
            if let Some(event) = aggregator.ingest(&record) {
                sink.publish(event);
            }
            0
        });

        match outcome {
            Ok(()) => {
                info!("log feed closed; harvest complete");
                return Ok(());
            }
            Err(SourceError::Overrun) => {
                warn!(
                    in_flight = aggregator.in_flight(),
                    "log feed overrun; resuming tail"
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}
