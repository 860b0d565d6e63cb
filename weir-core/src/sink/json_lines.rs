use super::EventSink;
use crate::event::Event;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Writes events as JSON, one document per line.
pub struct JsonLinesSink<W: Write + Send> {
    out: BufWriter<W>,
}

impl JsonLinesSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonLinesSink<File> {
    pub fn file(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn publish(&mut self, event: Event) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, count = event.count, "failed to serialize event");
                return;
            }
        };

        // Flush per event: publishing is fire-and-forget, so nothing else
        // would ever drive buffered lines out.
        if let Err(err) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!(error = %err, count = event.count, "failed to write event");
        }
    }

    fn close(&mut self) {
        if let Err(err) = self.out.flush() {
            warn!(error = %err, "failed to flush event sink");
        }
    }
}
