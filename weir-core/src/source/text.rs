use super::{OnRecord, SessionCloser, SourceError, SourceSession, TailFlags};
use crate::record::{Direction, LogRecord};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Polling interval while waiting for a followed feed to grow.
const FOLLOW_IDLE_SLEEP: Duration = Duration::from_millis(50);

/// A log feed session over `varnishlog -g raw` formatted text.
///
/// Line shape: `<vxid> <tag> <c|b|-> <payload...>`. Reads from a file or
/// FIFO (following growth at EOF when tailing) or from stdin. A malformed
/// line is skipped with a debug log; the feed itself never aborts over one
/// bad record.
pub struct TextFeed {
    reader: Box<dyn BufRead + Send>,
    /// Files and FIFOs can be followed at EOF; stdin ends when the pipe does.
    can_follow: bool,
    idle_timeout: Option<Duration>,
    closer: SessionCloser,
}

impl TextFeed {
    /// Open a feed at `path`, or over stdin when `path` is `None`.
    ///
    /// `timeout` bounds how long a tailing read waits for the feed to grow
    /// before giving up; `None` waits forever.
    pub fn open(path: Option<&Path>, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let (reader, can_follow): (Box<dyn BufRead + Send>, bool) = match path {
            Some(path) => {
                let file = File::open(path).map_err(|e| SourceError::open(path, e))?;
                (Box::new(BufReader::new(file)), true)
            }
            None => (Box::new(BufReader::new(io::stdin())), false),
        };

        Ok(Self {
            reader,
            can_follow,
            idle_timeout: timeout,
            closer: SessionCloser::new(),
        })
    }

    /// A feed over any buffered reader. Used with in-memory readers and
    /// pipes that are neither files nor stdin.
    pub fn from_reader(
        reader: impl BufRead + Send + 'static,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            reader: Box::new(reader),
            can_follow: false,
            idle_timeout: timeout,
            closer: SessionCloser::new(),
        }
    }
}

impl SourceSession for TextFeed {
    fn tail(
        &mut self,
        filter: &str,
        flags: TailFlags,
        on_record: OnRecord<'_>,
    ) -> Result<(), SourceError> {
        if !filter.is_empty() {
            debug!(filter, "filter expressions are not supported by the text feed; ignoring");
        }

        let follow = flags.tail && self.can_follow;
        let mut idle_since: Option<Instant> = None;
        let mut pending = String::new();
        let mut chunk = String::new();

        loop {
            // A blocked stdin read is only interrupted by EOF; the stop flag
            // is honored at the next line boundary.
            if self.closer.is_closed() {
                return Ok(());
            }

            chunk.clear();
            let n = self.reader.read_line(&mut chunk).map_err(SourceError::read)?;

            if n == 0 {
                if !follow {
                    // A final line without a newline still counts.
                    if !pending.is_empty() {
                        if let Some(record) = parse_raw_line(&pending) {
                            let _ = on_record(record);
                        }
                    }
                    return Ok(());
                }

                let started = *idle_since.get_or_insert_with(Instant::now);
                if let Some(timeout) = self.idle_timeout {
                    if started.elapsed() >= timeout {
                        return Err(SourceError::Timeout { timeout });
                    }
                }
                thread::sleep(FOLLOW_IDLE_SLEEP);
                continue;
            }

            idle_since = None;
            pending.push_str(&chunk);
            if !pending.ends_with('\n') {
                // Mid-write partial line; wait for the rest.
                continue;
            }

            let line = std::mem::take(&mut pending);
            match parse_raw_line(&line) {
                Some(record) => {
                    if on_record(record) != 0 {
                        return Ok(());
                    }
                }
                None => debug!(line = line.trim_end(), "skipping malformed feed line"),
            }
        }
    }

    fn closer(&self) -> SessionCloser {
        self.closer.clone()
    }
}

/// Parse one raw-grouping feed line into a record.
///
/// The first three whitespace-separated tokens are the vxid, the tag, and
/// the direction marker; everything after the marker is the payload,
/// verbatim. `End` records legitimately carry an empty payload.
pub(super) fn parse_raw_line(line: &str) -> Option<LogRecord> {
    let line = line.trim_end_matches(['\n', '\r']);

    let (vxid, rest) = split_token(line.trim_start())?;
    let (tag, rest) = split_token(rest)?;
    let (marker, payload) = split_token(rest)?;

    let vxid = vxid.parse::<u32>().ok()?;
    Some(LogRecord::new(
        vxid,
        tag,
        Direction::from_marker(marker),
        payload,
    ))
}

fn split_token(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(idx) => Some((&s[..idx], s[idx..].trim_start())),
        None => Some((s, "")),
    }
}
