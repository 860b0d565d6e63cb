use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The feed moved faster than the reader and records were skipped.
    /// Recoverable: the session is still usable and may be re-tailed.
    #[error("log feed overrun; records were skipped")]
    Overrun,

    #[error("no log records within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("failed to open log feed {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read log feed: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read(source: io::Error) -> Self {
        Self::Read { source }
    }

    pub fn is_overrun(&self) -> bool {
        matches!(self, Self::Overrun)
    }
}
