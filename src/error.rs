use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("cannot access {}", path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid {what} index {index} (valid range is 0..{len})")]
    InvalidIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("truncated record after {loaded} complete records")]
    TruncatedRecord { loaded: usize },
    #[error("corrupt record after {loaded} complete records: {reason}")]
    CorruptRecord { loaded: usize, reason: String },
    #[error("name of {len} bytes cannot be length-prefixed")]
    NameTooLong { len: usize },
    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    pub fn io_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::IoUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
