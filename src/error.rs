use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("character alphabet is empty; enable at least one character class")]
    EmptyAlphabet,

    #[error("no entry at index {index} (store holds {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("credential file {} is not a valid credential list: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
