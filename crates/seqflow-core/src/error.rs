use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    // The default-value terminals never produce the variants below; only the
    // checked `try_*` terminals do.
    #[error("Sequence contains no matching element")]
    NoElements,

    #[error("Sequence contains more than one matching element")]
    MoreThanOne,

    #[error("Index {index} is out of range for a sequence of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
