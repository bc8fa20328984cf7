use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required alternative input was omitted, or parallel input
    /// sequences had mismatched lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation needed the embedding function but none is bound
    /// to the collection.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// The underlying record store failed; propagated unmodified.
    #[error("store error: {0}")]
    Store(String),

    /// The embedding function failed to produce a vector.
    #[error("embedding error: {0}")]
    Embedding(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(err.to_string())
    }
}
