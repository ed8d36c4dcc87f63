//! Shared error and result types.

/// Errors raised by edge stores, the wire codec and store configuration.
#[derive(thiserror::Error, Debug)]
pub enum EdgeStoreError {
    /// I/O failure while moving serialized edges through a reader or writer.
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    /// Serialized edge data could not be decoded.
    #[error("decode: {0}")]
    Decode(String),
    /// A caller supplied an argument the store cannot accept.
    #[error("invalid argument: {0}")]
    Invalid(&'static str),
    /// The operation is disabled for this representation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    /// The requested id/value/representation combination is not supported.
    #[error("configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EdgeStoreError>;

impl EdgeStoreError {
    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        EdgeStoreError::Decode(msg.into())
    }
}
