mod raw;

pub use raw::RawFileSource;

use thiserror::Error;

/// Incremental byte supplier feeding a stream decoder.
///
/// Implementations yield chunks in arrival order and `None` when the
/// source is exhausted; chunk boundaries carry no meaning.
pub trait ByteSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
