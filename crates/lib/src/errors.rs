use thiserror::Error;

use crate::loader::LoaderError;

/// Failure modes of a [`crate::Chunker::create_chunks`] invocation.
///
/// Chunking is all-or-nothing per source: any of these aborts the whole
/// invocation without producing a partial output. A duplicate chunk identity
/// is not an error and never appears here.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// The loader produced zero pages. There is nothing to stage for the
    /// index, so the invocation fails rather than returning an empty output.
    #[error("no data found for source: {0}")]
    NoData(String),

    /// A page's metadata lacks the `url` source identifier. Populating it is
    /// the loader's responsibility, so this indicates a loader bug rather
    /// than bad input data.
    #[error("page {page} metadata is missing the `url` source identifier")]
    MissingSourceIdentifier { page: usize },

    /// The chunker configuration is unusable, e.g. a zero chunk size or an
    /// overlap as large as the chunk size.
    #[error("invalid chunker configuration: {0}")]
    InvalidConfig(String),

    /// A failure raised by the loader capability, propagated unmodified.
    #[error(transparent)]
    Loader(#[from] LoaderError),
}
