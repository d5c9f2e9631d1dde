use async_trait::async_trait;
use thiserror::Error;

use crate::types::PageRecord;

/// A generic error type for all loader plugins.
///
/// Each plugin is responsible for mapping its specific errors (e.g., a PDF
/// parsing error or an HTTP failure) into these standardized variants. This
/// allows the core pipeline to handle loader failures in a uniform way.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The specified source could not be found: {0}")]
    SourceNotFound(String),

    #[error("Failed to fetch or read content from the source: {0}")]
    Fetch(String),

    #[error("Failed to parse the content from the source: {0}")]
    Parse(String),

    #[error("The source yielded no pages: {0}")]
    NoData(String),

    #[error("An unexpected internal error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

/// The contract for a document loader plugin.
///
/// Any crate that provides a new data source (PDF files, raw text, remote
/// URLs) implements this trait. The pipeline treats all sources
/// polymorphically through it, which keeps the system modular and
/// extensible.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Turns a source reference into an ordered sequence of pages.
    ///
    /// The `source` argument is opaque to the pipeline: a file path, a URL,
    /// or a loader-specific token. Implementations must fail with
    /// [`LoaderError::NoData`] rather than return an empty page list, and
    /// every returned page's metadata must carry a `url` entry identifying
    /// where the content came from.
    ///
    /// Whether content is normalized before it is returned is the loader's
    /// decision: sources with messy extraction (PDF) normalize, sources
    /// whose callers hand over clean text do not.
    async fn load(&self, source: &str) -> Result<Vec<PageRecord>, LoaderError>;
}
