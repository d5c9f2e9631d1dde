//! # ragstage
//!
//! This crate provides the chunking-and-deduplication pipeline that stages
//! documents for a vector index. A [`Loader`] plugin turns a source
//! reference into pages, page text is split into bounded-size chunks, every
//! chunk gets a content-addressed id, duplicates are suppressed, and the
//! resulting `(documents, ids, metadatas)` triple is handed to a
//! [`VectorStore`].

pub mod errors;
pub mod identity;
pub mod loader;
pub mod normalize;
pub mod splitter;
pub mod store;
pub mod types;

pub use errors::ChunkError;
pub use loader::{Loader, LoaderError};
pub use splitter::{RecursiveCharacterSplitter, TextSplitter};
pub use store::{StoreError, VectorStore};
pub use types::{Chunker, ChunkerBuilder, ChunkerConfig, PageRecord, PipelineOutput};

use std::collections::HashSet;

use tracing::{debug, info, instrument};

impl Chunker {
    /// Loads a source and stages its content as deduplicated chunks.
    ///
    /// Pages come back from the loader in order; each page's content is
    /// split, each chunk is assigned its content address, and chunks fold
    /// into the output in first-seen order. A chunk whose id was already
    /// staged in this invocation is silently dropped, so re-extracted pages
    /// and repeated boilerplate never reach the index twice. The dedup set
    /// lives and dies with this call.
    ///
    /// Fails with [`ChunkError::NoData`] when the loader yields no pages and
    /// [`ChunkError::MissingSourceIdentifier`] when a page's metadata lacks
    /// its `url` entry. Loader failures propagate unmodified. There are no
    /// retries and no partial output: if any page fails, the invocation
    /// fails.
    #[instrument(skip(self, loader))]
    pub async fn create_chunks(
        &self,
        loader: &dyn Loader,
        source: &str,
    ) -> Result<PipelineOutput, ChunkError> {
        let pages = loader.load(source).await?;
        if pages.is_empty() {
            return Err(ChunkError::NoData(source.to_string()));
        }
        info!(
            "[create_chunks] loaded {} pages from '{source}'",
            pages.len()
        );

        let mut output = PipelineOutput::default();
        let mut seen = HashSet::new();

        for (page_no, page) in pages.iter().enumerate() {
            let url = page
                .url()
                .ok_or(ChunkError::MissingSourceIdentifier { page: page_no })?;

            for chunk in self.get_chunks(&page.content) {
                let id = identity::chunk_id(&chunk, url);
                if !seen.insert(id.clone()) {
                    // First occurrence wins.
                    continue;
                }
                output.documents.push(chunk);
                output.ids.push(id);
                output.metadatas.push(page.metadata.clone());
            }
        }

        debug!(
            "[create_chunks] staged {} unique chunks from '{source}'",
            output.len()
        );
        Ok(output)
    }

    /// Splits content with the configured splitter, without staging it.
    pub fn get_chunks(&self, content: &str) -> Vec<String> {
        self.splitter.split(content)
    }
}
