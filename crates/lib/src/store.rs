//! The vector store facade the pipeline output is handed to.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::PipelineOutput;

/// Errors surfaced by a vector store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to reach the vector store: {0}")]
    Connection(String),

    #[error("The store rejected the upsert: {0}")]
    Rejected(String),

    #[error("An unexpected internal error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

/// The persistence seam for staged chunks.
///
/// Implementations own their connection and collection lifecycle entirely;
/// the pipeline only needs them to accept the triple shape of
/// [`PipelineOutput`]. `upsert` is keyed by `output.ids`: re-upserting an id
/// the store already holds must replace that entry (last-write-wins is
/// acceptable) rather than occupy a second storage slot.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn upsert(&self, output: &PipelineOutput) -> Result<(), StoreError>;
}
