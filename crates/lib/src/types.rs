use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ChunkError;
use crate::splitter::{RecursiveCharacterSplitter, TextSplitter};

/// Default target size for a single chunk, in length-function units.
pub const DEFAULT_CHUNK_SIZE: usize = 200;

/// Default overlap carried between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 56;

/// Measures the size of a piece of text for chunk bounding.
pub type LengthFn = fn(&str) -> usize;

/// The default length metric: Unicode scalar values, not bytes, so chunk
/// bounds stay stable across multi-byte text.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Configuration for the text splitter used by the chunking pipeline.
///
/// Immutable once constructed; supplied when the splitter is built. The
/// overlap must be strictly smaller than the chunk size, which is enforced
/// when a splitter or [`Chunker`] is built from this config.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    /// Upper bound for a chunk's size under `length_function`.
    pub chunk_size: usize,
    /// How much trailing content consecutive chunks share.
    pub chunk_overlap: usize,
    /// The size metric chunks are bounded by.
    pub length_function: LengthFn,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            length_function: char_count,
        }
    }
}

/// One page of content produced by a loader.
///
/// Ephemeral: owned by the `create_chunks` call that requested it and
/// discarded once its chunks are staged. The metadata map must contain a
/// `url` entry naming the source the page came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub content: String,
    pub metadata: Map<String, Value>,
}

impl PageRecord {
    pub fn new(content: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// The source identifier the loader recorded for this page, if present.
    pub fn url(&self) -> Option<&str> {
        self.metadata.get("url").and_then(Value::as_str)
    }
}

/// The staged triple a vector store consumes.
///
/// The three sequences are equal-length and index-aligned: `documents[i]`,
/// `ids[i]` and `metadatas[i]` describe the same chunk. Entries appear in
/// first-seen order across all pages, in the order the loader produced them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub documents: Vec<String>,
    pub ids: Vec<String>,
    pub metadatas: Vec<Map<String, Value>>,
}

impl PipelineOutput {
    /// Number of staged chunks.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when no chunks were staged.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Orchestrates loading, splitting, identity assignment and deduplication.
///
/// Stateless between invocations: each [`Chunker::create_chunks`] call owns
/// its page records, chunk texts and dedup set, and drops them when it
/// returns.
pub struct Chunker {
    pub(crate) splitter: Box<dyn TextSplitter>,
}

impl Chunker {
    /// A chunker with the default configuration: 200-unit chunks, 56-unit
    /// overlap, recursive character splitting measured in characters.
    pub fn with_defaults() -> Self {
        Self {
            splitter: Box::new(RecursiveCharacterSplitter::default()),
        }
    }
}

impl Clone for Chunker {
    fn clone(&self) -> Self {
        Self {
            splitter: dyn_clone::clone_box(&*self.splitter),
        }
    }
}

impl fmt::Debug for Chunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunker").finish_non_exhaustive()
    }
}

/// A builder for creating [`Chunker`] instances.
///
/// Either supply a [`ChunkerConfig`] to shape the default recursive
/// character splitter, or hand in a custom splitter. A configured splitter
/// takes precedence; `config` only shapes the default one.
#[derive(Default)]
pub struct ChunkerBuilder {
    config: Option<ChunkerConfig>,
    splitter: Option<Box<dyn TextSplitter>>,
}

impl ChunkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration for the default splitter.
    pub fn config(mut self, config: ChunkerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the splitting strategy entirely.
    pub fn splitter(mut self, splitter: Box<dyn TextSplitter>) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Builds the `Chunker`, validating the configuration.
    pub fn build(self) -> Result<Chunker, ChunkError> {
        let splitter = match self.splitter {
            Some(splitter) => splitter,
            None => {
                let config = self.config.unwrap_or_default();
                Box::new(RecursiveCharacterSplitter::new(config)?)
            }
        };
        Ok(Chunker { splitter })
    }
}
