//! Size-bounded text splitting.

use dyn_clone::DynClone;
use tracing::warn;

use crate::errors::ChunkError;
use crate::types::ChunkerConfig;

/// The splitting capability the pipeline consumes.
///
/// Implementations may use any boundary-aware strategy as long as the
/// contract holds: every returned chunk stays within the configured size
/// bound under the configured length metric, consecutive chunks share up to
/// the configured overlap, the chunks cover the whole input, and non-empty
/// input yields a non-empty sequence. Empty or whitespace-only input yields
/// an empty sequence.
pub trait TextSplitter: DynClone + Send + Sync {
    /// Splits `text` into an ordered sequence of bounded-size chunks.
    fn split(&self, text: &str) -> Vec<String>;
}

dyn_clone::clone_trait_object!(TextSplitter);

/// The default splitter: paragraph-first, with a character-windowed fallback
/// for paragraphs that exceed the size bound.
///
/// Paragraphs (`"\n\n"`-separated) small enough to fit become chunks as-is,
/// preserving semantic boundaries. Oversized paragraphs are cut into
/// windows grown until the configured length function reports the bound
/// reached, each window starting `chunk_overlap` characters before the
/// previous one ended.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    config: ChunkerConfig,
}

impl RecursiveCharacterSplitter {
    /// Creates a splitter, validating the configuration.
    pub fn new(config: ChunkerConfig) -> Result<Self, ChunkError> {
        if config.chunk_size == 0 {
            return Err(ChunkError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(ChunkError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Cuts an oversized paragraph into overlapping windows. Each window is
    /// grown character by character until the length function reports the
    /// bound reached, so the size guarantee holds for any metric, not just
    /// character counts.
    fn split_oversized(&self, text: &str) -> Vec<String> {
        let ChunkerConfig {
            chunk_size,
            chunk_overlap,
            length_function,
        } = self.config;

        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < chars.len() {
            let mut end = start;
            let mut piece = String::new();
            while end < chars.len() {
                piece.push(chars[end]);
                if length_function(&piece) > chunk_size {
                    piece.pop();
                    break;
                }
                end += 1;
            }
            if piece.is_empty() {
                // A single character measuring over the bound; emit it alone
                // rather than loop forever.
                piece.push(chars[start]);
                end = start + 1;
            }
            chunks.push(piece);

            if end >= chars.len() {
                break;
            }
            // The next window starts `chunk_overlap` characters before this
            // one ended, carrying shared context across the cut.
            let next_start = end.saturating_sub(chunk_overlap);
            start = if next_start > start { next_start } else { end };
        }

        chunks
    }
}

impl Default for RecursiveCharacterSplitter {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let ChunkerConfig {
            chunk_size,
            length_function,
            ..
        } = self.config;

        let mut chunks = Vec::new();
        for paragraph in text.split("\n\n") {
            let p = paragraph.trim();
            if p.is_empty() {
                continue;
            }
            if length_function(p) <= chunk_size {
                chunks.push(p.to_string());
            } else {
                warn!(
                    "Paragraph exceeds chunk size limit ({} > {}). Splitting by window.",
                    length_function(p),
                    chunk_size
                );
                chunks.extend(self.split_oversized(p));
            }
        }
        chunks
    }
}
