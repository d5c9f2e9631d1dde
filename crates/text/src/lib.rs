//! # `ragstage-text`: Raw Text Loader Plugin
//!
//! This crate provides the loader for raw text handed in directly, as a
//! self-contained plugin for the `ragstage` ecosystem. It implements the
//! `Loader` trait from the core `ragstage` library. Content arrives from
//! the caller rather than a file or network source, so it is passed through
//! to the pipeline untouched: callers supply text that is already in the
//! shape they want indexed.

use async_trait::async_trait;
use ragstage::{
    loader::{Loader, LoaderError},
    PageRecord,
};
use serde::Deserialize;
use serde_json::{json, Map};
use thiserror::Error;
use tracing::debug;

/// Custom error types for the text loading process.
#[derive(Error, Debug)]
pub enum TextLoadError {
    #[error("Text content is empty or only whitespace")]
    EmptyContent,
    #[error("Source deserialization failed: {0}")]
    SourceDeserialization(#[from] serde_json::Error),
}

/// A helper to convert the specific `TextLoadError` into the generic
/// `ragstage::loader::LoaderError`.
impl From<TextLoadError> for LoaderError {
    fn from(err: TextLoadError) -> Self {
        match err {
            TextLoadError::EmptyContent => {
                LoaderError::NoData("Text content is empty or only whitespace".to_string())
            }
            TextLoadError::SourceDeserialization(e) => {
                LoaderError::Parse(format!("Invalid source JSON for text loading: {e}"))
            }
        }
    }
}

/// Defines the structure of the JSON string passed to the `load` method.
#[derive(Deserialize)]
struct TextSource {
    text: String,
    source: String,
}

/// The `Loader` implementation for raw text.
#[derive(Debug, Clone, Default)]
pub struct TextLoader;

impl TextLoader {
    /// Creates a new `TextLoader`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Loader for TextLoader {
    /// Loads a block of raw text as a single page.
    ///
    /// The `source` argument is expected to be a JSON string with `text` and
    /// `source` keys, for example:
    /// `{"text": "This is the content.", "source": "manual_input"}`.
    async fn load(&self, source: &str) -> Result<Vec<PageRecord>, LoaderError> {
        let text_source: TextSource =
            serde_json::from_str(source).map_err(TextLoadError::from)?;
        if text_source.text.trim().is_empty() {
            return Err(TextLoadError::EmptyContent.into());
        }

        debug!(
            "Loaded {} characters of raw text for '{}'",
            text_source.text.chars().count(),
            text_source.source
        );

        let mut metadata = Map::new();
        metadata.insert("url".to_string(), json!(text_source.source));
        Ok(vec![PageRecord::new(text_source.text, metadata)])
    }
}
