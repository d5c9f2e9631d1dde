//! # ragstage-pdf: PDF Loader Plugin
//!
//! This crate provides the page loader for PDF documents, acting as a plugin
//! for the `ragstage` ecosystem. It implements the `Loader` trait from the
//! core `ragstage` library, yielding one page record per PDF page. Extracted
//! text is always run through the core normalizer before it reaches the
//! pipeline, so downstream splitting sees clean content.

use async_trait::async_trait;
use pdf::file::FileOptions;
use ragstage::{
    loader::{Loader, LoaderError},
    normalize::clean_string,
    PageRecord,
};
use serde_json::{json, Map};
use thiserror::Error;
use tracing::{info, instrument, warn};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum PdfLoadError {
    #[error("Failed to read PDF file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to fetch PDF from URL: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
    #[error("No text could be extracted from: {0}")]
    Empty(String),
}

impl From<PdfLoadError> for LoaderError {
    fn from(err: PdfLoadError) -> Self {
        match err {
            PdfLoadError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                LoaderError::SourceNotFound(e.to_string())
            }
            PdfLoadError::Io(e) => LoaderError::Fetch(e.to_string()),
            PdfLoadError::Fetch(e) => LoaderError::Fetch(e.to_string()),
            PdfLoadError::PdfParse(s) => LoaderError::Parse(s),
            PdfLoadError::Empty(s) => LoaderError::NoData(s),
        }
    }
}

// --- Text Extraction ---

/// Extracts the text of every page of a PDF, in page order.
fn extract_page_texts(pdf_data: &[u8]) -> Result<Vec<String>, PdfLoadError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| PdfLoadError::PdfParse(e.to_string()))?;
    let resolver = file.resolver();
    let mut pages = Vec::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| PdfLoadError::PdfParse(e.to_string()))?;

        let mut page_text = String::new();
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| PdfLoadError::PdfParse(e.to_string()))?;
            for op in operations.iter() {
                match op {
                    pdf::content::Op::TextDraw { text } => {
                        page_text.push_str(&text.to_string_lossy());
                    }
                    pdf::content::Op::TextDrawAdjusted { array } => {
                        for item in array.iter() {
                            if let pdf::content::TextDrawAdjusted::Text(text) = item {
                                page_text.push_str(&text.to_string_lossy());
                            }
                        }
                    }
                    _ => {}
                }
            }
        } else {
            warn!("Page {page_num} has no content stream.");
        }
        pages.push(page_text);
    }
    Ok(pages)
}

// --- Loader Implementation ---

/// Loads a PDF from a local path or an `http(s)` URL.
///
/// Each PDF page becomes one `PageRecord` with metadata `{"url": source,
/// "page": n}`. Pages with no extractable text are skipped; a document with
/// no extractable text at all fails with `NoData`.
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }

    async fn read_source(&self, source: &str) -> Result<Vec<u8>, PdfLoadError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            info!("Fetching PDF from: {source}");
            let response = reqwest::get(source).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        } else {
            Ok(tokio::fs::read(source).await?)
        }
    }
}

#[async_trait]
impl Loader for PdfLoader {
    #[instrument(skip(self))]
    async fn load(&self, source: &str) -> Result<Vec<PageRecord>, LoaderError> {
        let pdf_data = self.read_source(source).await.map_err(LoaderError::from)?;
        let page_texts = extract_page_texts(&pdf_data).map_err(LoaderError::from)?;

        let mut records = Vec::new();
        for (page_no, raw) in page_texts.iter().enumerate() {
            let content = clean_string(raw);
            if content.is_empty() {
                continue;
            }
            let mut metadata = Map::new();
            metadata.insert("url".to_string(), json!(source));
            metadata.insert("page".to_string(), json!(page_no));
            records.push(PageRecord::new(content, metadata));
        }

        if records.is_empty() {
            return Err(PdfLoadError::Empty(source.to_string()).into());
        }
        info!(
            "Extracted {} pages with text from '{source}'",
            records.len()
        );
        Ok(records)
    }
}
