use async_trait::async_trait;
use ragstage::{
    loader::{Loader, LoaderError},
    store::{StoreError, VectorStore},
    PageRecord, PipelineOutput,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Mock Loader ---

/// A loader that serves pre-programmed pages and records each call.
///
/// It deliberately does not enforce the loader contract: with no pages
/// queued it returns an empty list rather than failing, so tests can
/// exercise the pipeline's own empty-source guard.
#[derive(Clone, Debug, Default)]
pub struct MockLoader {
    pages: Arc<Mutex<Vec<PageRecord>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a page with the given content and source url.
    pub fn add_page(&self, content: &str, url: &str) {
        let mut metadata = Map::new();
        metadata.insert("url".to_string(), json!(url));
        self.add_page_with_metadata(content, metadata);
    }

    /// Queues a page built from an explicit metadata map.
    pub fn add_page_with_metadata(&self, content: &str, metadata: Map<String, Value>) {
        let mut pages = self.pages.lock().unwrap();
        pages.push(PageRecord::new(content, metadata));
    }

    /// Retrieves the source references `load` was called with.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Loader for MockLoader {
    async fn load(&self, source: &str) -> Result<Vec<PageRecord>, LoaderError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(source.to_string());
        Ok(self.pages.lock().unwrap().clone())
    }
}

// --- In-Memory Vector Store ---

/// Reference [`VectorStore`] used in tests: keyed by id, last write wins,
/// insertion order preserved. Never allocates a second slot for an id it
/// already holds.
#[derive(Clone, Debug, Default)]
pub struct MemoryVectorStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    order: Vec<String>,
    slots: HashMap<String, (String, Map<String, Value>)>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct ids held.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The document currently stored under `id`, if any.
    pub fn get_document(&self, id: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.slots.get(id).map(|(doc, _)| doc.clone())
    }

    /// The metadata currently stored under `id`, if any.
    pub fn get_metadata(&self, id: &str) -> Option<Map<String, Value>> {
        let inner = self.inner.lock().unwrap();
        inner.slots.get(id).map(|(_, meta)| meta.clone())
    }

    /// All held ids, in first-insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.inner.lock().unwrap().order.clone()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert(&self, output: &PipelineOutput) -> Result<(), StoreError> {
        if output.documents.len() != output.ids.len()
            || output.ids.len() != output.metadatas.len()
        {
            return Err(StoreError::Rejected(
                "output sequences are not index-aligned".to_string(),
            ));
        }

        let mut inner = self.inner.lock().unwrap();
        for ((id, doc), meta) in output
            .ids
            .iter()
            .zip(&output.documents)
            .zip(&output.metadatas)
        {
            if !inner.slots.contains_key(id) {
                inner.order.push(id.clone());
            }
            inner.slots.insert(id.clone(), (doc.clone(), meta.clone()));
        }
        Ok(())
    }
}

// --- Test-Specific Helpers ---
#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::Result;
    use printpdf::{
        BuiltinFont, Layer, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextItem,
        TextMatrix, TextRenderingMode,
    };

    /// Generates a PDF with one page per entry of `page_texts`, compatible
    /// with printpdf v0.8.2.
    pub fn generate_test_pdf(page_texts: &[&str]) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new("Test PDF");

        let font_bytes = BuiltinFont::Helvetica.get_subset_font().bytes;
        let font = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
            .ok_or_else(|| anyhow::anyhow!("Failed to parse built-in font"))?;
        let font_id = doc.add_font(&font);

        for text in page_texts {
            let mut page = PdfPage::new(Mm(210.0), Mm(297.0), vec![]);
            let layer_id = doc.add_layer(&Layer::new("Layer 1"));

            page.ops = vec![
                Op::BeginLayer {
                    layer_id: layer_id.clone(),
                },
                Op::SetFontSize {
                    size: Pt(12.0),
                    font: font_id.clone(),
                },
                Op::StartTextSection,
                Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Mm(10.0).into(), Mm(280.0).into()),
                },
                Op::SetTextRenderingMode {
                    mode: TextRenderingMode::Fill,
                },
                Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: font_id.clone(),
                },
                Op::EndTextSection,
                Op::EndLayer { layer_id },
            ];
            doc.pages.push(page);
        }

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            eprintln!("PDF generation warnings: {warnings:?}");
        }

        Ok(bytes)
    }
}
