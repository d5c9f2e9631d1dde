//! # PDF Loader Integration Tests

use anyhow::Result;
use ragstage::{loader::LoaderError, normalize::clean_string, Chunker, Loader, VectorStore};
use ragstage_pdf::PdfLoader;
use ragstage_test_utils::{helpers::generate_test_pdf, MemoryVectorStore};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_pdf_loader_local_file() -> Result<()> {
    // --- Arrange ---
    let pdf_data = generate_test_pdf(&["The magic number is 42.", "An entirely different page."])?;
    let dir = tempfile::tempdir()?;
    let pdf_path = dir.path().join("test.pdf");
    std::fs::write(&pdf_path, &pdf_data)?;
    let source = pdf_path.to_str().expect("tempdir path is valid UTF-8");

    // --- Act ---
    let loader = PdfLoader::new();
    let pages = loader.load(source).await?;

    // --- Assert ---
    assert_eq!(pages.len(), 2);
    for (page_no, page) in pages.iter().enumerate() {
        assert!(!page.content.is_empty());
        // The loader hands over normalized content: re-normalizing must be
        // a no-op.
        assert_eq!(page.content, clean_string(&page.content));
        assert_eq!(page.url(), Some(source));
        assert_eq!(page.metadata.get("page"), Some(&json!(page_no)));
    }
    assert_ne!(pages[0].content, pages[1].content);
    Ok(())
}

#[tokio::test]
async fn test_pdf_loader_remote_url() -> Result<()> {
    // --- Arrange ---
    let pdf_data = generate_test_pdf(&["Served over HTTP."])?;
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(pdf_data)
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&mock_server)
        .await;
    let source = format!("{}/doc.pdf", mock_server.uri());

    // --- Act ---
    let loader = PdfLoader::new();
    let pages = loader.load(&source).await?;

    // --- Assert ---
    assert_eq!(pages.len(), 1);
    assert!(!pages[0].content.is_empty());
    assert_eq!(pages[0].url(), Some(source.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_pdf_loader_missing_file() {
    let loader = PdfLoader::new();
    let result = loader.load("/no/such/file.pdf").await;
    assert!(matches!(result, Err(LoaderError::SourceNotFound(_))));
}

#[tokio::test]
async fn test_pdf_loader_remote_server_error() -> Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let loader = PdfLoader::new();
    let result = loader
        .load(&format!("{}/gone.pdf", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(LoaderError::Fetch(_))));
    Ok(())
}

#[tokio::test]
async fn test_pdf_pipeline_dedups_identical_pages_and_upserts_once() -> Result<()> {
    // --- Arrange ---
    // Two byte-identical pages: whatever the extractor produces, both pages
    // normalize to the same content under the same url, so the pipeline
    // must stage each chunk exactly once.
    let pdf_data = generate_test_pdf(&["Repeated boilerplate.", "Repeated boilerplate."])?;
    let dir = tempfile::tempdir()?;
    let pdf_path = dir.path().join("dup.pdf");
    std::fs::write(&pdf_path, &pdf_data)?;
    let source = pdf_path.to_str().expect("tempdir path is valid UTF-8");

    let chunker = Chunker::with_defaults();
    let loader = PdfLoader::new();
    let store = MemoryVectorStore::new();

    // --- Act ---
    let output = chunker.create_chunks(&loader, source).await?;
    store.upsert(&output).await?;
    // Re-ingesting the same source must not grow the store.
    let again = chunker.create_chunks(&loader, source).await?;
    store.upsert(&again).await?;

    // --- Assert ---
    let mut ids = output.ids.clone();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), output.ids.len(), "ids must be unique");
    assert_eq!(output.ids, again.ids);
    assert_eq!(store.len(), output.len());
    Ok(())
}
