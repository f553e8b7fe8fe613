//! Documents downloaded from the mock server and sent as inline data.

use super::mock_server::{text_response, MockServerFixture};
use base64::Engine;
use genai_tools::documents::DocumentError;
use genai_tools::{DocumentSource, Error};
use mockito::Matcher;

const PDF: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF";

#[tokio::test]
async fn test_url_document_sent_inline_before_prompt() {
    let mut fixture = MockServerFixture::new().await;
    let file = fixture
        .mock_file("/papers/report.pdf", 200, "application/pdf", PDF)
        .await;
    let encoded = base64::engine::general_purpose::STANDARD.encode(PDF);
    let generate = fixture
        .mock_generate_matching(
            Matcher::AllOf(vec![
                Matcher::Regex(regex::escape(&format!(
                    r#""inlineData":{{"mimeType":"application/pdf","data":"{}"}}"#,
                    encoded
                ))),
                Matcher::Regex(r#""text":"Summarize this document.""#.to_string()),
            ]),
            text_response("A short report."),
        )
        .await;

    let source = DocumentSource::url(format!("{}/papers/report.pdf", fixture.base_url));
    let response = fixture
        .client()
        .generate_with_documents(&[source], "Summarize this document.")
        .await
        .unwrap();

    assert_eq!(response.text.as_deref(), Some("A short report."));
    file.assert_async().await;
    generate.assert_async().await;
}

#[tokio::test]
async fn test_url_document_http_error() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .mock_file("/missing.pdf", 404, "text/plain", b"not found")
        .await;

    let source = DocumentSource::url(format!("{}/missing.pdf", fixture.base_url));
    let err = fixture
        .client()
        .generate_with_documents(&[source], "Summarize this document.")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Document(DocumentError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_empty_download_rejected() {
    let mut fixture = MockServerFixture::new().await;
    fixture
        .mock_file("/empty.pdf", 200, "application/pdf", b"")
        .await;

    let source = DocumentSource::url(format!("{}/empty.pdf", fixture.base_url));
    let err = source.load(fixture.client().transport()).await.unwrap_err();
    assert!(matches!(err, Error::Document(DocumentError::Empty(_))));
}
