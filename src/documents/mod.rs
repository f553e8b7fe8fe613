//! Documents passed to the model as inline data.
//!
//! A [`DocumentSource`] is resolved to raw bytes plus a MIME type, then
//! attached to a request with [`Document::to_part`].

use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::transport::HttpTransport;
use crate::types::Part;
use crate::Result;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const DEFAULT_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("document download failed: HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("document is empty: {0}")]
    Empty(String),
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Path(PathBuf),
    /// Google Drive file exported as PDF. The caller supplies an OAuth
    /// access token with Drive read scope.
    DriveExport {
        file_id: String,
        access_token: String,
    },
}

impl DocumentSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn drive_export(file_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::DriveExport {
            file_id: file_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Short label for logs and errors; never includes the access token.
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
            Self::DriveExport { file_id, .. } => format!("drive:{}", file_id),
        }
    }

    pub async fn load(&self, transport: &HttpTransport) -> Result<Document> {
        let document = match self {
            Self::Url(url) => {
                let fetched = transport.fetch_bytes(url, None).await?;
                if !fetched.status.is_success() {
                    return Err(DocumentError::HttpStatus {
                        url: url.clone(),
                        status: fetched.status.as_u16(),
                    }
                    .into());
                }
                let mime_type = fetched
                    .content_type
                    .filter(|ct| ct != "application/octet-stream")
                    .unwrap_or_else(|| mime_from_name(url).to_string());
                Document::new(fetched.bytes, mime_type)
            }
            Self::Path(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        crate::Error::from(DocumentError::NotFound(path.clone()))
                    } else {
                        crate::Error::Io(e)
                    }
                })?;
                Document::new(Bytes::from(bytes), mime_from_path(path))
            }
            Self::DriveExport {
                file_id,
                access_token,
            } => {
                let url = drive_export_url(file_id);
                let fetched = transport.fetch_bytes(&url, Some(access_token)).await?;
                if !fetched.status.is_success() {
                    return Err(DocumentError::HttpStatus {
                        url,
                        status: fetched.status.as_u16(),
                    }
                    .into());
                }
                Document::new(fetched.bytes, DEFAULT_MIME_TYPE)
            }
        };

        if document.bytes.is_empty() {
            return Err(DocumentError::Empty(self.describe()).into());
        }
        debug!(
            source = %self.describe(),
            mime_type = %document.mime_type,
            size = document.bytes.len(),
            "document loaded"
        );
        Ok(document)
    }
}

/// Loaded document bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl Document {
    pub fn new(bytes: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn pdf(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, DEFAULT_MIME_TYPE)
    }

    /// Base64 `inlineData` part.
    pub fn to_part(&self) -> Part {
        Part::inline_bytes(&self.bytes, self.mime_type.clone())
    }
}

pub fn drive_export_url(file_id: &str) -> String {
    format!(
        "{}/{}/export?mimeType={}",
        DRIVE_FILES_URL, file_id, DEFAULT_MIME_TYPE
    )
}

fn mime_from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map(mime_from_extension)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

fn mime_from_name(name: &str) -> &'static str {
    let name = name.split(['?', '#']).next().unwrap_or(name);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => mime_from_extension(ext),
        _ => DEFAULT_MIME_TYPE,
    }
}

fn mime_from_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "txt" => "text/plain",
        "md" => "text/md",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "xml" => "text/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => DEFAULT_MIME_TYPE,
    }
}
