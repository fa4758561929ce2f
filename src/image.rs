//! Image selection and data-URL encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::info;

use crate::client::AnalysisClient;
use crate::error::ImageError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type inferred from a file extension.
pub fn mime_for_path(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a data-URL into its MIME type and base64 payload.
pub fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    Some((mime, payload))
}

/// An image ready to send, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub source: String,
    pub data_url: String,
}

impl SelectedImage {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| ImageError::Read {
            path: source.clone(),
            source: e,
        })?;
        if bytes.is_empty() {
            return Err(ImageError::Empty(source));
        }

        let data_url = encode_data_url(mime_for_path(&source), &bytes);
        Ok(Self { source, data_url })
    }

    /// Download a sample image. The response `content-type` wins over the
    /// URL's extension when it names an image.
    pub async fn from_sample_url(client: &AnalysisClient, url: &str) -> Result<Self, ImageError> {
        let (bytes, content_type) = client.fetch_bytes(url).await?;
        if bytes.is_empty() {
            return Err(ImageError::Empty(url.to_string()));
        }

        let header_mime = content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .filter(|ct| ct.starts_with("image/"));
        let data_url = match header_mime {
            Some(mime) => encode_data_url(mime, &bytes),
            None => encode_data_url(mime_for_path(url), &bytes),
        };

        Ok(Self {
            source: url.to_string(),
            data_url,
        })
    }
}

/// The single "currently selected image". A new selection replaces the old.
#[derive(Debug, Default)]
pub struct ImageSelection {
    current: Option<SelectedImage>,
}

impl ImageSelection {
    pub fn current(&self) -> Option<&SelectedImage> {
        self.current.as_ref()
    }

    /// Store `image`, returning whatever it replaced.
    pub fn select(&mut self, image: SelectedImage) -> Option<SelectedImage> {
        info!(source = %image.source, "image selected");
        self.current.replace(image)
    }

    pub fn clear(&mut self) -> Option<SelectedImage> {
        self.current.take()
    }
}
