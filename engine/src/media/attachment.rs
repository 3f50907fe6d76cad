// Loading photos and documents picked by the operator into inline attachments.
use std::path::Path;

use shared::models::Attachment;

use crate::config::settings::DEFAULT_MAX_ATTACHMENT_BYTES;
use crate::error::{EngineError, EngineResult};

pub const PDF_MIME: &str = "application/pdf";

/// Only images and PDF documents are accepted.
pub fn is_allowed_mime(mime: &str) -> bool {
    mime.starts_with("image/") || mime == PDF_MIME
}

/// MIME type from the leading bytes of the file.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: [(&[u8], &str); 5] = [
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"\x89PNG\r\n\x1A\n", "image/png"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", PDF_MIME),
    ];
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if is_bmp_header(bytes) {
        return Some("image/bmp");
    }
    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, mime)| *mime)
}

// "BM", file size, two zeroed reserved words, pixel offset and a known DIB header size.
fn is_bmp_header(bytes: &[u8]) -> bool {
    const DIB_HEADER_SIZES: [u32; 6] = [12, 40, 52, 56, 108, 124];
    if bytes.len() < 18 || !bytes.starts_with(b"BM") {
        return false;
    }
    let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    let file_size = word(2);
    let pixel_offset = word(10);
    bytes[6..10].iter().all(|b| *b == 0)
        && file_size >= 26
        && (14..file_size).contains(&pixel_offset)
        && DIB_HEADER_SIZES.contains(&word(14))
}

pub fn mime_from_extension(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        "pdf" => PDF_MIME,
        "txt" => "text/plain",
        "doc" => "application/msword",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

#[derive(Debug, Clone)]
pub struct AttachmentLoader {
    max_bytes: u64,
}

impl Default for AttachmentLoader {
    fn default() -> Self {
        AttachmentLoader::new(DEFAULT_MAX_ATTACHMENT_BYTES)
    }
}

impl AttachmentLoader {
    pub fn new(max_bytes: u64) -> Self {
        AttachmentLoader { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn check_size(&self, name: &str, len: u64) -> EngineResult<()> {
        if len > self.max_bytes {
            tracing::warn!(file = name, size = len, limit = self.max_bytes, "Attachment too large");
            return Err(EngineError::AttachmentError(format!(
                "'{}' tem {:.1} MB; o limite é {:.0} MB",
                name,
                len as f64 / (1024.0 * 1024.0),
                self.max_bytes as f64 / (1024.0 * 1024.0)
            )));
        }
        Ok(())
    }

    /// Validates bytes already read (for example by a file picker) and wraps
    /// them as an inline attachment.
    pub fn from_bytes(&self, name: &str, bytes: Vec<u8>) -> EngineResult<Attachment> {
        self.check_size(name, bytes.len() as u64)?;
        let mime = sniff_mime(&bytes)
            .or_else(|| mime_from_extension(name))
            .ok_or_else(|| EngineError::AttachmentError(format!("'{}': tipo de arquivo desconhecido", name)))?;
        if !is_allowed_mime(mime) {
            tracing::warn!(file = name, mime, "Attachment type not allowed");
            return Err(EngineError::AttachmentError(format!(
                "'{}' ({}) não é permitido; envie uma imagem ou um PDF",
                name, mime
            )));
        }
        tracing::debug!(file = name, mime, size = bytes.len(), "Attachment accepted");
        Ok(Attachment::inline(mime, bytes))
    }

    /// Reads `path` asynchronously. The size limit is checked before reading.
    pub async fn load(&self, path: &Path) -> EngineResult<Attachment> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let metadata = tokio::fs::metadata(path).await?;
        self.check_size(&name, metadata.len())?;
        let bytes = tokio::fs::read(path).await?;
        self.from_bytes(&name, bytes)
    }
}
