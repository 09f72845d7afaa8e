//! Input manager: validates uploads and routes them to a decoder

use crate::error::{Result, SkillGapError};
use crate::input::file_detector::{extension_of, FileType, SUPPORTED_EXTENSIONS};
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    docx: DocxExtractor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            docx: DocxExtractor::new(),
        }
    }

    /// Read and decode a resume file from disk.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(SkillGapError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        // Reject by extension before touching the file contents
        self.detect_file_type(&filename)?;

        let bytes = fs::read(path).await?;
        let text = self.decode_bytes(&bytes, &filename)?;

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    /// Decode an in-memory upload. Checks the extension, then emptiness, then
    /// decodes.
    pub fn decode_bytes(&self, bytes: &[u8], filename: &str) -> Result<String> {
        let file_type = self.detect_file_type(filename)?;

        if bytes.is_empty() {
            return Err(SkillGapError::EmptyInput(format!("Empty file uploaded: {}", filename)));
        }

        info!("Extracting text from {} file: {}", file_type, filename);
        match file_type {
            FileType::Pdf => PdfExtractor.decode(bytes, filename),
            FileType::Docx => self.docx.decode(bytes, filename),
            FileType::Unknown => Err(self.unsupported(filename)),
        }
    }

    pub fn detect_file_type(&self, filename: &str) -> Result<FileType> {
        match FileType::from_filename(filename) {
            FileType::Unknown => Err(self.unsupported(filename)),
            file_type => Ok(file_type),
        }
    }

    fn unsupported(&self, filename: &str) -> SkillGapError {
        let extension = extension_of(filename);
        let shown = if extension.is_empty() { "(none)" } else { extension.as_str() };
        SkillGapError::UnsupportedFormat(format!(
            "{}. Allowed types: {}",
            shown,
            SUPPORTED_EXTENSIONS.join(", ")
        ))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_is_checked_first() {
        let manager = InputManager::new();
        let err = manager.decode_bytes(b"", "notes.txt").unwrap_err();

        assert!(err.is_client_error());
        match err {
            SkillGapError::UnsupportedFormat(message) => {
                assert!(message.starts_with("txt"));
                assert!(message.contains("pdf, docx, doc"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_upload_rejected() {
        let manager = InputManager::new();
        let err = manager.decode_bytes(b"", "resume.pdf").unwrap_err();
        assert!(matches!(err, SkillGapError::EmptyInput(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_missing_extension() {
        let manager = InputManager::new();
        let err = manager.decode_bytes(b"data", "resume").unwrap_err();
        assert!(matches!(err, SkillGapError::UnsupportedFormat(ref m) if m.starts_with("(none)")));
    }

    #[test]
    fn test_legacy_doc_routes_to_docx_decoder() {
        let manager = InputManager::new();
        let err = manager.decode_bytes(b"\xd0\xcf\x11\xe0 legacy", "resume.doc").unwrap_err();
        assert!(matches!(err, SkillGapError::DocxExtraction(_)));
    }
}
