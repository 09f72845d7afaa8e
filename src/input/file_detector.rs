//! File type detection

use std::fmt;
use std::path::Path;

/// Extensions accepted for resume uploads.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    /// Word documents; legacy `.doc` is attempted as a DOCX package
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" | "doc" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    /// Detect from the final extension of a file name or path.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Lowercased extension of `filename`, or an empty string when it has none.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}
