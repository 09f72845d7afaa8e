//! Text extraction from uploaded document bytes

use crate::error::{Result, SkillGapError};
use regex::Regex;
use std::io::{Cursor, Read};

pub trait TextExtractor {
    /// Decode raw file bytes into plain text. `name` is only used in messages.
    fn decode(&self, bytes: &[u8], name: &str) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn decode(&self, bytes: &[u8], name: &str) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            SkillGapError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", name, e))
        })?;
        Ok(text.trim().to_string())
    }
}

/// Reads `word/document.xml` out of the DOCX zip package.
pub struct DocxExtractor {
    tag_regex: Regex,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

const DOCUMENT_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    fn decode(&self, bytes: &[u8], name: &str) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            SkillGapError::DocxExtraction(format!("'{}' is not a valid DOCX package: {}", name, e))
        })?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| {
                SkillGapError::DocxExtraction(format!("'{}' has no {}: {}", name, DOCUMENT_PART, e))
            })?
            .read_to_string(&mut xml)
            .map_err(|e| SkillGapError::DocxExtraction(format!("Failed to read '{}': {}", name, e)))?;

        Ok(self.xml_to_text(&xml))
    }
}

impl DocxExtractor {
    pub fn new() -> Self {
        let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid XML tag regex");
        Self { tag_regex }
    }

    /// Paragraphs and breaks become newlines, table cells are space separated.
    fn xml_to_text(&self, xml: &str) -> String {
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:p/>", "\n")
            .replace("<w:br/>", "\n")
            .replace("<w:br />", "\n")
            .replace("<w:tab/>", "\t")
            .replace("</w:tc>", " ")
            .replace("</w:tr>", "\n");

        let stripped = self.tag_regex.replace_all(&text, "");

        let unescaped = stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = unescaped.lines().map(str::trim_end).collect();
        lines.join("\n").trim().to_string()
    }
}
