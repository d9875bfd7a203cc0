//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{LineSource, PageLines, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF statement reader.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create an extractor with explicit settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config,
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for PdfExtractor {
    fn pages(&self) -> Result<Vec<PageLines>> {
        let mut texts = self.page_texts()?;
        if self.config.max_pages > 0 && texts.len() > self.config.max_pages {
            debug!("Reading {} of {} pages", self.config.max_pages, texts.len());
            texts.truncate(self.config.max_pages);
        }

        let total_len: usize = texts.iter().map(|t| t.trim().len()).sum();
        if total_len < self.config.min_text_length {
            warn!(
                "PDF yielded only {} characters of text; it may be a scanned document",
                total_len
            );
        }

        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, text)| PageLines::from_text(i as u32 + 1, text))
            .collect())
    }
}
