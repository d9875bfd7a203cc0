//! Statement line extraction.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text lines of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLines {
    /// Page number (1-indexed).
    pub number: u32,
    /// Trimmed lines in reading order.
    pub lines: Vec<String>,
}

impl PageLines {
    /// Split page text into trimmed lines.
    pub fn from_text(number: u32, text: &str) -> Self {
        Self {
            number,
            lines: text.lines().map(|l| l.trim().to_string()).collect(),
        }
    }
}

/// A document that can supply its text lines page by page.
pub trait LineSource {
    /// Lines grouped by page, order preserved.
    fn pages(&self) -> Result<Vec<PageLines>>;

    /// All lines in page-then-line order.
    fn lines(&self) -> Result<Vec<String>> {
        Ok(self.pages()?.into_iter().flat_map(|p| p.lines).collect())
    }
}

/// Plain-text statement; pages are separated by form feeds.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    text: String,
}

impl PlainTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LineSource for PlainTextSource {
    fn pages(&self) -> Result<Vec<PageLines>> {
        Ok(self
            .text
            .split('\x0c')
            .enumerate()
            .map(|(i, page)| PageLines::from_text(i as u32 + 1, page))
            .collect())
    }
}
