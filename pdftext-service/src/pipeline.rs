//! Pipeline orchestration: fetch → extract → format.
//!
//! The pipeline performs no transformation of its own. It sequences the three
//! stages and forwards the first stage failure unmodified; classification is
//! owned entirely by the stage that raised it.

use tracing::info;

use crate::error::PipelineResult;
use crate::extractor::TextExtractor;
use crate::fetcher::PdfFetcher;
use crate::formatter;

/// Runs the three-stage extraction pipeline for a single request.
pub struct Pipeline<E> {
    fetcher: PdfFetcher,
    extractor: E,
}

impl<E: TextExtractor> Pipeline<E> {
    pub fn new(fetcher: PdfFetcher, extractor: E) -> Self {
        Self { fetcher, extractor }
    }

    /// Process one document URL into its non-empty text lines.
    pub async fn run(&self, url: &str) -> PipelineResult<Vec<String>> {
        let doc = self.fetcher.fetch(url).await?;
        let text = self.extractor.extract(&doc).await?;
        let lines = formatter::format_lines(&text)?;

        info!(url, lines = lines.len(), "Document processed");

        Ok(lines)
    }
}
