//! Text extraction via an external layout-preserving tool.
//!
//! The subprocess implementation writes the document to a transient file and
//! runs `pdftotext -layout <file> -` under a fixed time budget. The temp file
//! is removed on drop, so every exit path releases it.

use std::future::Future;
use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::fetcher::FetchedDocument;

/// Capability interface for turning PDF bytes into plain text. Lets the
/// subprocess-backed implementation be swapped for an in-process one without
/// touching the pipeline.
pub trait TextExtractor: Send + Sync {
    fn extract(
        &self,
        doc: &FetchedDocument,
    ) -> impl Future<Output = Result<String, ExtractionError>> + Send;
}

/// Extractor backed by the `pdftotext` command-line tool.
pub struct PdftotextExtractor {
    config: ExtractorConfig,
}

impl PdftotextExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }
}

impl TextExtractor for PdftotextExtractor {
    async fn extract(&self, doc: &FetchedDocument) -> Result<String, ExtractionError> {
        // Fast-path guard: never spawn the tool for an empty document.
        if doc.bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let mut temp_pdf = tempfile::Builder::new()
            .prefix("pdftext-")
            .suffix(".pdf")
            .tempfile()
            .map_err(ExtractionError::Io)?;
        temp_pdf.write_all(&doc.bytes).map_err(ExtractionError::Io)?;
        temp_pdf.flush().map_err(ExtractionError::Io)?;

        let command_line = format!(
            "{} -layout {} -",
            self.config.tool_path,
            temp_pdf.path().display()
        );

        let child = Command::new(&self.config.tool_path)
            .arg("-layout")
            .arg(temp_pdf.path())
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the child on timeout kills the tool.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ExtractionError::ToolNotFound {
                    tool: self.config.tool_path.clone(),
                },
                _ => ExtractionError::Io(e),
            })?;

        let budget = Duration::from_secs(self.config.timeout_secs);
        let output = match timeout(budget, child.wait_with_output()).await {
            Err(_) => {
                return Err(ExtractionError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
            Ok(Err(e)) => return Err(ExtractionError::Io(e)),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                command: command_line,
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout)
            .trim()
            .to_string();
        debug!(
            bytes = doc.bytes.len(),
            chars = text.len(),
            "Extracted text from PDF"
        );

        Ok(text)
    }
}
