use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Main pipeline error type. One variant family per stage, plus a catch-all
/// for failures outside the pipeline taxonomy.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Formatting(#[from] FormattingError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors raised while retrieving a PDF from its URL.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid PDF URL")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch PDF")]
    Network { url: String, detail: String },

    #[error("PDF fetch operation timed out")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Invalid content type")]
    InvalidContentType { url: String, content_type: String },
}

/// Errors raised by the text-extraction tool invocation.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Extraction tool not found")]
    ToolNotFound { tool: String },

    #[error("Text extraction timed out")]
    Timeout { timeout_secs: u64 },

    #[error("Empty PDF data")]
    EmptyDocument,

    #[error("Text extraction failed")]
    Failed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Extraction I/O error")]
    Io(#[source] std::io::Error),
}

/// Errors raised while splitting extracted text into lines.
#[derive(Error, Debug)]
pub enum FormattingError {
    #[error("Empty text input")]
    EmptyText { text: String },

    #[error("No non-empty lines found in text")]
    NoLines { text: String, line_count: usize },
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::Fetch(
                FetchError::InvalidUrl { .. }
                | FetchError::Network { .. }
                | FetchError::InvalidContentType { .. },
            ) => StatusCode::BAD_REQUEST,
            PipelineError::Fetch(FetchError::Timeout { .. })
            | PipelineError::Extraction(ExtractionError::Timeout { .. }) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::Fetch(FetchError::InvalidUrl { .. }) => "PDF_INVALID_URL_ERROR",
            PipelineError::Fetch(FetchError::Network { .. }) => "PDF_NETWORK_ERROR",
            PipelineError::Fetch(FetchError::Timeout { .. }) => "PDF_TIMEOUT_ERROR",
            PipelineError::Fetch(FetchError::InvalidContentType { .. }) => {
                "PDF_INVALID_CONTENT_TYPE_ERROR"
            }
            PipelineError::Extraction(ExtractionError::ToolNotFound { .. }) => {
                "OCR_TOOL_NOT_FOUND_ERROR"
            }
            PipelineError::Extraction(ExtractionError::Timeout { .. }) => "OCR_TIMEOUT_ERROR",
            PipelineError::Extraction(ExtractionError::EmptyDocument) => "OCR_EXTRACTION_ERROR",
            PipelineError::Extraction(ExtractionError::Failed { .. }) => "OCR_EXTRACTION_ERROR",
            PipelineError::Extraction(ExtractionError::Io(_)) => "INTERNAL_SERVER_ERROR",
            PipelineError::Formatting(FormattingError::EmptyText { .. }) => "EMPTY_TEXT_ERROR",
            PipelineError::Formatting(FormattingError::NoLines { .. }) => "TEXT_PARSING_ERROR",
            PipelineError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Structured diagnostic context for the error body. Tool and transport
    /// diagnostics belong here, never in the message.
    pub fn details(&self) -> Option<serde_json::Value> {
        let details = match self {
            PipelineError::Fetch(FetchError::InvalidUrl { url, reason }) => {
                json!({ "url": url, "error": reason })
            }
            PipelineError::Fetch(FetchError::Network { url, detail }) => {
                json!({ "url": url, "error": detail })
            }
            PipelineError::Fetch(FetchError::Timeout { url, timeout_secs }) => {
                json!({ "url": url, "timeout": timeout_secs })
            }
            PipelineError::Fetch(FetchError::InvalidContentType { url, content_type }) => json!({
                "url": url,
                "content_type": content_type,
                "expected": mime::APPLICATION_PDF.as_ref(),
            }),
            PipelineError::Extraction(ExtractionError::ToolNotFound { tool }) => {
                json!({ "tool": tool })
            }
            PipelineError::Extraction(ExtractionError::Timeout { timeout_secs }) => {
                json!({ "timeout": timeout_secs })
            }
            PipelineError::Extraction(ExtractionError::EmptyDocument) => {
                json!({ "pdf_data_length": 0 })
            }
            PipelineError::Extraction(ExtractionError::Failed {
                command,
                exit_code,
                stderr,
            }) => json!({
                "command": command,
                "return_code": exit_code,
                "stderr": stderr,
            }),
            PipelineError::Extraction(ExtractionError::Io(e)) => json!({ "error": e.to_string() }),
            PipelineError::Formatting(FormattingError::EmptyText { text }) => {
                json!({ "text": text })
            }
            PipelineError::Formatting(FormattingError::NoLines { text, line_count }) => {
                json!({ "text": text, "line_count": line_count })
            }
            PipelineError::Internal { message } => json!({ "error": message }),
        };

        Some(details)
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let response = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        };

        (status, Json(response)).into_response()
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn cases() -> Vec<(PipelineError, StatusCode, &'static str)> {
        vec![
            (
                PipelineError::Fetch(FetchError::InvalidUrl {
                    url: "not-a-valid-url".into(),
                    reason: "relative URL without a base".into(),
                }),
                StatusCode::BAD_REQUEST,
                "PDF_INVALID_URL_ERROR",
            ),
            (
                PipelineError::Fetch(FetchError::InvalidContentType {
                    url: "http://example.com/doc.pdf".into(),
                    content_type: "text/plain".into(),
                }),
                StatusCode::BAD_REQUEST,
                "PDF_INVALID_CONTENT_TYPE_ERROR",
            ),
            (
                PipelineError::Fetch(FetchError::Network {
                    url: "http://example.com/doc.pdf".into(),
                    detail: "connection refused".into(),
                }),
                StatusCode::BAD_REQUEST,
                "PDF_NETWORK_ERROR",
            ),
            (
                PipelineError::Fetch(FetchError::Timeout {
                    url: "http://example.com/doc.pdf".into(),
                    timeout_secs: 10,
                }),
                StatusCode::GATEWAY_TIMEOUT,
                "PDF_TIMEOUT_ERROR",
            ),
            (
                PipelineError::Extraction(ExtractionError::Timeout { timeout_secs: 30 }),
                StatusCode::GATEWAY_TIMEOUT,
                "OCR_TIMEOUT_ERROR",
            ),
            (
                PipelineError::Extraction(ExtractionError::ToolNotFound {
                    tool: "pdftotext".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "OCR_TOOL_NOT_FOUND_ERROR",
            ),
            (
                PipelineError::Extraction(ExtractionError::EmptyDocument),
                StatusCode::INTERNAL_SERVER_ERROR,
                "OCR_EXTRACTION_ERROR",
            ),
            (
                PipelineError::Extraction(ExtractionError::Failed {
                    command: "pdftotext -layout /tmp/x.pdf -".into(),
                    exit_code: Some(1),
                    stderr: "Syntax Error: not a PDF".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "OCR_EXTRACTION_ERROR",
            ),
            (
                PipelineError::Formatting(FormattingError::EmptyText { text: String::new() }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "EMPTY_TEXT_ERROR",
            ),
            (
                PipelineError::Formatting(FormattingError::NoLines {
                    text: "   \n\t\n   ".into(),
                    line_count: 3,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "TEXT_PARSING_ERROR",
            ),
            (
                PipelineError::Internal {
                    message: "unexpected".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        ]
    }

    #[test]
    fn status_and_code_mapping_is_stable() {
        for (error, status, code) in cases() {
            assert_eq!(error.status_code(), status, "status for {error:?}");
            assert_eq!(error.error_code(), code, "code for {error:?}");
        }
    }

    #[test]
    fn every_error_carries_details() {
        for (error, _, _) in cases() {
            assert!(error.details().is_some(), "details for {error:?}");
        }
    }

    #[test]
    fn tool_diagnostics_stay_out_of_the_message() {
        let error = PipelineError::Extraction(ExtractionError::Failed {
            command: "pdftotext -layout /tmp/x.pdf -".into(),
            exit_code: Some(1),
            stderr: "Syntax Error: couldn't read xref table".into(),
        });

        assert!(!error.to_string().contains("Syntax Error"));
        let details = error.details().unwrap();
        assert_eq!(details["return_code"], 1);
        assert_eq!(details["stderr"], "Syntax Error: couldn't read xref table");
    }

    #[test]
    fn error_body_has_code_message_details() {
        let error = PipelineError::Fetch(FetchError::InvalidUrl {
            url: "not-a-valid-url".into(),
            reason: "relative URL without a base".into(),
        });

        let body = ErrorResponse {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: error.details(),
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["code"], "PDF_INVALID_URL_ERROR");
        assert_eq!(value["message"], "Invalid PDF URL");
        assert_eq!(value["details"]["url"], "not-a-valid-url");
    }
}
