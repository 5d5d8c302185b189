//! PDF retrieval over HTTP.
//!
//! Resolves a URL to raw document bytes, validating the URL up front and the
//! declared content type after a successful response.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Url, header};
use tracing::debug;

use crate::config::FetcherConfig;
use crate::error::{FetchError, PipelineError};

/// A fetched document: raw bytes plus the content type the server declared.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Fetches PDF documents from URLs.
pub struct PdfFetcher {
    client: Client,
    config: FetcherConfig,
}

impl PdfFetcher {
    /// Create a fetcher with a request timeout from the configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Internal {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Fetch and validate a PDF from `url`.
    ///
    /// The status check runs before the content-type check, so a non-2xx
    /// response is always a network error regardless of its headers. An empty
    /// body is not rejected here; the extractor owns that check.
    pub async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme: {}", parsed.scheme()),
            });
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network {
                url: url.to_string(),
                detail: format!("unexpected HTTP status {status}"),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with(mime::APPLICATION_PDF.as_ref()) {
            return Err(FetchError::InvalidContentType {
                url: url.to_string(),
                content_type,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        debug!(url, bytes = bytes.len(), %content_type, "Fetched PDF");

        Ok(FetchedDocument {
            bytes,
            content_type,
        })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                detail: error.to_string(),
            }
        }
    }
}
