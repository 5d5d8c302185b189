//! Static configuration loaded once at process start.
//! These settings affect server binding or the extraction toolchain and
//! require a restart to change.

use serde::Deserialize;

/// Static configuration loaded once at process start
#[derive(Debug, Clone, Deserialize)]
pub struct StaticConfig {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default = "default_fetcher")]
    pub fetcher: FetcherConfig,

    #[serde(default = "default_extractor")]
    pub extractor: ExtractorConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// PDF fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Timeout for the whole fetch of one document, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

/// Text-extraction tool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Name or path of the pdftotext binary. A bare name is resolved via PATH.
    #[serde(default = "default_tool_path")]
    pub tool_path: String,

    /// Time budget for one tool invocation, in seconds.
    #[serde(default = "default_extract_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        default_fetcher()
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        default_extractor()
    }
}

// ==================== Default Value Functions ====================

pub(crate) fn default_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
    }
}

pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8000
}

pub(crate) fn default_fetcher() -> FetcherConfig {
    FetcherConfig {
        timeout_secs: default_fetch_timeout_secs(),
    }
}

pub(crate) fn default_fetch_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_extractor() -> ExtractorConfig {
    ExtractorConfig {
        tool_path: default_tool_path(),
        timeout_secs: default_extract_timeout_secs(),
    }
}

pub(crate) fn default_tool_path() -> String {
    "pdftotext".to_string()
}

pub(crate) fn default_extract_timeout_secs() -> u64 {
    30
}
