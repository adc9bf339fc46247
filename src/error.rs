use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Invalid URL: unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AnalyzerError {
    pub fn browser(message: impl ToString) -> Self {
        AnalyzerError::Browser(message.to_string())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            AnalyzerError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check output directory paths/permissions.",
            ),
            AnalyzerError::Browser(msg) => ErrorPayload::new(
                ErrorCategory::Browser,
                msg.to_string(),
                "Make sure Chrome/Chromium is installed (or set browser.executable) and the page is reachable.",
            ),
            AnalyzerError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Input,
                format!("Invalid URL: {e}"),
                "Pass an absolute URL (e.g., https://example.com).",
            ),
            AnalyzerError::UnsupportedScheme(scheme) => ErrorPayload::new(
                ErrorCategory::Input,
                format!("Invalid URL: unsupported scheme '{scheme}'"),
                "Only http:// and https:// pages can be analyzed.",
            ),
            AnalyzerError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the input is a report written by site-analyzer.",
            ),
            AnalyzerError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check the config file (viewports, limits, timings).",
            ),
            AnalyzerError::NotFound(path) => ErrorPayload::new(
                ErrorCategory::Input,
                format!("File not found: {path}"),
                "Pass the path of an existing frontend_report_*.json file.",
            ),
            AnalyzerError::Timeout(after) => ErrorPayload::new(
                ErrorCategory::Browser,
                format!("Timed out after {after:?}"),
                "Raise timings.navigation in the config or check connectivity.",
            ),
            AnalyzerError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for AnalyzerError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AnalyzerError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Browser,
    Io,
    Input,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
