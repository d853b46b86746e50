//! HTTP clients for the SEOGEN API.
//!
//! One client struct per endpoint family, all sharing the error taxonomy
//! and base-URL resolution below. No retries and no client-side timeouts;
//! transport defaults apply.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;

pub mod auth;
pub mod generate;
pub mod keys;

/// Standard User-Agent header for SEOGEN API requests.
pub const USER_AGENT: &str = concat!("seogen/", env!("CARGO_PKG_VERSION"));

/// Header carrying the stored credential on authenticated endpoints.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Default API base URL (the backend's development server).
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolves the API base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if the resolved value is not a well-formed URL.
pub fn resolve_base_url(config_base_url: Option<&str>) -> Result<String> {
    // Try env var first
    if let Ok(env_url) = std::env::var("SEOGEN_BASE_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    // Try config value
    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    // Default
    Ok(DEFAULT_BASE_URL.to_string())
}

/// Validates that a URL is well-formed.
pub fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(())
}

/// Categories of API client errors, mirroring how failures are shown to
/// the user: precondition failures never reach the network, transport
/// failures are the call itself throwing, the rest are server-reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Failed a local check before any request was issued.
    Precondition,
    /// Connection-level failure while issuing or awaiting the request.
    Transport,
    /// HTTP status error (non-2xx).
    HttpStatus,
    /// Response arrived but its body did not have the expected shape.
    Parse,
    /// The local credential slot could not be persisted.
    Storage,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiErrorKind::Precondition => "precondition",
            ApiErrorKind::Transport => "transport",
            ApiErrorKind::HttpStatus => "http_status",
            ApiErrorKind::Parse => "parse",
            ApiErrorKind::Storage => "storage",
        };
        write!(f, "{label}")
    }
}

/// Structured error from an API client with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a precondition error (no request was issued).
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Precondition, message)
    }

    /// Creates a transport error from a reqwest failure.
    pub fn transport(source: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Transport, source.to_string())
    }

    /// Creates an HTTP status error, carrying the raw body as details.
    pub fn http_status(status: reqwest::StatusCode, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Creates a parse error for a response with an unexpected shape.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    /// Creates a storage error for a failed credential write.
    pub fn storage(source: &anyhow::Error) -> Self {
        Self::new(ApiErrorKind::Storage, format!("{source:#}"))
    }

    /// Returns the error category.
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns additional detail, if any (e.g. the raw error body).
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API client operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Probes `GET /health` and returns the server's status line.
///
/// # Errors
/// Returns an error if the request fails or the body is not the expected
/// shape.
pub async fn health(base_url: &str) -> ApiResult<String> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{base_url}/health"))
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| ApiError::transport(&e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::http_status(status, &body));
    }

    let health: HealthResponse = response
        .json()
        .await
        .map_err(|_| ApiError::parse("health response is not valid JSON"))?;

    Ok(health.message.unwrap_or(health.status))
}
