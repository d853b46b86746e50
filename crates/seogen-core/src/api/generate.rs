//! Content generation: `/generate-seo`.

use serde::Serialize;

use crate::api::{API_KEY_HEADER, ApiError, ApiResult, USER_AGENT};
use crate::credentials::CredentialStore;
use crate::notify::NotificationSink;

/// Notification shown when generation is attempted with no stored key.
pub const MISSING_KEY_NOTICE: &str = "Create an API key first";

/// Fixed text shown in the result region for any failed generation.
pub const GENERATION_FALLBACK: &str = "An error occurred";

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    title: &'a str,
    keywords: &'a str,
}

/// Client for the generation endpoint.
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Generates an SEO description for `title`/`keywords`.
    ///
    /// Requires a non-empty stored credential; without one the operation
    /// short-circuits with a notification and no request is issued.
    /// Inputs are sent verbatim, no trimming or length checks.
    ///
    /// The response body is read for `seo_description` regardless of
    /// status; a body without it is a parse error, which callers render
    /// as [`GENERATION_FALLBACK`].
    ///
    /// # Errors
    /// Returns an error on a missing credential, transport failure, or a
    /// body without `seo_description`.
    pub async fn generate(
        &self,
        store: &dyn CredentialStore,
        sink: &dyn NotificationSink,
        title: &str,
        keywords: &str,
    ) -> ApiResult<String> {
        let credential = match store.get() {
            Some(c) if !c.secret().is_empty() => c,
            _ => {
                sink.notify(MISSING_KEY_NOTICE);
                return Err(ApiError::precondition("no credential stored"));
            }
        };

        let response = self
            .http
            .post(format!("{}/generate-seo", self.base_url))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(API_KEY_HEADER, credential.secret())
            .json(&GenerationBody { title, keywords })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::transport(&e))?;

        body.get("seo_description")
            .and_then(|v| v.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| ApiError::parse("generation response has no seo_description"))
    }
}
