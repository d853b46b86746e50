//! API-key provisioning: `/create-api-key`.
//!
//! The endpoint decides whether an existing key may be reused or a fresh
//! one is issued, so the request always carries whatever credential is
//! currently stored, even an empty one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::{API_KEY_HEADER, ApiError, ApiResult, USER_AGENT};
use crate::credentials::{Credential, CredentialStore};
use crate::notify::NotificationSink;

/// Notification shown when the request itself fails.
pub const PROVISIONING_FAILED: &str = "Failed to create an API key";

/// Billing tiers accepted by the key-issuance endpoint.
///
/// Quotas are enforced server-side; the client only names the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// 1000 requests.
    Basic,
    /// 10000 requests.
    Pro,
    /// Unlimited requests.
    Agency,
}

impl Plan {
    /// Returns all plans for iteration (e.g. in help output).
    pub fn all() -> &'static [Plan] {
        &[Plan::Basic, Plan::Pro, Plan::Agency]
    }

    /// Returns the wire identifier for this plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::Agency => "agency",
        }
    }

    /// Returns the monthly request quota; `None` means unlimited.
    pub fn request_quota(&self) -> Option<u32> {
        match self {
            Plan::Basic => Some(1000),
            Plan::Pro => Some(10_000),
            Plan::Agency => None,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "basic" => Ok(Plan::Basic),
            "pro" => Ok(Plan::Pro),
            "agency" => Ok(Plan::Agency),
            other => Err(format!(
                "Invalid plan '{other}'. Valid options: basic, pro, agency"
            )),
        }
    }
}

#[derive(Debug, Serialize)]
struct PlanBody {
    plan: Plan,
}

#[derive(Debug, Deserialize)]
struct KeyResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

/// Outcome of a provisioning call that completed an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Server-supplied message, already surfaced through the sink.
    pub message: Option<String>,
    /// Freshly issued key, already written to the store.
    pub api_key: Option<String>,
}

/// Client for the key-issuance endpoint.
pub struct KeyClient {
    http: reqwest::Client,
    base_url: String,
}

impl KeyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Requests a key for `plan`.
    ///
    /// On every completed exchange the body is parsed regardless of
    /// status: a `message` field is surfaced through `sink` exactly once,
    /// and an `api_key` field overwrites the store. A failure of the call
    /// itself notifies a generic provisioning error and leaves the store
    /// alone.
    ///
    /// # Errors
    /// Returns an error on transport failure, an unparseable body, or a
    /// failed store write.
    pub async fn create_key(
        &self,
        store: &dyn CredentialStore,
        sink: &dyn NotificationSink,
        plan: Plan,
    ) -> ApiResult<KeyOutcome> {
        // Attach whatever is stored; the server decides what it means.
        let credential = store.get().map(|c| c.secret().to_string()).unwrap_or_default();

        let response = self
            .http
            .post(format!("{}/create-api-key", self.base_url))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(API_KEY_HEADER, credential)
            .json(&PlanBody { plan })
            .send()
            .await
            .map_err(|e| {
                sink.notify(PROVISIONING_FAILED);
                ApiError::transport(&e)
            })?;

        let body = response.text().await.map_err(|e| {
            sink.notify(PROVISIONING_FAILED);
            ApiError::transport(&e)
        })?;

        let parsed: KeyResponse = serde_json::from_str(&body).map_err(|_| {
            sink.notify(PROVISIONING_FAILED);
            ApiError::parse("key-issuance response is not valid JSON")
        })?;

        if let Some(message) = &parsed.message {
            sink.notify(message);
        }

        if let Some(api_key) = &parsed.api_key {
            store
                .set(Credential::ApiKey(api_key.clone()))
                .map_err(|e| ApiError::storage(&e))?;
            tracing::debug!("api key stored");
        }

        Ok(KeyOutcome {
            message: parsed.message,
            api_key: parsed.api_key,
        })
    }
}
