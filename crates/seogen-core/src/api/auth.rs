//! Account endpoints: `/register` and `/login`.

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiResult, USER_AGENT};
use crate::credentials::{Credential, CredentialStore};

#[derive(Debug, Serialize)]
struct AccountBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the account endpoints.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates an account. Any 2xx status is success; the body is not
    /// inspected either way.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(format!("{}/register", self.base_url))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&AccountBody { email, password })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status, &body));
        }

        Ok(())
    }

    /// Signs in and stores the session token.
    ///
    /// The store is written only after the response is confirmed
    /// successful; on any failure it is left untouched.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, a body
    /// without a `token`, or a failed store write.
    pub async fn login(
        &self,
        store: &dyn CredentialStore,
        email: &str,
        password: &str,
    ) -> ApiResult<String> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&AccountBody { email, password })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status, &body));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|_| ApiError::parse("login response has no token"))?;

        store
            .set(Credential::Session(login.token.clone()))
            .map_err(|e| ApiError::storage(&e))?;

        tracing::debug!("session token stored");
        Ok(login.token)
    }
}
