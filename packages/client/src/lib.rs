#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Client for the headless user-account collection.
//!
//! Two operations are exposed, [`UserAccountsApi::list_users`] and
//! [`UserAccountsApi::create_user`]. Each makes exactly one request: no retries, no timeouts
//! and no idempotency key. Failures come back as a typed [`UserAccountsError`].

use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;
use user_admin_http::{Header, HttpClient, Request, Response, StatusCode};
use user_admin_logging::debug_or_trace;
use user_admin_models::{NewUserAccount, UserAccount, UserAccountPage, UserDraft};

pub use user_admin_http as http;

/// Path of the user-account collection, relative to the API origin.
pub const USER_ACCOUNTS_PATH: &str = "/o/headless-admin-user/v1.0/user-accounts";

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Transport(#[from] user_admin_http::Error),
    #[error("Unsuccessful: {status}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Error)]
pub enum UserAccountsError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error("Failed to encode request body: {0}")]
    Encode(serde_json::Error),
    #[error("Rejected by server ({status}): {message}")]
    Validation { status: StatusCode, message: String },
}

impl From<user_admin_http::Error> for UserAccountsError {
    fn from(value: user_admin_http::Error) -> Self {
        match value {
            user_admin_http::Error::Serialize(e) => Self::Encode(e),
            e => Self::Network(e.into()),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer(String),
}

impl Credentials {
    #[must_use]
    pub fn authorization(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

#[async_trait]
pub trait UserAccountsApi: Send + Sync {
    /// # Errors
    ///
    /// * [`UserAccountsError::Network`] if the request fails or the status is not 2xx
    /// * [`UserAccountsError::Decode`] if the body is not a user-account page
    async fn list_users(&self) -> Result<Vec<UserAccount>, UserAccountsError>;

    /// # Errors
    ///
    /// * [`UserAccountsError::Validation`] if the server rejects the payload with a 4xx
    /// * [`UserAccountsError::Network`] if the request fails or any other non-2xx status
    /// * [`UserAccountsError::Decode`] if the body is not a user account
    /// * [`UserAccountsError::Encode`] if the draft cannot be serialized
    async fn create_user(&self, draft: &UserDraft) -> Result<UserAccount, UserAccountsError>;
}

#[derive(Clone)]
pub struct UserAccountsClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for UserAccountsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccountsClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl UserAccountsClient {
    /// `base_url` is the API origin, e.g. `http://localhost:8080`. A trailing slash is ignored.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http,
            base_url,
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{USER_ACCOUNTS_PATH}", self.base_url)
    }

    fn authorize(&self, request: Request) -> Request {
        let request = request.header(Header::Accept.as_ref(), "application/json");

        match &self.credentials {
            Some(credentials) => {
                request.header(Header::Authorization.as_ref(), &credentials.authorization())
            }
            None => request,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, UserAccountsError> {
        let method = request.method;
        let url = request.url.clone();

        log::debug!("Sending {method} request to {url}");
        let response = self.http.execute(self.authorize(request)).await.map_err(|e| {
            log::error!("{method} {url} failed: {e:?}");
            e
        })?;

        debug_or_trace!(
            ("Received {method} {url} response status: {}", response.status()),
            (
                "Received {method} {url} response status: {} body: {}",
                response.status(),
                response.text()
            )
        );

        Ok(response)
    }
}

#[async_trait]
impl UserAccountsApi for UserAccountsClient {
    async fn list_users(&self) -> Result<Vec<UserAccount>, UserAccountsError> {
        let response = self.send(Request::get(self.url())).await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Failed to list user accounts: {status}");
            return Err(NetworkError::Status {
                status,
                body: response.text(),
            }
            .into());
        }

        let page: UserAccountPage = response.json()?;

        Ok(page.items)
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<UserAccount, UserAccountsError> {
        let body = NewUserAccount::from(draft);
        let request = Request::post(self.url()).json(&body)?;

        let response = self.send(request).await?;

        let status = response.status();
        if status.is_client_error() {
            let message = rejection_message(&response);
            log::warn!("User account rejected ({status}): {message}");
            return Err(UserAccountsError::Validation { status, message });
        }
        if !status.is_success() {
            log::error!("Failed to create user account: {status}");
            return Err(NetworkError::Status {
                status,
                body: response.text(),
            }
            .into());
        }

        let account: UserAccount = response.json()?;
        log::info!("Created user account id={}", account.id);

        Ok(account)
    }
}

/// Extracts a human readable reason from an error response. Prefers the problem `title`, then
/// `message`, then the raw body, then the status itself.
fn rejection_message(response: &Response) -> String {
    if let Ok(value) = response.json::<serde_json::Value>() {
        for key in ["title", "message"] {
            if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
                if !message.trim().is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let text = response.text();
    let text = text.trim();

    if text.is_empty() {
        response.status().to_string()
    } else {
        text.to_string()
    }
}
