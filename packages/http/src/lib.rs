#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Injectable HTTP transport.
//!
//! Callers depend on the object-safe [`HttpClient`] trait and receive a concrete backend at
//! construction time: [`reqwest::ReqwestClient`] for real network traffic, or
//! [`simulator::SimulatorClient`] for scripted responses in tests.

use std::{collections::BTreeMap, num::NonZeroU16};

use async_trait::async_trait;
use bytes::Bytes;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "simulator")]
pub mod simulator;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode")]
    Decode,

    #[cfg(feature = "json")]
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    Reqwest(#[from] ::reqwest::Error),

    #[cfg(feature = "simulator")]
    #[error("Simulated transport failure: {0}")]
    Simulated(String),

    #[cfg(feature = "simulator")]
    #[error("No simulated response queued for {method} {url}")]
    NoResponse { method: Method, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[derive(Debug, Clone, Copy, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Header {
    Accept,
    Authorization,
    ContentType,
    UserAgent,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode(NonZeroU16);

impl StatusCode {
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0.get()
    }

    /// Returns `None` for `0`, which is not a valid status.
    #[must_use]
    pub const fn from_u16(code: u16) -> Option<Self> {
        match NonZeroU16::new(code) {
            Some(code) => Some(Self(code)),
            None => None,
        }
    }
}

impl StatusCode {
    pub const OK: Self = Self(NonZeroU16::new(200).unwrap());
    pub const CREATED: Self = Self(NonZeroU16::new(201).unwrap());
    pub const BAD_REQUEST: Self = Self(NonZeroU16::new(400).unwrap());
    pub const UNAUTHORIZED: Self = Self(NonZeroU16::new(401).unwrap());
    pub const NOT_FOUND: Self = Self(NonZeroU16::new(404).unwrap());
    pub const CONFLICT: Self = Self(NonZeroU16::new(409).unwrap());
    pub const INTERNAL_SERVER_ERROR: Self = Self(NonZeroU16::new(500).unwrap());
}

impl StatusCode {
    /// Check if status is within 200-299.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0.get())
    }

    /// Check if status is within 400-499.
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0.get())
    }

    /// Check if status is within 500-599.
    #[inline]
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0.get())
    }
}

impl From<StatusCode> for u16 {
    fn from(value: StatusCode) -> Self {
        value.0.get()
    }
}

impl std::fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.get() {
            401 => f.write_str("401 Unauthorized"),
            code => f.write_str(&code.to_string()),
        }
    }
}

/// A fully described outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Bytes>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as the request body and sets `content-type: application/json`.
    ///
    /// # Errors
    ///
    /// * If the `serde_json` serialization to bytes fails
    #[cfg(feature = "json")]
    pub fn json<T: serde::Serialize + ?Sized>(self, body: &T) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body)?;
        Ok(self
            .header(Header::ContentType.as_ref(), "application/json")
            .body(bytes))
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// # Errors
    ///
    /// * If the body is not valid JSON for `T`
    #[cfg(feature = "json")]
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a single request and buffers the whole response.
    ///
    /// Non-success statuses are returned as `Ok`; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// * If there was an error while sending request, redirect loop was
    ///   detected or redirect limit was exhausted.
    async fn execute(&self, request: Request) -> Result<Response, Error>;
}
