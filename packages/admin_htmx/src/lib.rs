#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Server-rendered admin page for user accounts.
//!
//! The page is plain HTML from `maud`, made interactive with htmx. Register the endpoints with
//! [`api::bind_services`] under the `/admin` scope, wrap the app in
//! [`actix_htmx::HtmxMiddleware`] and provide a `web::Data<dyn UserAccountsApi>`.

pub mod api;

/// htmx event emitted after a user account was created. The user list reloads on it.
pub const USER_ACCOUNT_CREATED_EVENT: &str = "user-account-created";

/// Scope the endpoints are expected to be mounted under.
pub const ADMIN_PATH: &str = "/admin";
