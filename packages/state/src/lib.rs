#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! State machines behind the user list and the user creation form.
//!
//! Both components hand out a ticket when they start a network call and only accept the
//! result for the ticket they are still waiting on. Tearing a component down, or starting a
//! newer call, turns any late result into a no-op.

pub mod form;
pub mod list;

pub use form::{FormStatus, SubmitError, Submission, UserCreationForm};
pub use list::{ListEntry, LoadTicket, UserListView};

/// What happened to a network result handed back to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The component was torn down or is waiting on a newer call.
    Ignored,
}
