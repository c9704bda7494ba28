use std::collections::BTreeSet;

use user_admin_models::{UserAccount, UserAccountId};

use crate::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One rendered row: a stable key and the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry<'a> {
    pub key: &'a UserAccountId,
    pub label: String,
}

/// The user list.
///
/// Loads once per activation and afterwards only when [`UserListView::refresh`] is called
/// (after a user was created). The collection is replaced wholesale on each successful load.
#[derive(Debug, Default)]
pub struct UserListView {
    users: Vec<UserAccount>,
    error: Option<String>,
    active: bool,
    generation: u64,
    pending: Option<u64>,
}

impl UserListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts the view. Returns the ticket for the initial load, or `None` if the view is
    /// already active.
    pub fn activate(&mut self) -> Option<LoadTicket> {
        if self.active {
            log::debug!("activate: already active");
            return None;
        }

        self.active = true;
        Some(self.issue())
    }

    /// Starts a reload, superseding any load still in flight. `None` if the view is not active.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        if !self.active {
            log::debug!("refresh: view is not active");
            return None;
        }

        Some(self.issue())
    }

    /// Unmounts the view. Any outstanding load is ignored when it resolves.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.pending = None;
        self.generation += 1;
    }

    fn issue(&mut self) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        LoadTicket(self.generation)
    }

    pub fn resolve<E: std::fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<UserAccount>, E>,
    ) -> Resolution {
        if !self.active || self.pending != Some(ticket.0) {
            log::debug!("resolve: ignoring stale load ticket={}", ticket.0);
            return Resolution::Ignored;
        }

        self.pending = None;

        match result {
            Ok(users) => {
                log::debug!("resolve: loaded {} users", users.len());
                self.users = users;
                self.error = None;
            }
            Err(e) => {
                log::error!("resolve: failed to load users: {e}");
                self.error = Some(e.to_string());
            }
        }

        Resolution::Applied
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    /// Reason the last load failed, if it did.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rows in collection order. A repeated id keeps only its first occurrence so every key
    /// is unique.
    #[must_use]
    pub fn entries(&self) -> Vec<ListEntry<'_>> {
        let mut seen = BTreeSet::new();

        self.users
            .iter()
            .filter(|&user| seen.insert(&user.id))
            .map(|user| ListEntry {
                key: &user.id,
                label: user.display_name(),
            })
            .collect()
    }
}
