use thiserror::Error;
use user_admin_models::{FormField, UserAccount, UserDraft};

use crate::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// No call pending.
    Editing,
    /// A create call is in flight. Fields are still editable.
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    InFlight,
    #[error("The form is no longer mounted")]
    Unmounted,
}

/// Snapshot of the draft taken when the submit action fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    ticket: u64,
    draft: UserDraft,
}

impl Submission {
    #[must_use]
    pub const fn draft(&self) -> &UserDraft {
        &self.draft
    }
}

/// The user creation form.
///
/// `Editing -> Submitting -> Editing`. Success clears every field; failure leaves them as
/// they were and records the reason.
#[derive(Debug)]
pub struct UserCreationForm {
    draft: UserDraft,
    status: FormStatus,
    mounted: bool,
    generation: u64,
    pending: Option<u64>,
    error: Option<String>,
    last_created: Option<UserAccount>,
}

impl Default for UserCreationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UserCreationForm {
    #[must_use]
    pub fn new() -> Self {
        Self::with_draft(UserDraft::default())
    }

    #[must_use]
    pub const fn with_draft(draft: UserDraft) -> Self {
        Self {
            draft,
            status: FormStatus::Editing,
            mounted: true,
            generation: 0,
            pending: None,
            error: None,
            last_created: None,
        }
    }

    /// Applies one change event to one field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        self.draft.field(field)
    }

    #[must_use]
    pub const fn draft(&self) -> &UserDraft {
        &self.draft
    }

    #[must_use]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Reason the last submission failed, if it did.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The account created by the last successful submission.
    #[must_use]
    pub const fn last_created(&self) -> Option<&UserAccount> {
        self.last_created.as_ref()
    }

    /// Starts a submission with a snapshot of the current draft.
    ///
    /// # Errors
    ///
    /// * [`SubmitError::InFlight`] if a previous submission has not resolved yet
    /// * [`SubmitError::Unmounted`] if the form was torn down
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.mounted {
            return Err(SubmitError::Unmounted);
        }
        if self.status == FormStatus::Submitting {
            log::debug!("submit: already submitting");
            return Err(SubmitError::InFlight);
        }

        self.generation += 1;
        self.pending = Some(self.generation);
        self.status = FormStatus::Submitting;
        self.error = None;

        Ok(Submission {
            ticket: self.generation,
            draft: self.draft.clone(),
        })
    }

    pub fn resolve<E: std::fmt::Display>(
        &mut self,
        submission: Submission,
        result: Result<UserAccount, E>,
    ) -> Resolution {
        if !self.mounted || self.pending != Some(submission.ticket) {
            log::debug!(
                "resolve: ignoring stale submission ticket={}",
                submission.ticket
            );
            return Resolution::Ignored;
        }

        self.pending = None;
        self.status = FormStatus::Editing;

        match result {
            Ok(account) => {
                log::debug!("resolve: created user id={}", account.id);
                self.draft.clear();
                self.error = None;
                self.last_created = Some(account);
            }
            Err(e) => {
                log::error!("resolve: failed to create user: {e}");
                self.error = Some(e.to_string());
                self.last_created = None;
            }
        }

        Resolution::Applied
    }

    /// Tears the form down. A submission still in flight is ignored when it resolves.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pending = None;
    }
}
