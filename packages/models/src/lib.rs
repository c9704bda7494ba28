#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Wire and form types for the headless user-account API.
//!
//! Field names on the `Serialize`/`Deserialize` impls are the backend's wire contract and must
//! not be renamed.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

/// Server-assigned account identifier.
///
/// The headless API emits numeric ids, but the value is treated as opaque so a string id
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserAccountId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for UserAccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserAccountId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UserAccountId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserAccountId,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub alternate_name: String,
}

impl UserAccount {
    /// `givenName familyName`, as shown in the user list.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// One page of the user-account collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountPage {
    #[serde(default)]
    pub items: Vec<UserAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u64>,
}

/// POST body for creating an account.
///
/// Serialized keys, in order: `alternateName`, `emailAddress`, `familyName`, `givenName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserAccount {
    pub alternate_name: String,
    pub email_address: String,
    pub family_name: String,
    pub given_name: String,
}

impl From<&UserDraft> for NewUserAccount {
    fn from(value: &UserDraft) -> Self {
        Self {
            alternate_name: value.user_name.clone(),
            email_address: value.email_address.clone(),
            family_name: value.family_name.clone(),
            given_name: value.given_name.clone(),
        }
    }
}

/// One editable field of the creation form. `as_ref()` is the form field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    GivenName,
    FamilyName,
    EmailAddress,
    UserName,
}

impl FormField {
    /// Display order of the form inputs.
    pub const ALL: [Self; 4] = [
        Self::GivenName,
        Self::FamilyName,
        Self::EmailAddress,
        Self::UserName,
    ];
}

/// Local, unvalidated contents of the creation form.
///
/// Empty strings are a valid, submittable state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub email_address: String,
    pub family_name: String,
    pub given_name: String,
    pub user_name: String,
}

impl UserDraft {
    #[must_use]
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::GivenName => &self.given_name,
            FormField::FamilyName => &self.family_name,
            FormField::EmailAddress => &self.email_address,
            FormField::UserName => &self.user_name,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::GivenName => self.given_name = value,
            FormField::FamilyName => self.family_name = value,
            FormField::EmailAddress => self.email_address = value,
            FormField::UserName => self.user_name = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|x| self.field(*x).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn joe() -> UserDraft {
        UserDraft {
            email_address: "joe.bloggs@liferay.com".to_string(),
            family_name: "Bloggs".to_string(),
            given_name: "Joe".to_string(),
            user_name: "jBloggs".to_string(),
        }
    }

    #[test_log::test]
    fn new_user_account_maps_user_name_to_alternate_name() {
        let body = serde_json::to_string(&NewUserAccount::from(&joe())).unwrap();

        assert_eq!(
            body,
            r#"{"alternateName":"jBloggs","emailAddress":"joe.bloggs@liferay.com","familyName":"Bloggs","givenName":"Joe"}"#
        );
    }

    #[test_log::test]
    fn new_user_account_passes_arbitrary_strings_through() {
        let draft = UserDraft {
            email_address: String::new(),
            family_name: "  spaced  ".to_string(),
            given_name: "Zoë \"quoted\"".to_string(),
            user_name: "名前".to_string(),
        };

        let body = NewUserAccount::from(&draft);

        assert_eq!(body.alternate_name, draft.user_name);
        assert_eq!(body.email_address, draft.email_address);
        assert_eq!(body.family_name, draft.family_name);
        assert_eq!(body.given_name, draft.given_name);
    }

    #[test_log::test]
    fn user_account_decodes_numeric_and_string_ids() {
        let numeric: UserAccount =
            serde_json::from_str(r#"{"id":42,"givenName":"Joe","familyName":"Bloggs"}"#).unwrap();
        let text: UserAccount = serde_json::from_str(r#"{"id":"abc-1"}"#).unwrap();

        assert_eq!(numeric.id, UserAccountId::Number(42));
        assert_eq!(numeric.display_name(), "Joe Bloggs");
        assert_eq!(numeric.email_address, "");
        assert_eq!(text.id, UserAccountId::Text("abc-1".to_string()));
        assert_eq!(text.id.to_string(), "abc-1");
    }

    #[test_log::test]
    fn user_account_ignores_unknown_fields() {
        let account: UserAccount = serde_json::from_str(
            r#"{"id":7,"givenName":"A","familyName":"B","emailAddress":"a@b.c","alternateName":"ab","jobTitle":"x","roleBriefs":[]}"#,
        )
        .unwrap();

        assert_eq!(account.alternate_name, "ab");
        assert_eq!(account.email_address, "a@b.c");
    }

    #[test_log::test]
    fn page_without_items_is_empty() {
        let page: UserAccountPage = serde_json::from_str(r#"{"totalCount":0}"#).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, Some(0));
    }

    #[test_log::test]
    fn page_keeps_item_order() {
        let page: UserAccountPage = serde_json::from_str(
            r#"{"items":[{"id":3,"givenName":"C"},{"id":1,"givenName":"A"},{"id":2,"givenName":"B"}]}"#,
        )
        .unwrap();

        let ids = page.items.iter().map(|x| x.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test_log::test]
    fn draft_fields_are_set_individually() {
        let mut draft = UserDraft::default();
        assert!(draft.is_empty());

        draft.set(FormField::GivenName, "Joe");
        assert_eq!(draft.field(FormField::GivenName), "Joe");
        assert_eq!(draft.field(FormField::FamilyName), "");
        assert!(!draft.is_empty());

        draft.clear();
        assert!(draft.is_empty());
    }

    #[test_log::test]
    fn draft_decodes_form_field_names() {
        let draft: UserDraft =
            serde_json::from_str(r#"{"givenName":"Joe","userName":"jBloggs"}"#).unwrap();

        assert_eq!(draft.given_name, "Joe");
        assert_eq!(draft.user_name, "jBloggs");
        assert_eq!(draft.family_name, "");
    }

    #[test_log::test]
    fn form_field_names_match_draft_keys() {
        let names = FormField::ALL.map(|x| x.as_ref().to_string());

        assert_eq!(names, ["givenName", "familyName", "emailAddress", "userName"]);
    }
}
