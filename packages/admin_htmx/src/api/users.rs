use actix_htmx::{Htmx, TriggerType};
use actix_web::{
    HttpResponse, Scope,
    dev::{ServiceFactory, ServiceRequest},
    error::ErrorInternalServerError,
    route, web,
};
use maud::{Markup, html};
use user_admin_client::UserAccountsApi;
use user_admin_models::{FormField, UserDraft};
use user_admin_state::{UserCreationForm, UserListView};

use crate::{ADMIN_PATH, USER_ACCOUNT_CREATED_EVENT};

pub fn bind_services<
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
>(
    scope: Scope<T>,
) -> Scope<T> {
    scope.service(
        Scope::new("users")
            .service(list_users_endpoint)
            .service(new_user_endpoint)
            .service(create_user_endpoint),
    )
}

/// Element id of the list load error slot, swapped out-of-band.
pub const LIST_ERROR_ID: &str = "user-accounts-error";

#[route("", method = "GET")]
pub async fn list_users_endpoint(
    _htmx: Htmx,
    api: web::Data<dyn UserAccountsApi>,
) -> Result<HttpResponse, actix_web::Error> {
    log::trace!("list_users_endpoint");

    let mut view = UserListView::new();

    if let Some(ticket) = view.activate() {
        let result = api.list_users().await;
        view.resolve(ticket, result);
    }

    let mut response = HttpResponse::Ok();
    response.content_type("text/html");

    // The browser still shows the last good list. Leave it in place and only fill the
    // error slot.
    if view.error().is_some() {
        response.insert_header(("HX-Reswap", "none"));
        return Ok(response.body(list_error(view.error()).into_string()));
    }

    Ok(response.body(
        html! {
            (user_list(&view))
            (list_error(None))
        }
        .into_string(),
    ))
}

#[route("new", method = "GET")]
pub async fn new_user_endpoint(_htmx: Htmx) -> Result<Markup, actix_web::Error> {
    Ok(user_form(&UserCreationForm::new()))
}

#[route("new", method = "POST")]
pub async fn create_user_endpoint(
    htmx: Htmx,
    form: web::Form<UserDraft>,
    api: web::Data<dyn UserAccountsApi>,
) -> Result<Markup, actix_web::Error> {
    let mut state = UserCreationForm::with_draft(form.into_inner());
    let submission = state.submit().map_err(ErrorInternalServerError)?;
    log::debug!("create_user_endpoint: submitting user_name={}", submission.draft().user_name);

    let result = api.create_user(submission.draft()).await;

    if let Ok(account) = &result {
        htmx.trigger_event(
            USER_ACCOUNT_CREATED_EVENT.to_string(),
            Some(
                serde_json::json!({
                    "id": &account.id,
                    "name": account.display_name(),
                })
                .to_string(),
            ),
            Some(TriggerType::Standard),
        );
    }

    state.resolve(submission, result);

    Ok(user_form(&state))
}

/// One item per account, in collection order.
#[must_use]
pub fn user_list(view: &UserListView) -> Markup {
    html! {
        ul #user-accounts {
            @for entry in view.entries() {
                li data-user-id=(entry.key.to_string()) { (entry.label) }
            }
        }
    }
}

/// Out-of-band replacement for the error slot next to the list. `None` clears it.
#[must_use]
pub fn list_error(error: Option<&str>) -> Markup {
    html! {
        div id=(LIST_ERROR_ID) hx-swap-oob="true" {
            @if let Some(error) = error {
                p.error role="alert" { "Failed to load users: " (error) }
            }
        }
    }
}

fn label(field: FormField) -> &'static str {
    match field {
        FormField::GivenName => "Given Name",
        FormField::FamilyName => "Family Name",
        FormField::EmailAddress => "Email Address",
        FormField::UserName => "User Name",
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::GivenName => "Joe",
        FormField::FamilyName => "Bloggs",
        FormField::EmailAddress => "joe.bloggs@liferay.com",
        FormField::UserName => "jBloggs",
    }
}

#[must_use]
pub fn user_form(form: &UserCreationForm) -> Markup {
    html! {
        form #add-user-form
            hx-post={ (ADMIN_PATH) "/users/new" }
            hx-swap="outerHTML"
            hx-sync="this:drop"
            hx-disabled-elt="find button"
        {
            @if let Some(error) = form.error() {
                p.error role="alert" { "Failed to create user: " (error) }
            }
            @if let Some(account) = form.last_created() {
                p.success role="status" { "Created " (account.display_name()) }
            }
            @for field in FormField::ALL {
                div."form-group" {
                    label for=(field.as_ref()) { (label(field)) }
                    input.form-control
                        type="text"
                        id=(field.as_ref())
                        name=(field.as_ref())
                        placeholder=(placeholder(field))
                        value=(form.field(field));
                }
            }
            button.btn.btn-primary type="submit" { "Add User" }
        }
    }
}
