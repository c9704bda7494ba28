use actix_htmx::Htmx;
use actix_web::{
    HttpResponse, Responder, Scope,
    dev::{ServiceFactory, ServiceRequest},
    route,
};
use maud::{DOCTYPE, Markup, html};
use user_admin_state::UserCreationForm;

use crate::{ADMIN_PATH, USER_ACCOUNT_CREATED_EVENT};

pub mod users;

pub fn bind_services<
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
>(
    scope: Scope<T>,
) -> Scope<T> {
    users::bind_services(scope.service(index_endpoint))
}

#[route("", method = "GET")]
pub async fn index_endpoint(_htmx: Htmx) -> Result<impl Responder, actix_web::Error> {
    let mut response = HttpResponse::Ok();
    response.content_type("text/html");

    Ok(response.body(page().into_string()))
}

/// The whole screen: the user list on the left, the creation form on the right.
///
/// The list body is fetched on load and again whenever a user was created.
#[must_use]
pub fn page() -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                title { "User Admin" }
                meta charset="utf-8";
                style {("
                    .row { display: flex; gap: 2rem; }
                    .col-4 { flex: 4; }
                    .col-8 { flex: 8; }
                    .form-group { display: flex; flex-direction: column; margin-bottom: 1rem; }
                    .error { color: #c00; }
                ")}
                script
                    src="https://unpkg.com/htmx.org@2.0.2"
                    integrity="sha384-Y7hw+L/jvKeWIRRkqWYfPcvVxHzVzn5REgzbawhxAuQGwX1XWe70vji+VSeHOThJ"
                    crossorigin="anonymous"
                    {}
            }
            body {
                div.row {
                    div."col-4" {
                        h1 { "Users:" }
                        div id=(users::LIST_ERROR_ID) {}
                        div
                            hx-get={ (ADMIN_PATH) "/users" }
                            hx-trigger={ "load, " (USER_ACCOUNT_CREATED_EVENT) " from:body" }
                            hx-swap="innerHTML"
                        {
                            ul #user-accounts {}
                        }
                    }
                    div."col-8" {
                        h1 { "Add User Form" }
                        (users::user_form(&UserCreationForm::new()))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn page_has_both_columns() {
        let page = page().into_string();

        assert!(page.contains("<h1>Users:</h1>"));
        assert!(page.contains("<h1>Add User Form</h1>"));
        assert!(page.contains(r#"class="col-4""#));
        assert!(page.contains(r#"class="col-8""#));
    }

    #[test_log::test]
    fn list_loads_on_mount_and_after_create() {
        let page = page().into_string();

        assert!(page.contains(r#"hx-get="/admin/users""#));
        assert!(page.contains(r#"hx-trigger="load, user-account-created from:body""#));
    }

    #[test_log::test]
    fn list_error_slot_sits_outside_the_swapped_container() {
        let page = page().into_string();

        let slot = page.find(r#"<div id="user-accounts-error"></div>"#).unwrap();
        let container = page.find(r#"hx-get="/admin/users""#).unwrap();

        assert!(slot < container);
    }
}
