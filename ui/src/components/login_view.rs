use dioxus::prelude::*;

use shear_common::session::Session;
use shear_common::user::{Credentials, Registration};
use shear_gateway::GatewayClient;

use super::app::Route;
use super::gateway::gateway_url;
use super::session_state::use_session;

#[component]
pub fn LoginView() -> Element {
    let mut session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();

        // Required fields are checked before any network call
        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some("Fill in email and password".into()));
            return;
        }

        busy.set(true);
        spawn(async move {
            let client = GatewayClient::new(gateway_url());
            let credentials = Credentials {
                email: email_value,
                password: password_value,
            };
            match client.login(&credentials).await {
                Ok(auth) => {
                    session.write().sign_in(Session {
                        token: auth.token,
                        user: auth.user,
                    });
                    nav.replace(Route::Home {});
                }
                Err(err) => {
                    tracing::warn!("login failed: {err}");
                    error.set(Some("Could not sign in. Check your credentials.".into()));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { "Otavio's Barbearia" }
                p { "Sign in to manage appointments" }

                div { class: "form-group",
                    label { "Email:" }
                    input {
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { "Password:" }
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(err) = error.read().as_ref() {
                    span { class: "field-error", "{err}" }
                }
                button {
                    disabled: *busy.read(),
                    onclick: submit,
                    if *busy.read() { "Signing in..." } else { "Sign in" }
                }
                button {
                    class: "link-btn",
                    onclick: move |_| { nav.push(Route::Register {}); },
                    "New client? Create an account"
                }
            }
        }
    }
}

#[component]
pub fn RegisterView() -> Element {
    let mut session = use_session();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let name_value = name.read().trim().to_string();
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();

        if name_value.is_empty() || email_value.is_empty() || password_value.is_empty() {
            error.set(Some("Fill in all fields".into()));
            return;
        }

        busy.set(true);
        spawn(async move {
            let client = GatewayClient::new(gateway_url());
            let registration = Registration {
                name: name_value,
                email: email_value,
                password: password_value,
            };
            match client.register(&registration).await {
                Ok(auth) => {
                    session.write().sign_in(Session {
                        token: auth.token,
                        user: auth.user,
                    });
                    nav.replace(Route::Home {});
                }
                Err(err) => {
                    tracing::warn!("registration failed: {err}");
                    error.set(Some("Could not create the account.".into()));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h1 { "Create your account" }

                div { class: "form-group",
                    label { "Name:" }
                    input {
                        r#type: "text",
                        placeholder: "Your name",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { "Email:" }
                    input {
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { "Password:" }
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let Some(err) = error.read().as_ref() {
                    span { class: "field-error", "{err}" }
                }
                button {
                    disabled: *busy.read(),
                    onclick: submit,
                    if *busy.read() { "Creating..." } else { "Create account" }
                }
                button {
                    class: "link-btn",
                    onclick: move |_| { nav.push(Route::Login {}); },
                    "Back to sign in"
                }
            }
        }
    }
}
