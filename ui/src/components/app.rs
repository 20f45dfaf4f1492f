use dioxus::prelude::*;

use super::calendar_view::CalendarView;
use super::dashboard_view::DashboardView;
use super::login_view::{LoginView, RegisterView};
use super::session_state::{use_session, SessionState};

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/calendar")]
    Calendar {},
    #[end_layout]
    #[route("/auth/login")]
    Login {},
    #[route("/auth/register")]
    Register {},
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(SessionState::restore()));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }
        Router::<Route> {}
    }
}

#[component]
fn AppLayout() -> Element {
    let mut session = use_session();
    let nav = use_navigator();

    // Protected pages: no session means straight to login
    if !session.read().is_authenticated() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    let state = session.read();
    let user_name = state.user().map(|u| u.name.clone()).unwrap_or_default();
    let is_admin = state.user().map(|u| u.is_admin()).unwrap_or(false);
    drop(state);

    rsx! {
        div { class: "shear-app",
            header { class: "app-header",
                div { class: "header-top",
                    h1 { "Otavio's Barbearia" }
                    div { class: "user-info",
                        span { class: "user-name", "{user_name}" }
                        if is_admin {
                            span { class: "admin-badge", " [Admin]" }
                        }
                    }
                }
                nav {
                    button {
                        onclick: move |_| { nav.push(Route::Home {}); },
                        "Dashboard"
                    }
                    button {
                        onclick: move |_| { nav.push(Route::Calendar {}); },
                        "Calendar"
                    }
                    button {
                        class: "logout-btn",
                        onclick: move |_| {
                            session.write().sign_out();
                            nav.replace(Route::Login {});
                        },
                        "Sign out"
                    }
                }
            }
            main {
                Outlet::<Route> {}
            }
        }
    }
}

/// Route component: renders the revenue dashboard.
#[component]
fn Home() -> Element {
    rsx! { DashboardView {} }
}

/// Route component: renders the weekly appointment calendar.
#[component]
fn Calendar() -> Element {
    rsx! { CalendarView {} }
}

#[component]
fn Login() -> Element {
    rsx! { LoginView {} }
}

#[component]
fn Register() -> Element {
    rsx! { RegisterView {} }
}
