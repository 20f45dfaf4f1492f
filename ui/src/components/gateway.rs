use dioxus::prelude::*;

use shear_gateway::{GatewayClient, GatewayError};

use super::app::Route;
use super::session_state::SessionState;

/// Default gateway base URL; overridable at compile time via
/// SHEAR_GATEWAY_URL.
const DEFAULT_GATEWAY_URL: &str = "http://localhost:3333";

pub fn gateway_url() -> String {
    option_env!("SHEAR_GATEWAY_URL")
        .unwrap_or(DEFAULT_GATEWAY_URL)
        .to_string()
}

/// Client carrying the current session's bearer token, built fresh per
/// request so a token change is always picked up.
pub fn gateway_for(session: &Signal<SessionState>) -> GatewayClient {
    let mut client = GatewayClient::new(gateway_url());
    client.set_token(session.read().token().map(str::to_string));
    client
}

/// Cross-cutting error handling: a 401 tears down the session and redirects
/// to login; anything else becomes a transient user-facing message and
/// leaves prior view state alone.
pub fn surface_error(
    err: &GatewayError,
    session: &mut Signal<SessionState>,
    nav: &Navigator,
) -> String {
    if err.is_unauthorized() {
        tracing::info!("session rejected by gateway, signing out");
        session.write().sign_out();
        nav.replace(Route::Login {});
        "Session expired. Please sign in again.".to_string()
    } else {
        tracing::error!("gateway call failed: {err}");
        err.to_string()
    }
}
