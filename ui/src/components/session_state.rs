use dioxus::prelude::*;

use shear_common::session::{Session, SessionStore};
use shear_common::user::User;

/// Session context provided once at the top of the app.
///
/// Components read the session through this signal; persistence goes
/// through the store's explicit load/save/clear lifecycle instead of ad hoc
/// storage reads at call sites.
#[derive(Clone)]
pub struct SessionState {
    pub session: Option<Session>,
}

impl SessionState {
    /// Restore from browser storage at application start.
    pub fn restore() -> Self {
        Self {
            session: session_store().load(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn sign_in(&mut self, session: Session) {
        session_store().save(&session);
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) {
        session_store().clear();
        self.session = None;
    }
}

pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

#[cfg(target_family = "wasm")]
fn session_store() -> impl SessionStore {
    web::WebSessionStore
}

/// Native builds (dev tooling, tests) have no browser storage; the session
/// simply does not survive a restart.
#[cfg(not(target_family = "wasm"))]
fn session_store() -> impl SessionStore {
    shear_common::session::MemorySessionStore::default()
}

#[cfg(target_family = "wasm")]
mod web {
    use shear_common::session::{Session, SessionStore};

    const SESSION_KEY: &str = "shear.session";

    /// Session store backed by `window.localStorage`.
    pub struct WebSessionStore;

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    impl SessionStore for WebSessionStore {
        fn load(&self) -> Option<Session> {
            let raw = storage()?.get_item(SESSION_KEY).ok().flatten()?;
            match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    tracing::warn!("stored session unreadable, clearing: {err}");
                    let _ = storage().map(|s| s.remove_item(SESSION_KEY));
                    None
                }
            }
        }

        fn save(&mut self, session: &Session) {
            let Ok(raw) = serde_json::to_string(session) else {
                return;
            };
            if let Some(storage) = storage() {
                let _ = storage.set_item(SESSION_KEY, &raw);
            }
        }

        fn clear(&mut self) {
            if let Some(storage) = storage() {
                let _ = storage.remove_item(SESSION_KEY);
            }
        }
    }
}
