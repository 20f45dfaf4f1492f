use serde::{Deserialize, Serialize};

use crate::user::User;

/// Authenticated session: the bearer token plus the logged-in user.
///
/// Built once at application start and passed through context; components
/// never read persisted storage directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Where a session persists between page loads. The web UI backs this with
/// browser storage; tests and native callers use [`MemorySessionStore`].
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&mut self, session: &Session);
    fn clear(&mut self);
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Option<Session>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.session.clone()
    }

    fn save(&mut self, session: &Session) {
        self.session = Some(session.clone());
    }

    fn clear(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_session() -> Session {
        Session {
            token: "jwt-token".into(),
            user: User {
                id: "u-1".into(),
                name: "Otavio".into(),
                email: "otavio@example.com".into(),
                role: crate::user::ROLE_ADMIN.into(),
            },
        }
    }

    #[test]
    fn save_load_clear_lifecycle() {
        let mut store = MemorySessionStore::default();
        assert!(store.load().is_none());

        let session = dummy_session();
        store.save(&session);
        assert_eq!(store.load(), Some(session));

        store.clear();
        assert!(store.load().is_none());
        // Clearing an empty store is fine
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn session_serializes_for_storage() {
        let session = dummy_session();
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
