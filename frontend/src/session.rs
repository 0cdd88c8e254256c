//! Session core.
//!
//! Pure state machine over an injected durable store, no DOM dependency.
//! The reactive layer (`auth`) wires it to Leptos signals, browser
//! LocalStorage and the real clock.
//!
//! Invariant: `claims` is present iff a token is present, decodes, and its
//! expiry was in the future when the session was last validated. Callers
//! therefore read `is_authenticated()` as `claims.is_some()`.

use cvadmin_shared::{token, AdminRole, Claims, Timestamp};

/// Durable storage keys. These two keys are the console's entire durable
/// footprint.
pub const TOKEN_KEY: &str = "cvadmin_token";
pub const AUTH_FLAG_KEY: &str = "cvadmin_authenticated";

/// Durable key/value store the session persists itself into.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The current session: a bearer token plus its locally decoded claims.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    claims: Option<Claims>,
}

impl Session {
    /// The pristine, unauthenticated session.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Locally decoded role, `Unknown` while unauthenticated.
    pub fn role(&self) -> AdminRole {
        self.claims.as_ref().map(|c| c.role).unwrap_or_default()
    }

    /// Establish a session from a freshly issued token, overwriting any
    /// prior one. A token that does not decode or is already expired
    /// leaves the session (and durable storage) empty instead of breaking
    /// the authentication invariant.
    pub fn login(store: &impl TokenStore, token: String, now: Timestamp) -> Self {
        match token::decode(&token) {
            Ok(claims) if !claims.is_expired(now) => {
                store.set(TOKEN_KEY, &token);
                store.set(AUTH_FLAG_KEY, "true");
                Self {
                    token: Some(token),
                    claims: Some(claims),
                }
            }
            _ => Self::logout(store),
        }
    }

    /// Clear durable keys and in-memory state unconditionally. Never fails.
    pub fn logout(store: &impl TokenStore) -> Self {
        store.remove(TOKEN_KEY);
        store.remove(AUTH_FLAG_KEY);
        Self::empty()
    }

    /// Rebuild the session from durable storage at startup.
    ///
    /// A missing, malformed or expired token silently takes the logout
    /// path; restore never produces a user-visible error.
    pub fn restore(store: &impl TokenStore, now: Timestamp) -> Self {
        let Some(token) = store.get(TOKEN_KEY) else {
            return Self::logout(store);
        };

        match token::decode(&token) {
            Ok(claims) if !claims.is_expired(now) => Self {
                token: Some(token),
                claims: Some(claims),
            },
            _ => Self::logout(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory stand-in for LocalStorage.
    #[derive(Default)]
    struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        fn is_pristine(&self) -> bool {
            self.items.borrow().is_empty()
        }
    }

    impl TokenStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }

    fn token_with(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    const NOW: Timestamp = Timestamp::from_secs(1_000_000);

    #[test]
    fn login_with_future_expiry_authenticates_immediately() {
        let store = MemoryStore::default();
        let token = token_with(r#"{"sub":"root","id":1,"role":"admin","exp":1000600}"#);

        let session = Session::login(&store, token.clone(), NOW);

        assert!(session.is_authenticated());
        assert_eq!(session.role(), AdminRole::Admin);
        assert_eq!(session.token(), Some(token.as_str()));
        assert_eq!(store.get(TOKEN_KEY), Some(token));
        assert_eq!(store.get(AUTH_FLAG_KEY), Some("true".to_string()));
    }

    #[test]
    fn login_with_expired_token_stays_unauthenticated() {
        let store = MemoryStore::default();
        let token = token_with(r#"{"sub":"root","id":1,"role":"admin","exp":999999}"#);

        let session = Session::login(&store, token, NOW);

        assert!(!session.is_authenticated());
        assert!(store.is_pristine());
    }

    #[test]
    fn restore_with_future_expiry_authenticates() {
        let store = MemoryStore::default();
        let token = token_with(r#"{"sub":"ops","id":2,"role":"super_admin","exp":2000000}"#);
        store.set(TOKEN_KEY, &token);
        store.set(AUTH_FLAG_KEY, "true");

        let session = Session::restore(&store, NOW);

        assert!(session.is_authenticated());
        assert_eq!(session.role(), AdminRole::SuperAdmin);
    }

    #[test]
    fn restore_with_maximal_expiry_authenticates() {
        // A stored token can carry any exp value; the largest one must not
        // panic the expiry math or read as already expired.
        let store = MemoryStore::default();
        let token = token_with(r#"{"sub":"ops","id":2,"role":"admin","exp":9223372036854775807}"#);
        store.set(TOKEN_KEY, &token);
        store.set(AUTH_FLAG_KEY, "true");

        let session = Session::restore(&store, NOW);

        assert!(session.is_authenticated());
    }

    #[test]
    fn restore_with_past_expiry_clears_storage() {
        let store = MemoryStore::default();
        let token = token_with(r#"{"sub":"ops","id":2,"role":"admin","exp":999000}"#);
        store.set(TOKEN_KEY, &token);
        store.set(AUTH_FLAG_KEY, "true");

        let session = Session::restore(&store, NOW);

        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(store.is_pristine());
    }

    #[test]
    fn restore_with_malformed_token_is_silent_logout() {
        let store = MemoryStore::default();
        store.set(TOKEN_KEY, "not-a-token");
        store.set(AUTH_FLAG_KEY, "true");

        let session = Session::restore(&store, NOW);

        assert_eq!(session, Session::empty());
        assert!(store.is_pristine());
    }

    #[test]
    fn restore_with_empty_store_yields_empty_session() {
        let store = MemoryStore::default();
        let session = Session::restore(&store, NOW);
        assert_eq!(session, Session::empty());
    }

    #[test]
    fn login_then_logout_round_trips_to_pristine() {
        let store = MemoryStore::default();
        let token = token_with(r#"{"sub":"root","id":1,"role":"viewer","exp":1000600}"#);

        let session = Session::login(&store, token, NOW);
        assert!(session.is_authenticated());

        let session = Session::logout(&store);

        assert_eq!(session, Session::empty());
        assert!(store.is_pristine());
    }

    #[test]
    fn logout_on_empty_store_never_fails() {
        let store = MemoryStore::default();
        let session = Session::logout(&store);
        assert!(!session.is_authenticated());
    }
}
