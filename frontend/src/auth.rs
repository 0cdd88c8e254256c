//! Authentication state.
//!
//! Wires the session core to Leptos signals, browser storage and the real
//! clock, decoupled from the routing layer: the router receives the
//! authentication state as an injected signal. Signal writes are
//! synchronous, so observers never see a stale session after `login` or
//! `logout` returns.

use crate::session::Session;
use crate::web::{now_timestamp, BrowserTokenStore};
use cvadmin_shared::{AdminRole, Claims};
use leptos::prelude::*;

/// Reactive authentication state.
#[derive(Clone, Default)]
pub struct AuthState {
    pub session: Session,
}

/// Authentication context, shared through Leptos context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// Authentication flag, for injection into the router service.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().session.is_authenticated())
    }

    /// Live token, for injection into the fetch client. Read at call time
    /// so logout is effective for every request started afterwards.
    pub fn token_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.get().session.token().map(str::to_string))
    }

    /// Locally decoded role; a UI hint, never an authorization decision.
    pub fn role(&self) -> AdminRole {
        self.state.get_untracked().session.role()
    }

    pub fn claims(&self) -> Option<Claims> {
        self.state.get_untracked().session.claims().cloned()
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the authentication context from Leptos context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Restore any persisted session at startup. An expired or malformed
/// persisted token is silently discarded together with its storage keys.
pub fn init_auth(ctx: &AuthContext) {
    let session = Session::restore(&BrowserTokenStore, now_timestamp());
    if session.is_authenticated() {
        web_sys::console::log_1(&"[Auth] Session restored from storage".into());
    }
    ctx.set_state.set(AuthState { session });
}

/// Persist a freshly issued token and mark the session authenticated.
pub fn login(ctx: &AuthContext, token: String) {
    let session = Session::login(&BrowserTokenStore, token, now_timestamp());
    web_sys::console::log_1(
        &format!("[Auth] Login, role: {}", session.role().as_str()).into(),
    );
    ctx.set_state.set(AuthState { session });
}

/// Drop the session and its durable keys. Never fails; the router reacts
/// to the state change and redirects off protected routes.
pub fn logout(ctx: &AuthContext) {
    let session = Session::logout(&BrowserTokenStore);
    web_sys::console::log_1(&"[Auth] Logged out".into());
    ctx.set_state.set(AuthState { session });
}
