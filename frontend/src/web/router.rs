//! Router service - core engine.
//!
//! Wraps the History API so every `window.history` access stays in this
//! module. Navigation runs request -> guard -> commit; the guard decision
//! itself is `AppRoute::resolve` and is checked before any route state is
//! published, so a protected view never reaches first paint while the
//! session is unauthenticated.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects so guard bounces do not pollute history.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service.
///
/// Route state is signal-driven; the authentication check is an injected
/// signal, keeping this module decoupled from the session store.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // Guard the initial URL before the first route value exists: a
        // direct load of a protected path must start at the login route.
        let requested = AppRoute::from_path(&current_path());
        let initial = AppRoute::resolve(requested, is_authenticated.get_untracked());
        if initial != requested {
            web_sys::console::log_1(
                &format!("[Router] Initial path guarded, starting at {}", initial).into(),
            );
            replace_history_state(initial.to_path());
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigate to a path, subject to the guard.
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let resolved = AppRoute::resolve(target, self.is_authenticated.get_untracked());
        if resolved != target {
            web_sys::console::log_1(
                &format!("[Router] {} denied, redirecting to {}", target, resolved).into(),
            );
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// Back/forward buttons re-run the guard as well.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = AppRoute::resolve(target, is_authenticated.get_untracked());
            if resolved != target {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive.
        closure.forget();
    }

    /// Redirect automatically when the authentication state flips:
    /// login moves off the login page, logout moves off protected pages.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let resolved = AppRoute::resolve(route, is_auth);

            if resolved != route {
                web_sys::console::log_1(
                    &format!("[Router] Auth state changed, redirecting to {}", resolved).into(),
                );
                push_history_state(resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// Fetch the router service from context.
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

/// Router root component. Provides the routing context; use once at the
/// root of the app.
#[component]
pub fn Router(
    /// Authentication state signal.
    is_authenticated: Signal<bool>,
    /// Child components.
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Route outlet: renders the view matching the current route.
#[component]
pub fn RouterOutlet(
    /// Maps the current route to its view.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
