//! Route definitions - domain model.
//!
//! Pure business logic, no DOM or web_sys dependency. The guard decision
//! lives here so it can be exercised without a browser.

use std::fmt::Display;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login page (default route).
    #[default]
    Login,
    /// Admin console (requires authentication).
    Dashboard,
    /// Page not found.
    NotFound,
}

impl AppRoute {
    /// Parse a URL path into a route.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// Whether this route may only render for an authenticated session.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Whether an authenticated user should be moved off this route.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// Guard decision: the route that actually renders when `target` is
    /// requested with the given authentication state. A protected target is
    /// never returned to an unauthenticated caller.
    pub fn resolve(target: AppRoute, is_authenticated: bool) -> AppRoute {
        if target.requires_auth() && !is_authenticated {
            return Self::auth_failure_redirect();
        }
        if target.should_redirect_when_authenticated() && is_authenticated {
            return Self::auth_success_redirect();
        }
        target
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::Dashboard.to_path(), "/dashboard");
    }

    #[test]
    fn unauthenticated_never_resolves_to_protected_route() {
        assert_eq!(
            AppRoute::resolve(AppRoute::Dashboard, false),
            AppRoute::Login
        );
        assert_eq!(AppRoute::resolve(AppRoute::Login, false), AppRoute::Login);
        assert_eq!(
            AppRoute::resolve(AppRoute::NotFound, false),
            AppRoute::NotFound
        );
    }

    #[test]
    fn authenticated_leaves_login_page() {
        assert_eq!(
            AppRoute::resolve(AppRoute::Login, true),
            AppRoute::Dashboard
        );
        assert_eq!(
            AppRoute::resolve(AppRoute::Dashboard, true),
            AppRoute::Dashboard
        );
    }
}
