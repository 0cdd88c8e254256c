//! CV-analysis admin console.
//!
//! Context-driven architecture:
//! - `session` / `auth`: bearer-token session state (pure core + signals)
//! - `api`: authorized fetch client for the admin API
//! - `web::route` / `web::router`: route domain model and guarded router
//! - `list`: shared pagination + role-gated-delete state machine
//! - `components`: UI layer

mod api;
mod auth;
mod components {
    pub mod admins;
    mod create_admin_dialog;
    pub mod dashboard;
    mod icons;
    pub mod login;
    mod overview;
    pub mod users;
}
mod config;
mod list;
mod session;
mod web;

use crate::auth::{init_auth, AuthContext};
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Map the current route to its view.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => {
            let router = web::router::use_router();
            view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="text-center space-y-4">
                        <h1 class="text-6xl font-bold text-error">"404"</h1>
                        <p class="text-xl">"Page not found"</p>
                        <button class="btn btn-primary" on:click=move |_| router.navigate("/")>
                            "Go home"
                        </button>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Authentication context, restored from durable storage before the
    //    router exists so the initial guard decision sees the real state.
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 2. The fetch client reads the token signal at call time.
    provide_context(api::AdminApi::new(auth_ctx.token_signal()));

    // 3. The router receives the auth flag as an injected signal.
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
