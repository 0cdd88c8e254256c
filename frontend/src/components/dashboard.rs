use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::admins::AdminManagement;
use crate::components::icons::{BarChart2, LogOut, Users};
use crate::components::overview::Overview;
use crate::components::users::UserList;
use cvadmin_shared::{AdminProfile, DashboardStats};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Users,
    Admins,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (profile, set_profile) = signal(Option::<AdminProfile>::None);
    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(true);
    let (current_tab, set_current_tab) = signal(Tab::Overview);
    let (logout_dialog_open, set_logout_dialog_open) = signal(false);

    // Profile and statistics load concurrently on mount. A credential
    // rejection on the profile call ends the session; a statistics
    // failure only banners.
    spawn_local(async move {
        let (profile_res, stats_res) = futures::join!(api.me(), api.dashboard());

        match profile_res {
            Ok(p) => set_profile.set(Some(p)),
            Err(e) if e.is_auth_error() => {
                logout(&auth);
                return;
            }
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }

        match stats_res {
            Ok(s) => set_stats.set(Some(s)),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        set_loading.set(false);
    });

    // Tab gating reads the locally decoded role; the server still
    // enforces every admin endpoint on its own.
    let state = auth.state;
    let can_manage_admins = move || state.get().session.role().can_manage_admins();

    let on_logout_confirm = move |_| {
        set_logout_dialog_open.set(false);
        // Router redirects to login when the auth signal flips.
        logout(&auth);
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-xl">
                <div class="flex-1 gap-2">
                    <BarChart2 attr:class="text-primary h-6 w-6" />
                    <div>
                        <span class="btn btn-ghost text-xl">"CV Analysis - Admin Console"</span>
                        <Show when=move || profile.get().is_some()>
                            <span class="badge badge-neutral hidden md:inline-flex">
                                "Welcome, " {move || profile.get().map(|p| p.username).unwrap_or_default()}
                            </span>
                        </Show>
                    </div>
                </div>
                <div class="flex-none">
                    <button
                        class="btn btn-outline btn-error gap-2"
                        on:click=move |_| set_logout_dialog_open.set(true)
                    >
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>

            <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 w-fit">
                    <a
                        role="tab"
                        class=move || if current_tab.get() == Tab::Overview { "tab tab-active" } else { "tab" }
                        on:click=move |_| set_current_tab.set(Tab::Overview)
                    >
                        <BarChart2 attr:class="h-4 w-4 mr-1" /> "Overview"
                    </a>
                    <a
                        role="tab"
                        class=move || if current_tab.get() == Tab::Users { "tab tab-active" } else { "tab" }
                        on:click=move |_| set_current_tab.set(Tab::Users)
                    >
                        <Users attr:class="h-4 w-4 mr-1" /> "User Management"
                    </a>
                    <Show when=can_manage_admins>
                        <a
                            role="tab"
                            class=move || if current_tab.get() == Tab::Admins { "tab tab-active" } else { "tab" }
                            on:click=move |_| set_current_tab.set(Tab::Admins)
                        >
                            <Users attr:class="h-4 w-4 mr-1" /> "Admin Management"
                        </a>
                    </Show>
                </div>

                {move || match current_tab.get() {
                    Tab::Overview => view! { <Overview stats=stats loading=loading /> }.into_any(),
                    Tab::Users => view! { <UserList /> }.into_any(),
                    Tab::Admins => {
                        if can_manage_admins() {
                            view! { <AdminManagement /> }.into_any()
                        } else {
                            ().into_any()
                        }
                    }
                }}
            </div>

            // Logout confirmation
            <Show when=move || logout_dialog_open.get()>
                <div class="modal modal-open">
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">"Confirm Logout"</h3>
                        <p class="py-4">"Are you sure you want to log out?"</p>
                        <div class="modal-action">
                            <button class="btn btn-ghost" on:click=move |_| set_logout_dialog_open.set(false)>
                                "Cancel"
                            </button>
                            <button class="btn btn-primary" on:click=on_logout_confirm>
                                "Logout"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
