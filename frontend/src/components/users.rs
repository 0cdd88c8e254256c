use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::Trash2;
use crate::list::{
    map_user_delete_error, user_delete_precheck, DeleteOutcome, ListState, PAGE_SIZES,
};
use crate::web::format_datetime;
use cvadmin_shared::UserRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn UserList() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let state = RwSignal::new(ListState::<UserRecord>::new(10));
    let (deleting, set_deleting) = signal(false);

    let reload = move || {
        let generation = state
            .try_update(|s| s.begin_fetch())
            .expect("list state is alive");
        let page = state.with_untracked(|s| s.page);
        spawn_local(async move {
            let result = api
                .list_users(page.wire_page(), page.size)
                .await
                .map(|resp| (resp.users, resp.total))
                .map_err(|e| e.to_string());
            state.update(|s| {
                s.commit_page(generation, result);
            });
        });
    };
    reload();

    let on_prev = move |_| {
        let page = state.with_untracked(|s| s.page.page);
        if page > 0 && state.try_update(|s| s.set_page(page - 1)).unwrap_or(false) {
            reload();
        }
    };
    let on_next = move |_| {
        let (page, last) = state.with_untracked(|s| (s.page.page, s.last_page()));
        if page < last && state.try_update(|s| s.set_page(page + 1)).unwrap_or(false) {
            reload();
        }
    };
    let on_size_change = move |ev: web_sys::Event| {
        if let Ok(size) = event_target_value(&ev).parse::<u64>() {
            if state.try_update(|s| s.set_page_size(size)).unwrap_or(false) {
                reload();
            }
        }
    };

    let role = {
        let state = auth.state;
        move || state.get().session.role()
    };

    let on_delete_click = move |user: UserRecord| {
        state.update(|s| {
            s.request_delete(user, user_delete_precheck(role()));
        });
    };

    let on_delete_confirm = move |_| {
        let Some(user) = state.with_untracked(|s| s.pending_delete.clone()) else {
            return;
        };
        set_deleting.set(true);
        spawn_local(async move {
            let outcome = match api.delete_user(user.id).await {
                Ok(()) => DeleteOutcome::Deleted,
                Err(e) => DeleteOutcome::Failed(map_user_delete_error(&e)),
            };
            let deleted = matches!(outcome, DeleteOutcome::Deleted);
            state.update(|s| s.finish_delete(outcome, |u| u.username.clone()));
            set_deleting.set(false);
            if deleted {
                reload();
            }
        });
    };
    let on_delete_cancel = move |_| state.update(|s| s.cancel_delete());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-4 space-y-4">
                <Show when=move || state.with(|s| s.error.is_some())>
                    <div role="alert" class="alert alert-error">
                        <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                    </div>
                </Show>
                <Show when=move || state.with(|s| s.success.is_some())>
                    <div role="alert" class="alert alert-success">
                        <span>{move || state.with(|s| s.success.clone().unwrap_or_default())}</span>
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Username"</th>
                                <th>"Email"</th>
                                <th>"Field"</th>
                                <th>"Created At"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || state.with(|s| s.is_loading())>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || {
                                state.with(|s| !s.is_loading() && s.records.is_empty())
                            }>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No users found."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || {
                                    state.with(|s| if s.is_loading() { Vec::new() } else { s.records.clone() })
                                }
                                key=|user| user.id
                                children=move |user| {
                                    let can_delete = move || role().can_delete_users();
                                    let user_for_delete = user.clone();
                                    view! {
                                        <tr>
                                            <td class="font-bold">{user.username.clone()}</td>
                                            <td>{user.email.clone()}</td>
                                            <td>{user.field.clone()}</td>
                                            <td>{format_datetime(&user.created_at)}</td>
                                            <td>
                                                <Show when=can_delete>
                                                    {
                                                        let user = user_for_delete.clone();
                                                        view! {
                                                            <button
                                                                class="btn btn-ghost btn-sm btn-square text-error"
                                                                title="Delete User"
                                                                on:click=move |_| on_delete_click(user.clone())
                                                            >
                                                                <Trash2 attr:class="h-4 w-4" />
                                                            </button>
                                                        }
                                                    }
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>

                <div class="flex items-center justify-end gap-4">
                    <label class="flex items-center gap-2 text-sm">
                        "Rows per page:"
                        <select class="select select-bordered select-sm" on:change=on_size_change>
                            {PAGE_SIZES
                                .into_iter()
                                .map(|size| {
                                    view! {
                                        <option
                                            value=size.to_string()
                                            selected=move || state.with(|s| s.page.size == size)
                                        >
                                            {size.to_string()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <span class="text-sm text-base-content/70">
                        {move || {
                            state.with(|s| format!("Page {} of {}", s.page.page + 1, s.last_page() + 1))
                        }}
                    </span>
                    <div class="join">
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || state.with(|s| s.page.page == 0 || s.is_loading())
                            on:click=on_prev
                        >
                            "«"
                        </button>
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || {
                                state.with(|s| s.page.page >= s.last_page() || s.is_loading())
                            }
                            on:click=on_next
                        >
                            "»"
                        </button>
                    </div>
                </div>
            </div>
        </div>

        // Delete confirmation
        <Show when=move || state.with(|s| s.pending_delete.is_some())>
            <div class="modal modal-open">
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"Confirm Delete"</h3>
                    <p class="py-4">
                        "Are you sure you want to delete user \""
                        {move || {
                            state.with(|s| {
                                s.pending_delete
                                    .as_ref()
                                    .map(|u| u.username.clone())
                                    .unwrap_or_default()
                            })
                        }}
                        "\"?"
                    </p>
                    <div class="modal-action">
                        <button
                            class="btn btn-ghost"
                            disabled=move || deleting.get()
                            on:click=on_delete_cancel
                        >
                            "Cancel"
                        </button>
                        <button
                            class="btn btn-error"
                            disabled=move || deleting.get()
                            on:click=on_delete_confirm
                        >
                            {move || if deleting.get() {
                                view! { <span class="loading loading-spinner"></span> "Deleting..." }.into_any()
                            } else {
                                "Delete".into_any()
                            }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
