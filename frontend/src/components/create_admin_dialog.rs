use crate::components::icons::Plus;
use cvadmin_shared::{AdminRole, CreateAdminRequest};
use leptos::prelude::*;

/// Create-admin form, super_admin only (the caller gates rendering).
#[component]
pub fn CreateAdminDialog(#[prop(into)] on_create: Callback<CreateAdminRequest>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // Form fields
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(AdminRole::Viewer);

    let reset_form = move || {
        set_username.set(String::new());
        set_password.set(String::new());
        set_role.set(AdminRole::Viewer);
    };

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        on_create.run(CreateAdminRequest {
            username: username.get(),
            password: password.get(),
            role: role.get(),
        });
        set_open.set(false);
        reset_form();
    };

    view! {
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Create Admin"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Create New Admin"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="new_admin_username" class="label">
                            <span class="label-text">"Username"</span>
                        </label>
                        <input
                            id="new_admin_username"
                            type="text"
                            required
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="new_admin_password" class="label">
                            <span class="label-text">"Password"</span>
                        </label>
                        <input
                            id="new_admin_password"
                            type="password"
                            required
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Role"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                set_role.set(match event_target_value(&ev).as_str() {
                                    "admin" => AdminRole::Admin,
                                    "super_admin" => AdminRole::SuperAdmin,
                                    _ => AdminRole::Viewer,
                                });
                            }
                        >
                            <option value="viewer" selected=move || role.get() == AdminRole::Viewer>
                                "Viewer"
                            </option>
                            <option value="admin" selected=move || role.get() == AdminRole::Admin>
                                "Admin"
                            </option>
                            <option
                                value="super_admin"
                                selected=move || role.get() == AdminRole::SuperAdmin
                            >
                                "Super Admin"
                            </option>
                        </select>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            "Create"
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
