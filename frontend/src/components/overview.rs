use cvadmin_shared::DashboardStats;
use leptos::prelude::*;

/// Aggregate statistics tab. Display mapping only; all numbers come
/// precomputed from the server.
#[component]
pub fn Overview(
    stats: ReadSignal<Option<DashboardStats>>,
    loading: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex justify-center p-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            {move || match stats.get() {
                None => view! {
                    <div role="alert" class="alert alert-error">
                        <span>"No dashboard data available"</span>
                    </div>
                }
                .into_any(),
                Some(stats) => {
                    let cards = [
                        ("Total Users", stats.total_users.to_string()),
                        ("Active Users (24h)", stats.active_users_24h.to_string()),
                        ("Total CVs", stats.total_cvs_analyzed.to_string()),
                        ("Success Rate", stats.success_rate()),
                        ("Failed Analyses", stats.failed_analyses.to_string()),
                        (
                            "Avg Processing Time",
                            format!("{:.1}s", stats.average_processing_time),
                        ),
                    ];
                    let cv_activity = stats.cv_analyses_over_time.clone();
                    let reg_activity = stats.user_registrations_over_time.clone();
                    let top_fields: Vec<_> =
                        stats.top_fields.iter().take(3).cloned().collect();
                    let recent_errors = stats.recent_errors.clone();

                    view! {
                        <div class="space-y-6">
                            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                                {cards
                                    .into_iter()
                                    .map(|(title, value)| {
                                        view! {
                                            <div class="stat">
                                                <div class="stat-title">{title}</div>
                                                <div class="stat-value text-primary text-2xl">{value}</div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>

                            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">"Activity Over Time"</h3>
                                        <table class="table">
                                            <thead>
                                                <tr>
                                                    <th></th>
                                                    <th>"24h"</th>
                                                    <th>"7d"</th>
                                                    <th>"30d"</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                <tr>
                                                    <td>"CV Analyses"</td>
                                                    <td>{cv_activity.last_24h}</td>
                                                    <td>{cv_activity.last_7d}</td>
                                                    <td>{cv_activity.last_30d}</td>
                                                </tr>
                                                <tr>
                                                    <td>"User Registrations"</td>
                                                    <td>{reg_activity.last_24h}</td>
                                                    <td>{reg_activity.last_7d}</td>
                                                    <td>{reg_activity.last_30d}</td>
                                                </tr>
                                            </tbody>
                                        </table>
                                    </div>
                                </div>

                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">"Top Fields"</h3>
                                        <Show when={
                                            let is_empty = top_fields.is_empty();
                                            move || !is_empty
                                        } fallback=|| view! {
                                            <p class="text-base-content/50">"No field data yet"</p>
                                        }>
                                            {top_fields
                                                .iter()
                                                .map(|field| {
                                                    view! {
                                                        <div class="py-2">
                                                            <div class="font-bold">{field.field_name.clone()}</div>
                                                            <div class="text-sm text-base-content/70">
                                                                "Users: " {field.user_count}
                                                                " | CVs: " {field.cv_count}
                                                                " | Avg Match: "
                                                                {format!("{:.1}%", field.average_match_score * 100.0)}
                                                            </div>
                                                        </div>
                                                    }
                                                })
                                                .collect_view()}
                                        </Show>
                                    </div>
                                </div>
                            </div>

                            <Show when={
                                let has_errors = !recent_errors.is_empty();
                                move || has_errors
                            }>
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">"Recent Errors"</h3>
                                        {recent_errors
                                            .iter()
                                            .map(|err| {
                                                view! {
                                                    <div role="alert" class="alert alert-error text-sm py-2">
                                                        <span>{err.clone()}</span>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            </Show>
                        </div>
                    }
                    .into_any()
                }
            }}
        </Show>
    }
}
