//! Admin Page Component
//!
//! Stored tallies as a table, the xlsx export and recent storage problems.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::error;

use vote_store::Item;

use crate::commands;
use crate::context::use_app_context;

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = use_app_context();
    let (rows, set_rows) = signal(Vec::<Item>::new());
    let (status, set_status) = signal::<Option<String>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let problems = RwSignal::new(Vec::<String>::new());

    // Reload once storage is ready, and on demand
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        if !ctx.storage_ready.get() {
            return;
        }
        spawn_local(async move {
            match commands::load_all(ctx).await {
                Ok(loaded) => set_rows.set(loaded),
                Err(e) => {
                    error!("[ADMIN] Failed to load items: {}", e);
                    set_status.set(Some(e.to_string()));
                }
            }
            problems.set(
                rolling_logger::recent_problems()
                    .iter()
                    .rev()
                    .map(ToString::to_string)
                    .collect(),
            );
        });
    });

    let export = move |_| {
        let message = rows.with_untracked(|items| match commands::export_snapshot(ctx, items) {
            Ok(file_name) => format!("Exported {}", file_name),
            Err(e) => {
                error!("[EXPORT] {}", e);
                e.to_string()
            }
        });
        set_status.set(Some(message));
    };

    view! {
        <div class="admin-page">
            <header class="admin-header">
                <h1>"Vote Admin"</h1>
                <A href="/" attr:class="board-link">"Back to board"</A>
                <button class="reload-btn" on:click=move |_| set_reload_trigger.update(|n| *n += 1)>
                    "Reload"
                </button>
                <button class="export-btn" on:click=export>"Export xlsx"</button>
            </header>
            {move || status.get().map(|msg| view! { <p class="admin-status">{msg}</p> })}
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Name"</th>
                        <th>"Votes"</th>
                        <th>"Image"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || !rows.with(Vec::is_empty)
                        fallback=|| view! { <tr><td colspan="4" class="no-data">"No data"</td></tr> }
                    >
                        <For
                            each=move || rows.get()
                            key=|item| (item.id, item.votes)
                            children=move |item| {
                                let image = match item.image.clone() {
                                    Some(src) => view! { <img class="thumb" src=src alt=item.name.clone() /> }.into_any(),
                                    None => view! { <span>"-"</span> }.into_any(),
                                };
                                view! {
                                    <tr>
                                        <td>{item.id}</td>
                                        <td>{item.name.clone()}</td>
                                        <td>{item.votes}</td>
                                        <td>{image}</td>
                                    </tr>
                                }
                            }
                        />
                    </Show>
                </tbody>
            </table>
            <Show when=move || !problems.with(Vec::is_empty)>
                <section class="admin-log">
                    <h2>"Recent problems"</h2>
                    <ul>
                        {move || problems.get().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                    </ul>
                </section>
            </Show>
        </div>
    }
}
