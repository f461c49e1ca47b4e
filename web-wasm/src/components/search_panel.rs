//! 捜索パネル（写真選択 → 送信 → ポーリング → 結果）

use crate::app::use_app;
use crate::components::progress_bar::ProgressBar;
use crate::components::results_view::ResultsPanel;
use crate::components::upload_area::{read_photo, UploadArea};
use dristi_common::{run_search, PollPolicy, Section, SearchWorkflow};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// セクションの表示切り替え
fn section_class(current: Section, own: Section) -> &'static str {
    if current == own {
        "section active"
    } else {
        "section hidden"
    }
}

#[component]
pub fn SearchPanel() -> impl IntoView {
    let ctx = use_app();
    let workflow = RwSignal::new(SearchWorkflow::new());
    let policy = PollPolicy::default();

    let section = Signal::derive(move || workflow.with(|w| w.section()));
    let attempt = Signal::derive(move || workflow.with(|w| w.attempt()));

    let on_file = move |file: web_sys::File| {
        spawn_local(async move {
            let (photo, data_url) = match read_photo(file).await {
                Ok(read) => read,
                Err(message) => {
                    gloo::dialogs::alert(&message);
                    return;
                }
            };
            let selected = workflow.try_update(|w| w.select_photo(photo, Some(data_url)));
            if let Some(Err(e)) = selected {
                gloo::dialogs::alert(&e.to_string());
            }
        });
    };

    let on_search = move |_| {
        let Some(ticket) = workflow.try_update(|w| w.begin_search()).flatten() else {
            return;
        };
        let client = ctx.client();
        let cameras = ctx.cameras();
        if let Some(line) = cameras.search_info().log_line() {
            gloo::console::log!(line);
        }

        spawn_local(async move {
            let outcome = run_search(
                &*client,
                &cameras,
                &ticket.photo,
                policy,
                gloo::timers::future::sleep,
                |search_id| workflow.update(|w| w.search_submitted(&ticket, search_id)),
                |progress| {
                    workflow
                        .try_update(|w| w.record_progress(&ticket, &progress))
                        .unwrap_or(false)
                },
            )
            .await;
            workflow.update(|w| w.finish(&ticket, outcome));
        });
    };

    let on_new_search = move |_| workflow.update(|w| w.reset());

    view! {
        <section class="search-panel">
            <div class=move || section_class(section.get(), Section::Idle)>
                <h2>"Search for a missing person"</h2>
                <UploadArea on_file=on_file />
                {move || {
                    workflow
                        .with(|w| w.error().map(str::to_string))
                        .map(|e| view! { <p class="error-message">{e}</p> })
                }}
            </div>

            <div class=move || section_class(section.get(), Section::Preview)>
                {move || {
                    workflow
                        .with(|w| w.selected().and_then(|s| s.preview_url.clone()))
                        .map(|src| view! { <img class="photo-preview" src=src alt="Selected photo" /> })
                }}
                <div class="preview-actions">
                    <button class="btn btn-primary" on:click=on_search>"Start Search"</button>
                    <button class="btn btn-secondary" on:click=on_new_search>"Choose another photo"</button>
                </div>
            </div>

            <div class=move || section_class(section.get(), Section::Loading)>
                <ProgressBar attempt=attempt max_attempts=policy.max_attempts />
                {move || {
                    workflow
                        .with(|w| w.search_id().map(str::to_string))
                        .map(|id| view! { <p class="text-muted">"Search ID: " {id}</p> })
                }}
            </div>

            <div class=move || section_class(section.get(), Section::Results)>
                {move || workflow.with(|w| w.results().cloned()).map(|results| view! { <ResultsPanel results=results /> })}
                <button class="btn btn-primary" on:click=on_new_search>"New Search"</button>
            </div>
        </section>
    }
}
