//! 対象者一覧と作成フォーム

use crate::app::use_app;
use crate::components::upload_area::{read_photo, UploadArea};
use dristi_common::{
    Navigator, Notice, Page, PhotoFile, TargetAction, TargetCard, TargetListView, TargetPersonForm,
};
use dristi_common::page::{ADD_TARGET_LABEL, PLACEHOLDER_IMAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlImageElement;

#[component]
pub fn TargetList() -> impl IntoView {
    let ctx = use_app();
    let (reload, set_reload) = signal(0u32);
    let show_form = RwSignal::new(false);
    let targets = LocalResource::new(move || {
        reload.track();
        let client = ctx.client();
        async move { client.get_target_persons().await }
    });

    let on_action = move |action: TargetAction| match action {
        TargetAction::Search(id) => {
            gloo::console::log!(format!("search target {}", id));
            ctx.client().navigator().redirect(Page::Search.path());
        }
        TargetAction::View(id) => {
            gloo::console::log!(format!("view target {}", id));
            ctx.notify(Notice::info(format!("Target {}", id)));
        }
    };

    view! {
        <section class="targets">
            <div class="section-header">
                <h2>"Target Persons"</h2>
                <button class="btn btn-primary" on:click=move |_| show_form.update(|open| *open = !*open)>
                    {move || if show_form.get() { "Close" } else { ADD_TARGET_LABEL }}
                </button>
            </div>
            <Show when=move || show_form.get()>
                <CreateTargetForm on_created=move || {
                    show_form.set(false);
                    set_reload.update(|n| *n += 1);
                } />
            </Show>
            <Suspense fallback=|| view! { <p class="text-muted">"Loading..."</p> }>
                {move || {
                    targets
                        .get()
                        .map(|result| match result.take() {
                            Ok(list) => target_grid(TargetListView::from_targets(&list), on_action, show_form).into_any(),
                            Err(e) => view! { <p class="error-message">{e.to_string()}</p> }.into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}

fn target_grid<F>(view: TargetListView, on_action: F, show_form: RwSignal<bool>) -> impl IntoView
where
    F: Fn(TargetAction) + Copy + 'static,
{
    let call_to_action = view.call_to_action();
    match view {
        TargetListView::Empty => view! {
            <div class="empty-state card">
                <p>"No target persons yet"</p>
                <p class="text-muted">"Create a target person to start searching."</p>
                {call_to_action.map(|label| view! {
                    <button class="btn btn-primary" on:click=move |_| show_form.set(true)>{label}</button>
                })}
            </div>
        }
        .into_any(),
        TargetListView::Cards(cards) => view! {
            <div class="target-grid">
                {cards.into_iter().map(|card| target_card(card, on_action)).collect_view()}
            </div>
        }
        .into_any(),
    }
}

fn target_card<F>(card: TargetCard, on_action: F) -> impl IntoView
where
    F: Fn(TargetAction) + Copy + 'static,
{
    let search_id = card.id.clone();
    let view_id = card.id.clone();

    view! {
        <div class="target-card card">
            <img
                src=card.image_url
                alt=card.name.clone()
                on:error=|ev| {
                    let img: HtmlImageElement = event_target(&ev);
                    if img.src() != PLACEHOLDER_IMAGE {
                        img.set_src(PLACEHOLDER_IMAGE);
                    }
                }
            />
            <h3>{card.name}</h3>
            {card.description.map(|d| view! { <p class="description">{d}</p> })}
            <p class="text-muted">"Created " {card.created_label}</p>
            <div class="card-actions">
                <button class="btn btn-primary" on:click=move |_| on_action(TargetAction::Search(search_id.clone()))>
                    "Search"
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_action(TargetAction::View(view_id.clone()))>
                    "View"
                </button>
            </div>
        </div>
    }
}

#[component]
fn CreateTargetForm<F>(on_created: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let ctx = use_app();
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let photo = RwSignal::new(None::<PhotoFile>);
    let (busy, set_busy) = signal(false);

    let on_files = move |file: web_sys::File| {
        spawn_local(async move {
            match read_photo(file).await {
                Ok((file, _)) => photo.set(Some(file)),
                Err(message) => gloo::dialogs::alert(&message),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(file) = photo.get_untracked() else {
            ctx.notify(Notice::error("Please fill in all required fields"));
            return;
        };
        let form = TargetPersonForm {
            name: name.get_untracked().trim().to_string(),
            description: Some(description.get_untracked()).filter(|d| !d.trim().is_empty()),
            photo: file,
        };
        if form.name.is_empty() {
            ctx.notify(Notice::error("Please fill in all required fields"));
            return;
        }

        set_busy.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match client.create_target_person(&form).await {
                Ok(_) => {
                    ctx.notify(Notice::success("Target person created"));
                    name.set(String::new());
                    description.set(String::new());
                    photo.set(None);
                    on_created();
                }
                Err(e) => ctx.notify(Notice::error(e.to_string())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="card target-form" on:submit=on_submit>
            <label>"Name"</label>
            <input type="text" bind:value=name />
            <label>"Description"</label>
            <textarea
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            />
            <UploadArea on_file=on_files />
            {move || photo.get().map(|p| view! { <p class="text-muted">{p.file_name}</p> })}
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                "Create Target"
            </button>
        </form>
    }
}
