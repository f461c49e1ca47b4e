//! CCTVカメラ登録パネル

use crate::app::use_app;
use dristi_common::{
    CameraConfig, CameraDraft, Notice, CONNECTION_TEST_DELAY, CONNECTION_TEST_MESSAGE,
    DEFAULT_DURATION_SECS,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CameraRegistryPanel() -> impl IntoView {
    let ctx = use_app();
    let cameras = RwSignal::new(ctx.cameras().list());
    let active = RwSignal::new(ctx.cameras().is_active());
    let (show_modal, set_show_modal) = signal(false);

    let refresh = move || cameras.set(ctx.cameras().list());

    let on_save_config = move |_| match ctx.cameras().activate() {
        Ok(count) => {
            gloo::console::log!(format!("CCTV configuration active with {} camera(s)", count));
            active.set(true);
            ctx.notify(Notice::success(format!(
                "CCTV configuration saved ({} camera(s))",
                count
            )));
        }
        Err(e) => ctx.notify(Notice::error(e.to_string())),
    };

    view! {
        <section class="cctv-registry">
            <div class="section-header">
                <h2>"CCTV Cameras"</h2>
                <span class=move || if active.get() { "badge active" } else { "badge" }>
                    {move || if active.get() { "Active" } else { "Inactive" }}
                </span>
            </div>

            <Show
                when=move || !cameras.get().is_empty()
                fallback=|| view! { <p class="text-muted">"No cameras configured"</p> }
            >
                <div class="camera-list">
                    <For
                        each=move || cameras.get()
                        key=|camera| camera.id.clone()
                        children=move |camera| view! { <CameraRow camera=camera on_removed=refresh /> }
                    />
                </div>
            </Show>

            <div class="camera-actions">
                <button class="btn btn-secondary" on:click=move |_| set_show_modal.set(true)>
                    "Add Camera"
                </button>
                <button class="btn btn-primary" on:click=on_save_config>
                    "Save Configuration"
                </button>
            </div>

            <Show when=move || show_modal.get()>
                <AddCameraModal
                    on_close=move || set_show_modal.set(false)
                    on_added=refresh
                />
            </Show>
        </section>
    }
}

#[component]
fn CameraRow<F>(camera: CameraConfig, on_removed: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let ctx = use_app();
    let (testing, set_testing) = signal(false);
    let test_id = camera.id.clone();
    let remove_id = camera.id.clone();

    let on_test = move |_| {
        set_testing.set(true);
        gloo::console::log!(format!("testing camera {}", test_id));
        spawn_local(async move {
            gloo::timers::future::sleep(CONNECTION_TEST_DELAY).await;
            ctx.notify(Notice::info(CONNECTION_TEST_MESSAGE));
            set_testing.set(false);
        });
    };

    let on_delete = move |_| {
        if !gloo::dialogs::confirm("Are you sure you want to delete this camera?") {
            return;
        }
        match ctx.cameras().remove(&remove_id) {
            Ok(true) => {
                ctx.notify(Notice::success("Camera removed"));
                on_removed();
            }
            Ok(false) => {}
            Err(e) => ctx.notify(Notice::error(e.to_string())),
        }
    };

    view! {
        <div class="camera-item card">
            <div class="camera-info">
                <h4>{camera.name}</h4>
                <p>{camera.location}</p>
                <p class="text-muted">{camera.rtsp_url}</p>
                <p class="text-muted">{format!("{}s per capture", camera.duration)}</p>
            </div>
            <div class="camera-buttons">
                <button class="btn btn-secondary" on:click=on_test disabled=move || testing.get()>
                    {move || if testing.get() { "Testing..." } else { "Test Connection" }}
                </button>
                <button class="btn btn-danger" on:click=on_delete>"Delete"</button>
            </div>
        </div>
    }
}

#[component]
fn AddCameraModal<C, A>(on_close: C, on_added: A) -> impl IntoView
where
    C: Fn() + Copy + 'static,
    A: Fn() + Copy + 'static,
{
    let ctx = use_app();
    let name = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let rtsp_url = RwSignal::new(String::new());
    let duration = RwSignal::new(DEFAULT_DURATION_SECS.to_string());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = CameraDraft {
            name: name.get_untracked(),
            location: location.get_untracked(),
            rtsp_url: rtsp_url.get_untracked(),
            duration: duration.get_untracked(),
        };
        match ctx.cameras().add(&draft, js_sys::Date::now() as i64) {
            Ok(camera) => {
                ctx.notify(Notice::success(format!("Camera \"{}\" added", camera.name)));
                on_added();
                on_close();
            }
            Err(e) => ctx.notify(Notice::error(e.to_string())),
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close()>
            <form
                class="modal"
                on:click=|ev| ev.stop_propagation()
                on:submit=on_submit
            >
                <h3>"Add CCTV Camera"</h3>
                <label>"Camera name"</label>
                <input type="text" bind:value=name />
                <label>"Location"</label>
                <input type="text" bind:value=location />
                <label>"RTSP URL"</label>
                <input type="text" placeholder="rtsp://" bind:value=rtsp_url />
                <label>"Capture duration (seconds)"</label>
                <input type="number" min="1" bind:value=duration />
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close()>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary">"Add Camera"</button>
                </div>
            </form>
        </div>
    }
}
