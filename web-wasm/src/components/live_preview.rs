//! ライブプレビュー（サンプル映像のグリッド）

use dristi_common::{Playback, SAMPLE_FEEDS};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

fn play(video: HtmlVideoElement, label: &'static str) {
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                gloo::console::warn!(format!("{} playback failed: {:?}", label, e));
            }
        }),
        Err(e) => gloo::console::warn!(format!("{} playback failed: {:?}", label, e)),
    }
}

#[component]
pub fn LivePreview() -> impl IntoView {
    let (playback, set_playback) = signal(Playback::default());
    let videos: Vec<NodeRef<html::Video>> = SAMPLE_FEEDS.iter().map(|_| NodeRef::new()).collect();

    // 表示時に再生を開始する
    let refs = videos.clone();
    Effect::new(move |_| {
        for (node, feed) in refs.iter().zip(SAMPLE_FEEDS) {
            if let Some(video) = node.get() {
                play(video, feed.label);
            }
        }
    });

    let refs = videos.clone();
    let on_toggle = move |_| {
        let next = playback.get_untracked().toggle();
        for (node, feed) in refs.iter().zip(SAMPLE_FEEDS) {
            let Some(video) = node.get_untracked() else {
                continue;
            };
            if next.is_playing() {
                play(video, feed.label);
            } else if let Err(e) = video.pause() {
                gloo::console::warn!(format!("{} pause failed: {:?}", feed.label, e));
            }
        }
        set_playback.set(next);
    };

    view! {
        <section class="live-preview">
            <div class="section-header">
                <h2>"Live Preview"</h2>
                <button class="btn btn-secondary" on:click=on_toggle>
                    {move || playback.get().button_label()}
                </button>
            </div>
            <div class="video-grid">
                {SAMPLE_FEEDS
                    .iter()
                    .zip(videos)
                    .map(|(feed, node)| {
                        view! {
                            <div class="video-cell">
                                <video node_ref=node src=feed.url muted=true />
                                <span class="video-label">{feed.label}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
