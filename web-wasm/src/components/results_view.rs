//! 捜索結果の表示

use crate::app::use_app;
use dristi_common::{format_confidence, MatchResult, ResultsView};
use leptos::prelude::*;
use web_sys::HtmlImageElement;

#[component]
pub fn ResultsPanel(results: ResultsView) -> impl IntoView {
    match results {
        ResultsView::Error(message) => view! {
            <div class="results-error">
                <p class="error-message">{message}</p>
            </div>
        }
        .into_any(),
        ResultsView::Empty => view! {
            <div class="no-results">
                <p>"No matches found"</p>
            </div>
        }
        .into_any(),
        ResultsView::Matches(summary) => view! {
            <div class="results-summary">
                <div class="stat">
                    <span class="stat-value">{summary.count_label()}</span>
                    <span class="stat-label">"Matches"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{summary.best_confidence_label()}</span>
                    <span class="stat-label">"Best match"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{summary.camera_count}</span>
                    <span class="stat-label">"Cameras"</span>
                </div>
            </div>
            <div class="results-grid">
                {summary.shown.into_iter().map(|m| view! { <MatchCard result=m /> }).collect_view()}
            </div>
        }
        .into_any(),
    }
}

#[component]
fn MatchCard(result: MatchResult) -> impl IntoView {
    let snapshot = use_app().client().endpoints().snapshot(&result.snapshot);

    view! {
        <div class="match-card">
            <img
                src=snapshot
                alt=result.camera_name.clone()
                loading="lazy"
                on:error=|ev| {
                    let img: HtmlImageElement = event_target(&ev);
                    let _ = web_sys::HtmlElement::style(&img).set_property("opacity", "0.3");
                }
            />
            <div class="match-info">
                <h4>{result.camera_name}</h4>
                <p class="confidence">{format_confidence(result.confidence)}</p>
                <p>"Time: " {result.time_formatted}</p>
                <p class="text-muted">"Frame " {result.frame_number}</p>
            </div>
        </div>
    }
}
