//! プログレスバーコンポーネント

use leptos::prelude::*;

/// 試行回数から進捗率（0.0〜1.0）
pub fn progress_ratio(attempt: u32, max_attempts: u32) -> f32 {
    if max_attempts == 0 {
        return 0.0;
    }
    (attempt.min(max_attempts) as f32) / (max_attempts as f32)
}

#[component]
pub fn ProgressBar(attempt: Signal<u32>, max_attempts: u32) -> impl IntoView {
    let progress = move || progress_ratio(attempt.get(), max_attempts);

    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress() * 100.0)
                />
            </div>
            <p class="progress-text">
                {move || match attempt.get() {
                    0 => "Submitting photo...".to_string(),
                    n => format!("Searching... ({}/{})", n, max_attempts),
                }}
            </p>
        </div>
    }
}
