//! ダッシュボード統計

use dristi_common::DashboardStats;
use leptos::prelude::*;

#[component]
pub fn Dashboard() -> impl IntoView {
    // 集計APIが用意されるまでは0を表示する
    let stats = DashboardStats::default();

    view! {
        <section class="stats-grid">
            <StatCard label="Total Searches" value=stats.total_searches />
            <StatCard label="Matches Found" value=stats.matches_found />
            <StatCard label="Active Jobs" value=stats.active_jobs />
        </section>
        <section class="quick-actions">
            <a class="btn btn-primary" href="/search.html">"New Search"</a>
            <a class="btn btn-secondary" href="/targets.html">"Target Persons"</a>
            <a class="btn btn-secondary" href="/cctv.html">"CCTV Cameras"</a>
        </section>
    }
}

#[component]
fn StatCard(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-value">{value}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
