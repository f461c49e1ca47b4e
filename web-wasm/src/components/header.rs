//! ヘッダーコンポーネント

use crate::app::use_app;
use dristi_common::{Page, UserProfile};
use leptos::prelude::*;

const NAV: &[Page] = &[Page::Dashboard, Page::Targets, Page::Search, Page::Cctv];

#[component]
pub fn Header(page: Page, profile: UserProfile) -> impl IntoView {
    let ctx = use_app();

    let on_logout = move |_| {
        if gloo::dialogs::confirm("Are you sure you want to logout?") {
            ctx.client().logout();
        }
    };

    view! {
        <header class="header">
            <h1>"DRISTI"</h1>
            <nav>
                {NAV
                    .iter()
                    .map(|p| {
                        view! {
                            <a href=p.path() class:active=*p == page>
                                {p.title()}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="user-info">
                <span class="user-name">{profile.name}</span>
                <span class="user-email">{profile.email}</span>
                <button class="btn btn-secondary" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </header>
    }
}
