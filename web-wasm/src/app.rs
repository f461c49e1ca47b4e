//! メインアプリケーションコンポーネント
//!
//! パスからページを決め、未ログインならランディングへ戻す。

use crate::components::{
    camera_registry::CameraRegistryPanel, dashboard::Dashboard, header::Header,
    live_preview::LivePreview, login_page::LoginPage, search_panel::SearchPanel,
    target_list::TargetList,
};
use crate::platform::{create_client, current_path, BrowserStore, WebClient};
use dristi_common::{init_page, CameraRegistry, Navigator, Notice, Page, PageInit, LANDING_PAGE};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use std::rc::Rc;

/// アプリ全体で共有する状態
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<Rc<WebClient>, LocalStorage>,
    cameras: StoredValue<CameraRegistry<BrowserStore>>,
    pub notice: RwSignal<Option<Notice>>,
}

impl AppContext {
    pub fn new(client: WebClient) -> Self {
        Self {
            client: StoredValue::new_local(Rc::new(client)),
            cameras: StoredValue::new(CameraRegistry::new(BrowserStore)),
            notice: RwSignal::new(None),
        }
    }

    pub fn client(&self) -> Rc<WebClient> {
        self.client.get_value()
    }

    pub fn cameras(&self) -> CameraRegistry<BrowserStore> {
        self.cameras.get_value()
    }

    /// メッセージを表示する（期限付きなら時間経過で消える）
    pub fn notify(&self, notice: Notice) {
        let signal = self.notice;
        if let Some(duration) = notice.duration {
            let shown = notice.clone();
            Timeout::new(duration.as_millis() as u32, move || {
                // 後から出たメッセージは消さない
                if signal.get_untracked().as_ref() == Some(&shown) {
                    signal.set(None);
                }
            })
            .forget();
        }
        signal.set(Some(notice));
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(create_client());
    provide_context(ctx);

    let client = ctx.client();
    let init = init_page(
        &current_path(),
        client.is_logged_in(),
        client.current_user().as_ref(),
    );

    match init {
        PageInit::RedirectToLanding => {
            client.navigator().redirect(LANDING_PAGE);
            ().into_any()
        }
        PageInit::Public => view! {
            <div class="container">
                <NoticeBanner />
                <LoginPage />
            </div>
        }
        .into_any(),
        PageInit::Authenticated { page, profile } => view! {
            <div class="container">
                <Header page=page profile=profile />
                <NoticeBanner />
                {page_view(page)}
            </div>
        }
        .into_any(),
    }
}

fn page_view(page: Page) -> AnyView {
    match page {
        Page::Targets => view! { <TargetList /> }.into_any(),
        Page::Cctv => view! {
            <CameraRegistryPanel />
            <LivePreview />
        }
        .into_any(),
        Page::Search | Page::Results => view! { <SearchPanel /> }.into_any(),
        Page::Dashboard | Page::Landing | Page::Other => view! { <Dashboard /> }.into_any(),
    }
}

#[component]
fn NoticeBanner() -> impl IntoView {
    let ctx = use_app();
    move || {
        ctx.notice.get().map(|notice| {
            let class = notice.class();
            view! {
                <div class=class on:click=move |_| ctx.notice.set(None)>
                    {notice.text}
                </div>
            }
        })
    }
}
