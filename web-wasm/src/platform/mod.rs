//! ブラウザ実装（fetch / localStorage / location）

pub mod fetch;
pub mod navigator;
pub mod store;

use dristi_common::{ApiClient, BackendProfile, Endpoints};

pub use fetch::FetchTransport;
pub use navigator::BrowserNavigator;
pub use store::BrowserStore;

/// ブラウザで使う具体的なクライアント
pub type WebClient = ApiClient<FetchTransport, BrowserStore, BrowserNavigator>;

/// 同一オリジンのバックエンドに向けたクライアント
pub fn create_client() -> WebClient {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    ApiClient::new(
        FetchTransport,
        BrowserStore,
        BrowserNavigator,
        Endpoints::new(&origin, BackendProfile::default()),
    )
}

/// 現在のパス（ルーティング用）
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
