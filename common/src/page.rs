//! ページコントローラ（ダッシュボード）
//!
//! パス文字列だけで表示ページを決める静的ルートテーブルと、
//! 各ページのハイドレーション用表示モデル。

use crate::types::{TargetPerson, User};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 画像読み込み失敗時の代替画像
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

/// ページ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Dashboard,
    Targets,
    Cctv,
    Search,
    Results,
    Other,
}

/// ルートテーブル（部分一致、上から順に判定）
// 部分一致で先勝ちなので、"search-results"を拾えるよう"results"を"search"より前に置く
const ROUTES: &[(&str, Page)] = &[
    ("dashboard", Page::Dashboard),
    ("targets", Page::Targets),
    ("cctv", Page::Cctv),
    ("results", Page::Results),
    ("search", Page::Search),
];

impl Page {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() || trimmed.ends_with("index.html") {
            return Page::Landing;
        }
        ROUTES
            .iter()
            .find(|(fragment, _)| trimmed.contains(fragment))
            .map(|(_, page)| *page)
            .unwrap_or(Page::Other)
    }

    /// ランディング以外は認証必須
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Page::Landing)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Landing => "/",
            Page::Dashboard => "/dashboard.html",
            Page::Targets => "/targets.html",
            Page::Cctv => "/cctv.html",
            Page::Search => "/search.html",
            Page::Results => "/results.html",
            Page::Other => "/",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Sign in",
            Page::Dashboard => "Dashboard",
            Page::Targets => "Target Persons",
            Page::Cctv => "CCTV Cameras",
            Page::Search => "Search",
            Page::Results => "Results",
            Page::Other => "DRISTI",
        }
    }
}

/// ページ初期化の判断
#[derive(Debug, Clone, PartialEq)]
pub enum PageInit {
    /// 未ログイン: ランディングへ遷移し、以降の初期化は行わない
    RedirectToLanding,
    /// ランディング（認証不要）
    Public,
    /// 認証済みページ
    Authenticated { page: Page, profile: UserProfile },
}

/// 認証ゲート
///
/// `logged_in`は`ApiClient::is_logged_in()`の結果。
pub fn init_page(path: &str, logged_in: bool, user: Option<&User>) -> PageInit {
    let page = Page::from_path(path);
    if !page.requires_auth() {
        return PageInit::Public;
    }
    if !logged_in {
        return PageInit::RedirectToLanding;
    }
    PageInit::Authenticated {
        page,
        profile: user.map(UserProfile::from_user).unwrap_or_default(),
    }
}

/// user-name / user-email 欄の表示値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl UserProfile {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.display_name().to_string(),
            email: user.email.clone().unwrap_or_default(),
        }
    }
}

/// ダッシュボードの統計（バックエンドが集計を提供するまでは0）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_searches: u64,
    pub matches_found: u64,
    pub active_jobs: u64,
}

/// 対象者カード
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
    pub created_label: String,
}

impl TargetCard {
    pub fn from_target(target: &TargetPerson) -> Self {
        Self {
            id: target.id.clone(),
            name: target.name.clone(),
            description: target.description.clone().filter(|d| !d.trim().is_empty()),
            image_url: if target.photo_path.is_empty() {
                PLACEHOLDER_IMAGE.to_string()
            } else {
                target.photo_path.clone()
            },
            created_label: format_date(&target.created_at),
        }
    }
}

/// 対象者一覧の表示
#[derive(Debug, Clone, PartialEq)]
pub enum TargetListView {
    /// 0件: 作成を促す空状態カード
    Empty,
    Cards(Vec<TargetCard>),
}

impl TargetListView {
    pub fn from_targets(targets: &[TargetPerson]) -> Self {
        if targets.is_empty() {
            TargetListView::Empty
        } else {
            TargetListView::Cards(targets.iter().map(TargetCard::from_target).collect())
        }
    }

    /// 空状態で作成フォームを開くボタンの文言
    pub fn call_to_action(&self) -> Option<&'static str> {
        match self {
            TargetListView::Empty => Some(ADD_TARGET_LABEL),
            TargetListView::Cards(_) => None,
        }
    }
}

/// 作成フォームを開くボタン
pub const ADD_TARGET_LABEL: &str = "Add Target Person";

/// カード上のアクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAction {
    Search(String),
    View(String),
}

/// 作成日時を日付表示にする（解釈できなければ元の文字列）
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
