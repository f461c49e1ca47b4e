//! バックエンドのエンドポイント定義
//!
//! 同じ契約の2つのデプロイ形態を`BackendProfile`で切り替える。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// デプロイプロファイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendProfile {
    /// 捜索キオスク（`/api/health`, `/api/...`）
    #[default]
    Kiosk,
    /// ダッシュボード（`/health`, `/api/v1/...`）
    Dashboard,
}

impl BackendProfile {
    fn health_path(&self) -> &'static str {
        match self {
            BackendProfile::Kiosk => "/api/health",
            BackendProfile::Dashboard => "/health",
        }
    }

    fn api_prefix(&self) -> &'static str {
        match self {
            BackendProfile::Kiosk => "/api",
            BackendProfile::Dashboard => "/api/v1",
        }
    }
}

impl FromStr for BackendProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kiosk" | "a" => Ok(BackendProfile::Kiosk),
            "dashboard" | "b" => Ok(BackendProfile::Dashboard),
            _ => Err(format!("Unknown profile: {}. Use kiosk or dashboard", s)),
        }
    }
}

impl fmt::Display for BackendProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendProfile::Kiosk => write!(f, "kiosk"),
            BackendProfile::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// URL組み立て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    profile: BackendProfile,
}

impl Endpoints {
    /// `base_url`が空なら同一オリジンの相対URLになる
    pub fn new(base_url: &str, profile: BackendProfile) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            profile,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn profile(&self) -> BackendProfile {
        self.profile
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn health(&self) -> String {
        self.url(self.profile.health_path())
    }

    pub fn upload(&self) -> String {
        self.url("/upload")
    }

    pub fn encode(&self) -> String {
        self.url("/encode")
    }

    pub fn recognize(&self) -> String {
        self.url("/recognize")
    }

    pub fn search(&self, use_cctv: bool) -> String {
        self.url(&format!("/api/search?use_cctv={}", use_cctv))
    }

    pub fn search_results(&self, search_id: &str) -> String {
        self.url(&format!("/api/search-results/{}", search_id))
    }

    /// スナップショット画像のURL（絶対URLはそのまま）
    pub fn snapshot(&self, file: &str) -> String {
        if file.starts_with("http://") || file.starts_with("https://") || file.starts_with('/') {
            return file.to_string();
        }
        self.url(&format!("/api/snapshot/{}", file))
    }

    pub fn cameras(&self) -> String {
        self.url("/api/cameras")
    }

    pub fn register(&self) -> String {
        self.url(&format!("{}/auth/register", self.profile.api_prefix()))
    }

    pub fn login(&self) -> String {
        self.url(&format!("{}/auth/login", self.profile.api_prefix()))
    }

    pub fn targets(&self) -> String {
        self.url(&format!("{}/targets", self.profile.api_prefix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kiosk_paths() {
        let ep = Endpoints::new("http://localhost:8000/", BackendProfile::Kiosk);
        assert_eq!(ep.health(), "http://localhost:8000/api/health");
        assert_eq!(ep.search(true), "http://localhost:8000/api/search?use_cctv=true");
        assert_eq!(ep.search_results("abc123"), "http://localhost:8000/api/search-results/abc123");
        assert_eq!(ep.targets(), "http://localhost:8000/api/targets");
    }

    #[test]
    fn test_dashboard_paths() {
        let ep = Endpoints::new("https://project-drishti.onrender.com", BackendProfile::Dashboard);
        assert_eq!(ep.health(), "https://project-drishti.onrender.com/health");
        assert_eq!(ep.login(), "https://project-drishti.onrender.com/api/v1/auth/login");
        assert_eq!(ep.targets(), "https://project-drishti.onrender.com/api/v1/targets");
        assert_eq!(ep.upload(), "https://project-drishti.onrender.com/upload");
    }

    #[test]
    fn test_same_origin_base() {
        let ep = Endpoints::new("", BackendProfile::Kiosk);
        assert_eq!(ep.search(false), "/api/search?use_cctv=false");
    }

    #[test]
    fn test_snapshot_url() {
        let ep = Endpoints::new("http://h", BackendProfile::Kiosk);
        assert_eq!(ep.snapshot("s1.jpg"), "http://h/api/snapshot/s1.jpg");
        assert_eq!(ep.snapshot("https://cdn/x.jpg"), "https://cdn/x.jpg");
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Dashboard".parse::<BackendProfile>(), Ok(BackendProfile::Dashboard));
        assert_eq!("kiosk".parse::<BackendProfile>(), Ok(BackendProfile::Kiosk));
        assert!("other".parse::<BackendProfile>().is_err());
    }
}
