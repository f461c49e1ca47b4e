use crate::error::{DristiError, Result};
use dristi_common::{BackendProfile, Endpoints, PollPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ベースURLを上書きする環境変数
pub const BASE_URL_ENV: &str = "DRISTI_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub profile: BackendProfile,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        let poll = PollPolicy::default();
        Self {
            base_url: "http://localhost:8000".into(),
            profile: BackendProfile::Kiosk,
            poll_interval_ms: poll.interval.as_millis() as u64,
            max_poll_attempts: poll.max_attempts,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 設定ディレクトリ（~/.config/dristi）
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DristiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("dristi"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// URLの優先順位を適用する: フラグ > 環境変数 > 設定ファイル
    ///
    /// 空白だけの値は無視する。
    pub fn resolve_url(mut self, env_url: Option<String>, flag_url: Option<String>) -> Self {
        let usable = |url: Option<String>| url.filter(|u| !u.trim().is_empty());
        if let Some(url) = usable(flag_url).or_else(|| usable(env_url)) {
            self.base_url = url;
        }
        self
    }

    /// 環境変数`DRISTI_API_URL`
    pub fn env_url() -> Option<String> {
        std::env::var(BASE_URL_ENV).ok()
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url, self.profile)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts.max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
