//! 設定ファイルテスト

use dristi_client::config::Config;
use dristi_common::BackendProfile;
use std::time::Duration;
use tempfile::tempdir;

/// ファイルがなければ既定値
#[test]
fn test_load_missing_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.base_url, "http://localhost:8000");
    assert_eq!(config.profile, BackendProfile::Kiosk);
}

/// 既定のポーリングは1秒間隔・120回
#[test]
fn test_default_poll_policy() {
    let policy = Config::default().poll_policy();
    assert_eq!(policy.interval, Duration::from_secs(1));
    assert_eq!(policy.max_attempts, 120);
}

/// 保存して読み直す
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sub").join("config.json");

    let config = Config {
        base_url: "https://dristi.example.org".to_string(),
        profile: BackendProfile::Dashboard,
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

/// 一部の項目だけのファイルは残りを既定値で補う
#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"profile":"dashboard"}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.profile, BackendProfile::Dashboard);
    assert_eq!(config.max_poll_attempts, 120);
}

/// URLの優先順位: フラグ > 環境変数 > 設定ファイル
#[test]
fn test_url_precedence() {
    let file = Config {
        base_url: "http://from-file".to_string(),
        ..Default::default()
    };

    let both = file
        .clone()
        .resolve_url(Some("http://from-env".to_string()), Some("http://from-flag".to_string()));
    assert_eq!(both.endpoints().base_url(), "http://from-flag");

    let env_only = file.clone().resolve_url(Some("http://from-env".to_string()), None);
    assert_eq!(env_only.endpoints().base_url(), "http://from-env");

    let blank = file.clone().resolve_url(Some("  ".to_string()), Some(String::new()));
    assert_eq!(blank.endpoints().base_url(), "http://from-file");
}

/// 試行回数0は1回に切り上げる
#[test]
fn test_poll_policy_min_attempts() {
    let config = Config {
        max_poll_attempts: 0,
        ..Default::default()
    };
    assert_eq!(config.poll_policy().max_attempts, 1);
}
