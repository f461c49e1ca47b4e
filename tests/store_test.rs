//! ファイルストアテスト
//!
//! セッション・カメラ登録がファイルに永続化されることを検証

use dristi_client::store::FileStore;
use dristi_common::{keys, CameraDraft, CameraRegistry, KeyValueStore, Session, SessionManager, User};
use tempfile::tempdir;

fn user() -> User {
    User {
        username: Some("asha".to_string()),
        full_name: Some("Asha Rao".to_string()),
        email: Some("asha@example.com".to_string()),
        ..Default::default()
    }
}

/// 存在しないファイルは空として扱う
#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::in_dir(dir.path());

    assert_eq!(store.get(keys::AUTH_TOKEN).unwrap(), None);
    assert!(!store.path().exists());
}

/// 書き込んだ値を別インスタンスから読める
#[test]
fn test_set_get_remove_across_instances() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::in_dir(dir.path());
    store.set("k", "v").unwrap();

    let other = FileStore::in_dir(dir.path());
    assert_eq!(other.get("k").unwrap(), Some("v".to_string()));

    other.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

/// 親ディレクトリがなければ作成する
#[test]
fn test_creates_parent_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::in_dir(&dir.path().join("nested").join("dristi"));
    store.set("k", "v").unwrap();
    assert!(store.path().exists());
}

/// 壊れたファイルはエラーになる
#[test]
fn test_corrupt_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::in_dir(dir.path());
    std::fs::write(store.path(), "{not json").unwrap();
    assert!(store.get("k").is_err());
}

/// セッションは再起動後も復元できる
#[test]
fn test_session_survives_restart() {
    let dir = tempdir().expect("Failed to create temp dir");

    let manager = SessionManager::new(FileStore::in_dir(dir.path()));
    manager.establish(Session {
        token: "tok".to_string(),
        user: user(),
    });

    let restarted = SessionManager::new(FileStore::in_dir(dir.path()));
    assert!(restarted.hydrate());
    assert_eq!(restarted.token().as_deref(), Some("tok"));
    assert_eq!(restarted.user().unwrap().display_name(), "Asha Rao");

    restarted.clear();
    let after_logout = SessionManager::new(FileStore::in_dir(dir.path()));
    assert!(!after_logout.hydrate());
}

/// カメラ登録はファイルに保存される
#[test]
fn test_camera_registry_on_file_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let registry = CameraRegistry::new(FileStore::in_dir(dir.path()));
    let draft = CameraDraft {
        name: "Gate".to_string(),
        location: "North entrance".to_string(),
        rtsp_url: "rtsp://10.0.0.5/stream".to_string(),
        duration: String::new(),
    };
    let camera = registry.add(&draft, 1_000).unwrap();

    let reopened = CameraRegistry::new(FileStore::in_dir(dir.path()));
    assert_eq!(reopened.list(), vec![camera]);
}
