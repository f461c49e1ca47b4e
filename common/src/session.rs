//! 認証セッション管理
//!
//! メモリ上のセッションと永続ストレージ（authToken / currentUser）を同期する。

use crate::storage::{keys, KeyValueStore};
use crate::types::{Session, User};
use std::cell::RefCell;
use tracing::{debug, warn};

/// セッションマネージャ
///
/// アプリケーションコンテキストが所有し、ApiClientへ注入される。
#[derive(Debug)]
pub struct SessionManager<S> {
    store: S,
    current: RefCell<Option<Session>>,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// セッションを確立し、永続化する
    pub fn establish(&self, session: Session) {
        let user_json = match serde_json::to_string(&session.user) {
            Ok(json) => json,
            Err(e) => {
                warn!("currentUserのシリアライズに失敗: {}", e);
                "{}".to_string()
            }
        };
        match self.store.set(keys::AUTH_TOKEN, &session.token) {
            Err(e) => warn!("セッションの保存に失敗: {}", e),
            Ok(()) => {
                // 片方だけ残ると次回起動時に半端な状態になるのでトークンも戻す
                if let Err(e) = self.store.set(keys::CURRENT_USER, &user_json) {
                    warn!("セッションの保存に失敗: {}", e);
                    if let Err(e) = self.store.remove(keys::AUTH_TOKEN) {
                        warn!("{}の削除に失敗: {}", keys::AUTH_TOKEN, e);
                    }
                }
            }
        }
        *self.current.borrow_mut() = Some(session);
    }

    /// メモリと永続ストレージの両方を破棄する（冪等）
    pub fn clear(&self) {
        for key in [keys::AUTH_TOKEN, keys::CURRENT_USER] {
            if let Err(e) = self.store.remove(key) {
                warn!("{}の削除に失敗: {}", key, e);
            }
        }
        *self.current.borrow_mut() = None;
    }

    /// 永続ストレージから復元する
    ///
    /// トークンとユーザーが両方揃っている場合のみtrue。
    pub fn hydrate(&self) -> bool {
        let token = self.store.get(keys::AUTH_TOKEN).ok().flatten();
        let user_raw = self.store.get(keys::CURRENT_USER).ok().flatten();

        let (Some(token), Some(user_raw)) = (token, user_raw) else {
            return false;
        };
        if token.is_empty() {
            return false;
        }

        match serde_json::from_str::<User>(&user_raw) {
            Ok(user) => {
                debug!("セッションを復元");
                *self.current.borrow_mut() = Some(Session { token, user });
                true
            }
            Err(e) => {
                warn!("currentUserが壊れています: {}", e);
                false
            }
        }
    }

    /// メモリ上のトークン
    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    /// メモリ上のユーザー
    pub fn user(&self) -> Option<User> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user: User {
                username: Some("asha".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_establish_persists_both_keys() {
        let store = MemoryStore::new();
        let manager = SessionManager::new(store.clone());
        manager.establish(session());

        assert_eq!(store.get(keys::AUTH_TOKEN).unwrap().as_deref(), Some("tok-1"));
        assert!(store.get(keys::CURRENT_USER).unwrap().unwrap().contains("asha"));
        assert_eq!(manager.token().as_deref(), Some("tok-1"));
    }

    /// `currentUser`の書き込みだけ失敗するストア
    struct UserWriteFails(MemoryStore);

    impl KeyValueStore for UserWriteFails {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == keys::CURRENT_USER {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_establish_rolls_back_token_when_user_write_fails() {
        let inner = MemoryStore::new();
        let manager = SessionManager::new(UserWriteFails(inner.clone()));
        manager.establish(session());

        // メモリ上のセッションは有効なまま、永続側には何も残らない
        assert_eq!(manager.token().as_deref(), Some("tok-1"));
        assert_eq!(inner.get(keys::AUTH_TOKEN).unwrap(), None);
        assert_eq!(inner.get(keys::CURRENT_USER).unwrap(), None);
        assert!(!SessionManager::new(inner).hydrate());
    }

    #[test]
    fn test_hydrate_from_storage() {
        let store = MemoryStore::new();
        SessionManager::new(store.clone()).establish(session());

        let fresh = SessionManager::new(store);
        assert_eq!(fresh.token(), None);
        assert!(fresh.hydrate());
        assert_eq!(fresh.session(), Some(session()));
    }

    #[test]
    fn test_hydrate_requires_both_keys() {
        let store = MemoryStore::new();
        store.set(keys::AUTH_TOKEN, "tok-1").unwrap();
        let manager = SessionManager::new(store);
        assert!(!manager.hydrate());
        assert_eq!(manager.token(), None);
    }

    #[test]
    fn test_hydrate_rejects_corrupt_user() {
        let store = MemoryStore::new();
        store.set(keys::AUTH_TOKEN, "tok-1").unwrap();
        store.set(keys::CURRENT_USER, "not json").unwrap();
        assert!(!SessionManager::new(store).hydrate());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryStore::new();
        let manager = SessionManager::new(store.clone());
        manager.establish(session());

        manager.clear();
        manager.clear();

        assert!(store.is_empty());
        assert_eq!(manager.user(), None);
        assert!(!manager.hydrate());
    }
}
