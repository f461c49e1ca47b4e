//! エラー型定義
//!
//! - ApiError: バックエンド呼び出しの失敗（通信/バックエンド/認証）
//! - ValidationError: ネットワーク呼び出し前に弾くクライアント側検証
//! - StorageError: キーバリューストレージの読み書き失敗

use thiserror::Error;

/// API呼び出しエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// ネットワーク到達不能・タイムアウトなど
    #[error("{0}")]
    Transport(String),

    /// 非2xx応答（detail/messageをそのまま保持）
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// 認証付きリクエストで401を受けた
    #[error("Session expired")]
    SessionExpired,

    /// セッションが存在しない
    #[error("Not authenticated")]
    NotAuthenticated,

    /// レスポンスの形式が想定外
    #[error("Invalid response: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        ApiError::Backend {
            status,
            message: message.into(),
        }
    }

    /// 強制ログアウトを伴うエラーか
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::NotAuthenticated)
    }
}

/// 入力検証エラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select a valid image file")]
    NotAnImage { mime: String },

    #[error("File is too large. Maximum size is 10MB")]
    TooLarge { size: u64, limit: u64 },

    #[error("Please fill in all required fields")]
    MissingField(&'static str),

    #[error("Duration must be a whole number of seconds")]
    InvalidDuration(String),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    WeakPassword,
}

/// ストレージエラー
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_message() {
        assert_eq!(ApiError::SessionExpired.to_string(), "Session expired");
    }

    #[test]
    fn test_backend_message_is_verbatim() {
        let err = ApiError::backend(400, "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_auth_failure_classification() {
        assert!(ApiError::SessionExpired.is_auth_failure());
        assert!(ApiError::NotAuthenticated.is_auth_failure());
        assert!(!ApiError::Transport("offline".into()).is_auth_failure());
    }

    #[test]
    fn test_validation_converts_into_api_error() {
        let err: ApiError = ValidationError::MissingField("name").into();
        assert!(matches!(err, ApiError::Validation(ValidationError::MissingField("name"))));
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn test_storage_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: StorageError = json_error.into();
        assert!(matches!(error, StorageError::Json(_)));
    }
}
