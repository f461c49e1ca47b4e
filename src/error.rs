use dristi_common::{ApiError, RegistryError, SearchError, StorageError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DristiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Api(ApiError),

    /// 未認証・セッション切れ（ログイン案内付き）
    #[error("{0}。`dristi login <username>` でログインしてください")]
    AuthRequired(ApiError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("ストレージエラー: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("カメラが見つかりません: {0}")]
    CameraNotFound(String),

    #[error("ログインしていません。`dristi login <username>` でログインしてください")]
    NotLoggedIn,

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for DristiError {
    fn from(err: ApiError) -> Self {
        if err.is_auth_failure() {
            DristiError::AuthRequired(err)
        } else {
            DristiError::Api(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, DristiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_carries_login_hint() {
        let expired = DristiError::from(ApiError::SessionExpired);
        assert!(matches!(expired, DristiError::AuthRequired(_)));
        assert!(expired.to_string().contains("dristi login"));

        let missing = DristiError::from(ApiError::NotAuthenticated);
        assert!(missing.to_string().starts_with("Not authenticated"));
        assert!(missing.to_string().contains("dristi login"));
    }

    #[test]
    fn test_other_api_errors_have_no_hint() {
        let err = DristiError::from(ApiError::backend(500, "boom"));
        assert!(matches!(err, DristiError::Api(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
