//! バックエンドとの送受信型
//!
//! CLIとWeb(WASM)で共有される型:
//! - User / Session: 認証状態
//! - TargetPerson: 捜索対象者
//! - SearchSubmission / SearchResults / MatchResult: 捜索ジョブ
//! - HealthReport: ヘルスチェック結果

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ログインユーザー
///
/// 表示に使うフィールド以外もそのまま保持する（currentUserとして再保存するため）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// 表示名（full_name優先、なければusername）
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref())
            .unwrap_or_default()
    }
}

/// 認証セッション（トークンとユーザーは常に同時に設定/破棄される）
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// ユーザー登録リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// 捜索対象者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPerson {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_path: String,
    #[serde(default)]
    pub created_at: String,
}

/// 対象者作成フォーム
#[derive(Debug, Clone)]
pub struct TargetPersonForm {
    pub name: String,
    pub description: Option<String>,
    pub photo: PhotoFile,
}

/// アップロードする写真
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// 捜索開始レスポンス（`{success, search_id, message}`）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSubmission {
    pub search_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status_url: Option<String>,
}

/// 照合結果1件
///
/// 表示に必須でない項目は欠損・null・型違いを既定値で受ける。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub camera: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub camera_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_formatted: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub frame_number: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub snapshot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

/// バックエンド側の集計（参考情報）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSummary {
    pub total_matches: u64,
    pub best_match_confidence: f64,
    pub cameras_with_matches: u64,
}

/// バックエンド側の処理統計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchStats {
    pub total_videos: u64,
    pub videos_processed: u64,
    pub total_frames_processed: u64,
    pub matches_found: u64,
}

/// `results`フィールドの中身
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub matches: Vec<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SearchSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
}

impl SearchResults {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    /// `results`を解釈できなかった場合の終端結果
    pub fn unreadable(reason: impl std::fmt::Display) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(format!("Invalid search results: {}", reason)),
            ..Default::default()
        }
    }

    /// エラー表示用メッセージ
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Search failed".to_string())
    }
}

/// ポーリング1回分の結果
#[derive(Debug, Clone, PartialEq)]
pub enum PollStatus {
    Ready(SearchResults),
    Pending,
}

/// バックエンドに登録済みのカメラ（`GET /api/cameras`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendCamera {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// ヘルス状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Ok,
    Offline,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Ok => "ok",
            HealthStatus::Offline => "offline",
        }
    }
}

/// ヘルスチェック結果（失敗しない）
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub raw: Option<Value>,
    pub error: Option<String>,
}

impl HealthReport {
    pub fn offline(error: Option<String>) -> Self {
        Self {
            status: HealthStatus::Offline,
            raw: None,
            error,
        }
    }

    /// バックエンドが返したstatus文字列（"healthy"など）
    pub fn label(&self) -> &str {
        self.raw
            .as_ref()
            .and_then(|v| v.get("status"))
            .and_then(Value::as_str)
            .unwrap_or(self.status.as_str())
    }
}

/// idは数値でも文字列でも受け付ける
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// nullを既定値として受ける
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 数値・数値文字列を受け、それ以外は0
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// 小数のフレーム番号は切り捨てる
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(if value.is_finite() && value > 0.0 { value as u64 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_display_name_prefers_full_name() {
        let user: User = serde_json::from_value(json!({
            "username": "asha",
            "full_name": "Asha Rao",
            "email": "asha@example.com"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "Asha Rao");
    }

    #[test]
    fn test_user_display_name_falls_back_to_username() {
        let user: User = serde_json::from_value(json!({"username": "asha", "full_name": ""})).unwrap();
        assert_eq!(user.display_name(), "asha");
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let user: User = serde_json::from_value(json!({"username": "asha", "role": "officer"})).unwrap();
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["role"], "officer");
    }

    #[test]
    fn test_target_person_numeric_id() {
        let target: TargetPerson = serde_json::from_value(json!({
            "id": 7,
            "name": "Ravi",
            "photo_path": "/photos/7.jpg",
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(target.id, "7");
        assert_eq!(target.description, None);
    }

    #[test]
    fn test_search_results_deserialize() {
        let results: SearchResults = serde_json::from_value(json!({
            "status": "completed",
            "matches": [{
                "camera": "c1",
                "camera_name": "Lobby",
                "confidence": 92.3,
                "time_formatted": "10:01:02",
                "frame_number": 42,
                "snapshot": "s1.jpg"
            }],
            "summary": {"total_matches": 1, "best_match_confidence": 92.3, "cameras_with_matches": 1}
        }))
        .unwrap();
        assert_eq!(results.matches.len(), 1);
        assert_eq!(results.matches[0].camera_name, "Lobby");
        assert!(!results.is_error());
    }

    #[test]
    fn test_search_results_tolerates_loose_payload() {
        let results: SearchResults = serde_json::from_value(json!({
            "status": "completed",
            "matches": null
        }))
        .unwrap();
        assert!(results.matches.is_empty());

        let results: SearchResults = serde_json::from_value(json!({
            "status": null,
            "matches": [{"camera_name": "Gate", "confidence": "88.5", "frame_number": 120.7, "snapshot": null}]
        }))
        .unwrap();
        let m = &results.matches[0];
        assert_eq!(m.camera, "");
        assert_eq!(m.confidence, 88.5);
        assert_eq!(m.frame_number, 120);
        assert_eq!(m.snapshot, "");
    }

    #[test]
    fn test_search_results_error_message() {
        let results: SearchResults = serde_json::from_value(json!({
            "status": "error",
            "error": "No face detected in the uploaded photo"
        }))
        .unwrap();
        assert!(results.is_error());
        assert_eq!(results.error_message(), "No face detected in the uploaded photo");
    }

    #[test]
    fn test_health_label_uses_backend_status() {
        let report = HealthReport {
            status: HealthStatus::Ok,
            raw: Some(json!({"status": "healthy"})),
            error: None,
        };
        assert_eq!(report.label(), "healthy");
        assert_eq!(HealthReport::offline(None).label(), "offline");
    }
}
