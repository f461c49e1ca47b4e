//! DRISTIバックエンドAPIクライアント
//!
//! すべての操作は`ApiResult`を返し、パニックや未処理の失敗を呼び出し側へ漏らさない。
//! `health`だけは失敗しない`HealthReport`を返す。
//!
//! 認証付きリクエストは`make_authenticated_request`に集約される:
//! - セッションがなければ通信せずにランディングへ遷移
//! - 401ならログアウトして`SessionExpired`

use crate::endpoints::Endpoints;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionManager;
use crate::storage::KeyValueStore;
use crate::transport::{Body, FormPart, HttpRequest, HttpResponse, HttpTransport, Navigator};
use crate::types::{
    BackendCamera, HealthReport, HealthStatus, PhotoFile, PollStatus, RegisterRequest,
    SearchResults, SearchSubmission, Session, TargetPerson, TargetPersonForm, User,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// ログアウト・未認証時の遷移先
pub const LANDING_PAGE: &str = "/";

/// APIクライアント
pub struct ApiClient<T, S, N> {
    transport: T,
    session: SessionManager<S>,
    navigator: N,
    endpoints: Endpoints,
}

impl<T, S, N> ApiClient<T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(transport: T, store: S, navigator: N, endpoints: Endpoints) -> Self {
        Self {
            transport,
            session: SessionManager::new(store),
            navigator,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.transport.send(request).await.map_err(|e| {
            warn!("通信エラー: {}", e);
            ApiError::Transport(e.0)
        })
    }

    // === ヘルスチェック ===

    /// バックエンドの死活確認（失敗しない）
    pub async fn health(&self) -> HealthReport {
        let response = match self.transport.send(HttpRequest::get(self.endpoints.health())).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Backend health check failed: {}", e);
                return HealthReport::offline(Some(e.0));
            }
        };

        if !response.ok() {
            return HealthReport::offline(None);
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(raw) => HealthReport {
                status: HealthStatus::Ok,
                raw: Some(raw),
                error: None,
            },
            Err(e) => HealthReport::offline(Some(e.to_string())),
        }
    }

    // === 認識系ヘルパー（失敗はErrで返す） ===

    pub async fn upload_file(&self, photo: &PhotoFile) -> ApiResult<Value> {
        let request = HttpRequest::post(self.endpoints.upload(), photo_form("file", photo));
        self.post_expect_json(request, "Upload failed").await
    }

    pub async fn encode(&self, filename: &str) -> ApiResult<Value> {
        let request = HttpRequest::post(self.endpoints.encode(), Body::Json(json!({ "filename": filename })));
        self.post_expect_json(request, "Encode failed").await
    }

    pub async fn recognize(&self, filename: &str) -> ApiResult<Value> {
        let request = HttpRequest::post(self.endpoints.recognize(), Body::Json(json!({ "filename": filename })));
        self.post_expect_json(request, "Recognize failed").await
    }

    async fn post_expect_json(&self, request: HttpRequest, fallback: &str) -> ApiResult<Value> {
        let response = self.send(request).await?;
        if !response.ok() {
            let message = extract_detail(&response.json_or_empty()).unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::backend(response.status, message));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    // === 捜索 ===

    /// 写真を送信して捜索を開始（失敗時はレスポンス本文をそのままエラーにする）
    pub async fn search_lost_person(&self, photo: &PhotoFile, use_cctv: bool) -> ApiResult<Value> {
        let request = HttpRequest::post(self.endpoints.search(use_cctv), photo_form("file", photo));
        let response = self.send(request).await?;
        if !response.ok() {
            return Err(ApiError::backend(response.status, response.body));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// 捜索を開始し、`search_id`を取り出す
    ///
    /// `{success:false, message}`はステータスに関わらず失敗として扱う。
    pub async fn submit_search(&self, photo: &PhotoFile, use_cctv: bool) -> ApiResult<SearchSubmission> {
        let request = HttpRequest::post(self.endpoints.search(use_cctv), photo_form("file", photo));
        let response = self.send(request).await?;
        let body = response.json_or_empty();

        let rejected = body.get("success").and_then(Value::as_bool) == Some(false);
        if !response.ok() || rejected {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| extract_detail(&body))
                .or_else(|| {
                    let text = response.body.trim();
                    (!text.is_empty() && body.as_object().is_some_and(|o| o.is_empty()))
                        .then(|| text.to_string())
                })
                .unwrap_or_else(|| "Search failed".to_string());
            return Err(ApiError::backend(response.status, message));
        }

        let submission: SearchSubmission =
            serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        info!("捜索開始: search_id={}", submission.search_id);
        Ok(submission)
    }

    /// 捜索結果を1回取得する
    ///
    /// HTTP成功かつ`results`がある場合のみReady。それ以外（404含む）はPending。
    pub async fn fetch_search_results(&self, search_id: &str) -> ApiResult<PollStatus> {
        let response = self
            .send(HttpRequest::get(self.endpoints.search_results(search_id)))
            .await?;
        if !response.ok() {
            debug!("search {} not ready (status {})", search_id, response.status);
            return Ok(PollStatus::Pending);
        }

        match response.json_or_empty().get("results") {
            // `results`が届いた時点で終端（解釈できなければエラー結果として返す）
            Some(results) if !results.is_null() => {
                Ok(PollStatus::Ready(serde_json::from_value(results.clone()).unwrap_or_else(|e| {
                    warn!("search {} results unreadable: {}", search_id, e);
                    SearchResults::unreadable(e)
                })))
            }
            _ => Ok(PollStatus::Pending),
        }
    }

    /// バックエンドに登録されたカメラ一覧
    pub async fn list_backend_cameras(&self) -> ApiResult<Vec<BackendCamera>> {
        let response = self.send(HttpRequest::get(self.endpoints.cameras())).await?;
        let body = response.json_or_empty();
        if !response.ok() {
            let message = extract_detail(&body).unwrap_or_else(|| "Failed to load cameras".to_string());
            return Err(ApiError::backend(response.status, message));
        }
        let cameras = body.get("cameras").cloned().unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(cameras).map_err(|e| ApiError::Parse(e.to_string()))
    }

    // === 認証 ===

    pub async fn register_user(&self, user: &RegisterRequest) -> ApiResult<Value> {
        let body = serde_json::to_value(user).map_err(|e| ApiError::Parse(e.to_string()))?;
        let request = HttpRequest::post(self.endpoints.register(), Body::Json(body));
        let response = self.send(request).await?;
        let data: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))?;
        if !response.ok() {
            let message = extract_detail(&data).unwrap_or_else(|| "Registration failed".to_string());
            return Err(ApiError::backend(response.status, message));
        }
        info!("ユーザー登録: {}", user.username);
        Ok(data)
    }

    /// ログインしてセッションを確立する
    pub async fn login_user(&self, username: &str, password: &str) -> ApiResult<Session> {
        let request = HttpRequest::post(
            self.endpoints.login(),
            Body::Json(json!({ "username": username, "password": password })),
        );
        let response = self.send(request).await?;
        let data: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))?;
        if !response.ok() {
            let message = extract_detail(&data).unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::backend(response.status, message));
        }

        let session = session_from_login(&data)?;
        self.session.establish(session.clone());
        info!("ログイン: {}", session.user.display_name());
        Ok(session)
    }

    /// セッションを破棄してランディングへ遷移（冪等）
    pub fn logout(&self) {
        self.session.clear();
        info!("ログアウト");
        self.navigator.redirect(LANDING_PAGE);
    }

    /// 永続ストレージからセッションを復元し、ログイン状態を返す
    pub fn is_logged_in(&self) -> bool {
        self.session.hydrate()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    /// Bearerトークン付きで送信する
    pub async fn make_authenticated_request(&self, request: HttpRequest) -> ApiResult<Value> {
        self.authenticated(request, "Request failed").await
    }

    async fn authenticated(&self, request: HttpRequest, fallback: &str) -> ApiResult<Value> {
        if self.session.token().is_none() && !self.is_logged_in() {
            self.navigator.redirect(LANDING_PAGE);
            return Err(ApiError::NotAuthenticated);
        }
        let token = self.session.token().ok_or(ApiError::NotAuthenticated)?;
        let request = request.with_header("Authorization", &format!("Bearer {}", token));

        let response = self.send(request).await?;
        let data = response.json_or_empty();

        if !response.ok() {
            if response.status == 401 {
                self.logout();
                return Err(ApiError::SessionExpired);
            }
            let message = extract_detail(&data).unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::backend(response.status, message));
        }

        Ok(data)
    }

    // === 捜索対象者 ===

    pub async fn create_target_person(&self, form: &TargetPersonForm) -> ApiResult<Value> {
        let mut parts = vec![FormPart::Text {
            name: "name".to_string(),
            value: form.name.clone(),
        }];
        if let Some(description) = form.description.as_ref().filter(|d| !d.is_empty()) {
            parts.push(FormPart::Text {
                name: "description".to_string(),
                value: description.clone(),
            });
        }
        parts.push(FormPart::File {
            name: "photo".to_string(),
            file: form.photo.clone(),
        });

        let request = HttpRequest::post(self.endpoints.targets(), Body::Multipart(parts));
        self.authenticated(request, "Failed to create target").await
    }

    pub async fn get_target_persons(&self) -> ApiResult<Vec<TargetPerson>> {
        let data = self
            .make_authenticated_request(HttpRequest::get(self.endpoints.targets()))
            .await?;
        serde_json::from_value(data).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

fn photo_form(field: &str, photo: &PhotoFile) -> Body {
    Body::Multipart(vec![FormPart::File {
        name: field.to_string(),
        file: photo.clone(),
    }])
}

/// エラーレスポンスから`detail`（なければ`message`）を取り出す
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Null) | None => {}
        Some(other) => return Some(other.to_string()),
    }
    body.get("message").and_then(Value::as_str).map(str::to_string)
}

/// ログインレスポンスからセッションを組み立てる
///
/// トークンは`access_token`、次に`token`。ユーザーは`user`、なければ全体。
fn session_from_login(data: &Value) -> ApiResult<Session> {
    let token = ["access_token", "token"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Parse("login response has no token".to_string()))?;

    let user_value = match data.get("user") {
        Some(user) if user.is_object() => user.clone(),
        _ => data.clone(),
    };
    let user: User = serde_json::from_value(user_value).map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(Session {
        token: token.to_string(),
        user,
    })
}
