//! CCTVカメラ登録（クライアント専用）
//!
//! `connectedCameras`にJSON配列として保存する。バックエンドには送らない。
//! `activeCCTVConfig`が立っている間、捜索時にカメラ台数を記録する。

use crate::error::{StorageError, ValidationError};
use crate::storage::{keys, KeyValueStore};
use crate::validation::require;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// 接続テストの疑似待ち時間
pub const CONNECTION_TEST_DELAY: Duration = Duration::from_millis(1500);

/// 接続テストの結果メッセージ（ブラウザからRTSPへは接続できない）
pub const CONNECTION_TEST_MESSAGE: &str =
    "RTSP streams cannot be tested from the browser. The connection will be tested on the server when you start a search.";

/// 録画時間の既定値（秒）
pub const DEFAULT_DURATION_SECS: u32 = 15;

/// 登録済みカメラ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rtsp_url: String,
    pub duration: u32,
    pub added_at: String,
}

/// 追加フォームの入力値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraDraft {
    pub name: String,
    pub location: String,
    pub rtsp_url: String,
    /// 秒数（整数として解釈）
    pub duration: String,
}

impl CameraDraft {
    /// 必須項目と録画時間を検証する
    pub fn validate(&self) -> Result<u32, ValidationError> {
        require("name", &self.name)?;
        require("location", &self.location)?;
        require("rtspUrl", &self.rtsp_url)?;
        parse_duration(&self.duration)
    }
}

/// 録画時間の解釈（空欄は既定値）
fn parse_duration(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_DURATION_SECS);
    }
    raw.parse::<u32>()
        .map_err(|_| ValidationError::InvalidDuration(raw.to_string()))
}

/// カメラ登録の失敗
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// カメラ登録簿
#[derive(Debug, Clone)]
pub struct CameraRegistry<S> {
    store: S,
}

impl<S: KeyValueStore> CameraRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 登録済み一覧（壊れた値は空扱い）
    pub fn list(&self) -> Vec<CameraConfig> {
        match self.store.get_json::<Vec<CameraConfig>>(keys::CONNECTED_CAMERAS) {
            Ok(cameras) => cameras.unwrap_or_default(),
            Err(e) => {
                warn!("connectedCamerasの読み込みに失敗: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, cameras: &[CameraConfig]) -> Result<(), StorageError> {
        self.store.set_json(keys::CONNECTED_CAMERAS, cameras)
    }

    /// カメラを追加する
    ///
    /// `now_ms`はUNIXミリ秒。IDは`cam_<now_ms>`で、重複時は連番を付ける。
    pub fn add(&self, draft: &CameraDraft, now_ms: i64) -> Result<CameraConfig, RegistryError> {
        let duration = draft.validate()?;
        let mut cameras = self.list();

        let base_id = format!("cam_{}", now_ms);
        let mut id = base_id.clone();
        let mut suffix = 1;
        while cameras.iter().any(|c| c.id == id) {
            id = format!("{}_{}", base_id, suffix);
            suffix += 1;
        }

        let camera = CameraConfig {
            id,
            name: draft.name.trim().to_string(),
            location: draft.location.trim().to_string(),
            rtsp_url: draft.rtsp_url.trim().to_string(),
            duration,
            added_at: format_timestamp(now_ms),
        };
        cameras.push(camera.clone());
        self.save(&cameras)?;

        info!("カメラ追加: {} ({})", camera.name, camera.id);
        Ok(camera)
    }

    /// IDで1件削除する。削除したらtrue
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut cameras = self.list();
        let Some(index) = cameras.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let removed = cameras.remove(index);
        self.save(&cameras)?;
        info!("カメラ削除: {} ({})", removed.name, removed.id);
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<CameraConfig> {
        self.list().into_iter().find(|c| c.id == id)
    }

    /// 設定を保存して有効化する
    pub fn activate(&self) -> Result<usize, StorageError> {
        self.store.set(keys::ACTIVE_CCTV_CONFIG, "true")?;
        let count = self.list().len();
        info!("CCTV設定を有効化: {}台", count);
        Ok(count)
    }

    pub fn deactivate(&self) -> Result<(), StorageError> {
        self.store.remove(keys::ACTIVE_CCTV_CONFIG)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.store.get(keys::ACTIVE_CCTV_CONFIG), Ok(Some(v)) if v == "true")
    }

    /// 捜索開始時のCCTV情報
    ///
    /// 有効時はカメラ一覧を`searchCameras`へ記録し、台数を返す。
    pub fn prepare_search(&self) -> SearchCameraInfo {
        if !self.is_active() {
            return SearchCameraInfo::default();
        }
        let cameras = self.list();
        if let Err(e) = self.store.set_json(keys::SEARCH_CAMERAS, &cameras) {
            warn!("searchCamerasの保存に失敗: {}", e);
        }
        let info = SearchCameraInfo {
            use_cctv: true,
            camera_count: cameras.len(),
        };
        if let Some(line) = info.log_line() {
            info!("{}", line);
        }
        info
    }

    /// 保存を伴わずに捜索時のCCTV情報だけ求める
    pub fn search_info(&self) -> SearchCameraInfo {
        if !self.is_active() {
            return SearchCameraInfo::default();
        }
        SearchCameraInfo {
            use_cctv: true,
            camera_count: self.list().len(),
        }
    }
}

/// 捜索に添えるCCTV情報
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCameraInfo {
    pub use_cctv: bool,
    pub camera_count: usize,
}

impl SearchCameraInfo {
    /// コンソール出力用（CCTV未使用なら`None`）
    pub fn log_line(&self) -> Option<String> {
        self.use_cctv
            .then(|| format!("Search with {} CCTV camera(s)", self.camera_count))
    }
}

/// UNIXミリ秒をRFC3339へ
fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
