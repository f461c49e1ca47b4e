//! CLIからの捜索実行

use crate::error::{DristiError, Result};
use dristi_common::validation::mime_from_extension;
use dristi_common::{
    run_search, validate_photo, ApiClient, CameraRegistry, HttpTransport, KeyValueStore, Navigator,
    PhotoFile, PollPolicy, PollProgress, ResultsView, SearchWorkflow,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// 写真ファイルを読み込んで検証する
pub fn load_photo(path: &Path) -> Result<PhotoFile> {
    if !path.is_file() {
        return Err(DristiError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "photo".to_string());
    let mime_type = mime_from_extension(&file_name);
    let size = std::fs::metadata(path)?.len();

    // 10MBを超えるファイルは読み込む前に弾く
    validate_photo(mime_type, size)?;

    let bytes = std::fs::read(path)?;
    Ok(PhotoFile {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

fn spinner(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// 写真を送信し、結果が揃うまで待って表示モデルを返す
pub async fn execute_search<T, S, N, CS>(
    client: &ApiClient<T, S, N>,
    cameras: &CameraRegistry<CS>,
    photo: PhotoFile,
    policy: PollPolicy,
    show_progress: bool,
) -> Result<ResultsView>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
    CS: KeyValueStore,
{
    let mut workflow = SearchWorkflow::new();
    workflow.select_photo(photo, None)?;
    let ticket = workflow
        .begin_search()
        .ok_or_else(|| DristiError::Config("捜索を開始できません".into()))?;

    let workflow = RefCell::new(workflow);
    let pb = spinner(show_progress);
    pb.set_message("写真を送信中...");

    let outcome = run_search(
        client,
        cameras,
        &ticket.photo,
        policy,
        tokio::time::sleep,
        |search_id| {
            workflow.borrow_mut().search_submitted(&ticket, search_id);
            pb.set_message(format!("結果待ち (search_id: {})", search_id));
        },
        |progress| {
            let keep = workflow.borrow_mut().record_progress(&ticket, &progress);
            match &progress {
                PollProgress::Pending { attempt, remaining } => {
                    pb.set_message(format!("解析中... {}/{}", attempt, attempt + remaining));
                }
                PollProgress::Failed { attempt, error, .. } => {
                    debug!("poll attempt {} failed: {}", attempt, error);
                }
            }
            keep
        },
    )
    .await;
    pb.finish_and_clear();

    let mut workflow = workflow.into_inner();
    workflow.finish(&ticket, outcome.clone());
    outcome?;

    workflow
        .results()
        .cloned()
        .ok_or_else(|| DristiError::Config("結果がありません".into()))
}
