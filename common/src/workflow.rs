//! 捜索ワークフロー（キオスク）
//!
//! 画面セクションは常に1つだけ: Idle / Preview / Loading / Results
//!
//! ```text
//! Idle --select--> Preview --begin--> Loading --poll ok--> Results
//!   ^                                   |                     |
//!   +-------- submit失敗 / timeout -----+                     |
//!   +---------------------- new search -----------------------+
//! ```
//!
//! 非同期処理はチケット（世代番号）で紐付け、破棄された捜索の結果は無視する。

use crate::api::ApiClient;
use crate::cameras::CameraRegistry;
use crate::error::{ApiError, ValidationError};
use crate::polling::{poll_search_results, PollError, PollPolicy, PollProgress};
use crate::results::ResultsView;
use crate::storage::KeyValueStore;
use crate::transport::{HttpTransport, Navigator};
use crate::types::{PhotoFile, SearchResults};
use crate::validation::validate_photo;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// 表示中のセクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Idle,
    Preview,
    Loading,
    Results,
}

/// 選択中の写真
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPhoto {
    pub file: PhotoFile,
    /// プレビュー用Data URL（CLIではNone）
    pub preview_url: Option<String>,
}

/// 進行中の捜索を識別する
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    generation: u64,
    pub photo: PhotoFile,
}

/// 捜索ワークフローの状態
#[derive(Debug, Clone)]
pub struct SearchWorkflow {
    section: Section,
    selected: Option<SelectedPhoto>,
    search_id: Option<String>,
    results: Option<ResultsView>,
    error: Option<String>,
    attempt: u32,
    generation: u64,
}

impl Default for SearchWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchWorkflow {
    pub fn new() -> Self {
        Self {
            section: Section::Idle,
            selected: None,
            search_id: None,
            results: None,
            error: None,
            attempt: 0,
            generation: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn selected(&self) -> Option<&SelectedPhoto> {
        self.selected.as_ref()
    }

    pub fn search_id(&self) -> Option<&str> {
        self.search_id.as_deref()
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 直近のポーリング試行回数
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// 写真を選択する（Idle → Preview）
    ///
    /// 検証に失敗した場合は状態を一切変えない。
    /// 捜索中に選び直した場合、その捜索は破棄される。
    pub fn select_photo(&mut self, file: PhotoFile, preview_url: Option<String>) -> Result<(), ValidationError> {
        validate_photo(&file.mime_type, file.size())?;

        if self.section == Section::Loading {
            self.generation += 1;
        }
        self.selected = Some(SelectedPhoto { file, preview_url });
        self.search_id = None;
        self.results = None;
        self.error = None;
        self.attempt = 0;
        self.section = Section::Preview;
        Ok(())
    }

    /// 捜索を開始する（Preview → Loading）
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        if self.section != Section::Preview {
            return None;
        }
        let photo = self.selected.as_ref()?.file.clone();

        self.generation += 1;
        self.section = Section::Loading;
        self.error = None;
        self.attempt = 0;
        Some(SearchTicket {
            generation: self.generation,
            photo,
        })
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation && self.section == Section::Loading
    }

    /// 送信に成功した
    pub fn search_submitted(&mut self, ticket: &SearchTicket, search_id: &str) {
        if self.is_current(ticket) {
            self.search_id = Some(search_id.to_string());
        }
    }

    /// ポーリング1回分の経過を反映する。破棄済みならfalse
    pub fn record_progress(&mut self, ticket: &SearchTicket, progress: &PollProgress) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.attempt = match progress {
            PollProgress::Pending { attempt, .. } | PollProgress::Failed { attempt, .. } => *attempt,
        };
        true
    }

    /// 捜索の終了を反映する（Loading → Results / Idle）
    pub fn finish(&mut self, ticket: &SearchTicket, outcome: Result<SearchResults, SearchError>) {
        if !self.is_current(ticket) {
            return;
        }
        match outcome {
            Ok(results) => {
                self.results = Some(ResultsView::from_results(&results));
                self.section = Section::Results;
            }
            Err(SearchError::Poll(PollError::Cancelled)) => {}
            Err(e) => {
                self.error = Some(e.to_string());
                self.section = Section::Idle;
            }
        }
    }

    /// 新しい捜索（選択と結果をすべて破棄してIdleへ）
    pub fn reset(&mut self) {
        self.generation += 1;
        self.section = Section::Idle;
        self.selected = None;
        self.search_id = None;
        self.results = None;
        self.error = None;
        self.attempt = 0;
    }
}

/// 捜索全体の失敗
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// 送信失敗（エラーメッセージをそのまま表示）
    #[error("{0}")]
    Submit(ApiError),

    #[error(transparent)]
    Poll(#[from] PollError),
}

/// CCTV設定を確認してから捜索を送信し、結果が出るまでポーリングする
///
/// - `sleep`: 待機関数
/// - `on_submitted`: search_id取得時
/// - `on_progress`: 試行ごと。falseで中断
pub async fn run_search<T, S, N, CS, Sl, SlFut, Sub, P>(
    client: &ApiClient<T, S, N>,
    cameras: &CameraRegistry<CS>,
    photo: &PhotoFile,
    policy: PollPolicy,
    sleep: Sl,
    on_submitted: Sub,
    on_progress: P,
) -> Result<SearchResults, SearchError>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
    CS: KeyValueStore,
    Sl: FnMut(Duration) -> SlFut,
    SlFut: Future<Output = ()>,
    Sub: FnOnce(&str),
    P: FnMut(PollProgress) -> bool,
{
    let cctv = cameras.prepare_search();
    if cctv.use_cctv {
        info!("CCTV search requested with {} camera(s)", cctv.camera_count);
    }

    let submission = client
        .submit_search(photo, cctv.use_cctv)
        .await
        .map_err(SearchError::Submit)?;
    on_submitted(&submission.search_id);

    let search_id = submission.search_id;
    let results = poll_search_results(
        policy,
        || client.fetch_search_results(&search_id),
        sleep,
        on_progress,
    )
    .await?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{BackendProfile, Endpoints};
    use crate::storage::MemoryStore;
    use crate::transport::mock::{MockTransport, RecordingNavigator};
    use crate::validation::MAX_PHOTO_BYTES;
    use futures::executor::block_on;

    fn jpeg(size: usize) -> PhotoFile {
        PhotoFile {
            file_name: "face.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_rejects_non_image_and_keeps_state() {
        let mut wf = SearchWorkflow::new();
        let pdf = PhotoFile {
            file_name: "doc.pdf".into(),
            mime_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        };
        assert!(wf.select_photo(pdf.clone(), None).is_err());
        assert_eq!(wf.section(), Section::Idle);
        assert!(wf.selected().is_none());

        wf.select_photo(jpeg(10), Some("data:image/jpeg;base64,AA==".into())).unwrap();
        assert!(wf.select_photo(pdf, None).is_err());
        assert_eq!(wf.section(), Section::Preview);
        assert_eq!(wf.selected().unwrap().file, jpeg(10));
    }

    #[test]
    fn test_rejects_oversize_without_preview() {
        let mut wf = SearchWorkflow::new();
        let big = jpeg(MAX_PHOTO_BYTES as usize + 1);
        assert!(matches!(
            wf.select_photo(big, Some("data:".into())),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(wf.selected().is_none());
        assert_eq!(wf.section(), Section::Idle);
    }

    #[test]
    fn test_begin_requires_preview() {
        let mut wf = SearchWorkflow::new();
        assert!(wf.begin_search().is_none());
        wf.select_photo(jpeg(10), None).unwrap();
        let ticket = wf.begin_search().unwrap();
        assert_eq!(wf.section(), Section::Loading);
        assert!(wf.is_current(&ticket));
        assert!(wf.begin_search().is_none());
    }

    #[test]
    fn test_submission_failure_returns_to_idle_with_error() {
        let mut wf = SearchWorkflow::new();
        wf.select_photo(jpeg(10), None).unwrap();
        let ticket = wf.begin_search().unwrap();
        wf.finish(&ticket, Err(SearchError::Submit(ApiError::backend(400, "No CCTV video files found"))));
        assert_eq!(wf.section(), Section::Idle);
        assert_eq!(wf.error(), Some("No CCTV video files found"));
    }

    #[test]
    fn test_timeout_message() {
        let mut wf = SearchWorkflow::new();
        wf.select_photo(jpeg(10), None).unwrap();
        let ticket = wf.begin_search().unwrap();
        wf.finish(&ticket, Err(PollError::TimedOut { attempts: 120 }.into()));
        assert_eq!(wf.section(), Section::Idle);
        assert_eq!(wf.error(), Some("Search timed out. Please try again."));
    }

    #[test]
    fn test_reset_abandons_inflight_search() {
        let mut wf = SearchWorkflow::new();
        wf.select_photo(jpeg(10), None).unwrap();
        let ticket = wf.begin_search().unwrap();

        wf.reset();
        assert!(!wf.is_current(&ticket));
        assert!(!wf.record_progress(&ticket, &PollProgress::Pending { attempt: 1, remaining: 119 }));

        wf.finish(&ticket, Ok(SearchResults::default()));
        assert_eq!(wf.section(), Section::Idle);
        assert!(wf.results().is_none());
        assert!(wf.selected().is_none());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let transport = MockTransport::new();
        transport
            .respond(202, r#"{"success":true,"search_id":"abc123"}"#)
            .respond(200, "{}")
            .respond(
                200,
                r#"{"results":{"status":"ok","matches":[{"camera":"c1","camera_name":"Lobby","confidence":92.3,"time_formatted":"10:01:02","frame_number":42,"snapshot":"s1.jpg"}]}}"#,
            );
        let store = MemoryStore::new();
        let client = ApiClient::new(
            transport.clone(),
            store.clone(),
            RecordingNavigator::default(),
            Endpoints::new("", BackendProfile::Kiosk),
        );
        let cameras = CameraRegistry::new(store);

        let mut wf = SearchWorkflow::new();
        wf.select_photo(jpeg(5 * 1024 * 1024), None).unwrap();
        let ticket = wf.begin_search().unwrap();

        let mut submitted = None;
        let mut sleeps = 0;
        let outcome = block_on(run_search(
            &client,
            &cameras,
            &ticket.photo,
            PollPolicy::default(),
            |_| {
                sleeps += 1;
                async {}
            },
            |id| submitted = Some(id.to_string()),
            |_| true,
        ));
        wf.finish(&ticket, outcome);

        assert_eq!(submitted.as_deref(), Some("abc123"));
        assert_eq!(sleeps, 1);
        assert_eq!(transport.request_count(), 3);
        assert!(transport.requests.borrow()[0].url.ends_with("use_cctv=false"));
        assert_eq!(wf.section(), Section::Results);

        let Some(ResultsView::Matches(summary)) = wf.results() else {
            panic!("expected matches");
        };
        assert_eq!(summary.shown.len(), 1);
        assert_eq!(summary.best_confidence_label(), "92.3%");
        assert_eq!(summary.camera_count, 1);
    }

    #[test]
    fn test_active_cctv_sets_query_flag() {
        let transport = MockTransport::new();
        transport.respond(400, r#"{"success":false,"message":"No CCTV video files found"}"#);
        let store = MemoryStore::new();
        let client = ApiClient::new(
            transport.clone(),
            store.clone(),
            RecordingNavigator::default(),
            Endpoints::new("", BackendProfile::Kiosk),
        );
        let cameras = CameraRegistry::new(store);
        cameras.activate().unwrap();

        let outcome = block_on(run_search(
            &client,
            &cameras,
            &jpeg(10),
            PollPolicy::default(),
            |_| async {},
            |_| {},
            |_| true,
        ));

        assert_eq!(
            outcome,
            Err(SearchError::Submit(ApiError::backend(400, "No CCTV video files found")))
        );
        assert!(transport.last_request().unwrap().url.ends_with("use_cctv=true"));
    }

    #[test]
    fn test_results_with_null_matches_end_search_immediately() {
        let transport = MockTransport::new();
        transport
            .respond(200, r#"{"success":true,"search_id":"s9"}"#)
            .respond(200, r#"{"success":true,"results":{"status":"completed","matches":null}}"#);
        let store = MemoryStore::new();
        let client = ApiClient::new(
            transport.clone(),
            store.clone(),
            RecordingNavigator::default(),
            Endpoints::new("", BackendProfile::Kiosk),
        );
        let cameras = CameraRegistry::new(store);
        let policy = PollPolicy {
            interval: Duration::from_millis(1),
            max_attempts: 5,
        };

        let outcome = block_on(run_search(
            &client,
            &cameras,
            &jpeg(10),
            policy,
            |_| async {},
            |_| {},
            |_| true,
        ));

        let results = outcome.unwrap();
        assert!(results.matches.is_empty());
        assert_eq!(transport.request_count(), 2);
        assert_eq!(ResultsView::from_results(&results), ResultsView::Empty);
    }
}
