//! 捜索結果のポーリング
//!
//! 固定間隔・固定回数（指数バックオフなし）。
//! 「まだ結果なし」と通信エラーはどちらも1回分の試行として数える。
//! 前回の取得が完了してから次を予約するため、同時に2つ飛ぶことはない。

use crate::error::ApiResult;
use crate::types::{PollStatus, SearchResults};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// 既定のポーリング間隔（1秒）
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 既定の最大試行回数（約2分）
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

/// ポーリング設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// ポーリング失敗
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PollError {
    #[error("Search timed out. Please try again.")]
    TimedOut { attempts: u32 },

    /// 上位で破棄された（新しい捜索が始まった等）
    #[error("Search was cancelled")]
    Cancelled,
}

/// 1回の試行の経過
#[derive(Debug, Clone, PartialEq)]
pub enum PollProgress {
    Pending { attempt: u32, remaining: u32 },
    Failed { attempt: u32, remaining: u32, error: String },
}

/// `results`が得られるまでポーリングする
///
/// - `fetch`: 1回分の取得
/// - `sleep`: 待機（WASMではgloo-timers、CLIではtokio）
/// - `on_progress`: 試行ごとの通知。falseを返すと中断（Cancelled）
pub async fn poll_search_results<F, Fut, Sl, SlFut, P>(
    policy: PollPolicy,
    mut fetch: F,
    mut sleep: Sl,
    mut on_progress: P,
) -> Result<SearchResults, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<PollStatus>>,
    Sl: FnMut(Duration) -> SlFut,
    SlFut: Future<Output = ()>,
    P: FnMut(PollProgress) -> bool,
{
    for attempt in 1..=policy.max_attempts {
        let remaining = policy.max_attempts - attempt;

        let progress = match fetch().await {
            Ok(PollStatus::Ready(results)) => {
                debug!("結果取得: {}回目", attempt);
                return Ok(results);
            }
            Ok(PollStatus::Pending) => {
                debug!("結果待ち: {}回目 (残り{})", attempt, remaining);
                PollProgress::Pending { attempt, remaining }
            }
            Err(e) => {
                warn!("ポーリング失敗: {}回目: {}", attempt, e);
                PollProgress::Failed {
                    attempt,
                    remaining,
                    error: e.to_string(),
                }
            }
        };

        if !on_progress(progress) {
            return Err(PollError::Cancelled);
        }

        if remaining > 0 {
            sleep(policy.interval).await;
        }
    }

    Err(PollError::TimedOut {
        attempts: policy.max_attempts,
    })
}
