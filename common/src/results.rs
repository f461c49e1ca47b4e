//! 捜索結果の表示モデル
//!
//! 受信順のまま先頭20件に切り詰める（クライアント側で並べ替えない）。

use crate::types::{MatchResult, SearchResults};
use std::collections::HashSet;

/// 表示する最大件数
pub const MAX_DISPLAYED_MATCHES: usize = 20;

/// 結果画面の内容
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// `status == "error"`: メッセージのみ表示
    Error(String),
    /// 一致なし
    Empty,
    Matches(MatchSummary),
}

/// 一致一覧と集計
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub shown: Vec<MatchResult>,
    pub total: usize,
    pub best_confidence: f64,
    pub camera_count: usize,
}

impl MatchSummary {
    pub fn is_truncated(&self) -> bool {
        self.total > self.shown.len()
    }

    /// 件数表示（切り詰め時は"20 of 45"）
    pub fn count_label(&self) -> String {
        if self.is_truncated() {
            format!("{} of {}", self.shown.len(), self.total)
        } else {
            self.shown.len().to_string()
        }
    }

    pub fn best_confidence_label(&self) -> String {
        format_confidence(self.best_confidence)
    }
}

impl ResultsView {
    pub fn from_results(results: &SearchResults) -> Self {
        if results.is_error() {
            return ResultsView::Error(results.error_message());
        }

        let total = results.matches.len();
        if total == 0 {
            return ResultsView::Empty;
        }

        let shown: Vec<MatchResult> = results
            .matches
            .iter()
            .take(MAX_DISPLAYED_MATCHES)
            .cloned()
            .collect();

        let best_confidence = shown
            .iter()
            .map(|m| m.confidence)
            .fold(f64::NEG_INFINITY, f64::max);

        let camera_count = shown
            .iter()
            .map(|m| m.camera.as_str())
            .collect::<HashSet<_>>()
            .len();

        ResultsView::Matches(MatchSummary {
            shown,
            total,
            best_confidence,
            camera_count,
        })
    }

    /// 表示するカード数
    pub fn card_count(&self) -> usize {
        match self {
            ResultsView::Matches(summary) => summary.shown.len(),
            _ => 0,
        }
    }
}

/// 一致度を小数1桁の%表記にする
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(camera: &str, confidence: f64) -> MatchResult {
        MatchResult {
            camera: camera.to_string(),
            camera_name: camera.to_uppercase(),
            confidence,
            time_formatted: "00:01".to_string(),
            frame_number: 1,
            snapshot: format!("{}.jpg", camera),
            timestamp: None,
        }
    }

    fn results(matches: Vec<MatchResult>) -> SearchResults {
        SearchResults {
            status: "completed".to_string(),
            matches,
            ..Default::default()
        }
    }

    #[test]
    fn test_truncates_to_twenty_in_received_order() {
        let matches: Vec<_> = (0..45).map(|i| m(&format!("c{}", i % 3), i as f64)).collect();
        let view = ResultsView::from_results(&results(matches.clone()));

        let ResultsView::Matches(summary) = view else {
            panic!("expected matches");
        };
        assert_eq!(summary.shown.len(), 20);
        assert_eq!(summary.shown, matches[..20].to_vec());
        assert_eq!(summary.total, 45);
        assert_eq!(summary.count_label(), "20 of 45");
    }

    #[test]
    fn test_not_truncated_label() {
        let view = ResultsView::from_results(&results(vec![m("c1", 80.0), m("c2", 70.0)]));
        let ResultsView::Matches(summary) = view else {
            panic!("expected matches");
        };
        assert!(!summary.is_truncated());
        assert_eq!(summary.count_label(), "2");
    }

    #[test]
    fn test_best_confidence_and_camera_set() {
        let view = ResultsView::from_results(&results(vec![
            m("lobby", 71.25),
            m("gate", 92.34),
            m("lobby", 88.0),
        ]));
        let ResultsView::Matches(summary) = view else {
            panic!("expected matches");
        };
        assert_eq!(summary.best_confidence_label(), "92.3%");
        assert_eq!(summary.camera_count, 2);
    }

    #[test]
    fn test_empty_and_error() {
        assert_eq!(ResultsView::from_results(&results(vec![])), ResultsView::Empty);

        let failed = SearchResults {
            status: "error".to_string(),
            error: Some("No face detected in the uploaded photo".to_string()),
            matches: vec![m("c1", 99.0)],
            ..Default::default()
        };
        assert_eq!(
            ResultsView::from_results(&failed),
            ResultsView::Error("No face detected in the uploaded photo".to_string())
        );
    }

    #[test]
    fn test_card_count_never_exceeds_limit() {
        for n in [0usize, 1, 19, 20, 21, 500] {
            let matches = (0..n).map(|i| m("c", i as f64)).collect();
            assert!(ResultsView::from_results(&results(matches)).card_count() <= MAX_DISPLAYED_MATCHES);
        }
    }
}
