//! 一時表示メッセージ

use std::time::Duration;

/// 既定の表示時間
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(5);

/// メッセージ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    /// CSSクラス名
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// 画面上部に出すメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Noneなら自動で消えない
    pub duration: Option<Duration>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            duration: Some(DEFAULT_NOTICE_DURATION),
        }
    }

    pub fn sticky(mut self) -> Self {
        self.duration = None;
        self
    }

    pub fn class(&self) -> String {
        format!("message-container {}", self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_defaults() {
        let notice = Notice::error("Failed to load targets: Session expired");
        assert_eq!(notice.duration, Some(DEFAULT_NOTICE_DURATION));
        assert_eq!(notice.class(), "message-container error");
    }

    #[test]
    fn test_sticky_notice() {
        assert_eq!(Notice::info("x").sticky().duration, None);
    }
}
