//! CCTVライブプレビュー
//!
//! 固定のサンプル映像を並べ、再生/一時停止を全映像に一括で適用する。

/// プレビューに流すサンプル映像
pub const SAMPLE_FEEDS: &[PreviewFeed] = &[
    PreviewFeed {
        label: "Camera 1 - Main Entrance",
        url: "/CCTVS/camera_1.mp4",
    },
    PreviewFeed {
        label: "Camera 2 - Parking Lot",
        url: "/CCTVS/camera_2.mp4",
    },
    PreviewFeed {
        label: "Camera 3 - Lobby",
        url: "/CCTVS/camera_3.mp4",
    },
    PreviewFeed {
        label: "Camera 4 - Corridor",
        url: "/CCTVS/camera_4.mp4",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewFeed {
    pub label: &'static str,
    pub url: &'static str,
}

/// 一括再生状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Playing,
    Paused,
}

impl Playback {
    pub fn toggle(self) -> Self {
        match self {
            Playback::Playing => Playback::Paused,
            Playback::Paused => Playback::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Playback::Playing)
    }

    /// トグルボタンの表示
    pub fn button_label(&self) -> &'static str {
        match self {
            Playback::Playing => "Pause All",
            Playback::Paused => "Play All",
        }
    }
}
