//! 端末への表示

use dristi_common::{
    format_confidence, BackendCamera, CameraConfig, Endpoints, HealthReport, HealthStatus,
    ResultsView, TargetCard, TargetListView, User, UserProfile,
};

pub fn print_health(endpoints: &Endpoints, report: &HealthReport) {
    let mark = match report.status {
        HealthStatus::Ok => "✔",
        HealthStatus::Offline => "✖",
    };
    println!("{} {} ({})", mark, report.label(), endpoints.base_url());
    if let Some(error) = &report.error {
        println!("  {}", error);
    }
}

pub fn print_user(user: &User) {
    let profile = UserProfile::from_user(user);
    println!("ユーザー: {}", profile.name);
    if !profile.email.is_empty() {
        println!("メール:   {}", profile.email);
    }
}

pub fn print_targets(view: &TargetListView) {
    match view {
        TargetListView::Empty => {
            println!("対象者が登録されていません");
            println!("`dristi targets create --name <名前> --photo <写真>` で作成できます");
        }
        TargetListView::Cards(cards) => {
            println!("対象者: {}件", cards.len());
            for card in cards {
                print_target_card(card);
            }
        }
    }
}

fn print_target_card(card: &TargetCard) {
    println!("---");
    println!("[{}] {}", card.id, card.name);
    if let Some(description) = &card.description {
        println!("  {}", description);
    }
    println!("  写真: {}", card.image_url);
    println!("  作成: {}", card.created_label);
}

/// 捜索結果（先頭20件）を表示する
pub fn print_results(endpoints: &Endpoints, view: &ResultsView) {
    match view {
        ResultsView::Error(message) => {
            println!("✖ {}", message);
        }
        ResultsView::Empty => {
            println!("一致はありませんでした");
        }
        ResultsView::Matches(summary) => {
            println!("一致: {}件", summary.count_label());
            println!("最高一致度: {}", summary.best_confidence_label());
            println!("カメラ数: {}", summary.camera_count);
            for (i, m) in summary.shown.iter().enumerate() {
                println!("---");
                println!("#{} {} ({})", i + 1, m.camera_name, m.camera);
                println!("  一致度: {}", format_confidence(m.confidence));
                println!("  時刻: {}  フレーム: {}", m.time_formatted, m.frame_number);
                println!("  スナップショット: {}", endpoints.snapshot(&m.snapshot));
            }
            if summary.is_truncated() {
                println!("---");
                println!("（残り{}件は省略）", summary.total - summary.shown.len());
            }
        }
    }
}

pub fn print_cameras(cameras: &[CameraConfig], active: bool) {
    println!(
        "CCTV設定: {}",
        if active { "有効" } else { "無効" }
    );
    if cameras.is_empty() {
        println!("カメラが登録されていません");
        return;
    }
    for camera in cameras {
        println!("---");
        println!("[{}] {}", camera.id, camera.name);
        println!("  場所: {}", camera.location);
        println!("  RTSP: {}", camera.rtsp_url);
        println!("  録画時間: {}秒", camera.duration);
        println!("  追加: {}", camera.added_at);
    }
}

pub fn print_backend_cameras(cameras: &[BackendCamera]) {
    if cameras.is_empty() {
        println!("サーバーにカメラがありません");
        return;
    }
    for camera in cameras {
        match &camera.filename {
            Some(file) => println!("[{}] {} ({})", camera.id, camera.name, file),
            None => println!("[{}] {}", camera.id, camera.name),
        }
    }
}

pub fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
