use clap::{Parser, Subcommand};
use dristi_common::BackendProfile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dristi")]
#[command(about = "DRISTI 行方不明者捜索クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// バックエンドプロファイル (kiosk/dashboard)
    #[arg(long, global = true)]
    pub profile: Option<BackendProfile>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// バックエンドの稼働確認
    Health,

    /// ログイン
    Login {
        /// ユーザー名
        username: String,

        /// パスワード（省略時は入力を求める）
        #[arg(short, long)]
        password: Option<String>,
    },

    /// ユーザー登録
    Register {
        /// ユーザー名
        username: String,

        /// メールアドレス
        #[arg(short, long)]
        email: String,

        /// 氏名
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// パスワード（省略時は入力を求める）
        #[arg(short, long)]
        password: Option<String>,
    },

    /// ログアウト
    Logout {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// ログイン中のユーザーを表示
    Whoami,

    /// 対象者の管理
    Targets {
        #[command(subcommand)]
        command: TargetCommands,
    },

    /// 写真で行方不明者を捜索
    Search {
        /// 顔写真
        #[arg(required = true)]
        photo: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 写真を1回で捜索（ポーリングなし）
    Quick {
        /// 顔写真
        #[arg(required = true)]
        photo: PathBuf,

        /// CCTV映像も対象にする
        #[arg(long)]
        cctv: bool,
    },

    /// 写真をアップロード
    Upload {
        #[arg(required = true)]
        photo: PathBuf,
    },

    /// アップロード済みファイルの顔特徴量を作成
    Encode {
        filename: String,
    },

    /// アップロード済みファイルの顔認識
    Recognize {
        filename: String,
    },

    /// CCTVカメラの管理
    Cameras {
        #[command(subcommand)]
        command: CameraCommands,
    },

    /// 設定
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// プロファイルを設定 (kiosk/dashboard)
        #[arg(long)]
        set_profile: Option<BackendProfile>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum TargetCommands {
    /// 対象者一覧
    List,

    /// 対象者を作成
    Create {
        /// 名前
        #[arg(short, long)]
        name: String,

        /// 特徴など
        #[arg(short, long)]
        description: Option<String>,

        /// 顔写真
        #[arg(long)]
        photo: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum CameraCommands {
    /// 登録済みカメラ一覧
    List,

    /// カメラを追加
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        location: String,

        /// rtsp://...
        #[arg(short, long)]
        rtsp_url: String,

        /// 録画時間（秒、既定15）
        #[arg(short, long)]
        duration: Option<String>,
    },

    /// カメラを削除
    Remove {
        id: String,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 接続テスト
    Test {
        id: String,
    },

    /// CCTV設定を有効化（捜索時にカメラ映像も対象にする）
    Activate,

    /// CCTV設定を無効化
    Deactivate,

    /// サーバー側のカメラ一覧
    Remote,
}
