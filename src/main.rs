use clap::Parser;
use dialoguer::{Confirm, Password};
use dristi_client::{cli, config, display, error, search, store, transport, CliClient};
use cli::{CameraCommands, Cli, Commands, TargetCommands};
use config::Config;
use dristi_common::{
    validate_email, validate_password, ApiClient, CameraDraft, CameraRegistry, RegisterRequest,
    TargetListView, TargetPersonForm, CONNECTION_TEST_DELAY, CONNECTION_TEST_MESSAGE,
};
use error::{DristiError, Result};
use store::FileStore;
use tracing_subscriber::EnvFilter;
use transport::{ReqwestTransport, TerminalNavigator};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt_password(given: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let mut prompt = Password::new().with_prompt("パスワード");
    if confirm {
        prompt = prompt.with_confirmation("パスワード（確認）", "パスワードが一致しません");
    }
    Ok(prompt.interact()?)
}

fn confirm(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(message).default(false).interact()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?.resolve_url(Config::env_url(), cli.url.clone());
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    let store = FileStore::in_dir(&Config::config_dir()?);
    let registry = CameraRegistry::new(store.clone());
    let endpoints = config.endpoints();
    let client: CliClient = ApiClient::new(
        ReqwestTransport::new(config.timeout())?,
        store,
        TerminalNavigator,
        endpoints.clone(),
    );

    match cli.command {
        Commands::Health => {
            let report = client.health().await;
            display::print_health(&endpoints, &report);
        }

        Commands::Login { username, password } => {
            let password = prompt_password(password, false)?;
            let session = client.login_user(&username, &password).await?;
            println!("✔ ログインしました");
            display::print_user(&session.user);
        }

        Commands::Register { username, email, full_name, password } => {
            validate_email(&email)?;
            let password = prompt_password(password, true)?;
            validate_password(&password)?;

            let request = RegisterRequest {
                username,
                email,
                password,
                full_name,
            };
            client.register_user(&request).await?;
            println!("✔ 登録しました。`dristi login {}` でログインしてください", request.username);
        }

        Commands::Logout { yes } => {
            if confirm("ログアウトしますか？", yes)? {
                client.logout();
                println!("✔ ログアウトしました");
            }
        }

        Commands::Whoami => {
            if !client.is_logged_in() {
                return Err(DristiError::NotLoggedIn);
            }
            match client.current_user() {
                Some(user) => display::print_user(&user),
                None => return Err(DristiError::NotLoggedIn),
            }
        }

        Commands::Targets { command } => match command {
            TargetCommands::List => {
                let targets = client.get_target_persons().await?;
                display::print_targets(&TargetListView::from_targets(&targets));
            }
            TargetCommands::Create { name, description, photo } => {
                let photo = search::load_photo(&photo)?;
                let form = TargetPersonForm { name, description, photo };
                let created = client.create_target_person(&form).await?;
                println!("✔ 対象者を作成しました");
                if cli.verbose {
                    display::print_json(&created);
                }
            }
        },

        Commands::Search { photo, json } => {
            println!("🔍 DRISTI - 捜索\n");
            let photo = search::load_photo(&photo)?;
            let view = search::execute_search(
                &client,
                &registry,
                photo,
                config.poll_policy(),
                !json,
            )
            .await?;

            if json {
                let matches = match &view {
                    dristi_common::ResultsView::Matches(summary) => summary.shown.clone(),
                    _ => Vec::new(),
                };
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                display::print_results(&endpoints, &view);
            }
        }

        Commands::Quick { photo, cctv } => {
            let photo = search::load_photo(&photo)?;
            let result = client.search_lost_person(&photo, cctv).await?;
            display::print_json(&result);
        }

        Commands::Upload { photo } => {
            let photo = search::load_photo(&photo)?;
            let result = client.upload_file(&photo).await?;
            display::print_json(&result);
        }

        Commands::Encode { filename } => {
            display::print_json(&client.encode(&filename).await?);
        }

        Commands::Recognize { filename } => {
            display::print_json(&client.recognize(&filename).await?);
        }

        Commands::Cameras { command } => match command {
            CameraCommands::List => {
                display::print_cameras(&registry.list(), registry.is_active());
            }
            CameraCommands::Add { name, location, rtsp_url, duration } => {
                let draft = CameraDraft {
                    name,
                    location,
                    rtsp_url,
                    duration: duration.unwrap_or_default(),
                };
                let camera = registry.add(&draft, chrono::Utc::now().timestamp_millis())?;
                println!("✔ カメラを追加しました: {} ({})", camera.name, camera.id);
            }
            CameraCommands::Remove { id, yes } => {
                if registry.get(&id).is_none() {
                    return Err(DristiError::CameraNotFound(id));
                }
                if confirm("このカメラを削除しますか？", yes)? && registry.remove(&id)? {
                    println!("✔ カメラを削除しました: {}", id);
                }
            }
            CameraCommands::Test { id } => {
                let camera = registry
                    .get(&id)
                    .ok_or_else(|| DristiError::CameraNotFound(id.clone()))?;
                println!("接続テスト中: {} ({})", camera.name, camera.rtsp_url);
                tokio::time::sleep(CONNECTION_TEST_DELAY).await;
                println!("ℹ {}", CONNECTION_TEST_MESSAGE);
            }
            CameraCommands::Activate => {
                let count = registry.activate()?;
                println!("✔ CCTV設定を有効化しました（{}台）", count);
            }
            CameraCommands::Deactivate => {
                registry.deactivate()?;
                println!("✔ CCTV設定を無効化しました");
            }
            CameraCommands::Remote => {
                let cameras = client.list_backend_cameras().await?;
                display::print_backend_cameras(&cameras);
            }
        },

        Commands::Config { set_url, set_profile, show } => {
            // --url/--profileの一時上書きは保存しない
            let mut saved = Config::load()?;
            let mut changed = false;
            if let Some(url) = set_url {
                saved.base_url = url;
                changed = true;
            }
            if let Some(profile) = set_profile {
                saved.profile = profile;
                changed = true;
            }
            if changed {
                saved.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  URL: {}", saved.base_url);
                if let Some(env_url) = Config::env_url() {
                    println!("  URL（{}）: {}", config::BASE_URL_ENV, env_url);
                }
                println!("  プロファイル: {}", saved.profile);
                println!("  ポーリング間隔: {}ms", saved.poll_interval_ms);
                println!("  最大試行回数: {}", saved.max_poll_attempts);
                println!("  タイムアウト: {}秒", saved.timeout_seconds);
                println!("  保存先: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
