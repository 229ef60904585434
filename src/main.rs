use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use darshan::application::{GalleryService, PreloadService};
use darshan::domain::entities::UploadProgress;
use darshan::infrastructure::{AppConfig, CliArgs, Command, HttpTransport, TtlCache};
use darshan::infrastructure::media::{clipboard, picker};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn spawn_progress_printer() -> mpsc::UnboundedSender<UploadProgress> {
    let (tx, mut rx) = mpsc::unbounded_channel::<UploadProgress>();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            info!(phase = ?event.phase, percent = event.percent, "Upload progress");
        }
    });
    tx
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let args = CliArgs::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;
    info!(version = darshan::VERSION, api = %config.api_base_url, "Starting darshan");

    let transport = Arc::new(HttpTransport::with_timeout(
        &config.api_base_url,
        config.request_timeout_secs,
    )?);
    let cache = Arc::new(TtlCache::new(config.cache.clone()));
    let service = Arc::new(GalleryService::new(transport, cache.clone()));

    match args.command {
        Command::List { category, limit } => {
            let items = service
                .get_public_gallery(category.as_deref(), limit)
                .await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Command::Stats => {
            let stats = service.get_gallery_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Upload { file, name, clipboard: from_clipboard } => {
            let progress = spawn_progress_printer();
            let uploaded = if from_clipboard {
                let content = clipboard::read_system_clipboard().await?;
                service
                    .upload_image_from_clipboard(&content, Some(progress))
                    .await?
            } else {
                let path = file.expect("clap enforces file unless --clipboard");
                let candidate = picker::read_picked_file(&path).await?;
                service.upload_image(candidate, name, Some(progress)).await?
            };
            println!("{} -> {}", uploaded.image_name, uploaded.image_url);
        }
        Command::Warm => {
            PreloadService::new(service).preload_critical_data().await;
            println!("{}", cache.stats());
        }
    }

    Ok(())
}
