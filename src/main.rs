use chrono::{DateTime, Utc};
use clap::Parser;
use launch_rotation::adapters::JsonFileSource;
use launch_rotation::app::{render, BoardExporter};
use launch_rotation::core::board::Partition;
use launch_rotation::domain::ports::{
    Clock, ConfigProvider, FixedClock, ListingSource, SystemClock,
};
use launch_rotation::utils::{logger, validation::Validate};
use launch_rotation::{
    BoardView, CliConfig, LaunchBoard, LocalStorage, RefreshScheduler, RotationError, Settings,
};
use std::sync::Arc;
use tokio::sync::mpsc;

fn fail(e: &RotationError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

async fn emit(
    view: &BoardView,
    exporter: &BoardExporter<LocalStorage>,
    config: &impl ConfigProvider,
) -> launch_rotation::Result<()> {
    match config.output_path() {
        Some(path) => exporter.export(view, path).await,
        None => {
            println!("{}", render(view, exporter.format())?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting launch-rotation");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = Settings::resolve(&cli).unwrap_or_else(|e| fail(&e));
    if let Err(e) = settings.validate() {
        fail(&e);
    }
    let exporter = BoardExporter::from_config(LocalStorage::new(".".to_string()), &settings)
        .unwrap_or_else(|e| fail(&e));
    let board = LaunchBoard::from_config(&settings).unwrap_or_else(|e| fail(&e));

    let source = JsonFileSource::from_config(LocalStorage::new(".".to_string()), &settings);
    let listings = source.fetch_listings().await;

    if !cli.watch {
        let clock: Arc<dyn Clock> = match cli.now {
            Some(at) => Arc::new(FixedClock(at)),
            None => Arc::new(SystemClock),
        };
        let now = clock.now();
        let view = board.compose(&board.partition(&listings, now), now);
        if let Err(e) = emit(&view, &exporter, &settings).await {
            fail(&e);
        }
        return Ok(());
    }

    if cli.now.is_some() {
        tracing::warn!("--now is ignored in watch mode");
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<BoardView>();
    let mut partition: Option<Partition> = None;
    let mut scheduler = RefreshScheduler::new(Arc::new(SystemClock));
    scheduler.start(move |now_millis| {
        let Some(now) = DateTime::<Utc>::from_timestamp_millis(now_millis) else {
            return;
        };
        // A new week changes the weekly scope, so the snapshot is re-partitioned.
        let current = match partition.take() {
            Some(p) if p.is_current(now) => p,
            _ => board.partition(&listings, now),
        };
        let view = board.compose(&current, now);
        partition = Some(current);
        let _ = tx.send(view);
    });

    tracing::info!("🔄 Watching rotation, press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping");
                break;
            }
            Some(view) = rx.recv() => {
                tracing::info!(bucket = %view.bucket_start, "rotation advanced");
                if let Err(e) = emit(&view, &exporter, &settings).await {
                    tracing::error!("❌ {}", e.user_friendly_message());
                }
            }
        }
    }

    scheduler.stop();
    Ok(())
}
