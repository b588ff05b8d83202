use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use arith_sprint::{
    args::Args,
    config::{Config, DbLocation},
    db::{self, SqliteHistoryStore},
    history::HistoryRecorder,
    logging,
    routes::Router,
    session::RoundTracker,
    ui::run_ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(args)?;
    let _log_guard = logging::init_tracing(&config.log_dir)?;

    let pool = match &config.db {
        DbLocation::File(path) => {
            info!(path = %path.display(), "Opening history database");
            db::create_pool(path).await?
        }
        DbLocation::Memory => {
            info!("Using in-memory history database");
            db::create_memory_pool().await?
        }
    };

    let recorder = HistoryRecorder::new(Arc::new(SqliteHistoryStore::new(pool.clone())));
    let tracker = RoundTracker::new(config.catalog.clone(), recorder)
        .with_scope(config.progress_scope);
    info!(
        scope = ?config.progress_scope,
        difficulties = ?config.catalog.names(),
        "Quiz ready"
    );

    let result = run_ui(Router::new(Arc::new(tracker)), config.sweep_interval);

    pool.close().await;
    info!("Shut down");
    result
}
