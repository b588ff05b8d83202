//! Runtime configuration assembled from command-line flags and environment.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::{args::Args, catalog::Catalog, db, session::ProgressScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbLocation,
    pub log_dir: PathBuf,
    pub catalog: Catalog,
    pub progress_scope: ProgressScope,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let db = if args.in_memory {
            DbLocation::Memory
        } else {
            match args.db {
                Some(path) => DbLocation::File(path),
                None => DbLocation::File(db::get_db_path()?),
            }
        };

        let log_dir = match args.log_dir {
            Some(dir) => dir,
            None => default_log_dir()?,
        };

        let catalog = match args.catalog {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Invalid catalog {}", path.display()))?
            }
            None => Catalog::reference(),
        };

        Ok(Self {
            db,
            log_dir,
            catalog,
            progress_scope: args.progress_scope.into(),
            sweep_interval: Duration::from_secs(args.sweep_interval_secs.max(1)),
        })
    }
}

fn default_log_dir() -> Result<PathBuf> {
    let mut path = dirs::data_dir()
        .context("Unable to determine data directory for your platform")?;
    path.push("arith-sprint");
    path.push("logs");
    Ok(path)
}
