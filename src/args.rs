use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::session::ProgressScope;

/// Command-line spelling of [`ProgressScope`].
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeArg {
    /// Progress resets at the start of every round
    #[default]
    Round,
    /// One tally for every difficulty until the process exits
    Process,
}

impl From<ScopeArg> for ProgressScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Round => ProgressScope::Round,
            ScopeArg::Process => ProgressScope::Process,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "arith-sprint")]
#[command(about = "Timed multiplication and division drills in the terminal")]
pub struct Args {
    /// SQLite database holding round history
    #[arg(long, env = "ARITH_SPRINT_DB")]
    pub db: Option<PathBuf>,

    /// Keep history in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "db")]
    pub in_memory: bool,

    /// Directory for log files
    #[arg(long, env = "ARITH_SPRINT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// JSON file replacing the built-in easy/medium/hard catalog
    #[arg(long, env = "ARITH_SPRINT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Whether progress resets every round or accumulates for the whole process
    #[arg(
        long,
        value_enum,
        env = "ARITH_SPRINT_PROGRESS_SCOPE",
        default_value_t = ScopeArg::Round
    )]
    pub progress_scope: ScopeArg,

    /// Seconds between sweeps that record abandoned rounds
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub sweep_interval_secs: u64,
}
