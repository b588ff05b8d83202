mod app;
mod handlers;
mod rendering;
mod types;

pub use app::App;
pub use types::{LogBuffer, Notice, NoticeKind};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::time::Duration;

use crate::routes::Router;

/// Entry point for running the UI. Must be called inside a multi-threaded
/// tokio runtime.
pub fn run_ui(router: Router, sweep_interval: Duration) -> Result<()> {
    let logs = LogBuffer::new();
    let mut app = App::new(router, logs).with_sweep_interval(sweep_interval);

    let mut stdout = stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
