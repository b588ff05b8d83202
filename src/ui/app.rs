use std::{
    fmt::Display,
    io::Stdout,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::routes::{Request, Response, Router, View};

use super::types::{LogBuffer, Notice};

const TICK: Duration = Duration::from_millis(200);
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Main application state container.
pub struct App {
    pub(in crate::ui) router: Router,
    pub(in crate::ui) view: View,
    pub(in crate::ui) rendered_at: Instant,
    pub(in crate::ui) input: String,
    pub(in crate::ui) selected: usize,
    pub(in crate::ui) history_page: usize,
    pub(in crate::ui) last_difficulty: Option<String>,
    pub(in crate::ui) notice: Option<Notice>,
    pub(in crate::ui) logs: LogBuffer,
    pub(in crate::ui) sweep_interval: Duration,
    pub(in crate::ui) last_sweep: Instant,
}

impl App {
    pub fn new(router: Router, logs: LogBuffer) -> Self {
        let difficulties = router.tracker().catalog().names();

        Self {
            router,
            view: View::Home { difficulties },
            rendered_at: Instant::now(),
            input: String::new(),
            selected: 0,
            history_page: 0,
            last_difficulty: None,
            notice: None,
            logs,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            last_sweep: Instant::now(),
        }
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        info!("UI started");
        self.log("UI started");

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()?
                    && super::handlers::InputHandler::new(self).handle_key(key)
                {
                    return Ok(());
                }
            } else {
                self.tick();
            }
        }
    }

    pub(in crate::ui) fn log(&self, msg: impl Into<String> + Display) {
        tracing::info!("{}", &msg);
        self.logs.push(msg.into());
    }

    /// Execute an async operation from sync context
    pub(in crate::ui) fn block_on<F, T>(&self, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
    }

    /// Send a request, follow redirects and show whatever comes back.
    pub(in crate::ui) fn navigate(&mut self, request: Request) {
        let response = self.block_on(self.router.follow(&request));
        self.apply(response);
    }

    pub(in crate::ui) fn apply(&mut self, response: Response) {
        match response {
            Response::Render(view) => {
                if !matches!(view, View::Game { .. }) {
                    self.notice = None;
                }
                if let View::Game { difficulty, .. } = &view {
                    self.last_difficulty = Some(difficulty.clone());
                }
                if let View::History { .. } = &view {
                    self.history_page = 0;
                }
                self.view = view;
                self.rendered_at = Instant::now();
                self.input.clear();
            }
            Response::Redirect(location) => {
                self.log(format!("Too many redirects, stopped at {location}"));
                self.notice = Some(Notice::error("Too many redirects"));
            }
            Response::NotFound(msg)
            | Response::BadRequest(msg)
            | Response::ServiceUnavailable(msg) => {
                self.log(format!("Request failed: {msg}"));
                self.notice = Some(Notice::error(msg));
            }
            Response::MethodNotAllowed => {
                self.notice = Some(Notice::error("Not allowed here"));
            }
        }
    }

    /// Seconds left on the current game page, counted down locally.
    pub(in crate::ui) fn time_remaining(&self) -> Option<f64> {
        match &self.view {
            View::Game { time_remaining, .. } => {
                Some((time_remaining - self.rendered_at.elapsed().as_secs_f64()).max(0.0))
            }
            _ => None,
        }
    }

    /// Periodic work between key presses.
    pub(in crate::ui) fn tick(&mut self) {
        if let View::Game { difficulty, .. } = &self.view {
            if self.time_remaining().is_some_and(|t| t <= 0.0) {
                let path = crate::routes::game_path(difficulty);
                self.navigate(Request::get(path));
            }
            return;
        }

        if self.last_sweep.elapsed() >= self.sweep_interval {
            self.last_sweep = Instant::now();
            self.sweep();
        }
    }

    pub(in crate::ui) fn sweep(&mut self) {
        let tracker = self.router.tracker().clone();
        match self.block_on(tracker.sweep_expired()) {
            Ok(records) => {
                for record in records {
                    self.log(format!(
                        "Recorded abandoned {} round: {}/{}",
                        record.difficulty, record.correct_answers, record.total_attempts
                    ));
                }
            }
            Err(e) => self.log(format!("Sweep failed: {e}")),
        }
    }
}
