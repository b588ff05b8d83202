//! History page state management.

use crate::routes::{Request, View};

use super::super::app::App;

pub const PAGE_SIZE: usize = 10;

/// Helper struct for opening and paging through round history.
pub struct HistoryHandler<'a> {
    app: &'a mut App,
}

impl<'a> HistoryHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn open(&mut self) {
        self.app.log("Loading round history...");
        self.app.navigate(Request::get("/history"));

        if let View::History { records } = &self.app.view {
            let count = records.len();
            self.app.log(format!("Loaded {count} round(s) from history"));
        }
    }

    pub fn total_pages(&self) -> usize {
        match &self.app.view {
            View::History { records } => records.len().div_ceil(PAGE_SIZE),
            _ => 0,
        }
    }

    /// Go to the next page in list view.
    pub fn next_page(&mut self) {
        let total_pages = self.total_pages();
        if total_pages > 0 && self.app.history_page < total_pages - 1 {
            self.app.history_page += 1;
        }
    }

    /// Go to the previous page in list view.
    pub fn prev_page(&mut self) {
        if self.app.history_page > 0 {
            self.app.history_page -= 1;
        }
    }
}
