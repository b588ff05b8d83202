mod end;
mod game;
mod history;
mod home;
mod input_field;
mod logs;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{routes::View, ui::app::App};

impl App {
    pub(in crate::ui) fn draw(&self, f: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Page content
                Constraint::Length(8), // Log panel
            ])
            .split(f.area());

        self.draw_status(f, layout[0]);

        match &self.view {
            View::Home { difficulties } => self.draw_home(f, layout[1], difficulties),
            View::Game { .. } => self.draw_game(f, layout[1]),
            View::End { progress, message } => self.draw_end(f, layout[1], progress, message),
            View::History { records } => self.draw_history(f, layout[1], records),
        }

        self.draw_logs(f, layout[2]);
    }
}
