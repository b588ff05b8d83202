//! Keyboard dispatch per page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::routes::View;

use super::super::app::App;
use super::{GameHandler, HistoryHandler};

/// Helper struct for managing keyboard input and user interactions.
pub struct InputHandler<'a> {
    app: &'a mut App,
}

impl<'a> InputHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q' | 'Q'), KeyModifiers::CONTROL) => {
                self.app.log("Exit requested");
                return true;
            }

            (KeyCode::Char('r' | 'R'), KeyModifiers::CONTROL) => {
                HistoryHandler::new(self.app).open();
                return false;
            }

            (KeyCode::Esc, _) => {
                GameHandler::new(self.app).go_home();
                return false;
            }

            _ => {}
        }

        match self.app.view {
            View::Home { .. } => self.handle_home_key(key),
            View::Game { .. } => self.handle_game_key(key),
            View::End { .. } => self.handle_end_key(key),
            View::History { .. } => self.handle_history_key(key),
        }
        false
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => GameHandler::new(self.app).move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => GameHandler::new(self.app).move_selection(1),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let View::Home { difficulties } = &self.app.view
                    && index < difficulties.len()
                {
                    self.app.selected = index;
                    GameHandler::new(self.app).start_selected();
                }
            }
            KeyCode::Enter => GameHandler::new(self.app).start_selected(),
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => GameHandler::new(self.app).submit_answer(),
            KeyCode::Backspace => {
                self.app.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => self.app.input.push(c),
            KeyCode::Char('-') if self.app.input.is_empty() => self.app.input.push('-'),
            _ => {}
        }
    }

    fn handle_end_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => GameHandler::new(self.app).go_home(),
            KeyCode::Char('r') => GameHandler::new(self.app).replay(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::PageDown | KeyCode::Right => HistoryHandler::new(self.app).next_page(),
            KeyCode::PageUp | KeyCode::Left => HistoryHandler::new(self.app).prev_page(),
            KeyCode::Enter => GameHandler::new(self.app).go_home(),
            _ => {}
        }
    }
}
