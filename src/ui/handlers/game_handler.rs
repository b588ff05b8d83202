//! Round state transitions driven from the terminal.

use crate::routes::{Request, View, game_path};

use super::super::{app::App, types::Notice};

/// Helper struct for starting rounds and submitting answers.
pub struct GameHandler<'a> {
    app: &'a mut App,
}

impl<'a> GameHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Pick the highlighted difficulty on the home page.
    pub fn start_selected(&mut self) {
        let View::Home { difficulties } = &self.app.view else {
            return;
        };
        let Some(difficulty) = difficulties.get(self.app.selected).cloned() else {
            return;
        };

        self.app.log(format!("Starting {difficulty} round"));
        self.app
            .navigate(Request::post("/", [("difficulty", difficulty)]));
    }

    pub fn move_selection(&mut self, delta: isize) {
        let View::Home { difficulties } = &self.app.view else {
            return;
        };
        if difficulties.is_empty() {
            return;
        }
        let len = difficulties.len() as isize;
        let next = (self.app.selected as isize + delta).rem_euclid(len);
        self.app.selected = next as usize;
    }

    /// Submit the typed answer for the question on screen.
    pub fn submit_answer(&mut self) {
        let View::Game {
            difficulty, answer, ..
        } = &self.app.view
        else {
            return;
        };

        let typed = self.app.input.trim().to_string();
        if typed.is_empty() {
            self.app.notice = Some(Notice::info("Type an answer first"));
            return;
        }

        let expected = *answer;
        let path = game_path(difficulty);
        let request = Request::post(
            path,
            [
                ("user_answer", typed.clone()),
                ("correct_answer", expected.to_string()),
            ],
        );

        self.app.notice = None;
        self.app.navigate(request);

        if let View::Game {
            last_answer_correct: Some(correct),
            ..
        } = &self.app.view
        {
            self.app.notice = Some(if *correct {
                Notice::info(format!("{typed} is correct!"))
            } else {
                Notice::error(format!("{typed} is wrong, it was {expected}"))
            });
        }
    }

    /// Start another round of the difficulty that just ended.
    pub fn replay(&mut self) {
        if let Some(difficulty) = self.app.last_difficulty.clone() {
            self.app.log(format!("Replaying {difficulty}"));
            self.app.navigate(Request::get(game_path(&difficulty)));
        }
    }

    pub fn go_home(&mut self) {
        self.app.navigate(Request::get("/"));
    }
}
