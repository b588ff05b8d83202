//! Handler modules for managing user input, rounds, and history browsing.

mod game_handler;
mod history_handler;
mod input_handler;

pub use game_handler::GameHandler;
pub use history_handler::{HistoryHandler, PAGE_SIZE};
pub use input_handler::InputHandler;
