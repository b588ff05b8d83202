pub mod args;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod logging;
pub mod progress;
pub mod question;
pub mod routes;
pub mod session;
pub mod ui;

pub use catalog::{Catalog, DifficultyProfile, OperationKind};
pub use error::{QuizError, QuizResult};
pub use progress::{ProgressAccumulator, ProgressTotals};
pub use question::Question;
pub use session::{ProgressScope, RoundOutcome, RoundStatus, RoundTracker, Submission};
