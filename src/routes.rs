//! Request dispatch for the quiz's page surface.
//!
//! Transport-agnostic: a front-end turns user actions into [`Request`]s and
//! renders the [`View`] carried by the [`Response`], following redirects the
//! way a browser would.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    db::HistoryRecord,
    error::QuizError,
    progress::ProgressTotals,
    session::{RoundOutcome, RoundTracker, Submission},
};

pub const END_MESSAGE: &str = "Time's up! Thanks for playing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub form: HashMap<String, String>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            form: HashMap::new(),
        }
    }

    pub fn post<K, V>(path: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            path: path.into(),
            form: form.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }
}

/// Page payloads handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum View {
    Home {
        difficulties: Vec<String>,
    },
    Game {
        difficulty: String,
        question: String,
        /// Carried so the next submission can be scored against it.
        answer: i64,
        progress: ProgressTotals,
        time_remaining: f64,
        last_answer_correct: Option<bool>,
    },
    End {
        progress: ProgressTotals,
        message: String,
    },
    History {
        records: Vec<HistoryRecord>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Render(View),
    Redirect(String),
    NotFound(String),
    BadRequest(String),
    ServiceUnavailable(String),
    MethodNotAllowed,
}

impl From<QuizError> for Response {
    fn from(e: QuizError) -> Self {
        match e {
            QuizError::UnknownDifficulty(_) => Response::NotFound(e.to_string()),
            QuizError::InvalidSubmission(_) => Response::BadRequest(e.to_string()),
            QuizError::PersistenceUnavailable(_) => Response::ServiceUnavailable(e.to_string()),
            QuizError::InvalidProfile(_) | QuizError::NoDivisor(_) => {
                warn!(error = %e, "Misconfigured difficulty profile");
                Response::ServiceUnavailable(e.to_string())
            }
        }
    }
}

pub fn game_path(difficulty: &str) -> String {
    format!("/game/{difficulty}")
}

#[derive(Clone)]
pub struct Router {
    tracker: Arc<RoundTracker>,
}

impl Router {
    pub fn new(tracker: Arc<RoundTracker>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<RoundTracker> {
        &self.tracker
    }

    pub async fn handle(&self, request: &Request) -> Response {
        debug!(method = ?request.method, path = %request.path, "Handling request");

        let path = request.path.trim_end_matches('/');
        match (request.method, path) {
            (method, "") => self.home(method, request),
            (method, "/end") if method == Method::Get => self.end().await,
            (method, "/history") if method == Method::Get => self.history().await,
            (_, "/end" | "/history") => Response::MethodNotAllowed,
            (method, rest) => match rest.strip_prefix("/game/") {
                Some(difficulty) if !difficulty.is_empty() && !difficulty.contains('/') => {
                    self.game(method, difficulty, request).await
                }
                _ => Response::NotFound(format!("no page at {}", request.path)),
            },
        }
    }

    /// Follow redirects until a non-redirect response, as a browser would.
    pub async fn follow(&self, request: &Request) -> Response {
        const MAX_REDIRECTS: usize = 5;

        let mut response = self.handle(request).await;
        for _ in 0..MAX_REDIRECTS {
            let Response::Redirect(location) = &response else {
                return response;
            };
            response = self.handle(&Request::get(location.clone())).await;
        }
        response
    }

    fn home(&self, method: Method, request: &Request) -> Response {
        match method {
            Method::Get => Response::Render(View::Home {
                difficulties: self.tracker.catalog().names(),
            }),
            Method::Post => match request.field("difficulty").map(str::trim) {
                Some(difficulty) if !difficulty.is_empty() => {
                    Response::Redirect(game_path(difficulty))
                }
                _ => Response::BadRequest("missing difficulty".to_string()),
            },
        }
    }

    async fn game(&self, method: Method, difficulty: &str, request: &Request) -> Response {
        let submission = match method {
            Method::Get => None,
            Method::Post => match Submission::from_form(
                request.field("user_answer"),
                request.field("correct_answer"),
            ) {
                Ok(submission) => Some(submission),
                Err(e) => return e.into(),
            },
        };

        match self.tracker.enter_round(difficulty, submission).await {
            Ok(RoundOutcome::Continue(status)) => Response::Render(View::Game {
                difficulty: status.difficulty,
                question: status.question.text,
                answer: status.question.answer,
                progress: status.progress,
                time_remaining: status.time_remaining_secs,
                last_answer_correct: status.last_answer_correct,
            }),
            Ok(RoundOutcome::Expired(_)) => Response::Redirect("/end".to_string()),
            Err(e) => e.into(),
        }
    }

    async fn end(&self) -> Response {
        Response::Render(View::End {
            progress: self.tracker.final_totals().await,
            message: END_MESSAGE.to_string(),
        })
    }

    async fn history(&self) -> Response {
        match self.tracker.recorder().list_all().await {
            Ok(records) => Response::Render(View::History { records }),
            Err(e) => e.into(),
        }
    }
}
