//! Round session tracking: per-difficulty timers, answer scoring and expiry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    catalog::Catalog,
    clock::{Clock, is_past_limit, seconds_between},
    db::HistoryRecord,
    error::{QuizError, QuizResult},
    history::HistoryRecorder,
    progress::{ProgressAccumulator, ProgressTotals},
    question::{Question, generate},
};

/// Which accumulator an answer is scored against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressScope {
    /// Each round starts from zero and records only its own answers.
    #[default]
    Round,
    /// One tally shared by every difficulty for the life of the process.
    Process,
}

/// A scored answer: what the player typed and what the shown question expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub submitted: i64,
    pub expected: i64,
}

impl Submission {
    pub fn new(submitted: i64, expected: i64) -> Self {
        Self { submitted, expected }
    }

    /// Parse the raw `user_answer` / `correct_answer` form fields.
    pub fn from_form(user_answer: Option<&str>, correct_answer: Option<&str>) -> QuizResult<Self> {
        fn field(name: &str, value: Option<&str>) -> QuizResult<i64> {
            let value = value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| QuizError::InvalidSubmission(format!("missing {name}")))?;
            value.parse().map_err(|_| {
                QuizError::InvalidSubmission(format!("{name} is not an integer: {value:?}"))
            })
        }

        Ok(Self {
            submitted: field("user_answer", user_answer)?,
            expected: field("correct_answer", correct_answer)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RoundSession {
    pub difficulty: String,
    pub started_at: DateTime<Utc>,
    progress: ProgressAccumulator,
}

impl RoundSession {
    fn new(difficulty: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            difficulty: difficulty.to_string(),
            started_at,
            progress: ProgressAccumulator::new(),
        }
    }
}

/// State handed back while a round is still running.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStatus {
    pub difficulty: String,
    pub question: Question,
    pub progress: ProgressTotals,
    pub time_remaining_secs: f64,
    /// Whether the submission in this call (if any) was correct.
    pub last_answer_correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    Continue(RoundStatus),
    Expired(HistoryRecord),
}

struct TrackerState {
    sessions: HashMap<String, RoundSession>,
    shared: ProgressAccumulator,
    last_result: Option<ProgressTotals>,
    rng: StdRng,
}

fn progress_mut<'a>(
    scope: ProgressScope,
    session: &'a mut RoundSession,
    shared: &'a mut ProgressAccumulator,
) -> &'a mut ProgressAccumulator {
    match scope {
        ProgressScope::Round => &mut session.progress,
        ProgressScope::Process => shared,
    }
}

/// Owns every active round. All mutation happens under one async lock, so the
/// check / record / delete sequence of an expiry is never interleaved.
pub struct RoundTracker {
    catalog: Catalog,
    recorder: HistoryRecorder,
    scope: ProgressScope,
    clock: Clock,
    state: Mutex<TrackerState>,
}

impl RoundTracker {
    pub fn new(catalog: Catalog, recorder: HistoryRecorder) -> Self {
        Self {
            catalog,
            recorder,
            scope: ProgressScope::default(),
            clock: Clock::System,
            state: Mutex::new(TrackerState {
                sessions: HashMap::new(),
                shared: ProgressAccumulator::new(),
                last_result: None,
                rng: StdRng::from_os_rng(),
            }),
        }
    }

    pub fn with_scope(mut self, scope: ProgressScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Make question generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.state.get_mut().rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recorder(&self) -> &HistoryRecorder {
        &self.recorder
    }

    pub fn scope(&self) -> ProgressScope {
        self.scope
    }

    pub async fn enter_round(
        &self,
        difficulty: &str,
        submission: Option<Submission>,
    ) -> QuizResult<RoundOutcome> {
        self.enter_round_at(difficulty, submission, self.clock.now()).await
    }

    /// Start or continue the round for `difficulty` as of `now`.
    ///
    /// Expiry is checked before the submission is scored, so an answer that
    /// arrives after the time limit is discarded. If recording the expired
    /// round fails the session is kept and the error is returned.
    pub async fn enter_round_at(
        &self,
        difficulty: &str,
        submission: Option<Submission>,
        now: DateTime<Utc>,
    ) -> QuizResult<RoundOutcome> {
        let profile = self.catalog.lookup(difficulty)?;
        let time_limit = f64::from(profile.time_limit_secs);

        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let session = state.sessions.entry(difficulty.to_string()).or_insert_with(|| {
            info!(difficulty, "Round started");
            RoundSession::new(difficulty, now)
        });

        let elapsed = seconds_between(session.started_at, now).max(0.0);

        if is_past_limit(session.started_at, now, profile.time_limit_secs) {
            let totals = progress_mut(self.scope, session, &mut state.shared).snapshot();
            if submission.is_some() {
                debug!(difficulty, "Discarding answer submitted after expiry");
            }

            let record = self.recorder.record_at(difficulty, totals, now).await?;
            state.sessions.remove(difficulty);
            state.last_result = Some(totals);
            info!(difficulty, elapsed, "Round expired");
            return Ok(RoundOutcome::Expired(record));
        }

        let progress = progress_mut(self.scope, session, &mut state.shared);
        let last_answer_correct = submission.map(|s| {
            let correct = progress.record_answer(s.submitted, s.expected);
            debug!(
                difficulty,
                submitted = s.submitted,
                expected = s.expected,
                correct,
                "Answer scored"
            );
            correct
        });
        let snapshot = progress.snapshot();

        let question = generate(profile, &mut state.rng)?;

        Ok(RoundOutcome::Continue(RoundStatus {
            difficulty: difficulty.to_string(),
            question,
            progress: snapshot,
            time_remaining_secs: time_limit - elapsed,
            last_answer_correct,
        }))
    }

    pub async fn sweep_expired(&self) -> QuizResult<Vec<HistoryRecord>> {
        self.sweep_expired_at(self.clock.now()).await
    }

    /// Expire and record every session past its time limit as of `now`.
    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) -> QuizResult<Vec<HistoryRecord>> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let mut expired: Vec<String> = state
            .sessions
            .values()
            .filter(|session| {
                self.catalog.lookup(&session.difficulty).is_ok_and(|profile| {
                    is_past_limit(session.started_at, now, profile.time_limit_secs)
                })
            })
            .map(|session| session.difficulty.clone())
            .collect();
        expired.sort();

        let mut records = Vec::with_capacity(expired.len());
        for difficulty in expired {
            let Some(session) = state.sessions.get_mut(&difficulty) else {
                continue;
            };
            let totals = progress_mut(self.scope, session, &mut state.shared).snapshot();

            let record = self.recorder.record_at(&difficulty, totals, now).await?;
            state.sessions.remove(&difficulty);
            state.last_result = Some(totals);
            info!(difficulty = %difficulty, "Abandoned round swept");
            records.push(record);
        }

        Ok(records)
    }

    /// Totals to show once a round is over.
    pub async fn final_totals(&self) -> ProgressTotals {
        let state = self.state.lock().await;
        match self.scope {
            ProgressScope::Process => state.shared.snapshot(),
            ProgressScope::Round => state.last_result.unwrap_or_default(),
        }
    }

    pub async fn active_sessions(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut names: Vec<String> = state.sessions.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn session_started_at(&self, difficulty: &str) -> Option<DateTime<Utc>> {
        let state = self.state.lock().await;
        state.sessions.get(difficulty).map(|s| s.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{HistoryStore, MemoryHistoryStore};
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn tracker(scope: ProgressScope) -> (RoundTracker, Arc<MemoryHistoryStore>) {
        let store = Arc::new(MemoryHistoryStore::new());
        let recorder = HistoryRecorder::new(store.clone());
        let tracker = RoundTracker::new(Catalog::reference(), recorder)
            .with_scope(scope)
            .with_seed(11);
        (tracker, store)
    }

    fn expect_continue(outcome: RoundOutcome) -> RoundStatus {
        match outcome {
            RoundOutcome::Continue(status) => status,
            RoundOutcome::Expired(record) => panic!("unexpected expiry: {record:?}"),
        }
    }

    fn expect_expired(outcome: RoundOutcome) -> HistoryRecord {
        match outcome {
            RoundOutcome::Expired(record) => record,
            RoundOutcome::Continue(status) => panic!("expected expiry, got {status:?}"),
        }
    }

    #[test]
    fn test_submission_from_form() {
        assert_eq!(
            Submission::from_form(Some("42"), Some(" 42 ")).unwrap(),
            Submission::new(42, 42)
        );
        assert_eq!(
            Submission::from_form(Some("-3"), Some("7")).unwrap(),
            Submission::new(-3, 7)
        );
        assert!(matches!(
            Submission::from_form(None, Some("1")),
            Err(QuizError::InvalidSubmission(_))
        ));
        assert!(matches!(
            Submission::from_form(Some(""), Some("1")),
            Err(QuizError::InvalidSubmission(_))
        ));
        assert!(matches!(
            Submission::from_form(Some("twelve"), Some("12")),
            Err(QuizError::InvalidSubmission(_))
        ));
        assert!(matches!(
            Submission::from_form(Some("12"), None),
            Err(QuizError::InvalidSubmission(_))
        ));
    }

    #[tokio::test]
    async fn test_first_entry_starts_session() {
        let (tracker, _) = tracker(ProgressScope::Round);

        let status = expect_continue(tracker.enter_round_at("easy", None, t0()).await.unwrap());
        assert_eq!(status.difficulty, "easy");
        assert_eq!(status.time_remaining_secs, 60.0);
        assert_eq!(status.progress, ProgressTotals::default());
        assert_eq!(status.last_answer_correct, None);
        assert_eq!(tracker.session_started_at("easy").await, Some(t0()));
        assert_eq!(tracker.active_sessions().await, vec!["easy"]);
    }

    #[tokio::test]
    async fn test_time_remaining_is_fractional() {
        let (tracker, _) = tracker(ProgressScope::Round);
        tracker.enter_round_at("hard", None, t0()).await.unwrap();

        let status = expect_continue(
            tracker
                .enter_round_at("hard", None, t0() + Duration::milliseconds(12_250))
                .await
                .unwrap(),
        );
        assert!((status.time_remaining_secs - 17.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let (tracker, store) = tracker(ProgressScope::Round);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();

        let just_before = t0() + Duration::seconds(60) - Duration::milliseconds(1);
        let status =
            expect_continue(tracker.enter_round_at("easy", None, just_before).await.unwrap());
        assert!(status.time_remaining_secs > 0.0);

        // Exactly at the limit is still in time.
        let at_limit = t0() + Duration::seconds(60);
        expect_continue(tracker.enter_round_at("easy", None, at_limit).await.unwrap());

        let just_after = at_limit + Duration::milliseconds(1);
        let record =
            expect_expired(tracker.enter_round_at("easy", None, just_after).await.unwrap());
        assert_eq!(record.difficulty, "easy");
        assert!(tracker.active_sessions().await.is_empty());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_expiry_boundary_sub_millisecond() {
        let (tracker, store) = tracker(ProgressScope::Round);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();

        let at_limit = t0() + Duration::seconds(60);
        let status = expect_continue(
            tracker
                .enter_round_at("easy", None, at_limit - Duration::microseconds(500))
                .await
                .unwrap(),
        );
        assert!(status.time_remaining_secs > 0.0);

        let past = at_limit + Duration::microseconds(500);
        expect_expired(tracker.enter_round_at("easy", None, past).await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_boundary_sub_millisecond() {
        let (tracker, _) = tracker(ProgressScope::Round);
        tracker.enter_round_at("hard", None, t0()).await.unwrap();

        let at_limit = t0() + Duration::seconds(30);
        assert!(tracker.sweep_expired_at(at_limit).await.unwrap().is_empty());

        let records = tracker
            .sweep_expired_at(at_limit + Duration::nanoseconds(1))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert!(tracker.active_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_scores_answers() {
        let (tracker, _) = tracker(ProgressScope::Round);
        let q1 = expect_continue(tracker.enter_round_at("medium", None, t0()).await.unwrap())
            .question;

        let status = expect_continue(
            tracker
                .enter_round_at("medium", Some(Submission::new(q1.answer, q1.answer)), t0())
                .await
                .unwrap(),
        );
        assert_eq!(status.last_answer_correct, Some(true));
        assert_eq!(status.progress, ProgressTotals { correct_answers: 1, total_attempts: 1 });

        let q2 = status.question;
        let status = expect_continue(
            tracker
                .enter_round_at("medium", Some(Submission::new(q2.answer + 1, q2.answer)), t0())
                .await
                .unwrap(),
        );
        assert_eq!(status.last_answer_correct, Some(false));
        assert_eq!(status.progress, ProgressTotals { correct_answers: 1, total_attempts: 2 });
    }

    #[tokio::test]
    async fn test_late_answer_is_discarded() {
        let (tracker, store) = tracker(ProgressScope::Round);
        let q = expect_continue(tracker.enter_round_at("hard", None, t0()).await.unwrap()).question;

        let late = t0() + Duration::seconds(31);
        let record = expect_expired(
            tracker
                .enter_round_at("hard", Some(Submission::new(q.answer, q.answer)), late)
                .await
                .unwrap(),
        );
        assert_eq!(record.totals(), ProgressTotals::default());
        assert_eq!(store.list_all().await.unwrap()[0].total_attempts, 0);
    }

    #[tokio::test]
    async fn test_unknown_difficulty_creates_nothing() {
        let (tracker, store) = tracker(ProgressScope::Round);

        let err = tracker.enter_round_at("expert", None, t0()).await.unwrap_err();
        assert!(matches!(err, QuizError::UnknownDifficulty(name) if name == "expert"));
        assert!(tracker.active_sessions().await.is_empty());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_new_round_after_expiry() {
        let (tracker, _) = tracker(ProgressScope::Round);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();

        let later = t0() + Duration::seconds(61);
        expect_expired(tracker.enter_round_at("easy", None, later).await.unwrap());

        let status = expect_continue(tracker.enter_round_at("easy", None, later).await.unwrap());
        assert_eq!(status.time_remaining_secs, 60.0);
        assert_eq!(tracker.session_started_at("easy").await, Some(later));
    }

    #[tokio::test]
    async fn test_round_scope_isolates_difficulties() {
        let (tracker, store) = tracker(ProgressScope::Round);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();
        tracker.enter_round_at("hard", None, t0()).await.unwrap();

        tracker
            .enter_round_at("easy", Some(Submission::new(4, 4)), t0())
            .await
            .unwrap();
        let hard = expect_continue(
            tracker
                .enter_round_at("hard", Some(Submission::new(1, 2)), t0())
                .await
                .unwrap(),
        );
        assert_eq!(hard.progress, ProgressTotals { correct_answers: 0, total_attempts: 1 });

        let record = expect_expired(
            tracker
                .enter_round_at("easy", None, t0() + Duration::seconds(61))
                .await
                .unwrap(),
        );
        assert_eq!(record.totals(), ProgressTotals { correct_answers: 1, total_attempts: 1 });
        assert_eq!(tracker.final_totals().await, record.totals());

        // The next easy round starts from zero.
        let fresh = expect_continue(
            tracker
                .enter_round_at("easy", None, t0() + Duration::seconds(61))
                .await
                .unwrap(),
        );
        assert_eq!(fresh.progress, ProgressTotals::default());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_process_scope_shares_totals() {
        let (tracker, _) = tracker(ProgressScope::Process);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();
        tracker
            .enter_round_at("easy", Some(Submission::new(4, 4)), t0())
            .await
            .unwrap();

        let medium = expect_continue(
            tracker
                .enter_round_at("medium", Some(Submission::new(2, 3)), t0())
                .await
                .unwrap(),
        );
        assert_eq!(medium.progress, ProgressTotals { correct_answers: 1, total_attempts: 2 });

        let record = expect_expired(
            tracker
                .enter_round_at("medium", None, t0() + Duration::seconds(46))
                .await
                .unwrap(),
        );
        assert_eq!(record.totals(), ProgressTotals { correct_answers: 1, total_attempts: 2 });

        // Never reset: the next round keeps counting from the shared tally.
        let again = expect_continue(
            tracker
                .enter_round_at("medium", None, t0() + Duration::seconds(46))
                .await
                .unwrap(),
        );
        assert_eq!(again.progress.total_attempts, 2);
        assert_eq!(tracker.final_totals().await.total_attempts, 2);
    }

    #[tokio::test]
    async fn test_failed_record_keeps_session() {
        let (tracker, store) = tracker(ProgressScope::Round);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();
        tracker
            .enter_round_at("easy", Some(Submission::new(9, 9)), t0())
            .await
            .unwrap();

        store.set_unavailable(true);
        let later = t0() + Duration::seconds(70);
        let err = tracker.enter_round_at("easy", None, later).await.unwrap_err();
        assert!(matches!(err, QuizError::PersistenceUnavailable(_)));
        assert_eq!(tracker.active_sessions().await, vec!["easy"]);

        store.set_unavailable(false);
        let record = expect_expired(tracker.enter_round_at("easy", None, later).await.unwrap());
        assert_eq!(record.totals(), ProgressTotals { correct_answers: 1, total_attempts: 1 });
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_records_abandoned_rounds() {
        let (tracker, store) = tracker(ProgressScope::Round);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();
        tracker.enter_round_at("hard", None, t0()).await.unwrap();

        // Only hard (30s) is past its limit at 40s.
        let records = tracker.sweep_expired_at(t0() + Duration::seconds(40)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].difficulty, "hard");
        assert_eq!(tracker.active_sessions().await, vec!["easy"]);

        let records = tracker.sweep_expired_at(t0() + Duration::seconds(61)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(tracker.active_sessions().await.is_empty());
        assert_eq!(store.list_all().await.unwrap().len(), 2);

        let later = t0() + Duration::seconds(120);
        assert!(tracker.sweep_expired_at(later).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_answers_are_not_lost() {
        let (tracker, _) = tracker(ProgressScope::Round);
        let tracker = Arc::new(tracker);
        tracker.enter_round_at("easy", None, t0()).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..50 {
            let tracker = tracker.clone();
            handles.push(tokio::spawn(async move {
                tracker
                    .enter_round_at("easy", Some(Submission::new(i % 2, 0)), t0())
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let status = expect_continue(tracker.enter_round_at("easy", None, t0()).await.unwrap());
        assert_eq!(status.progress, ProgressTotals { correct_answers: 25, total_attempts: 50 });
    }

    #[tokio::test]
    async fn test_concurrent_expiry_records_once() {
        let (tracker, store) = tracker(ProgressScope::Round);
        let tracker = Arc::new(tracker);
        tracker.enter_round_at("hard", None, t0()).await.unwrap();

        let late = t0() + Duration::seconds(31);
        let a = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.enter_round_at("hard", None, late).await })
        };
        let b = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.enter_round_at("hard", None, late).await })
        };
        let outcomes = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];

        let expired = outcomes
            .iter()
            .filter(|o| matches!(o, RoundOutcome::Expired(_)))
            .count();
        assert_eq!(expired, 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
