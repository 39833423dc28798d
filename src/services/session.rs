//! The quiz-taking state machine and the registry that drives its timers.
//!
//! A `QuizSession` only exists once its quiz has resolved (the `Loading`
//! step happens in `SessionManager::open`). From `InProgress` it reaches
//! `Submitted` exactly once, either through `submit` or through the tick
//! that exhausts the countdown. Whichever comes first scores the attempt;
//! every later trigger is a no-op.
//!
//! A manual submit commits only after its result is stored; a failed write
//! leaves the session running. A timeout commits first and retries the
//! write on the next submit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{Instant, interval_at};
use uuid::Uuid;

use crate::{
    config::SECONDS_PER_TICK,
    error::AppError,
    models::{
        question::{PublicQuestion, Question},
        quiz::QuizRecord,
        result::{AnswerMap, ResultRecord, SubmitTrigger},
        session::{SessionStatus, SessionView},
    },
    services::{records::QuizResolver, results},
    storage::KeyValueStore,
};

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    InProgress,
    Submitted {
        record: Box<ResultRecord>,
        saved: bool,
    },
}

/// Outcome of one timer step.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Still running with this many seconds left.
    Running(u32),
    /// This tick ended the session.
    Expired(ResultRecord),
    /// The session was already over; the timer should stop.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Jump(usize),
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: QuizRecord,
    answers: AnswerMap,
    cursor: usize,
    remaining_seconds: u32,
    phase: Phase,
}

impl QuizSession {
    /// Enters `InProgress` with the full time limit on the clock.
    pub fn start(quiz: QuizRecord) -> Self {
        let remaining_seconds = quiz.time_limit_seconds();
        Self {
            quiz,
            answers: AnswerMap::new(),
            cursor: 0,
            remaining_seconds,
            phase: Phase::InProgress,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::InProgress => SessionStatus::InProgress,
            Phase::Submitted { .. } => SessionStatus::Submitted,
        }
    }

    pub fn quiz(&self) -> &QuizRecord {
        &self.quiz
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn result(&self) -> Option<&ResultRecord> {
        match &self.phase {
            Phase::InProgress => None,
            Phase::Submitted { record, .. } => Some(record),
        }
    }

    /// Whether the recorded result has reached the store.
    pub fn is_saved(&self) -> bool {
        matches!(self.phase, Phase::Submitted { saved: true, .. })
    }

    fn mark_saved(&mut self) {
        if let Phase::Submitted { saved, .. } = &mut self.phase {
            *saved = true;
        }
    }

    /// Overwrites any earlier answer for the question. The option is not
    /// checked against the question's choices.
    pub fn record_answer(&mut self, question_id: i64, option: String) -> Result<(), AppError> {
        if !matches!(self.phase, Phase::InProgress) {
            return Err(AppError::Conflict(
                "This quiz has already been submitted".to_string(),
            ));
        }
        self.answers.insert(question_id, option);
        Ok(())
    }

    /// Moves the cursor; `next`/`previous` clamp at the ends.
    pub fn navigate(&mut self, nav: Navigation) -> Result<usize, AppError> {
        let last = self.quiz.questions.len().saturating_sub(1);
        self.cursor = match nav {
            Navigation::Next => (self.cursor + 1).min(last),
            Navigation::Previous => self.cursor.saturating_sub(1),
            Navigation::Jump(index) if index < self.quiz.questions.len() => index,
            Navigation::Jump(index) => {
                return Err(AppError::BadRequest(format!(
                    "Question index {} is out of range",
                    index
                )));
            }
        };
        Ok(self.cursor)
    }

    /// One second of quiz time.
    pub fn tick(&mut self) -> Tick {
        if !matches!(self.phase, Phase::InProgress) {
            return Tick::Stopped;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(SECONDS_PER_TICK);
        if self.remaining_seconds == 0 {
            let record = self.score_attempt(SubmitTrigger::Timeout);
            self.commit(record.clone(), false);
            Tick::Expired(record)
        } else {
            Tick::Running(self.remaining_seconds)
        }
    }

    /// Manual submission. `None` when the session was already submitted.
    pub fn submit(&mut self) -> Option<ResultRecord> {
        if !matches!(self.phase, Phase::InProgress) {
            return None;
        }
        let record = self.score_attempt(SubmitTrigger::Manual);
        self.commit(record.clone(), false);
        Some(record)
    }

    /// Scores the attempt as it stands without ending it.
    pub fn score_attempt(&self, trigger: SubmitTrigger) -> ResultRecord {
        let limit = self.quiz.time_limit_seconds();
        // Timeout records the whole allotment, not the time actually taken.
        let time_spent_seconds = match trigger {
            SubmitTrigger::Timeout => limit,
            SubmitTrigger::Manual => limit.saturating_sub(self.remaining_seconds),
        };

        let total = self.quiz.questions.len();
        let correct = score(&self.quiz.questions, &self.answers);

        ResultRecord {
            quiz_id: self.quiz.id(),
            quiz_title: self.quiz.summary.title.clone(),
            score: correct,
            total_questions: total,
            percentage: percentage(correct, total),
            answers: self.answers.clone(),
            questions: self.quiz.questions.clone(),
            time_spent_seconds,
            trigger,
            submitted_at: Some(chrono::Utc::now()),
        }
    }

    fn commit(&mut self, record: ResultRecord, saved: bool) {
        self.phase = Phase::Submitted {
            record: Box::new(record),
            saved,
        };
    }

    pub fn view(&self, session_id: Uuid) -> SessionView {
        let questions: Vec<PublicQuestion> =
            self.quiz.questions.iter().map(PublicQuestion::from).collect();
        let total = questions.len();
        let progress = if total == 0 {
            0.0
        } else {
            (self.cursor + 1) as f64 / total as f64 * 100.0
        };

        SessionView {
            session_id,
            status: self.status(),
            quiz: self.quiz.summary.clone(),
            current_question: questions.get(self.cursor).cloned(),
            answered: self
                .quiz
                .questions
                .iter()
                .map(|q| self.answers.contains_key(&q.id))
                .collect(),
            questions,
            current_index: self.cursor,
            answers: self.answers.clone(),
            remaining_seconds: self.remaining_seconds,
            clock: format_clock(self.remaining_seconds),
            time_warning: self.remaining_seconds < 60,
            progress,
            results_path: self
                .result()
                .map(|r| format!("/results/{}", r.quiz_id)),
        }
    }
}

/// Number of questions whose recorded answer equals the correct one.
pub fn score(questions: &[Question], answers: &AnswerMap) -> usize {
    questions
        .iter()
        .filter(|q| q.is_correct(answers.get(&q.id).map(String::as_str)))
        .count()
}

/// `round(score / total × 100)`, rounding halves up. Zero questions → 0.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score * 200 + total) / (total * 2)) as u32
}

/// `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

struct SessionEntry {
    session: tokio::sync::Mutex<QuizSession>,
    timer: Mutex<Option<AbortHandle>>,
}

impl SessionEntry {
    fn stop_timer(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.abort();
            }
        }
    }
}

type Registry = Arc<Mutex<HashMap<Uuid, Arc<SessionEntry>>>>;

/// Open sessions, each with its own countdown task. A session is dropped
/// from the registry `retention` after it is submitted; its result stays
/// in the store.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    resolver: QuizResolver,
    sessions: Registry,
    tick: Duration,
    retention: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, tick: Duration, retention: Duration) -> Self {
        Self {
            resolver: QuizResolver::new(store.clone()),
            store,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            tick,
            retention,
        }
    }

    /// Resolves the quiz and starts the countdown. Fails with `NotFound`
    /// when the quiz cannot be resolved; no session is created then.
    pub async fn open(&self, quiz_id: i64) -> Result<SessionView, AppError> {
        let quiz = self.resolver.resolve(quiz_id).await?;

        let id = Uuid::new_v4();
        let session = QuizSession::start(quiz);
        let view = session.view(id);
        let entry = Arc::new(SessionEntry {
            session: tokio::sync::Mutex::new(session),
            timer: Mutex::new(None),
        });

        let handle = tokio::spawn(run_timer(
            id,
            entry.clone(),
            self.store.clone(),
            self.sessions.clone(),
            self.tick,
            self.retention,
        ));
        if let Ok(mut timer) = entry.timer.lock() {
            *timer = Some(handle.abort_handle());
        }

        self.lock()?.insert(id, entry);
        tracing::info!(
            "Session {} started for quiz {} ({}s on the clock)",
            id,
            quiz_id,
            view.remaining_seconds
        );
        Ok(view)
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        let entry = self.entry(id)?;
        let session = entry.session.lock().await;
        Ok(session.view(id))
    }

    pub async fn answer(
        &self,
        id: Uuid,
        question_id: i64,
        option: String,
    ) -> Result<SessionView, AppError> {
        let entry = self.entry(id)?;
        let mut session = entry.session.lock().await;
        session.record_answer(question_id, option)?;
        Ok(session.view(id))
    }

    pub async fn navigate(&self, id: Uuid, nav: Navigation) -> Result<SessionView, AppError> {
        let entry = self.entry(id)?;
        let mut session = entry.session.lock().await;
        session.navigate(nav)?;
        Ok(session.view(id))
    }

    /// Submits and persists the result. The session only ends once the
    /// write succeeds. Repeated calls, or a call after the timer already
    /// expired the session, return the recorded result without scoring
    /// again, storing it first if the earlier write failed.
    pub async fn submit(&self, id: Uuid) -> Result<ResultRecord, AppError> {
        let entry = self.entry(id)?;
        let mut session = entry.session.lock().await;

        if session.status() == SessionStatus::InProgress {
            let record = session.score_attempt(SubmitTrigger::Manual);
            results::save_result(self.store.as_ref(), &record).await?;
            session.commit(record.clone(), true);
            entry.stop_timer();
            tokio::spawn(evict_after(self.sessions.clone(), id, self.retention));

            tracing::info!(
                "Session {} submitted: {}/{} ({}%) in {}s",
                id,
                record.score,
                record.total_questions,
                record.percentage,
                record.time_spent_seconds
            );
            return Ok(record);
        }

        let record = session.result().cloned().ok_or_else(|| {
            AppError::InternalServerError(format!("Session {} has no result", id))
        })?;
        if !session.is_saved() {
            results::save_result(self.store.as_ref(), &record).await?;
            session.mark_saved();
            tracing::info!("Session {} result stored on retry", id);
        }
        Ok(record)
    }

    fn entry(&self, id: Uuid) -> Result<Arc<SessionEntry>, AppError> {
        self.lock()?
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Arc<SessionEntry>>>, AppError> {
        self.sessions
            .lock()
            .map_err(|_| AppError::InternalServerError("session registry lock poisoned".to_string()))
    }
}

async fn evict_after(sessions: Registry, id: Uuid, delay: Duration) {
    tokio::time::sleep(delay).await;
    if let Ok(mut sessions) = sessions.lock() {
        if sessions.remove(&id).is_some() {
            tracing::debug!("Session {} evicted", id);
        }
    }
}

async fn run_timer(
    id: Uuid,
    entry: Arc<SessionEntry>,
    store: Arc<dyn KeyValueStore>,
    sessions: Registry,
    period: Duration,
    retention: Duration,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let mut session = entry.session.lock().await;
        match session.tick() {
            Tick::Running(_) => {}
            Tick::Expired(record) => {
                tracing::info!(
                    "Session {} timed out: {}/{} ({}%)",
                    id,
                    record.score,
                    record.total_questions,
                    record.percentage
                );
                match results::save_result(store.as_ref(), &record).await {
                    Ok(()) => session.mark_saved(),
                    Err(e) => {
                        tracing::error!("Failed to save result for session {}: {:?}", id, e);
                    }
                }
                break;
            }
            Tick::Stopped => return,
        }
    }

    evict_after(sessions, id, retention).await;
}
