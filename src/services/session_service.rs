use std::mem;
use std::sync::Arc;
use std::time::Duration;

use crate::api::QuizApi;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, Session};
use crate::models::dto::{ResultSummary, StartQuizResponse};
use crate::services::clock::{ExpirySignal, SessionClock};
use crate::services::submission_service::SubmissionService;

/// Observable lifecycle tag, for rendering and state assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Starting,
    Conflict,
    Active,
    Submitting,
    Stopping,
    Submitted,
    Stopped,
}

/// What a start attempt resolved to. A conflict is a first-class outcome
/// requiring a user decision, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    Conflict { conflicting_quiz_id: String },
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Give up on the new attempt; the previous server-side session stays
    /// active.
    Abandon,
    /// Stop the previous session, then retry the original start once.
    StopPrevious,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    /// Fired by the session clock at expiry. Discarded when the session is
    /// no longer active, so a racing manual action never doubles up.
    ClockExpiry,
}

enum Lifecycle {
    Idle,
    Starting,
    Conflict {
        quiz_id: String,
        conflicting_quiz_id: String,
    },
    Active {
        session: Session,
        clock: SessionClock,
    },
    Submitting,
    Stopping,
    Submitted {
        result: ResultSummary,
    },
    Stopped,
}

impl Lifecycle {
    fn tag(&self) -> LifecycleState {
        match self {
            Lifecycle::Idle => LifecycleState::Idle,
            Lifecycle::Starting => LifecycleState::Starting,
            Lifecycle::Conflict { .. } => LifecycleState::Conflict,
            Lifecycle::Active { .. } => LifecycleState::Active,
            Lifecycle::Submitting => LifecycleState::Submitting,
            Lifecycle::Stopping => LifecycleState::Stopping,
            Lifecycle::Submitted { .. } => LifecycleState::Submitted,
            Lifecycle::Stopped => LifecycleState::Stopped,
        }
    }
}

/// Owns the session lifecycle: start with conflict resolution, answer and
/// navigation commands, manual and expiry-triggered submission, stop. All
/// mutating calls serialize through `&mut self`; the transitional states
/// guarantee at most one lifecycle request is in flight per engine.
///
/// Terminal states (`Submitted`, `Stopped`) are absorbing; the only thing
/// left to do with the engine afterwards is read the result and drop it.
pub struct SessionEngine {
    api: Arc<dyn QuizApi>,
    state: Lifecycle,
}

impl SessionEngine {
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self {
            api,
            state: Lifecycle::Idle,
        }
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state.tag()
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            Lifecycle::Active { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ResultSummary> {
        match &self.state {
            Lifecycle::Submitted { result } => Some(result),
            _ => None,
        }
    }

    pub fn conflicting_quiz_id(&self) -> Option<&str> {
        match &self.state {
            Lifecycle::Conflict {
                conflicting_quiz_id,
                ..
            } => Some(conflicting_quiz_id),
            _ => None,
        }
    }

    /// Seconds remaining on the active session's clock; `None` when there is
    /// no active session or the quiz has no time limit.
    pub fn time_remaining_secs(&self) -> Option<i64> {
        match &self.state {
            Lifecycle::Active { clock, .. } => clock.remaining_secs(),
            _ => None,
        }
    }

    /// Hand out the active clock's expiry signal so the host can wait on it
    /// and call `submit(SubmitTrigger::ClockExpiry)` when it fires.
    pub fn take_expiry_signal(&mut self) -> Option<ExpirySignal> {
        match &mut self.state {
            Lifecycle::Active { clock, .. } => clock.take_expiry_signal(),
            _ => None,
        }
    }

    /// Start a session for `quiz_id`. Only valid from `Idle`.
    pub async fn start(&mut self, quiz_id: &str) -> AppResult<StartOutcome> {
        if !matches!(self.state, Lifecycle::Idle) {
            return Err(self.invalid_state("start"));
        }

        self.state = Lifecycle::Starting;
        match self.api.start_quiz(quiz_id).await {
            Ok(response) => self.activate(quiz_id, response),
            Err(AppError::QuizConflict {
                quiz_id: conflicting_quiz_id,
            }) => {
                log::info!(
                    "Start of quiz '{}' blocked by active session on '{}'",
                    quiz_id,
                    conflicting_quiz_id
                );
                self.state = Lifecycle::Conflict {
                    quiz_id: quiz_id.to_string(),
                    conflicting_quiz_id: conflicting_quiz_id.clone(),
                };
                Ok(StartOutcome::Conflict {
                    conflicting_quiz_id,
                })
            }
            Err(e) => {
                self.state = Lifecycle::Idle;
                Err(e)
            }
        }
    }

    /// Resolve a start conflict. Only valid from `Conflict`.
    ///
    /// `StopPrevious` stops the conflicting session and retries the original
    /// start exactly once; a second conflict on the retry is a hard failure
    /// rather than another round, so resolution can never loop. A failed
    /// stop leaves the engine in `Conflict` for the caller to retry or
    /// abandon.
    pub async fn resolve_conflict(
        &mut self,
        resolution: ConflictResolution,
    ) -> AppResult<StartOutcome> {
        let (quiz_id, conflicting_quiz_id) = match &self.state {
            Lifecycle::Conflict {
                quiz_id,
                conflicting_quiz_id,
            } => (quiz_id.clone(), conflicting_quiz_id.clone()),
            _ => return Err(self.invalid_state("resolve_conflict")),
        };

        match resolution {
            ConflictResolution::Abandon => {
                log::info!("Abandoning start of quiz '{}'", quiz_id);
                self.state = Lifecycle::Idle;
                Ok(StartOutcome::Abandoned)
            }
            ConflictResolution::StopPrevious => {
                self.api.stop_quiz(&conflicting_quiz_id).await?;

                self.state = Lifecycle::Starting;
                match self.api.start_quiz(&quiz_id).await {
                    Ok(response) => self.activate(&quiz_id, response),
                    Err(AppError::QuizConflict { quiz_id: again }) => {
                        log::warn!(
                            "Retried start of quiz '{}' conflicted again on '{}'",
                            quiz_id,
                            again
                        );
                        self.state = Lifecycle::Idle;
                        Err(AppError::QuizConflict { quiz_id: again })
                    }
                    Err(e) => {
                        self.state = Lifecycle::Idle;
                        Err(e)
                    }
                }
            }
        }
    }

    /// Record an answer for the active session.
    pub fn answer(&mut self, question_id: &str, value: &str) -> AppResult<()> {
        self.active_session_mut("answer")?.answer(question_id, value)
    }

    pub fn next_question(&mut self) -> AppResult<()> {
        self.active_session_mut("next_question")?.next_question();
        Ok(())
    }

    pub fn previous_question(&mut self) -> AppResult<()> {
        self.active_session_mut("previous_question")?
            .previous_question();
        Ok(())
    }

    /// Ids of questions with an empty answer value, for the non-blocking
    /// warning before submission. Never blocks a submit.
    pub fn unanswered_question_ids(&self) -> Vec<String> {
        self.session()
            .map(|s| {
                s.unanswered_question_ids()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Submit the active session's answers. Manual submission outside
    /// `Active` is a state error; an expiry trigger outside `Active` is
    /// silently discarded so the clock can never cause a second submission.
    /// A failed submission rolls back to `Active` with the session intact.
    pub async fn submit(&mut self, trigger: SubmitTrigger) -> AppResult<Option<ResultSummary>> {
        let (session, clock) = match mem::replace(&mut self.state, Lifecycle::Submitting) {
            Lifecycle::Active { session, clock } => (session, clock),
            other => {
                self.state = other;
                return match trigger {
                    SubmitTrigger::ClockExpiry => {
                        log::debug!(
                            "Discarding expiry-triggered submit in state {:?}",
                            self.lifecycle()
                        );
                        Ok(None)
                    }
                    SubmitTrigger::Manual => Err(self.invalid_state("submit")),
                };
            }
        };

        let payload = SubmissionService::format_answers(session.questions(), session.answers());
        let quiz_id = session.quiz_id().to_string();

        match self.api.submit_answers(&quiz_id, payload).await {
            Ok(result) => {
                log::info!(
                    "Quiz '{}' submitted ({:?}): {} points",
                    quiz_id,
                    trigger,
                    result.obtained_points
                );
                // Session and clock drop here; the ticker task is aborted
                self.state = Lifecycle::Submitted {
                    result: result.clone(),
                };
                Ok(Some(result))
            }
            Err(e) => {
                log::warn!("Submission of quiz '{}' failed: {}", quiz_id, e);
                self.state = Lifecycle::Active { session, clock };
                Err(e)
            }
        }
    }

    /// Stop the active session without grading. A failed stop rolls back to
    /// `Active`; the session stays usable and may still be submitted.
    pub async fn stop(&mut self) -> AppResult<()> {
        let (session, clock) = match mem::replace(&mut self.state, Lifecycle::Stopping) {
            Lifecycle::Active { session, clock } => (session, clock),
            other => {
                self.state = other;
                return Err(self.invalid_state("stop"));
            }
        };

        let quiz_id = session.quiz_id().to_string();
        match self.api.stop_quiz(&quiz_id).await {
            Ok(()) => {
                log::info!("Quiz '{}' stopped", quiz_id);
                self.state = Lifecycle::Stopped;
                Ok(())
            }
            Err(e) => {
                log::warn!("Stop of quiz '{}' failed: {}", quiz_id, e);
                self.state = Lifecycle::Active { session, clock };
                Err(e)
            }
        }
    }

    fn activate(&mut self, quiz_id: &str, response: StartQuizResponse) -> AppResult<StartOutcome> {
        match Self::build_session(quiz_id, response) {
            Ok((session, clock)) => {
                log::info!(
                    "Session for quiz '{}' active with {} questions",
                    quiz_id,
                    session.questions().len()
                );
                self.state = Lifecycle::Active { session, clock };
                Ok(StartOutcome::Started)
            }
            Err(e) => {
                log::warn!("Session construction for quiz '{}' failed: {}", quiz_id, e);
                self.state = Lifecycle::Idle;
                Err(e)
            }
        }
    }

    fn build_session(
        quiz_id: &str,
        response: StartQuizResponse,
    ) -> AppResult<(Session, SessionClock)> {
        let questions: Vec<Question> = response
            .questions_without_correct_answers
            .into_iter()
            .map(Question::try_from)
            .collect::<AppResult<_>>()?;

        let time_limit_minutes = response.time_limit_minutes;
        let session = Session::new(quiz_id, questions, time_limit_minutes)?;
        let clock =
            SessionClock::start(time_limit_minutes.map(|m| Duration::from_secs(m * 60)));

        Ok((session, clock))
    }

    fn active_session_mut(&mut self, operation: &str) -> AppResult<&mut Session> {
        let tag = self.state.tag();
        match &mut self.state {
            Lifecycle::Active { session, .. } => Ok(session),
            _ => Err(AppError::InvalidState(format!(
                "Cannot {} in state {:?}",
                operation, tag
            ))),
        }
    }

    fn invalid_state(&self, operation: &str) -> AppError {
        AppError::InvalidState(format!(
            "Cannot {} in state {:?}",
            operation,
            self.lifecycle()
        ))
    }
}
