use serde::Serialize;
use tokio::sync::oneshot;

use crate::models::{
    HealthReport, JournalPage, JournalRequest, JournalResponse, MoodSnapshot, QuestionnaireRequest,
    QuestionnaireResponse, Session, SessionSummary, SuggestionsSnapshot, WellnessSnapshot,
};

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The supervisor task is gone and can no longer accept messages.
    #[error("Supervisor is not running: {0}")]
    Unavailable(String),
    /// The supervisor dropped a request without answering it.
    #[error("Supervisor dropped the request: {0}")]
    NoReply(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

pub type Responder<T> = oneshot::Sender<Result<T, AppError>>;

/// Messages that can be sent to the `SupervisorActor`.
///
/// Every variant that touches a session is handled to completion before the
/// next message is read, so load, mutate and save never interleave.
#[derive(Debug)]
#[allow(clippy::large_enum_variant)]
pub enum SupervisorMessage {
    /// Analyze, suggest and persist a journal entry.
    SubmitJournal {
        request: JournalRequest,
        responder: Responder<JournalResponse>,
    },
    /// Score, suggest and persist a questionnaire.
    SubmitQuestionnaire {
        request: QuestionnaireRequest,
        responder: Responder<QuestionnaireResponse>,
    },
    TodaysMood {
        session_id: Option<String>,
        responder: Responder<MoodSnapshot>,
    },
    LatestSuggestions {
        session_id: Option<String>,
        responder: Responder<SuggestionsSnapshot>,
    },
    Wellness {
        session_id: Option<String>,
        responder: Responder<WellnessSnapshot>,
    },
    ListJournals {
        session_id: Option<String>,
        limit: usize,
        responder: Responder<JournalPage>,
    },
    ListSessions {
        responder: Responder<Vec<SessionSummary>>,
    },
    GetSession {
        session_id: String,
        responder: Responder<Session>,
    },
    Health {
        responder: Responder<HealthReport>,
    },
    /// A command to stop the supervisor loop.
    Shutdown,
}
