use crate::actors::analysis::RemoteAnalysisGateway;
use crate::actors::llm::OpenRouterClient;
use crate::actors::messages::{ActorError, AppError, Responder, SupervisorMessage};
use crate::actors::suggestions::SuggestionEngine;
use crate::actors::traits::LlmActor;
use crate::brain::likert::LikertClassifier;
use crate::brain::sentiment::Mood;
use crate::brain::suggestion_pool::starter_suggestions;
use crate::brain::wellness::calculate_wellness_metrics;
use crate::config::AppConfig;
use crate::database;
use crate::models::{
    AiInteraction, EntryType, HealthReport, JournalEntry, JournalPage, JournalRequest,
    JournalResponse, MoodSnapshot, QuestionnaireEntry, QuestionnaireRequest,
    QuestionnaireResponse, Session, SessionSummary, SuggestionsSnapshot, WellnessSnapshot,
};
use chrono::{Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, instrument, warn};
use validator::Validate;

/// Journal page size when the caller does not ask for one.
pub const DEFAULT_JOURNAL_LIMIT: usize = 10;

/// A handle to the `SupervisorActor`.
///
/// This is the primary entry point for all business logic. Every operation is a message
/// to a single actor task, which owns the database pool and the classifiers and handles
/// one message at a time. Replies are awaited without a deadline: the actor bounds each
/// remote call itself, and time spent queued behind other requests is not a failure.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Creates a supervisor that talks to the configured remote model, if any.
    pub fn new(config: &AppConfig, db_pool: SqlitePool) -> Self {
        let llm = config
            .remote
            .clone()
            .map(|remote| Arc::new(OpenRouterClient::new(remote)));
        Self::new_with_llm(config, db_pool, llm)
    }

    /// Creates a supervisor around any `LlmActor` implementation.
    ///
    /// # Arguments
    ///
    /// * `config` - Timeouts, questionnaire scoring and remote temperatures.
    /// * `db_pool` - The session store.
    /// * `llm` - The remote model; `None` keeps every path local.
    pub fn new_with_llm<L: LlmActor>(
        config: &AppConfig,
        db_pool: SqlitePool,
        llm: Option<Arc<L>>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = SupervisorRunner::new(receiver, config, db_pool, llm);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Responder<T>) -> SupervisorMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| ActorError::Unavailable(e.to_string()))?;
        recv.await.map_err(|e| ActorError::NoReply(e.to_string()))?
    }

    /// Analyzes, suggests for and stores a journal entry.
    ///
    /// Remote failures never surface here; only validation and storage errors do.
    #[instrument(skip(self, request))]
    pub async fn submit_journal(&self, request: JournalRequest) -> Result<JournalResponse, AppError> {
        self.request(|responder| SupervisorMessage::SubmitJournal {
            request,
            responder,
        })
        .await
    }

    /// Scores, suggests for and stores a questionnaire.
    #[instrument(skip(self, request))]
    pub async fn submit_questionnaire(
        &self,
        request: QuestionnaireRequest,
    ) -> Result<QuestionnaireResponse, AppError> {
        self.request(|responder| {
            SupervisorMessage::SubmitQuestionnaire { request, responder }
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn todays_mood(&self, session_id: Option<String>) -> Result<MoodSnapshot, AppError> {
        self.request(|responder| SupervisorMessage::TodaysMood {
            session_id,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn latest_suggestions(
        &self,
        session_id: Option<String>,
    ) -> Result<SuggestionsSnapshot, AppError> {
        self.request(|responder| SupervisorMessage::LatestSuggestions {
            session_id,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn wellness(&self, session_id: Option<String>) -> Result<WellnessSnapshot, AppError> {
        self.request(|responder| SupervisorMessage::Wellness {
            session_id,
            responder,
        })
        .await
    }

    /// Newest journals first, `DEFAULT_JOURNAL_LIMIT` when `limit` is `None`.
    #[instrument(skip(self))]
    pub async fn list_journals(
        &self,
        session_id: Option<String>,
        limit: Option<usize>,
    ) -> Result<JournalPage, AppError> {
        let limit = limit.unwrap_or(DEFAULT_JOURNAL_LIMIT);
        self.request(|responder| SupervisorMessage::ListJournals {
            session_id,
            limit,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>, AppError> {
        self.request(|responder| SupervisorMessage::ListSessions { responder })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_session(&self, session_id: String) -> Result<Session, AppError> {
        self.request(|responder| SupervisorMessage::GetSession {
            session_id,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthReport, AppError> {
        self.request(|responder| SupervisorMessage::Health { responder })
            .await
    }

    /// Stops the actor after the messages already queued.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(SupervisorMessage::Shutdown)
            .await
            .map_err(|e| ActorError::Unavailable(e.to_string()).into())
    }
}

/// Dashboard wording for a mood.
pub fn mood_message(mood: Mood) -> (&'static str, &'static str) {
    match mood {
        Mood::Happy => ("You're radiating positivity today!", "Keep spreading that joy!"),
        Mood::Calm => ("You seem peaceful and centered", "Your balance is inspiring!"),
        Mood::Sad => ("It seems like a tough day", "Tomorrow is a new beginning!"),
        Mood::Stressed => ("You seem overwhelmed today", "Take it one step at a time!"),
        Mood::Angry => (
            "Something really got to you today",
            "Your feelings are valid, let them cool down gently!",
        ),
        Mood::Tired => ("You seem worn out today", "Rest is productive too!"),
        Mood::Neutral => ("How are you feeling today?", "Your mood matters to us!"),
    }
}

fn reply<T>(responder: Responder<T>, result: Result<T, AppError>, operation: &str) {
    if let Err(e) = &result {
        error!("Error handling {}: {}", operation, e);
    }
    let _ = responder.send(result);
}

// --- Actor Runner ---
struct SupervisorRunner<L: LlmActor> {
    receiver: mpsc::Receiver<SupervisorMessage>,
    db_pool: SqlitePool,
    analysis: RemoteAnalysisGateway<L>,
    suggestions: SuggestionEngine<L>,
    likert: LikertClassifier,
    rng: StdRng,
    ai_provider: &'static str,
}

impl<L: LlmActor> SupervisorRunner<L> {
    fn new(
        receiver: mpsc::Receiver<SupervisorMessage>,
        config: &AppConfig,
        db_pool: SqlitePool,
        llm: Option<Arc<L>>,
    ) -> Self {
        let mut analysis = RemoteAnalysisGateway::new(llm.clone(), config.analysis_timeout);
        let mut suggestions = SuggestionEngine::new(llm.clone(), config.suggestion_timeout);
        if let Some(remote) = &config.remote {
            analysis = analysis.with_temperature(remote.analysis_temperature);
            suggestions = suggestions.with_temperature(remote.suggestion_temperature);
        }
        Self {
            receiver,
            db_pool,
            analysis,
            suggestions,
            likert: LikertClassifier::new(config.questionnaire.clone()),
            rng: StdRng::from_entropy(),
            ai_provider: if llm.is_some() {
                "Remote language model"
            } else {
                "Rule-based fallback"
            },
        }
    }

    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            if let SupervisorMessage::Shutdown = msg {
                info!("Supervisor shutting down...");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Supervisor stopped");
    }

    async fn handle_message(&mut self, msg: SupervisorMessage) {
        match msg {
            SupervisorMessage::SubmitJournal { request, responder } => {
                let result = self.handle_journal(request).await;
                reply(responder, result, "journal submission");
            }
            SupervisorMessage::SubmitQuestionnaire { request, responder } => {
                let result = self.handle_questionnaire(request).await;
                reply(responder, result, "questionnaire submission");
            }
            SupervisorMessage::TodaysMood { session_id, responder } => {
                let result = self.handle_todays_mood(session_id).await;
                reply(responder, result, "mood query");
            }
            SupervisorMessage::LatestSuggestions { session_id, responder } => {
                let result = self.handle_latest_suggestions(session_id).await;
                reply(responder, result, "suggestions query");
            }
            SupervisorMessage::Wellness { session_id, responder } => {
                let result = self.handle_wellness(session_id).await;
                reply(responder, result, "wellness query");
            }
            SupervisorMessage::ListJournals {
                session_id,
                limit,
                responder,
            } => {
                let result = self.handle_list_journals(session_id, limit).await;
                reply(responder, result, "journal listing");
            }
            SupervisorMessage::ListSessions { responder } => {
                let result = database::list_sessions(&self.db_pool).await;
                reply(responder, result, "session listing");
            }
            SupervisorMessage::GetSession { session_id, responder } => {
                let result = self.handle_get_session(session_id).await;
                reply(responder, result, "session lookup");
            }
            SupervisorMessage::Health { responder } => {
                let result = self.handle_health().await;
                reply(responder, result, "health check");
            }
            SupervisorMessage::Shutdown => {}
        }
    }

    async fn resolve_session_id(&self, session_id: Option<String>) -> Result<String, AppError> {
        match session_id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => database::current_session_id(&self.db_pool, Local::now().date_naive()).await,
        }
    }

    fn apply_user_id(session: &mut Session, user_id: Option<String>) {
        if let Some(user_id) = user_id.filter(|u| !u.trim().is_empty()) {
            session.user_id = user_id;
        }
    }

    #[instrument(skip(self, request))]
    async fn handle_journal(&mut self, request: JournalRequest) -> Result<JournalResponse, AppError> {
        let request = JournalRequest {
            content: request.content.trim().to_string(),
            ..request
        };
        request.validate()?;

        let session_id = self.resolve_session_id(request.session_id).await?;
        let mut session = database::load_session(&self.db_pool, &session_id).await?;
        Self::apply_user_id(&mut session, request.user_id);

        let sentiment = self.analysis.analyze(&request.content).await;
        let now = Utc::now();
        let journal_id = session.next_journal_id();
        session.journals.push(JournalEntry {
            id: journal_id,
            content: request.content.clone(),
            sentiment_score: sentiment.sentiment_score,
            sentiment_label: sentiment.sentiment_label,
            mood: sentiment.mood,
            created_at: now,
        });

        let suggestions = self
            .suggestions
            .suggest(
                &request.content,
                &sentiment,
                &session,
                Local::now().hour(),
                &mut self.rng,
            )
            .await;

        let wellness_metrics = calculate_wellness_metrics(&session, now);
        session.wellness_metrics = wellness_metrics;
        session.ai_interactions.push(AiInteraction {
            timestamp: now,
            entry_id: journal_id,
            entry_type: EntryType::Journal,
            sentiment_data: sentiment.clone(),
            suggestions: suggestions.clone(),
        });
        database::save_session(&self.db_pool, &mut session).await?;

        info!(
            "Journal {} saved in {}: mood={}, method={:?}",
            journal_id, session_id, sentiment.mood, sentiment.analysis_method
        );

        Ok(JournalResponse {
            success: true,
            session_id,
            journal_id,
            sentiment_analysis: sentiment,
            ai_suggestions: suggestions,
            wellness_metrics,
            message: "Journal entry saved successfully".to_string(),
        })
    }

    #[instrument(skip(self, request))]
    async fn handle_questionnaire(
        &mut self,
        request: QuestionnaireRequest,
    ) -> Result<QuestionnaireResponse, AppError> {
        let answers = match &request.answers {
            Value::Array(items) if !items.is_empty() => items.clone(),
            _ => {
                return Err(AppError::Validation(
                    "Answers must be a non-empty list".to_string(),
                ))
            }
        };

        let session_id = self.resolve_session_id(request.session_id).await?;
        let mut session = database::load_session(&self.db_pool, &session_id).await?;
        Self::apply_user_id(&mut session, request.user_id);

        let sentiment = self.likert.classify_json(&request.answers);
        let now = Utc::now();
        let questionnaire_id = session.next_questionnaire_id();
        session.questionnaires.push(QuestionnaireEntry {
            id: questionnaire_id,
            answers,
            sentiment_score: sentiment.sentiment_score,
            sentiment_label: sentiment.sentiment_label,
            mood: sentiment.mood,
            created_at: now,
            submitted_at: request.submitted_at,
        });

        let suggestions = self
            .suggestions
            .suggest("", &sentiment, &session, Local::now().hour(), &mut self.rng)
            .await;

        let wellness_metrics = calculate_wellness_metrics(&session, now);
        session.wellness_metrics = wellness_metrics;
        session.ai_interactions.push(AiInteraction {
            timestamp: now,
            entry_id: questionnaire_id,
            entry_type: EntryType::Questionnaire,
            sentiment_data: sentiment.clone(),
            suggestions: suggestions.clone(),
        });
        database::save_session(&self.db_pool, &mut session).await?;

        info!(
            "Questionnaire {} saved in {}: mood={}",
            questionnaire_id, session_id, sentiment.mood
        );

        Ok(QuestionnaireResponse {
            success: true,
            session_id,
            questionnaire_id,
            sentiment_analysis: sentiment,
            ai_suggestions: suggestions,
            wellness_metrics,
            message: "Questionnaire saved successfully".to_string(),
        })
    }

    async fn handle_todays_mood(&self, session_id: Option<String>) -> Result<MoodSnapshot, AppError> {
        let session_id = self.resolve_session_id(session_id).await?;
        let session = database::load_session(&self.db_pool, &session_id).await?;

        let today = Local::now().date_naive();
        let latest_today = session
            .entries()
            .into_iter()
            .filter(|e| e.created_at.with_timezone(&Local).date_naive() == today)
            .last();

        let mood = latest_today.map(|e| e.mood).unwrap_or(Mood::Neutral);
        let (message, encouragement) = mood_message(mood);

        Ok(MoodSnapshot {
            session_id,
            mood,
            message: message.to_string(),
            encouragement: encouragement.to_string(),
            has_entry_today: latest_today.is_some(),
        })
    }

    async fn handle_latest_suggestions(
        &self,
        session_id: Option<String>,
    ) -> Result<SuggestionsSnapshot, AppError> {
        let session_id = self.resolve_session_id(session_id).await?;
        let session = database::load_session(&self.db_pool, &session_id).await?;

        let (suggestions, generated_at) = match session
            .ai_interactions
            .iter()
            .max_by_key(|interaction| interaction.timestamp)
        {
            Some(latest) => (latest.suggestions.clone(), latest.timestamp),
            None => (starter_suggestions(), Utc::now()),
        };

        Ok(SuggestionsSnapshot {
            session_id,
            suggestions,
            generated_at,
        })
    }

    async fn handle_wellness(&self, session_id: Option<String>) -> Result<WellnessSnapshot, AppError> {
        let session_id = self.resolve_session_id(session_id).await?;
        let session = database::load_session(&self.db_pool, &session_id).await?;
        let now = Utc::now();

        Ok(WellnessSnapshot {
            session_id,
            wellness_data: calculate_wellness_metrics(&session, now),
            updated_at: now,
        })
    }

    async fn handle_list_journals(
        &self,
        session_id: Option<String>,
        limit: usize,
    ) -> Result<JournalPage, AppError> {
        let session_id = self.resolve_session_id(session_id).await?;
        let session = database::load_session(&self.db_pool, &session_id).await?;

        let total = session.journals.len();
        let mut journals = session.journals;
        journals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        journals.truncate(limit);

        Ok(JournalPage {
            session_id,
            journals,
            total,
        })
    }

    async fn handle_get_session(&self, session_id: String) -> Result<Session, AppError> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(AppError::Validation("Session id is required".to_string()));
        }
        database::load_session(&self.db_pool, session_id).await
    }

    async fn handle_health(&self) -> Result<HealthReport, AppError> {
        let (status, message) = match sqlx::query("SELECT 1").execute(&self.db_pool).await {
            Ok(_) => ("healthy", "Soul Link core is running"),
            Err(e) => {
                warn!("Session store unreachable: {}", e);
                ("degraded", "Session store is unreachable")
            }
        };
        Ok(HealthReport {
            status: status.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            storage: "SQLite session documents".to_string(),
            ai_provider: self.ai_provider.to_string(),
        })
    }
}
