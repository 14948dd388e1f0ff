use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::brain::sentiment::{Mood, SentimentLabel, SentimentResult};

/// A free-text journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Monotonic identifier within the session's journal collection.
    pub id: u64,
    /// The trimmed text the user wrote.
    pub content: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
}

/// A submitted Likert questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireEntry {
    /// Monotonic identifier within the session's questionnaire collection.
    pub id: u64,
    /// The answers exactly as submitted.
    pub answers: Vec<Value>,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
    /// Client-side submission time, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

/// Which collection an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Journal,
    Questionnaire,
}

/// Borrowed view over either kind of entry, used by the aggregators.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a> {
    pub entry_type: EntryType,
    pub id: u64,
    /// Text content; `None` for questionnaires.
    pub content: Option<&'a str>,
    pub sentiment_score: f64,
    pub mood: Mood,
    pub created_at: DateTime<Utc>,
}

/// A single wellness suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub icon: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: icon.into(),
        }
    }
}

/// Record of the analysis and suggestions produced for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInteraction {
    pub timestamp: DateTime<Utc>,
    pub entry_id: u64,
    pub entry_type: EntryType,
    pub sentiment_data: SentimentResult,
    pub suggestions: Vec<Suggestion>,
}

/// Rolling 7-day wellness summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessMetrics {
    /// 1..=5
    pub wellness_score: u8,
    /// 0..=100
    pub mood_trend: u8,
    /// Count of every entry in the session, both kinds.
    pub total_entries: usize,
    /// Mean sentiment score of the trailing week, in [0, 1].
    pub weekly_average: f64,
}

impl Default for WellnessMetrics {
    fn default() -> Self {
        Self {
            wellness_score: 3,
            mood_trend: 50,
            total_entries: 0,
            weekly_average: 0.5,
        }
    }
}

/// One user's journaling history, persisted as a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub journals: Vec<JournalEntry>,
    #[serde(default)]
    pub questionnaires: Vec<QuestionnaireEntry>,
    #[serde(default)]
    pub ai_interactions: Vec<AiInteraction>,
    #[serde(default)]
    pub wellness_metrics: WellnessMetrics,
}

pub const DEFAULT_USER_ID: &str = "default_user";

impl Session {
    /// Fresh, empty session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: DEFAULT_USER_ID.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            journals: Vec::new(),
            questionnaires: Vec::new(),
            ai_interactions: Vec::new(),
            wellness_metrics: WellnessMetrics::default(),
        }
    }

    pub fn total_entries(&self) -> usize {
        self.journals.len() + self.questionnaires.len()
    }

    pub fn next_journal_id(&self) -> u64 {
        self.journals.len() as u64 + 1
    }

    pub fn next_questionnaire_id(&self) -> u64 {
        self.questionnaires.len() as u64 + 1
    }

    /// Every entry of both kinds, oldest first.
    pub fn entries(&self) -> Vec<EntryRef<'_>> {
        let journals = self.journals.iter().map(|j| EntryRef {
            entry_type: EntryType::Journal,
            id: j.id,
            content: Some(j.content.as_str()),
            sentiment_score: j.sentiment_score,
            mood: j.mood,
            created_at: j.created_at,
        });
        let questionnaires = self.questionnaires.iter().map(|q| EntryRef {
            entry_type: EntryType::Questionnaire,
            id: q.id,
            content: None,
            sentiment_score: q.sentiment_score,
            mood: q.mood,
            created_at: q.created_at,
        });

        let mut entries: Vec<EntryRef<'_>> = journals.chain(questionnaires).collect();
        // stable: equal timestamps keep journals before questionnaires
        entries.sort_by_key(|e| e.created_at);
        entries
    }

    /// The `n` most recent entries of both kinds, oldest first.
    pub fn recent_entries(&self, n: usize) -> Vec<EntryRef<'_>> {
        let entries = self.entries();
        let skip = entries.len().saturating_sub(n);
        entries.into_iter().skip(skip).collect()
    }
}

/// Free-text submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JournalRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Questionnaire submission; `answers` is validated as a non-empty array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireRequest {
    pub answers: Value,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Response payload for a journal submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalResponse {
    pub success: bool,
    pub session_id: String,
    pub journal_id: u64,
    pub sentiment_analysis: SentimentResult,
    pub ai_suggestions: Vec<Suggestion>,
    pub wellness_metrics: WellnessMetrics,
    pub message: String,
}

/// Response payload for a questionnaire submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub success: bool,
    pub session_id: String,
    pub questionnaire_id: u64,
    pub sentiment_analysis: SentimentResult,
    pub ai_suggestions: Vec<Suggestion>,
    pub wellness_metrics: WellnessMetrics,
    pub message: String,
}

/// Today's mood card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub session_id: String,
    pub mood: Mood,
    pub message: String,
    pub encouragement: String,
    pub has_entry_today: bool,
}

/// Latest suggestions card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsSnapshot {
    pub session_id: String,
    pub suggestions: Vec<Suggestion>,
    pub generated_at: DateTime<Utc>,
}

/// Wellness card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessSnapshot {
    pub session_id: String,
    pub wellness_data: WellnessMetrics,
    pub updated_at: DateTime<Utc>,
}

/// Page of journal entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalPage {
    pub session_id: String,
    pub journals: Vec<JournalEntry>,
    pub total: usize,
}

/// Summary row for session listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_entries: usize,
    pub user_id: String,
}

/// Service health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub storage: String,
    pub ai_provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn journal(id: u64, minutes_ago: i64, mood: Mood) -> JournalEntry {
        JournalEntry {
            id,
            content: format!("entry {}", id),
            sentiment_score: 0.5,
            sentiment_label: SentimentLabel::Neutral,
            mood,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn questionnaire(id: u64, minutes_ago: i64, mood: Mood) -> QuestionnaireEntry {
        QuestionnaireEntry {
            id,
            answers: vec![],
            sentiment_score: 0.5,
            sentiment_label: SentimentLabel::Neutral,
            mood,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            submitted_at: None,
        }
    }

    #[test]
    fn test_entries_are_merged_by_time() {
        let mut session = Session::new("s");
        session.journals.push(journal(1, 30, Mood::Sad));
        session.journals.push(journal(2, 10, Mood::Happy));
        session.questionnaires.push(questionnaire(1, 20, Mood::Calm));

        let kinds: Vec<(EntryType, u64)> = session
            .entries()
            .iter()
            .map(|e| (e.entry_type, e.id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (EntryType::Journal, 1),
                (EntryType::Questionnaire, 1),
                (EntryType::Journal, 2)
            ]
        );

        let recent = session.recent_entries(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].mood, Mood::Happy);
    }

    #[test]
    fn test_ids_are_per_collection() {
        let mut session = Session::new("s");
        session.journals.push(journal(1, 5, Mood::Calm));
        assert_eq!(session.next_journal_id(), 2);
        assert_eq!(session.next_questionnaire_id(), 1);
        assert_eq!(session.total_entries(), 1);
    }

    #[test]
    fn test_session_document_defaults() {
        let session: Session = serde_json::from_str(
            r#"{"session_id":"s1","user_id":"u","created_at":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(session.journals.is_empty());
        assert_eq!(session.wellness_metrics, WellnessMetrics::default());
    }

    #[test]
    fn test_journal_request_validation() {
        let request = JournalRequest {
            content: String::new(),
            user_id: None,
            session_id: None,
        };
        assert!(request.validate().is_err());
    }
}
