use crate::actors::traits::{GenerationParams, LlmActor};
use crate::brain::sentiment::{Mood, SentimentResult};
use crate::brain::suggestion_parser::{pad_suggestions, parse_suggestions};
use crate::brain::suggestion_pool::{candidate_pool, fallback_suggestions};
use crate::config::DEFAULT_SUGGESTION_TIMEOUT;
use crate::error::AppError;
use crate::models::{Session, Suggestion};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const SUGGESTION_SYSTEM_PROMPT: &str = "You are an expert clinical psychologist. \
Your responses MUST be valid JSON only - absolutely no explanatory text, comments, or additional content. \
Return exactly 3 therapeutic suggestions as a JSON array. Each object must have 'text' and 'icon' fields. \
Focus on specific, actionable, evidence-based interventions tailored to the user's exact situation.";

const SUGGESTION_MAX_TOKENS: u32 = 600;
const TREND_WINDOW: usize = 5;
const SNIPPET_ENTRIES: usize = 2;
const SNIPPET_CHARS: usize = 100;
/// Tie-break order for the trend; other moods rank after these, by first appearance.
const TREND_PRIORITY: [Mood; 4] = [Mood::Happy, Mood::Calm, Mood::Sad, Mood::Stressed];

/// Most frequent mood among the latest entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTrend {
    pub mood: Mood,
    pub count: usize,
    pub window: usize,
}

/// Needs at least two entries; considers the five most recent of both kinds.
pub fn mood_trend(session: &Session) -> Option<MoodTrend> {
    let recent = session.recent_entries(TREND_WINDOW);
    if recent.len() < 2 {
        return None;
    }

    let mut counts: Vec<(Mood, usize)> = TREND_PRIORITY.iter().map(|m| (*m, 0)).collect();
    for entry in &recent {
        match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.mood, 1)),
        }
    }

    // first maximum wins
    let (mood, count) = counts
        .into_iter()
        .fold((Mood::Happy, 0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    Some(MoodTrend {
        mood,
        count,
        window: recent.len(),
    })
}

/// Content snippets of the most recent entries, oldest first.
pub fn recent_snippets(session: &Session) -> Vec<String> {
    session
        .recent_entries(SNIPPET_ENTRIES)
        .iter()
        .map(|entry| {
            let head: String = entry.content.unwrap_or("").chars().take(SNIPPET_CHARS).collect();
            format!("{}...", head)
        })
        .collect()
}

fn suggestion_prompt(content: &str, sentiment: &SentimentResult, session: &Session) -> String {
    let trend = match mood_trend(session) {
        Some(t) => format!(
            "Recent mood pattern: {} (appears {} times in last {} entries)",
            t.mood, t.count, t.window
        ),
        None => "Not enough history for trend analysis".to_string(),
    };
    let snippets = recent_snippets(session);
    let history = if snippets.is_empty() {
        "First-time user - establish baseline".to_string()
    } else {
        snippets
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let confidence = sentiment.confidence.unwrap_or(0.8);
    let reasoning = sentiment.reasoning.as_deref().unwrap_or("Basic sentiment analysis");

    format!(
        r#"You are a licensed clinical psychologist and wellness coach specialising in personalised, evidence-based interventions.

CURRENT JOURNAL ENTRY: "{content}"

PSYCHOLOGICAL PROFILE:
- Primary emotion: {mood} (confidence: {confidence:.1})
- Emotional intensity: {intensity}
- Sentiment score: {score:.2} (range: 0.0-1.0)
- Reasoning: {reasoning}

BEHAVIORAL PATTERNS:
- Mood progression: {trend}
- Historical context: {history}
- Total reflective sessions: {total}
- Emotional keywords detected: {keywords:?}

Create 3 highly personalized suggestions that address the specific situation mentioned, use evidence-based techniques and give concrete steps for today.

RESPOND WITH ONLY VALID JSON ARRAY - NO OTHER TEXT:
[
    {{"text": "your specific intervention here", "icon": "💭"}},
    {{"text": "your emotional regulation strategy here", "icon": "🧘"}},
    {{"text": "your resilience building strategy here", "icon": "🌱"}}
]"#,
        mood = sentiment.mood,
        intensity = sentiment.intensity.label(),
        score = sentiment.sentiment_score,
        total = session.total_entries(),
        keywords = sentiment.emotional_indicators,
    )
}

/// Produces exactly three suggestions for an entry.
pub struct SuggestionEngine<L: LlmActor> {
    llm: Option<Arc<L>>,
    timeout: Duration,
    temperature: f32,
}

impl<L: LlmActor> SuggestionEngine<L> {
    pub fn new(llm: Option<Arc<L>>, timeout: Duration) -> Self {
        Self {
            llm,
            timeout,
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// `session` already contains the entry being answered; `hour` is the local hour.
    pub async fn suggest<R: Rng + ?Sized>(
        &self,
        content: &str,
        sentiment: &SentimentResult,
        session: &Session,
        hour: u32,
        rng: &mut R,
    ) -> Vec<Suggestion> {
        let Some(llm) = &self.llm else {
            debug!("No remote model configured, using suggestion pool");
            return fallback_suggestions(sentiment, content, hour, rng);
        };

        match self.suggest_remote(llm, content, sentiment, session).await {
            Ok(valid) => {
                info!("Remote model produced {} valid suggestions", valid.len());
                let mut pool = candidate_pool(sentiment, content, hour);
                pool.shuffle(rng);
                pad_suggestions(valid, pool)
            }
            Err(e) => {
                warn!("Remote suggestions failed, using suggestion pool: {}", e);
                fallback_suggestions(sentiment, content, hour, rng)
            }
        }
    }

    async fn suggest_remote(
        &self,
        llm: &Arc<L>,
        content: &str,
        sentiment: &SentimentResult,
        session: &Session,
    ) -> Result<Vec<Suggestion>, AppError> {
        let params = GenerationParams {
            system_prompt: Some(SUGGESTION_SYSTEM_PROMPT.to_string()),
            temperature: Some(self.temperature),
            max_tokens: Some(SUGGESTION_MAX_TOKENS),
        };
        let prompt = suggestion_prompt(content, sentiment, session);
        let reply = timeout(self.timeout, llm.generate_with_params(prompt, params)).await??;
        parse_suggestions(&reply).ok_or_else(|| {
            AppError::Remote(format!(
                "No usable suggestions in reply: {}",
                reply.chars().take(200).collect::<String>()
            ))
        })
    }
}

impl<L: LlmActor> Default for SuggestionEngine<L> {
    fn default() -> Self {
        Self::new(None, DEFAULT_SUGGESTION_TIMEOUT)
    }
}
