use crate::actors::traits::{GenerationParams, LlmActor};
use crate::brain::analyzer::LexiconClassifier;
use crate::brain::lexicon::{LexiconScorer, PatternLexicon};
use crate::brain::sentiment::{
    score_from_polarity, AnalysisMethod, Intensity, Mood, SentimentLabel, SentimentResult,
};
use crate::config::DEFAULT_ANALYSIS_TIMEOUT;
use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert emotional intelligence psychologist. \
Always respond with valid JSON containing the exact fields requested. \
Be precise and insightful in emotional analysis.";

const ANALYSIS_MAX_TOKENS: u32 = 400;
const DEFAULT_CONFIDENCE: f64 = 0.8;

static OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

fn analysis_prompt(text: &str) -> String {
    format!(
        r#"Analyze the emotional sentiment of this journal entry and provide a detailed psychological assessment.

JOURNAL ENTRY: "{text}"

INSTRUCTIONS:
1. Identify the primary emotional state from these categories: happy, sad, angry, stressed, calm, tired
2. Rate sentiment on a scale from -1.0 (very negative) to +1.0 (very positive)
3. Rate emotional intensity: low, medium, high
4. Rate subjectivity from 0.0 (objective) to 1.0 (very subjective/emotional)
5. Identify specific emotional indicators found in the text
6. Provide confidence level in your analysis (0.0 to 1.0)

OUTPUT FORMAT (must be valid JSON):
{{
    "mood": "primary_emotional_state",
    "sentiment_score": 0.0,
    "polarity": 0.0,
    "subjectivity": 0.0,
    "intensity": "intensity_level",
    "sentiment_label": "positive/negative/neutral",
    "emotional_indicators": ["list", "of", "key", "words", "or", "phrases"],
    "confidence": 0.0,
    "reasoning": "brief explanation of analysis"
}}

Be precise and psychological in your analysis. Consider context, nuance, and underlying emotions."#
    )
}

/// Classifies free text with the remote model and falls back to the local
/// lexicon classifier whenever the remote path cannot produce a valid result.
pub struct RemoteAnalysisGateway<L: LlmActor, S: LexiconScorer = PatternLexicon> {
    llm: Option<Arc<L>>,
    fallback: LexiconClassifier<S>,
    timeout: Duration,
    temperature: f32,
}

impl<L: LlmActor> RemoteAnalysisGateway<L> {
    pub fn new(llm: Option<Arc<L>>, timeout: Duration) -> Self {
        Self {
            llm,
            fallback: LexiconClassifier::new(),
            timeout,
            temperature: 0.3,
        }
    }
}

impl<L: LlmActor, S: LexiconScorer> RemoteAnalysisGateway<L, S> {
    /// Replaces the local classifier used when the remote path fails.
    pub fn with_fallback<T: LexiconScorer>(
        self,
        fallback: LexiconClassifier<T>,
    ) -> RemoteAnalysisGateway<L, T> {
        RemoteAnalysisGateway {
            llm: self.llm,
            fallback,
            timeout: self.timeout,
            temperature: self.temperature,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Never fails: every remote problem resolves to the lexicon result.
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        let Some(llm) = &self.llm else {
            debug!("No remote model configured, using lexicon classifier");
            return self.fallback.analyze(text);
        };

        match self.analyze_remote(llm, text).await {
            Ok(result) => {
                info!("Remote analysis succeeded: mood={}", result.mood);
                result
            }
            Err(e) => {
                warn!("Remote analysis failed, using lexicon classifier: {}", e);
                self.fallback.analyze(text)
            }
        }
    }

    async fn analyze_remote(&self, llm: &Arc<L>, text: &str) -> Result<SentimentResult, AppError> {
        let params = GenerationParams {
            system_prompt: Some(ANALYSIS_SYSTEM_PROMPT.to_string()),
            temperature: Some(self.temperature),
            max_tokens: Some(ANALYSIS_MAX_TOKENS),
        };
        let reply = timeout(
            self.timeout,
            llm.generate_with_params(analysis_prompt(text), params),
        )
        .await??;
        parse_remote_analysis(&reply)
    }
}

impl<L: LlmActor> Default for RemoteAnalysisGateway<L> {
    fn default() -> Self {
        Self::new(None, DEFAULT_ANALYSIS_TIMEOUT)
    }
}

fn required<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Value, AppError> {
    map.get(key)
        .ok_or_else(|| AppError::Remote(format!("Missing required field '{}'", key)))
}

/// Accepts JSON numbers and numeric strings.
fn number(map: &Map<String, Value>, key: &str) -> Result<f64, AppError> {
    let value = required(map, key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::Remote(format!("Field '{}' is not a number: {}", key, value)))
}

fn vocabulary<T>(
    map: &Map<String, Value>,
    key: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, AppError> {
    let value = required(map, key)?;
    value
        .as_str()
        .and_then(parse)
        .ok_or_else(|| AppError::Remote(format!("Field '{}' has an unknown value: {}", key, value)))
}

fn reply_object(reply: &str) -> Result<Map<String, Value>, AppError> {
    let parsed = serde_json::from_str::<Value>(reply.trim()).or_else(|direct_err| {
        // models sometimes wrap the object in prose or code fences
        OBJECT_RE
            .find(reply)
            .ok_or(direct_err)
            .and_then(|m| serde_json::from_str::<Value>(m.as_str()))
    });
    match parsed {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::Remote(format!(
            "Expected a JSON object, got: {}",
            other
        ))),
        Err(e) => Err(AppError::Remote(format!("Unparsable analysis reply: {}", e))),
    }
}

/// Turns a model reply into a `SentimentResult`, rejecting anything incomplete.
pub fn parse_remote_analysis(reply: &str) -> Result<SentimentResult, AppError> {
    let map = reply_object(reply)?;

    // present but superseded by the polarity-derived score
    required(&map, "sentiment_score")?;

    let mood = vocabulary(&map, "mood", Mood::from_label)?;
    let sentiment_label = vocabulary(&map, "sentiment_label", SentimentLabel::from_label)?;
    let intensity = vocabulary(&map, "intensity", Intensity::from_label)?;
    let polarity = number(&map, "polarity")?.clamp(-1.0, 1.0);
    let subjectivity = number(&map, "subjectivity")?.clamp(0.0, 1.0);

    let confidence = number(&map, "confidence")
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_CONFIDENCE);
    let reasoning = map
        .get("reasoning")
        .and_then(Value::as_str)
        .map(str::to_string);
    let emotional_indicators = map
        .get("emotional_indicators")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(SentimentResult {
        sentiment_score: score_from_polarity(polarity),
        sentiment_label,
        mood,
        polarity: Some(polarity),
        subjectivity: Some(subjectivity),
        intensity,
        analysis_method: AnalysisMethod::Remote,
        confidence: Some(confidence),
        reasoning,
        emotional_indicators,
        keyword_matches: Vec::new(),
    })
}
