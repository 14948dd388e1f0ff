//! Sentiment Result - Output structure shared by every classifier.
//!
//! A `SentimentResult` is what the lexicon, questionnaire and remote
//! classifiers all produce, and what the suggestion engine and the wellness
//! aggregator consume.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical emotional state assigned to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Sad,
    Stressed,
    Angry,
    Tired,
    Neutral,
}

impl Mood {
    /// Returns the wire label for the mood
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
            Mood::Angry => "angry",
            Mood::Tired => "tired",
            Mood::Neutral => "neutral",
        }
    }

    /// Parses a mood label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "calm" => Some(Mood::Calm),
            "sad" => Some(Mood::Sad),
            "stressed" => Some(Mood::Stressed),
            "angry" => Some(Mood::Angry),
            "tired" => Some(Mood::Tired),
            "neutral" => Some(Mood::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse polarity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Buckets a polarity in [-1, 1] with a ±0.1 dead zone
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.1 {
            SentimentLabel::Positive
        } else if polarity < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Strength bucket for the detected mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(Intensity::Low),
            "medium" => Some(Intensity::Medium),
            "high" => Some(Intensity::High),
            _ => None,
        }
    }

    /// Lowercase wire label.
    pub fn label(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

/// Which classifier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    /// Keyword + lexicon polarity heuristic
    Lexicon,
    /// Likert-scale questionnaire scoring
    QuestionnaireLikert,
    /// External language model
    Remote,
}

/// Per-category score recorded by the lexicon classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub mood: Mood,
    pub score: f64,
}

/// Emotional state derived from a single entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Normalized score in [0, 1]; equals `(polarity + 1) / 2` when polarity is known
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub mood: Mood,
    /// Signed strength in [-1, 1]; absent for questionnaire results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjectivity: Option<f64>,
    pub intensity: Intensity,
    pub analysis_method: AnalysisMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emotional_indicators: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword_matches: Vec<KeywordMatch>,
}

impl SentimentResult {
    /// Neutral placeholder used when there is nothing to classify
    pub fn neutral(analysis_method: AnalysisMethod) -> Self {
        Self {
            sentiment_score: 0.5,
            sentiment_label: SentimentLabel::Neutral,
            mood: Mood::Neutral,
            polarity: None,
            subjectivity: None,
            intensity: Intensity::Low,
            analysis_method,
            confidence: None,
            reasoning: None,
            emotional_indicators: Vec::new(),
            keyword_matches: Vec::new(),
        }
    }

    /// Polarity if known, otherwise derived back from the normalized score
    pub fn effective_polarity(&self) -> f64 {
        self.polarity
            .unwrap_or(self.sentiment_score * 2.0 - 1.0)
    }
}

/// Maps a polarity in [-1, 1] onto [0, 1]
pub fn score_from_polarity(polarity: f64) -> f64 {
    (polarity + 1.0) / 2.0
}
