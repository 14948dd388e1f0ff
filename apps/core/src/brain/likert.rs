//! Likert Classifier - questionnaire answers to a sentiment result.
//!
//! Answers are mapped onto 1..=5, normalized to [0, 1], reverse-scored at the
//! negatively-worded question positions, then averaged. The spread of the
//! normalized answers drives the intensity.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::sentiment::{AnalysisMethod, Intensity, Mood, SentimentLabel, SentimentResult};

/// Negatively-worded items of the daily questionnaire (zero-based):
/// anxious, lonely, stressed, negative thoughts, emotional control, bored
pub const DEFAULT_REVERSED_ITEMS: &[usize] = &[2, 4, 6, 9, 11, 13];

/// Value used for unrecognized answers
const NEUTRAL_ANSWER: u8 = 3;

/// Questionnaire structure the classifier scores against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireConfig {
    /// Zero-based positions whose scale is inverted
    pub reversed_items: BTreeSet<usize>,
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            reversed_items: DEFAULT_REVERSED_ITEMS.iter().copied().collect(),
        }
    }
}

/// Converts Likert-scale answer lists into sentiment results
#[derive(Debug, Clone, Default)]
pub struct LikertClassifier {
    config: QuestionnaireConfig,
}

/// Maps an answer label onto 1..=5; unknown labels are neutral
pub fn answer_value(answer: &str) -> u8 {
    match answer.trim().to_lowercase().as_str() {
        "strongly disagree" => 1,
        "disagree" => 2,
        "neutral" => 3,
        "agree" => 4,
        "strongly agree" => 5,
        _ => NEUTRAL_ANSWER,
    }
}

fn json_answer_value(answer: &Value) -> u8 {
    match answer {
        Value::String(label) => answer_value(label),
        Value::Number(n) => match n.as_u64() {
            Some(v @ 1..=5) => v as u8,
            _ => NEUTRAL_ANSWER,
        },
        _ => NEUTRAL_ANSWER,
    }
}

impl LikertClassifier {
    pub fn new(config: QuestionnaireConfig) -> Self {
        Self { config }
    }

    /// Classify a list of answer labels
    pub fn classify<S: AsRef<str>>(&self, answers: &[S]) -> SentimentResult {
        let values: Vec<u8> = answers.iter().map(|a| answer_value(a.as_ref())).collect();
        self.classify_values(&values)
    }

    /// Classify raw JSON input; anything but a non-empty array is neutral
    pub fn classify_json(&self, answers: &Value) -> SentimentResult {
        match answers {
            Value::Array(items) => {
                let values: Vec<u8> = items.iter().map(json_answer_value).collect();
                self.classify_values(&values)
            }
            _ => SentimentResult::neutral(AnalysisMethod::QuestionnaireLikert),
        }
    }

    fn classify_values(&self, values: &[u8]) -> SentimentResult {
        if values.is_empty() {
            return SentimentResult::neutral(AnalysisMethod::QuestionnaireLikert);
        }

        let normalized: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let norm = (f64::from(v) - 1.0) / 4.0;
                if self.config.reversed_items.contains(&i) {
                    1.0 - norm
                } else {
                    norm
                }
            })
            .collect();

        let count = normalized.len() as f64;
        let avg = normalized.iter().sum::<f64>() / count;
        let variance = normalized.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / count;
        let stddev = variance.sqrt();

        let (sentiment_label, mood) = if avg >= 0.66 {
            (SentimentLabel::Positive, Mood::Happy)
        } else if avg >= 0.45 {
            (SentimentLabel::Neutral, Mood::Calm)
        } else if avg >= 0.25 {
            (SentimentLabel::Negative, Mood::Sad)
        } else {
            (SentimentLabel::Negative, Mood::Stressed)
        };

        let deviation = (avg - 0.5).abs();
        let intensity = if stddev > 0.28 || deviation > 0.3 {
            Intensity::High
        } else if stddev > 0.12 || deviation > 0.15 {
            Intensity::Medium
        } else {
            Intensity::Low
        };

        SentimentResult {
            sentiment_score: avg,
            sentiment_label,
            mood,
            polarity: None,
            subjectivity: None,
            intensity,
            analysis_method: AnalysisMethod::QuestionnaireLikert,
            confidence: None,
            reasoning: None,
            emotional_indicators: Vec::new(),
            keyword_matches: Vec::new(),
        }
    }
}
