//! Brain Module Tests
//!
//! Cross-module properties of the classifiers, the suggestion fallbacks and
//! the wellness aggregator.

use crate::brain::suggestion_parser::{pad_suggestions, parse_suggestions};
use crate::brain::suggestion_pool::{
    candidate_pool, fallback_suggestions, starter_suggestions, SUGGESTION_COUNT,
};
use crate::brain::{
    calculate_wellness_metrics, AnalysisMethod, Intensity, LexiconClassifier, LikertClassifier,
    Mood, QuestionnaireConfig, SentimentLabel, SentimentResult,
};
use crate::models::{JournalEntry, QuestionnaireEntry, Session, Suggestion};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::collections::BTreeSet;

const SAMPLE_TEXTS: &[&str] = &[
    "I feel amazing today, so proud of myself",
    "Overwhelmed by the deadline pressure at work, so stressed",
    "Feeling lonely and sad tonight",
    "A calm and peaceful morning walk",
    "So furious, everything annoyed me today",
    "Completely exhausted, barely slept",
    "Went to the store and bought groceries",
    "not bad at all",
    "!!!",
];

#[cfg(test)]
mod lexicon_classifier_tests {
    use super::*;

    #[test]
    fn test_score_tracks_polarity() {
        let classifier = LexiconClassifier::new();

        for text in SAMPLE_TEXTS {
            let result = classifier.analyze(text);
            let polarity = result.polarity.expect("lexicon always reports polarity");

            assert!((-1.0..=1.0).contains(&polarity), "polarity out of range for '{}'", text);
            assert!(
                (0.0..=1.0).contains(&result.sentiment_score),
                "score out of range for '{}'",
                text
            );
            assert!(
                (result.sentiment_score - (polarity + 1.0) / 2.0).abs() < 1e-9,
                "score is not (p+1)/2 for '{}'",
                text
            );
            assert_eq!(result.sentiment_label, SentimentLabel::from_polarity(polarity));
            assert_eq!(result.analysis_method, AnalysisMethod::Lexicon);
        }
    }

    #[test]
    fn test_happy_entry() {
        let result = LexiconClassifier::new().analyze("I feel amazing today, so proud of myself");

        assert_eq!(result.mood, Mood::Happy);
        assert_eq!(result.sentiment_label, SentimentLabel::Positive);
        assert!(result.sentiment_score > 0.5);
    }

    #[test]
    fn test_stressed_entry() {
        let result = LexiconClassifier::new()
            .analyze("Overwhelmed by the deadline pressure at work, so stressed");

        assert_eq!(result.mood, Mood::Stressed);
        assert_eq!(result.sentiment_label, SentimentLabel::Negative);
    }

    #[test]
    fn test_deterministic() {
        let classifier = LexiconClassifier::new();
        for text in SAMPLE_TEXTS {
            assert_eq!(classifier.analyze(text), classifier.analyze(text));
        }
    }
}

#[cfg(test)]
mod likert_classifier_tests {
    use super::*;

    #[test]
    fn test_full_questionnaire_without_reversal() {
        let classifier = LikertClassifier::new(QuestionnaireConfig {
            reversed_items: BTreeSet::new(),
        });
        let answers = json!(vec!["Strongly Agree"; 14]);

        let result = classifier.classify_json(&answers);

        assert_eq!(result.sentiment_score, 1.0);
        assert_eq!(result.sentiment_label, SentimentLabel::Positive);
        assert_eq!(result.mood, Mood::Happy);
        assert_eq!(result.analysis_method, AnalysisMethod::QuestionnaireLikert);
    }

    #[test]
    fn test_default_questionnaire_reverses_negative_items() {
        // agreeing with every statement includes agreeing with the six negative ones
        let result = LikertClassifier::default().classify_json(&json!(vec!["Strongly Agree"; 14]));

        assert!((result.sentiment_score - 8.0 / 14.0).abs() < 1e-9);
        assert!(result.sentiment_score < 1.0);
    }

    #[test]
    fn test_numeric_and_label_answers_agree() {
        let classifier = LikertClassifier::new(QuestionnaireConfig {
            reversed_items: BTreeSet::new(),
        });

        let labels = classifier.classify_json(&json!(["agree", "Neutral", "disagree"]));
        let numbers = classifier.classify_json(&json!([4, 3, 2]));

        assert_eq!(labels.sentiment_score, numbers.sentiment_score);
        assert_eq!(labels.mood, numbers.mood);
    }

    #[test]
    fn test_unknown_answers_contribute_midpoint() {
        let classifier = LikertClassifier::new(QuestionnaireConfig {
            reversed_items: BTreeSet::new(),
        });

        let result = classifier.classify_json(&json!(["whatever", null, {"x": 1}]));

        assert_eq!(result.sentiment_score, 0.5);
        assert_eq!(result.intensity, Intensity::Low);
    }
}

#[cfg(test)]
mod suggestion_tests {
    use super::*;

    fn well_formed(suggestions: &[Suggestion]) {
        assert_eq!(suggestions.len(), SUGGESTION_COUNT);
        for suggestion in suggestions {
            assert!(!suggestion.text.trim().is_empty());
            assert!(!suggestion.icon.is_empty());
        }
        let unique: BTreeSet<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(unique.len(), suggestions.len(), "duplicate suggestion texts");
    }

    #[test]
    fn test_fallback_always_three_for_every_mood_and_hour() {
        let classifier = LexiconClassifier::new();
        let mut rng = StdRng::seed_from_u64(42);

        for text in SAMPLE_TEXTS {
            let sentiment = classifier.analyze(text);
            for hour in 0..24 {
                let chosen = fallback_suggestions(&sentiment, text, hour, &mut rng);
                well_formed(&chosen);

                let pool = candidate_pool(&sentiment, text, hour);
                assert!(chosen.iter().all(|s| pool.contains(s)));
            }
        }
    }

    #[test]
    fn test_questionnaire_results_get_suggestions() {
        let mut rng = StdRng::seed_from_u64(3);
        let sentiment = LikertClassifier::default().classify_json(&json!([1, 1, 5, 1]));

        well_formed(&fallback_suggestions(&sentiment, "", 9, &mut rng));
    }

    #[test]
    fn test_neutral_placeholder_gets_suggestions() {
        let mut rng = StdRng::seed_from_u64(5);
        let sentiment = SentimentResult::neutral(AnalysisMethod::Lexicon);

        well_formed(&fallback_suggestions(&sentiment, "", 23, &mut rng));
    }

    #[test]
    fn test_partial_remote_reply_padded() {
        let sentiment = LexiconClassifier::new().analyze("Feeling lonely and sad tonight");
        let parsed = parse_suggestions(r#"[{"text": "Text your sister tonight", "icon": "📱"}]"#)
            .expect("one valid item");

        let padded = pad_suggestions(parsed, candidate_pool(&sentiment, "", 20));

        well_formed(&padded);
        assert_eq!(padded[0].text, "Text your sister tonight");
    }

    #[test]
    fn test_starters_well_formed() {
        well_formed(&starter_suggestions());
    }
}

#[cfg(test)]
mod wellness_tests {
    use super::*;

    fn session_with(scores: &[(f64, DateTime<Utc>)]) -> Session {
        let mut session = Session::new("wellness");
        for (i, (score, created_at)) in scores.iter().enumerate() {
            if i % 2 == 0 {
                session.journals.push(JournalEntry {
                    id: session.next_journal_id(),
                    content: "entry".to_string(),
                    sentiment_score: *score,
                    sentiment_label: SentimentLabel::Neutral,
                    mood: Mood::Calm,
                    created_at: *created_at,
                });
            } else {
                session.questionnaires.push(QuestionnaireEntry {
                    id: session.next_questionnaire_id(),
                    answers: Vec::new(),
                    sentiment_score: *score,
                    sentiment_label: SentimentLabel::Neutral,
                    mood: Mood::Calm,
                    created_at: *created_at,
                    submitted_at: None,
                });
            }
        }
        session
    }

    #[test]
    fn test_both_entry_kinds_count() {
        let now = Utc::now();
        let session = session_with(&[(0.25, now), (0.75, now - Duration::hours(1))]);

        let metrics = calculate_wellness_metrics(&session, now);

        assert_eq!(metrics.total_entries, 2);
        assert_eq!(metrics.weekly_average, 0.5);
        assert_eq!(metrics.wellness_score, 3);
        assert_eq!(metrics.mood_trend, 50);
    }

    #[test]
    fn test_bounds_hold_at_the_extremes() {
        let now = Utc::now();

        let top = calculate_wellness_metrics(&session_with(&[(1.0, now)]), now);
        assert_eq!(top.wellness_score, 5);
        assert_eq!(top.mood_trend, 100);

        let bottom = calculate_wellness_metrics(&session_with(&[(0.0, now)]), now);
        assert_eq!(bottom.wellness_score, 1);
        assert_eq!(bottom.mood_trend, 0);
    }

    #[test]
    fn test_only_the_last_week_is_averaged() {
        let now = Utc::now();
        let session = session_with(&[
            (0.0, now - Duration::days(30)),
            (1.0, now - Duration::days(2)),
            (0.0, now - Duration::days(8)),
        ]);

        let metrics = calculate_wellness_metrics(&session, now);

        assert_eq!(metrics.total_entries, 3);
        assert_eq!(metrics.weekly_average, 1.0);
        assert_eq!(metrics.wellness_score, 5);
    }

    #[test]
    fn test_stale_history_keeps_defaults_but_counts() {
        let now = Utc::now();
        let session = session_with(&[(0.9, now - Duration::days(10))]);

        let metrics = calculate_wellness_metrics(&session, now);

        assert_eq!(metrics.total_entries, 1);
        assert_eq!(metrics.wellness_score, 3);
        assert_eq!(metrics.mood_trend, 50);
        assert_eq!(metrics.weekly_average, 0.5);
    }

    #[test]
    fn test_classifier_output_stays_in_range() {
        let now = Utc::now();
        let classifier = LexiconClassifier::new();
        let scores: Vec<(f64, DateTime<Utc>)> = SAMPLE_TEXTS
            .iter()
            .map(|text| (classifier.analyze(text).sentiment_score, now))
            .collect();

        let metrics = calculate_wellness_metrics(&session_with(&scores), now);

        assert!((1..=5).contains(&metrics.wellness_score));
        assert!(metrics.mood_trend <= 100);
        assert_eq!(metrics.total_entries, SAMPLE_TEXTS.len());
    }
}
