//! Lexicon Classifier - local, deterministic mood inference for free text.
//!
//! Combines two signals:
//! 1. Lexicon polarity/subjectivity of the whole text
//! 2. Emotion keyword hits per mood category (see `keywords`)
//!
//! Used directly when no remote model is configured, and as the fallback of
//! the remote analysis gateway.

use super::keywords::{dominant_mood, score_moods};
use super::lexicon::{LexiconScorer, PatternLexicon};
use super::sentiment::{
    score_from_polarity, AnalysisMethod, Intensity, Mood, SentimentLabel, SentimentResult,
};

/// Keyword/polarity based classifier
pub struct LexiconClassifier<S: LexiconScorer = PatternLexicon> {
    scorer: S,
}

impl Default for LexiconClassifier<PatternLexicon> {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier<PatternLexicon> {
    /// Create a classifier backed by the built-in word table
    pub fn new() -> Self {
        Self {
            scorer: PatternLexicon::new(),
        }
    }
}

impl<S: LexiconScorer> LexiconClassifier<S> {
    /// Create a classifier with a custom lexicon scorer
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// Mood from polarity alone, used when no category scored
    fn mood_from_polarity(polarity: f64) -> Mood {
        if polarity > 0.2 {
            Mood::Happy
        } else if polarity > -0.1 {
            Mood::Calm
        } else if polarity > -0.5 {
            Mood::Sad
        } else {
            Mood::Stressed
        }
    }

    fn intensity(max_score: f64, subjectivity: f64) -> Intensity {
        if max_score >= 3.0 || subjectivity > 0.8 {
            Intensity::High
        } else if max_score >= 1.0 || subjectivity > 0.5 {
            Intensity::Medium
        } else {
            Intensity::Low
        }
    }

    /// Classify non-empty text. Callers reject empty content beforehand.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lexicon = self.scorer.score(text);
        let polarity = lexicon.polarity.clamp(-1.0, 1.0);
        let subjectivity = lexicon.subjectivity.clamp(0.0, 1.0);

        let scores = score_moods(text, polarity);
        let (mood, max_score) = match dominant_mood(&scores) {
            Some(best) => (best.mood, best.score),
            None => (Self::mood_from_polarity(polarity), 0.0),
        };

        SentimentResult {
            sentiment_score: score_from_polarity(polarity),
            sentiment_label: SentimentLabel::from_polarity(polarity),
            mood,
            polarity: Some(polarity),
            subjectivity: Some(subjectivity),
            intensity: Self::intensity(max_score, subjectivity),
            analysis_method: AnalysisMethod::Lexicon,
            confidence: None,
            reasoning: None,
            emotional_indicators: Vec::new(),
            keyword_matches: scores.into_iter().filter(|m| m.score > 0.0).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::lexicon::LexiconScore;

    struct FixedScorer(LexiconScore);

    impl LexiconScorer for FixedScorer {
        fn score(&self, _text: &str) -> LexiconScore {
            self.0
        }
    }

    fn classifier(polarity: f64, subjectivity: f64) -> LexiconClassifier<FixedScorer> {
        LexiconClassifier::with_scorer(FixedScorer(LexiconScore {
            polarity,
            subjectivity,
        }))
    }

    #[test]
    fn test_happy_entry() {
        let result = LexiconClassifier::new().analyze("I feel amazing today, so proud of myself");

        assert_eq!(result.mood, Mood::Happy);
        assert_eq!(result.sentiment_label, SentimentLabel::Positive);
        assert_eq!(result.analysis_method, AnalysisMethod::Lexicon);
        assert_eq!(result.intensity, Intensity::High);
    }

    #[test]
    fn test_score_matches_polarity() {
        let result = classifier(-0.4, 0.2).analyze("whatever");
        assert!((result.sentiment_score - 0.3).abs() < 1e-9);
        assert_eq!(result.polarity, Some(-0.4));
    }

    #[test]
    fn test_polarity_fallback_moods() {
        assert_eq!(classifier(0.25, 0.0).analyze("the bus").mood, Mood::Happy);
        assert_eq!(classifier(0.2, 0.0).analyze("the bus").mood, Mood::Calm);
        // only the sad bonus applies at -0.15
        assert_eq!(classifier(-0.15, 0.0).analyze("the bus").mood, Mood::Sad);
    }

    #[test]
    fn test_bonus_only_mood() {
        // sad bonus (0.8) beats stressed (0.5) and angry (0.7)
        let result = classifier(-0.6, 0.0).analyze("the bus");
        assert_eq!(result.mood, Mood::Sad);
        assert_eq!(result.intensity, Intensity::Low);
    }

    #[test]
    fn test_keyword_beats_polarity() {
        let result = classifier(0.0, 0.3).analyze("So exhausted and drained after the trip");
        assert_eq!(result.mood, Mood::Tired);
        assert_eq!(result.intensity, Intensity::Medium);
        assert_eq!(result.keyword_matches.len(), 2);
    }

    #[test]
    fn test_high_intensity_from_keyword_count() {
        let result = classifier(0.0, 0.0)
            .analyze("deadline pressure, so much stress and worry");
        assert_eq!(result.mood, Mood::Stressed);
        assert_eq!(result.intensity, Intensity::High);
    }

    #[test]
    fn test_high_intensity_from_subjectivity() {
        let result = classifier(0.0, 0.9).analyze("the bus");
        assert_eq!(result.intensity, Intensity::High);
        assert_eq!(result.mood, Mood::Calm);
    }

    #[test]
    fn test_out_of_range_scorer_is_clamped() {
        let result = classifier(3.0, 2.0).analyze("the bus");
        assert_eq!(result.polarity, Some(1.0));
        assert_eq!(result.sentiment_score, 1.0);
        assert_eq!(result.subjectivity, Some(1.0));
    }
}
