//! Lexicon polarity scoring.
//!
//! Word-table sentiment in the style of pattern-based analyzers: every known
//! word carries a polarity in [-1, 1] and a subjectivity in [0, 1]. The text
//! score is the mean over matched words, after applying a preceding
//! intensifier ("very happy") and a nearby negation ("not happy").

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Polarity/subjectivity pair for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexiconScore {
    /// Signed sentiment strength in [-1, 1]
    pub polarity: f64,
    /// 0.0 = objective, 1.0 = fully subjective
    pub subjectivity: f64,
}

impl LexiconScore {
    pub const NEUTRAL: LexiconScore = LexiconScore {
        polarity: 0.0,
        subjectivity: 0.0,
    };
}

/// Opaque text scorer used as one signal inside the lexicon classifier.
pub trait LexiconScorer: Send + Sync {
    fn score(&self, text: &str) -> LexiconScore;
}

/// (word, polarity, subjectivity)
const WORD_TABLE: &[(&str, f64, f64)] = &[
    // positive
    ("happy", 0.8, 1.0),
    ("joy", 0.8, 0.9),
    ("joyful", 0.8, 0.9),
    ("excited", 0.4, 0.75),
    ("great", 0.8, 0.75),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("grateful", 0.6, 0.8),
    ("thankful", 0.6, 0.8),
    ("blessed", 0.5, 0.75),
    ("proud", 0.8, 1.0),
    ("good", 0.7, 0.6),
    ("nice", 0.6, 1.0),
    ("fine", 0.4, 0.5),
    ("better", 0.5, 0.5),
    ("best", 1.0, 0.3),
    ("awesome", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("excellent", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("glad", 0.5, 1.0),
    ("fun", 0.3, 0.2),
    ("hopeful", 0.5, 0.7),
    ("optimistic", 0.6, 0.7),
    ("motivated", 0.5, 0.6),
    ("energetic", 0.5, 0.6),
    ("accomplished", 0.6, 0.7),
    ("calm", 0.3, 0.75),
    ("peaceful", 0.4, 0.7),
    ("relaxed", 0.4, 0.7),
    ("serene", 0.5, 0.7),
    ("content", 0.3, 0.6),
    ("balanced", 0.2, 0.5),
    ("centered", 0.2, 0.5),
    ("tranquil", 0.4, 0.7),
    ("quiet", 0.1, 0.3),
    ("productive", 0.5, 0.6),
    ("enjoyed", 0.5, 0.7),
    ("connected", 0.3, 0.5),
    // negative
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("depressed", -0.7, 0.9),
    ("down", -0.16, 0.29),
    ("hurt", -0.4, 0.6),
    ("pain", -0.5, 0.6),
    ("painful", -0.7, 0.9),
    ("lonely", -0.5, 1.0),
    ("isolated", -0.4, 0.6),
    ("empty", -0.1, 0.5),
    ("hopeless", -0.7, 0.9),
    ("disappointed", -0.75, 0.75),
    ("angry", -0.5, 1.0),
    ("mad", -0.6, 1.0),
    ("furious", -0.8, 1.0),
    ("irritated", -0.5, 0.8),
    ("frustrated", -0.7, 0.8),
    ("annoyed", -0.4, 0.8),
    ("upset", -0.5, 0.8),
    ("hate", -0.8, 0.9),
    ("stressed", -0.5, 0.8),
    ("stressful", -0.6, 0.8),
    ("overwhelmed", -0.6, 0.8),
    ("anxious", -0.5, 0.9),
    ("worried", -0.5, 0.8),
    ("nervous", -0.4, 0.8),
    ("tense", -0.3, 0.6),
    ("panic", -0.6, 0.8),
    ("tired", -0.4, 0.7),
    ("exhausted", -0.6, 0.8),
    ("drained", -0.5, 0.7),
    ("weary", -0.4, 0.7),
    ("sleepy", -0.1, 0.5),
    ("bored", -0.5, 0.8),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("miserable", -1.0, 1.0),
    ("scared", -0.5, 0.8),
    ("afraid", -0.6, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.29, 0.54),
    ("tough", -0.39, 0.67),
    ("negative", -0.3, 0.4),
];

/// Multipliers applied to the next sentiment word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("so", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.4),
    ("too", 1.2),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("bit", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "don't", "dont", "didn't", "didnt", "doesn't", "isn't",
    "wasn't", "aren't", "can't", "cannot", "won't", "couldn't", "hardly",
];

/// How far back (in tokens) a negation still flips a sentiment word
const NEGATION_WINDOW: usize = 3;

/// Polarity factor for negated words
const NEGATION_FACTOR: f64 = -0.5;

static WORDS: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    WORD_TABLE
        .iter()
        .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
        .collect()
});

/// Built-in word-table scorer
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternLexicon;

impl PatternLexicon {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .replace('\u{2019}', "'")
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|token| token.trim_matches('\''))
            .filter(|token| !token.is_empty())
            .map(|token| token.to_string())
            .collect()
    }

    fn intensifier(token: &str) -> Option<f64> {
        INTENSIFIERS
            .iter()
            .find(|(word, _)| *word == token)
            .map(|(_, factor)| *factor)
    }
}

impl LexiconScorer for PatternLexicon {
    fn score(&self, text: &str) -> LexiconScore {
        let tokens = Self::tokenize(text);

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = WORDS.get(token.as_str()) else {
                continue;
            };

            if let Some(factor) = i
                .checked_sub(1)
                .and_then(|prev| Self::intensifier(&tokens[prev]))
            {
                polarity *= factor;
                subjectivity *= factor;
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i]
                .iter()
                .any(|t| NEGATIONS.contains(&t.as_str()))
            {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            return LexiconScore::NEUTRAL;
        }

        LexiconScore {
            polarity: (polarity_sum / hits as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
        }
    }
}
