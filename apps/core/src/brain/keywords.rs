//! Emotion keyword rules.
//!
//! Each mood category owns a fixed keyword set and a polarity-derived bonus.
//! Rules are evaluated in declaration order; the first category holding the
//! maximum score wins ties.

use super::sentiment::{KeywordMatch, Mood};

/// One scoring rule: keyword hits plus a bonus when `applies(polarity)` holds
pub struct MoodRule {
    pub mood: Mood,
    pub keywords: &'static [&'static str],
    pub bonus: f64,
    pub applies: fn(f64) -> bool,
}

fn below_minus_0_2(p: f64) -> bool {
    p < -0.2
}

fn above_0_3(p: f64) -> bool {
    p > 0.3
}

fn below_minus_0_1(p: f64) -> bool {
    p < -0.1
}

fn near_zero(p: f64) -> bool {
    (-0.1..=0.1).contains(&p)
}

fn below_minus_0_3(p: f64) -> bool {
    p < -0.3
}

fn never(_: f64) -> bool {
    false
}

/// Fixed evaluation order: stressed, happy, sad, calm, angry, tired
pub const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        mood: Mood::Stressed,
        keywords: &[
            "stress", "overwhelm", "pressure", "anxiety", "panic", "deadline", "busy", "rush",
            "worry", "tense",
        ],
        bonus: 0.5,
        applies: below_minus_0_2,
    },
    MoodRule {
        mood: Mood::Happy,
        keywords: &[
            "happy", "joy", "excited", "great", "amazing", "wonderful", "love", "grateful",
            "blessed", "proud",
        ],
        bonus: 1.0,
        applies: above_0_3,
    },
    MoodRule {
        mood: Mood::Sad,
        keywords: &[
            "sad", "depressed", "down", "cry", "hurt", "pain", "lonely", "empty", "hopeless",
            "disappointed",
        ],
        bonus: 0.8,
        applies: below_minus_0_1,
    },
    MoodRule {
        mood: Mood::Calm,
        keywords: &[
            "calm", "peaceful", "relaxed", "quiet", "serene", "content", "balanced", "centered",
            "tranquil",
        ],
        bonus: 0.3,
        applies: near_zero,
    },
    MoodRule {
        mood: Mood::Angry,
        keywords: &[
            "angry", "mad", "furious", "irritated", "frustrated", "annoyed", "rage", "upset",
            "pissed",
        ],
        bonus: 0.7,
        applies: below_minus_0_3,
    },
    MoodRule {
        mood: Mood::Tired,
        keywords: &[
            "tired", "exhausted", "drained", "fatigue", "weary", "worn out", "sleepy",
            "burned out",
        ],
        bonus: 0.0,
        applies: never,
    },
];

impl MoodRule {
    /// Number of keywords contained (as substrings) in already lower-cased text
    pub fn hits(&self, text_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| text_lower.contains(*keyword))
            .count()
    }

    /// Keyword hits plus the polarity bonus
    pub fn score(&self, text_lower: &str, polarity: f64) -> f64 {
        let bonus = if (self.applies)(polarity) {
            self.bonus
        } else {
            0.0
        };
        self.hits(text_lower) as f64 + bonus
    }
}

/// Scores every category of `MOOD_RULES` in order
pub fn score_moods(text: &str, polarity: f64) -> Vec<KeywordMatch> {
    let text_lower = text.to_lowercase();
    MOOD_RULES
        .iter()
        .map(|rule| KeywordMatch {
            mood: rule.mood,
            score: rule.score(&text_lower, polarity),
        })
        .collect()
}

/// First category holding the maximum score; `None` when every score is zero
pub fn dominant_mood(scores: &[KeywordMatch]) -> Option<&KeywordMatch> {
    let mut best: Option<&KeywordMatch> = None;
    for candidate in scores {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best.filter(|m| m.score > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order_is_fixed() {
        let order: Vec<Mood> = MOOD_RULES.iter().map(|r| r.mood).collect();
        assert_eq!(
            order,
            vec![
                Mood::Stressed,
                Mood::Happy,
                Mood::Sad,
                Mood::Calm,
                Mood::Angry,
                Mood::Tired
            ]
        );
    }

    #[test]
    fn test_multiword_keywords() {
        let scores = score_moods("Completely worn out and burned out", 0.0);
        let tired = scores.iter().find(|m| m.mood == Mood::Tired).unwrap();
        assert_eq!(tired.score, 2.0);
    }

    #[test]
    fn test_polarity_bonuses() {
        let scores = score_moods("nothing special", -0.35);
        let by_mood = |mood: Mood| scores.iter().find(|m| m.mood == mood).unwrap().score;

        assert_eq!(by_mood(Mood::Stressed), 0.5);
        assert_eq!(by_mood(Mood::Happy), 0.0);
        assert_eq!(by_mood(Mood::Sad), 0.8);
        assert_eq!(by_mood(Mood::Calm), 0.0);
        assert_eq!(by_mood(Mood::Angry), 0.7);
        assert_eq!(by_mood(Mood::Tired), 0.0);
    }

    #[test]
    fn test_calm_bonus_is_inclusive() {
        assert!((MOOD_RULES[3].applies)(0.1));
        assert!((MOOD_RULES[3].applies)(-0.1));
        assert!(!(MOOD_RULES[3].applies)(0.11));
    }

    #[test]
    fn test_tie_goes_to_first_rule() {
        // one stress keyword, one happy keyword, neutral polarity
        let scores = score_moods("busy but happy", 0.2);
        assert_eq!(dominant_mood(&scores).unwrap().mood, Mood::Stressed);
    }

    #[test]
    fn test_all_zero_has_no_dominant() {
        let scores = score_moods("the train was on time", 0.2);
        assert!(dominant_mood(&scores).is_none());
    }
}
