//! Suggestion Pool - rule-based suggestions used whenever the remote model
//! is unavailable, and to pad partial remote answers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::brain::sentiment::{Mood, SentimentResult};
use crate::models::Suggestion;

/// Number of suggestions returned for every entry
pub const SUGGESTION_COUNT: usize = 3;

type Item = (&'static str, &'static str);

const STRESSED_POOL: &[Item] = &[
    ("Try the 4-7-8 breathing technique: inhale 4, hold 7, exhale 8", "🌬️"),
    ("Take a 10-minute walk outside to clear your mind", "🚶"),
    ("Listen to calming nature sounds or meditation music", "🎵"),
    ("Write down 3 things you can control right now", "✏️"),
    ("Try progressive muscle relaxation starting with your toes", "🧘"),
    ("Have a warm cup of herbal tea and sit quietly", "🍵"),
];

const SAD_POOL: &[Item] = &[
    ("Call a trusted friend or family member to connect", "📞"),
    ("Write down 3 things you're grateful for today", "🙏"),
    ("Watch a funny video or movie that makes you smile", "😊"),
    ("Do one small act of kindness for yourself", "💝"),
    ("Step outside for some fresh air and sunlight", "☀️"),
    ("Listen to music that matches then lifts your mood", "🎶"),
];

const HAPPY_POOL: &[Item] = &[
    ("Share your positive energy with someone you care about", "✨"),
    ("Write about what made you feel this way today", "📝"),
    ("Take a photo or create something to remember this moment", "📸"),
    ("Plan a small celebration or treat for yourself", "🎉"),
    ("Use this energy to tackle a goal you've been putting off", "🎯"),
    ("Send a thank you message to someone who helped you", "💌"),
];

const CALM_POOL: &[Item] = &[
    ("Set a positive intention for the rest of your day", "🌟"),
    ("Try 5 minutes of mindfulness meditation", "🧘"),
    ("Reflect on one thing you learned about yourself today", "🤔"),
    ("Plan one small goal you can achieve tomorrow", "🎯"),
    ("Organize a small area of your space mindfully", "🏠"),
    ("Practice gentle stretching or yoga poses", "🤸"),
];

const WORK_POOL: &[Item] = &[
    ("Take a 5-minute break and step away from your workspace", "⏰"),
    ("Try the Pomodoro technique: 25 min work, 5 min break", "🍅"),
    ("Practice desk yoga or shoulder rolls to release tension", "🧘"),
    ("Write down your top 3 priorities to regain focus", "📝"),
    ("Talk to a trusted colleague about workload concerns", "💬"),
    ("Set boundaries: no work emails after a certain time", "📵"),
];

const WORK_KEYWORDS: &[&str] = &[
    "work",
    "job",
    "boss",
    "deadline",
    "meeting",
    "office",
    "colleague",
];

/// Which fixed pool an entry draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionBucket {
    Stressed,
    Sad,
    Happy,
    Calm,
    /// Stressed entries that talk about work
    Work,
}

impl SuggestionBucket {
    /// Picks the bucket from mood first, then polarity.
    pub fn select(mood: Mood, polarity: f64, content: &str) -> Self {
        let bucket = if mood == Mood::Stressed || polarity < -0.3 {
            SuggestionBucket::Stressed
        } else if mood == Mood::Sad || polarity < 0.0 {
            SuggestionBucket::Sad
        } else if mood == Mood::Happy || polarity > 0.2 {
            SuggestionBucket::Happy
        } else {
            SuggestionBucket::Calm
        };

        if bucket == SuggestionBucket::Stressed && mentions_work(content) {
            SuggestionBucket::Work
        } else {
            bucket
        }
    }

    fn items(&self) -> &'static [Item] {
        match self {
            SuggestionBucket::Stressed => STRESSED_POOL,
            SuggestionBucket::Sad => SAD_POOL,
            SuggestionBucket::Happy => HAPPY_POOL,
            SuggestionBucket::Calm => CALM_POOL,
            SuggestionBucket::Work => WORK_POOL,
        }
    }
}

fn mentions_work(content: &str) -> bool {
    let lower = content.to_lowercase();
    WORK_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// One suggestion keyed on the local hour (0..=23).
pub fn time_of_day_suggestion(hour: u32) -> Suggestion {
    let (text, icon) = match hour {
        6..=11 => ("Start your day with intention and purpose", "🌅"),
        12..=16 => ("Take a midday moment to check in with yourself", "☀️"),
        17..=21 => ("Reflect on the positive moments from today", "🌇"),
        _ => ("Prepare for restful sleep with a calming routine", "🌙"),
    };
    Suggestion::new(text, icon)
}

/// The full candidate pool: six bucket items plus the time-of-day item.
pub fn candidate_pool(sentiment: &SentimentResult, content: &str, hour: u32) -> Vec<Suggestion> {
    let bucket = SuggestionBucket::select(sentiment.mood, sentiment.effective_polarity(), content);
    let mut pool: Vec<Suggestion> = bucket
        .items()
        .iter()
        .map(|(text, icon)| Suggestion::new(*text, *icon))
        .collect();
    pool.push(time_of_day_suggestion(hour));
    pool
}

/// Samples three distinct suggestions from the candidate pool.
pub fn fallback_suggestions<R: Rng + ?Sized>(
    sentiment: &SentimentResult,
    content: &str,
    hour: u32,
    rng: &mut R,
) -> Vec<Suggestion> {
    let pool = candidate_pool(sentiment, content, hour);
    pool.choose_multiple(rng, SUGGESTION_COUNT).cloned().collect()
}

/// Starter suggestions shown before any entry exists.
pub fn starter_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("Start your day with journaling", "📝"),
        Suggestion::new("Take a moment to breathe deeply", "🧘"),
        Suggestion::new("Set a positive intention for today", "🌟"),
    ]
}
