//! # Brain Module
//!
//! Deterministic, local analysis for Soul Link.
//! Everything here runs without the network and is the fallback for every remote call.
//!
//! ## Components
//! - `sentiment`: Shared output structure (`SentimentResult`) and its vocabularies
//! - `lexicon`: Word-table polarity/subjectivity scorer
//! - `keywords`: Ordered mood keyword rules
//! - `analyzer`: Lexicon classifier for free text
//! - `likert`: Questionnaire classifier
//! - `suggestion_pool`: Rule-based suggestions
//! - `suggestion_parser`: Recovery of suggestions from model output
//! - `wellness`: Rolling wellness metrics

pub mod analyzer;
pub mod keywords;
pub mod lexicon;
pub mod likert;
pub mod sentiment;
pub mod suggestion_parser;
pub mod suggestion_pool;
pub mod wellness;

// Re-export main types for convenience
pub use analyzer::LexiconClassifier;
pub use lexicon::{LexiconScore, LexiconScorer, PatternLexicon};
pub use likert::{LikertClassifier, QuestionnaireConfig};
pub use sentiment::{AnalysisMethod, Intensity, Mood, SentimentLabel, SentimentResult};
pub use wellness::calculate_wellness_metrics;
