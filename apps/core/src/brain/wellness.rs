//! Wellness Aggregator - folds a session's history into rolling metrics.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Session, WellnessMetrics};

/// Length of the trailing window
const WINDOW_DAYS: i64 = 7;

/// Recompute metrics from every entry of both kinds, relative to `now`.
pub fn calculate_wellness_metrics(session: &Session, now: DateTime<Utc>) -> WellnessMetrics {
    let entries = session.entries();
    let total_entries = entries.len();

    if total_entries == 0 {
        return WellnessMetrics::default();
    }

    let week_ago = now - Duration::days(WINDOW_DAYS);
    let scores: Vec<f64> = entries
        .iter()
        .filter(|e| e.created_at >= week_ago)
        .map(|e| e.sentiment_score)
        .filter(|score| score.is_finite())
        .collect();

    if scores.is_empty() {
        return WellnessMetrics {
            total_entries,
            ..WellnessMetrics::default()
        };
    }

    let weekly_average = scores.iter().sum::<f64>() / scores.len() as f64;
    // truncation, not rounding
    let wellness_score = ((weekly_average * 5.0).floor() as i64 + 1).clamp(1, 5) as u8;
    let mood_trend = ((weekly_average * 100.0).floor() as i64).clamp(0, 100) as u8;

    WellnessMetrics {
        wellness_score,
        mood_trend,
        total_entries,
        weekly_average,
    }
}
