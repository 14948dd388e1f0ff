//! Suggestion Parser - recovers suggestion objects from free-form model output.
//!
//! Models asked for "only a JSON array" still wrap it in prose, add comments or
//! leave trailing commas. Each attempt below either yields a list of candidate
//! values or gives up; the first one that yields wins.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use crate::brain::suggestion_pool::SUGGESTION_COUNT;
use crate::models::Suggestion;

pub const DEFAULT_ICON: &str = "💡";
const SCRAPED_ICONS: [&str; 3] = ["💭", "🧘", "🌱"];
const STOPLIST: [&str; 4] = [":", "...", "N/A", "None"];
const MIN_TEXT_LEN: usize = 5;

static ARRAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").unwrap());
static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)//.*?$").unwrap());
static BLOCK_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t]+").unwrap());
static TRAILING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\s*[}\]])").unwrap());
static TEXT_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"text"\s*:\s*"([^"]{10,})""#).unwrap());

type ParseAttempt = fn(&str) -> Option<Vec<Value>>;

/// Attempts in the order they are tried.
const ATTEMPTS: &[(&str, ParseAttempt)] = &[
    ("direct", parse_direct),
    ("bracketed", parse_bracketed),
    ("scraped", scrape_text_fields),
];

/// Accepts an array, an object with a `suggestions` array, or an object whose
/// first member is an array.
fn candidates_from(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove("suggestions") {
            Some(Value::Array(items)) => Some(items),
            Some(_) => None,
            None => first_member_array(map),
        },
        _ => None,
    }
}

fn first_member_array(map: Map<String, Value>) -> Option<Vec<Value>> {
    match map.into_iter().next() {
        Some((_, Value::Array(items))) => Some(items),
        _ => None,
    }
}

fn parse_direct(raw: &str) -> Option<Vec<Value>> {
    serde_json::from_str::<Value>(raw.trim())
        .ok()
        .and_then(candidates_from)
}

fn parse_bracketed(raw: &str) -> Option<Vec<Value>> {
    let found = ARRAY_RE.find(raw)?.as_str();
    let cleaned = LINE_COMMENT_RE.replace_all(found, "");
    let cleaned = BLOCK_COMMENT_RE.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_RE.replace_all(&cleaned, " ");
    let cleaned = TRAILING_COMMA_RE.replace_all(&cleaned, "$1");
    serde_json::from_str::<Value>(&cleaned)
        .ok()
        .and_then(candidates_from)
}

fn scrape_text_fields(raw: &str) -> Option<Vec<Value>> {
    let scraped: Vec<Value> = TEXT_FIELD_RE
        .captures_iter(raw)
        .take(SCRAPED_ICONS.len())
        .zip(SCRAPED_ICONS)
        .map(|(caps, icon)| serde_json::json!({ "text": caps[1].trim(), "icon": icon }))
        .collect();
    if scraped.is_empty() {
        None
    } else {
        Some(scraped)
    }
}

/// Runs the attempts in order and returns the first candidate list found.
pub fn extract_candidates(raw: &str) -> Option<Vec<Value>> {
    ATTEMPTS.iter().find_map(|(name, attempt)| {
        let found = attempt(raw);
        if found.is_some() {
            debug!("Suggestion parse succeeded with the {} attempt", name);
        }
        found
    })
}

/// Checks one candidate and cleans it into a `Suggestion`.
pub fn validate_candidate(candidate: &Value) -> Option<Suggestion> {
    let raw = candidate.get("text")?.as_str()?.trim();
    let text = raw.strip_suffix(&['"', '\''][..]).unwrap_or(raw).trim_end();
    if text.chars().count() < MIN_TEXT_LEN || STOPLIST.contains(&text) {
        return None;
    }

    let icon = candidate
        .get("icon")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|icon| !icon.is_empty())
        .unwrap_or(DEFAULT_ICON);

    Some(Suggestion::new(text, icon))
}

/// Parses and validates a raw model reply. `None` means nothing usable.
pub fn parse_suggestions(raw: &str) -> Option<Vec<Suggestion>> {
    let candidates = extract_candidates(raw)?;
    let valid: Vec<Suggestion> = candidates
        .iter()
        .filter_map(validate_candidate)
        .take(SUGGESTION_COUNT)
        .collect();
    if valid.is_empty() {
        None
    } else {
        Some(valid)
    }
}

/// Tops `chosen` up to three items from `pool`, skipping texts already present.
pub fn pad_suggestions(
    mut chosen: Vec<Suggestion>,
    pool: impl IntoIterator<Item = Suggestion>,
) -> Vec<Suggestion> {
    chosen.truncate(SUGGESTION_COUNT);
    let mut seen: HashSet<String> = chosen.iter().map(|s| s.text.clone()).collect();
    for candidate in pool {
        if chosen.len() >= SUGGESTION_COUNT {
            break;
        }
        if seen.insert(candidate.text.clone()) {
            chosen.push(candidate);
        }
    }
    chosen
}
