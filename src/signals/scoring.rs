//! Scoring primitives shared by the category rules.

use chrono::{DateTime, Duration, Utc};

/// Whether `ts` lies less than `window` before `now`. Future instants count
/// as recent; an unknown instant never does.
pub fn is_recent(ts: Option<DateTime<Utc>>, now: DateTime<Utc>, window: Duration) -> bool {
    match ts {
        Some(ts) => now.signed_duration_since(ts) < window,
        None => false,
    }
}

/// `bonus` when recent, otherwise 0.
pub fn recency_bonus(ts: Option<DateTime<Utc>>, now: DateTime<Utc>, window: Duration, bonus: i32) -> i32 {
    if is_recent(ts, now, window) {
        bonus
    } else {
        0
    }
}

/// Case-insensitive substring match against any keyword.
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| text.contains(&k.to_lowercase()))
}

/// Non-overlapping occurrences of all keywords in `text`, case-insensitive.
pub fn count_occurrences(text: &str, keywords: &[String]) -> usize {
    let text = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| text.matches(k.to_lowercase().as_str()).count())
        .sum()
}

/// Positive minus negative keyword hits, clamped to `[-cap, cap]`.
pub fn sentiment(title: &str, positive: &[String], negative: &[String], cap: i32) -> i32 {
    let pos = count_occurrences(title, positive) as i64;
    let neg = count_occurrences(title, negative) as i64;
    let cap = i64::from(cap.abs());
    (pos - neg).clamp(-cap, cap) as i32
}
