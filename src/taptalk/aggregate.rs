//! # Conflict Aggregation
//!
//! Pure functions over a profile's conflict log: date windows, tag frequencies, tag
//! normalization and the traffic-light classification. Nothing here touches storage or
//! the clock; callers pass `now` explicitly, and its time zone decides what "today" and
//! "this month" mean.

use crate::model::{ConflictEntry, Profile};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Days covered by the weekly window.
pub const WEEK_DAYS: i64 = 7;

/// Three-tier classification of recent conflict frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    pub fn from_weekly_count(count: usize) -> Self {
        match count {
            0 => TrafficLevel::Low,
            1..=3 => TrafficLevel::Medium,
            _ => TrafficLevel::High,
        }
    }

    /// Sort key putting the most pressing profiles first.
    pub fn priority(self) -> u8 {
        match self {
            TrafficLevel::High => 0,
            TrafficLevel::Medium => 1,
            TrafficLevel::Low => 2,
        }
    }

    /// Traffic-light color for this level.
    pub fn hex_color(self) -> &'static str {
        match self {
            TrafficLevel::Low => "#33cc33",
            TrafficLevel::Medium => "#ffcc00",
            TrafficLevel::High => "#cc0000",
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrafficLevel::Low => "low",
            TrafficLevel::Medium => "medium",
            TrafficLevel::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl TagCount {
    pub fn new(tag: impl Into<String>, count: usize) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

/// A tag split into its leading symbol run (usually an emoji) and a capitalized label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedTag {
    pub prefix: String,
    pub label: String,
}

impl fmt::Display for NormalizedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.prefix.is_empty(), self.label.is_empty()) {
            (true, _) => f.write_str(&self.label),
            (false, true) => f.write_str(&self.prefix),
            (false, false) => write!(f, "{} {}", self.prefix, self.label),
        }
    }
}

/// Entries logged at or after `cutoff`, in their original order.
pub fn filter_since<Tz: TimeZone>(
    entries: &[ConflictEntry],
    cutoff: &DateTime<Tz>,
) -> Vec<ConflictEntry> {
    let cutoff = cutoff.with_timezone(&Utc);
    entries
        .iter()
        .filter(|e| e.timestamp >= cutoff)
        .cloned()
        .collect()
}

pub fn weekly_cutoff<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    now.clone() - Duration::days(WEEK_DAYS)
}

/// Entries from the last seven days.
pub fn weekly_window<Tz: TimeZone>(entries: &[ConflictEntry], now: &DateTime<Tz>) -> Vec<ConflictEntry> {
    filter_since(entries, &weekly_cutoff(now))
}

/// Entries in the same calendar month and year as `now`, in `now`'s time zone.
pub fn monthly_window<Tz: TimeZone>(
    entries: &[ConflictEntry],
    now: &DateTime<Tz>,
) -> Vec<ConflictEntry> {
    let tz = now.timezone();
    entries
        .iter()
        .filter(|e| {
            let local = e.timestamp.with_timezone(&tz);
            local.year() == now.year() && local.month() == now.month()
        })
        .cloned()
        .collect()
}

/// Number of entries whose calendar date in `now`'s time zone is today.
pub fn daily_count<Tz: TimeZone>(entries: &[ConflictEntry], now: &DateTime<Tz>) -> usize {
    let tz = now.timezone();
    let today = now.date_naive();
    entries
        .iter()
        .filter(|e| e.timestamp.with_timezone(&tz).date_naive() == today)
        .count()
}

/// Count per exact tag, most frequent first. Ties keep first-seen order.
pub fn tag_frequency(entries: &[ConflictEntry]) -> Vec<TagCount> {
    count_by(entries, |tag| tag.to_string())
}

/// Like [`tag_frequency`], but buckets by [`normalize_tag`] so that `"💰 money"` and
/// `"💰 Money"` count as one theme.
pub fn normalized_tag_frequency(entries: &[ConflictEntry]) -> Vec<TagCount> {
    count_by(entries, |tag| normalize_tag(tag).to_string())
}

fn count_by<F>(entries: &[ConflictEntry], key: F) -> Vec<TagCount>
where
    F: Fn(&str) -> String,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TagCount> = Vec::new();

    for entry in entries {
        let k = key(&entry.tag);
        match positions.get(&k) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(k.clone(), counts.len());
                counts.push(TagCount::new(k, 1));
            }
        }
    }

    // sort_by is stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Split a tag into its leading non-alphanumeric run and a label that is lower-cased
/// with the first letter capitalized.
pub fn normalize_tag(tag: &str) -> NormalizedTag {
    let split = tag
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(tag.len());
    let (prefix, rest) = tag.split_at(split);

    let lowered = rest.trim().to_lowercase();
    let mut chars = lowered.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    NormalizedTag {
        prefix: prefix.trim().to_string(),
        label,
    }
}

pub fn traffic_level<Tz: TimeZone>(entries: &[ConflictEntry], now: &DateTime<Tz>) -> TrafficLevel {
    TrafficLevel::from_weekly_count(weekly_window(entries, now).len())
}

/// Short note shown under a theme's count.
pub fn friendly_message(count: usize) -> &'static str {
    if count >= 5 {
        "This came up quite a bit. Might be worth discussing."
    } else if count >= 3 {
        "A recurring theme to be aware of."
    } else {
        "Logged a few times."
    }
}

/// The most frequent exact tag, if anything was logged.
pub fn top_theme(entries: &[ConflictEntry]) -> Option<TagCount> {
    tag_frequency(entries).into_iter().next()
}

/// Profiles ordered High, Medium, Low; creation order is kept within a level.
pub fn rank_by_traffic<'a, Tz: TimeZone>(
    profiles: &'a [Profile],
    now: &DateTime<Tz>,
) -> Vec<(&'a Profile, TrafficLevel)> {
    let mut ranked: Vec<_> = profiles
        .iter()
        .map(|p| (p, traffic_level(&p.conflicts, now)))
        .collect();
    ranked.sort_by_key(|(_, level)| level.priority());
    ranked
}
