//! # Weekly Insight
//!
//! Turns a week of conflict entries into a prompt, sends it to a text-completion
//! service and packages the answer with a human-readable date range.
//!
//! The completion service is the only network dependency in taptalk. It sits behind
//! [`CompletionService`] so tests (and other providers) can stand in for
//! [`openai::OpenAiClient`].
//!
//! Failures never reach the caller: [`compose_insight`] logs the error and returns
//! [`FALLBACK_INSIGHT`] with an empty date range.

use crate::aggregate::weekly_cutoff;
use crate::model::ConflictEntry;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::Serialize;
use thiserror::Error;

pub mod openai;

pub const FALLBACK_INSIGHT: &str = "Something went wrong generating the insight.";
pub const EMPTY_INSIGHT: &str = "No insight generated.";

const PROMPT_HEADER: &str = "\
You are a kind and emotionally intelligent assistant helping couples grow through gentle reflection.

Each week, you receive a log of short conflict tags (like \"Money\", \"Chores\", \"Misunderstanding\", etc.) that one of the partners logs via an app.

Your task is to analyze the conflict logs from the past week and offer a warm, insightful summary.

Include these three sections:

1. 💔 Top Conflict Themes: What were the most common topics? Mention them in a calm tone.
2. 🕰️ Time Patterns (if any): Did conflicts seem to cluster around certain times or days?
3. 💡 Suggestions for Awareness and Growth: Offer 1–2 kind, non-judgmental suggestions the couple can reflect on together. Keep them short and emotionally supportive.

Here are the logs:
";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No API key configured (set OPENAI_API_KEY or `taptalk config api_key <key>`)")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("No response from completion service")]
    EmptyResponse,
}

/// Anything that can turn a prompt into text.
pub trait CompletionService {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Generated text plus the period it covers. The label is empty when generation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub text: String,
    pub date_range_label: String,
}

impl Insight {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_INSIGHT.to_string(),
            date_range_label: String::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.date_range_label.is_empty() && self.text == FALLBACK_INSIGHT
    }
}

/// Ask `service` for a reflection on `entries`, which the caller has already limited to
/// the past week.
pub fn compose_insight<C, Tz>(service: &C, entries: &[ConflictEntry], now: &DateTime<Tz>) -> Insight
where
    C: CompletionService + ?Sized,
    Tz: TimeZone,
{
    let prompt = build_prompt(entries);
    tracing::debug!(entries = entries.len(), "requesting weekly insight");

    match service.complete(&prompt) {
        Ok(text) => Insight {
            text,
            date_range_label: date_range_label(weekly_cutoff(now).date_naive(), now.date_naive()),
        },
        Err(e) => {
            tracing::error!(error = %e, "insight generation failed");
            Insight::fallback()
        }
    }
}

/// One `- YYYY-MM-DD: tag` line per entry, dated in UTC.
pub fn format_log_lines(entries: &[ConflictEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("- {}: {}", e.timestamp.format("%Y-%m-%d"), e.tag))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(entries: &[ConflictEntry]) -> String {
    format!("{}\n{}\n", PROMPT_HEADER, format_log_lines(entries))
}

/// `13–20 March 2024` within one month, `26 March 2024 – 2 April 2024` across months.
pub fn date_range_label(start: NaiveDate, end: NaiveDate) -> String {
    let same_month = start.month() == end.month() && start.year() == end.year();
    if same_month {
        format!("{}–{} {}", start.day(), end.day(), end.format("%B %Y"))
    } else {
        format!(
            "{} {} – {} {}",
            start.day(),
            start.format("%B %Y"),
            end.day(),
            end.format("%B %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Utc, TimeZone as _};
    use std::cell::RefCell;

    struct StubService {
        reply: Option<String>,
        prompts: RefCell<Vec<String>>,
    }

    impl StubService {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionService for StubService {
        fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(ServiceError::Status {
                    status: 500,
                    body: "upstream exploded".to_string(),
                }),
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_entries() -> Vec<ConflictEntry> {
        vec![
            ConflictEntry::at("💰 Money", Utc.with_ymd_and_hms(2024, 3, 18, 20, 15, 0).unwrap()),
            ConflictEntry::at("🧹 Chores", Utc.with_ymd_and_hms(2024, 3, 19, 7, 45, 0).unwrap()),
        ]
    }

    #[test]
    fn date_range_within_one_month() {
        assert_eq!(
            date_range_label(date(2024, 3, 13), date(2024, 3, 20)),
            "13–20 March 2024"
        );
    }

    #[test]
    fn date_range_across_months() {
        assert_eq!(
            date_range_label(date(2024, 3, 26), date(2024, 4, 2)),
            "26 March 2024 – 2 April 2024"
        );
    }

    #[test]
    fn date_range_across_years() {
        assert_eq!(
            date_range_label(date(2023, 12, 28), date(2024, 1, 4)),
            "28 December 2023 – 4 January 2024"
        );
    }

    #[test]
    fn log_lines_are_dated_bullets() {
        assert_eq!(
            format_log_lines(&sample_entries()),
            "- 2024-03-18: 💰 Money\n- 2024-03-19: 🧹 Chores"
        );
    }

    #[test]
    fn prompt_embeds_log_and_asks_for_three_sections() {
        let prompt = build_prompt(&sample_entries());
        assert!(prompt.contains("Top Conflict Themes"));
        assert!(prompt.contains("Time Patterns"));
        assert!(prompt.contains("Suggestions for Awareness and Growth"));
        assert!(prompt.ends_with("- 2024-03-18: 💰 Money\n- 2024-03-19: 🧹 Chores\n"));
    }

    #[test]
    fn success_returns_text_verbatim_with_label() {
        let service = StubService::replying("  Money came up twice.\n");
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();

        let insight = compose_insight(&service, &sample_entries(), &now);

        assert_eq!(insight.text, "  Money came up twice.\n");
        assert_eq!(insight.date_range_label, "13–20 March 2024");
        assert_eq!(service.prompts.borrow().len(), 1);
        assert!(service.prompts.borrow()[0].contains("- 2024-03-19: 🧹 Chores"));
    }

    #[test]
    fn label_spans_months_when_week_crosses_them() {
        let service = StubService::replying("ok");
        let now = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
        let insight = compose_insight(&service, &[], &now);
        assert_eq!(insight.date_range_label, "26 March 2024 – 2 April 2024");
    }

    #[test]
    fn blank_reply_is_kept_verbatim() {
        let service = StubService::replying("");
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let insight = compose_insight(&service, &sample_entries(), &now);
        assert_eq!(insight.text, "");
        assert!(!insight.date_range_label.is_empty());
    }

    #[test]
    fn failure_returns_fallback_and_empty_label() {
        let service = StubService::failing();
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();

        let insight = compose_insight(&service, &sample_entries(), &now);

        assert_eq!(insight, Insight::fallback());
        assert!(insight.is_fallback());
        assert_eq!(service.prompts.borrow().len(), 1);
    }

    #[test]
    fn works_through_a_trait_object() {
        let service: Box<dyn CompletionService> = Box::new(StubService::replying("hi"));
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let insight = compose_insight(service.as_ref(), &[], &now);
        assert_eq!(insight.text, "hi");
    }
}
