use crate::aggregate::weekly_window;
use crate::commands::export::share_text;
use crate::commands::helpers::resolve_profile;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::insight::{compose_insight, CompletionService};
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// Generate the weekly insight for a profile and prepare its share text.
///
/// Service failures do not fail the command: the result carries the fallback insight
/// and a warning message.
pub fn run<B, C, Tz>(
    store: &ProfileStore<B>,
    service: &C,
    selector: &str,
    now: &DateTime<Tz>,
) -> Result<CmdResult>
where
    B: StorageBackend,
    C: CompletionService + ?Sized,
    Tz: TimeZone,
{
    let profile = resolve_profile(store, selector, now)?;
    let weekly = weekly_window(&profile.conflicts, now);

    let mut result = CmdResult::default();
    if weekly.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing logged for {} in the past week",
            profile.name
        )));
    }

    let insight = compose_insight(service, &weekly, now);
    if insight.is_fallback() {
        result.add_message(CmdMessage::warning(
            "The insight service could not be reached. Run with --verbose for details.",
        ));
    } else {
        result.share_text = Some(share_text(&profile, &insight.text));
    }

    result.insight = Some(insight);
    result.affected_profiles.push(profile);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::insight::{ServiceError, FALLBACK_INSIGHT};
    use crate::store::mem_backend::fixtures::StoreFixture;
    use chrono::Utc;
    use std::cell::RefCell;

    struct Recorder {
        reply: std::result::Result<&'static str, u16>,
        prompts: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn new(reply: std::result::Result<&'static str, u16>) -> Self {
            Self {
                reply,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionService for Recorder {
        fn complete(&self, prompt: &str) -> std::result::Result<String, ServiceError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.reply.map(str::to_string).map_err(|status| ServiceError::Status {
                status,
                body: String::new(),
            })
        }
    }

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn only_the_past_week_is_sent() {
        let store = StoreFixture::new()
            .with_conflict("Sam", "Old", at(1))
            .with_conflict("Sam", "💰 Money", at(18))
            .build();
        let service = Recorder::new(Ok("You talked about money."));

        let result = run(&store, &service, "Sam", &at(20)).unwrap();

        let prompt = &service.prompts.borrow()[0];
        assert!(prompt.contains("- 2024-03-18: 💰 Money"));
        assert!(!prompt.contains("Old"));

        let insight = result.insight.unwrap();
        assert_eq!(insight.text, "You talked about money.");
        assert_eq!(insight.date_range_label, "13–20 March 2024");
        assert!(result
            .share_text
            .unwrap()
            .contains("\"You talked about money.\""));
    }

    #[test]
    fn service_failure_yields_fallback_and_warning() {
        let store = StoreFixture::new()
            .with_conflict("Sam", "💰 Money", at(18))
            .build();
        let service = Recorder::new(Err(503));

        let result = run(&store, &service, "Sam", &at(20)).unwrap();

        let insight = result.insight.unwrap();
        assert_eq!(insight.text, FALLBACK_INSIGHT);
        assert_eq!(insight.date_range_label, "");
        assert!(result.share_text.is_none());
        assert!(result
            .messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning)));
    }

    #[test]
    fn quiet_week_still_asks_but_says_so() {
        let store = StoreFixture::new().with_profile("Sam").build();
        let service = Recorder::new(Ok("A calm week."));

        let result = run(&store, &service, "Sam", &at(20)).unwrap();

        assert_eq!(service.prompts.borrow().len(), 1);
        assert!(result.messages[0].content.contains("past week"));
    }
}
