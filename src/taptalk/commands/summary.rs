use crate::aggregate::{
    daily_count, friendly_message, monthly_window, tag_frequency, top_theme, traffic_level,
    weekly_window,
};
use crate::commands::helpers::resolve_profile;
use crate::commands::{CmdMessage, CmdResult, ProfileSummary, SummaryWindow, ThemeSummary};
use crate::error::Result;
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// Today's count, traffic level and per-theme counts for one profile.
///
/// `window` limits the theme counts; the today count and traffic level always look at
/// the whole log.
pub fn run<B, Tz>(
    store: &ProfileStore<B>,
    selector: &str,
    window: SummaryWindow,
    now: &DateTime<Tz>,
) -> Result<CmdResult>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let profile = resolve_profile(store, selector, now)?;

    let entries = match window {
        SummaryWindow::All => profile.conflicts.clone(),
        SummaryWindow::Week => weekly_window(&profile.conflicts, now),
        SummaryWindow::Month => monthly_window(&profile.conflicts, now),
    };

    let themes = tag_frequency(&entries)
        .into_iter()
        .map(|t| ThemeSummary {
            message: friendly_message(t.count).to_string(),
            tag: t.tag,
            count: t.count,
        })
        .collect::<Vec<_>>();

    let mut result = CmdResult::default();
    if themes.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No conflicts logged yet. Log one with 'taptalk log \"{}\" <tag>'",
            profile.name
        )));
    }

    result.summary = Some(ProfileSummary {
        profile_name: profile.name.clone(),
        window,
        today_count: daily_count(&profile.conflicts, now),
        traffic: traffic_level(&profile.conflicts, now),
        top_theme: top_theme(&entries),
        themes,
    });
    result.affected_profiles.push(profile);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{TagCount, TrafficLevel};
    use crate::store::mem_backend::fixtures::StoreFixture;
    use chrono::Utc;

    fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()
    }

    fn store() -> ProfileStore<crate::store::mem_backend::MemBackend> {
        StoreFixture::new()
            .with_conflict("Sam", "💰 Money", at(2, 20, 9))
            .with_conflict("Sam", "🧹 Chores", at(3, 2, 9))
            .with_conflict("Sam", "💰 Money", at(3, 18, 9))
            .with_conflict("Sam", "💰 Money", at(3, 20, 8))
            .build()
    }

    #[test]
    fn summarizes_whole_log_by_default() {
        let result = run(&store(), "Sam", SummaryWindow::All, &at(3, 20, 12)).unwrap();
        let summary = result.summary.unwrap();

        assert_eq!(summary.today_count, 1);
        assert_eq!(summary.traffic, TrafficLevel::Medium);
        assert_eq!(summary.top_theme, Some(TagCount::new("💰 Money", 3)));
        assert_eq!(summary.themes.len(), 2);
        assert_eq!(summary.themes[0].message, "A recurring theme to be aware of.");
        assert_eq!(summary.themes[1].message, "Logged a few times.");
    }

    #[test]
    fn week_window_limits_themes() {
        let result = run(&store(), "Sam", SummaryWindow::Week, &at(3, 20, 12)).unwrap();
        let summary = result.summary.unwrap();
        assert_eq!(summary.themes.len(), 1);
        assert_eq!(summary.themes[0].count, 2);
    }

    #[test]
    fn month_window_limits_themes() {
        let result = run(&store(), "Sam", SummaryWindow::Month, &at(3, 20, 12)).unwrap();
        let summary = result.summary.unwrap();
        assert_eq!(summary.top_theme, Some(TagCount::new("💰 Money", 2)));
        assert_eq!(summary.themes.len(), 2);
    }

    #[test]
    fn empty_log_has_hint_and_low_traffic() {
        let store = StoreFixture::new().with_profile("Sam").build();
        let result = run(&store, "Sam", SummaryWindow::All, &at(3, 20, 12)).unwrap();
        let summary = result.summary.as_ref().unwrap();

        assert!(summary.themes.is_empty());
        assert_eq!(summary.traffic, TrafficLevel::Low);
        assert_eq!(summary.top_theme, None);
        assert!(result.messages[0].content.contains("taptalk log"));
    }
}
