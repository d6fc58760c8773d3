use crate::aggregate::daily_count;
use crate::commands::helpers::{resolve_profile, resolve_tag};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TaptalkError};
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// Log one conflict on the selected profile. `tag` may be a 1-based tag number.
pub fn run<B, Tz>(
    store: &mut ProfileStore<B>,
    selector: &str,
    tag: &str,
    now: &DateTime<Tz>,
) -> Result<CmdResult>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let profile = resolve_profile(store, selector, now)?;
    let tag = resolve_tag(&profile, tag);

    let mut result = CmdResult::default();
    if tag.trim().is_empty() {
        result.add_message(CmdMessage::info("Tag is empty, nothing logged"));
        return Ok(result);
    }

    let updated = store
        .log_conflict(&profile.id, &tag)?
        .ok_or_else(|| TaptalkError::ProfileNotFound(profile.id.clone()))?;

    let today = daily_count(&updated.conflicts, now);
    result.add_message(CmdMessage::success(format!(
        "Logged {} for {} ({} today)",
        tag, updated.name, today
    )));
    result.affected_profiles.push(updated);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::fixtures::StoreFixture;
    use chrono::Local;

    #[test]
    fn logs_free_form_tag() {
        let mut store = StoreFixture::new().with_profile("Sam").build();
        let result = run(&mut store, "Sam", "Screen time", &Local::now()).unwrap();

        let profile = &result.affected_profiles[0];
        assert_eq!(profile.conflicts.len(), 1);
        assert_eq!(profile.conflicts[0].tag, "Screen time");
        assert!(result.messages[0].content.contains("(1 today)"));
        assert_eq!(store.profiles()[0].conflicts.len(), 1);
    }

    #[test]
    fn numeric_tag_picks_from_profile_tags() {
        let mut store = StoreFixture::new().with_profile("Sam").build();
        let result = run(&mut store, "1", "3", &Local::now()).unwrap();
        assert_eq!(
            result.affected_profiles[0].conflicts[0].tag,
            "💬 Misunderstanding"
        );
    }

    #[test]
    fn blank_tag_logs_nothing() {
        let mut store = StoreFixture::new().with_profile("Sam").build();
        let result = run(&mut store, "Sam", "  ", &Local::now()).unwrap();
        assert!(result.affected_profiles.is_empty());
        assert!(store.profiles()[0].conflicts.is_empty());
    }

    #[test]
    fn write_failure_surfaces_as_error() {
        let mut store = StoreFixture::new().with_profile("Sam").build();
        store.backend().set_simulate_write_error(true);

        assert!(run(&mut store, "Sam", "Money", &Local::now()).is_err());
        assert!(store.profiles()[0].conflicts.is_empty());
    }
}
