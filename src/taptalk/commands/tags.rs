//! Profile tag vocabulary: list, add and remove.

use crate::commands::helpers::resolve_profile;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TaptalkError};
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

pub fn list<B, Tz>(store: &ProfileStore<B>, selector: &str, now: &DateTime<Tz>) -> Result<CmdResult>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let profile = resolve_profile(store, selector, now)?;
    let mut result = CmdResult::default();
    if profile.tags.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} has no tags yet. Add one with 'taptalk tags add'",
            profile.name
        )));
    }
    result.affected_profiles.push(profile);
    Ok(result)
}

/// Add a tag. Duplicates are allowed; blank tags are skipped.
pub fn add<B, Tz>(
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
    let mut result = CmdResult::default();

    if tag.trim().is_empty() {
        result.add_message(CmdMessage::info("Tag is empty, nothing added"));
        result.affected_profiles.push(profile);
        return Ok(result);
    }

    let updated = store
        .add_tag(&profile.id, tag)?
        .ok_or_else(|| TaptalkError::ProfileNotFound(profile.id.clone()))?;
    result.add_message(CmdMessage::success(format!(
        "Added tag [{}] to {}",
        tag.trim(),
        updated.name
    )));
    result.affected_profiles.push(updated);
    Ok(result)
}

/// Remove a tag. Removing a tag the profile does not have is not an error.
/// Conflicts already logged with that tag are kept.
pub fn remove<B, Tz>(
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
    let had_tag = profile.tags.iter().any(|t| t == tag);

    let updated = store
        .remove_tag(&profile.id, tag)?
        .ok_or_else(|| TaptalkError::ProfileNotFound(profile.id.clone()))?;

    let mut result = CmdResult::default();
    if had_tag {
        result.add_message(CmdMessage::success(format!(
            "Removed tag [{}] from {}",
            tag, updated.name
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} has no tag [{}]",
            updated.name, tag
        )));
    }
    result.affected_profiles.push(updated);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::fixtures::StoreFixture;
    use chrono::Utc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn list_returns_profile_tags() {
        let store = StoreFixture::new().with_profile("Sam").build();
        let result = list(&store, "Sam", &now()).unwrap();
        assert_eq!(result.affected_profiles[0].tags[0], "💰 Money");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn add_then_remove_tag() {
        let mut store = StoreFixture::new().with_profile("Sam").build();

        let added = add(&mut store, "Sam", " Holidays ", &now()).unwrap();
        assert_eq!(added.affected_profiles[0].tags.last().unwrap(), "Holidays");

        let removed = remove(&mut store, "Sam", "Holidays", &now()).unwrap();
        assert!(!removed.affected_profiles[0]
            .tags
            .contains(&"Holidays".to_string()));
        assert!(matches!(removed.messages[0].level, MessageLevel::Success));
    }

    #[test]
    fn removing_absent_tag_is_informational() {
        let mut store = StoreFixture::new().with_profile("Sam").build();
        let before = store.profiles()[0].tags.clone();

        let result = remove(&mut store, "Sam", "Nope", &now()).unwrap();

        assert!(matches!(result.messages[0].level, MessageLevel::Info));
        assert_eq!(store.profiles()[0].tags, before);
    }

    #[test]
    fn removing_tag_keeps_logged_conflicts() {
        let mut store = StoreFixture::new()
            .with_conflict("Sam", "💰 Money", Utc.with_ymd_and_hms(2024, 3, 19, 9, 0, 0).unwrap())
            .build();

        remove(&mut store, "Sam", "💰 Money", &now()).unwrap();

        assert_eq!(store.profiles()[0].conflicts.len(), 1);
    }
}
