use crate::aggregate::rank_by_traffic;
use crate::error::{Result, TaptalkError};
use crate::model::Profile;
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// Resolve a user-supplied selector to a profile.
///
/// Tried in order: 1-based index into the traffic-ranked list (as `list` shows it),
/// exact id, then case-insensitive name.
pub fn resolve_profile<B, Tz>(
    store: &ProfileStore<B>,
    selector: &str,
    now: &DateTime<Tz>,
) -> Result<Profile>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let selector = selector.trim();

    if let Ok(n) = selector.parse::<usize>() {
        let ranked = rank_by_traffic(store.profiles(), now);
        if let Some((profile, _)) = n.checked_sub(1).and_then(|i| ranked.get(i)) {
            return Ok((*profile).clone());
        }
    }

    store
        .get(selector)
        .or_else(|| store.find_by_name(selector))
        .cloned()
        .ok_or_else(|| TaptalkError::ProfileNotFound(selector.to_string()))
}

/// A bare number picks from the profile's tag list (1-based); anything else is the tag.
pub fn resolve_tag(profile: &Profile, input: &str) -> String {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| profile.tags.get(i))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}
