use crate::commands::helpers::resolve_profile;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// Delete the selected profile together with its whole conflict log.
pub fn run<B, Tz>(store: &mut ProfileStore<B>, selector: &str, now: &DateTime<Tz>) -> Result<CmdResult>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let profile = resolve_profile(store, selector, now)?;
    store.delete(&profile.id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Profile deleted: {} ({} log{} removed)",
        profile.name,
        profile.conflicts.len(),
        if profile.conflicts.len() == 1 { "" } else { "s" }
    )));
    result.affected_profiles.push(profile);
    Ok(result)
}
