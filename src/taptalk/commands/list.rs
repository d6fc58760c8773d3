use crate::aggregate::rank_by_traffic;
use crate::commands::{CmdMessage, CmdResult, ProfileOverview};
use crate::error::Result;
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// All profiles, most pressing traffic level first.
pub fn run<B, Tz>(store: &ProfileStore<B>, now: &DateTime<Tz>) -> Result<CmdResult>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let rows: Vec<ProfileOverview> = rank_by_traffic(store.profiles(), now)
        .into_iter()
        .enumerate()
        .map(|(i, (profile, traffic))| ProfileOverview {
            index: i + 1,
            id: profile.id.clone(),
            name: profile.name.clone(),
            traffic,
            log_count: profile.conflicts.len(),
            last_logged_at: profile.last_logged_at(),
        })
        .collect();

    let mut result = CmdResult::default();
    if rows.is_empty() {
        result.add_message(CmdMessage::info(
            "No profiles yet. Add someone with 'taptalk add <name>'",
        ));
    }
    Ok(result.with_listed_profiles(rows))
}
