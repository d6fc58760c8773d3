use crate::aggregate::normalized_tag_frequency;
use crate::commands::helpers::resolve_profile;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::export::format_share_text;
use crate::model::Profile;
use crate::store::{ProfileStore, StorageBackend};
use chrono::{DateTime, TimeZone};

/// Share text for a profile: normalized theme counts over the whole log plus `insight_text`.
pub fn share_text(profile: &Profile, insight_text: &str) -> String {
    let frequency = normalized_tag_frequency(&profile.conflicts);
    format_share_text(&profile.name, &frequency, insight_text)
}

pub fn run<B, Tz>(
    store: &ProfileStore<B>,
    selector: &str,
    insight_text: &str,
    now: &DateTime<Tz>,
) -> Result<CmdResult>
where
    B: StorageBackend,
    Tz: TimeZone,
{
    let profile = resolve_profile(store, selector, now)?;
    let mut result = CmdResult {
        share_text: Some(share_text(&profile, insight_text)),
        ..Default::default()
    };
    result.affected_profiles.push(profile);
    Ok(result)
}
