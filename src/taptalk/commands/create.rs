use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ProfileStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut ProfileStore<B>, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.create(name)? {
        Some(profile) => {
            result.add_message(CmdMessage::success(format!(
                "Profile created: {}",
                profile.name
            )));
            result.affected_profiles.push(profile);
        }
        None => result.add_message(CmdMessage::info("Name is empty, nothing created")),
    }

    Ok(result)
}
