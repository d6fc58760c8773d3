use crate::error::Result;
use crate::store::{ProfileStore, StorageBackend};

pub const WELCOME_TEXT: &str = "\
Welcome to TapTalk 💓

TapTalk keeps a private journal of the conflicts in your relationships.
Create a profile for each person, log a tag whenever something comes up,
and TapTalk will show which themes keep recurring.

  taptalk add <name>          create a profile
  taptalk log <profile> <tag> log a conflict (tag can be its number)
  taptalk summary <profile>   see the themes
  taptalk insight <profile>   get a weekly reflection

Profiles are shown with a traffic light: 🟢 calm, 🟡 some friction, 🔴 a rough week.";

/// The welcome text if it has never been shown, marking it as seen.
pub fn check<B: StorageBackend>(store: &ProfileStore<B>) -> Result<Option<&'static str>> {
    if store.intro_seen()? {
        return Ok(None);
    }
    store.mark_intro_seen()?;
    Ok(Some(WELCOME_TEXT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn welcome_is_shown_once() {
        let store = ProfileStore::load(MemBackend::new()).unwrap();

        assert_eq!(check(&store).unwrap(), Some(WELCOME_TEXT));
        assert_eq!(check(&store).unwrap(), None);
    }

    #[test]
    fn failed_mark_propagates() {
        let store = ProfileStore::load(MemBackend::new()).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(check(&store).is_err());
    }
}
