use super::backend::StorageBackend;
use super::{INTRO_SEEN_KEY, PROFILES_KEY};
use crate::error::{Result, TaptalkError};
use crate::model::{ConflictEntry, Profile, ProfileCollection};

/// In-memory profile collection, flushed through a [`StorageBackend`] on every mutation.
///
/// Mutations are applied to a copy of the collection. The copy is persisted first and
/// only replaces the in-memory view once the write succeeded, so after a failed write
/// the store still reflects what is durably stored.
pub struct ProfileStore<B: StorageBackend> {
    backend: B,
    profiles: ProfileCollection,
}

impl<B: StorageBackend> ProfileStore<B> {
    /// Hydrate the store from the backend. A missing or blank value is an empty collection.
    pub fn load(backend: B) -> Result<Self> {
        let profiles = match backend.get(PROFILES_KEY)? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(TaptalkError::Serialization)?
            }
            _ => ProfileCollection::new(),
        };
        tracing::debug!(count = profiles.len(), "loaded profile collection");
        Ok(Self { backend, profiles })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Case-insensitive lookup on the trimmed name. First match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        let wanted = name.trim().to_lowercase();
        self.profiles
            .iter()
            .find(|p| p.name.trim().to_lowercase() == wanted)
    }

    /// Create a profile with the default tags. Blank names are skipped (`Ok(None)`).
    pub fn create(&mut self, name: &str) -> Result<Option<Profile>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let mut profile = Profile::new(name);
        while self.get(&profile.id).is_some() {
            profile = Profile::new(name);
        }

        let mut updated = self.profiles.clone();
        updated.push(profile.clone());
        self.commit(updated)?;

        tracing::info!(id = %profile.id, name = %profile.name, "profile created");
        Ok(Some(profile))
    }

    /// Append a conflict stamped now. `Ok(None)` if the profile does not exist.
    /// A blank tag is skipped and the profile is returned unchanged.
    pub fn log_conflict(&mut self, profile_id: &str, tag: &str) -> Result<Option<Profile>> {
        if tag.trim().is_empty() {
            return Ok(self.get(profile_id).cloned());
        }
        let entry = ConflictEntry::new(tag);
        self.update_profile(profile_id, |p| p.conflicts.push(entry))
    }

    /// Append a tag to the profile's vocabulary. Duplicates are allowed.
    pub fn add_tag(&mut self, profile_id: &str, tag: &str) -> Result<Option<Profile>> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(self.get(profile_id).cloned());
        }
        let tag = tag.to_string();
        self.update_profile(profile_id, |p| p.tags.push(tag))
    }

    /// Remove every occurrence of `tag`. Removing an absent tag is a no-op.
    pub fn remove_tag(&mut self, profile_id: &str, tag: &str) -> Result<Option<Profile>> {
        match self.get(profile_id) {
            None => return Ok(None),
            Some(p) if !p.tags.iter().any(|t| t == tag) => return Ok(Some(p.clone())),
            Some(_) => {}
        }
        self.update_profile(profile_id, |p| p.tags.retain(|t| t != tag))
    }

    /// Remove a profile and all of its conflicts. Unknown ids are a no-op.
    pub fn delete(&mut self, profile_id: &str) -> Result<()> {
        if self.get(profile_id).is_none() {
            return Ok(());
        }
        let updated: ProfileCollection = self
            .profiles
            .iter()
            .filter(|p| p.id != profile_id)
            .cloned()
            .collect();
        self.commit(updated)?;
        tracing::info!(id = %profile_id, "profile deleted");
        Ok(())
    }

    pub fn intro_seen(&self) -> Result<bool> {
        Ok(self
            .backend
            .get(INTRO_SEEN_KEY)?
            .is_some_and(|v| v.trim() == "true"))
    }

    pub fn mark_intro_seen(&self) -> Result<()> {
        self.backend.set(INTRO_SEEN_KEY, "true")
    }

    fn update_profile<F>(&mut self, profile_id: &str, apply: F) -> Result<Option<Profile>>
    where
        F: FnOnce(&mut Profile),
    {
        let Some(pos) = self.profiles.iter().position(|p| p.id == profile_id) else {
            return Ok(None);
        };

        let mut updated = self.profiles.clone();
        apply(&mut updated[pos]);
        let profile = updated[pos].clone();
        self.commit(updated)?;
        Ok(Some(profile))
    }

    /// Persist the full collection, then make it the in-memory view.
    fn commit(&mut self, updated: ProfileCollection) -> Result<()> {
        let raw = serde_json::to_string(&updated).map_err(TaptalkError::Serialization)?;
        if let Err(e) = self.backend.set(PROFILES_KEY, &raw) {
            tracing::warn!(error = %e, "failed to persist profile collection");
            return Err(e);
        }
        tracing::debug!(count = updated.len(), bytes = raw.len(), "flushed profile collection");
        self.profiles = updated;
        Ok(())
    }
}
