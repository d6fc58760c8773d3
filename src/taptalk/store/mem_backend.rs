use super::backend::StorageBackend;
use crate::error::{Result, TaptalkError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since taptalk is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a raw value, as if written by an earlier session.
    pub fn with_value(key: &str, value: &str) -> Self {
        let backend = Self::default();
        backend
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(TaptalkError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ConflictEntry, Profile, ProfileCollection};
    use crate::store::{ProfileStore, PROFILES_KEY};
    use chrono::{DateTime, Utc};

    /// Builds a `ProfileStore` over a `MemBackend` pre-seeded with profiles whose
    /// conflicts carry explicit timestamps.
    #[derive(Default)]
    pub struct StoreFixture {
        profiles: ProfileCollection,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_profile(mut self, name: &str) -> Self {
            self.profiles.push(Profile::new(name));
            self
        }

        /// Log `tag` at `at` on the profile called `name`, creating it if needed.
        pub fn with_conflict(mut self, name: &str, tag: &str, at: DateTime<Utc>) -> Self {
            if !self.profiles.iter().any(|p| p.name == name) {
                self = self.with_profile(name);
            }
            let profile = self.profiles.iter_mut().find(|p| p.name == name).unwrap();
            profile.conflicts.push(ConflictEntry::at(tag, at));
            self
        }

        pub fn build(self) -> ProfileStore<MemBackend> {
            let raw = serde_json::to_string(&self.profiles).unwrap();
            ProfileStore::load(MemBackend::with_value(PROFILES_KEY, &raw)).unwrap()
        }
    }
}
