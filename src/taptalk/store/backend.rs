use crate::error::Result;

/// Abstract interface for raw key-value storage.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// `ProfileStore` handles the "what" (collection rules, flushing).
/// Methods take `&self`; implementations handle their own interior mutability.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic: readers see either the old or the new value, never a mix.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
