//! # Storage Layer
//!
//! Taptalk keeps all of its state in a flat key-value store holding a handful of
//! string values. The whole profile collection lives under a single key as a JSON
//! array and is rewritten on every mutation.
//!
//! ## Two Layers
//!
//! - [`backend::StorageBackend`]: the raw key-value gateway (`get` / `set`). It knows
//!   nothing about profiles and performs no schema validation.
//! - [`profile_store::ProfileStore`]: owns the in-memory collection, applies the
//!   mutation rules and flushes the full collection through the backend.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `{key}.json` file per key in a data directory.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/taptalk/
//! ├── profiles.json        # ProfileCollection (JSON array)
//! ├── has_seen_intro.json  # "true" once the welcome text was shown
//! └── config.json          # TaptalkConfig
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod profile_store;

pub use backend::StorageBackend;
pub use profile_store::ProfileStore;

/// Key holding the serialized profile collection.
pub const PROFILES_KEY: &str = "profiles";

/// Key holding the "welcome text shown" flag.
pub const INTRO_SEEN_KEY: &str = "has_seen_intro";
