//! # TapTalk Architecture
//!
//! TapTalk is a **private conflict journal**: one profile per person, a timestamped log of
//! tagged conflicts per profile, and summaries, traffic levels and a generated weekly
//! reflection computed from that log. The library carries all of it; the binary is one
//! client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, supplies the local clock      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Selector resolution, result messages                     │
//! │  - Calls aggregate / insight / export                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ProfileStore over the StorageBackend key-value trait     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time
//!
//! Nothing below the API layer reads the clock. Aggregation takes `now` as a
//! `DateTime<Tz>`, so "today" and "this month" are whatever they are in the caller's
//! time zone.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per user operation
//! - [`store`]: Profile persistence
//! - [`model`]: `Profile` and `ConflictEntry`
//! - [`aggregate`]: Windows, counts, traffic levels and tag normalization
//! - [`insight`]: Prompt building and the completion service
//! - [`export`]: Share text rendering
//! - [`share`]: Clipboard sink
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod aggregate;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod insight;
pub mod model;
pub mod share;
pub mod store;
