//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for taptalk operations, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Supplies the clock**: every command gets the local `now`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no terminal I/O and holds no business logic.
//!
//! ## Generic Over StorageBackend
//!
//! `TaptalkApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `TaptalkApi<FsBackend>`
//! - Testing: `TaptalkApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::insight::CompletionService;
use crate::store::{ProfileStore, StorageBackend};
use chrono::Local;
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, SummaryWindow};

pub struct TaptalkApi<B: StorageBackend> {
    store: ProfileStore<B>,
    data_dir: PathBuf,
}

impl<B: StorageBackend> TaptalkApi<B> {
    pub fn new(store: ProfileStore<B>, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn store(&self) -> &ProfileStore<B> {
        &self.store
    }

    pub fn list_profiles(&self) -> Result<CmdResult> {
        commands::list::run(&self.store, &Local::now())
    }

    pub fn create_profile(&mut self, name: &str) -> Result<CmdResult> {
        commands::create::run(&mut self.store, name)
    }

    pub fn delete_profile(&mut self, selector: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, selector, &Local::now())
    }

    pub fn log_conflict(&mut self, selector: &str, tag: &str) -> Result<CmdResult> {
        commands::log::run(&mut self.store, selector, tag, &Local::now())
    }

    pub fn list_tags(&self, selector: &str) -> Result<CmdResult> {
        commands::tags::list(&self.store, selector, &Local::now())
    }

    pub fn add_tag(&mut self, selector: &str, tag: &str) -> Result<CmdResult> {
        commands::tags::add(&mut self.store, selector, tag, &Local::now())
    }

    pub fn remove_tag(&mut self, selector: &str, tag: &str) -> Result<CmdResult> {
        commands::tags::remove(&mut self.store, selector, tag, &Local::now())
    }

    pub fn summary(&self, selector: &str, window: SummaryWindow) -> Result<CmdResult> {
        commands::summary::run(&self.store, selector, window, &Local::now())
    }

    pub fn insight<C>(&self, service: &C, selector: &str) -> Result<CmdResult>
    where
        C: CompletionService + ?Sized,
    {
        commands::insight::run(&self.store, service, selector, &Local::now())
    }

    pub fn share_text(&self, selector: &str, insight_text: &str) -> Result<CmdResult> {
        commands::export::run(&self.store, selector, insight_text, &Local::now())
    }

    /// The welcome text on the very first run, `None` afterwards.
    pub fn intro(&self) -> Result<Option<&'static str>> {
        commands::intro::check(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}
