//! # Command Layer
//!
//! This module contains the **UI-facing operations** of taptalk. Each command lives in
//! its own submodule and is a plain function over the [`ProfileStore`], the aggregation
//! functions and, for insights, a [`CompletionService`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Resolve user selectors (list index, id or name) to profiles
//! - Call the store / aggregator / composer
//! - Return structured [`CmdResult`] values with messages for the UI to render
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or colors
//! - **Argument parsing**: that's the CLI layer's job
//! - **Reading the clock**: `now` is passed in, so tests pin it
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemBackend`] and a stub completion service; they check the
//! `CmdResult` contents and what ended up persisted.
//!
//! [`ProfileStore`]: crate::store::ProfileStore
//! [`CompletionService`]: crate::insight::CompletionService
//! [`MemBackend`]: crate::store::mem_backend::MemBackend

use crate::aggregate::{TagCount, TrafficLevel};
use crate::insight::Insight;
use crate::model::Profile;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod insight;
pub mod intro;
pub mod list;
pub mod log;
pub mod summary;
pub mod tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One row of the profile list, with its 1-based display index.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub traffic: TrafficLevel,
    pub log_count: usize,
    pub last_logged_at: Option<DateTime<Utc>>,
}

/// Which part of the conflict log a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryWindow {
    #[default]
    All,
    Week,
    Month,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeSummary {
    pub tag: String,
    pub count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub profile_name: String,
    pub window: SummaryWindow,
    pub today_count: usize,
    pub traffic: TrafficLevel,
    pub top_theme: Option<TagCount>,
    pub themes: Vec<ThemeSummary>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_profiles: Vec<Profile>,
    pub listed_profiles: Vec<ProfileOverview>,
    pub summary: Option<ProfileSummary>,
    pub insight: Option<Insight>,
    pub share_text: Option<String>,
    pub config: Vec<(String, Option<String>)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_profiles(mut self, profiles: Vec<ProfileOverview>) -> Self {
        self.listed_profiles = profiles;
        self
    }
}
