use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tags every new profile starts with.
pub const DEFAULT_TAGS: [&str; 5] = [
    "💰 Money",
    "🧹 Chores",
    "💬 Misunderstanding",
    "🧠 Mental Load",
    "🧍‍♂️ Personal Space",
];

/// One logged moment of tension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    pub timestamp: DateTime<Utc>,
    pub tag: String,
}

impl ConflictEntry {
    pub fn new(tag: impl Into<String>) -> Self {
        Self::at(tag, Utc::now())
    }

    pub fn at(tag: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            tag: tag.into(),
        }
    }
}

/// A tracked person or relationship with its own conflict log and tag vocabulary.
///
/// Field names serialize in camelCase (`createdAt`) to stay compatible with
/// collections written by other TapTalk clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub conflicts: Vec<ConflictEntry>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            conflicts: Vec::new(),
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    pub fn last_logged_at(&self) -> Option<DateTime<Utc>> {
        self.conflicts.last().map(|c| c.timestamp)
    }
}

/// The whole persisted state: every profile, in creation order.
pub type ProfileCollection = Vec<Profile>;
