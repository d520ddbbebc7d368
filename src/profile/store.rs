//! Profile Store
//!
//! SQLite-backed persistence for profile documents plus an append-only
//! activity timeline. Profiles are stored as JSON rows keyed by user id so
//! the loose document shape survives round-trips unchanged. Analysis
//! results are never written here - they are recomputed on every request.

use super::types::ProfileRecord;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("profile serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================
// ACTIVITY EVENTS
// ============================================================

/// Types of events recorded on the profile activity timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileEventType {
    ProfileCreated,
    ProfileUpdated,
    AnalysisRun,
    PromptComposed,
    SuggestionServed,
}

impl ProfileEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileEventType::ProfileCreated => "profile_created",
            ProfileEventType::ProfileUpdated => "profile_updated",
            ProfileEventType::AnalysisRun => "analysis_run",
            ProfileEventType::PromptComposed => "prompt_composed",
            ProfileEventType::SuggestionServed => "suggestion_served",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "profile_created" => Some(ProfileEventType::ProfileCreated),
            "profile_updated" => Some(ProfileEventType::ProfileUpdated),
            "analysis_run" => Some(ProfileEventType::AnalysisRun),
            "prompt_composed" => Some(ProfileEventType::PromptComposed),
            "suggestion_served" => Some(ProfileEventType::SuggestionServed),
            _ => None,
        }
    }
}

/// A single event on a user's profile timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEvent {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: ProfileEventType,
    pub description: String,
}

impl ProfileEvent {
    pub fn new(user_id: &str, event_type: ProfileEventType, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            event_type,
            description: description.to_string(),
        }
    }
}

/// A user's full activity timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileActivity {
    pub user_id: String,
    pub timeline: Vec<ProfileEvent>,
}

// ============================================================
// PROFILE STORE (SQLite-backed)
// ============================================================

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS profiles (
        user_id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS profile_events (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        event_type TEXT NOT NULL,
        description TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_events_user_id ON profile_events(user_id);
    CREATE INDEX IF NOT EXISTS idx_events_timestamp ON profile_events(timestamp);
";

/// SQLite-backed profile and activity store
pub struct ProfileStore {
    conn: Arc<Mutex<Connection>>,
}

impl ProfileStore {
    /// Open (or create) the store at the given path.
    pub fn new(db_path: Option<PathBuf>) -> StoreResult<Self> {
        let path = db_path.unwrap_or_else(|| PathBuf::from("workforce_profiles.db"));
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store for testing
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert or replace a user's profile document. Returns true when the
    /// profile already existed (update rather than create).
    pub fn upsert_profile(&self, user_id: &str, profile: &ProfileRecord) -> StoreResult<bool> {
        let data = serde_json::to_string(profile)?;
        let conn = self.conn.lock().unwrap();
        let existed: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM profiles WHERE user_id = ?1",
                [user_id],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n > 0)?;
        conn.execute(
            "INSERT INTO profiles (user_id, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET data = ?2, updated_at = ?3",
            params![user_id, data, Utc::now().to_rfc3339()],
        )?;
        Ok(existed)
    }

    /// Fetch a user's profile, if one has been stored.
    pub fn get_profile(&self, user_id: &str) -> StoreResult<Option<ProfileRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT data FROM profiles WHERE user_id = ?1")?;
        let mut rows = stmt.query([user_id])?;
        match rows.next()? {
            Some(row) => {
                let data: String = row.get(0)?;
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }

    /// Append an event to the activity timeline
    pub fn record_event(&self, event: &ProfileEvent) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO profile_events (id, user_id, timestamp, event_type, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.user_id,
                event.timestamp.to_rfc3339(),
                event.event_type.as_str(),
                event.description,
            ],
        )?;
        Ok(())
    }

    /// Get a user's full activity timeline, oldest first
    pub fn get_activity(&self, user_id: &str) -> StoreResult<ProfileActivity> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, timestamp, event_type, description
             FROM profile_events
             WHERE user_id = ?1
             ORDER BY timestamp ASC",
        )?;

        let events = stmt.query_map([user_id], |row| {
            let timestamp_str: String = row.get(2)?;
            let event_type_str: String = row.get(3)?;
            Ok(ProfileEvent {
                id: row.get(0)?,
                user_id: row.get(1)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                event_type: ProfileEventType::from_str(&event_type_str)
                    .unwrap_or(ProfileEventType::ProfileUpdated),
                description: row.get(4)?,
            })
        })?;

        let timeline: Vec<ProfileEvent> = events.filter_map(|e| e.ok()).collect();
        Ok(ProfileActivity {
            user_id: user_id.to_string(),
            timeline,
        })
    }
}

// ============================================================
// HELPER FUNCTIONS
// ============================================================

/// Record a profile create/update event
pub fn record_profile_saved(store: &ProfileStore, user_id: &str, updated: bool) -> StoreResult<()> {
    let event = if updated {
        ProfileEvent::new(user_id, ProfileEventType::ProfileUpdated, "Profile updated")
    } else {
        ProfileEvent::new(user_id, ProfileEventType::ProfileCreated, "Profile created")
    };
    store.record_event(&event)
}

/// Record an analysis run with its headline result
pub fn record_analysis_run(store: &ProfileStore, user_id: &str, percentage: u8) -> StoreResult<()> {
    let event = ProfileEvent::new(
        user_id,
        ProfileEventType::AnalysisRun,
        &format!("Analyzed profile: {}% complete", percentage),
    );
    store.record_event(&event)
}

/// Record that a profile-aware prompt was composed for the chat
pub fn record_prompt_composed(store: &ProfileStore, user_id: &str) -> StoreResult<()> {
    let event = ProfileEvent::new(
        user_id,
        ProfileEventType::PromptComposed,
        "Composed profile-aware chat prompt",
    );
    store.record_event(&event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_roundtrip() {
        let store = ProfileStore::in_memory().unwrap();
        let profile = ProfileRecord {
            name: Some("Alice".into()),
            skills: vec!["Rust".into()],
            ..Default::default()
        };

        let existed = store.upsert_profile("u1", &profile).unwrap();
        assert!(!existed);
        let loaded = store.get_profile("u1").unwrap().unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Alice"));
        assert_eq!(loaded.skills.len(), 1);

        // Second save is an update
        let existed = store.upsert_profile("u1", &profile).unwrap();
        assert!(existed);
        assert!(store.get_profile("nobody").unwrap().is_none());
    }

    #[test]
    fn test_activity_timeline() {
        let store = ProfileStore::in_memory().unwrap();
        record_profile_saved(&store, "u1", false).unwrap();
        record_analysis_run(&store, "u1", 50).unwrap();
        record_prompt_composed(&store, "u1").unwrap();

        let activity = store.get_activity("u1").unwrap();
        assert_eq!(activity.timeline.len(), 3);
        assert_eq!(activity.timeline[0].event_type, ProfileEventType::ProfileCreated);
        assert_eq!(activity.timeline[1].event_type, ProfileEventType::AnalysisRun);
        assert!(activity.timeline[1].description.contains("50%"));

        // Other users see an empty timeline
        assert!(store.get_activity("u2").unwrap().timeline.is_empty());
    }
}
