//! Session store
//!
//! Owns the in-memory session list and its storage-backed lifecycle:
//! loaded (and migrated) once from the key-value store, persisted as a
//! whole after every mutation. Mutations replace whole session/cup
//! records, so a crash mid-operation never leaves a half-written state in
//! memory; the store is single-user and has no cross-process lock, which
//! means two concurrent processes on the same data directory can
//! overwrite each other's writes (accepted limitation).

use serde_json::Value;

use shared::migrate::migrate_session;
use shared::models::{generate_id, now_iso8601, CupScore, Session};

use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStore;

/// Storage key for the serialized session list
pub const SESSIONS_KEY: &str = "sca-cupping-sessions";

/// Storage key for the first-run onboarding flag
pub const FIRST_LAUNCH_KEY: &str = "sca-cupping-app-first-launch";

/// All cupping sessions, newest first
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    sessions: Vec<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Load the session list from storage. Malformed stored JSON is
    /// logged and treated as no data; every record is run through the
    /// schema migration.
    pub fn open(storage: S) -> AppResult<Self> {
        let sessions = match storage.get(SESSIONS_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(values) => values.into_iter().map(migrate_session).collect(),
                Err(err) => {
                    tracing::warn!("failed to parse stored sessions, starting empty: {err}");
                    Vec::new()
                }
            },
        };
        Ok(Self { storage, sessions })
    }

    /// All sessions, newest first
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// The backing key-value store
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn require_mut(&mut self, id: &str) -> AppResult<&mut Session> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id}")))
    }

    /// Create a session with `num_cups` default cups (clamped to 1..=30)
    /// and put it at the front of the list
    pub fn create(
        &mut self,
        title: impl Into<String>,
        num_cups: usize,
        notes: impl Into<String>,
    ) -> AppResult<&Session> {
        let session = Session::new(title, num_cups, notes);
        self.sessions.insert(0, session);
        self.persist()?;
        Ok(&self.sessions[0])
    }

    /// Replace one cup record wholesale
    pub fn update_cup(&mut self, id: &str, index: usize, cup: CupScore) -> AppResult<()> {
        let session = self.require_mut(id)?;
        if !session.set_cup(index, cup) {
            return Err(AppError::Validation(format!(
                "cup index {index} is outside the flight"
            )));
        }
        self.persist()
    }

    /// Mark a session complete (terminal-state flag; the record itself
    /// stays editable)
    pub fn finish(&mut self, id: &str) -> AppResult<()> {
        self.require_mut(id)?.is_complete = true;
        self.persist()
    }

    /// Update title and notes. The current entry flow never resizes a
    /// flight; see [`SessionStore::resize_cups`] for the legacy edit path.
    pub fn update_details(
        &mut self,
        id: &str,
        title: impl Into<String>,
        notes: impl Into<String>,
    ) -> AppResult<()> {
        let session = self.require_mut(id)?;
        session.title = title.into();
        session.session_notes = notes.into();
        self.persist()
    }

    /// Resize a session's flight (legacy edit flow): grows with default
    /// cups, shrinks by discarding the tail irreversibly
    pub fn resize_cups(&mut self, id: &str, num_cups: usize) -> AppResult<()> {
        self.require_mut(id)?.resize_cups(num_cups);
        self.persist()
    }

    pub fn delete(&mut self, id: &str) -> AppResult<()> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Err(AppError::NotFound(format!("Session {id}")));
        }
        self.persist()
    }

    /// Import a session from an external JSON document.
    ///
    /// The document must be an object carrying an `id` and an array-typed
    /// `cupScores`; anything else is rejected with no effect. Accepted
    /// documents get a fresh id and current date, `isComplete` defaults
    /// to false, and every cup record is run through the schema migration
    /// so a legacy export lands in the current schema.
    pub fn import(&mut self, raw: &str) -> AppResult<&Session> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| AppError::InvalidImport(format!("not valid JSON: {err}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| AppError::InvalidImport("expected a top-level object".to_string()))?;
        if !object.contains_key("id") {
            return Err(AppError::InvalidImport("missing id field".to_string()));
        }
        if !object.get("cupScores").is_some_and(Value::is_array) {
            return Err(AppError::InvalidImport(
                "cupScores must be an array".to_string(),
            ));
        }

        let mut session = migrate_session(value);
        session.id = generate_id();
        session.date = now_iso8601();
        self.sessions.insert(0, session);
        self.persist()?;
        Ok(&self.sessions[0])
    }

    fn persist(&mut self) -> AppResult<()> {
        let json = serde_json::to_string(&self.sessions)?;
        self.storage.set(SESSIONS_KEY, &json)
    }
}

/// First-run onboarding flag: set once the app has been opened
pub fn is_first_launch(storage: &impl KeyValueStore) -> AppResult<bool> {
    Ok(storage.get(FIRST_LAUNCH_KEY)?.is_none())
}

pub fn mark_launched(storage: &mut impl KeyValueStore) -> AppResult<()> {
    storage.set(FIRST_LAUNCH_KEY, "true")
}
