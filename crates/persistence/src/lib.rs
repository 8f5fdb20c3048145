// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Congregation Rota System.
//!
//! The primary store is a `SQLite`-backed document store: one table mapping
//! `(collection, key)` to a JSON document body. This mirrors the reference
//! system's storage shape (keyed document collections) while keeping the
//! durability and in-memory test story of `SQLite`.
//!
//! An in-memory database (`SqliteStore::open_in_memory`) backs unit and
//! integration tests; no external infrastructure is required.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod mirror;

pub use error::PersistenceError;
pub use mirror::{JsonDirMirror, Mirror};

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Document collection names.
pub mod collections {
    /// The member roster, one document per member keyed by member id.
    pub const MEMBERS: &str = "members";
    /// Archived month schedules keyed by `YYYY-MM`.
    pub const SCHEDULES: &str = "schedules";
    /// The working-copy cache of the active schedule (single document).
    pub const SCHEDULE_CACHE: &str = "schedule_cache";
    /// Public-meeting assignment months keyed by `YYYY-MM`.
    pub const PUBLIC_MEETINGS: &str = "public_meetings";
    /// Midweek program months keyed by `YYYY-MM`.
    pub const MIDWEEK_PROGRAMS: &str = "midweek_programs";
    /// Field-service months keyed by `YYYY-MM`.
    pub const FIELD_SERVICE: &str = "field_service";
    /// The field-service weekly template (single document).
    pub const FIELD_SERVICE_TEMPLATE: &str = "field_service_template";
    /// Managed field-service modality list (single document).
    pub const FIELD_SERVICE_MODALITIES: &str = "field_service_modalities";
    /// Managed field-service base location list (single document).
    pub const FIELD_SERVICE_LOCATIONS: &str = "field_service_locations";

    /// Every collection, for cascading clears.
    pub const ALL: &[&str] = &[
        MEMBERS,
        SCHEDULES,
        SCHEDULE_CACHE,
        PUBLIC_MEETINGS,
        MIDWEEK_PROGRAMS,
        FIELD_SERVICE,
        FIELD_SERVICE_TEMPLATE,
        FIELD_SERVICE_MODALITIES,
        FIELD_SERVICE_LOCATIONS,
    ];
}

/// Key of the single-document collections.
pub const SINGLETON_KEY: &str = "current";

/// The `SQLite`-backed document store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) a file-backed store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)
            .map_err(|err| PersistenceError::DatabaseConnectionFailed(err.to_string()))?;
        info!(path = %path.display(), "Opened document store");
        Self::initialize(conn)
    }

    /// Opens a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()
            .map_err(|err| PersistenceError::DatabaseConnectionFailed(err.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                key        TEXT NOT NULL,
                body       TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            );",
        )
        .map_err(|err| PersistenceError::InitializationError(err.to_string()))?;
        debug!("Initialized documents table");
        Ok(Self { conn })
    }

    /// Creates or replaces one document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn put<T: Serialize>(
        &self,
        collection: &str,
        key: &str,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let body = serde_json::to_string(value)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO documents (collection, key, body) VALUES (?1, ?2, ?3)",
                params![collection, key, body],
            )
            .map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;
        Ok(())
    }

    /// Reads one document, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or deserialization fails.
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<T>, PersistenceError> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;
        match body {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Reads a whole collection in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or deserialization fails.
    pub fn get_all<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, T)>, PersistenceError> {
        let mut statement = self
            .conn
            .prepare("SELECT key, body FROM documents WHERE collection = ?1 ORDER BY key")
            .map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;
        let rows = statement
            .query_map(params![collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;

        let mut documents: Vec<(String, T)> = Vec::new();
        for row in rows {
            let (key, raw) = row.map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;
            documents.push((key, serde_json::from_str(&raw)?));
        }
        Ok(documents)
    }

    /// Deletes one document. Returns whether a document was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, collection: &str, key: &str) -> Result<bool, PersistenceError> {
        let affected = self
            .conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
            )
            .map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;
        Ok(affected > 0)
    }

    /// Deletes a whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn wipe(&self, collection: &str) -> Result<(), PersistenceError> {
        self.conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1",
                params![collection],
            )
            .map_err(|err| PersistenceError::QueryFailed(err.to_string()))?;
        Ok(())
    }
}

/// Typed access to the member roster collection.
pub mod roster {
    use super::{PersistenceError, SqliteStore, collections};
    use rota_domain::Member;

    /// Loads the full roster, sorted by member name.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load(store: &SqliteStore) -> Result<Vec<Member>, PersistenceError> {
        let mut members: Vec<Member> = store
            .get_all::<Member>(collections::MEMBERS)?
            .into_iter()
            .map(|(_, member)| member)
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(members)
    }

    /// Replaces the full roster. There is no partial-patch path: the whole
    /// list is rewritten, matching the roster provider contract.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub fn replace(store: &SqliteStore, members: &[Member]) -> Result<(), PersistenceError> {
        store.wipe(collections::MEMBERS)?;
        for member in members {
            store.put(collections::MEMBERS, member.id.value(), member)?;
        }
        tracing::debug!(member_count = members.len(), "Replaced member roster");
        Ok(())
    }
}

/// Typed access to the schedule archive collection.
pub mod schedules {
    use super::{PersistenceError, SqliteStore, collections};
    use rota::MonthSchedule;
    use rota_domain::MonthKey;

    /// Loads every archived schedule in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load_all(store: &SqliteStore) -> Result<Vec<MonthSchedule>, PersistenceError> {
        Ok(store
            .get_all::<MonthSchedule>(collections::SCHEDULES)?
            .into_iter()
            .map(|(_, schedule)| schedule)
            .collect())
    }

    /// Loads one archived schedule, `None` when the month was never saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn load(
        store: &SqliteStore,
        key: MonthKey,
    ) -> Result<Option<MonthSchedule>, PersistenceError> {
        store.get(collections::SCHEDULES, &key.to_string())
    }

    /// Archives a schedule under its year-month key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(store: &SqliteStore, schedule: &MonthSchedule) -> Result<(), PersistenceError> {
        store.put(collections::SCHEDULES, &schedule.key.to_string(), schedule)?;
        tracing::debug!(key = %schedule.key, status = %schedule.status, "Archived schedule");
        Ok(())
    }

    /// Removes a month from the archive. Returns whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(store: &SqliteStore, key: MonthKey) -> Result<bool, PersistenceError> {
        store.delete(collections::SCHEDULES, &key.to_string())
    }
}
