// Copyright 2025 The LocalGit Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [`MetadataStore`] backed by an embedded SQLite database.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::metadata_store::{
    CommitEntry, CommitId, CommitRecord, EntryId, HistoryId, HistoryRef, MetadataStore,
    StoreError, StoreResult,
};
use crate::repo_path::RepoPathBuf;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "entry" (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    relative_path TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS "entry_history" (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    entry_id INTEGER DEFAULT(0) NOT NULL,
    is_directory INTEGER DEFAULT(0) NOT NULL,
    file_size INTEGER DEFAULT(0) NOT NULL,
    "timestamp" INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS "commit" (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    message TEXT DEFAULT ('') NOT NULL,
    author TEXT DEFAULT ('anonymous') NOT NULL,
    "timestamp" INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS "commit_snapshot" (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    commit_id INTEGER DEFAULT(0) NOT NULL,
    entry_id INTEGER DEFAULT(0) NOT NULL,
    history_id INTEGER DEFAULT(0) NOT NULL
);
"#;

const LATEST_HISTORY_SQL: &str = r#"
SELECT e.id, eh.id, eh."timestamp"
FROM commit_snapshot cs
JOIN entry e ON cs.entry_id = e.id
JOIN entry_history eh ON cs.history_id = eh.id
WHERE e.relative_path = ?1
ORDER BY eh."timestamp" DESC
LIMIT 1
"#;

const COMMIT_ENTRIES_SQL: &str = r#"
SELECT e.relative_path, eh."timestamp"
FROM commit_snapshot cs
JOIN entry e ON cs.entry_id = e.id
JOIN entry_history eh ON cs.history_id = eh.id
WHERE cs.commit_id = ?1
"#;

// Classifies each entry by left-joining its per-commit version timestamps.
// The CASE order matters: an entry missing from the first commit is created,
// then missing from the second is deleted, then differing timestamps mean
// modified. The flag values are bound as parameters so the caller controls
// the encoding.
const COMPARE_COMMITS_SQL: &str = r#"
SELECT relative_path, action FROM (
    SELECT
        e.relative_path AS relative_path,
        CASE
            WHEN ccs1."timestamp" IS NULL THEN ?1
            WHEN ccs2."timestamp" IS NULL THEN ?2
            WHEN ccs1."timestamp" <> ccs2."timestamp" THEN ?3
            ELSE 0
        END AS action
    FROM entry e
    LEFT JOIN (
        SELECT cs1.entry_id, eh1."timestamp"
        FROM commit_snapshot cs1
        JOIN entry_history eh1 ON cs1.history_id = eh1.id
        WHERE cs1.commit_id = ?4
    ) AS ccs1 ON e.id = ccs1.entry_id
    LEFT JOIN (
        SELECT cs2.entry_id, eh2."timestamp"
        FROM commit_snapshot cs2
        JOIN entry_history eh2 ON cs2.history_id = eh2.id
        WHERE cs2.commit_id = ?5
    ) AS ccs2 ON e.id = ccs2.entry_id
    WHERE ccs1."timestamp" IS NOT NULL OR ccs2."timestamp" IS NOT NULL
) WHERE action <> 0
"#;

/// SQLite-backed metadata store. One connection, owned for the lifetime of
/// the repository session.
pub struct SqliteStore {
    connection: Connection,
}

fn open_error(source: rusqlite::Error) -> StoreError {
    StoreError::OpenStore {
        source: source.into(),
    }
}

fn query_error(source: rusqlite::Error) -> StoreError {
    StoreError::Query {
        source: source.into(),
    }
}

fn decode_path(value: String) -> StoreResult<RepoPathBuf> {
    RepoPathBuf::from_internal_string(value.clone())
        .map_err(|_| StoreError::CorruptPath { path: value })
}

impl SqliteStore {
    /// Opens (creating if needed) the database file at `db_path`.
    pub fn open(db_path: &Path) -> StoreResult<Self> {
        let connection = Connection::open(db_path).map_err(open_error)?;
        Ok(SqliteStore { connection })
    }
}

impl MetadataStore for SqliteStore {
    fn init_schema(&mut self) -> StoreResult<()> {
        self.connection
            .execute_batch(SCHEMA_SQL)
            .map_err(query_error)
    }

    fn begin_transaction(&mut self) -> StoreResult<()> {
        self.connection
            .execute_batch("BEGIN TRANSACTION")
            .map_err(query_error)
    }

    fn commit_transaction(&mut self) -> StoreResult<()> {
        self.connection
            .execute_batch("COMMIT TRANSACTION")
            .map_err(query_error)
    }

    fn rollback_transaction(&mut self) -> StoreResult<()> {
        self.connection
            .execute_batch("ROLLBACK TRANSACTION")
            .map_err(query_error)
    }

    fn insert_commit(
        &mut self,
        message: &str,
        author: &str,
        timestamp: i64,
    ) -> StoreResult<Option<CommitId>> {
        self.connection
            .query_row(
                r#"INSERT INTO "commit"(message, author, "timestamp") VALUES (?1, ?2, ?3)
                   RETURNING id"#,
                params![message, author, timestamp],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(query_error)
            .map(|id| id.map(CommitId::new))
    }

    fn latest_history(&mut self, path: &RepoPathBuf) -> StoreResult<Option<HistoryRef>> {
        self.connection
            .query_row(LATEST_HISTORY_SQL, params![path.as_internal_str()], |row| {
                Ok(HistoryRef {
                    entry_id: EntryId::new(row.get(0)?),
                    history_id: HistoryId::new(row.get(1)?),
                    timestamp: row.get(2)?,
                })
            })
            .optional()
            .map_err(query_error)
    }

    fn insert_entry(&mut self, path: &RepoPathBuf) -> StoreResult<Option<EntryId>> {
        self.connection
            .query_row(
                "INSERT INTO entry(relative_path) VALUES (?1) RETURNING id",
                params![path.as_internal_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(query_error)
            .map(|id| id.map(EntryId::new))
    }

    fn insert_history(
        &mut self,
        entry_id: EntryId,
        is_directory: bool,
        file_size: u64,
        timestamp: i64,
    ) -> StoreResult<Option<HistoryId>> {
        self.connection
            .query_row(
                r#"INSERT INTO entry_history(entry_id, is_directory, file_size, "timestamp")
                   VALUES (?1, ?2, ?3, ?4) RETURNING id"#,
                params![
                    entry_id.value(),
                    is_directory as i64,
                    file_size as i64,
                    timestamp
                ],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(query_error)
            .map(|id| id.map(HistoryId::new))
    }

    fn insert_snapshot(
        &mut self,
        commit_id: CommitId,
        entry_id: EntryId,
        history_id: HistoryId,
    ) -> StoreResult<()> {
        self.connection
            .execute(
                "INSERT INTO commit_snapshot(commit_id, entry_id, history_id) VALUES (?1, ?2, ?3)",
                params![commit_id.value(), entry_id.value(), history_id.value()],
            )
            .map_err(query_error)?;
        Ok(())
    }

    fn commits(&mut self, begin: i64, count: i64) -> StoreResult<Vec<CommitRecord>> {
        let mut statement = self
            .connection
            .prepare_cached(
                r#"SELECT id, message, author, "timestamp" FROM "commit"
                   ORDER BY id DESC LIMIT ?1 OFFSET ?2"#,
            )
            .map_err(query_error)?;
        let rows = statement
            .query_map(params![count, begin], |row| {
                Ok(CommitRecord {
                    id: CommitId::new(row.get(0)?),
                    message: row.get(1)?,
                    author: row.get(2)?,
                    timestamp: row.get(3)?,
                })
            })
            .map_err(query_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }

    fn commit_entries(&mut self, commit_id: CommitId) -> StoreResult<Vec<CommitEntry>> {
        let mut statement = self
            .connection
            .prepare_cached(COMMIT_ENTRIES_SQL)
            .map_err(query_error)?;
        let rows = statement
            .query_map(params![commit_id.value()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(query_error)?;
        let rows = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error)?;
        rows.into_iter()
            .map(|(path, timestamp)| {
                Ok(CommitEntry {
                    path: decode_path(path)?,
                    timestamp,
                })
            })
            .collect()
    }

    fn compare_commits(
        &mut self,
        a: CommitId,
        b: CommitId,
        created_flags: u64,
        deleted_flags: u64,
        modified_flags: u64,
    ) -> StoreResult<Vec<(RepoPathBuf, u64)>> {
        let mut statement = self
            .connection
            .prepare_cached(COMPARE_COMMITS_SQL)
            .map_err(query_error)?;
        let rows = statement
            .query_map(
                params![
                    created_flags as i64,
                    deleted_flags as i64,
                    modified_flags as i64,
                    a.value(),
                    b.value()
                ],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .map_err(query_error)?;
        let rows = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error)?;
        rows.into_iter()
            .map(|(path, action)| Ok((decode_path(path)?, action as u64)))
            .collect()
    }
}
