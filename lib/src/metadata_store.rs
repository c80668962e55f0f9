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

//! The relational store behind the snapshot engine.

use std::fmt::{Debug, Formatter};

use thiserror::Error;

use crate::repo_path::RepoPathBuf;

/// Identifies a commit row. A zero id never refers to a stored commit; the
/// engine uses it to signal that no commit could be allocated.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CommitId(i64);

impl Debug for CommitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CommitId").field(&self.0).finish()
    }
}

impl CommitId {
    pub fn new(value: i64) -> Self {
        CommitId(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Identifies an entry row: the stable identity of one relative path.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EntryId(i64);

impl Debug for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EntryId").field(&self.0).finish()
    }
}

impl EntryId {
    pub fn new(value: i64) -> Self {
        EntryId(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

/// Identifies an entry-history row: one recorded version of one path.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HistoryId(i64);

impl Debug for HistoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HistoryId").field(&self.0).finish()
    }
}

impl HistoryId {
    pub fn new(value: i64) -> Self {
        HistoryId(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

/// A commit row as stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitRecord {
    pub id: CommitId,
    pub message: String,
    pub author: String,
    /// Seconds since the Unix epoch, captured once at the start of the
    /// backup that created this commit.
    pub timestamp: i64,
}

/// The most recent recorded version of a path, as found by
/// [`MetadataStore::latest_history()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistoryRef {
    pub entry_id: EntryId,
    pub history_id: HistoryId,
    pub timestamp: i64,
}

/// One path bound into a commit, with the timestamp of the version the
/// commit references (which addresses the backup artifact).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitEntry {
    pub path: RepoPathBuf,
    pub timestamp: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open metadata store")]
    OpenStore {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Metadata query failed")]
    Query {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error(r#"Stored relative path "{path}" is not valid"#)]
    CorruptPath { path: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Relational persistence of commits, path identities, per-path history
/// rows, and commit membership. This is the only query surface the snapshot
/// engine uses; implementations may be backed by any store that preserves
/// the invariants (append-only history, unique live path per entry, at most
/// one snapshot row per commit and entry).
pub trait MetadataStore {
    /// Creates the schema if it does not exist yet.
    fn init_schema(&mut self) -> StoreResult<()>;

    /// Starts the transaction wrapping the metadata writes of one backup.
    fn begin_transaction(&mut self) -> StoreResult<()>;

    fn commit_transaction(&mut self) -> StoreResult<()>;

    fn rollback_transaction(&mut self) -> StoreResult<()>;

    /// Inserts a commit row and returns its id, or `None` if the store did
    /// not hand one back.
    fn insert_commit(
        &mut self,
        message: &str,
        author: &str,
        timestamp: i64,
    ) -> StoreResult<Option<CommitId>>;

    /// Finds the most recent recorded version of `path` across all commits,
    /// newest timestamp first. Ties between equal timestamps may resolve to
    /// any one of them.
    fn latest_history(&mut self, path: &RepoPathBuf) -> StoreResult<Option<HistoryRef>>;

    /// Inserts a new entry row for a path observed for the first time.
    fn insert_entry(&mut self, path: &RepoPathBuf) -> StoreResult<Option<EntryId>>;

    /// Appends a new version row for `entry_id`.
    fn insert_history(
        &mut self,
        entry_id: EntryId,
        is_directory: bool,
        file_size: u64,
        timestamp: i64,
    ) -> StoreResult<Option<HistoryId>>;

    /// Binds a version of an entry into a commit.
    fn insert_snapshot(
        &mut self,
        commit_id: CommitId,
        entry_id: EntryId,
        history_id: HistoryId,
    ) -> StoreResult<()>;

    /// Returns commits ordered by descending id, skipping the first `begin`
    /// and taking up to `count`.
    fn commits(&mut self, begin: i64, count: i64) -> StoreResult<Vec<CommitRecord>>;

    /// Returns every path bound into `commit_id` with the timestamp of the
    /// referenced version. Empty for unknown commit ids.
    fn commit_entries(&mut self, commit_id: CommitId) -> StoreResult<Vec<CommitEntry>>;

    /// Classifies every entry present in commit `a` or `b` into the given
    /// flag values: `created_flags` when absent from `a`, `deleted_flags`
    /// when absent from `b`, `modified_flags` when the referenced version
    /// timestamps differ. Unchanged entries are not returned.
    fn compare_commits(
        &mut self,
        a: CommitId,
        b: CommitId,
        created_flags: u64,
        deleted_flags: u64,
        modified_flags: u64,
    ) -> StoreResult<Vec<(RepoPathBuf, u64)>>;
}
