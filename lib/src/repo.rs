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

//! The snapshot engine and repository lifecycle.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use itertools::Itertools as _;
use thiserror::Error;
use tracing::instrument;

use crate::backup_store::BackupStore;
use crate::diff::{Change, ChangeFlags};
use crate::file_util::{self, IoResultExt as _, PathError};
use crate::metadata_store::{CommitId, MetadataStore, StoreError, StoreResult};
use crate::repo_path::RepoPathBuf;
use crate::sqlite_store::SqliteStore;
use crate::working_tree::{self, WorkingTreeEntry};

/// Name of the repository metadata directory under the working root.
pub const REPO_DIR_NAME: &str = ".localgit";

const DB_FILE_NAME: &str = ".db";

const DEFAULT_AUTHOR: &str = "anonymous";

#[derive(Debug, Error)]
pub enum RepoInitError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum RepoLoadError {
    #[error(r#"There is no localgit repo in "{path}""#)]
    NoRepoHere { path: PathBuf },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug, Error)]
pub enum DiffError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Path(#[from] PathError),
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A commit as presented to clients, with the timestamp converted to the
/// local timezone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitInfo {
    pub id: CommitId,
    pub message: String,
    pub author: String,
    pub time: DateTime<Local>,
}

/// An open repository session: the working root plus one handle to the
/// metadata store and one to the backup store, owned for the lifetime of
/// this value.
pub struct Repo {
    workspace_root: PathBuf,
    repo_path: PathBuf,
    store: Box<dyn MetadataStore>,
    backup_store: BackupStore,
}

impl std::fmt::Debug for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("workspace_root", &self.workspace_root)
            .field("repo_path", &self.repo_path)
            .field("backup_store", &self.backup_store)
            .finish_non_exhaustive()
    }
}

impl Repo {
    /// Whether `workspace_root` holds an initialized repository.
    pub fn is_valid(workspace_root: &Path) -> bool {
        let repo_path = workspace_root.join(REPO_DIR_NAME);
        repo_path.is_dir() && repo_path.join(DB_FILE_NAME).is_file()
    }

    /// Creates (or reopens) the repository rooted at `workspace_root`. The
    /// metadata directory and schema are created idempotently.
    pub fn init(workspace_root: &Path) -> Result<Repo, RepoInitError> {
        let workspace_root = workspace_root.canonicalize().context(workspace_root)?;
        let repo_path = workspace_root.join(REPO_DIR_NAME);
        file_util::create_or_reuse_dir(&repo_path).context(&repo_path)?;
        let mut store = SqliteStore::open(&repo_path.join(DB_FILE_NAME))?;
        store.init_schema()?;
        Ok(Repo::new(workspace_root, repo_path, Box::new(store)))
    }

    /// Opens the existing repository rooted at `workspace_root`.
    pub fn load(workspace_root: &Path) -> Result<Repo, RepoLoadError> {
        let workspace_root =
            workspace_root
                .canonicalize()
                .map_err(|_| RepoLoadError::NoRepoHere {
                    path: workspace_root.to_path_buf(),
                })?;
        if !Repo::is_valid(&workspace_root) {
            return Err(RepoLoadError::NoRepoHere {
                path: workspace_root,
            });
        }
        let repo_path = workspace_root.join(REPO_DIR_NAME);
        let mut store = SqliteStore::open(&repo_path.join(DB_FILE_NAME))?;
        store.init_schema()?;
        Ok(Repo::new(workspace_root, repo_path, Box::new(store)))
    }

    fn new(workspace_root: PathBuf, repo_path: PathBuf, store: Box<dyn MetadataStore>) -> Repo {
        let backup_store = BackupStore::new(repo_path.clone());
        Repo {
            workspace_root,
            repo_path,
            store,
            backup_store,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Returns commits ordered by descending id, skipping the first `begin`
    /// and taking up to `count`.
    pub fn list_commits(&mut self, begin: i64, count: i64) -> StoreResult<Vec<CommitInfo>> {
        let records = self.store.commits(begin, count)?;
        Ok(records
            .into_iter()
            .map(|record| CommitInfo {
                id: record.id,
                message: record.message,
                author: record.author,
                time: DateTime::from_timestamp(record.timestamp, 0)
                    .unwrap_or(DateTime::UNIX_EPOCH)
                    .with_timezone(&Local),
            })
            .collect())
    }

    /// Records a new commit of the current working tree, timestamped with
    /// the current time.
    ///
    /// The returned id is zero if the store did not allocate a commit row;
    /// nothing is written in that case. A failure to insert one entry's rows
    /// skips that entry (no snapshot row for it) and the backup continues;
    /// any other failure rolls the whole commit back.
    pub fn backup(&mut self, message: &str, author: &str) -> Result<CommitId, SnapshotError> {
        self.backup_at(message, author, Utc::now().timestamp())
    }

    /// Like [`Repo::backup()`], with an explicit commit timestamp (seconds
    /// since the epoch). The timestamp addresses the backup artifacts of
    /// this commit, so callers that need reproducible runs must hand out
    /// distinct values.
    #[instrument(skip(self))]
    pub fn backup_at(
        &mut self,
        message: &str,
        author: &str,
        timestamp: i64,
    ) -> Result<CommitId, SnapshotError> {
        let author = if author.is_empty() {
            DEFAULT_AUTHOR
        } else {
            author
        };
        self.store.begin_transaction()?;
        match self.backup_in_transaction(message, author, timestamp) {
            Ok(commit_id) => {
                if commit_id.is_zero() {
                    self.store.rollback_transaction()?;
                } else {
                    self.store.commit_transaction()?;
                }
                Ok(commit_id)
            }
            Err(err) => {
                self.store.rollback_transaction().ok();
                Err(err)
            }
        }
    }

    fn backup_in_transaction(
        &mut self,
        message: &str,
        author: &str,
        timestamp: i64,
    ) -> Result<CommitId, SnapshotError> {
        let Some(commit_id) = self.store.insert_commit(message, author, timestamp)? else {
            return Ok(CommitId::new(0));
        };
        let entries = working_tree::scan(&self.workspace_root, &self.repo_path)?;
        for entry in &entries {
            self.backup_entry(commit_id, timestamp, entry)?;
        }
        Ok(commit_id)
    }

    fn backup_entry(
        &mut self,
        commit_id: CommitId,
        timestamp: i64,
        entry: &WorkingTreeEntry,
    ) -> Result<(), SnapshotError> {
        let (entry_id, history_id, should_copy) =
            match self.store.latest_history(&entry.path)? {
                Some(prev) => {
                    let artifact = self.backup_store.artifact_path(prev.timestamp, &entry.path);
                    if file_util::is_modified(&artifact, &entry.disk_path)? {
                        let history_id = match self.store.insert_history(
                            prev.entry_id,
                            entry.is_directory,
                            entry.file_size,
                            timestamp,
                        ) {
                            Ok(Some(id)) => id,
                            Ok(None) => {
                                tracing::warn!(
                                    path = entry.path.as_internal_str(),
                                    "Failed to create history row; skipping entry"
                                );
                                return Ok(());
                            }
                            Err(err) => {
                                tracing::warn!(
                                    ?err,
                                    path = entry.path.as_internal_str(),
                                    "Failed to create history row; skipping entry"
                                );
                                return Ok(());
                            }
                        };
                        (prev.entry_id, history_id, true)
                    } else {
                        (prev.entry_id, prev.history_id, false)
                    }
                }
                None => {
                    let entry_id = match self.store.insert_entry(&entry.path) {
                        Ok(Some(id)) => id,
                        Ok(None) => {
                            tracing::warn!(
                                path = entry.path.as_internal_str(),
                                "Failed to create entry row; skipping entry"
                            );
                            return Ok(());
                        }
                        Err(err) => {
                            tracing::warn!(
                                ?err,
                                path = entry.path.as_internal_str(),
                                "Failed to create entry row; skipping entry"
                            );
                            return Ok(());
                        }
                    };
                    let history_id = match self.store.insert_history(
                        entry_id,
                        entry.is_directory,
                        entry.file_size,
                        timestamp,
                    ) {
                        Ok(Some(id)) => id,
                        Ok(None) => {
                            tracing::warn!(
                                path = entry.path.as_internal_str(),
                                "Failed to create history row; skipping entry"
                            );
                            return Ok(());
                        }
                        Err(err) => {
                            tracing::warn!(
                                ?err,
                                path = entry.path.as_internal_str(),
                                "Failed to create history row; skipping entry"
                            );
                            return Ok(());
                        }
                    };
                    (entry_id, history_id, true)
                }
            };
        self.store.insert_snapshot(commit_id, entry_id, history_id)?;
        if should_copy {
            if entry.is_directory {
                self.backup_store.store_dir(timestamp, &entry.path)?;
            } else {
                self.backup_store
                    .store_file(timestamp, &entry.path, &entry.disk_path)?;
            }
        }
        Ok(())
    }

    /// Maps every path bound into `commit_id` to its backup artifact
    /// location. Empty for unknown commit ids.
    pub fn commit_file_map(
        &mut self,
        commit_id: CommitId,
    ) -> StoreResult<HashMap<RepoPathBuf, PathBuf>> {
        let entries = self.store.commit_entries(commit_id)?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let artifact = self.backup_store.artifact_path(entry.timestamp, &entry.path);
                (entry.path, artifact)
            })
            .collect())
    }

    /// Compares the given commit against the current working tree. Paths
    /// only in the working tree are created, paths only in the commit are
    /// deleted, paths whose content differs are modified. Commit entries
    /// whose backup artifact is missing on disk are skipped.
    #[instrument(skip(self))]
    pub fn compare_with_working_tree(
        &mut self,
        commit_id: CommitId,
    ) -> Result<Vec<Change>, DiffError> {
        let mut file_map = self.commit_file_map(commit_id)?;
        let entries = working_tree::scan(&self.workspace_root, &self.repo_path)?;
        let mut changes = vec![];
        for entry in entries {
            match file_map.remove(&entry.path) {
                None => {
                    changes.push(Change {
                        path: entry.path,
                        flags: ChangeFlags::created(),
                    });
                }
                Some(artifact) => {
                    if !artifact.exists() {
                        continue;
                    }
                    if file_util::is_modified(&artifact, &entry.disk_path)? {
                        changes.push(Change {
                            path: entry.path,
                            flags: ChangeFlags::modified(),
                        });
                    }
                }
            }
        }
        changes.extend(
            file_map
                .into_keys()
                .sorted()
                .map(|path| Change {
                    path,
                    flags: ChangeFlags::deleted(),
                }),
        );
        Ok(changes)
    }

    /// Compares two commits using the metadata store only.
    #[instrument(skip(self))]
    pub fn compare_commits(&mut self, a: CommitId, b: CommitId) -> StoreResult<Vec<Change>> {
        let rows = self.store.compare_commits(
            a,
            b,
            ChangeFlags::created().to_bits(),
            ChangeFlags::deleted().to_bits(),
            ChangeFlags::modified().to_bits(),
        )?;
        Ok(rows
            .into_iter()
            .map(|(path, bits)| Change {
                path,
                flags: ChangeFlags::from_bits(bits),
            })
            .sorted_by(|x, y| x.path.cmp(&y.path))
            .collect())
    }

    /// Rewrites the working tree to match the given commit and returns the
    /// relative paths now present in it. Working-tree entries not in the
    /// commit are removed; commit entries whose backup artifact is missing
    /// are skipped. Re-running from the same commit converges to the same
    /// tree.
    #[instrument(skip(self))]
    pub fn restore(&mut self, commit_id: CommitId) -> Result<Vec<RepoPathBuf>, RestoreError> {
        let mut file_map = self.commit_file_map(commit_id)?;
        let entries = working_tree::scan(&self.workspace_root, &self.repo_path)?;
        let mut restored = vec![];
        for entry in entries {
            match file_map.remove(&entry.path) {
                None => {
                    file_util::remove_entry(&entry.disk_path)?;
                }
                Some(artifact) => {
                    let Some(metadata) = artifact_metadata(&artifact)? else {
                        continue;
                    };
                    if metadata.is_dir() {
                        std::fs::create_dir_all(&entry.disk_path).context(&entry.disk_path)?;
                    } else if file_util::is_modified(&artifact, &entry.disk_path)? {
                        file_util::copy_file(&artifact, &entry.disk_path)?;
                    }
                    restored.push(entry.path);
                }
            }
        }
        for (path, artifact) in file_map
            .into_iter()
            .sorted_by(|(x, _), (y, _)| x.cmp(y))
        {
            let Some(metadata) = artifact_metadata(&artifact)? else {
                continue;
            };
            let disk_path = path.to_fs_path(&self.workspace_root);
            if metadata.is_dir() {
                std::fs::create_dir_all(&disk_path).context(&disk_path)?;
            } else {
                file_util::copy_file(&artifact, &disk_path)?;
            }
            restored.push(path);
        }
        Ok(restored)
    }
}

fn artifact_metadata(artifact: &Path) -> Result<Option<std::fs::Metadata>, PathError> {
    match artifact.metadata() {
        Ok(metadata) => Ok(Some(metadata)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).context(artifact),
    }
}
