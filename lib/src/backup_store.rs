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

//! On-disk storage of file content captured by backups.

use std::path::{Path, PathBuf};

use crate::file_util::{self, PathError};
use crate::repo_path::RepoPathBuf;

/// The backup artifact tree under the repository metadata directory. Each
/// commit that introduced at least one change owns a subtree named after the
/// commit timestamp (as a decimal string); inside it the relative path from
/// the working root is replicated verbatim.
#[derive(Clone, Debug)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    pub fn new(root: PathBuf) -> Self {
        BackupStore { root }
    }

    /// The directory holding the artifacts of the commit with the given
    /// timestamp. It is not created until an artifact needs it.
    pub fn commit_dir(&self, timestamp: i64) -> PathBuf {
        self.root.join(timestamp.to_string())
    }

    /// The artifact location for `path` in the commit with the given
    /// timestamp. The artifact may or may not exist on disk.
    pub fn artifact_path(&self, timestamp: i64, path: &RepoPathBuf) -> PathBuf {
        path.to_fs_path(&self.commit_dir(timestamp))
    }

    /// Copies the file at `src` into the artifact location for `path`,
    /// creating the per-commit directory and any parents as needed.
    pub fn store_file(
        &self,
        timestamp: i64,
        path: &RepoPathBuf,
        src: &Path,
    ) -> Result<PathBuf, PathError> {
        let artifact = self.artifact_path(timestamp, path);
        file_util::copy_file(src, &artifact)?;
        Ok(artifact)
    }

    /// Records a directory artifact for `path`.
    pub fn store_dir(&self, timestamp: i64, path: &RepoPathBuf) -> Result<PathBuf, PathError> {
        let artifact = self.artifact_path(timestamp, path);
        std::fs::create_dir_all(&artifact).map_err(|error| PathError {
            path: artifact.clone(),
            source: error,
        })?;
        Ok(artifact)
    }
}
