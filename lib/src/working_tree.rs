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

//! Enumeration of the working tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::file_util::{IoResultExt as _, PathError};
use crate::repo_path::RepoPathBuf;

/// One regular file or directory found under the working root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkingTreeEntry {
    /// Path relative to the working root.
    pub path: RepoPathBuf,
    /// Absolute path on disk.
    pub disk_path: PathBuf,
    pub is_directory: bool,
    /// Size in bytes; 0 for directories.
    pub file_size: u64,
}

/// Enumerates every regular file and directory under `working_root`,
/// recursively, excluding everything under `exclude_dir` (the repository's
/// own metadata directory). Each path is yielded exactly once; symlinks and
/// other special entries are not versioned and are skipped.
pub fn scan(working_root: &Path, exclude_dir: &Path) -> Result<Vec<WorkingTreeEntry>, PathError> {
    let mut entries = vec![];
    scan_dir(working_root, working_root, exclude_dir, &mut entries)?;
    Ok(entries)
}

fn scan_dir(
    working_root: &Path,
    dir: &Path,
    exclude_dir: &Path,
    entries: &mut Vec<WorkingTreeEntry>,
) -> Result<(), PathError> {
    for dir_entry in fs::read_dir(dir).context(dir)? {
        let dir_entry = dir_entry.context(dir)?;
        let disk_path = dir_entry.path();
        if disk_path.starts_with(exclude_dir) {
            continue;
        }
        let file_type = dir_entry.file_type().context(&disk_path)?;
        // Relative paths under the root are always convertible as long as
        // the names are valid UTF-8; non-convertible names are skipped like
        // other entries the engine does not version.
        let relative = disk_path
            .strip_prefix(working_root)
            .expect("disk_path is always under working_root");
        let Ok(path) = RepoPathBuf::from_relative_path(relative) else {
            continue;
        };
        if file_type.is_dir() {
            entries.push(WorkingTreeEntry {
                path,
                disk_path: disk_path.clone(),
                is_directory: true,
                file_size: 0,
            });
            scan_dir(working_root, &disk_path, exclude_dir, entries)?;
        } else if file_type.is_file() {
            let metadata = dir_entry.metadata().context(&disk_path)?;
            entries.push(WorkingTreeEntry {
                path,
                disk_path,
                is_directory: false,
                file_size: metadata.len(),
            });
        }
    }
    Ok(())
}
