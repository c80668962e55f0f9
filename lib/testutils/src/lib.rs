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

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools as _;
use localgit_lib::metadata_store::CommitId;
use localgit_lib::repo::Repo;
use localgit_lib::repo_path::RepoPathBuf;
use tempfile::TempDir;

pub fn new_temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("localgit-test-")
        .tempdir()
        .unwrap()
}

/// A repository in a fresh temporary working root. The temp directory is
/// removed when this value is dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    pub repo: Repo,
    next_timestamp: i64,
}

impl TestRepo {
    pub fn init() -> Self {
        let temp_dir = new_temp_dir();
        let repo = Repo::init(temp_dir.path()).unwrap();
        TestRepo {
            _temp_dir: temp_dir,
            repo,
            next_timestamp: 1_600_000_000,
        }
    }

    /// Runs a backup with a fixed, strictly increasing commit timestamp, so
    /// that each commit gets its own artifact directory no matter how fast
    /// the test runs.
    pub fn backup(&mut self, message: &str, author: &str) -> CommitId {
        self.next_timestamp += 1;
        self.repo
            .backup_at(message, author, self.next_timestamp)
            .unwrap()
    }

    pub fn workspace_root(&self) -> &Path {
        self.repo.workspace_root()
    }

    /// Absolute path of a `/`-separated workspace-relative path.
    pub fn disk_path(&self, relative_path: &str) -> PathBuf {
        repo_path(relative_path).to_fs_path(self.repo.workspace_root())
    }

    /// Writes a file at the given workspace-relative path, creating parent
    /// directories as needed.
    pub fn write_file(&self, relative_path: &str, contents: &[u8]) {
        let disk_path = self.disk_path(relative_path);
        fs::create_dir_all(disk_path.parent().unwrap()).unwrap();
        fs::write(&disk_path, contents).unwrap();
    }

    pub fn read_file(&self, relative_path: &str) -> Vec<u8> {
        fs::read(self.disk_path(relative_path)).unwrap()
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.disk_path(relative_path)).unwrap();
    }

    pub fn remove(&self, relative_path: &str) {
        let disk_path = self.disk_path(relative_path);
        if disk_path.is_dir() {
            fs::remove_dir_all(&disk_path).unwrap();
        } else {
            fs::remove_file(&disk_path).unwrap();
        }
    }

    /// The set of workspace-relative paths currently on disk, excluding the
    /// repository metadata directory.
    pub fn tree_paths(&self) -> HashSet<String> {
        let mut paths = HashSet::new();
        collect_paths(
            self.repo.workspace_root(),
            self.repo.workspace_root(),
            self.repo.repo_path(),
            &mut paths,
        );
        paths
    }
}

fn collect_paths(root: &Path, dir: &Path, exclude: &Path, paths: &mut HashSet<String>) {
    for dir_entry in fs::read_dir(dir).unwrap() {
        let path = dir_entry.unwrap().path();
        if path.starts_with(exclude) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap();
        paths.insert(
            relative
                .components()
                .map(|c| c.as_os_str().to_str().unwrap())
                .join("/"),
        );
        if path.is_dir() {
            collect_paths(root, &path, exclude, paths);
        }
    }
}

pub fn repo_path(value: &str) -> RepoPathBuf {
    RepoPathBuf::from_internal_string(value).unwrap()
}

/// Checks that all test files in `test_dir` are declared as modules of the
/// runner test binary, so that no test file is silently left out of the
/// build.
pub fn assert_no_forgotten_test_files(test_dir: &Path) {
    let runner_path = test_dir.join("runner.rs");
    let runner_contents = fs::read_to_string(runner_path).unwrap();
    let declared_mods: HashSet<String> = runner_contents
        .lines()
        .filter_map(|line| {
            line.strip_prefix("mod ")
                .and_then(|rest| rest.strip_suffix(';'))
                .map(|name| name.to_owned())
        })
        .collect();

    for dir_entry in fs::read_dir(test_dir).unwrap() {
        let path = dir_entry.unwrap().path();
        if path.extension() != Some("rs".as_ref()) {
            continue;
        }
        let name = path.file_stem().unwrap().to_str().unwrap();
        if name == "runner" {
            continue;
        }
        assert!(
            declared_mods.contains(name),
            "test file {name}.rs is not declared in runner.rs"
        );
    }
}
