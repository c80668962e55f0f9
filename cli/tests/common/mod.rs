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

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

/// A hermetic environment for driving the `localgit` binary: a temporary
/// working root, and HOME pointed away from the developer's real config.
pub struct TestEnvironment {
    _temp_dir: TempDir,
    home_dir: PathBuf,
    root: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = testutils::new_temp_dir();
        let home_dir = temp_dir.path().join("home");
        fs::create_dir(&home_dir).unwrap();
        let root = temp_dir.path().join("repo");
        fs::create_dir(&root).unwrap();
        TestEnvironment {
            _temp_dir: temp_dir,
            home_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn localgit(&self, args: &[&str]) -> Output {
        assert_cmd::Command::cargo_bin("localgit")
            .unwrap()
            .current_dir(&self.root)
            .env_clear()
            .env("HOME", &self.home_dir)
            .env("XDG_CONFIG_HOME", self.home_dir.join(".config"))
            .args(args)
            .output()
            .unwrap()
    }

    /// Runs the binary, asserts success, and returns (stdout, stderr).
    pub fn run_ok(&self, args: &[&str]) -> (String, String) {
        let output = self.localgit(args);
        let stdout = String::from_utf8(output.stdout).unwrap();
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(
            output.status.success(),
            "localgit {args:?} failed:\nstdout: {stdout}\nstderr: {stderr}"
        );
        (stdout, stderr)
    }

    pub fn write_file(&self, relative_path: &str, contents: &[u8]) {
        let path = self.root.join(relative_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn read_file(&self, relative_path: &str) -> Vec<u8> {
        fs::read(self.root.join(relative_path)).unwrap()
    }

    pub fn remove_file(&self, relative_path: &str) {
        fs::remove_file(self.root.join(relative_path)).unwrap();
    }
}
