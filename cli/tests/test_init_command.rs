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

use crate::common::TestEnvironment;

#[test]
fn test_init() {
    let test_env = TestEnvironment::new();
    let (_stdout, stderr) = test_env.run_ok(&["init"]);
    assert!(stderr.contains("Initialized repo in"), "stderr: {stderr}");
    assert!(test_env.root().join(".localgit").is_dir());
    assert!(test_env.root().join(".localgit").join(".db").is_file());

    // Initializing again is harmless.
    test_env.run_ok(&["init"]);
}

#[test]
fn test_init_destination() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init", "nested"]);
    assert!(test_env.root().join("nested").join(".localgit").is_dir());
}

#[test]
fn test_commands_require_repo() {
    let test_env = TestEnvironment::new();
    let output = test_env.localgit(&["log"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("There is no localgit repo"), "stderr: {stderr}");
}
