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
fn test_restore() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init"]);
    test_env.write_file("a.txt", b"hello");
    test_env.write_file("sub/b.txt", b"world");
    test_env.run_ok(&["commit", "-m", "first"]);

    test_env.write_file("a.txt", b"changed");
    test_env.remove_file("sub/b.txt");
    test_env.write_file("c.txt", b"extra");

    let (_stdout, stderr) = test_env.run_ok(&["restore", "1"]);
    assert!(
        stderr.contains("Restored 3 paths from commit 1"),
        "stderr: {stderr}"
    );
    assert_eq!(test_env.read_file("a.txt"), b"hello");
    assert_eq!(test_env.read_file("sub/b.txt"), b"world");
    assert!(!test_env.root().join("c.txt").exists());

    let (stdout, _stderr) = test_env.run_ok(&["status"]);
    assert!(stdout.contains("The working copy is clean"), "stdout: {stdout}");
}

#[test]
fn test_restore_unknown_commit_empties_tree() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init"]);
    test_env.write_file("a.txt", b"hello");

    let (_stdout, stderr) = test_env.run_ok(&["restore", "42"]);
    assert!(
        stderr.contains("Restored 0 paths from commit 42"),
        "stderr: {stderr}"
    );
    assert!(!test_env.root().join("a.txt").exists());
}
