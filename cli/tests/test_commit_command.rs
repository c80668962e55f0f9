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
fn test_commit_and_log() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init"]);
    test_env.write_file("a.txt", b"hello");

    let (_stdout, stderr) = test_env.run_ok(&["commit", "-m", "first", "--author", "alice"]);
    assert!(stderr.contains("Created commit 1"), "stderr: {stderr}");

    let (stdout, _stderr) = test_env.run_ok(&["log"]);
    assert!(stdout.contains("commit 1"), "stdout: {stdout}");
    assert!(stdout.contains("Author: alice"), "stdout: {stdout}");
    assert!(stdout.contains("first"), "stdout: {stdout}");
}

#[test]
fn test_commit_default_author() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init"]);
    test_env.write_file("a.txt", b"hello");
    test_env.run_ok(&["commit", "-m", "msg"]);

    let (stdout, _stderr) = test_env.run_ok(&["log"]);
    assert!(stdout.contains("Author: anonymous"), "stdout: {stdout}");
}

#[test]
fn test_log_pagination() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init"]);
    test_env.write_file("a.txt", b"hello");
    test_env.run_ok(&["commit", "-m", "first"]);
    // The second commit records no new file versions, so it is safe to
    // create it immediately after the first.
    test_env.run_ok(&["commit", "-m", "second"]);

    let (stdout, _stderr) = test_env.run_ok(&["log", "-n", "1"]);
    assert!(stdout.contains("second"), "stdout: {stdout}");
    assert!(!stdout.contains("first"), "stdout: {stdout}");

    let (stdout, _stderr) = test_env.run_ok(&["log", "--skip", "1"]);
    assert!(stdout.contains("first"), "stdout: {stdout}");
    assert!(!stdout.contains("second"), "stdout: {stdout}");
}

#[test]
fn test_status() {
    let test_env = TestEnvironment::new();
    test_env.run_ok(&["init"]);

    let (stdout, _stderr) = test_env.run_ok(&["status"]);
    assert!(stdout.contains("No commits yet."), "stdout: {stdout}");

    test_env.write_file("a.txt", b"hello");
    test_env.run_ok(&["commit", "-m", "first"]);
    let (stdout, _stderr) = test_env.run_ok(&["status"]);
    assert!(stdout.contains("The working copy is clean"), "stdout: {stdout}");

    test_env.write_file("a.txt", b"changed");
    test_env.write_file("b.txt", b"new");
    let (stdout, _stderr) = test_env.run_ok(&["status"]);
    assert!(stdout.contains("M a.txt"), "stdout: {stdout}");
    assert!(stdout.contains("A b.txt"), "stdout: {stdout}");
}
