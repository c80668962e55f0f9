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

use localgit_lib::diff::ChangeFlags;
use localgit_lib::metadata_store::CommitId;
use testutils::{repo_path, TestRepo};

#[test]
fn test_compare_with_working_tree_modification() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"hello");
    test_repo.write_file("sub/b.txt", b"world");
    let commit_id = test_repo.backup("init", "t");

    // An unchanged tree compares clean.
    assert!(test_repo
        .repo
        .compare_with_working_tree(commit_id)
        .unwrap()
        .is_empty());

    test_repo.write_file("a.txt", b"HELLO");
    let changes = test_repo.repo.compare_with_working_tree(commit_id).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path, repo_path("a.txt"));
    assert_eq!(changes[0].flags, ChangeFlags::modified());
}

#[test]
fn test_compare_with_working_tree_created_and_deleted() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"hello");
    let commit_id = test_repo.backup("init", "t");

    test_repo.write_file("c.txt", b"new");
    test_repo.remove("a.txt");
    let mut changes = test_repo.repo.compare_with_working_tree(commit_id).unwrap();
    changes.sort_by(|x, y| x.path.cmp(&y.path));
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].path, repo_path("a.txt"));
    assert_eq!(changes[0].flags, ChangeFlags::deleted());
    assert_eq!(changes[1].path, repo_path("c.txt"));
    assert_eq!(changes[1].flags, ChangeFlags::created());
}

#[test]
fn test_compare_with_working_tree_skips_missing_artifacts() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"hello");
    let commit_id = test_repo.backup("init", "t");

    // Drop the whole artifact directory of the commit. The entries can no
    // longer be compared, so they are skipped rather than reported.
    let file_map = test_repo.repo.commit_file_map(commit_id).unwrap();
    let commit_dir = file_map[&repo_path("a.txt")].parent().unwrap().to_owned();
    std::fs::remove_dir_all(commit_dir).unwrap();

    let changes = test_repo.repo.compare_with_working_tree(commit_id).unwrap();
    assert!(changes.is_empty());
}

#[test]
fn test_compare_commits_basics() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"hello");
    test_repo.write_file("sub/b.txt", b"world");
    let first = test_repo.backup("init", "t");

    test_repo.write_file("a.txt", b"HELLO");
    test_repo.remove("sub/b.txt");
    let second = test_repo.backup("change", "t");

    let changes = test_repo.repo.compare_commits(first, second).unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].path, repo_path("a.txt"));
    assert_eq!(changes[0].flags, ChangeFlags::modified());
    assert_eq!(changes[1].path, repo_path("sub/b.txt"));
    assert_eq!(changes[1].flags, ChangeFlags::deleted());

    // Swapping the operands turns the deletion into a creation.
    let changes = test_repo.repo.compare_commits(second, first).unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].path, repo_path("a.txt"));
    assert_eq!(changes[0].flags, ChangeFlags::modified());
    assert_eq!(changes[1].path, repo_path("sub/b.txt"));
    assert_eq!(changes[1].flags, ChangeFlags::created());
}

#[test]
fn test_compare_commits_ignores_unrelated_entries() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"one");
    let first = test_repo.backup("1", "t");
    test_repo.write_file("a.txt", b"two");
    let second = test_repo.backup("2", "t");
    test_repo.write_file("a.txt", b"three");
    test_repo.write_file("late.txt", b"late");
    test_repo.backup("3", "t");

    // Entries that only exist in a third commit do not show up.
    let changes = test_repo.repo.compare_commits(first, second).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path, repo_path("a.txt"));
}

#[test]
fn test_change_flag_closure() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"hello");
    test_repo.write_file("b.txt", b"old");
    let first = test_repo.backup("init", "t");

    test_repo.remove("a.txt");
    test_repo.write_file("b.txt", b"new");
    test_repo.write_file("c.txt", b"created");
    let second = test_repo.backup("change", "t");

    let mut all_changes = test_repo.repo.compare_commits(first, second).unwrap();
    all_changes.extend(test_repo.repo.compare_with_working_tree(first).unwrap());
    assert!(!all_changes.is_empty());
    for change in all_changes {
        // modified is set whenever any flag is set.
        assert!(change.flags.modified);
        assert_eq!(
            change.flags.modified,
            change.flags.created | change.flags.deleted | change.flags.modified
        );
    }
}

#[test]
fn test_compare_invalid_commit_ids() {
    let mut test_repo = TestRepo::init();
    test_repo.write_file("a.txt", b"hello");
    let commit_id = test_repo.backup("init", "t");

    assert!(test_repo
        .repo
        .compare_commits(CommitId::new(42), CommitId::new(43))
        .unwrap()
        .is_empty());

    // Comparing a valid commit against an unknown one classifies every
    // entry of the valid side.
    let changes = test_repo
        .repo
        .compare_commits(commit_id, CommitId::new(42))
        .unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].flags, ChangeFlags::deleted());

    // Against the working tree, an unknown commit reports everything as
    // created.
    let changes = test_repo
        .repo
        .compare_with_working_tree(CommitId::new(42))
        .unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].flags, ChangeFlags::created());
}
