use std::path::PathBuf;

#[test]
fn test_no_forgotten_test_files() {
    let test_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    testutils::assert_no_forgotten_test_files(&test_dir);
}

mod common;

mod test_commit_command;
mod test_init_command;
mod test_restore_command;
