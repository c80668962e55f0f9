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

use localgit_lib::metadata_store::CommitId;
use tracing::instrument;

use crate::cli_util::CommandHelper;
use crate::command_error::{user_error, CommandError};
use crate::diff_util;
use crate::ui::Ui;

/// Compare two commits, or a commit against the working tree
#[derive(clap::Args, Clone, Debug)]
pub struct DiffArgs {
    /// Compare this commit against the working tree
    #[arg(long, short = 'r', conflicts_with_all = ["from", "to"])]
    revision: Option<i64>,
    /// The commit to compare from
    #[arg(long, requires = "to")]
    from: Option<i64>,
    /// The commit to compare to
    #[arg(long, requires = "from")]
    to: Option<i64>,
}

#[instrument(skip_all)]
pub fn cmd_diff(ui: &mut Ui, command: &CommandHelper, args: &DiffArgs) -> Result<(), CommandError> {
    let mut repo = command.load_repo()?;
    let changes = match (args.revision, args.from, args.to) {
        (Some(revision), _, _) => {
            repo.compare_with_working_tree(CommitId::new(revision))?
        }
        (None, Some(from), Some(to)) => {
            repo.compare_commits(CommitId::new(from), CommitId::new(to))?
        }
        _ => {
            return Err(user_error(
                "Specify either --revision or both --from and --to",
            ));
        }
    };
    diff_util::write_changes(ui, &changes)?;
    Ok(())
}
