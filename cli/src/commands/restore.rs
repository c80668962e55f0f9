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
use crate::command_error::CommandError;
use crate::ui::Ui;

/// Rewrite the working tree to match a commit
///
/// Files and directories not present in the commit are removed; everything
/// else is brought back to its committed content.
#[derive(clap::Args, Clone, Debug)]
pub struct RestoreArgs {
    /// The commit to restore
    commit: i64,
}

#[instrument(skip_all)]
pub fn cmd_restore(
    ui: &mut Ui,
    command: &CommandHelper,
    args: &RestoreArgs,
) -> Result<(), CommandError> {
    let mut repo = command.load_repo()?;
    let restored = repo.restore(CommitId::new(args.commit))?;
    ui.write_stderr(&format!(
        "Restored {} paths from commit {}\n",
        restored.len(),
        args.commit
    ))?;
    Ok(())
}
