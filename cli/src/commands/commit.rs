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

use tracing::instrument;

use crate::cli_util::CommandHelper;
use crate::command_error::{user_error, CommandError};
use crate::ui::Ui;

/// Record a snapshot of the working tree as a new commit
#[derive(clap::Args, Clone, Debug)]
pub struct CommitArgs {
    /// The commit message
    #[arg(long, short = 'm', default_value = "")]
    message: String,
    /// The commit author; defaults to the configured user.name
    #[arg(long)]
    author: Option<String>,
}

#[instrument(skip_all)]
pub fn cmd_commit(
    ui: &mut Ui,
    command: &CommandHelper,
    args: &CommitArgs,
) -> Result<(), CommandError> {
    let mut repo = command.load_repo()?;
    let author = args
        .author
        .clone()
        .unwrap_or_else(|| command.default_author());
    let commit_id = repo.backup(&args.message, &author)?;
    if commit_id.is_zero() {
        return Err(user_error("Failed to create a commit"));
    }
    ui.write_stderr(&format!("Created commit {}\n", commit_id.value()))?;
    Ok(())
}
