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
use crate::command_error::CommandError;
use crate::diff_util;
use crate::ui::Ui;

/// Show changes in the working tree relative to the newest commit
#[derive(clap::Args, Clone, Debug)]
pub struct StatusArgs {}

#[instrument(skip_all)]
pub fn cmd_status(
    ui: &mut Ui,
    command: &CommandHelper,
    _args: &StatusArgs,
) -> Result<(), CommandError> {
    let mut repo = command.load_repo()?;
    let Some(newest) = repo.list_commits(0, 1)?.into_iter().next() else {
        ui.write("No commits yet.\n")?;
        return Ok(());
    };
    let changes = repo.compare_with_working_tree(newest.id)?;
    if changes.is_empty() {
        ui.write("The working copy is clean\n")?;
    } else {
        ui.write(&format!(
            "Working copy changes compared to commit {}:\n",
            newest.id.value()
        ))?;
        diff_util::write_changes(ui, &changes)?;
    }
    Ok(())
}
