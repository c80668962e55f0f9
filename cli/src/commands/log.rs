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
use crate::ui::Ui;

/// List commits, newest first
#[derive(clap::Args, Clone, Debug)]
pub struct LogArgs {
    /// Number of commits to skip
    #[arg(long, default_value_t = 0)]
    skip: i64,
    /// Maximum number of commits to show
    #[arg(long, short = 'n', default_value_t = 10)]
    limit: i64,
}

#[instrument(skip_all)]
pub fn cmd_log(ui: &mut Ui, command: &CommandHelper, args: &LogArgs) -> Result<(), CommandError> {
    let mut repo = command.load_repo()?;
    for commit in repo.list_commits(args.skip, args.limit)? {
        ui.write(&format!(
            "commit {}\nAuthor: {}\nDate:   {}\n\n    {}\n\n",
            commit.id.value(),
            commit.author,
            commit.time.format("%Y-%m-%d %H:%M:%S %z"),
            commit.message,
        ))?;
    }
    Ok(())
}
