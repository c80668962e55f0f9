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

mod commit;
mod diff;
mod init;
mod log;
mod restore;
mod status;

use crate::cli_util::{CommandHelper, GlobalArgs};
use crate::command_error::CommandError;
use crate::ui::Ui;

#[derive(clap::Parser, Clone, Debug)]
#[command(name = "localgit", version, about = "A local snapshot-based version control system")]
pub struct Args {
    #[command(flatten)]
    pub global_args: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum Command {
    Commit(commit::CommitArgs),
    Diff(diff::DiffArgs),
    Init(init::InitArgs),
    Log(log::LogArgs),
    Restore(restore::RestoreArgs),
    Status(status::StatusArgs),
}

pub fn run_command(
    ui: &mut Ui,
    command: &CommandHelper,
    subcommand: &Command,
) -> Result<(), CommandError> {
    match subcommand {
        Command::Commit(args) => commit::cmd_commit(ui, command, args),
        Command::Diff(args) => diff::cmd_diff(ui, command, args),
        Command::Init(args) => init::cmd_init(ui, command, args),
        Command::Log(args) => log::cmd_log(ui, command, args),
        Command::Restore(args) => restore::cmd_restore(ui, command, args),
        Command::Status(args) => status::cmd_status(ui, command, args),
    }
}
