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

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as _;
use localgit_lib::repo::Repo;
use localgit_lib::settings::UserSettings;
use tracing_subscriber::prelude::*;

use crate::command_error::{internal_error, user_error, CommandError};
use crate::commands::{self, Args};
use crate::ui::Ui;

/// Arguments available to every subcommand.
#[derive(clap::Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Path to the repository to operate on
    ///
    /// By default, the current working directory is used.
    #[arg(long, short = 'R', global = true, value_hint = clap::ValueHint::DirPath)]
    pub repository: Option<PathBuf>,
}

/// Per-invocation context handed to the command functions.
pub struct CommandHelper {
    cwd: PathBuf,
    global_args: GlobalArgs,
    settings: UserSettings,
}

impl CommandHelper {
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn global_args(&self) -> &GlobalArgs {
        &self.global_args
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// The working root this invocation operates on.
    pub fn workspace_root(&self) -> PathBuf {
        match &self.global_args.repository {
            Some(path) => self.cwd.join(path),
            None => self.cwd.clone(),
        }
    }

    pub fn load_repo(&self) -> Result<Repo, CommandError> {
        Ok(Repo::load(&self.workspace_root())?)
    }

    /// The author recorded by `commit` when no `--author` is given. An empty
    /// string makes the engine fall back to its own default.
    pub fn default_author(&self) -> String {
        self.settings.user_name().unwrap_or_default()
    }
}

pub struct CliRunner {}

impl CliRunner {
    #[must_use]
    pub fn init() -> Self {
        init_tracing();
        CliRunner {}
    }

    pub fn run(self) -> ExitCode {
        let mut ui = Ui::new();
        let result = run_inner(&mut ui);
        crate::command_error::handle_command_result(&mut ui, result)
    }
}

fn init_tracing() {
    // Debug output goes to stderr and is enabled with e.g.
    // LOCALGIT_LOG=localgit_lib=debug.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_env_var("LOCALGIT_LOG")
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run_inner(ui: &mut Ui) -> Result<(), CommandError> {
    let args = Args::parse();
    let cwd = std::env::current_dir().map_err(internal_error)?;
    let settings = UserSettings::for_user()
        .map_err(|err| user_error(format!("Config error: {err}")))?;
    let helper = CommandHelper {
        cwd,
        global_args: args.global_args,
        settings,
    };
    commands::run_command(ui, &helper, &args.command)
}
