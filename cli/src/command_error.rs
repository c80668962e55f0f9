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

use std::error;
use std::io;
use std::process::ExitCode;

use localgit_lib::metadata_store::StoreError;
use localgit_lib::repo::{
    DiffError, RepoInitError, RepoLoadError, RestoreError, SnapshotError,
};

use crate::ui::Ui;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandErrorKind {
    /// The user did something wrong; exit code 1.
    User,
    /// The tool itself failed; exit code 255.
    Internal,
}

#[derive(Debug)]
pub struct CommandError {
    pub kind: CommandErrorKind,
    pub error: Box<dyn error::Error + Send + Sync>,
}

impl CommandError {
    pub fn new(
        kind: CommandErrorKind,
        err: impl Into<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        CommandError {
            kind,
            error: err.into(),
        }
    }
}

pub fn user_error(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> CommandError {
    CommandError::new(CommandErrorKind::User, err)
}

pub fn internal_error(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> CommandError {
    CommandError::new(CommandErrorKind::Internal, err)
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        internal_error(err)
    }
}

impl From<RepoInitError> for CommandError {
    fn from(err: RepoInitError) -> Self {
        user_error(err)
    }
}

impl From<RepoLoadError> for CommandError {
    fn from(err: RepoLoadError) -> Self {
        user_error(err)
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        internal_error(err)
    }
}

impl From<SnapshotError> for CommandError {
    fn from(err: SnapshotError) -> Self {
        internal_error(err)
    }
}

impl From<DiffError> for CommandError {
    fn from(err: DiffError) -> Self {
        internal_error(err)
    }
}

impl From<RestoreError> for CommandError {
    fn from(err: RestoreError) -> Self {
        internal_error(err)
    }
}

/// Prints the error (with its source chain) and maps it to the process exit
/// code.
pub fn handle_command_result(ui: &mut Ui, result: Result<(), CommandError>) -> ExitCode {
    let Err(err) = result else {
        return ExitCode::SUCCESS;
    };
    ui.write_error(&format!("Error: {}\n", err.error)).ok();
    let mut source = err.error.source();
    while let Some(err) = source {
        ui.write_error(&format!("Caused by: {err}\n")).ok();
        source = err.source();
    }
    match err.kind {
        CommandErrorKind::User => ExitCode::from(1),
        CommandErrorKind::Internal => ExitCode::from(255),
    }
}
