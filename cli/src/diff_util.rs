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

use std::io;

use localgit_lib::diff::{Change, ChangeFlags};

use crate::ui::Ui;

fn change_letter(flags: ChangeFlags) -> char {
    if flags.created {
        'A'
    } else if flags.deleted {
        'D'
    } else {
        'M'
    }
}

/// Writes one `<letter> <path>` line per change, in the `git status` letter
/// convention (A added, D deleted, M modified).
pub fn write_changes(ui: &mut Ui, changes: &[Change]) -> io::Result<()> {
    for change in changes {
        ui.write(&format!(
            "{} {}\n",
            change_letter(change.flags),
            change.path.as_internal_str()
        ))?;
    }
    Ok(())
}
