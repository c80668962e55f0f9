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

//! Repository-relative paths.

use std::fmt::{Debug, Formatter};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// A path relative to the working root, stored as a `/`-separated UTF-8
/// string. This is the single encoding used both for the backup layout on
/// disk and for the `relative_path` column in the metadata store; using the
/// same form for reads and writes is what makes entry lookup by path work.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RepoPathBuf {
    value: String,
}

impl Debug for RepoPathBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self.value)
    }
}

/// The input string is not a valid repository path: it is empty, has an empty
/// component (`"/"`, `"a//b"`, a leading or trailing slash), or contains a
/// `.`/`..` component.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error(r#"Invalid repository path "{value}""#)]
pub struct InvalidRepoPathError {
    pub value: String,
}

/// The filesystem path could not be converted to a repository path.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RelativePathParseError {
    #[error(r#"Invalid component "{component}" in repo-relative path "{path}""#)]
    InvalidComponent { component: String, path: String },
    #[error(r#"Not valid UTF-8 path "{path}""#)]
    InvalidUtf8 { path: String },
}

fn is_valid_component_str(value: &str) -> bool {
    !value.is_empty() && value != "." && value != ".." && !value.contains('/')
}

impl RepoPathBuf {
    /// Wraps a `/`-separated string as `RepoPathBuf`.
    pub fn from_internal_string(value: impl Into<String>) -> Result<Self, InvalidRepoPathError> {
        let value: String = value.into();
        if !value.is_empty() && value.split('/').all(is_valid_component_str) {
            Ok(RepoPathBuf { value })
        } else {
            Err(InvalidRepoPathError { value })
        }
    }

    /// Converts a repo-relative `Path` to `RepoPathBuf`.
    ///
    /// The input must consist of normal components only; `.` and `..` are
    /// rejected rather than resolved.
    pub fn from_relative_path(
        relative_path: impl AsRef<Path>,
    ) -> Result<Self, RelativePathParseError> {
        let relative_path = relative_path.as_ref();
        let mut value = String::with_capacity(relative_path.as_os_str().len());
        for component in relative_path.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| {
                        RelativePathParseError::InvalidUtf8 {
                            path: relative_path.to_string_lossy().into_owned(),
                        }
                    })?;
                    if !value.is_empty() {
                        value.push('/');
                    }
                    value.push_str(name);
                }
                _ => {
                    return Err(RelativePathParseError::InvalidComponent {
                        component: component.as_os_str().to_string_lossy().into_owned(),
                        path: relative_path.to_string_lossy().into_owned(),
                    });
                }
            }
        }
        if value.is_empty() {
            return Err(RelativePathParseError::InvalidComponent {
                component: String::new(),
                path: relative_path.to_string_lossy().into_owned(),
            });
        }
        Ok(RepoPathBuf { value })
    }

    /// The `/`-separated string form used internally and in the metadata
    /// store, not for presenting to users (where the platform separator may
    /// be wanted).
    pub fn as_internal_str(&self) -> &str {
        &self.value
    }

    /// Consumes this and returns the underlying string representation.
    pub fn into_internal_string(self) -> String {
        self.value
    }

    /// Iterates the path components in order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.value.split('/')
    }

    /// Converts this path to a filesystem path under `base`.
    pub fn to_fs_path(&self, base: &Path) -> PathBuf {
        let mut result = PathBuf::with_capacity(base.as_os_str().len() + self.value.len() + 1);
        result.push(base);
        result.extend(self.components());
        result
    }
}
