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

#![allow(missing_docs)]

use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Cannot access {path}")]
pub struct PathError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

pub trait IoResultExt<T> {
    fn context(self, path: impl AsRef<Path>) -> Result<T, PathError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn context(self, path: impl AsRef<Path>) -> Result<T, PathError> {
        self.map_err(|error| PathError {
            path: path.as_ref().to_path_buf(),
            source: error,
        })
    }
}

/// Creates a directory or does nothing if the directory already exists.
///
/// The function will fail if intermediate directories on the path do not
/// already exist.
pub fn create_or_reuse_dir(dirname: &Path) -> io::Result<()> {
    match fs::create_dir(dirname) {
        Ok(()) => Ok(()),
        Err(_) if dirname.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Turns the given `to` path into relative path starting from the `from`
/// path.
///
/// Both `from` and `to` paths are supposed to be absolute and normalized in
/// the same manner.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    // Find common prefix.
    for (i, base) in from.ancestors().enumerate() {
        if let Ok(suffix) = to.strip_prefix(base) {
            if i == 0 && suffix.as_os_str().is_empty() {
                return ".".into();
            } else {
                let mut result = PathBuf::from_iter(std::iter::repeat("..").take(i));
                result.push(suffix);
                return result;
            }
        }
    }

    // No common prefix found. Return the original (absolute) path.
    to.to_owned()
}

/// Copies `src` to `dst`, creating missing parent directories of `dst` and
/// overwriting an existing file at `dst`.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), PathError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).context(parent)?;
    }
    fs::copy(src, dst).context(dst)?;
    Ok(())
}

/// Removes the entry at `path`: a regular file, or a directory with all of
/// its contents. Does nothing if the entry is already gone.
pub fn remove_entry(path: &Path) -> Result<(), PathError> {
    let metadata = match path.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err).context(path),
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context(path),
    }
}

/// Whether the entries at `path_a` and `path_b` differ in any way that
/// matters for restoration: file/directory nature, size, or byte content.
///
/// A side that does not exist differs from any side that does. The predicate
/// is symmetric and deterministic. Two directories never differ (their
/// contents are compared entry by entry elsewhere).
pub fn is_modified(path_a: &Path, path_b: &Path) -> Result<bool, PathError> {
    let stat = |path: &Path| match path.metadata() {
        Ok(metadata) => Ok(Some(metadata)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).context(path),
    };
    let (metadata_a, metadata_b) = match (stat(path_a)?, stat(path_b)?) {
        (Some(a), Some(b)) => (a, b),
        (None, None) => return Ok(false),
        _ => return Ok(true),
    };
    if metadata_a.is_dir() != metadata_b.is_dir() {
        return Ok(true);
    }
    if metadata_a.is_dir() {
        return Ok(false);
    }
    if metadata_a.len() != metadata_b.len() {
        return Ok(true);
    }
    contents_differ(path_a, path_b)
}

fn contents_differ(path_a: &Path, path_b: &Path) -> Result<bool, PathError> {
    let mut file_a = File::open(path_a).context(path_a)?;
    let mut file_b = File::open(path_b).context(path_b)?;
    let mut buf_a = [0; 16 << 10];
    let mut buf_b = [0; 16 << 10];
    loop {
        let len_a = read_full(&mut file_a, &mut buf_a).context(path_a)?;
        let len_b = read_full(&mut file_b, &mut buf_b).context(path_b)?;
        if buf_a[..len_a] != buf_b[..len_b] {
            return Ok(true);
        }
        if len_a == 0 {
            return Ok(false);
        }
    }
}

fn read_full(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
