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

//! Per-path change classification.

use crate::repo_path::RepoPathBuf;

/// The `{created, deleted, modified}` triple describing how a single path
/// differs between two snapshots, or between a snapshot and the working
/// tree. `modified` is set whenever any flag is set.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ChangeFlags {
    pub created: bool,
    pub deleted: bool,
    pub modified: bool,
}

/// Bit positions of the stable 64-bit little-endian serialization: one byte
/// per flag, low byte first.
const CREATED_BIT: u64 = 1;
const DELETED_BIT: u64 = 1 << 8;
const MODIFIED_BIT: u64 = 1 << 16;

impl ChangeFlags {
    /// The path exists in the newer state only.
    pub fn created() -> Self {
        ChangeFlags {
            created: true,
            deleted: false,
            modified: true,
        }
    }

    /// The path exists in the older state only.
    pub fn deleted() -> Self {
        ChangeFlags {
            created: false,
            deleted: true,
            modified: true,
        }
    }

    /// The path exists in both states with different content.
    pub fn modified() -> Self {
        ChangeFlags {
            created: false,
            deleted: false,
            modified: true,
        }
    }

    /// Encodes the flags as a 64-bit value with bit 0 = created, bit 8 =
    /// deleted, bit 16 = modified. These values are emitted as literals by
    /// the commit-comparison SQL, so they must stay stable.
    pub fn to_bits(self) -> u64 {
        let mut bits = 0;
        if self.created {
            bits |= CREATED_BIT;
        }
        if self.deleted {
            bits |= DELETED_BIT;
        }
        if self.modified {
            bits |= MODIFIED_BIT;
        }
        bits
    }

    /// Decodes a value produced by [`ChangeFlags::to_bits()`].
    pub fn from_bits(bits: u64) -> Self {
        ChangeFlags {
            created: bits & CREATED_BIT != 0,
            deleted: bits & DELETED_BIT != 0,
            modified: bits & MODIFIED_BIT != 0,
        }
    }
}

/// A single changed path reported by a comparison.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Change {
    pub path: RepoPathBuf,
    pub flags: ChangeFlags,
}
