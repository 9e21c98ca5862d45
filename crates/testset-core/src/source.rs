// Testset - Named, typed test fixtures
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource lookup for fixture documents.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the fixture directory.
pub const FIXTURES_DIR_ENV: &str = "TESTSET_FIXTURES_DIR";

/// Fixture directory used when [`FIXTURES_DIR_ENV`] is unset.
pub const DEFAULT_FIXTURES_DIR: &str = "tests/fixtures";

/// Lookup of raw document bytes by normalized identifier.
pub trait ResourceSource: Send + Sync {
    /// Fetch a document. `Ok(None)` signals absence.
    fn fetch(&self, identifier: &str) -> io::Result<Option<Vec<u8>>>;
}

/// Documents stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root taken from `TESTSET_FIXTURES_DIR`, or `tests/fixtures`.
    pub fn from_env() -> Self {
        let root = std::env::var_os(FIXTURES_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_DIR));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirectorySource {
    fn fetch(&self, identifier: &str) -> io::Result<Option<Vec<u8>>> {
        let path = self.root.join(identifier.trim_start_matches('/'));
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Documents held in memory.
///
/// # Examples
///
/// ```rust
/// use testset_core::{MemorySource, ResourceSource};
///
/// let source = MemorySource::new().with_document("a.json", r#"{"sets": []}"#);
/// assert!(source.fetch("a.json").unwrap().is_some());
/// assert!(source.fetch("b.json").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, identifier: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(identifier, content);
        self
    }

    pub fn insert(&mut self, identifier: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(identifier.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ResourceSource for MemorySource {
    fn fetch(&self, identifier: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.documents.get(identifier).cloned())
    }
}
