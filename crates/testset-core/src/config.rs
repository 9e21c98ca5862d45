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

//! Loader and directive configuration.

/// Default suffix appended to document identifiers.
pub const DEFAULT_EXTENSION: &str = ".json";

/// Default maximum number of documents in flight at once.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Markers and reserved tokens recognised by the directive interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveConfig {
    /// Prefix of reference directives (default: `->`).
    pub reference_marker: String,
    /// Prefix of instruction directives (default: `*`).
    pub instruction_marker: String,
    /// Reserved key listing further documents to load (default: `*include`).
    pub include_key: String,
    /// Token selecting the frozen snapshot (default: `now`).
    pub now_token: String,
    /// Token selecting the wall clock (default: `real_now`).
    pub real_now_token: String,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            reference_marker: "->".to_string(),
            instruction_marker: "*".to_string(),
            include_key: "*include".to_string(),
            now_token: "now".to_string(),
            real_now_token: "real_now".to_string(),
        }
    }
}

/// Configuration for the document loader.
///
/// # Examples
///
/// ```rust
/// use testset_core::LoaderConfig;
///
/// let config = LoaderConfig::builder()
///     .extension(".fixture.json")
///     .max_include_depth(8)
///     .build();
/// assert_eq!(config.normalize(" users "), "users.fixture.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Suffix every document identifier is normalized to end with.
    pub extension: String,
    /// Maximum processing stack depth (default: 64).
    pub max_include_depth: usize,
    /// Directive markers and tokens.
    pub directives: DirectiveConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            directives: DirectiveConfig::default(),
        }
    }
}

impl LoaderConfig {
    /// Create a new builder.
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::default()
    }

    /// Normalize a document identifier to its canonical form.
    pub fn normalize(&self, identifier: &str) -> String {
        let trimmed = identifier.trim();
        if trimmed.ends_with(&self.extension) {
            trimmed.to_string()
        } else {
            format!("{}{}", trimmed, self.extension)
        }
    }

    /// Split a comma-separated include list into normalized identifiers.
    ///
    /// Blank entries are skipped.
    pub fn split_includes(&self, includes: &str) -> Vec<String> {
        includes
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| self.normalize(s))
            .collect()
    }
}

/// Builder for [`LoaderConfig`].
#[derive(Debug, Clone, Default)]
pub struct LoaderConfigBuilder {
    config: LoaderConfig,
}

impl LoaderConfigBuilder {
    /// Set the document suffix.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// Set the maximum processing stack depth.
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.config.max_include_depth = depth;
        self
    }

    /// Set the reference directive marker.
    pub fn reference_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.directives.reference_marker = marker.into();
        self
    }

    /// Set the instruction directive marker.
    pub fn instruction_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.directives.instruction_marker = marker.into();
        self
    }

    /// Set the reserved include key.
    pub fn include_key(mut self, key: impl Into<String>) -> Self {
        self.config.directives.include_key = key.into();
        self
    }

    /// Replace all directive settings at once.
    pub fn directives(mut self, directives: DirectiveConfig) -> Self {
        self.config.directives = directives;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LoaderConfig {
        self.config
    }
}
