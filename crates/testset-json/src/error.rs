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


//! Binding errors.

use testset_core::FixtureError;

/// Errors raised while binding a JSON fixture document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonBindError {
    /// The document is not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// The document root is not an object
    #[error("root must be a JSON object, found {0}")]
    InvalidRoot(&'static str),

    /// A required key is absent
    #[error("missing key {key} in {context}")]
    MissingKey { key: String, context: String },

    /// A key holds a value of the wrong JSON type
    #[error("key {key} in {context} must be {expected}, found {found}")]
    InvalidKey {
        key: String,
        context: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A document-level or fixture-level key is not recognised
    #[error("unexpected key {key} in {context}")]
    UnexpectedKey { key: String, context: String },

    /// No element type is registered under this name
    #[error("unknown element type {0}")]
    UnknownType(String),

    /// An element key is neither a field nor a handled directive
    #[error("unrecognized field {field} on type {type_name}")]
    UnrecognizedField { field: String, type_name: String },

    /// Document exceeds the configured size
    #[error("document size ({1} bytes) exceeds maximum of {0} bytes")]
    DocumentTooLarge(usize, usize),

    /// Records nested deeper than the configured depth
    #[error("maximum record depth ({0}) exceeded")]
    MaxDepthExceeded(usize),
}

impl From<serde_json::Error> for JsonBindError {
    fn from(err: serde_json::Error) -> Self {
        JsonBindError::Parse(err.to_string())
    }
}

impl From<JsonBindError> for FixtureError {
    fn from(err: JsonBindError) -> Self {
        match err {
            JsonBindError::DocumentTooLarge(..) | JsonBindError::MaxDepthExceeded(_) => {
                FixtureError::limit(err.to_string())
            }
            _ => FixtureError::malformed(err.to_string()),
        }
    }
}

/// Name of a JSON value's type, for diagnostics.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
