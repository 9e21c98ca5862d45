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


//! JSON document binder.
//!
//! A fixture document is a JSON object:
//!
//! ```text
//! {
//!   "*include": "adresseTestSet, productTestSet",
//!   "dataClass": "model.Personne",
//!   "sets": [
//!     { "name": "personnes1", "data": [ { "id": 1, "->address": "adresses1,0" } ] },
//!     { "name": "extra", "dataClass": "model.Adresse", "data": [] }
//!   ]
//! }
//! ```
//!
//! The collection keys are read in the order include, type, sets; the
//! fixture keys in the order name, type, data. The include key is the
//! engine's ([`BindHooks::include_key`]), so documents and elements share
//! it. Element objects are bound
//! against the field table of their element type; every other key is
//! offered to the engine's directive interpreter.

use crate::error::{json_type_name, JsonBindError};
use serde_json::{Map, Value};
use std::sync::Arc;
use testset_core::{
    BindHooks, DocumentBinder, ElementLocation, ElementType, FieldKind, FieldSpec, Fixture,
    FixtureCollection, FixtureResult, ObjectContext, TargetShape,
};
use tracing::debug;

/// Default maximum document size in bytes (64 MB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Default maximum nesting of records inside an element.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for [`JsonBinder`].
///
/// # Examples
///
/// ```rust
/// use testset_json::JsonBinderConfig;
///
/// let config = JsonBinderConfig::builder()
///     .type_key("type")
///     .max_depth(16)
///     .build();
/// assert_eq!(config.type_key, "type");
/// assert_eq!(config.sets_key, "sets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBinderConfig {
    /// Element type key, at document and fixture level (default: `dataClass`)
    pub type_key: String,
    /// Key of the fixture array (default: `sets`)
    pub sets_key: String,
    /// Fixture name key (default: `name`)
    pub name_key: String,
    /// Key of a fixture's element array (default: `data`)
    pub data_key: String,
    /// Maximum document size in bytes (`None` = unlimited)
    pub max_document_size: Option<usize>,
    /// Maximum record nesting depth (`None` = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for JsonBinderConfig {
    fn default() -> Self {
        JsonBinderConfigBuilder::default().build()
    }
}

impl JsonBinderConfig {
    pub fn builder() -> JsonBinderConfigBuilder {
        JsonBinderConfigBuilder::default()
    }
}

/// Builder for [`JsonBinderConfig`].
#[derive(Debug, Clone)]
pub struct JsonBinderConfigBuilder {
    type_key: String,
    sets_key: String,
    name_key: String,
    data_key: String,
    max_document_size: Option<usize>,
    max_depth: Option<usize>,
}

impl Default for JsonBinderConfigBuilder {
    fn default() -> Self {
        Self {
            type_key: "dataClass".to_string(),
            sets_key: "sets".to_string(),
            name_key: "name".to_string(),
            data_key: "data".to_string(),
            max_document_size: Some(DEFAULT_MAX_DOCUMENT_SIZE),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl JsonBinderConfigBuilder {
    pub fn type_key(mut self, key: impl Into<String>) -> Self {
        self.type_key = key.into();
        self
    }

    pub fn sets_key(mut self, key: impl Into<String>) -> Self {
        self.sets_key = key.into();
        self
    }

    pub fn name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    pub fn data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = key.into();
        self
    }

    pub fn max_document_size(mut self, limit: usize) -> Self {
        self.max_document_size = Some(limit);
        self
    }

    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Disable all limits
    pub fn unlimited(mut self) -> Self {
        self.max_document_size = None;
        self.max_depth = None;
        self
    }

    pub fn build(self) -> JsonBinderConfig {
        JsonBinderConfig {
            type_key: self.type_key,
            sets_key: self.sets_key,
            name_key: self.name_key,
            data_key: self.data_key,
            max_document_size: self.max_document_size,
            max_depth: self.max_depth,
        }
    }
}

/// Binds JSON fixture documents.
#[derive(Debug, Clone, Default)]
pub struct JsonBinder {
    config: JsonBinderConfig,
}

impl JsonBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonBinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JsonBinderConfig {
        &self.config
    }
}

impl DocumentBinder for JsonBinder {
    fn bind(
        &self,
        identifier: &str,
        raw: &[u8],
        hooks: &mut dyn BindHooks,
    ) -> FixtureResult<FixtureCollection> {
        if let Some(max) = self.config.max_document_size {
            if raw.len() > max {
                return Err(JsonBindError::DocumentTooLarge(max, raw.len()).into());
            }
        }
        let root: Value = serde_json::from_slice(raw).map_err(JsonBindError::from)?;
        let root = match root {
            Value::Object(root) => root,
            other => return Err(JsonBindError::InvalidRoot(json_type_name(&other)).into()),
        };
        Session {
            config: &self.config,
            hooks,
        }
        .collection(identifier, root)
    }
}

struct Session<'a, 'h> {
    config: &'a JsonBinderConfig,
    hooks: &'a mut (dyn BindHooks + 'h),
}

impl Session<'_, '_> {
    fn collection(&mut self, identifier: &str, mut root: Map<String, Value>) -> FixtureResult<FixtureCollection> {
        let context = format!("document {}", identifier);

        let include_key = self.hooks.include_key().to_string();
        if let Some(includes) = root.remove(&include_key) {
            let includes = expect_str(includes, &include_key, &context)?;
            debug!(document = %identifier, includes = %includes, "document includes");
            self.hooks.include(&includes)?;
        }

        let default_type = root
            .remove(&self.config.type_key)
            .map(|v| expect_str(v, &self.config.type_key, &context))
            .transpose()?;

        let sets = match root.remove(&self.config.sets_key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(sets)) => sets,
            Some(other) => {
                return Err(invalid(&self.config.sets_key, &context, "an array", &other).into())
            }
        };

        if let Some(key) = root.keys().next() {
            return Err(JsonBindError::UnexpectedKey {
                key: key.clone(),
                context,
            }
            .into());
        }

        let mut collection = FixtureCollection::new(default_type.clone().unwrap_or_default());
        for (i, set) in sets.into_iter().enumerate() {
            let set_context = format!("{} set {}", context, i);
            let set = match set {
                Value::Object(set) => set,
                other => return Err(invalid("sets[]", &set_context, "an object", &other).into()),
            };
            let fixture = self.fixture(set, default_type.as_deref(), &set_context)?;
            collection.fixtures.push(fixture);
        }
        Ok(collection)
    }

    fn fixture(
        &mut self,
        mut set: Map<String, Value>,
        default_type: Option<&str>,
        context: &str,
    ) -> FixtureResult<Fixture> {
        let name = set
            .remove(&self.config.name_key)
            .ok_or_else(|| missing(&self.config.name_key, context))
            .and_then(|v| expect_str(v, &self.config.name_key, context))?;
        let context = format!("fixture {}", name);

        let type_name = match set.remove(&self.config.type_key) {
            Some(v) => expect_str(v, &self.config.type_key, &context)?,
            None => default_type
                .map(str::to_string)
                .ok_or_else(|| missing(&self.config.type_key, &context))?,
        };
        let element_type = self
            .hooks
            .resolve_type(&type_name)
            .ok_or_else(|| JsonBindError::UnknownType(type_name.clone()))?;

        let data = match set.remove(&self.config.data_key) {
            Some(Value::Array(data)) => data,
            Some(other) => return Err(invalid(&self.config.data_key, &context, "an array", &other).into()),
            None => return Err(missing(&self.config.data_key, &context).into()),
        };

        if let Some(key) = set.keys().next() {
            return Err(JsonBindError::UnexpectedKey {
                key: key.clone(),
                context,
            }
            .into());
        }

        let mut fixture = Fixture::new(name, type_name, Vec::with_capacity(data.len()));
        for (index, item) in data.into_iter().enumerate() {
            let location = ElementLocation::element(fixture.id(), index);
            let element = self.element(&element_type, item, &location, 0)?;
            fixture.push(element);
        }
        debug!(fixture = %fixture.name(), elements = fixture.len(), "fixture bound");
        Ok(fixture)
    }

    fn element(
        &mut self,
        element_type: &ElementType,
        raw: Value,
        location: &ElementLocation,
        depth: usize,
    ) -> FixtureResult<Value> {
        if let Some(max) = self.config.max_depth {
            if depth > max {
                return Err(JsonBindError::MaxDepthExceeded(max).into());
            }
        }
        let raw = match raw {
            Value::Object(raw) => raw,
            other => {
                return Err(invalid(
                    "element",
                    &format!("{} {}", element_type.name(), location),
                    "an object",
                    &other,
                )
                .into())
            }
        };

        let mut object = Map::new();
        for (key, value) in raw {
            if let Some(field) = element_type.field(&key) {
                let bound = self.field(field, value, &location.key(&key), depth)?;
                object.insert(key, bound);
                continue;
            }
            let handled = self.hooks.unknown_field(
                ObjectContext {
                    element_type,
                    location,
                    object: &mut object,
                },
                &key,
                &value,
            )?;
            if !handled {
                return Err(JsonBindError::UnrecognizedField {
                    field: key,
                    type_name: element_type.name().to_string(),
                }
                .into());
            }
        }
        Ok(Value::Object(object))
    }

    fn field(
        &mut self,
        field: &FieldSpec,
        value: Value,
        location: &ElementLocation,
        depth: usize,
    ) -> FixtureResult<Value> {
        let FieldKind::Record(type_name) = &field.kind else {
            return Ok(value);
        };
        if value.is_null() {
            return Ok(value);
        }
        let nested = self.record_type(type_name)?;
        match field.shape {
            TargetShape::Scalar => self.element(&nested, value, location, depth + 1),
            TargetShape::Sequence | TargetShape::Collection => {
                let items = match value {
                    Value::Array(items) => items,
                    other => {
                        return Err(
                            invalid(&field.name, &location.to_string(), "an array", &other).into(),
                        )
                    }
                };
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| self.element(&nested, item, &location.item(i), depth + 1))
                    .collect::<FixtureResult<Vec<_>>>()
                    .map(Value::Array)
            }
        }
    }

    fn record_type(&mut self, type_name: &str) -> FixtureResult<Arc<ElementType>> {
        self.hooks
            .resolve_type(type_name)
            .ok_or_else(|| JsonBindError::UnknownType(type_name.to_string()).into())
    }
}

fn expect_str(value: Value, key: &str, context: &str) -> Result<String, JsonBindError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(invalid(key, context, "a string", &other)),
    }
}

fn missing(key: &str, context: &str) -> JsonBindError {
    JsonBindError::MissingKey {
        key: key.to_string(),
        context: context.to_string(),
    }
}

fn invalid(key: &str, context: &str, expected: &'static str, found: &Value) -> JsonBindError {
    JsonBindError::InvalidKey {
        key: key.to_string(),
        context: context.to_string(),
        expected,
        found: json_type_name(found),
    }
}
