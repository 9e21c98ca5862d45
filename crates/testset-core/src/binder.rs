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

//! Seam between the engine and a document binder.
//!
//! A [`DocumentBinder`] turns raw document bytes into a
//! [`FixtureCollection`]. While doing so it calls back into the engine
//! through [`BindHooks`]: to resolve element type names, to load included
//! documents, and to offer every key it does not understand to the
//! directive interpreter.

use crate::error::FixtureResult;
use crate::model::{ElementLocation, FixtureCollection};
use crate::schema::ElementType;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The partially bound object a binder is filling in.
pub struct ObjectContext<'a> {
    /// Declared type of the object.
    pub element_type: &'a ElementType,
    /// Where the object lives once its fixture is registered.
    pub location: &'a ElementLocation,
    /// Fields bound so far.
    pub object: &'a mut Map<String, Value>,
}

/// Callbacks a binder uses while binding one document.
pub trait BindHooks {
    /// Resolve a named element type.
    fn resolve_type(&mut self, name: &str) -> Option<Arc<ElementType>>;

    /// Key listing further documents, at document level and inside
    /// element objects.
    fn include_key(&self) -> &str;

    /// Load a comma-separated list of further documents.
    fn include(&mut self, includes: &str) -> FixtureResult<()>;

    /// Offer a key the binder did not consume.
    ///
    /// Returns `Ok(false)` when the key is not a directive the engine
    /// handles; the binder then reports it as unrecognized.
    fn unknown_field(
        &mut self,
        target: ObjectContext<'_>,
        key: &str,
        raw: &Value,
    ) -> FixtureResult<bool>;
}

/// Converts raw document bytes into fixtures.
pub trait DocumentBinder: Send + Sync {
    /// Bind one document. `identifier` is the normalized document name,
    /// used for diagnostics only.
    fn bind(
        &self,
        identifier: &str,
        raw: &[u8],
        hooks: &mut dyn BindHooks,
    ) -> FixtureResult<FixtureCollection>;
}
