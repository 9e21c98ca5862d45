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


//! The fixture registry.
//!
//! A [`Registry`] owns every registered fixture, the catalog of element
//! types and the temporal snapshot. All operations run under one mutex, so
//! a registration (including its includes and reference resolution) is never
//! interleaved with another operation.

use crate::binder::DocumentBinder;
use crate::config::LoaderConfig;
use crate::error::{FixtureError, FixtureResult};
use crate::loader::LoadSession;
use crate::model::Fixture;
use crate::resolver::ReferenceQueue;
use crate::schema::{ElementType, FixtureType, TypeCatalog};
use crate::source::{DirectorySource, ResourceSource};
use crate::temporal::TemporalProvider;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// State guarded by the registry mutex.
#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    pub(crate) fixtures: HashMap<String, Fixture>,
    pub(crate) processing_stack: Vec<String>,
    pub(crate) queue: ReferenceQueue,
    pub(crate) catalog: TypeCatalog,
}

/// Named, typed fixtures shared by a test run.
///
/// # Examples
///
/// ```rust,ignore
/// use testset::{global, FixtureResult};
///
/// fn load() -> FixtureResult<()> {
///     let registry = global();
///     registry.clear().register_json(["personneTestSet"])?;
///     let first = registry.get("personnes1");
///     assert!(first.is_some());
///     Ok(())
/// }
/// ```
pub struct Registry {
    pub(crate) state: Mutex<RegistryState>,
    temporal: TemporalProvider,
    binder: Box<dyn DocumentBinder>,
    source: Box<dyn ResourceSource>,
    config: LoaderConfig,
}

impl Registry {
    /// Registry reading documents from `source`, with default configuration.
    pub fn new(
        binder: impl DocumentBinder + 'static,
        source: impl ResourceSource + 'static,
    ) -> Self {
        Self::builder(binder).source(source).build()
    }

    pub fn builder(binder: impl DocumentBinder + 'static) -> RegistryBuilder {
        RegistryBuilder {
            binder: Box::new(binder),
            source: None,
            config: LoaderConfig::default(),
            catalog: TypeCatalog::new(),
        }
    }

    /// Remove every fixture, abandon in-flight state and reset the temporal
    /// snapshot. Registered element types are kept.
    pub fn clear(&self) -> &Self {
        let mut state = self.state.lock();
        state.fixtures.clear();
        state.processing_stack.clear();
        state.queue.clear();
        self.temporal.reset();
        debug!("registry cleared");
        self
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().fixtures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.state.lock().fixtures.len()
    }

    /// Registered fixture names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().fixtures.keys().cloned().collect();
        names.sort();
        names
    }

    /// Register a fixture under its name, replacing any previous one.
    /// `None` is ignored.
    pub fn register_fixture(&self, fixture: impl Into<Option<Fixture>>) -> &Self {
        if let Some(fixture) = fixture.into() {
            debug!(fixture = %fixture.name(), elements = fixture.len(), "registering fixture");
            self.state
                .lock()
                .fixtures
                .insert(fixture.name().to_string(), fixture);
        }
        self
    }

    /// Register typed records as a fixture, registering their element type
    /// when it is not known yet.
    pub fn register_records<T: FixtureType>(
        &self,
        name: impl Into<String>,
        records: &[T],
    ) -> FixtureResult<&Self> {
        let fixture = Fixture::from_records(name, records)?;
        let mut state = self.state.lock();
        if !state.catalog.contains(T::TYPE_NAME) {
            state.catalog.insert_type::<T>();
        }
        state.fixtures.insert(fixture.name().to_string(), fixture);
        Ok(self)
    }

    /// Load documents by identifier, in order.
    ///
    /// Each identifier is normalized to end with the configured extension.
    /// Fixtures committed before a failure stay registered.
    pub fn register_json<I, S>(&self, identifiers: I) -> FixtureResult<&Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.state.lock();
        let mut session = LoadSession {
            state: &mut *state,
            source: self.source.as_ref(),
            binder: self.binder.as_ref(),
            temporal: &self.temporal,
            config: &self.config,
        };
        for identifier in identifiers {
            session.register(identifier.as_ref())?;
        }
        Ok(self)
    }

    /// Remove a fixture, returning it when it was registered.
    pub fn unregister(&self, name: &str) -> Option<Fixture> {
        let removed = self.state.lock().fixtures.remove(name);
        if removed.is_some() {
            debug!(fixture = %name, "fixture unregistered");
        }
        removed
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.state.lock().fixtures.contains_key(name)
    }

    /// Element type name of a registered fixture.
    pub fn element_type_of(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .fixtures
            .get(name)
            .map(|f| f.element_type().to_string())
    }

    /// Look up an element type in the catalog.
    pub fn element_type(&self, type_name: &str) -> Option<Arc<ElementType>> {
        self.state.lock().catalog.get(type_name)
    }

    pub fn register_type<T: FixtureType>(&self) -> &Self {
        self.state.lock().catalog.insert_type::<T>();
        self
    }

    pub fn register_element_type(&self, element_type: ElementType) -> &Self {
        self.state.lock().catalog.insert(element_type);
        self
    }

    pub fn temporal(&self) -> &TemporalProvider {
        &self.temporal
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Look up a fixture and apply `f` to it under the lock.
    pub(crate) fn with_fixture<R>(&self, name: &str, f: impl FnOnce(&Fixture) -> R) -> Option<R> {
        self.state.lock().fixtures.get(name).map(f)
    }

    pub(crate) fn decode_error(name: &str, e: serde_json::Error) -> FixtureError {
        FixtureError::conversion(format!("cannot decode element of {}: {}", name, e))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("fixtures", &self.names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Registry`].
pub struct RegistryBuilder {
    binder: Box<dyn DocumentBinder>,
    source: Option<Box<dyn ResourceSource>>,
    config: LoaderConfig,
    catalog: TypeCatalog,
}

impl RegistryBuilder {
    /// Document source. Defaults to [`DirectorySource::from_env`].
    pub fn source(mut self, source: impl ResourceSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn register_type<T: FixtureType>(mut self) -> Self {
        self.catalog.insert_type::<T>();
        self
    }

    pub fn element_type(mut self, element_type: ElementType) -> Self {
        self.catalog.insert(element_type);
        self
    }

    pub fn build(self) -> Registry {
        let source = self
            .source
            .unwrap_or_else(|| Box::new(DirectorySource::from_env()));
        Registry {
            state: Mutex::new(RegistryState {
                catalog: self.catalog,
                ..RegistryState::default()
            }),
            temporal: TemporalProvider::new(),
            binder: self.binder,
            source,
            config: self.config,
        }
    }
}
