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


//! Document loading.
//!
//! A [`LoadSession`] drives one outermost registration: it keeps the
//! processing stack that breaks circular includes, hands document bytes to
//! the binder, commits the resulting fixtures and, once the stack is empty
//! again, resolves the queued references.

use crate::binder::{BindHooks, DocumentBinder, ObjectContext};
use crate::config::LoaderConfig;
use crate::directives::{self, Outcome};
use crate::error::{FixtureError, FixtureResult, FixtureResultExt, MapErrToFixture};
use crate::registry::RegistryState;
use crate::schema::ElementType;
use crate::source::ResourceSource;
use crate::temporal::TemporalProvider;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Borrowed view of the registry for the duration of one load.
pub(crate) struct LoadSession<'a> {
    pub(crate) state: &'a mut RegistryState,
    pub(crate) source: &'a dyn ResourceSource,
    pub(crate) binder: &'a dyn DocumentBinder,
    pub(crate) temporal: &'a TemporalProvider,
    pub(crate) config: &'a LoaderConfig,
}

impl LoadSession<'_> {
    /// Register one document and everything it includes.
    ///
    /// Identifiers already being processed are skipped. References are
    /// resolved when the outermost call returns; on failure they are
    /// abandoned, but fixtures committed so far stay registered.
    pub(crate) fn register(&mut self, identifier: &str) -> FixtureResult<()> {
        let identifier = self.config.normalize(identifier);
        if self.state.processing_stack.contains(&identifier) {
            debug!(document = %identifier, "document already being processed, skipping");
            return Ok(());
        }
        if self.state.processing_stack.len() >= self.config.max_include_depth {
            return Err(FixtureError::limit(format!(
                "include depth exceeds maximum of {} while loading {}",
                self.config.max_include_depth, identifier
            )));
        }

        self.state.processing_stack.push(identifier.clone());
        let loaded = self
            .load(&identifier)
            .with_context(|| format!("while loading {}", identifier));
        self.state.processing_stack.pop();

        if !self.state.processing_stack.is_empty() {
            return loaded;
        }
        match loaded {
            Ok(()) => {
                let state = &mut *self.state;
                state.queue.drain(&mut state.fixtures)
            }
            Err(e) => {
                self.state.queue.clear();
                Err(e)
            }
        }
    }

    fn load(&mut self, identifier: &str) -> FixtureResult<()> {
        debug!(document = %identifier, depth = self.state.processing_stack.len(), "loading document");
        let raw = self
            .source
            .fetch(identifier)
            .map_err_to_fixture(|e| FixtureError::io(format!("cannot read {}: {}", identifier, e)))?
            .ok_or_else(|| FixtureError::resource_not_found(identifier))?;

        let binder = self.binder;
        let collection = binder.bind(identifier, &raw, self)?;
        for fixture in collection.fixtures {
            debug!(
                document = %identifier,
                fixture = %fixture.name(),
                elements = fixture.len(),
                "registering fixture"
            );
            self.state.fixtures.insert(fixture.name().to_string(), fixture);
        }
        Ok(())
    }
}

impl BindHooks for LoadSession<'_> {
    fn resolve_type(&mut self, name: &str) -> Option<Arc<ElementType>> {
        self.state.catalog.get(name)
    }

    fn include_key(&self) -> &str {
        &self.config.directives.include_key
    }

    fn include(&mut self, includes: &str) -> FixtureResult<()> {
        for identifier in self.config.split_includes(includes) {
            debug!(document = %identifier, "including document");
            self.register(&identifier)?;
        }
        Ok(())
    }

    fn unknown_field(
        &mut self,
        target: ObjectContext<'_>,
        key: &str,
        raw: &Value,
    ) -> FixtureResult<bool> {
        let outcome = directives::interpret(
            &self.config.directives,
            self.temporal,
            &mut self.state.queue,
            target,
            key,
            raw,
        )?;
        match outcome {
            Outcome::Handled => Ok(true),
            Outcome::NotHandled => Ok(false),
            Outcome::Include(includes) => {
                self.include(&includes)?;
                Ok(true)
            }
        }
    }
}
