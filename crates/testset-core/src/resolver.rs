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


//! Deferred reference resolution.
//!
//! Reference directives are queued while documents are bound and resolved
//! once the outermost load completes, so a reference may name a fixture
//! registered by any document of the include tree.
//!
//! Resolved values are copies of the source elements. To keep chained
//! references consistent, pending references that patch a source fixture are
//! resolved before references that read from it. A reference reached again
//! while it is being resolved is skipped, which ends reference cycles with
//! the source state at that moment.

use crate::error::{FixtureError, FixtureResult};
use crate::expression::ReferenceExpr;
use crate::model::{ElementLocation, Fixture, FixtureId};
use crate::schema::{FieldSpec, TargetShape};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A reference directive waiting for resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReference {
    /// Object receiving the resolved value.
    pub target: ElementLocation,
    /// Field of the object to assign.
    pub field: FieldSpec,
    /// Element type owning `field`.
    pub owner: String,
    /// Raw reference expression.
    pub expression: String,
}

/// Queue of pending references for one outermost load.
#[derive(Debug, Clone, Default)]
pub struct ReferenceQueue {
    pending: Vec<PendingReference>,
}

impl ReferenceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, reference: PendingReference) {
        self.pending.push(reference);
    }

    pub fn pending(&self) -> &[PendingReference] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Resolve every queued reference against `fixtures`.
    ///
    /// The queue is emptied whether or not resolution succeeds.
    pub fn drain(&mut self, fixtures: &mut HashMap<String, Fixture>) -> FixtureResult<()> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(());
        }
        debug!(count = pending.len(), "resolving references");
        Drain::new(fixtures, pending).run()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Pending,
    InProgress,
    Done,
}

struct Drain<'a> {
    fixtures: &'a mut HashMap<String, Fixture>,
    pending: Vec<PendingReference>,
    status: Vec<Status>,
    // pending references by the fixture they patch
    by_target: HashMap<FixtureId, Vec<usize>>,
    names: HashMap<FixtureId, String>,
}

impl<'a> Drain<'a> {
    fn new(fixtures: &'a mut HashMap<String, Fixture>, pending: Vec<PendingReference>) -> Self {
        let mut by_target: HashMap<FixtureId, Vec<usize>> = HashMap::new();
        for (i, reference) in pending.iter().enumerate() {
            by_target.entry(reference.target.fixture).or_default().push(i);
        }
        let names = fixtures
            .iter()
            .map(|(name, fixture)| (fixture.id(), name.clone()))
            .collect();
        Self {
            fixtures,
            status: vec![Status::Pending; pending.len()],
            pending,
            by_target,
            names,
        }
    }

    fn run(mut self) -> FixtureResult<()> {
        for i in 0..self.pending.len() {
            self.resolve(i)?;
        }
        Ok(())
    }

    fn resolve(&mut self, i: usize) -> FixtureResult<()> {
        if self.status[i] != Status::Pending {
            return Ok(());
        }
        self.status[i] = Status::InProgress;

        let expr = ReferenceExpr::parse(&self.pending[i].expression);
        let dependencies = self
            .fixtures
            .get(&expr.fixture)
            .and_then(|source| self.by_target.get(&source.id()))
            .cloned()
            .unwrap_or_default();
        for j in dependencies {
            self.resolve(j)?;
        }

        let value = self.evaluate(&self.pending[i], &expr)?;
        self.assign(i, value);
        self.status[i] = Status::Done;
        Ok(())
    }

    fn evaluate(&self, reference: &PendingReference, expr: &ReferenceExpr) -> FixtureResult<Value> {
        let unresolved =
            || FixtureError::reference_resolution(&reference.expression, &reference.field.name);
        let source = self.fixtures.get(&expr.fixture).ok_or_else(unresolved)?;
        match reference.field.shape {
            TargetShape::Sequence | TargetShape::Collection => Ok(Value::Array(
                expr.select_sequence(source.elements())
                    .into_iter()
                    .map(|element| (*element).clone())
                    .collect(),
            )),
            TargetShape::Scalar => expr
                .select_single(source.elements())
                .map(|element| (*element).clone())
                .ok_or_else(unresolved),
        }
    }

    fn assign(&mut self, i: usize, value: Value) {
        let reference = &self.pending[i];
        let location = &reference.target;
        let slot = self
            .names
            .get(&location.fixture)
            .and_then(|name| self.fixtures.get_mut(name))
            .and_then(|fixture| fixture.element_mut(location.index))
            .and_then(|element| location.locate(element));
        match slot {
            Some(object) => {
                debug!(
                    location = %location,
                    field = %reference.field.name,
                    expression = %reference.expression,
                    "reference resolved"
                );
                object.insert(reference.field.name.clone(), value);
            }
            None => warn!(
                location = %location,
                field = %reference.field.name,
                owner = %reference.owner,
                "reference target no longer registered, dropping"
            ),
        }
    }
}
