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

//! Fixture data model.

use crate::error::{FixtureError, FixtureResult};
use crate::schema::FixtureType;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_FIXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a fixture instance.
///
/// Two fixtures with the same name (e.g. one replacing the other in the
/// registry) never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixtureId(u64);

impl FixtureId {
    fn next() -> Self {
        Self(NEXT_FIXTURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named, typed, ordered sequence of sample elements.
#[derive(Debug, Clone)]
pub struct Fixture {
    id: FixtureId,
    name: String,
    element_type: String,
    elements: Vec<Arc<Value>>,
}

impl Fixture {
    /// Create a fixture from raw elements.
    pub fn new(name: impl Into<String>, element_type: impl Into<String>, elements: Vec<Value>) -> Self {
        Self {
            id: FixtureId::next(),
            name: name.into(),
            element_type: element_type.into(),
            elements: elements.into_iter().map(Arc::new).collect(),
        }
    }

    /// Create a fixture from typed records.
    pub fn from_records<T: FixtureType>(name: impl Into<String>, records: &[T]) -> FixtureResult<Self> {
        let elements = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FixtureError::conversion(format!("cannot encode {}: {}", T::TYPE_NAME, e)))?;
        Ok(Self::new(name, T::TYPE_NAME, elements))
    }

    pub fn id(&self) -> FixtureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the element type.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn elements(&self) -> &[Arc<Value>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append an element.
    pub fn push(&mut self, element: Value) {
        self.elements.push(Arc::new(element));
    }

    pub(crate) fn element_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.elements.get_mut(index).map(Arc::make_mut)
    }
}

impl PartialEq for Fixture {
    /// Value equality: identity is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.element_type == other.element_type
            && self.elements == other.elements
    }
}

/// The fixtures produced by binding one document.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureCollection {
    pub element_type: String,
    pub fixtures: Vec<Fixture>,
}

impl FixtureCollection {
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            fixtures: Vec::new(),
        }
    }
}

/// One step from an element down to a nested object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Address of an object inside a fixture element.
///
/// The empty path designates the element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementLocation {
    pub fixture: FixtureId,
    pub index: usize,
    pub path: Vec<PathSegment>,
}

impl ElementLocation {
    pub fn element(fixture: FixtureId, index: usize) -> Self {
        Self {
            fixture,
            index,
            path: Vec::new(),
        }
    }

    /// Location of the object stored under `key`.
    pub fn key(&self, key: &str) -> Self {
        let mut path = self.path.clone();
        path.push(PathSegment::Key(key.to_string()));
        Self {
            fixture: self.fixture,
            index: self.index,
            path,
        }
    }

    /// Location of the `index`-th item of the array at this location.
    pub fn item(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(PathSegment::Index(index));
        Self {
            fixture: self.fixture,
            index: self.index,
            path,
        }
    }

    /// Walk `path` from `root`, returning the addressed object map.
    pub(crate) fn locate<'a>(
        &self,
        root: &'a mut Value,
    ) -> Option<&'a mut serde_json::Map<String, Value>> {
        let mut current = root;
        for segment in &self.path {
            current = match segment {
                PathSegment::Key(key) => current.as_object_mut()?.get_mut(key)?,
                PathSegment::Index(i) => current.as_array_mut()?.get_mut(*i)?,
            };
        }
        current.as_object_mut()
    }
}

impl fmt::Display for ElementLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.fixture, self.index)?;
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}
