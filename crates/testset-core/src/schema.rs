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

//! Element types and their field locators.
//!
//! An [`ElementType`] declares, once per type, the named fields an element
//! may carry together with the metadata the engine needs to patch them:
//! the [`TargetShape`] deciding how reference results are delivered, and the
//! [`FieldKind`] deciding which temporal value an instruction produces and
//! whether nested objects are bound as records of another type.
//!
//! Types are registered in a [`TypeCatalog`] and shared as `Arc<ElementType>`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// How a reference result is delivered to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetShape {
    /// A single element.
    Scalar,
    /// An ordered sequence of elements.
    Sequence,
    /// A generic collection of elements.
    Collection,
}

impl TargetShape {
    /// Whether the field receives several elements.
    pub fn is_plural(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

/// Declared value kind of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Any JSON value, copied verbatim.
    Value,
    /// Calendar date (`chrono::NaiveDate`).
    Date,
    /// Local date-time (`chrono::NaiveDateTime`).
    DateTime,
    /// Wall-clock instant (`chrono::DateTime<Utc>`).
    Instant,
    /// Nested record of the named element type.
    Record(String),
}

impl FieldKind {
    /// Whether instruction directives may target this kind.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Instant)
    }
}

/// One named field of an element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub shape: TargetShape,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, shape: TargetShape, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            shape,
            kind,
        }
    }

    /// Element type of nested records, if any.
    pub fn record_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Record(name) => Some(name),
            _ => None,
        }
    }
}

/// Descriptor of an element type: its name and field locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementType {
    name: String,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl ElementType {
    /// Start describing a type.
    pub fn builder(name: impl Into<String>) -> ElementTypeBuilder {
        ElementTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locate a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Builder for [`ElementType`].
///
/// # Examples
///
/// ```rust
/// use testset_core::{ElementType, TargetShape};
///
/// let personne = ElementType::builder("model.Personne")
///     .field("id")
///     .field("name")
///     .record("address", "model.Adresse")
///     .sequence_of("addresses", "model.Adresse")
///     .build();
///
/// assert_eq!(personne.field("addresses").unwrap().shape, TargetShape::Sequence);
/// assert!(personne.field("unknown").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ElementTypeBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ElementTypeBuilder {
    /// Add a field; a later declaration with the same name replaces it.
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.fields.retain(|f| f.name != spec.name);
        self.fields.push(spec);
        self
    }

    /// Plain scalar value.
    pub fn field(self, name: &str) -> Self {
        self.with_field(FieldSpec::new(name, TargetShape::Scalar, FieldKind::Value))
    }

    pub fn date(self, name: &str) -> Self {
        self.with_field(FieldSpec::new(name, TargetShape::Scalar, FieldKind::Date))
    }

    pub fn date_time(self, name: &str) -> Self {
        self.with_field(FieldSpec::new(name, TargetShape::Scalar, FieldKind::DateTime))
    }

    pub fn instant(self, name: &str) -> Self {
        self.with_field(FieldSpec::new(name, TargetShape::Scalar, FieldKind::Instant))
    }

    /// Single nested record.
    pub fn record(self, name: &str, type_name: &str) -> Self {
        self.with_field(FieldSpec::new(
            name,
            TargetShape::Scalar,
            FieldKind::Record(type_name.to_string()),
        ))
    }

    /// Ordered sequence of plain values.
    pub fn sequence(self, name: &str) -> Self {
        self.with_field(FieldSpec::new(name, TargetShape::Sequence, FieldKind::Value))
    }

    /// Ordered sequence of nested records.
    pub fn sequence_of(self, name: &str, type_name: &str) -> Self {
        self.with_field(FieldSpec::new(
            name,
            TargetShape::Sequence,
            FieldKind::Record(type_name.to_string()),
        ))
    }

    /// Generic collection of plain values.
    pub fn collection(self, name: &str) -> Self {
        self.with_field(FieldSpec::new(name, TargetShape::Collection, FieldKind::Value))
    }

    /// Generic collection of nested records.
    pub fn collection_of(self, name: &str, type_name: &str) -> Self {
        self.with_field(FieldSpec::new(
            name,
            TargetShape::Collection,
            FieldKind::Record(type_name.to_string()),
        ))
    }

    pub fn build(self) -> ElementType {
        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        ElementType {
            name: self.name,
            fields: self.fields,
            index,
        }
    }
}

/// A Rust type usable as fixture element.
///
/// The serde representation must match the element objects of the
/// documents: every serialized key should be declared in
/// [`FixtureType::element_type`].
pub trait FixtureType: Serialize + DeserializeOwned {
    /// Name used by documents (`dataClass`) to select this type.
    const TYPE_NAME: &'static str;

    /// Field locators of this type.
    fn element_type() -> ElementType;
}

/// Catalog of element types, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<ElementType>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type descriptor, replacing any previous one with the same name.
    pub fn insert(&mut self, element_type: ElementType) -> Arc<ElementType> {
        let shared = Arc::new(element_type);
        self.types
            .insert(shared.name().to_string(), Arc::clone(&shared));
        shared
    }

    /// Register a [`FixtureType`] implementor.
    pub fn insert_type<T: FixtureType>(&mut self) -> Arc<ElementType> {
        let element_type = T::element_type();
        debug_assert_eq!(element_type.name(), T::TYPE_NAME);
        self.insert(element_type)
    }

    pub fn get(&self, name: &str) -> Option<Arc<ElementType>> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
