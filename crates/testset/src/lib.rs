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


//! # Testset - Named, typed test fixtures
//!
//! Testset loads sample data for tests from JSON documents into a registry
//! of named fixtures. Documents can include each other and wire elements
//! together with references; tests then retrieve independent copies of the
//! elements they need.
//!
//! ## Quick Start
//!
//! ```rust
//! use testset::{ElementType, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with_document("adresseTestSet.json", r#"{
//!         "dataClass": "model.Adresse",
//!         "sets": [{"name": "adresses1", "data": [{"id": 1, "town": "Paris"}]}]
//!     }"#)
//!     .with_document("personneTestSet.json", r#"{
//!         "*include": "adresseTestSet",
//!         "dataClass": "model.Personne",
//!         "sets": [{"name": "personnes1", "data": [{"id": 1, "->address": "adresses1,0"}]}]
//!     }"#);
//!
//! let registry = testset::registry(source);
//! registry
//!     .register_element_type(ElementType::builder("model.Adresse").field("id").field("town").build())
//!     .register_element_type(
//!         ElementType::builder("model.Personne")
//!             .field("id")
//!             .record("address", "model.Adresse")
//!             .build(),
//!     );
//!
//! registry.register_json(["personneTestSet"]).unwrap();
//! let personne = registry.get("personnes1").unwrap();
//! assert_eq!(personne["address"]["town"], "Paris");
//! ```
//!
//! ## Documents
//!
//! - `*include`: comma-separated documents to load first
//! - `dataClass`: default element type of the document's fixtures
//! - `sets`: fixtures, each `{"name", "dataClass"?, "data"}`
//! - `"->field": "fixture[,index...]"` inside an element: reference
//! - `"*field": "now" | "real_now"` on a date/time field: current time
//!
//! ## Modules
//!
//! - [`json`]: the JSON binder and its configuration
//! - [`directives`], [`expression`], [`resolver`], [`temporal`]: engine internals

pub use testset_core::{
    directives, expression, resolver, temporal,
    // Binder seam
    BindHooks, DocumentBinder, ObjectContext,
    // Configuration
    DirectiveConfig, LoaderConfig, LoaderConfigBuilder,
    // Element types
    ElementType, ElementTypeBuilder, FieldKind, FieldSpec, FixtureType, TargetShape, TypeCatalog,
    // Errors
    FixtureError, FixtureErrorKind, FixtureResult, FixtureResultExt, MapErrToFixture,
    // Model
    ElementLocation, Fixture, FixtureCollection, FixtureId, PathSegment,
    // Registry
    Registry, RegistryBuilder,
    // Sources
    DirectorySource, MemorySource, ResourceSource, FIXTURES_DIR_ENV,
    // Time
    TemporalProvider, TemporalSnapshot,
};

// Re-export the JSON binder
pub mod json {
    //! JSON document binding
    pub use testset_json::{JsonBindError, JsonBinder, JsonBinderConfig, JsonBinderConfigBuilder};
}

/// Commonly used items.
pub mod prelude {
    pub use crate::{global, FixtureResult, FixtureResultExt, FixtureType, Registry};
}

use once_cell::sync::Lazy;
use testset_json::JsonBinder;
use tracing::debug;

static GLOBAL: Lazy<Registry> = Lazy::new(|| {
    let source = DirectorySource::from_env();
    debug!(root = %source.root().display(), "initializing global registry");
    Registry::builder(JsonBinder::new()).source(source).build()
});

/// The process-wide registry.
///
/// Documents are read from the directory named by `TESTSET_FIXTURES_DIR`
/// (default `tests/fixtures`), resolved when the registry is first used.
/// Tests sharing it should call [`Registry::clear`] before loading.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// A registry binding JSON documents from `source`.
pub fn registry(source: impl ResourceSource + 'static) -> Registry {
    Registry::new(JsonBinder::new(), source)
}

/// A registry builder preset with the default JSON binder.
///
/// # Examples
///
/// ```rust
/// use testset::{LoaderConfig, MemorySource};
///
/// let registry = testset::builder()
///     .source(MemorySource::new())
///     .config(LoaderConfig::builder().max_include_depth(8).build())
///     .build();
/// assert!(registry.is_empty());
/// ```
pub fn builder() -> RegistryBuilder {
    Registry::builder(JsonBinder::new())
}

/// A registry builder with a configured JSON binder.
pub fn builder_with(config: json::JsonBinderConfig) -> RegistryBuilder {
    Registry::builder(JsonBinder::with_config(config))
}
