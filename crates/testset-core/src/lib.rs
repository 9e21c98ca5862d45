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


//! Fixture registry, reference resolution and retrieval for Testset.
//!
//! This crate holds the engine behind Testset: named, typed fixtures loaded
//! from documents, wired together by reference directives and served to
//! tests as independent copies.
//!
//! # Loading
//!
//! [`Registry::register_json`] loads documents through a [`ResourceSource`]
//! and a [`DocumentBinder`]. Documents may include further documents;
//! circular includes are loaded once. References (`->field`) are resolved
//! after the outermost document completes, so they may name fixtures from
//! any document of the include tree.
//!
//! # Element types
//!
//! Binders and the directive interpreter locate fields through
//! [`ElementType`] tables held in a [`TypeCatalog`]. Typed models describe
//! themselves by implementing [`FixtureType`].

mod binder;
mod config;
pub mod directives;
mod error;
pub mod expression;
mod loader;
mod model;
mod registry;
pub mod resolver;
mod retrieval;
mod schema;
mod source;
pub mod temporal;

pub use binder::{BindHooks, DocumentBinder, ObjectContext};
pub use config::{DirectiveConfig, LoaderConfig, LoaderConfigBuilder, DEFAULT_EXTENSION, DEFAULT_MAX_INCLUDE_DEPTH};
pub use error::{FixtureError, FixtureErrorKind, FixtureResult, FixtureResultExt, MapErrToFixture};
pub use model::{ElementLocation, Fixture, FixtureCollection, FixtureId, PathSegment};
pub use registry::{Registry, RegistryBuilder};
pub use schema::{ElementType, ElementTypeBuilder, FieldKind, FieldSpec, FixtureType, TargetShape, TypeCatalog};
pub use source::{DirectorySource, MemorySource, ResourceSource, DEFAULT_FIXTURES_DIR, FIXTURES_DIR_ENV};
pub use temporal::{Instruction, TemporalProvider, TemporalSnapshot};
