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


//! JSON document binder for Testset.
//!
//! [`JsonBinder`] implements [`testset_core::DocumentBinder`] for fixture
//! documents written in JSON. See the [`binder`] module for the document
//! shape.
//!
//! # Examples
//!
//! ```rust
//! use testset_core::{ElementType, MemorySource, Registry};
//! use testset_json::JsonBinder;
//!
//! let source = MemorySource::new().with_document(
//!     "adresseTestSet.json",
//!     r#"{"dataClass": "model.Adresse",
//!         "sets": [{"name": "adresses1", "data": [{"id": 1, "town": "Paris"}]}]}"#,
//! );
//! let registry = Registry::builder(JsonBinder::new())
//!     .source(source)
//!     .element_type(ElementType::builder("model.Adresse").field("id").field("town").build())
//!     .build();
//!
//! registry.register_json(["adresseTestSet"]).unwrap();
//! assert_eq!(registry.get("adresses1").unwrap()["town"], "Paris");
//! ```

pub mod binder;
mod error;

pub use binder::{
    JsonBinder, JsonBinderConfig, JsonBinderConfigBuilder, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_DOCUMENT_SIZE,
};
pub use error::JsonBindError;
