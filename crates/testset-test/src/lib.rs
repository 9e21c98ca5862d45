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


//! Shared test models and fixture documents for Testset.
//!
//! # Quick Start
//!
//! ```rust
//! use testset_core::ResourceSource;
//! use testset_test::{documents, models};
//!
//! let source = documents::memory_source();
//! assert!(source.fetch("personneTestSet.json").unwrap().is_some());
//! assert_eq!(models::adresses1()[1].town, "Paris");
//! ```

/// Canned fixture documents.
pub mod documents;

/// Sample element models.
pub mod models;

pub use documents::{memory_source, write_to_dir};
pub use models::{
    element_types, Adresse, Command, CommandLine, Delivery, Personne, Price, Product,
};

use testset_core::Registry;
use tracing_subscriber::EnvFilter;

/// Register every sample element type into `registry`.
pub fn register_all_types(registry: &Registry) {
    for element_type in element_types() {
        registry.register_element_type(element_type);
    }
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
