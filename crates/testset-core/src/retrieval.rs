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


//! Retrieval of registered elements.
//!
//! Every accessor comes in two flavours: the plain one returns deep copies,
//! the `_with` one takes a `deep` flag. Shallow results share the stored
//! elements; stored elements are never mutated in place after
//! registration, so shared results stay valid for the caller.
//!
//! Unknown fixtures and out-of-range indices yield `None` or an empty
//! sequence, never an error. The `_as` variants decode elements into a
//! typed model and fail only when decoding fails.

use crate::error::FixtureResult;
use crate::registry::Registry;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

fn copy(element: &Arc<Value>, deep: bool) -> Arc<Value> {
    if deep {
        Arc::new(Value::clone(element))
    } else {
        Arc::clone(element)
    }
}

impl Registry {
    /// First element of a fixture, deep copied.
    pub fn get(&self, name: &str) -> Option<Arc<Value>> {
        self.get_with(name, 0, true)
    }

    /// Element at `index`, deep copied.
    pub fn get_at(&self, name: &str, index: usize) -> Option<Arc<Value>> {
        self.get_with(name, index, true)
    }

    pub fn get_with(&self, name: &str, index: usize, deep: bool) -> Option<Arc<Value>> {
        self.with_fixture(name, |fixture| {
            fixture.elements().get(index).map(|e| copy(e, deep))
        })
        .flatten()
    }

    /// All elements of a fixture, deep copied.
    pub fn get_sequence(&self, name: &str) -> Vec<Arc<Value>> {
        self.get_sequence_with(name, true)
    }

    pub fn get_sequence_with(&self, name: &str, deep: bool) -> Vec<Arc<Value>> {
        self.with_fixture(name, |fixture| {
            fixture.elements().iter().map(|e| copy(e, deep)).collect()
        })
        .unwrap_or_default()
    }

    /// Elements at `indexes`, in the order given. Out-of-range indexes are
    /// skipped.
    pub fn get_sequence_at(&self, name: &str, indexes: &[usize]) -> Vec<Arc<Value>> {
        self.get_sequence_at_with(name, indexes, true)
    }

    pub fn get_sequence_at_with(&self, name: &str, indexes: &[usize], deep: bool) -> Vec<Arc<Value>> {
        self.with_fixture(name, |fixture| {
            indexes
                .iter()
                .filter_map(|&i| fixture.elements().get(i))
                .map(|e| copy(e, deep))
                .collect()
        })
        .unwrap_or_default()
    }

    /// Elements whose position is not in `indexes`, in stored order.
    pub fn get_sequence_except(&self, name: &str, indexes: &[usize]) -> Vec<Arc<Value>> {
        self.get_sequence_except_with(name, indexes, true)
    }

    pub fn get_sequence_except_with(
        &self,
        name: &str,
        indexes: &[usize],
        deep: bool,
    ) -> Vec<Arc<Value>> {
        let excluded: HashSet<usize> = indexes.iter().copied().collect();
        self.with_fixture(name, |fixture| {
            fixture
                .elements()
                .iter()
                .enumerate()
                .filter(|(i, _)| !excluded.contains(i))
                .map(|(_, e)| copy(e, deep))
                .collect()
        })
        .unwrap_or_default()
    }

    /// First element decoded as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> FixtureResult<Option<T>> {
        self.get_at_as(name, 0)
    }

    pub fn get_at_as<T: DeserializeOwned>(&self, name: &str, index: usize) -> FixtureResult<Option<T>> {
        self.get_with(name, index, false)
            .map(|e| decode(name, &e))
            .transpose()
    }

    pub fn get_sequence_as<T: DeserializeOwned>(&self, name: &str) -> FixtureResult<Vec<T>> {
        decode_all(name, self.get_sequence_with(name, false))
    }

    pub fn get_sequence_at_as<T: DeserializeOwned>(
        &self,
        name: &str,
        indexes: &[usize],
    ) -> FixtureResult<Vec<T>> {
        decode_all(name, self.get_sequence_at_with(name, indexes, false))
    }

    pub fn get_sequence_except_as<T: DeserializeOwned>(
        &self,
        name: &str,
        indexes: &[usize],
    ) -> FixtureResult<Vec<T>> {
        decode_all(name, self.get_sequence_except_with(name, indexes, false))
    }
}

fn decode<T: DeserializeOwned>(name: &str, element: &Value) -> FixtureResult<T> {
    T::deserialize(element).map_err(|e| Registry::decode_error(name, e))
}

fn decode_all<T: DeserializeOwned>(name: &str, elements: Vec<Arc<Value>>) -> FixtureResult<Vec<T>> {
    elements.iter().map(|e| decode(name, e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{BindHooks, DocumentBinder};
    use crate::model::{Fixture, FixtureCollection};
    use crate::source::MemorySource;
    use crate::FixtureErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    struct NullBinder;

    impl DocumentBinder for NullBinder {
        fn bind(
            &self,
            identifier: &str,
            _raw: &[u8],
            _hooks: &mut dyn BindHooks,
        ) -> FixtureResult<FixtureCollection> {
            Ok(FixtureCollection::new(identifier))
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Personne {
        id: u32,
        name: String,
    }

    fn registry() -> Registry {
        let registry = Registry::new(NullBinder, MemorySource::new());
        registry.register_fixture(Fixture::new(
            "personnes3",
            "model.Personne",
            (0..4)
                .map(|i| json!({"id": i, "name": format!("p{}", i)}))
                .collect(),
        ));
        registry
    }

    fn ids(elements: &[Arc<Value>]) -> Vec<u64> {
        elements.iter().filter_map(|e| e["id"].as_u64()).collect()
    }

    #[test]
    fn test_unknown_fixture() {
        let registry = registry();
        assert!(registry.get("unknown").is_none());
        assert!(registry.get_at("unknown", 3).is_none());
        assert!(registry.get_sequence("unknown").is_empty());
        assert!(registry.get_sequence_at("unknown", &[0]).is_empty());
        assert!(registry.get_sequence_except("unknown", &[0]).is_empty());
        assert_eq!(registry.get_as::<Personne>("unknown").unwrap(), None);
    }

    #[test]
    fn test_get_index_bounds() {
        let registry = registry();
        assert_eq!(registry.get("personnes3").unwrap()["id"], json!(0));
        assert_eq!(registry.get_at("personnes3", 3).unwrap()["id"], json!(3));
        assert!(registry.get_at("personnes3", 4).is_none());
    }

    #[test]
    fn test_deep_and_shallow_copies() {
        let registry = registry();
        let shared = registry.get_sequence_with("personnes3", false);
        let again = registry.get_sequence_with("personnes3", false);
        let copies = registry.get_sequence("personnes3");
        assert_eq!(shared, copies);
        for ((a, b), c) in shared.iter().zip(&again).zip(&copies) {
            assert!(Arc::ptr_eq(a, b));
            assert!(!Arc::ptr_eq(a, c));
        }
    }

    #[test]
    fn test_mutating_copy_leaves_registry_intact() {
        let registry = registry();
        let mut copy = registry.get("personnes3").unwrap();
        Arc::make_mut(&mut copy)["name"] = json!("changed");
        assert_eq!(registry.get("personnes3").unwrap()["name"], json!("p0"));
    }

    #[test]
    fn test_sequence_at_keeps_order_and_skips_out_of_range() {
        let registry = registry();
        assert_eq!(ids(&registry.get_sequence_at("personnes3", &[2, 0, 9])), vec![2, 0]);
    }

    #[test]
    fn test_sequence_except() {
        let registry = registry();
        assert_eq!(ids(&registry.get_sequence_except("personnes3", &[1, 2])), vec![0, 3]);
        assert_eq!(ids(&registry.get_sequence_except("personnes3", &[])), vec![0, 1, 2, 3]);
        assert_eq!(ids(&registry.get_sequence_except("personnes3", &[7])), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_typed_views() {
        let registry = registry();
        let first: Personne = registry.get_as("personnes3").unwrap().unwrap();
        assert_eq!(first, Personne { id: 0, name: "p0".into() });

        let all: Vec<Personne> = registry.get_sequence_as("personnes3").unwrap();
        assert_eq!(all.len(), 4);
        let some: Vec<Personne> = registry.get_sequence_at_as("personnes3", &[3]).unwrap();
        assert_eq!(some[0].name, "p3");
        let rest: Vec<Personne> = registry.get_sequence_except_as("personnes3", &[0, 1, 2]).unwrap();
        assert_eq!(rest[0].id, 3);
        assert!(registry.get_at_as::<Personne>("personnes3", 8).unwrap().is_none());
    }

    #[test]
    fn test_typed_view_decode_failure() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Adresse {
            town: String,
        }
        let registry = registry();
        let err = registry.get_as::<Adresse>("personnes3").unwrap_err();
        assert_eq!(err.kind, FixtureErrorKind::Conversion);
        assert!(err.message.contains("personnes3"));
    }
}
