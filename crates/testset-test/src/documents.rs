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


//! Canned fixture documents.
//!
//! Identifiers are given in normalized form (with the `.json` suffix), as
//! the loader requests them from a resource source.

use std::io;
use std::path::Path;
use testset_core::MemorySource;

pub const ADRESSE_TEST_SET: &str = r#"{
  "dataClass": "model.Adresse",
  "sets": [
    {"name": "adresses1", "data": [
      {"id": 1, "town": "Juvisy-sur-Orge", "cp": "91260"},
      {"id": 2, "town": "Paris", "cp": "75001"},
      {"id": 3, "town": "Marseille", "cp": "75003"}
    ]},
    {"name": "adresses2", "data": [
      {"id": 4, "town": "Paris", "cp": "75013"}
    ]},
    {"name": "adresseToAdd", "data": [
      {"town": "Paris", "cp": "75002"}
    ]},
    {"name": "adresseToAddSaved", "data": [
      {"id": 4, "town": "Paris", "cp": "75002"}
    ]}
  ]
}"#;

pub const PERSONNE_TEST_SET: &str = r#"{
  "*include": "adresseTestSet",
  "dataClass": "model.Personne",
  "sets": [
    {"name": "personnes1", "data": [
      {"id": 1, "name": "Cyril", "firstname": "Chevalier", "age": 45, "->address": "adresses1,1"}
    ]},
    {"name": "personnes2", "data": [
      {"id": 1, "name": "Cyril", "firstname": "Chevalier", "age": 45,
       "->address": "adresses1,0", "->addresses": "adresses1"},
      {"id": 2, "name": "Paul", "firstname": "Martin", "age": 53,
       "->address": "adresses1,2", "->addresses": "adresses1,2,0"}
    ]},
    {"name": "personnes3", "data": [
      {"id": 1, "name": "Cyril", "firstname": "Chevalier", "age": 45},
      {"id": 2, "name": "Paul", "firstname": "Martin", "age": 53},
      {"id": 3, "name": "Jean", "firstname": "Dupont", "age": 30, "->address": "adresses1,2"},
      {"id": 4, "name": "Marie", "firstname": "Durand", "age": 28, "->address": "adresses2,0"}
    ]}
  ]
}"#;

pub const PERSONNE_TEST_SET_BAD_INCLUDE: &str = r#"{
  "*include": "adresseTestSetUnknown",
  "dataClass": "model.Personne",
  "sets": []
}"#;

pub const PERSONNE_TEST_SET_BAD_REFERENCE: &str = r#"{
  "*include": "adresseTestSet",
  "dataClass": "model.Personne",
  "sets": [
    {"name": "personnes1", "data": [
      {"id": 1, "name": "Cyril", "firstname": "Chevalier", "age": 45, "->address": "unreferenced"}
    ]}
  ]
}"#;

pub const PERSONNE_TEST_SET_BAD_REFERENCE_FIELD: &str = r#"{
  "*include": "adresseTestSet",
  "dataClass": "model.Personne",
  "sets": [
    {"name": "personnes1", "data": [
      {"id": 1, "name": "Cyril", "firstname": "Chevalier", "age": 45, "->unknownField": "adresses1,0"}
    ]}
  ]
}"#;

pub const PERSONNE_TEST_SET_CIRCULAR_INCLUDE: &str = r#"{
  "*include": "adresseTestSetCircularInclude",
  "dataClass": "model.Personne",
  "sets": [
    {"name": "personnes1", "data": [
      {"id": 1, "name": "Cyril", "firstname": "Chevalier", "age": 45, "->address": "adresses1,1"}
    ]}
  ]
}"#;

pub const ADRESSE_TEST_SET_CIRCULAR_INCLUDE: &str = r#"{
  "*include": "personneTestSetCircularInclude",
  "dataClass": "model.Adresse",
  "sets": [
    {"name": "adresses1", "data": [
      {"id": 1, "town": "Juvisy-sur-Orge", "cp": "91260"},
      {"id": 2, "town": "Paris", "cp": "75001"},
      {"id": 3, "town": "Marseille", "cp": "75003"}
    ]},
    {"name": "adresses2", "data": [
      {"id": 4, "town": "Paris", "cp": "75013"}
    ]}
  ]
}"#;

/// References `adresses1` without including it.
pub const PERSONNE_SIBLING_TEST_SET: &str = r#"{
  "dataClass": "model.Personne",
  "sets": [
    {"name": "siblings1", "data": [
      {"id": 7, "name": "Anne", "firstname": "Leroy", "age": 33,
       "->address": "adresses1,0", "->addresses": "adresses1,0,x,2,9"}
    ]}
  ]
}"#;

/// Includes the referencing document before the referenced one.
pub const SIBLING_TEST_SET: &str = r#"{
  "*include": "personneSiblingTestSet, adresseTestSet"
}"#;

pub const PRODUCT_TEST_SET: &str = r#"{
  "dataClass": "model.Product",
  "sets": [
    {"name": "products1", "data": [
      {"id": 1, "name": "Produit 1", "->prices": "prices1,0"},
      {"id": 2, "name": "Produit 2", "->prices": "prices1,1,2,3"}
    ]},
    {"name": "prices1", "dataClass": "model.Price", "data": [
      {"id": 1, "date": "2019-01-01", "price": 301.15, "->product": "products1,0"},
      {"id": 2, "date": "2019-01-01", "price": 28.12, "->product": "products1,1"},
      {"id": 3, "date": "2018-01-01", "price": 27.54, "->product": "products1,1"},
      {"id": 4, "date": "2017-01-01", "price": 27.21, "->product": "products1,1"}
    ]}
  ]
}"#;

pub const COMMAND_TEST_SET: &str = r#"{
  "*include": "personneTestSet, productTestSet",
  "dataClass": "model.Command",
  "sets": [
    {"name": "commands1", "data": [
      {"id": 1, "reference": "C000001", "date": "2019-01-17", "->customer": "personnes1,0",
       "lines": [
         {"id": 1, "quantity": 1, "->product": "products1,0", "->command": "commands1,0"},
         {"id": 2, "quantity": 2, "->product": "products1,1", "->command": "commands1,0"}
       ]}
    ]},
    {"name": "commands2", "data": [
      {"id": 1, "reference": "C000001", "*date": "now", "->customer": "personnes1,0",
       "lines": [
         {"id": 1, "quantity": 1, "->product": "products1,0", "->command": "commands2,0"},
         {"id": 2, "quantity": 2, "->product": "products1,1", "->command": "commands2,0"}
       ]}
    ]},
    {"name": "commands3", "data": [
      {"id": 2, "reference": "C000002", "*date": "NOW"},
      {"id": 3, "reference": "C000003", "*date": "real_now"}
    ]}
  ]
}"#;

/// Uses date-time, instant and collection fields, and an element-level
/// include.
pub const DELIVERY_TEST_SET: &str = r#"{
  "*include": "adresseTestSet",
  "dataClass": "model.Delivery",
  "sets": [
    {"name": "deliveries1", "data": [
      {"id": 1, "*scheduledAt": "now", "*recordedAt": "Now", "->stops": "adresses1,0,2"},
      {"id": 2, "scheduledAt": "2019-01-17T10:30:00", "recordedAt": "2019-01-17T09:30:00Z",
       "*include": "productTestSet", "->stops": "adresses2"}
    ]}
  ]
}"#;

/// Instruction on a field `model.Command` does not declare.
pub const COMMAND_TEST_SET_BAD_INSTRUCTION_FIELD: &str = r#"{
  "dataClass": "model.Command",
  "sets": [
    {"name": "commands1", "data": [
      {"id": 1, "*deliveredAt": "now"}
    ]}
  ]
}"#;

/// `now` on a field that is not temporal is not an instruction.
pub const COMMAND_TEST_SET_BAD_INSTRUCTION: &str = r#"{
  "dataClass": "model.Command",
  "sets": [
    {"name": "commands1", "data": [
      {"id": 1, "*reference": "now"}
    ]}
  ]
}"#;

/// Every canned document as `(identifier, content)`.
pub fn all() -> Vec<(&'static str, &'static str)> {
    vec![
        ("adresseTestSet.json", ADRESSE_TEST_SET),
        ("personneTestSet.json", PERSONNE_TEST_SET),
        ("personneTestSetBadInclude.json", PERSONNE_TEST_SET_BAD_INCLUDE),
        ("personneTestSetBadReference.json", PERSONNE_TEST_SET_BAD_REFERENCE),
        ("personneTestSetBadReferenceField.json", PERSONNE_TEST_SET_BAD_REFERENCE_FIELD),
        ("personneTestSetCircularInclude.json", PERSONNE_TEST_SET_CIRCULAR_INCLUDE),
        ("adresseTestSetCircularInclude.json", ADRESSE_TEST_SET_CIRCULAR_INCLUDE),
        ("personneSiblingTestSet.json", PERSONNE_SIBLING_TEST_SET),
        ("siblingTestSet.json", SIBLING_TEST_SET),
        ("productTestSet.json", PRODUCT_TEST_SET),
        ("commandTestSet.json", COMMAND_TEST_SET),
        ("deliveryTestSet.json", DELIVERY_TEST_SET),
        ("commandTestSetBadInstruction.json", COMMAND_TEST_SET_BAD_INSTRUCTION),
        ("commandTestSetBadInstructionField.json", COMMAND_TEST_SET_BAD_INSTRUCTION_FIELD),
    ]
}

/// In-memory source holding every canned document.
pub fn memory_source() -> MemorySource {
    all()
        .into_iter()
        .fold(MemorySource::new(), |source, (id, content)| source.with_document(id, content))
}

/// Write every canned document into `dir`.
pub fn write_to_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (id, content) in all() {
        std::fs::write(dir.join(id), content)?;
    }
    Ok(())
}
