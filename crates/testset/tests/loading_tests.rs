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


//! Loading documents: includes, references, instructions and failures.

use chrono::{Local, NaiveDate, TimeZone};
use std::sync::Arc;
use testset::{FixtureErrorKind, Registry};
use testset_test::{models, Adresse, Command, CommandLine, Delivery, Personne, Price, Product};

fn registry() -> Registry {
    testset_test::init_tracing();
    let registry = testset::registry(testset_test::memory_source());
    testset_test::register_all_types(&registry);
    registry
}

fn personne(id: i64, name: &str, firstname: &str, age: i32) -> Personne {
    Personne {
        id: Some(id),
        name: name.to_string(),
        firstname: firstname.to_string(),
        age,
        address: None,
        addresses: None,
    }
}

fn cyril() -> Personne {
    Personne {
        address: Some(models::adresses1()[1].clone()),
        ..personne(1, "Cyril", "Chevalier", 45)
    }
}

fn bare_lines() -> Vec<CommandLine> {
    let products = models::products1();
    vec![
        CommandLine {
            id: Some(1),
            quantity: 1,
            product: Some(products[0].clone()),
            command: None,
        },
        CommandLine {
            id: Some(2),
            quantity: 2,
            product: Some(products[1].clone()),
            command: None,
        },
    ]
}

/// Lines of a command whose lines point back at it.
///
/// The second line's back reference is resolved first and holds the command
/// before any back reference; the first line's holds it with the second
/// line's back reference in place.
fn lines(header: &Command) -> Vec<CommandLine> {
    let bare = bare_lines();
    let second = CommandLine {
        command: Some(Box::new(Command {
            lines: bare.clone(),
            ..header.clone()
        })),
        ..bare[1].clone()
    };
    let first = CommandLine {
        command: Some(Box::new(Command {
            lines: vec![bare[0].clone(), second.clone()],
            ..header.clone()
        })),
        ..bare[0].clone()
    };
    vec![first, second]
}

fn command(date: Option<NaiveDate>) -> Command {
    let header = Command {
        id: Some(1),
        reference: "C000001".to_string(),
        date,
        customer: Some(cyril()),
        lines: Vec::new(),
    };
    Command {
        lines: lines(&header),
        ..header
    }
}

// ==================== Simple documents ====================

#[test]
fn test_register_simple_document() {
    let registry = registry();
    registry.register_json(["adresseTestSet"]).unwrap();

    for name in ["adresses1", "adresses2", "adresseToAdd", "adresseToAddSaved"] {
        assert!(registry.is_registered(name), "{}", name);
    }
    let first: Adresse = registry.get_as("adresses1").unwrap().unwrap();
    assert_eq!(first, models::adresses1()[0]);
    let all: Vec<Adresse> = registry.get_sequence_as("adresses1").unwrap();
    assert_eq!(all, models::adresses1());
    let to_add: Adresse = registry.get_as("adresseToAdd").unwrap().unwrap();
    assert_eq!(to_add, Adresse::of(None, "Paris", "75002"));
}

#[test]
fn test_identifiers_are_normalized() {
    let registry = registry();
    registry.register_json([" adresseTestSet.json "]).unwrap();
    assert!(registry.is_registered("adresses1"));
}

#[test]
fn test_register_several_documents() {
    let registry = registry();
    registry
        .register_json(["adresseTestSet", "productTestSet", "adresseTestSet"])
        .unwrap();
    assert!(registry.is_registered("adresses2"));
    assert!(registry.is_registered("products1"));
}

#[test]
fn test_element_type_of() {
    let registry = registry();
    registry.register_json(["personneTestSet"]).unwrap();
    assert_eq!(registry.element_type_of("personnes1").as_deref(), Some("model.Personne"));
    assert_eq!(registry.element_type_of("adresses1").as_deref(), Some("model.Adresse"));
    assert!(registry.element_type_of("unknown").is_none());
}

// ==================== References ====================

#[test]
fn test_register_document_with_references() {
    let registry = registry();
    registry.register_json(["personneTestSet"]).unwrap();

    for name in ["personnes1", "personnes2", "personnes3", "adresses1", "adresses2"] {
        assert!(registry.is_registered(name), "{}", name);
    }

    let adresses = models::adresses1();
    let p1: Personne = registry.get_as("personnes1").unwrap().unwrap();
    assert_eq!(p1, cyril());

    let p2: Vec<Personne> = registry.get_sequence_as("personnes2").unwrap();
    assert_eq!(
        p2,
        vec![
            Personne {
                address: Some(adresses[0].clone()),
                addresses: Some(adresses.clone()),
                ..personne(1, "Cyril", "Chevalier", 45)
            },
            Personne {
                address: Some(adresses[2].clone()),
                addresses: Some(vec![adresses[2].clone(), adresses[0].clone()]),
                ..personne(2, "Paul", "Martin", 53)
            },
        ]
    );
}

#[test]
fn test_references_across_sibling_includes() {
    // the referencing document is included before the referenced one
    let registry = registry();
    registry.register_json(["siblingTestSet"]).unwrap();

    let adresses = models::adresses1();
    let sibling: Personne = registry.get_as("siblings1").unwrap().unwrap();
    assert_eq!(sibling.address, Some(adresses[0].clone()));
    assert_eq!(
        sibling.addresses,
        Some(vec![adresses[0].clone(), adresses[2].clone()])
    );
}

#[test]
fn test_circular_include_does_not_loop() {
    let registry = registry();
    registry.register_json(["personneTestSetCircularInclude"]).unwrap();

    assert!(registry.is_registered("personnes1"));
    assert!(registry.is_registered("adresses1"));
    assert!(registry.is_registered("adresses2"));
    let p1: Personne = registry.get_as("personnes1").unwrap().unwrap();
    assert_eq!(p1, cyril());
}

#[test]
fn test_complex_document() {
    let registry = registry();
    registry.register_json(["commandTestSet"]).unwrap();

    for name in ["commands1", "products1", "personnes1", "adresses1", "prices1"] {
        assert!(registry.is_registered(name), "{}", name);
    }

    let products: Vec<Product> = registry.get_sequence_as("products1").unwrap();
    assert_eq!(products, models::products1());

    let command: Command = registry.get_as("commands1").unwrap().unwrap();
    assert_eq!(command, self::command(NaiveDate::from_ymd_opt(2019, 1, 17)));
}

#[test]
fn test_back_references_are_cut_where_the_cycle_closes() {
    let registry = registry();
    registry.register_json(["productTestSet"]).unwrap();

    let prices: Vec<Price> = registry.get_sequence_as("prices1").unwrap();
    assert_eq!(prices, models::prices1());

    let products: Vec<Product> = registry.get_sequence_as("products1").unwrap();
    for product in &products {
        for price in product.prices.as_deref().unwrap() {
            let owner = price.product.as_deref().unwrap();
            assert_eq!(owner.id, product.id);
            assert_eq!(owner.name, product.name);
            assert!(owner.prices.is_none());
        }
    }

    registry.register_json(["commandTestSet"]).unwrap();
    let command: Command = registry.get_as("commands1").unwrap().unwrap();
    for line in &command.lines {
        let owner = line.command.as_deref().unwrap();
        assert_eq!(owner.id, command.id);
        assert_eq!(owner.customer, command.customer);
        assert_eq!(owner.lines.len(), 2);
    }
    // a copy never contains the reference being resolved
    assert!(command.lines[0].command.as_ref().unwrap().lines[0].command.is_none());
    assert!(command.lines[1].command.as_ref().unwrap().lines[1].command.is_none());
}

// ==================== Instructions ====================

#[test]
fn test_now_instruction_uses_snapshot() {
    let registry = registry();
    registry.register_json(["commandTestSet"]).unwrap();
    let today = registry.temporal().current_date();

    let command: Command = registry.get_as("commands2").unwrap().unwrap();
    assert_eq!(command, self::command(Some(today)));

    let upper: Command = registry.get_at_as("commands3", 0).unwrap().unwrap();
    assert_eq!(upper.date, Some(today));
}

#[test]
fn test_real_now_instruction_reads_wall_clock() {
    let registry = registry();
    registry
        .temporal()
        .reset_to(Local.with_ymd_and_hms(2019, 1, 17, 12, 0, 0).unwrap());
    registry.register_json(["commandTestSet"]).unwrap();

    let frozen: Command = registry.get_at_as("commands3", 0).unwrap().unwrap();
    assert_eq!(frozen.date, NaiveDate::from_ymd_opt(2019, 1, 17));

    let real: Command = registry.get_at_as("commands3", 1).unwrap().unwrap();
    let real = real.date.unwrap();
    assert!((real - Local::now().date_naive()).num_days().abs() <= 1);
}

#[test]
fn test_snapshot_is_stable_until_clear() {
    let registry = registry();
    let fixed = Local.with_ymd_and_hms(2019, 1, 17, 12, 0, 0).unwrap();
    registry.temporal().reset_to(fixed);

    registry.register_json(["commandTestSet"]).unwrap();
    let first: Command = registry.get_as("commands2").unwrap().unwrap();
    registry.register_json(["commandTestSet"]).unwrap();
    let second: Command = registry.get_as("commands2").unwrap().unwrap();
    assert_eq!(first.date, second.date);
    assert_eq!(first.date, Some(fixed.date_naive()));

    registry.clear().register_json(["commandTestSet"]).unwrap();
    let after: Command = registry.get_as("commands2").unwrap().unwrap();
    assert_ne!(after.date, Some(fixed.date_naive()));
}

#[test]
fn test_date_time_and_instant_instructions() {
    let registry = registry();
    registry.register_json(["deliveryTestSet"]).unwrap();
    let snapshot = registry.temporal().snapshot();

    let deliveries: Vec<Delivery> = registry.get_sequence_as("deliveries1").unwrap();
    let adresses = models::adresses1();

    assert_eq!(deliveries[0].scheduled_at, Some(snapshot.date_time));
    assert_eq!(deliveries[0].recorded_at, Some(snapshot.instant));
    assert_eq!(deliveries[0].stops, vec![adresses[0].clone(), adresses[2].clone()]);

    assert_eq!(
        deliveries[1].scheduled_at.map(|d| d.to_string()).as_deref(),
        Some("2019-01-17 10:30:00")
    );
    assert_eq!(deliveries[1].stops, vec![Adresse::of(4, "Paris", "75013")]);
}

#[test]
fn test_element_level_include() {
    let registry = registry();
    registry.register_json(["deliveryTestSet"]).unwrap();
    assert!(registry.is_registered("products1"));
    let products: Vec<Product> = registry.get_sequence_as("products1").unwrap();
    assert_eq!(products, models::products1());
}

// ==================== Failures ====================

#[test]
fn test_bad_include() {
    let registry = registry();
    let err = registry
        .register_json(["personneTestSetBadInclude"])
        .unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::ResourceNotFound);
    assert!(err.is_io());
    assert_eq!(
        err.message,
        "cannot register fixtures: resource adresseTestSetUnknown.json not found"
    );
}

#[test]
fn test_unknown_document() {
    let registry = registry();
    let err = registry.register_json(["nothing"]).unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::ResourceNotFound);
    assert!(err.message.contains("nothing.json"));
}

#[test]
fn test_bad_reference() {
    let registry = registry();
    let err = registry
        .register_json(["personneTestSetBadReference"])
        .unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::ReferenceResolution);
    assert!(err.message.contains("cannot resolve reference unreferenced for field address"));
}

#[test]
fn test_bad_reference_field() {
    let registry = registry();
    let err = registry
        .register_json(["personneTestSetBadReferenceField"])
        .unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::UnknownField);
    assert!(err.message.contains("field unknownField not found on type model.Personne"));
}

#[test]
fn test_instruction_on_unknown_field() {
    let registry = registry();
    let err = registry
        .register_json(["commandTestSetBadInstructionField"])
        .unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::UnknownField);
    assert!(err.message.contains("field deliveredAt not found on type model.Command"));
    assert!(!registry.is_registered("commands1"));
}

#[test]
fn test_instruction_on_plain_field_is_rejected() {
    let registry = registry();
    let err = registry
        .register_json(["commandTestSetBadInstruction"])
        .unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::Malformed);
    assert!(err.message.contains("*reference"));
    assert!(err.message.contains("model.Command"));
}

#[test]
fn test_failed_load_keeps_committed_fixtures() {
    let registry = registry();
    assert!(registry.register_json(["personneTestSetBadReference"]).is_err());

    assert!(registry.is_registered("adresses1"));
    assert!(registry.is_registered("personnes1"));
    let unresolved = registry.get("personnes1").unwrap();
    assert!(unresolved.get("address").is_none());

    // a later load starts from an empty queue
    registry.clear().register_json(["personneTestSet"]).unwrap();
    let p1: Personne = registry.get_as("personnes1").unwrap().unwrap();
    assert_eq!(p1, cyril());
}

#[test]
fn test_unknown_element_type() {
    let registry = testset::registry(testset_test::memory_source());
    let err = registry.register_json(["adresseTestSet"]).unwrap_err();
    assert_eq!(err.kind, FixtureErrorKind::Malformed);
    assert!(err.message.contains("model.Adresse"));
    assert!(registry.is_empty());
}

// ==================== Copies ====================

#[test]
fn test_resolved_references_are_independent() {
    let registry = registry();
    registry.register_json(["personneTestSet"]).unwrap();

    let mut p1 = registry.get("personnes1").unwrap();
    Arc::make_mut(&mut p1)["address"]["town"] = serde_json::json!("Lyon");

    let adresse: Adresse = registry.get_at_as("adresses1", 1).unwrap().unwrap();
    assert_eq!(adresse.town, "Paris");
    let again: Personne = registry.get_as("personnes1").unwrap().unwrap();
    assert_eq!(again, cyril());
}
