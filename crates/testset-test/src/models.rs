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


//! Sample element models.
//!
//! `Price::product` and `CommandLine::command` point back at their owner.
//! Resolved references are copies, so such a cycle is cut where it closes:
//! a back reference holds the owner as it was before the reference that
//! led to it was applied (see [`products1`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use testset_core::{ElementType, FixtureType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adresse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub town: String,
    pub cp: String,
}

impl Adresse {
    pub fn of(id: impl Into<Option<i64>>, town: &str, cp: &str) -> Self {
        Self {
            id: id.into(),
            town: town.to_string(),
            cp: cp.to_string(),
        }
    }
}

impl FixtureType for Adresse {
    const TYPE_NAME: &'static str = "model.Adresse";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .field("town")
            .field("cp")
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personne {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Adresse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Adresse>>,
}

impl FixtureType for Personne {
    const TYPE_NAME: &'static str = "model.Personne";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .field("name")
            .field("firstname")
            .field("age")
            .record("address", Adresse::TYPE_NAME)
            .sequence_of("addresses", Adresse::TYPE_NAME)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<Price>>,
}

impl FixtureType for Product {
    const TYPE_NAME: &'static str = "model.Product";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .field("name")
            .sequence_of("prices", Price::TYPE_NAME)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Box<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub price: f64,
}

impl FixtureType for Price {
    const TYPE_NAME: &'static str = "model.Price";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .record("product", Product::TYPE_NAME)
            .date("date")
            .field("price")
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Personne>,
    #[serde(default)]
    pub lines: Vec<CommandLine>,
}

impl FixtureType for Command {
    const TYPE_NAME: &'static str = "model.Command";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .field("reference")
            .date("date")
            .record("customer", Personne::TYPE_NAME)
            .sequence_of("lines", CommandLine::TYPE_NAME)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Box<Command>>,
}

impl FixtureType for CommandLine {
    const TYPE_NAME: &'static str = "model.CommandLine";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .field("quantity")
            .record("product", Product::TYPE_NAME)
            .record("command", Command::TYPE_NAME)
            .build()
    }
}

/// Scheduled delivery, with a local date-time, an instant and a collection
/// of stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stops: Vec<Adresse>,
}

impl FixtureType for Delivery {
    const TYPE_NAME: &'static str = "model.Delivery";

    fn element_type() -> ElementType {
        ElementType::builder(Self::TYPE_NAME)
            .field("id")
            .date_time("scheduledAt")
            .instant("recordedAt")
            .collection_of("stops", Adresse::TYPE_NAME)
            .build()
    }
}

/// Element types of every model in this module.
pub fn element_types() -> Vec<ElementType> {
    vec![
        Adresse::element_type(),
        Personne::element_type(),
        Product::element_type(),
        Price::element_type(),
        Command::element_type(),
        CommandLine::element_type(),
        Delivery::element_type(),
    ]
}

/// Addresses of fixture `adresses1`.
pub fn adresses1() -> Vec<Adresse> {
    vec![
        Adresse::of(1, "Juvisy-sur-Orge", "91260"),
        Adresse::of(2, "Paris", "75001"),
        Adresse::of(3, "Marseille", "75003"),
    ]
}

fn bare_products() -> Vec<Product> {
    vec![
        Product {
            id: Some(1),
            name: "Produit 1".to_string(),
            prices: None,
        },
        Product {
            id: Some(2),
            name: "Produit 2".to_string(),
            prices: None,
        },
    ]
}

/// Prices of fixture `prices1`. Each back reference holds its product
/// without prices.
pub fn prices1() -> Vec<Price> {
    let products = bare_products();
    let price = |id: i64, (y, m, d): (i32, u32, u32), price: f64, product: &Product| Price {
        id: Some(id),
        product: Some(Box::new(product.clone())),
        date: NaiveDate::from_ymd_opt(y, m, d),
        price,
    };
    vec![
        price(1, (2019, 1, 1), 301.15, &products[0]),
        price(2, (2019, 1, 1), 28.12, &products[1]),
        price(3, (2018, 1, 1), 27.54, &products[1]),
        price(4, (2017, 1, 1), 27.21, &products[1]),
    ]
}

/// Products of fixture `products1`, prices resolved.
pub fn products1() -> Vec<Product> {
    let prices = prices1();
    let mut products = bare_products();
    products[0].prices = Some(prices[..1].to_vec());
    products[1].prices = Some(prices[1..].to_vec());
    products
}
