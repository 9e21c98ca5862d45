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

//! Directive interpreter.
//!
//! Keys a binder does not understand are offered here. Two families are
//! recognised:
//!
//! - reference directives (`->field`): the field is filled later from
//!   another fixture, see [`crate::resolver`];
//! - instruction directives (`*field`): `*include` loads further documents,
//!   `now` / `real_now` on a temporal field assign the logical or real
//!   current time.

use crate::binder::ObjectContext;
use crate::config::DirectiveConfig;
use crate::error::{FixtureError, FixtureResult};
use crate::resolver::{PendingReference, ReferenceQueue};
use crate::schema::TargetShape;
use crate::temporal::{Instruction, TemporalProvider};
use serde_json::Value;
use tracing::debug;

/// A recognised directive key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'k> {
    /// `->field`
    Reference(&'k str),
    /// The reserved include key.
    Include,
    /// `*field`
    Instruction(&'k str),
}

/// What the interpreter did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    NotHandled,
    /// The caller must load these comma-separated documents.
    Include(String),
}

impl DirectiveConfig {
    /// Classify a key.
    pub fn classify<'k>(&self, key: &'k str) -> Option<Directive<'k>> {
        if let Some(field) = key.strip_prefix(self.reference_marker.as_str()) {
            return Some(Directive::Reference(field));
        }
        if key == self.include_key {
            return Some(Directive::Include);
        }
        key.strip_prefix(self.instruction_marker.as_str())
            .map(Directive::Instruction)
    }

    /// Recognise an instruction token, ignoring case.
    pub fn instruction(&self, token: &str) -> Option<Instruction> {
        let token = token.trim();
        if token.eq_ignore_ascii_case(&self.now_token) {
            Some(Instruction::Now)
        } else if token.eq_ignore_ascii_case(&self.real_now_token) {
            Some(Instruction::RealNow)
        } else {
            None
        }
    }
}

/// Textual form of a directive value.
///
/// Strings are taken as is, numbers and booleans by their text.
pub fn directive_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Interpret one unknown key of `target`.
pub fn interpret(
    config: &DirectiveConfig,
    temporal: &TemporalProvider,
    queue: &mut ReferenceQueue,
    target: ObjectContext<'_>,
    key: &str,
    raw: &Value,
) -> FixtureResult<Outcome> {
    let Some(directive) = config.classify(key) else {
        return Ok(Outcome::NotHandled);
    };
    let field = match directive {
        Directive::Reference(name) | Directive::Instruction(name) => Some(
            target
                .element_type
                .field(name)
                .ok_or_else(|| FixtureError::unknown_field(name, target.element_type.name()))?,
        ),
        Directive::Include => None,
    };
    let text = match (directive, directive_text(raw)) {
        (_, Some(text)) => text,
        (Directive::Instruction(_), None) => return Ok(Outcome::NotHandled),
        (_, None) => {
            return Err(FixtureError::malformed(format!(
                "directive {} on type {} must have a scalar value",
                key,
                target.element_type.name()
            )))
        }
    };

    match (directive, field) {
        (Directive::Reference(name), Some(field)) => {
            debug!(field = name, expression = %text, location = %target.location, "reference queued");
            queue.enqueue(PendingReference {
                target: target.location.clone(),
                field: field.clone(),
                owner: target.element_type.name().to_string(),
                expression: text,
            });
            Ok(Outcome::Handled)
        }
        (Directive::Instruction(_), Some(field)) => {
            let Some(instruction) = config.instruction(&text) else {
                return Ok(Outcome::NotHandled);
            };
            if field.shape != TargetShape::Scalar {
                return Ok(Outcome::NotHandled);
            }
            match temporal.value_for(&field.kind, instruction) {
                Some(value) => {
                    target.object.insert(field.name.clone(), value);
                    Ok(Outcome::Handled)
                }
                None => Ok(Outcome::NotHandled),
            }
        }
        _ => Ok(Outcome::Include(text)),
    }
}
