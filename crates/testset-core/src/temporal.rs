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

//! Logical "now" shared by all fixtures of a test run.
//!
//! The provider holds one frozen snapshot of the current date, local
//! date-time and instant. Every `now` instruction reads the snapshot, so all
//! elements loaded between two resets see the same value; `real_now` reads
//! the wall clock instead.

use crate::schema::FieldKind;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;

/// Which clock an instruction reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Frozen snapshot.
    Now,
    /// Wall clock at the moment the instruction is applied.
    RealNow,
}

/// One frozen date/time triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalSnapshot {
    pub date: NaiveDate,
    pub date_time: NaiveDateTime,
    pub instant: DateTime<Utc>,
}

impl TemporalSnapshot {
    /// Snapshot of a given local time.
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            date: now.date_naive(),
            date_time: now.naive_local(),
            instant: now.with_timezone(&Utc),
        }
    }

    /// Snapshot of the wall clock.
    pub fn capture() -> Self {
        Self::at(Local::now())
    }

    /// JSON encoding of the component matching `kind`.
    ///
    /// Encodings follow chrono's serde representation, so typed elements
    /// decode them directly. Returns `None` for non-temporal kinds.
    pub fn encode(&self, kind: &FieldKind) -> Option<Value> {
        let encoded = match kind {
            FieldKind::Date => serde_json::to_value(self.date),
            FieldKind::DateTime => serde_json::to_value(self.date_time),
            FieldKind::Instant => serde_json::to_value(self.instant),
            _ => return None,
        };
        encoded.ok()
    }
}

/// Holder of the frozen snapshot.
#[derive(Debug)]
pub struct TemporalProvider {
    snapshot: Mutex<TemporalSnapshot>,
}

impl TemporalProvider {
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(TemporalSnapshot::capture()),
        }
    }

    pub fn snapshot(&self) -> TemporalSnapshot {
        *self.snapshot.lock()
    }

    pub fn current_date(&self) -> NaiveDate {
        self.snapshot.lock().date
    }

    pub fn current_date_time(&self) -> NaiveDateTime {
        self.snapshot.lock().date_time
    }

    pub fn current_instant(&self) -> DateTime<Utc> {
        self.snapshot.lock().instant
    }

    /// Replace the snapshot with the wall clock.
    pub fn reset(&self) -> TemporalSnapshot {
        self.reset_to(Local::now())
    }

    /// Replace the snapshot with a given time.
    pub fn reset_to(&self, now: DateTime<Local>) -> TemporalSnapshot {
        let snapshot = TemporalSnapshot::at(now);
        *self.snapshot.lock() = snapshot;
        snapshot
    }

    /// Encoded value an instruction assigns to a field of `kind`.
    pub fn value_for(&self, kind: &FieldKind, instruction: Instruction) -> Option<Value> {
        match instruction {
            Instruction::Now => self.snapshot().encode(kind),
            Instruction::RealNow => TemporalSnapshot::capture().encode(kind),
        }
    }
}

impl Default for TemporalProvider {
    fn default() -> Self {
        Self::new()
    }
}
