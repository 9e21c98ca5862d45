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

//! Reference expression grammar.
//!
//! ```text
//! expression := fixture-name ( "," index )*
//! ```
//!
//! Tokens are trimmed and trailing empty tokens are ignored, so
//! `"adresses1,"` names the whole fixture. Index tokens that do not parse as
//! a non-negative integer are dropped; out-of-range indices are dropped at
//! selection time.

use std::sync::Arc;

/// Which elements of the source fixture an expression selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// No index token: the whole fixture.
    All,
    /// Exactly one index token; `None` when it is not numeric.
    One(Option<usize>),
    /// Several index tokens, numeric ones kept in the order given.
    Many(Vec<usize>),
}

/// A parsed reference expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceExpr {
    pub fixture: String,
    pub selector: Selector,
}

impl ReferenceExpr {
    pub fn parse(raw: &str) -> Self {
        let mut tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
        while tokens.len() > 1 && tokens.last() == Some(&"") {
            tokens.pop();
        }
        let fixture = tokens.first().copied().unwrap_or_default().to_string();
        let selector = match tokens.get(1..).unwrap_or_default() {
            [] => Selector::All,
            [single] => Selector::One(parse_index(single)),
            many => Selector::Many(many.iter().filter_map(|t| parse_index(t)).collect()),
        };
        Self { fixture, selector }
    }

    /// Ordered sub-sequence of `elements` selected by this expression.
    pub fn select_sequence<T>(&self, elements: &[Arc<T>]) -> Vec<Arc<T>> {
        match &self.selector {
            Selector::All => elements.to_vec(),
            Selector::One(index) => index
                .and_then(|i| elements.get(i))
                .cloned()
                .into_iter()
                .collect(),
            Selector::Many(indices) => indices
                .iter()
                .filter_map(|&i| elements.get(i))
                .cloned()
                .collect(),
        }
    }

    /// Single element selected by this expression.
    ///
    /// The whole fixture yields its first element; several indices yield the
    /// first element of the selected sub-sequence.
    pub fn select_single<T>(&self, elements: &[Arc<T>]) -> Option<Arc<T>> {
        match &self.selector {
            Selector::All => elements.first().cloned(),
            Selector::One(index) => index.and_then(|i| elements.get(i)).cloned(),
            Selector::Many(_) => self.select_sequence(elements).into_iter().next(),
        }
    }
}

fn parse_index(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn elements(n: usize) -> Vec<Arc<usize>> {
        (0..n).map(Arc::new).collect()
    }

    fn values(selected: Vec<Arc<usize>>) -> Vec<usize> {
        selected.into_iter().map(|e| *e).collect()
    }

    #[test]
    fn test_parse_whole_fixture() {
        let expr = ReferenceExpr::parse("adresses1");
        assert_eq!(expr.fixture, "adresses1");
        assert_eq!(expr.selector, Selector::All);
    }

    #[test]
    fn test_parse_single_index() {
        assert_eq!(ReferenceExpr::parse("adresses1,2").selector, Selector::One(Some(2)));
        assert_eq!(ReferenceExpr::parse("adresses1, 2 ").selector, Selector::One(Some(2)));
        assert_eq!(ReferenceExpr::parse("adresses1,x").selector, Selector::One(None));
    }

    #[test]
    fn test_parse_ignores_trailing_empty_tokens() {
        assert_eq!(ReferenceExpr::parse("adresses1,").selector, Selector::All);
        assert_eq!(ReferenceExpr::parse("adresses1, ,").selector, Selector::All);
        assert_eq!(ReferenceExpr::parse("adresses1,1,").selector, Selector::One(Some(1)));
        // inner empty tokens still count
        assert_eq!(ReferenceExpr::parse("adresses1,,1").selector, Selector::Many(vec![1]));

        let data = elements(3);
        assert_eq!(*ReferenceExpr::parse("a,").select_single(&data).unwrap(), 0);
    }

    #[test]
    fn test_parse_many_drops_non_numeric() {
        let expr = ReferenceExpr::parse("adresses1,0,x,-1,1.5,2");
        assert_eq!(expr.selector, Selector::Many(vec![0, 2]));
    }

    #[test]
    fn test_select_sequence_subset_in_given_order() {
        let data = elements(3);
        let expr = ReferenceExpr::parse("adresses1,0,2");
        assert_eq!(values(expr.select_sequence(&data)), vec![0, 2]);
        let expr = ReferenceExpr::parse("adresses1,2,0");
        assert_eq!(values(expr.select_sequence(&data)), vec![2, 0]);
    }

    #[test]
    fn test_select_sequence_drops_out_of_range() {
        let data = elements(3);
        let expr = ReferenceExpr::parse("adresses1,1,7");
        assert_eq!(values(expr.select_sequence(&data)), vec![1]);
        let expr = ReferenceExpr::parse("adresses1,7");
        assert!(expr.select_sequence(&data).is_empty());
    }

    #[test]
    fn test_select_single() {
        let data = elements(3);
        assert_eq!(*ReferenceExpr::parse("a").select_single(&data).unwrap(), 0);
        assert_eq!(*ReferenceExpr::parse("a,2").select_single(&data).unwrap(), 2);
        assert_eq!(*ReferenceExpr::parse("a,2,0").select_single(&data).unwrap(), 2);
        assert!(ReferenceExpr::parse("a,3").select_single(&data).is_none());
        assert!(ReferenceExpr::parse("a,x").select_single(&data).is_none());
        assert!(ReferenceExpr::parse("a").select_single::<usize>(&[]).is_none());
    }

    #[test]
    fn test_select_shares_elements() {
        let data = elements(2);
        let selected = ReferenceExpr::parse("a").select_sequence(&data);
        assert!(Arc::ptr_eq(&selected[1], &data[1]));
    }

    proptest! {
        #[test]
        fn prop_selection_never_exceeds_request(
            n in 0usize..10,
            indices in proptest::collection::vec(0usize..20, 2..6)
        ) {
            let data = elements(n);
            let raw = format!(
                "f,{}",
                indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",")
            );
            let selected = values(ReferenceExpr::parse(&raw).select_sequence(&data));
            let expected: Vec<usize> = indices.iter().copied().filter(|&i| i < n).collect();
            prop_assert_eq!(selected, expected);
        }

        #[test]
        fn prop_fixture_name_is_first_token(name in "[a-zA-Z][a-zA-Z0-9_]{0,12}") {
            let expr = ReferenceExpr::parse(&format!("{},1", name));
            prop_assert_eq!(expr.fixture, name);
        }
    }
}
