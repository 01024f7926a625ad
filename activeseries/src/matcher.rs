// Copyright 2022 Zinc Labs Inc. and Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Validation of tracker matchers.
//!
//! A matcher is accepted when `promql-parser` parses it into a plain instant
//! vector selector, e.g. `{job="api"}` or `up{path=~"/api/.*"}`. Anything else
//! (numbers, strings, range selectors, calls, aggregations) is rejected.

use promql_parser::{
    label::MatchOp,
    parser::{self, Expr as PromExpr},
};
use regex::Regex;

use crate::labels::{Labels, METRIC_NAME};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    #[error("{0}")]
    Parse(String),
    #[error("expected a series selector, got {0}")]
    NotASelector(&'static str),
    #[error("invalid regex {value:?} for label {name:?}: {message}")]
    Regex {
        name: String,
        value: String,
        message: String,
    },
}

#[derive(Debug, Clone)]
enum Op {
    Equal(String),
    NotEqual(String),
    Re(Regex),
    NotRe(Regex),
}

#[derive(Debug, Clone)]
struct LabelMatcher {
    name: String,
    op: Op,
}

impl LabelMatcher {
    fn matches(&self, value: &str) -> bool {
        match &self.op {
            Op::Equal(expected) => value == expected,
            Op::NotEqual(expected) => value != expected,
            Op::Re(re) => re.is_match(value),
            Op::NotRe(re) => !re.is_match(value),
        }
    }
}

/// A compiled series selector.
#[derive(Debug, Clone)]
pub struct Selector {
    matchers: Vec<LabelMatcher>,
}

impl Selector {
    pub fn parse(expr: &str) -> Result<Self, MatcherError> {
        let prom_expr = parser::parse(expr).map_err(|err| MatcherError::Parse(err.to_string()))?;
        let selector = match prom_expr {
            PromExpr::VectorSelector(selector) => selector,
            other => return Err(MatcherError::NotASelector(expr_kind(&other))),
        };

        let mut matchers = Vec::new();
        if let Some(name) = &selector.name {
            matchers.push(LabelMatcher {
                name: METRIC_NAME.to_owned(),
                op: Op::Equal(name.clone()),
            });
        }
        for mat in selector.matchers.matchers.iter() {
            let op = match &mat.op {
                MatchOp::Equal => Op::Equal(mat.value.clone()),
                MatchOp::NotEqual => Op::NotEqual(mat.value.clone()),
                MatchOp::Re(_re) => Op::Re(anchored(&mat.name, &mat.value)?),
                MatchOp::NotRe(_re) => Op::NotRe(anchored(&mat.name, &mat.value)?),
            };
            matchers.push(LabelMatcher {
                name: mat.name.clone(),
                op,
            });
        }
        Ok(Self { matchers })
    }

    /// Returns true if every label matcher accepts the series. A label the
    /// series doesn't carry is matched as the empty string.
    pub fn matches(&self, series: &Labels) -> bool {
        self.matchers
            .iter()
            .all(|m| m.matches(series.get(&m.name).unwrap_or_default()))
    }
}

// PromQL regex matchers are fully anchored.
fn anchored(name: &str, value: &str) -> Result<Regex, MatcherError> {
    Regex::new(&format!("^(?:{value})$")).map_err(|err| MatcherError::Regex {
        name: name.to_owned(),
        value: value.to_owned(),
        message: err.to_string(),
    })
}

fn expr_kind(expr: &PromExpr) -> &'static str {
    match expr {
        PromExpr::NumberLiteral(_) => "number literal",
        PromExpr::StringLiteral(_) => "string literal",
        PromExpr::MatrixSelector(_) => "range selector",
        PromExpr::Call(_) => "function call",
        PromExpr::Aggregate(_) => "aggregation",
        PromExpr::Binary(_) => "binary expression",
        PromExpr::Unary(_) => "unary expression",
        PromExpr::Paren(_) => "parenthesized expression",
        PromExpr::Subquery(_) => "subquery",
        _ => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_parse_selectors() {
        for expr in [
            r#"{foo="bar"}"#,
            r#"{foo='bar'}"#,
            r#"up{job="api"}"#,
            r#"{path=~"/api/.*", env!="dev", code!~"5.."}"#,
        ] {
            assert!(Selector::parse(expr).is_ok(), "{expr}");
        }
    }

    #[test]
    fn test_parse_rejects_non_selectors() {
        expect![[r#"
            Err(
                NotASelector(
                    "number literal",
                ),
            )
        "#]]
        .assert_debug_eq(&Selector::parse("123").map(|_| ()));

        let err = Selector::parse(r#"foo{job="api"}[5m]"#).unwrap_err();
        assert_eq!(err, MatcherError::NotASelector("range selector"));
        assert_eq!(err.to_string(), "expected a series selector, got range selector");

        let err = Selector::parse(r#"rate(foo[5m])"#).unwrap_err();
        assert_eq!(err, MatcherError::NotASelector("function call"));

        assert!(matches!(
            Selector::parse(r#"{foo="bar""#),
            Err(MatcherError::Parse(_))
        ));
    }

    #[test]
    fn test_selector_matches() {
        let series = Labels::new([("__name__", "up"), ("job", "api"), ("path", "/api/v1")]);

        let selector = Selector::parse(r#"up{job="api"}"#).unwrap();
        assert!(selector.matches(&series));

        let selector = Selector::parse(r#"down{job="api"}"#).unwrap();
        assert!(!selector.matches(&series));

        let selector = Selector::parse(r#"{path=~"/api/.*"}"#).unwrap();
        assert!(selector.matches(&series));
        assert!(!selector.matches(&Labels::new([("path", "/x/api/v1")])));

        let selector = Selector::parse(r#"up{job!~"a.."}"#).unwrap();
        assert!(!selector.matches(&series));
        assert!(selector.matches(&Labels::new([("__name__", "up"), ("job", "apis")])));
    }

    #[test]
    fn test_selector_missing_label_is_empty() {
        let series = Labels::new([("job", "api")]);
        assert!(Selector::parse(r#"{job="api", env!="prod"}"#).unwrap().matches(&series));
        assert!(Selector::parse(r#"{job="api", env=""}"#).unwrap().matches(&series));
        assert!(!Selector::parse(r#"{env="prod"}"#).unwrap().matches(&series));
    }
}
