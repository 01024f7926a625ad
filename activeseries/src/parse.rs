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

use rustc_hash::FxHashSet;

use crate::{error::TrackerError, matcher::Selector};

/// Separates trackers within one flag value.
pub const ENTRY_SEPARATOR: char = ';';
/// Separates a tracker name from its matcher.
pub const NAME_SEPARATOR: char = ':';

/// A named series selector counted by the active series tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    pub name: String,
    pub matcher: String,
}

impl Tracker {
    /// Builds a tracker from already trimmed, non-empty sides, checking the
    /// matcher is a valid series selector.
    pub(crate) fn validated(name: &str, matcher: &str) -> Result<Self, TrackerError> {
        Selector::parse(matcher).map_err(|source| TrackerError::InvalidMatcher {
            name: name.to_owned(),
            source,
        })?;
        Ok(Self {
            name: name.to_owned(),
            matcher: matcher.to_owned(),
        })
    }
}

/// Parses a `name:matcher;name:matcher` value into trackers, in the order
/// they were given.
///
/// An empty value yields no trackers. The first malformed entry fails the
/// whole parse; names repeated within `raw` are rejected with
/// [`TrackerError::DuplicateInCall`].
pub fn parse_trackers(raw: &str) -> Result<Vec<Tracker>, TrackerError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = FxHashSet::default();
    let mut trackers = Vec::new();
    for (index, entry) in raw.split(ENTRY_SEPARATOR).enumerate() {
        let (name, matcher) =
            entry
                .split_once(NAME_SEPARATOR)
                .ok_or_else(|| TrackerError::MissingSeparator {
                    index,
                    entry: entry.to_owned(),
                })?;
        let (name, matcher) = (name.trim(), matcher.trim());
        if name.is_empty() || matcher.is_empty() {
            return Err(TrackerError::EmptySide {
                index,
                entry: entry.to_owned(),
            });
        }
        let tracker = Tracker::validated(name, matcher)?;
        if !seen.insert(name) {
            return Err(TrackerError::DuplicateInCall {
                name: name.to_owned(),
            });
        }
        trackers.push(tracker);
    }
    Ok(trackers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatcherError;
    use expect_test::expect;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_trackers(""), Ok(vec![]));
    }

    #[test]
    fn test_parse_keeps_order() {
        let trackers = parse_trackers(r#"foo:{foo="bar"};baz:{baz="bar"}"#).unwrap();
        expect![[r#"
            [
                Tracker {
                    name: "foo",
                    matcher: "{foo=\"bar\"}",
                },
                Tracker {
                    name: "baz",
                    matcher: "{baz=\"bar\"}",
                },
            ]
        "#]]
        .assert_debug_eq(&trackers);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            parse_trackers(" foo :\t{foo=\"bar\"}\n "),
            parse_trackers(r#"foo:{foo="bar"}"#),
        );
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let trackers = parse_trackers(r#"http:{url="http://example.com:80"}"#).unwrap();
        assert_eq!(trackers[0].name, "http");
        assert_eq!(trackers[0].matcher, r#"{url="http://example.com:80"}"#);
    }

    #[test]
    fn test_parse_empty_side() {
        for raw in ["foo:", "foo: ", ":{}", " :{}"] {
            assert_eq!(
                parse_trackers(raw),
                Err(TrackerError::EmptySide {
                    index: 0,
                    entry: raw.to_owned(),
                }),
            );
        }

        // The first offending entry is reported.
        assert_eq!(
            parse_trackers("foo: ;bar:{}"),
            Err(TrackerError::EmptySide {
                index: 0,
                entry: "foo: ".to_owned(),
            }),
        );
        expect![[r#"
            "semicolon-separated values should be <name>:<matcher>, but one of the sides was empty in the value 1: \"bar:\\t\""
        "#]]
        .assert_debug_eq(
            &parse_trackers("foo:{foo=\"bar\"};bar:\t")
                .unwrap_err()
                .to_string(),
        );
    }

    #[test]
    fn test_parse_missing_separator() {
        expect![[r#"
            Err(
                MissingSeparator {
                    index: 1,
                    entry: "",
                },
            )
        "#]]
        .assert_debug_eq(&parse_trackers(r#"foo:{foo="bar"};"#));
    }

    #[test]
    fn test_parse_invalid_matcher() {
        assert_eq!(
            parse_trackers(r#"foo:{foo="bar"};baz:123"#),
            Err(TrackerError::InvalidMatcher {
                name: "baz".to_owned(),
                source: MatcherError::NotASelector("number literal"),
            }),
        );
        expect![[r#"
            "can't build active series matcher baz: expected a series selector, got number literal"
        "#]]
        .assert_debug_eq(&parse_trackers("baz:123").unwrap_err().to_string());
    }

    #[test]
    fn test_parse_duplicate_in_call() {
        let err = parse_trackers(r#"foo:{foo="bar"};foo:{boo="bam"}"#).unwrap_err();
        assert_eq!(
            err,
            TrackerError::DuplicateInCall {
                name: "foo".to_owned()
            }
        );
        expect![[r#"
            "matcher \"foo\" for active series custom trackers is provided twice"
        "#]]
        .assert_debug_eq(&err.to_string());

        // Names are compared after trimming.
        assert!(matches!(
            parse_trackers(r#"foo:{foo="bar"}; foo :{boo="bam"}"#),
            Err(TrackerError::DuplicateInCall { .. })
        ));
    }
}
