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

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;

use crate::{
    error::TrackerError,
    parse::{parse_trackers, Tracker, ENTRY_SEPARATOR, NAME_SEPARATOR},
};

/// A set of active series custom trackers: tracker name → series selector.
///
/// Names are unique and every matcher has been validated on insertion. The
/// value has no intrinsic order; everything observable from outside (the
/// canonical string, `Debug`, iteration) is sorted by name.
///
/// `Display` renders the canonical `name:matcher;name:matcher` form, which
/// parses back into an equal value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CustomTrackersConfig {
    source: FxHashMap<String, String>,
}

impl CustomTrackersConfig {
    /// Builds a config from a name → matcher mapping.
    ///
    /// Names and matchers are trimmed; empty ones, invalid matchers, and pairs
    /// that couldn't round-trip through the flag syntax are rejected.
    #[tracing::instrument(skip_all)]
    pub fn from_map<I, K, V>(entries: I) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = entries.into_iter().collect::<Vec<_>>();
        // Sorted so that the first reported error doesn't depend on the
        // iteration order of the caller's map.
        entries.sort_by(|a, b| a.0.as_ref().trim().cmp(b.0.as_ref().trim()));

        let mut source = FxHashMap::default();
        for (name, matcher) in &entries {
            let (name, matcher) = (name.as_ref().trim(), matcher.as_ref().trim());
            if name.is_empty() || matcher.is_empty() {
                return Err(TrackerError::EmptyField {
                    name: name.to_owned(),
                    matcher: matcher.to_owned(),
                });
            }
            if name.contains([NAME_SEPARATOR, ENTRY_SEPARATOR]) || matcher.contains(ENTRY_SEPARATOR)
            {
                return Err(TrackerError::Unrepresentable {
                    name: name.to_owned(),
                });
            }
            let Tracker { name, matcher } = Tracker::validated(name, matcher)?;
            if source.contains_key(&name) {
                return Err(TrackerError::DuplicateInCall { name });
            }
            source.insert(name, matcher);
        }
        tracing::debug!(trackers = source.len(), "built active series custom trackers");
        Ok(Self { source })
    }

    /// Parses `raw` and folds its trackers into a copy of `self`.
    ///
    /// A name already present in `self` fails with
    /// [`TrackerError::DuplicateAcrossCalls`]; a name repeated within `raw`
    /// fails with [`TrackerError::DuplicateInCall`]. On error nothing is
    /// merged.
    pub fn merge(&self, raw: &str) -> Result<Self, TrackerError> {
        let trackers = parse_trackers(raw)?;
        if let Some(tracker) = trackers
            .iter()
            .find(|tracker| self.source.contains_key(&tracker.name))
        {
            return Err(TrackerError::DuplicateAcrossCalls {
                name: tracker.name.clone(),
            });
        }

        let added = trackers.len();
        let mut merged = self.clone();
        merged.source.extend(
            trackers
                .into_iter()
                .map(|Tracker { name, matcher }| (name, matcher)),
        );
        tracing::debug!(added, total = merged.len(), "merged active series custom trackers");
        Ok(merged)
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the matcher of the tracker with given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.source.get(name).map(String::as_str)
    }

    /// Iterates over `(name, matcher)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries = self
            .source
            .iter()
            .map(|(name, matcher)| (name.as_str(), matcher.as_str()))
            .collect::<Vec<_>>();
        entries.sort_unstable_by_key(|&(name, _)| name);
        entries.into_iter()
    }

    /// Returns tracker names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }
}

impl fmt::Display for CustomTrackersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, matcher)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{ENTRY_SEPARATOR}")?;
            }
            write!(f, "{name}{NAME_SEPARATOR}{matcher}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CustomTrackersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromStr for CustomTrackersConfig {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::default().merge(s)
    }
}
