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

use crate::{
    config::CustomTrackersConfig,
    error::TrackerError,
    labels::Labels,
    matcher::Selector,
};

/// Compiled selectors of a [`CustomTrackersConfig`], used to decide which
/// custom trackers a series belongs to.
#[derive(Debug, Clone)]
pub struct Matchers {
    names: Vec<String>,
    selectors: Vec<Selector>,
}

impl Matchers {
    pub fn new(config: &CustomTrackersConfig) -> Result<Self, TrackerError> {
        let (names, selectors): (Vec<_>, Vec<_>) = config
            .iter()
            .map(|(name, matcher)| {
                let selector =
                    Selector::parse(matcher).map_err(|source| TrackerError::InvalidMatcher {
                        name: name.to_owned(),
                        source,
                    })?;
                Ok((name.to_owned(), selector))
            })
            .collect::<Result<Vec<_>, TrackerError>>()?
            .into_iter()
            .unzip();
        Ok(Self { names, selectors })
    }

    /// Tracker names, sorted. Positions line up with [`Matchers::matches`].
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// For every tracker, whether `series` is counted by it.
    pub fn matches(&self, series: &Labels) -> Vec<bool> {
        self.selectors
            .iter()
            .map(|selector| selector.matches(series))
            .collect()
    }

    /// Names of the trackers counting `series`.
    pub fn matching<'a>(&'a self, series: &'a Labels) -> impl Iterator<Item = &'a str> + 'a {
        self.names
            .iter()
            .zip(&self.selectors)
            .filter(|(_, selector)| selector.matches(series))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers(raw: &str) -> Matchers {
        Matchers::new(&raw.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_matchers() {
        let matchers = matchers(
            r#"api:{job="api"};up:up;errors:{code=~"5.."};not_dev:{job=~".+", env!="dev"}"#,
        );
        assert_eq!(matchers.names(), ["api", "errors", "not_dev", "up"]);
        assert_eq!(matchers.len(), 4);

        let series = Labels::new([("__name__", "up"), ("job", "api"), ("code", "200")]);
        assert_eq!(matchers.matches(&series), [true, false, true, true]);
        assert_eq!(
            matchers.matching(&series).collect::<Vec<_>>(),
            ["api", "not_dev", "up"]
        );

        let series = Labels::new([("job", "db"), ("code", "503"), ("env", "dev")]);
        assert_eq!(matchers.matches(&series), [false, true, false, false]);
    }

    #[test]
    fn test_matchers_empty() {
        let matchers = Matchers::new(&CustomTrackersConfig::default()).unwrap();
        assert!(matchers.is_empty());
        assert!(matchers.matches(&Labels::new([("a", "b")])).is_empty());
    }

    #[test]
    fn test_matchers_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matchers>();
        assert_send_sync::<CustomTrackersConfig>();
    }
}
