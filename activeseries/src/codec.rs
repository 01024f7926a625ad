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

//! Structured (de)serialization of [`CustomTrackersConfig`] as a mapping of
//! tracker name to matcher, e.g. a section of a YAML configuration file.

use std::collections::BTreeMap;

use serde::{
    de::{self, Deserialize, Deserializer},
    ser::{Serialize, SerializeMap, Serializer},
};

use crate::{config::CustomTrackersConfig, error::TrackerError};

impl CustomTrackersConfig {
    /// Builds a config from a decoded document section.
    pub fn decode(document: BTreeMap<String, String>) -> Result<Self, TrackerError> {
        Self::from_map(document)
    }

    /// Returns the name → matcher pairs for structured serialization.
    pub fn encode(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, matcher)| (name.to_owned(), matcher.to_owned()))
            .collect()
    }
}

impl Serialize for CustomTrackersConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, matcher) in self.iter() {
            map.serialize_entry(name, matcher)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CustomTrackersConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // An empty section (`null` in YAML) is an empty config.
        let document = Option::<BTreeMap<String, String>>::deserialize(deserializer)?;
        Self::decode(document.unwrap_or_default()).map_err(de::Error::custom)
    }
}
