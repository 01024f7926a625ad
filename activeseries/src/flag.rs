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

use std::fmt;

use crate::{config::CustomTrackersConfig, error::TrackerError};

/// Name of the command-line flag holding active series custom trackers.
pub const CUSTOM_TRACKERS_FLAG: &str = "ingester.active-series-custom-trackers";

/// A rejected flag occurrence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {raw:?} for flag -{flag}: {source}")]
pub struct FlagError {
    pub raw: String,
    pub flag: String,
    pub source: TrackerError,
}

/// Cumulative command-line value: every occurrence of the flag is merged into
/// the trackers collected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTrackersFlag {
    flag: String,
    config: CustomTrackersConfig,
}

impl Default for CustomTrackersFlag {
    fn default() -> Self {
        Self::new(CUSTOM_TRACKERS_FLAG)
    }
}

impl CustomTrackersFlag {
    pub fn new(flag: impl Into<String>) -> Self {
        Self::with_config(flag, CustomTrackersConfig::default())
    }

    /// Starts accumulating on top of an already built config, e.g. one
    /// decoded from a configuration file.
    pub fn with_config(flag: impl Into<String>, config: CustomTrackersConfig) -> Self {
        Self {
            flag: flag.into(),
            config,
        }
    }

    /// Returns the canonical value, safe to pass back as a flag argument.
    pub fn as_text(&self) -> String {
        self.config.to_string()
    }

    /// Merges one occurrence of the flag. The accumulated value is replaced
    /// only if the whole occurrence is accepted.
    pub fn set(&mut self, raw: &str) -> Result<(), FlagError> {
        self.config = self.config.merge(raw).map_err(|source| FlagError {
            raw: raw.to_owned(),
            flag: self.flag.clone(),
            source,
        })?;
        Ok(())
    }

    /// Merges every occurrence in order, stopping at the first rejected one.
    pub fn set_all<I, S>(&mut self, occurrences: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        occurrences
            .into_iter()
            .try_for_each(|raw| self.set(raw.as_ref()))
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn config(&self) -> &CustomTrackersConfig {
        &self.config
    }

    pub fn into_config(self) -> CustomTrackersConfig {
        self.config
    }
}

impl fmt::Display for CustomTrackersFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config)
    }
}
