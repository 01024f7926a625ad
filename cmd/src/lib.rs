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

use std::{collections::BTreeMap, fs, path::Path};

use activeseries::{
    CustomTrackersConfig, CustomTrackersFlag, Labels, Matchers, CUSTOM_TRACKERS_FLAG,
};
use color_eyre::eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Configuration file layout. Only the sections this tool understands are
/// read; anything else in the file is ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub ingester: IngesterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IngesterConfig {
    pub active_series_custom_trackers: CustomTrackersConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Canonical flag value
    Text,
    Json,
    Yaml,
}

/// What gets printed: the trackers and, if a series was given, the names of
/// the trackers counting it.
#[derive(Debug, Serialize)]
pub struct Report {
    pub trackers: CustomTrackersConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching: Option<Vec<String>>,
}

/// Loads a YAML configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&data)
        .wrap_err_with(|| format!("failed to parse config file {}", path.display()))
}

/// Builds the trackers from an optional config file plus every occurrence of
/// the trackers flag, in command-line order. A tracker defined both in the
/// file and on the command line is an error.
pub fn load_trackers<S: AsRef<str>>(
    config_file: Option<&Path>,
    flag_values: &[S],
) -> Result<CustomTrackersConfig> {
    let initial = match config_file {
        Some(path) => {
            let config = load_config(path)?.ingester.active_series_custom_trackers;
            tracing::info!(trackers = config.len(), path = %path.display(), "loaded config file");
            config
        }
        None => CustomTrackersConfig::default(),
    };

    let mut value = CustomTrackersFlag::with_config(CUSTOM_TRACKERS_FLAG, initial);
    value.set_all(flag_values)?;
    tracing::info!(
        trackers = value.config().len(),
        occurrences = flag_values.len(),
        "loaded active series custom trackers"
    );
    Ok(value.into_config())
}

/// Parses a `name=value` label.
pub fn parse_label(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <name>=<value>, got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty label name in {s:?}"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Builds a series out of `name=value` pairs, rejecting repeated names.
pub fn series_labels(pairs: &[(String, String)]) -> Result<Labels> {
    let mut labels = BTreeMap::new();
    for (name, value) in pairs {
        if labels.insert(name.as_str(), value.as_str()).is_some() {
            bail!("label {name:?} is given more than once");
        }
    }
    Ok(Labels::new(labels))
}

impl Report {
    pub fn new(trackers: CustomTrackersConfig, series: Option<&Labels>) -> Result<Self> {
        let matching = match series {
            Some(series) => {
                let matchers = Matchers::new(&trackers)?;
                Some(matchers.matching(series).map(str::to_owned).collect())
            }
            None => None,
        };
        Ok(Self { trackers, matching })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => {
                let mut out = self.trackers.to_string();
                for name in self.matching.iter().flatten() {
                    out.push('\n');
                    out.push_str(name);
                }
                out
            }
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}
