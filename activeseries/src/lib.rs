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

//! Active series custom trackers: named series selectors an ingester counts
//! active series by.
//!
//! Trackers come from a cumulative command-line flag
//! (`-ingester.active-series-custom-trackers=name:matcher;name:matcher`) or
//! from a name → matcher mapping in a configuration file. Both paths produce
//! a [`CustomTrackersConfig`] whose canonical string form parses back into an
//! equal value.

mod codec;
mod config;
mod error;
mod flag;
mod labels;
mod matcher;
mod matchers;
mod parse;

pub use {
    config::CustomTrackersConfig,
    error::TrackerError,
    flag::{CustomTrackersFlag, FlagError, CUSTOM_TRACKERS_FLAG},
    labels::{Labels, METRIC_NAME},
    matcher::{MatcherError, Selector},
    matchers::Matchers,
    parse::{parse_trackers, Tracker},
};
