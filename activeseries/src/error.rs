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

use crate::matcher::MatcherError;

/// Errors raised while building active series custom trackers. Every one of
/// them aborts the operation that raised it and leaves prior state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("value should be <name>:<matcher>[;<name>:<matcher>]*, but colon was not found in the value {index}: {entry:?}")]
    MissingSeparator { index: usize, entry: String },

    #[error("semicolon-separated values should be <name>:<matcher>, but one of the sides was empty in the value {index}: {entry:?}")]
    EmptySide { index: usize, entry: String },

    #[error("active series custom tracker {name:?} has an empty name or matcher {matcher:?}")]
    EmptyField { name: String, matcher: String },

    #[error("active series custom tracker {name:?} can't be written as a flag value: names can't contain ':' or ';' and matchers can't contain ';'")]
    Unrepresentable { name: String },

    #[error("can't build active series matcher {name}: {source}")]
    InvalidMatcher { name: String, source: MatcherError },

    #[error("matcher {name:?} for active series custom trackers is provided twice")]
    DuplicateInCall { name: String },

    #[error("matcher {name:?} for active series custom trackers is provided more than once")]
    DuplicateAcrossCalls { name: String },
}
