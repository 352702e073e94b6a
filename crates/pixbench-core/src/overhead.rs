// Dweve PixBench - Benchmark Result Aggregation
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

//! Overhead and ratio between paired conditions.
//!
//! A zero baseline mean never divides: ratio and overhead fall back to 0.
//! That 0 means "no comparison possible", so every result also carries a
//! [`ComparisonStatus`] telling the cases apart.

use crate::dimension::{GroupKey, GroupedStats};
use crate::stats::AggregateStat;
use serde::Serialize;
use std::collections::BTreeSet;

/// How an [`Overhead`] value came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// Both sides had data and the baseline mean was non-zero.
    Compared,
    /// The baseline had no samples.
    MissingBaseline,
    /// The baseline had samples averaging exactly zero.
    ZeroBaseline,
    /// The comparison had no samples.
    MissingComparison,
}

impl ComparisonStatus {
    /// Returns whether the numbers describe a real comparison.
    pub fn is_compared(&self) -> bool {
        matches!(self, ComparisonStatus::Compared)
    }
}

/// Relative difference of a comparison condition over a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overhead {
    /// Baseline mean time.
    pub baseline_mean: f64,
    /// Comparison mean time.
    pub comparison_mean: f64,
    /// `comparison / baseline`, or 0 without a usable baseline.
    pub ratio: f64,
    /// `(ratio - 1) * 100`, or 0 without a usable baseline.
    pub overhead_percent: f64,
    /// Provenance of the numbers.
    pub status: ComparisonStatus,
}

impl Overhead {
    /// Compares two plain means.
    pub fn from_means(baseline_mean: f64, comparison_mean: f64) -> Self {
        if baseline_mean == 0.0 {
            return Self {
                baseline_mean,
                comparison_mean,
                ratio: 0.0,
                overhead_percent: 0.0,
                status: ComparisonStatus::ZeroBaseline,
            };
        }
        let ratio = comparison_mean / baseline_mean;
        Self {
            baseline_mean,
            comparison_mean,
            ratio,
            overhead_percent: (ratio - 1.0) * 100.0,
            status: ComparisonStatus::Compared,
        }
    }
}

/// Computes the overhead of `comparison` relative to `baseline`.
pub fn overhead(baseline: &AggregateStat, comparison: &AggregateStat) -> Overhead {
    let mut result = Overhead::from_means(baseline.mean, comparison.mean);
    result.status = if baseline.is_empty() {
        ComparisonStatus::MissingBaseline
    } else if baseline.mean == 0.0 {
        ComparisonStatus::ZeroBaseline
    } else if comparison.is_empty() {
        ComparisonStatus::MissingComparison
    } else {
        ComparisonStatus::Compared
    };
    result
}

/// Overhead for one group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverheadRow {
    /// Group key.
    pub key: GroupKey,
    /// Display label for the key.
    pub label: String,
    /// Comparison result.
    pub overhead: Overhead,
}

/// Compares two groupings key by key.
///
/// Rows cover the sorted union of both key sets. A key present on one side
/// only is compared against an empty summary and flagged accordingly.
pub fn compare_groups(baseline: &GroupedStats, comparison: &GroupedStats) -> Vec<OverheadRow> {
    let keys: BTreeSet<&GroupKey> = baseline.keys().chain(comparison.keys()).collect();
    let dimensions = if baseline.dimensions.is_empty() {
        &comparison.dimensions
    } else {
        &baseline.dimensions
    };
    let empty = AggregateStat::default();

    keys.into_iter()
        .map(|key| {
            let base = baseline.get(key).unwrap_or(&empty);
            let comp = comparison.get(key).unwrap_or(&empty);
            OverheadRow {
                key: key.clone(),
                label: key.label(dimensions),
                overhead: overhead(base, comp),
            }
        })
        .collect()
}

/// A group mean scaled by the fastest group's mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeTime {
    /// Group key.
    pub key: GroupKey,
    /// Display label for the key.
    pub label: String,
    /// `mean / fastest mean`; 1.0 for the fastest group.
    pub relative: f64,
}

/// Divides each group mean by the smallest positive group mean.
///
/// Empty groups and groups with a non-positive mean are omitted. Returns an
/// empty vector when no positive mean exists.
pub fn relative_to_fastest(stats: &GroupedStats) -> Vec<RelativeTime> {
    let positive: Vec<_> = stats
        .rows
        .iter()
        .filter(|row| !row.stat.is_empty() && row.stat.mean > 0.0)
        .collect();

    let Some(fastest) = positive
        .iter()
        .map(|row| row.stat.mean)
        .min_by(f64::total_cmp)
    else {
        return Vec::new();
    };

    positive
        .into_iter()
        .map(|row| RelativeTime {
            key: row.key.clone(),
            label: row.label.clone(),
            relative: row.stat.mean / fastest,
        })
        .collect()
}
