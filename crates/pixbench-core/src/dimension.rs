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

//! Dimension grouping.
//!
//! Partitions normalized records into buckets keyed by one or more experiment
//! dimensions. Records that lack a dimension named in the key are left out of
//! that grouping only; they remain available to every other grouping.
//!
//! # Example
//!
//! ```
//! use pixbench_core::{
//!     group_records, Dimension, ExperimentFilter, GroupSpec, MeasurementRecord, Mode,
//! };
//!
//! let records = vec![
//!     MeasurementRecord::new("resolution_scaling", Mode::Normal, 10.0).with_resolution(256),
//!     MeasurementRecord::new("resolution_scaling", Mode::Normal, 12.0).with_resolution(256),
//!     MeasurementRecord::new("resolution_scaling", Mode::Heavy, 30.0).with_resolution(256),
//! ];
//!
//! let spec = GroupSpec::by(&[Dimension::Resolution])
//!     .in_mode(Mode::Normal)
//!     .with_experiments(ExperimentFilter::one_of(["resolution_scaling"]));
//! let stats = group_records(&records, &spec).stats();
//!
//! assert_eq!(stats.len(), 1);
//! assert_eq!(stats.rows[0].stat.mean, 11.0);
//! ```

use crate::record::{MeasurementRecord, Mode};
use crate::stats::AggregateStat;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// A named experimental parameter records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Processing mode.
    Mode,
    /// Square image side length in pixels.
    Resolution,
    /// Palette size.
    Colors,
    /// Pixelation multiplier (1 when the record carries none).
    PixelSize,
    /// Output scale as an integer percentage.
    OutputScale,
    /// Dithering algorithm.
    Dithering,
    /// Source image identifier.
    ImageName,
    /// Experimental scenario tag.
    Experiment,
}

impl Dimension {
    /// Every dimension.
    pub const ALL: [Dimension; 8] = [
        Dimension::Mode,
        Dimension::Resolution,
        Dimension::Colors,
        Dimension::PixelSize,
        Dimension::OutputScale,
        Dimension::Dithering,
        Dimension::ImageName,
        Dimension::Experiment,
    ];

    /// Machine name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Mode => "mode",
            Dimension::Resolution => "resolution",
            Dimension::Colors => "colors",
            Dimension::PixelSize => "pixel_size",
            Dimension::OutputScale => "output_scale",
            Dimension::Dithering => "dithering",
            Dimension::ImageName => "image_name",
            Dimension::Experiment => "experiment",
        }
    }

    /// Human-readable axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Mode => "Mode",
            Dimension::Resolution => "Resolution",
            Dimension::Colors => "Colors",
            Dimension::PixelSize => "Pixel Size",
            Dimension::OutputScale => "Output Scale",
            Dimension::Dithering => "Dithering",
            Dimension::ImageName => "Image",
            Dimension::Experiment => "Experiment",
        }
    }

    /// Returns whether values of this dimension sort numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Dimension::Resolution
                | Dimension::Colors
                | Dimension::PixelSize
                | Dimension::OutputScale
        )
    }

    /// Reads this dimension's value from a record, if present.
    pub fn extract(&self, record: &MeasurementRecord) -> Option<DimensionValue> {
        match self {
            Dimension::Mode => Some(DimensionValue::Mode(record.mode)),
            Dimension::Resolution => record.resolution.map(|r| DimensionValue::Integer(r.into())),
            Dimension::Colors => record.colors.map(|c| DimensionValue::Integer(c.into())),
            Dimension::PixelSize => Some(DimensionValue::Integer(record.pixel_size.into())),
            Dimension::OutputScale => record
                .output_scale
                .map(|s| DimensionValue::Integer(scale_percent(s))),
            Dimension::Dithering => record.dithering.clone().map(DimensionValue::Text),
            Dimension::ImageName => record.image_name.clone().map(DimensionValue::Text),
            Dimension::Experiment => Some(DimensionValue::Text(record.experiment.clone())),
        }
    }

    /// Formats a value of this dimension for display.
    pub fn format_value(&self, value: &DimensionValue) -> String {
        match (self, value) {
            (Dimension::Resolution, DimensionValue::Integer(r)) => format!("{}x{}", r, r),
            (Dimension::OutputScale, DimensionValue::Integer(p)) => format!("{}%", p),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "mode" => Ok(Dimension::Mode),
            "resolution" | "res" => Ok(Dimension::Resolution),
            "colors" | "color" => Ok(Dimension::Colors),
            "pixel_size" | "pixelsize" => Ok(Dimension::PixelSize),
            "output_scale" | "outputscale" | "scale" => Ok(Dimension::OutputScale),
            "dithering" | "dither" => Ok(Dimension::Dithering),
            "image_name" | "imagename" | "image" => Ok(Dimension::ImageName),
            "experiment" => Ok(Dimension::Experiment),
            _ => Err(format!(
                "Unknown dimension '{}'. Expected one of: {}",
                s,
                Dimension::ALL.map(|d| d.as_str()).join(", ")
            )),
        }
    }
}

/// Converts an output scale factor to the integer percentage used as a key.
pub fn scale_percent(scale: f64) -> u64 {
    (scale * 100.0).round() as u64
}

/// One dimension value.
///
/// Values of the same dimension always share a variant, so the derived
/// ordering sorts numeric dimensions numerically and text dimensions
/// lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum DimensionValue {
    /// Resolution, colors, pixel size, or output scale percentage.
    Integer(u64),
    /// Dithering, image name, or experiment.
    Text(String),
    /// Processing mode.
    Mode(Mode),
}

impl DimensionValue {
    /// Integer payload, if this is a numeric value.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            DimensionValue::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Integer(v) => write!(f, "{}", v),
            DimensionValue::Text(s) => f.write_str(s),
            DimensionValue::Mode(m) => write!(f, "{}", m),
        }
    }
}

impl From<u64> for DimensionValue {
    fn from(value: u64) -> Self {
        DimensionValue::Integer(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        DimensionValue::Text(value.to_string())
    }
}

impl From<Mode> for DimensionValue {
    fn from(value: Mode) -> Self {
        DimensionValue::Mode(value)
    }
}

/// Ordered tuple of dimension values identifying a bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<DimensionValue>);

impl GroupKey {
    /// Builds a key from its values, in dimension order.
    pub fn new(values: Vec<DimensionValue>) -> Self {
        Self(values)
    }

    /// Builds a single-dimension key.
    pub fn single(value: impl Into<DimensionValue>) -> Self {
        Self(vec![value.into()])
    }

    /// Values in dimension order.
    pub fn values(&self) -> &[DimensionValue] {
        &self.0
    }

    /// First value; the whole key for single-dimension groupings.
    pub fn first(&self) -> Option<&DimensionValue> {
        self.0.first()
    }

    /// Display label using each dimension's formatting.
    pub fn label(&self, dimensions: &[Dimension]) -> String {
        self.0
            .iter()
            .zip(dimensions)
            .map(|(value, dim)| dim.format_value(value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(", "))
    }
}

/// Restricts an analysis to a subset of experiments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentFilter {
    /// Every experiment.
    #[default]
    Any,
    /// Experiments whose tag is exactly one of these.
    OneOf(BTreeSet<String>),
    /// Experiments whose tag contains this substring (case-insensitive).
    Contains(String),
}

impl ExperimentFilter {
    /// Matches exactly the given tags.
    pub fn one_of<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExperimentFilter::OneOf(tags.into_iter().map(Into::into).collect())
    }

    /// Matches tags containing `needle`, ignoring case.
    pub fn contains(needle: impl Into<String>) -> Self {
        ExperimentFilter::Contains(needle.into().to_lowercase())
    }

    /// Returns whether `experiment` passes this filter.
    pub fn matches(&self, experiment: &str) -> bool {
        match self {
            ExperimentFilter::Any => true,
            ExperimentFilter::OneOf(tags) => tags.contains(experiment),
            ExperimentFilter::Contains(needle) => experiment
                .to_lowercase()
                .contains(needle.to_lowercase().as_str()),
        }
    }
}

impl fmt::Display for ExperimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentFilter::Any => f.write_str("all experiments"),
            ExperimentFilter::OneOf(tags) => {
                let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                write!(f, "experiments {}", tags.join(", "))
            }
            ExperimentFilter::Contains(needle) => write!(f, "experiments containing '{}'", needle),
        }
    }
}

/// Key-extraction rule plus record predicates for one grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Dimensions forming the key, in order.
    pub dimensions: Vec<Dimension>,
    /// Experiment predicate.
    #[serde(default)]
    pub experiments: ExperimentFilter,
    /// Optional mode restriction.
    #[serde(default)]
    pub mode: Option<Mode>,
}

impl GroupSpec {
    /// Groups by the given dimensions across all experiments and modes.
    pub fn by(dimensions: &[Dimension]) -> Self {
        Self {
            dimensions: dimensions.to_vec(),
            experiments: ExperimentFilter::Any,
            mode: None,
        }
    }

    /// Restricts to matching experiments.
    pub fn with_experiments(mut self, experiments: ExperimentFilter) -> Self {
        self.experiments = experiments;
        self
    }

    /// Restricts to one mode.
    pub fn in_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Returns whether the record passes the experiment and mode predicates.
    pub fn admits(&self, record: &MeasurementRecord) -> bool {
        self.mode.map_or(true, |m| record.mode == m) && self.experiments.matches(&record.experiment)
    }

    /// Extracts the record's key, or `None` if any dimension is missing.
    pub fn key_for(&self, record: &MeasurementRecord) -> Option<GroupKey> {
        self.dimensions
            .iter()
            .map(|dim| dim.extract(record))
            .collect::<Option<Vec<_>>>()
            .map(GroupKey)
    }
}

/// Buckets of raw samples produced by [`group_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    dimensions: Vec<Dimension>,
    groups: BTreeMap<GroupKey, Vec<f64>>,
    excluded: usize,
}

impl Grouping {
    /// Dimensions forming the keys.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether no record was grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Samples of one bucket.
    pub fn get(&self, key: &GroupKey) -> Option<&[f64]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[f64])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    /// Total samples across all buckets.
    pub fn total_samples(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Records that passed the predicates but lacked a key dimension.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Summarizes every bucket.
    pub fn stats(&self) -> GroupedStats {
        let rows = self
            .groups
            .iter()
            .map(|(key, samples)| GroupRow {
                label: key.label(&self.dimensions),
                key: key.clone(),
                stat: AggregateStat::from_samples(samples),
            })
            .collect();

        GroupedStats {
            dimensions: self.dimensions.clone(),
            rows,
        }
    }
}

/// Partitions records into buckets according to `spec`.
pub fn group_records(records: &[MeasurementRecord], spec: &GroupSpec) -> Grouping {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    let mut excluded = 0;

    for record in records.iter().filter(|r| spec.admits(r)) {
        match spec.key_for(record) {
            Some(key) => groups.entry(key).or_default().push(record.algorithm_time_ms),
            None => excluded += 1,
        }
    }

    Grouping {
        dimensions: spec.dimensions.clone(),
        groups,
        excluded,
    }
}

/// Shorthand for `group_records(records, spec).stats()`.
pub fn group_stats(records: &[MeasurementRecord], spec: &GroupSpec) -> GroupedStats {
    group_records(records, spec).stats()
}

/// One summarized bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// Bucket key.
    pub key: GroupKey,
    /// Display label for the key.
    pub label: String,
    /// Summary of the bucket's samples.
    pub stat: AggregateStat,
}

/// Per-bucket statistics in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedStats {
    /// Dimensions forming the keys.
    pub dimensions: Vec<Dimension>,
    /// Rows sorted by key.
    pub rows: Vec<GroupRow>,
}

impl GroupedStats {
    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Statistics for one key.
    pub fn get(&self, key: &GroupKey) -> Option<&AggregateStat> {
        self.rows
            .binary_search_by(|row| row.key.cmp(key))
            .ok()
            .map(|i| &self.rows[i].stat)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.rows.iter().map(|row| &row.key)
    }

    /// `(key, mean)` pairs for non-empty buckets.
    pub fn means(&self) -> Vec<(&GroupKey, f64)> {
        self.rows
            .iter()
            .filter(|row| !row.stat.is_empty())
            .map(|row| (&row.key, row.stat.mean))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<MeasurementRecord> {
        vec![
            MeasurementRecord::new("color_depth_analysis", Mode::Normal, 10.0)
                .with_resolution(2048)
                .with_colors(8),
            MeasurementRecord::new("color_depth_analysis", Mode::Normal, 14.0)
                .with_resolution(2048)
                .with_colors(8),
            MeasurementRecord::new("color_depth_analysis", Mode::Heavy, 40.0)
                .with_resolution(4096)
                .with_colors(128),
            MeasurementRecord::new("pixel_size_effect", Mode::Normal, 7.0)
                .with_resolution(2048)
                .with_pixel_size(4),
            MeasurementRecord::new("dithering_algorithms", Mode::Normal, 9.0)
                .with_dithering("atkinson"),
        ]
    }

    #[test]
    fn test_dimension_from_str() {
        assert_eq!("resolution".parse::<Dimension>().unwrap(), Dimension::Resolution);
        assert_eq!("pixelSize".parse::<Dimension>().unwrap(), Dimension::PixelSize);
        assert_eq!("output-scale".parse::<Dimension>().unwrap(), Dimension::OutputScale);
        assert_eq!("image".parse::<Dimension>().unwrap(), Dimension::ImageName);
        assert!("bogus".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_numeric_keys_sort_numerically() {
        let records = vec![
            MeasurementRecord::new("e", Mode::Normal, 1.0).with_colors(128),
            MeasurementRecord::new("e", Mode::Normal, 1.0).with_colors(16),
            MeasurementRecord::new("e", Mode::Normal, 1.0).with_colors(4),
        ];
        let grouping = group_records(&records, &GroupSpec::by(&[Dimension::Colors]));
        let keys: Vec<u64> = grouping
            .keys()
            .map(|k| k.first().and_then(DimensionValue::as_integer).unwrap())
            .collect();
        assert_eq!(keys, vec![4, 16, 128]);
    }

    #[test]
    fn test_missing_dimension_excluded_not_defaulted() {
        let records = sample_records();
        let grouping = group_records(&records, &GroupSpec::by(&[Dimension::Colors]));
        assert_eq!(grouping.total_samples(), 3);
        assert_eq!(grouping.excluded(), 2);
    }

    #[test]
    fn test_pixel_size_defaults_to_one() {
        let records = sample_records();
        let grouping = group_records(&records, &GroupSpec::by(&[Dimension::PixelSize]));
        assert_eq!(grouping.total_samples(), records.len());
        assert_eq!(grouping.get(&GroupKey::single(1u64)).map(<[f64]>::len), Some(4));
        assert_eq!(grouping.get(&GroupKey::single(4u64)), Some(&[7.0][..]));
    }

    #[test]
    fn test_multi_dimension_keys() {
        let records = sample_records();
        let spec = GroupSpec::by(&[Dimension::Resolution, Dimension::Mode]);
        let stats = group_records(&records, &spec).stats();

        let key = GroupKey::new(vec![
            DimensionValue::Integer(2048),
            DimensionValue::Mode(Mode::Normal),
        ]);
        let stat = stats.get(&key).unwrap();
        assert_eq!(stat.count, 3);
        assert_eq!(stats.rows[0].label, "2048x2048, normal");
    }

    #[test]
    fn test_experiment_and_mode_predicates() {
        let records = sample_records();
        let spec = GroupSpec::by(&[Dimension::Colors])
            .in_mode(Mode::Normal)
            .with_experiments(ExperimentFilter::contains("COLOR"));
        let grouping = group_records(&records, &spec);
        assert_eq!(grouping.len(), 1);
        assert_eq!(grouping.get(&GroupKey::single(8u64)), Some(&[10.0, 14.0][..]));
    }

    #[test]
    fn test_experiment_filter_matching() {
        let one_of = ExperimentFilter::one_of(["resolution_scaling", "high_resolution_stress"]);
        assert!(one_of.matches("resolution_scaling"));
        assert!(!one_of.matches("resolution"));
        assert!(ExperimentFilter::contains("scale").matches("output_scale_optimization"));
        assert!(ExperimentFilter::Any.matches(""));
    }

    #[test]
    fn test_output_scale_keys_are_percentages() {
        let records = vec![
            MeasurementRecord::new("output_scale_optimization", Mode::Normal, 1.0)
                .with_output_scale(0.29),
            MeasurementRecord::new("output_scale_optimization", Mode::Normal, 1.0)
                .with_output_scale(0.7),
        ];
        let stats = group_stats(&records, &GroupSpec::by(&[Dimension::OutputScale]));
        let labels: Vec<&str> = stats.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["29%", "70%"]);
    }

    #[test]
    fn test_experiment_filter_serde() {
        let filter: ExperimentFilter = serde_json::from_str(r#"{"contains": "color"}"#).unwrap();
        assert_eq!(filter, ExperimentFilter::contains("color"));
        let any: ExperimentFilter = serde_json::from_str(r#""any""#).unwrap();
        assert_eq!(any, ExperimentFilter::Any);
    }
}
