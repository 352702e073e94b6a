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

//! Standard analyses composed into one report.
//!
//! Each analysis is a pure function over the shared filtered records. The
//! suite only wires them together and, when enabled, fans them out across
//! the rayon pool.

use crate::complexity::{estimate_complexity_for_mode, ComplexityEstimate};
use crate::config::{AnalysisConfig, ComparisonConfig};
use crate::dimension::{group_stats, Dimension, GroupKey, GroupSpec, GroupedStats};
use crate::error::Result;
use crate::filter::{filter_successful, DataQualityReport, FilteredRecords};
use crate::matrix::{build_matrix, InteractionMatrix};
use crate::overhead::{
    compare_groups, overhead, relative_to_fastest, Overhead, OverheadRow, RelativeTime,
};
use crate::record::{MeasurementRecord, Mode, RecordCollection};
use crate::stats::AggregateStat;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Headline counts for a benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    /// Records in the input.
    pub total_records: usize,
    /// Successful, well-formed records.
    pub successful: usize,
    /// Records reported as failed.
    pub failed: usize,
    /// Successful records excluded as malformed.
    pub malformed: usize,
    /// Distinct experiment tags, failed records included.
    pub experiments: usize,
    /// Distinct source images among successful records.
    pub images: usize,
    /// Distinct saved output images.
    pub saved_outputs: usize,
    /// Summary of every successful `algorithmTime_ms`.
    pub time: AggregateStat,
}

/// Normal and heavy totals with heavy-over-normal overhead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSummary {
    /// All normal-mode samples.
    pub normal: AggregateStat,
    /// All heavy-mode samples.
    pub heavy: AggregateStat,
    /// Heavy relative to normal.
    pub overhead: Overhead,
}

/// One dimension grouped per mode, with heavy-over-normal overhead per key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeComparison {
    /// Grouping dimension.
    pub dimension: Dimension,
    /// Normal-mode groups.
    pub normal: GroupedStats,
    /// Heavy-mode groups.
    pub heavy: GroupedStats,
    /// Overhead per key over the union of both modes.
    pub overhead: Vec<OverheadRow>,
    /// Keys present in both modes.
    pub shared_keys: usize,
    /// Threshold below which renderers skip the comparison.
    pub min_shared_keys: usize,
}

impl ModeComparison {
    /// Returns whether enough keys are shared for a meaningful comparison.
    pub fn is_comparable(&self) -> bool {
        self.shared_keys >= self.min_shared_keys
    }

    /// Returns whether neither mode produced a group.
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty() && self.heavy.is_empty()
    }
}

/// Dithering comparison plus times relative to the fastest algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DitheringAnalysis {
    /// Per-mode grouping by dithering algorithm.
    #[serde(flatten)]
    pub comparison: ModeComparison,
    /// Normal-mode means over the fastest normal-mode mean.
    pub relative_normal: Vec<RelativeTime>,
    /// Heavy-mode means over the fastest heavy-mode mean.
    pub relative_heavy: Vec<RelativeTime>,
}

/// Complexity exponent per mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComplexitySummary {
    /// Normal-mode fit.
    pub normal: ComplexityEstimate,
    /// Heavy-mode fit.
    pub heavy: ComplexityEstimate,
}

impl ComplexitySummary {
    /// Fit for one mode.
    pub fn for_mode(&self, mode: Mode) -> &ComplexityEstimate {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Heavy => &self.heavy,
        }
    }
}

/// Records per experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageRow {
    /// Experiment tag.
    pub experiment: String,
    /// Successful normal-mode records.
    pub normal: usize,
    /// Successful heavy-mode records.
    pub heavy: usize,
    /// Failed records.
    pub failed: usize,
}

impl CoverageRow {
    fn empty(experiment: &str) -> Self {
        Self {
            experiment: experiment.to_string(),
            normal: 0,
            heavy: 0,
            failed: 0,
        }
    }
}

/// Everything the suite derives from one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Headline counts.
    pub overview: Overview,
    /// Filtering outcome.
    pub quality: DataQualityReport,
    /// Totals per mode.
    pub modes: ModeSummary,
    /// Resolution scaling.
    pub resolution: ModeComparison,
    /// Color depth.
    pub colors: ModeComparison,
    /// Pixel size.
    pub pixel_size: ModeComparison,
    /// Output scale, keyed by percent.
    pub output_scale: ModeComparison,
    /// Dithering algorithms.
    pub dithering: DitheringAnalysis,
    /// Source images.
    pub images: ModeComparison,
    /// Complexity exponents.
    pub complexity: ComplexitySummary,
    /// Non-degenerate interaction matrices.
    pub matrices: Vec<InteractionMatrix>,
    /// Records per experiment.
    pub coverage: Vec<CoverageRow>,
}

/// Runs the standard analyses.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSuite {
    config: AnalysisConfig,
}

impl AnalysisSuite {
    /// Creates a suite without validating `config`.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Creates a suite after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`AnalysisConfig::validate`].
    pub fn try_new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Filters `collection` and runs every analysis.
    pub fn analyze(&self, collection: &RecordCollection) -> AnalysisReport {
        self.run(&filter_successful(collection))
    }

    /// Runs every analysis over already-filtered records.
    pub fn run(&self, filtered: &FilteredRecords) -> AnalysisReport {
        let records = filtered.records.as_slice();
        let config = &self.config;
        let parallel = config.parallel;

        debug!(records = records.len(), parallel, "Running analysis suite");

        let compare = |dimension: Dimension, comparison: &ComparisonConfig| {
            compare_modes(records, dimension, comparison)
        };

        let (((resolution, colors), (pixel_size, output_scale)), (dithering, images)) = join(
            parallel,
            || {
                join(
                    parallel,
                    || {
                        join(
                            parallel,
                            || compare(Dimension::Resolution, &config.resolution),
                            || compare(Dimension::Colors, &config.colors),
                        )
                    },
                    || {
                        join(
                            parallel,
                            || compare(Dimension::PixelSize, &config.pixel_size),
                            || compare(Dimension::OutputScale, &config.output_scale),
                        )
                    },
                )
            },
            || {
                join(
                    parallel,
                    || analyze_dithering(records, &config.dithering),
                    || compare(Dimension::ImageName, &config.images),
                )
            },
        );

        let ((complexity, matrices), (modes, coverage)) = join(
            parallel,
            || {
                join(
                    parallel,
                    || {
                        let fit = |mode| {
                            estimate_complexity_for_mode(records, mode, &config.complexity)
                        };
                        ComplexitySummary {
                            normal: fit(Mode::Normal),
                            heavy: fit(Mode::Heavy),
                        }
                    },
                    || {
                        config
                            .matrices
                            .iter()
                            .filter_map(|spec| build_matrix(records, spec))
                            .collect::<Vec<_>>()
                    },
                )
            },
            || join(parallel, || summarize_modes(records), || coverage(filtered)),
        );

        AnalysisReport {
            overview: overview(filtered),
            quality: filtered.quality.clone(),
            modes,
            resolution,
            colors,
            pixel_size,
            output_scale,
            dithering,
            images,
            complexity,
            matrices,
            coverage,
        }
    }
}

fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

/// Groups `records` by `dimension` per mode and compares heavy to normal.
pub fn compare_modes(
    records: &[MeasurementRecord],
    dimension: Dimension,
    config: &ComparisonConfig,
) -> ModeComparison {
    let spec = GroupSpec::by(&[dimension]).with_experiments(config.experiments.clone());
    let normal = group_stats(records, &spec.clone().in_mode(Mode::Normal));
    let heavy = group_stats(records, &spec.in_mode(Mode::Heavy));
    let shared_keys = normal.keys().filter(|key| heavy.get(key).is_some()).count();

    debug!(
        dimension = %dimension,
        normal = normal.len(),
        heavy = heavy.len(),
        shared_keys,
        "Compared modes"
    );

    ModeComparison {
        dimension,
        overhead: compare_groups(&normal, &heavy),
        normal,
        heavy,
        shared_keys,
        min_shared_keys: config.min_shared_keys,
    }
}

/// Dithering comparison with per-mode times relative to the fastest algorithm.
pub fn analyze_dithering(
    records: &[MeasurementRecord],
    config: &ComparisonConfig,
) -> DitheringAnalysis {
    let comparison = compare_modes(records, Dimension::Dithering, config);
    DitheringAnalysis {
        relative_normal: relative_to_fastest(&comparison.normal),
        relative_heavy: relative_to_fastest(&comparison.heavy),
        comparison,
    }
}

/// Overall statistics per mode.
pub fn summarize_modes(records: &[MeasurementRecord]) -> ModeSummary {
    let stats = group_stats(records, &GroupSpec::by(&[Dimension::Mode]));
    let normal = stats
        .get(&GroupKey::single(Mode::Normal))
        .copied()
        .unwrap_or_default();
    let heavy = stats
        .get(&GroupKey::single(Mode::Heavy))
        .copied()
        .unwrap_or_default();

    ModeSummary {
        overhead: overhead(&normal, &heavy),
        normal,
        heavy,
    }
}

/// Headline counts for the filtered run.
pub fn overview(filtered: &FilteredRecords) -> Overview {
    let records = &filtered.records;
    let quality = &filtered.quality;

    let experiments: BTreeSet<&str> = records
        .iter()
        .map(|r| r.experiment.as_str())
        .chain(quality.failures_by_experiment.keys().map(String::as_str))
        .collect();
    let images: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.image_name.as_deref())
        .collect();
    let outputs: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.output_image.as_deref())
        .collect();
    let samples: Vec<f64> = records.iter().map(|r| r.algorithm_time_ms).collect();

    Overview {
        total_records: quality.total,
        successful: quality.successful,
        failed: quality.failed,
        malformed: quality.malformed.len(),
        experiments: experiments.len(),
        images: images.len(),
        saved_outputs: outputs.len(),
        time: AggregateStat::from_samples(&samples),
    }
}

/// Record counts per experiment, sorted by tag.
pub fn coverage(filtered: &FilteredRecords) -> Vec<CoverageRow> {
    let mut rows: BTreeMap<&str, CoverageRow> = BTreeMap::new();

    for record in &filtered.records {
        let row = rows
            .entry(record.experiment.as_str())
            .or_insert_with(|| CoverageRow::empty(&record.experiment));
        match record.mode {
            Mode::Normal => row.normal += 1,
            Mode::Heavy => row.heavy += 1,
        }
    }
    for (experiment, &failed) in &filtered.quality.failures_by_experiment {
        rows.entry(experiment.as_str())
            .or_insert_with(|| CoverageRow::empty(experiment))
            .failed += failed;
    }

    rows.into_values().collect()
}
