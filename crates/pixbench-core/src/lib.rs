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

//! Aggregation engine for image processing benchmark results.
//!
//! Turns a flat collection of per-run measurements into grouped statistical
//! summaries and the metrics derived from them:
//!
//! - **Filtering**: successful records only, normalized once, with a
//!   data-quality report for everything left out
//! - **Grouping**: buckets keyed by resolution, colors, pixel size, output
//!   scale, dithering, image, mode, or experiment
//! - **Complexity**: power-law exponent from a log-log least-squares fit
//! - **Matrices**: dense two-factor grids with `NaN` for empty cells
//! - **Overhead**: heavy-over-normal ratios with an explicit comparison status
//!
//! # Example
//!
//! ```
//! use pixbench_core::{AnalysisSuite, RecordCollection};
//!
//! let json = r#"{"outputs": [
//!     {"experiment": "resolution_scaling", "mode": "normal", "resolution": 256, "algorithmTime_ms": 10.0, "success": true},
//!     {"experiment": "resolution_scaling", "mode": "normal", "resolution": 1024, "algorithmTime_ms": 160.0, "success": true}
//! ]}"#;
//!
//! let collection = RecordCollection::from_json_str(json).unwrap();
//! let report = AnalysisSuite::default().analyze(&collection);
//!
//! assert!((report.complexity.normal.exponent - 1.0).abs() < 1e-9);
//! ```

pub mod complexity;
pub mod config;
pub mod dimension;
pub mod error;
pub mod filter;
pub mod matrix;
pub mod overhead;
pub mod record;
pub mod stats;
pub mod suite;

pub use complexity::{
    estimate_complexity, estimate_complexity_for_mode, fit_line, ComplexityEstimate, LineFit,
};
pub use config::{AnalysisConfig, ComparisonConfig, DEFAULT_MIN_SHARED_KEYS};
pub use dimension::{
    group_records, group_stats, scale_percent, Dimension, DimensionValue, ExperimentFilter,
    GroupKey, GroupRow, GroupSpec, GroupedStats, Grouping,
};
pub use error::{AnalysisError, RecordIssue, Result};
pub use filter::{
    filter_successful, normalize, DataQualityReport, FilteredRecords, MalformedRecord,
};
pub use matrix::{build_matrix, InteractionMatrix, MatrixSpec};
pub use overhead::{
    compare_groups, overhead, relative_to_fastest, ComparisonStatus, Overhead, OverheadRow,
    RelativeTime,
};
pub use record::{MeasurementRecord, Mode, RawRecord, RecordCollection};
pub use stats::AggregateStat;
pub use suite::{
    compare_modes, AnalysisReport, AnalysisSuite, ComplexitySummary, CoverageRow,
    DitheringAnalysis, ModeComparison, ModeSummary, Overview,
};
