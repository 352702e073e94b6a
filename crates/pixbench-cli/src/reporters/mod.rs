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

//! Report renderers for analysis results.
//!
//! # Modules
//!
//! - `types`: the report document wrapping an [`AnalysisReport`]
//! - `console`: colored plain-text output
//! - `markdown`: Markdown export
//! - `json`: pretty JSON export
//! - `csv`: CSV export for grouped statistics and matrices

pub mod console;
pub mod csv;
pub mod json;
pub mod markdown;
pub mod types;

pub use console::{render_grouped, render_matrix, render_report, render_summary};
pub use json::to_json;
pub use markdown::render_markdown;
pub use types::AnalysisDocument;

use clap::ValueEnum;
use pixbench_core::{ComparisonStatus, ModeComparison, Overhead};

/// Output format for the full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored plain text.
    Console,
    /// Markdown document.
    Markdown,
    /// Pretty JSON.
    Json,
}

/// Output format for single tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    /// Aligned plain text.
    Console,
    /// Pretty JSON.
    Json,
    /// Comma-separated values.
    Csv,
}

/// One line of a normal-vs-heavy table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonLine {
    /// Key label.
    pub label: String,
    /// Normal-mode mean, if the key has normal samples.
    pub normal: Option<f64>,
    /// Heavy-mode mean, if the key has heavy samples.
    pub heavy: Option<f64>,
    /// Overhead of heavy over normal.
    pub overhead: Overhead,
}

/// Flattens a comparison into table lines in key order.
pub fn comparison_lines(comparison: &ModeComparison) -> Vec<ComparisonLine> {
    comparison
        .overhead
        .iter()
        .map(|row| ComparisonLine {
            label: row.label.clone(),
            normal: (row.overhead.status != ComparisonStatus::MissingBaseline)
                .then_some(row.overhead.baseline_mean),
            heavy: (row.overhead.status != ComparisonStatus::MissingComparison)
                .then_some(row.overhead.comparison_mean),
            overhead: row.overhead,
        })
        .collect()
}

/// Milliseconds with two decimals, or `-` when absent.
pub fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "-".to_string(),
    }
}

/// Overhead percentage, or `n/a` when no comparison was possible.
pub fn format_overhead(overhead: &Overhead) -> String {
    if overhead.status.is_compared() {
        format!("{:+.1}%", overhead.overhead_percent)
    } else {
        "n/a".to_string()
    }
}

/// Short description of a comparison status.
pub fn status_label(status: ComparisonStatus) -> &'static str {
    match status {
        ComparisonStatus::Compared => "compared",
        ComparisonStatus::MissingBaseline => "no normal data",
        ComparisonStatus::ZeroBaseline => "zero normal mean",
        ComparisonStatus::MissingComparison => "no heavy data",
    }
}
