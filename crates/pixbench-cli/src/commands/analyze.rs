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

//! Analyze command - runs every standard analysis and renders the report.

use super::{load_collection, write_output};
use crate::config::load_config;
use crate::error::CliError;
use crate::reporters::{render_markdown, render_report, to_json, AnalysisDocument, ReportFormat};
use pixbench_core::{AnalysisConfig, AnalysisSuite, ModeComparison};
use tracing::info;

/// Report title used by every renderer.
pub const REPORT_TITLE: &str = "Image Processing Benchmark Analysis";

/// Builds the full report for a benchmark results file.
///
/// # Arguments
///
/// * `file` - Benchmark results JSON
/// * `config_path` - Optional YAML/JSON analysis configuration
/// * `sequential` - Disable parallel analyses
///
/// # Errors
///
/// Returns `Err` if the input or configuration cannot be loaded.
pub fn build_document(
    file: &str,
    config_path: Option<&str>,
    sequential: bool,
) -> Result<AnalysisDocument, CliError> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    if sequential {
        config.parallel = false;
    }

    let collection = load_collection(file)?;
    let suite = AnalysisSuite::try_new(config)?;
    let report = suite.analyze(&collection);

    let mut doc = AnalysisDocument::new(REPORT_TITLE, file, collection.metadata().cloned(), report);
    if !doc.report.quality.malformed.is_empty() {
        doc.add_note(format!(
            "{} malformed record(s) excluded from every analysis",
            doc.report.quality.malformed.len()
        ));
    }
    let skipped: Vec<String> = [
        &doc.report.resolution,
        &doc.report.colors,
        &doc.report.pixel_size,
        &doc.report.output_scale,
        &doc.report.dithering.comparison,
        &doc.report.images,
    ]
    .into_iter()
    .filter(|c: &&ModeComparison| !c.is_empty() && !c.is_comparable())
    .map(|c| c.dimension.label().to_string())
    .collect();
    if !skipped.is_empty() {
        doc.add_note(format!(
            "Too few keys shared between modes for: {}",
            skipped.join(", ")
        ));
    }

    Ok(doc)
}

/// Runs the full analysis and writes the report.
///
/// # Errors
///
/// Returns `Err` if loading, rendering, or writing fails.
pub fn analyze(
    file: &str,
    format: ReportFormat,
    output: Option<&str>,
    config_path: Option<&str>,
    sequential: bool,
) -> Result<(), CliError> {
    let doc = build_document(file, config_path, sequential)?;
    info!(
        successful = doc.report.overview.successful,
        malformed = doc.report.overview.malformed,
        "Analysis complete"
    );

    let rendered = match format {
        ReportFormat::Console => render_report(&doc),
        ReportFormat::Markdown => render_markdown(&doc),
        ReportFormat::Json => to_json(&doc)?,
    };
    write_output(&rendered, output)?;

    if let Some(path) = output {
        eprintln!("Report written to {}", path);
    }
    Ok(())
}
