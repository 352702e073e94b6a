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

//! Console reporter for analysis results.

use super::{comparison_lines, format_ms, format_overhead, status_label, AnalysisDocument};
use colored::Colorize;
use pixbench_core::{
    AggregateStat, ComplexityEstimate, DataQualityReport, GroupedStats, InteractionMatrix, Mode,
    ModeComparison, Overview,
};

const WIDTH: usize = 80;

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n", "-".repeat(WIDTH)));
    out.push_str(&format!("{}\n", title.bold()));
    out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
}

fn stat_line(stat: &AggregateStat) -> String {
    if stat.is_empty() {
        return "no data".to_string();
    }
    format!(
        "n={} mean={:.2}ms median={:.2}ms std={:.2}ms cv={:.1}% min={:.2}ms max={:.2}ms",
        stat.count,
        stat.mean,
        stat.median,
        stat.std,
        stat.coefficient_of_variation() * 100.0,
        stat.min,
        stat.max
    )
}

fn push_overview(out: &mut String, overview: &Overview) {
    heading(out, "OVERVIEW");
    out.push_str(&format!("Records:        {}\n", overview.total_records));
    out.push_str(&format!("Successful:     {}\n", overview.successful));
    out.push_str(&format!("Failed:         {}\n", overview.failed));
    out.push_str(&format!("Malformed:      {}\n", overview.malformed));
    out.push_str(&format!("Experiments:    {}\n", overview.experiments));
    out.push_str(&format!("Images:         {}\n", overview.images));
    out.push_str(&format!("Saved outputs:  {}\n", overview.saved_outputs));
    out.push_str(&format!("Algorithm time: {}\n", stat_line(&overview.time)));
}

fn push_quality(out: &mut String, quality: &DataQualityReport) {
    heading(out, "DATA QUALITY");
    if quality.failed == 0 && !quality.has_warnings() {
        out.push_str(&format!("{}\n", "No failed or malformed records".green()));
        return;
    }

    if !quality.failures_by_experiment.is_empty() {
        out.push_str("Failed runs:\n");
        for (experiment, count) in &quality.failures_by_experiment {
            out.push_str(&format!("  {}: {}\n", experiment, count));
            for message in quality.failure_messages.get(experiment).into_iter().flatten() {
                out.push_str(&format!("    - {}\n", message));
            }
        }
    }

    if !quality.malformed.is_empty() {
        out.push_str(&format!(
            "{}\n",
            format!("Malformed records excluded: {}", quality.malformed.len()).yellow()
        ));
        for record in &quality.malformed {
            let experiment = record.experiment.as_deref().unwrap_or("?");
            out.push_str(&format!(
                "  [WARN] record #{} ({}): {}\n",
                record.index, experiment, record.issue
            ));
        }
    }
}

fn push_comparison(out: &mut String, title: &str, comparison: &ModeComparison) {
    heading(out, title);
    if comparison.is_empty() {
        out.push_str("No matching records\n");
        return;
    }
    if !comparison.is_comparable() {
        out.push_str(&format!(
            "{}\n",
            format!(
                "Only {} key(s) present in both modes (need {}); showing per-mode groups only",
                comparison.shared_keys, comparison.min_shared_keys
            )
            .yellow()
        ));
    }

    out.push_str(&format!(
        "{:<24} {:>12} {:>12} {:>10}  {}\n",
        comparison.dimension.label(),
        "normal ms",
        "heavy ms",
        "overhead",
        "status"
    ));
    for line in comparison_lines(comparison) {
        out.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>10}  {}\n",
            line.label,
            format_ms(line.normal),
            format_ms(line.heavy),
            format_overhead(&line.overhead),
            status_label(line.overhead.status)
        ));
    }
}

fn complexity_line(estimate: &ComplexityEstimate) -> String {
    if !estimate.is_defined() {
        return format!("undefined ({} point(s))", estimate.points);
    }
    format!(
        "O(n^{:.3})  R²={:.3}  ({} resolutions)",
        estimate.exponent, estimate.r_squared, estimate.points
    )
}

/// Renders an interaction matrix as an aligned grid.
pub fn render_matrix(matrix: &InteractionMatrix) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({} x {})\n",
        matrix.name.bold(),
        matrix.row_dimension.label(),
        matrix.column_dimension.label()
    ));
    out.push_str(&format!("{:>14}", ""));
    for label in &matrix.column_labels {
        out.push_str(&format!(" {:>12}", label));
    }
    out.push('\n');

    for (label, row) in matrix.row_labels.iter().zip(&matrix.cells) {
        out.push_str(&format!("{:>14}", label));
        for &cell in row {
            let value = (!cell.is_nan()).then_some(cell);
            out.push_str(&format!(" {:>12}", format_ms(value)));
        }
        out.push('\n');
    }
    out
}

/// Renders grouped statistics as a table.
pub fn render_grouped(stats: &GroupedStats) -> String {
    let header: Vec<&str> = stats.dimensions.iter().map(|d| d.label()).collect();
    let mut out = String::new();
    out.push_str(&format!(
        "{:<32} {:>6} {:>12} {:>12} {:>10} {:>12} {:>12}\n",
        header.join(", "),
        "count",
        "mean ms",
        "median ms",
        "std ms",
        "min ms",
        "max ms"
    ));
    for row in &stats.rows {
        out.push_str(&format!(
            "{:<32} {:>6} {:>12.2} {:>12.2} {:>10.2} {:>12.2} {:>12.2}\n",
            row.label,
            row.stat.count,
            row.stat.mean,
            row.stat.median,
            row.stat.std,
            row.stat.min,
            row.stat.max
        ));
    }
    if stats.is_empty() {
        out.push_str("No matching records\n");
    }
    out
}

/// Renders the overview and data-quality sections only.
pub fn render_summary(doc: &AnalysisDocument) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("SUMMARY: {}\n", doc.source.bold()));
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    push_overview(&mut out, &doc.report.overview);
    push_quality(&mut out, &doc.report.quality);
    out
}

/// Renders the full report.
pub fn render_report(doc: &AnalysisDocument) -> String {
    let report = &doc.report;
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("{}\n", doc.title.to_uppercase().bold()));
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("Source: {}\n", doc.source));
    out.push_str(&format!("Generated: {}\n", doc.timestamp));
    if let Some(started) = doc.benchmark_timestamp() {
        out.push_str(&format!("Benchmark run: {}\n", started));
    }
    if !doc.notes.is_empty() {
        out.push_str("\nNotes:\n");
        for note in &doc.notes {
            out.push_str(&format!("  - {}\n", note));
        }
    }

    push_overview(&mut out, &report.overview);
    push_quality(&mut out, &report.quality);

    heading(&mut out, "PROCESSING MODES");
    out.push_str(&format!("normal: {}\n", stat_line(&report.modes.normal)));
    out.push_str(&format!("heavy:  {}\n", stat_line(&report.modes.heavy)));
    out.push_str(&format!(
        "Heavy overhead: {} ({})\n",
        format_overhead(&report.modes.overhead),
        status_label(report.modes.overhead.status)
    ));

    push_comparison(&mut out, "RESOLUTION SCALING", &report.resolution);
    push_comparison(&mut out, "COLOR DEPTH", &report.colors);
    push_comparison(&mut out, "PIXEL SIZE", &report.pixel_size);
    push_comparison(&mut out, "OUTPUT SCALE", &report.output_scale);
    push_comparison(&mut out, "DITHERING", &report.dithering.comparison);
    if !report.dithering.relative_normal.is_empty() {
        out.push_str("Relative to fastest (normal):");
        for entry in &report.dithering.relative_normal {
            out.push_str(&format!(" {}={:.2}x", entry.label, entry.relative));
        }
        out.push('\n');
    }
    if !report.dithering.relative_heavy.is_empty() {
        out.push_str("Relative to fastest (heavy):");
        for entry in &report.dithering.relative_heavy {
            out.push_str(&format!(" {}={:.2}x", entry.label, entry.relative));
        }
        out.push('\n');
    }
    push_comparison(&mut out, "IMAGE COMPLEXITY", &report.images);

    heading(&mut out, "COMPUTATIONAL COMPLEXITY");
    for mode in [Mode::Normal, Mode::Heavy] {
        out.push_str(&format!(
            "{:<8}{}\n",
            format!("{}:", mode),
            complexity_line(report.complexity.for_mode(mode))
        ));
    }

    if !report.matrices.is_empty() {
        heading(&mut out, "INTERACTION MATRICES");
        for matrix in &report.matrices {
            out.push_str(&render_matrix(matrix));
        }
    }

    heading(&mut out, "EXPERIMENT COVERAGE");
    out.push_str(&format!(
        "{:<32} {:>8} {:>8} {:>8}\n",
        "experiment", "normal", "heavy", "failed"
    ));
    for row in &report.coverage {
        out.push_str(&format!(
            "{:<32} {:>8} {:>8} {:>8}\n",
            row.experiment, row.normal, row.heavy, row.failed
        ));
    }

    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixbench_core::{AnalysisSuite, FilteredRecords, MeasurementRecord, Mode};

    fn document() -> AnalysisDocument {
        let records = vec![
            MeasurementRecord::new("resolution_scaling", Mode::Normal, 10.0)
                .with_resolution(256)
                .with_colors(8),
            MeasurementRecord::new("resolution_scaling", Mode::Normal, 40.0)
                .with_resolution(512)
                .with_colors(16),
            MeasurementRecord::new("resolution_scaling", Mode::Heavy, 30.0)
                .with_resolution(256)
                .with_colors(8),
            MeasurementRecord::new("resolution_scaling", Mode::Heavy, 90.0)
                .with_resolution(512)
                .with_colors(16),
            MeasurementRecord::new("resolution_scaling", Mode::Heavy, 60.0)
                .with_resolution(512)
                .with_colors(8),
        ];
        let report = AnalysisSuite::default().run(&FilteredRecords::from_records(records));
        AnalysisDocument::new("Image Processing Benchmark Analysis", "results.json", None, report)
    }

    #[test]
    fn test_render_report_sections() {
        colored::control::set_override(false);
        let text = render_report(&document());

        assert!(text.contains("IMAGE PROCESSING BENCHMARK ANALYSIS"));
        assert!(text.contains("RESOLUTION SCALING"));
        assert!(text.contains("256x256"));
        assert!(text.contains("+200.0%"));
        assert!(text.contains("O(n^1.000)"));
        assert!(text.contains("normal: O(n^"));
        assert!(text.contains("cv="));
        assert!(text.contains("INTERACTION MATRICES"));
        assert!(text.contains("No failed or malformed records"));
    }

    #[test]
    fn test_render_matrix_marks_empty_cells() {
        colored::control::set_override(false);
        let doc = document();
        let text = render_matrix(&doc.report.matrices[0]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("256x256") && lines[1].contains("512x512"));
        assert!(lines[3].trim_start().starts_with("16"));
        assert!(lines[3].contains('-'));
    }

    #[test]
    fn test_render_summary_only_overview() {
        colored::control::set_override(false);
        let text = render_summary(&document());
        assert!(text.contains("OVERVIEW"));
        assert!(!text.contains("RESOLUTION SCALING"));
    }
}
