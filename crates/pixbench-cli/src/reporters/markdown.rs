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

//! Markdown export for analysis reports.

use super::{comparison_lines, format_ms, format_overhead, status_label, AnalysisDocument};
use pixbench_core::{
    AggregateStat, ComplexityEstimate, InteractionMatrix, Mode, ModeComparison, RelativeTime,
};

fn stat_row(name: &str, stat: &AggregateStat) -> String {
    format!(
        "| {} | {} | {:.2} | {:.2} | {:.2} | {:.1}% | {:.2} | {:.2} |\n",
        name,
        stat.count,
        stat.mean,
        stat.median,
        stat.std,
        stat.coefficient_of_variation() * 100.0,
        stat.min,
        stat.max
    )
}

fn push_relative(md: &mut String, mode: Mode, entries: &[RelativeTime]) {
    if entries.is_empty() {
        return;
    }
    md.push_str(&format!(
        "\n| Dithering | Relative to fastest ({}) |\n|---|---:|\n",
        mode
    ));
    for entry in entries {
        md.push_str(&format!("| {} | {:.2}x |\n", entry.label, entry.relative));
    }
}

fn push_comparison(md: &mut String, title: &str, comparison: &ModeComparison) {
    md.push_str(&format!("\n## {}\n\n", title));
    if comparison.is_empty() {
        md.push_str("_No matching records._\n");
        return;
    }
    if !comparison.is_comparable() {
        md.push_str(&format!(
            "> Only {} key(s) present in both modes (need {}).\n\n",
            comparison.shared_keys, comparison.min_shared_keys
        ));
    }

    md.push_str(&format!(
        "| {} | Normal (ms) | Heavy (ms) | Overhead | Status |\n",
        comparison.dimension.label()
    ));
    md.push_str("|---|---:|---:|---:|---|\n");
    for line in comparison_lines(comparison) {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            line.label,
            format_ms(line.normal),
            format_ms(line.heavy),
            format_overhead(&line.overhead),
            status_label(line.overhead.status)
        ));
    }
}

fn complexity_cell(estimate: &ComplexityEstimate) -> String {
    if estimate.is_defined() {
        format!(
            "{:.3} | {:.3} | {}",
            estimate.exponent, estimate.r_squared, estimate.points
        )
    } else {
        format!("- | - | {}", estimate.points)
    }
}

fn push_matrix(md: &mut String, matrix: &InteractionMatrix) {
    md.push_str(&format!(
        "\n### {} ({} x {})\n\n",
        matrix.name,
        matrix.row_dimension.label(),
        matrix.column_dimension.label()
    ));
    md.push_str(&format!("| {} |", matrix.row_dimension.label()));
    for label in &matrix.column_labels {
        md.push_str(&format!(" {} |", label));
    }
    md.push('\n');
    md.push_str("|---|");
    for _ in &matrix.column_labels {
        md.push_str("---:|");
    }
    md.push('\n');
    for (label, row) in matrix.row_labels.iter().zip(&matrix.cells) {
        md.push_str(&format!("| {} |", label));
        for &cell in row {
            let value = (!cell.is_nan()).then_some(cell);
            md.push_str(&format!(" {} |", format_ms(value)));
        }
        md.push('\n');
    }
}

/// Renders the report as a Markdown document.
pub fn render_markdown(doc: &AnalysisDocument) -> String {
    let report = &doc.report;
    let overview = &report.overview;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", doc.title));
    md.push_str(&format!("**Source:** {}\n\n", doc.source));
    md.push_str(&format!("**Generated:** {}\n\n", doc.timestamp));
    if let Some(started) = doc.benchmark_timestamp() {
        md.push_str(&format!("**Benchmark run:** {}\n\n", started));
    }

    if !doc.notes.is_empty() {
        md.push_str("## Notes\n\n");
        for note in &doc.notes {
            md.push_str(&format!("- {}\n", note));
        }
        md.push('\n');
    }

    md.push_str("## Overview\n\n");
    md.push_str("| Metric | Value |\n|---|---:|\n");
    md.push_str(&format!("| Records | {} |\n", overview.total_records));
    md.push_str(&format!("| Successful | {} |\n", overview.successful));
    md.push_str(&format!("| Failed | {} |\n", overview.failed));
    md.push_str(&format!("| Malformed | {} |\n", overview.malformed));
    md.push_str(&format!("| Experiments | {} |\n", overview.experiments));
    md.push_str(&format!("| Images | {} |\n", overview.images));
    md.push_str(&format!("| Saved outputs | {} |\n", overview.saved_outputs));

    if report.quality.failed > 0 || report.quality.has_warnings() {
        md.push_str("\n## Data Quality\n\n");
        for (experiment, count) in &report.quality.failures_by_experiment {
            md.push_str(&format!("- {} failed run(s) in `{}`\n", count, experiment));
            if let Some(messages) = report.quality.failure_messages.get(experiment) {
                for message in messages {
                    md.push_str(&format!("  - {}\n", message));
                }
            }
        }
        for record in &report.quality.malformed {
            md.push_str(&format!(
                "- **[WARN]** record #{} (`{}`): {}\n",
                record.index,
                record.experiment.as_deref().unwrap_or("?"),
                record.issue
            ));
        }
    }

    md.push_str("\n## Processing Modes\n\n");
    md.push_str("| Mode | Count | Mean (ms) | Median (ms) | Std (ms) | CV | Min (ms) | Max (ms) |");
    md.push('\n');
    md.push_str("|---|---:|---:|---:|---:|---:|---:|---:|\n");
    md.push_str(&stat_row("normal", &report.modes.normal));
    md.push_str(&stat_row("heavy", &report.modes.heavy));
    md.push_str(&format!(
        "\nHeavy overhead: **{}** ({})\n",
        format_overhead(&report.modes.overhead),
        status_label(report.modes.overhead.status)
    ));

    push_comparison(&mut md, "Resolution Scaling", &report.resolution);
    push_comparison(&mut md, "Color Depth", &report.colors);
    push_comparison(&mut md, "Pixel Size", &report.pixel_size);
    push_comparison(&mut md, "Output Scale", &report.output_scale);
    push_comparison(&mut md, "Dithering", &report.dithering.comparison);
    push_relative(&mut md, Mode::Normal, &report.dithering.relative_normal);
    push_relative(&mut md, Mode::Heavy, &report.dithering.relative_heavy);
    push_comparison(&mut md, "Image Complexity", &report.images);

    md.push_str("\n## Computational Complexity\n\n");
    md.push_str("| Mode | Exponent | R² | Points |\n|---|---:|---:|---:|\n");
    for mode in [Mode::Normal, Mode::Heavy] {
        md.push_str(&format!(
            "| {} | {} |\n",
            mode,
            complexity_cell(report.complexity.for_mode(mode))
        ));
    }

    if !report.matrices.is_empty() {
        md.push_str("\n## Interaction Matrices\n");
        for matrix in &report.matrices {
            push_matrix(&mut md, matrix);
        }
    }

    md.push_str("\n## Experiment Coverage\n\n");
    md.push_str("| Experiment | Normal | Heavy | Failed |\n|---|---:|---:|---:|\n");
    for row in &report.coverage {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.experiment, row.normal, row.heavy, row.failed
        ));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixbench_core::{AnalysisSuite, FilteredRecords, MeasurementRecord, Mode};

    #[test]
    fn test_render_markdown() {
        let records = vec![
            MeasurementRecord::new("dithering_comparison", Mode::Normal, 4.0)
                .with_dithering("none"),
            MeasurementRecord::new("dithering_comparison", Mode::Normal, 6.0)
                .with_dithering("ordered"),
            MeasurementRecord::new("dithering_comparison", Mode::Heavy, 8.0).with_dithering("none"),
        ];
        let report = AnalysisSuite::default().run(&FilteredRecords::from_records(records));
        let doc = AnalysisDocument::new("Benchmark Analysis", "run.json", None, report);
        let md = render_markdown(&doc);

        assert!(md.starts_with("# Benchmark Analysis\n"));
        assert!(md.contains("## Dithering"));
        assert!(md.contains("| none | 4.00 | 8.00 | +100.0% | compared |"));
        assert!(md.contains("| ordered | 1.50x |"));
        assert!(md.contains("| Dithering | Relative to fastest (heavy) |"));
        assert!(md.contains("| none | 1.00x |"));
        assert!(md.contains("| normal | - | - | 0 |"));
        assert!(md.contains("| Std (ms) | CV |"));
        assert!(!md.contains("## Data Quality"));
    }
}
