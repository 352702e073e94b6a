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

//! CSV export for grouped statistics and interaction matrices.

use crate::error::CliError;
use pixbench_core::{GroupedStats, InteractionMatrix};

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, CliError> {
    let bytes = wtr.into_inner().map_err(|e| CliError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CliError::Csv(e.to_string()))
}

/// One row per group: the key values, then count, mean, median, std, min, max.
///
/// # Errors
///
/// Returns [`CliError::Csv`] if writing fails.
pub fn grouped_to_csv(stats: &GroupedStats) -> Result<String, CliError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header: Vec<String> = stats.dimensions.iter().map(|d| d.as_str().to_string()).collect();
    header.extend(
        ["count", "mean_ms", "median_ms", "std_ms", "min_ms", "max_ms"].map(String::from),
    );
    wtr.write_record(&header)?;

    for row in &stats.rows {
        let mut record: Vec<String> = row.key.values().iter().map(|v| v.to_string()).collect();
        record.push(row.stat.count.to_string());
        for value in [row.stat.mean, row.stat.median, row.stat.std, row.stat.min, row.stat.max] {
            record.push(value.to_string());
        }
        wtr.write_record(&record)?;
    }

    finish(wtr)
}

/// One row per matrix row; empty fields for cells without data.
///
/// # Errors
///
/// Returns [`CliError::Csv`] if writing fails.
pub fn matrix_to_csv(matrix: &InteractionMatrix) -> Result<String, CliError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header = vec![format!("{}\\{}", matrix.row_dimension, matrix.column_dimension)];
    header.extend(matrix.column_values.iter().map(|v| v.to_string()));
    wtr.write_record(&header)?;

    for (value, row) in matrix.row_values.iter().zip(&matrix.cells) {
        let mut record = vec![value.to_string()];
        record.extend(
            row.iter()
                .map(|cell| if cell.is_nan() { String::new() } else { cell.to_string() }),
        );
        wtr.write_record(&record)?;
    }

    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixbench_core::{
        build_matrix, group_stats, Dimension, GroupSpec, MatrixSpec, MeasurementRecord, Mode,
    };

    fn records() -> Vec<MeasurementRecord> {
        vec![
            MeasurementRecord::new("resolution_scaling", Mode::Heavy, 10.0)
                .with_resolution(256)
                .with_colors(8),
            MeasurementRecord::new("resolution_scaling", Mode::Heavy, 20.0)
                .with_resolution(256)
                .with_colors(8),
            MeasurementRecord::new("resolution_scaling", Mode::Heavy, 40.0)
                .with_resolution(512)
                .with_colors(16),
        ]
    }

    #[test]
    fn test_grouped_to_csv() {
        let spec = GroupSpec::by(&[Dimension::Resolution, Dimension::Mode]);
        let stats = group_stats(&records(), &spec);
        let csv = grouped_to_csv(&stats).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "resolution,mode,count,mean_ms,median_ms,std_ms,min_ms,max_ms");
        assert!(lines[1].starts_with("256,heavy,2,15,15,"));
        assert!(lines[2].starts_with("512,heavy,1,40,40,0,"));
    }

    #[test]
    fn test_matrix_to_csv() {
        let matrix = build_matrix(&records(), &MatrixSpec::colors_by_resolution()).unwrap();
        let csv = matrix_to_csv(&matrix).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines, vec!["colors\\resolution,256,512", "8,15,", "16,,40"]);
    }
}
