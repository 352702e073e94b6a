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

//! Matrix command - one two-factor interaction matrix.

use super::{experiment_filter, load_collection, write_output};
use crate::error::CliError;
use crate::reporters::csv::matrix_to_csv;
use crate::reporters::{render_matrix, to_json, TableFormat};
use pixbench_core::{build_matrix, filter_successful, Dimension, MatrixSpec, Mode};

/// Builds and prints the matrix of mean times over `rows` x `columns`.
///
/// A single-valued axis is reported as "no matrix" rather than an error.
///
/// # Errors
///
/// Returns `Err` if both axes are the same dimension or the file cannot be
/// loaded.
pub fn matrix(
    file: &str,
    rows: Dimension,
    columns: Dimension,
    mode: Mode,
    experiments: &[String],
    format: TableFormat,
) -> Result<(), CliError> {
    let spec = MatrixSpec::new(format!("{}_by_{}", rows, columns), rows, columns, mode)
        .with_experiments(experiment_filter(experiments, None));
    spec.validate()?;

    let filtered = filter_successful(&load_collection(file)?);
    let matrix = build_matrix(&filtered.records, &spec);

    let rendered = match (matrix, format) {
        (Some(m), TableFormat::Console) => render_matrix(&m),
        (Some(m), TableFormat::Json) => to_json(&m)?,
        (Some(m), TableFormat::Csv) => matrix_to_csv(&m)?,
        (None, TableFormat::Json) => "null\n".to_string(),
        (None, _) => format!(
            "No interaction matrix: '{}' or '{}' has fewer than two distinct values\n",
            rows, columns
        ),
    };
    write_output(&rendered, None)
}
